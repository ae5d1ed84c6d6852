//! Image-access abstraction layer.
//!
//! This module defines the contract between the layer builder and whatever
//! actually decodes microscopy files.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              LayerBuilder               │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │           ImageSource Trait             │
//! │        (opens a path → handle)          │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │           ImageHandle Trait             │
//! │  (extents, channel names, pixel sizes,  │
//! │   lazy STCZYX slices)                   │
//! └────────────────────┬────────────────────┘
//!                      │
//!          ┌───────────┴───────────┐
//!          ▼                       ▼
//! ┌─────────────────┐    ┌─────────────────────┐
//! │  InMemoryImage  │    │  external decoder   │
//! │ (decoded data)  │    │   (LIF / CZI)       │
//! └─────────────────┘    └─────────────────────┘
//! ```

mod memory;
mod reader;

pub use memory::{InMemoryImage, InMemorySource};
pub use reader::{
    Dimension, DimensionOrder, ImageDims, ImageHandle, ImageSource, PhysicalPixelSizes, Selection,
};
