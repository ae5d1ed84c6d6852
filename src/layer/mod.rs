//! Layer construction.
//!
//! - [`LayerBuilder`]: opens an image and produces one [`LayerData`] per channel
//! - [`ChannelLayout`]: the four time/depth layouts and their scale vectors
//! - [`LayerMetadata`]: viewer keyword arguments (name, blending, rendering,
//!   scale, colormap)
//! - [`COLORMAPS`]: the cyclic channel palette

mod builder;
mod colormap;
mod metadata;

pub use builder::{ChannelEntry, ChannelLayout, LayerBuilder};
pub use colormap::{colormap_for_channel, COLORMAPS};
pub use metadata::{Blending, LayerData, LayerKind, LayerMetadata, Rendering};
