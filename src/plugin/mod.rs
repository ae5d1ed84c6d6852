//! Reader registration.
//!
//! Replaces hook-based plugin discovery with explicit registration: each
//! reader implements [`FormatReader`] and is added to a [`ReaderRegistry`].
//! [`MicroscopyReader`] is the LIF/CZI implementation.

mod microscopy;
mod registry;

pub use microscopy::MicroscopyReader;
pub use registry::{FormatReader, ReaderRegistry};
