//! # cellphy-reader
//!
//! A reader adapter that lets an image viewer open Leica LIF and Zeiss CZI
//! microscopy files.
//!
//! Decoding is delegated to an image-access collaborator behind the
//! [`ImageSource`]/[`ImageHandle`] traits. This crate decides whether a path
//! applies, asks the collaborator for lazy slices, and reshapes them into one
//! viewer layer per channel with display metadata attached.
//!
//! ## Features
//!
//! - **Path-only format sniffing**: `.lif` and `.czi`, no I/O
//! - **Lazy arrays**: layers carry task graphs, not pixels; data loads chunk
//!   by chunk when the host evaluates it
//! - **Dimensionality dispatch**: time series and z-stacks are stacked or
//!   sliced per channel, with matching physical scale vectors
//! - **Explicit registration**: readers plug into a [`ReaderRegistry`]
//!
//! ## Architecture
//!
//! - [`mod@format`] - path recognition
//! - [`image`] - collaborator traits and an in-memory implementation
//! - [`array`] - lazy chunked arrays
//! - [`layer`] - layer builder, layouts, colormaps and metadata
//! - [`plugin`] - reader trait and registry
//! - [`config`] - reader settings and CLI types
//!
//! ## Example
//!
//! ```rust
//! use cellphy_reader::image::{InMemoryImage, InMemorySource, PhysicalPixelSizes};
//! use cellphy_reader::{MicroscopyReader, PathInput};
//! use ndarray::Array6;
//!
//! // S, T, C, Z, Y, X
//! let data = Array6::<f32>::zeros((1, 1, 2, 5, 64, 64));
//! let image = InMemoryImage::new(
//!     data,
//!     vec!["DAPI".to_string(), "GFP".to_string()],
//!     PhysicalPixelSizes::new(0.1, 0.1, 0.5),
//! );
//! let reader = MicroscopyReader::new(InMemorySource::new().with_image("cells.czi", image));
//!
//! let path = PathInput::from("cells.czi");
//! let builder = reader.get_reader(&path).expect("czi is supported");
//! let layers = builder.build(&path).unwrap();
//!
//! assert_eq!(layers.len(), 2);
//! assert_eq!(layers[0].data.shape(), &[5, 64, 64]);
//! assert_eq!(layers[0].metadata.scale, vec![0.5, 0.1, 0.1]);
//! ```

pub mod array;
pub mod config;
pub mod error;
pub mod format;
pub mod image;
pub mod layer;
pub mod plugin;

// Re-export commonly used types
pub use array::{Chunk, ChunkLoader, DataType, LazyArray};
pub use config::{CheckConfig, Cli, Command, OutputFormat, ReaderConfig, SingleChannelNaming};
pub use error::{ArrayError, ImageError, ReaderError};
pub use format::{
    detect_format, is_supported_path, MicroscopyFormat, PathInput, SUPPORTED_EXTENSIONS,
};
pub use image::{
    Dimension, DimensionOrder, ImageDims, ImageHandle, ImageSource, InMemoryImage, InMemorySource,
    PhysicalPixelSizes, Selection,
};
pub use layer::{
    colormap_for_channel, Blending, ChannelEntry, ChannelLayout, LayerBuilder, LayerData,
    LayerKind, LayerMetadata, Rendering, COLORMAPS,
};
pub use plugin::{FormatReader, MicroscopyReader, ReaderRegistry};
