use thiserror::Error;

/// Errors raised while building or evaluating a lazy array
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ArrayError {
    /// Stacking requires at least one array
    #[error("Cannot stack an empty sequence of arrays")]
    EmptyStack,

    /// Arrays being stacked do not share a shape
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Arrays being stacked do not share a data type
    #[error("Data type mismatch: expected {expected}, got {actual}")]
    DtypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// Axis does not exist on the array
    #[error("Axis {axis} out of bounds for array with {ndim} dimensions")]
    AxisOutOfBounds { axis: usize, ndim: usize },

    /// Index is past the end of the axis
    #[error("Index {index} out of bounds for axis {axis} of length {len}")]
    IndexOutOfBounds {
        axis: usize,
        index: usize,
        len: usize,
    },

    /// A chunk loader produced data with an unexpected shape
    #[error("Chunk loader returned shape {actual:?}, expected {expected:?}")]
    ChunkShape {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// A chunk loader failed to produce data
    #[error("Chunk load failed: {0}")]
    Load(String),
}

/// Errors reported by the image-access collaborator
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ImageError {
    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(String),

    /// No image exists at the given path
    #[error("Image not found: {0}")]
    NotFound(String),

    /// File content is not a format the collaborator can decode
    #[error("Unsupported format: {reason}")]
    UnsupportedFormat { reason: String },

    /// File matched a supported format but could not be decoded
    #[error("Corrupt image {path}: {reason}")]
    Corrupt { path: String, reason: String },

    /// Dimension order string is malformed
    #[error("Invalid dimension order '{0}'")]
    InvalidDimensionOrder(String),

    /// A dimension was both requested in the output order and fixed by the selection
    #[error("Dimension {0} is part of the output order and cannot be selected")]
    ConflictingSelection(char),

    /// Selected index is past the extent of the dimension
    #[error("Selection {dim}={index} out of bounds (size {size})")]
    SelectionOutOfBounds { dim: char, index: usize, size: usize },

    /// Lazy array construction failed
    #[error("Array error: {0}")]
    Array(#[from] ArrayError),
}

/// Errors surfaced to the host by the layer reader
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReaderError {
    /// Opening or slicing the image failed
    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    /// Assembling the per-channel arrays failed
    #[error("Array error: {0}")]
    Array(#[from] ArrayError),

    /// No registered reader recognizes the path
    #[error("No reader for path: {0}")]
    UnsupportedPath(String),

    /// Multi-file batches are not supported
    #[error("Expected a single path, got {0} paths")]
    MultiplePaths(usize),
}
