//! Reader registry.
//!
//! Hosts register [`FormatReader`]s and ask the registry which one applies
//! to a path. Readers are consulted in registration order; the first that
//! recognizes the path wins.
//!
//! # Example
//!
//! ```
//! use cellphy_reader::image::InMemorySource;
//! use cellphy_reader::plugin::{MicroscopyReader, ReaderRegistry};
//! use cellphy_reader::PathInput;
//!
//! let registry = ReaderRegistry::new().with_reader(MicroscopyReader::new(InMemorySource::new()));
//!
//! assert!(registry.get_reader(&PathInput::from("cells.czi")).is_some());
//! assert!(registry.get_reader(&PathInput::from("cells.png")).is_none());
//! ```

use tracing::debug;

use crate::error::ReaderError;
use crate::format::PathInput;
use crate::layer::LayerData;

// =============================================================================
// FormatReader Trait
// =============================================================================

/// A reader that can recognize paths and build layers from them.
pub trait FormatReader: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Whether this reader can handle `path`.
    ///
    /// Must not perform I/O.
    fn recognize(&self, path: &PathInput) -> bool;

    /// Build layers for `path`.
    fn build(&self, path: &PathInput) -> Result<Vec<LayerData>, ReaderError>;
}

// =============================================================================
// ReaderRegistry
// =============================================================================

/// Ordered collection of [`FormatReader`]s.
#[derive(Default)]
pub struct ReaderRegistry {
    readers: Vec<Box<dyn FormatReader>>,
}

impl ReaderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reader after those already registered.
    pub fn register<R: FormatReader + 'static>(&mut self, reader: R) -> &mut Self {
        self.readers.push(Box::new(reader));
        self
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_reader<R: FormatReader + 'static>(mut self, reader: R) -> Self {
        self.register(reader);
        self
    }

    /// First registered reader that recognizes `path`, if any.
    pub fn get_reader(&self, path: &PathInput) -> Option<&dyn FormatReader> {
        let reader = self
            .readers
            .iter()
            .find(|r| r.recognize(path))
            .map(|r| r.as_ref());

        match reader {
            Some(r) => debug!("Reader '{}' recognized {}", r.name(), path),
            None => debug!("No reader recognized {}", path),
        }
        reader
    }

    /// Build layers for `path` with the first reader that recognizes it.
    ///
    /// Returns [`ReaderError::UnsupportedPath`] if no reader applies.
    pub fn read(&self, path: &PathInput) -> Result<Vec<LayerData>, ReaderError> {
        self.get_reader(path)
            .ok_or_else(|| ReaderError::UnsupportedPath(path.to_string()))?
            .build(path)
    }

    pub fn len(&self) -> usize {
        self.readers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readers.is_empty()
    }

    /// Names of the registered readers, in order.
    pub fn reader_names(&self) -> Vec<&str> {
        self.readers.iter().map(|r| r.name()).collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
