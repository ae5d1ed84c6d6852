//! Registry adapter for the LIF/CZI layer builder.

use crate::config::ReaderConfig;
use crate::error::ReaderError;
use crate::format::{detect_format, MicroscopyFormat, PathInput};
use crate::image::ImageSource;
use crate::layer::{LayerBuilder, LayerData};

use super::registry::FormatReader;

/// Reads Leica LIF and Zeiss CZI files through an [`ImageSource`].
pub struct MicroscopyReader<S: ImageSource> {
    builder: LayerBuilder<S>,
}

impl<S: ImageSource> MicroscopyReader<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, ReaderConfig::default())
    }

    pub fn with_config(source: S, config: ReaderConfig) -> Self {
        Self {
            builder: LayerBuilder::with_config(source, config),
        }
    }

    /// The layer builder, if `path` is a supported single path.
    ///
    /// Decides from the path string alone; nothing is opened.
    pub fn get_reader(&self, path: &PathInput) -> Option<&LayerBuilder<S>> {
        detect_format(path).map(|_| &self.builder)
    }

    /// Format of `path`, if supported.
    pub fn format_of(&self, path: &PathInput) -> Option<MicroscopyFormat> {
        detect_format(path)
    }
}

impl<S: ImageSource> FormatReader for MicroscopyReader<S> {
    fn name(&self) -> &str {
        "microscopy"
    }

    fn recognize(&self, path: &PathInput) -> bool {
        detect_format(path).is_some()
    }

    fn build(&self, path: &PathInput) -> Result<Vec<LayerData>, ReaderError> {
        self.builder.build(path)
    }
}
