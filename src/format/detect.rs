//! Format detection for microscopy container files.
//!
//! Detection looks at the path string only. No bytes are read: whether the
//! file actually decodes is the collaborator's business once the builder
//! opens it. Currently recognized:
//!
//! - **Leica LIF**: `.lif`
//! - **Carl Zeiss CZI**: `.czi`
//!
//! Matching is a case-sensitive suffix match, so `scan.CZI` is not
//! recognized. Multi-path inputs are never recognized.

use super::path::PathInput;

// =============================================================================
// MicroscopyFormat
// =============================================================================

/// Recognized microscopy container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MicroscopyFormat {
    /// Leica Image File
    LeicaLif,

    /// Carl Zeiss Image
    ZeissCzi,
}

/// File suffixes the reader accepts, in detection order.
pub const SUPPORTED_EXTENSIONS: [&str; 2] = [".lif", ".czi"];

impl MicroscopyFormat {
    /// All recognized formats, in detection order.
    pub const ALL: [MicroscopyFormat; 2] = [MicroscopyFormat::LeicaLif, MicroscopyFormat::ZeissCzi];

    /// Get a human-readable name for the format.
    pub const fn name(&self) -> &'static str {
        match self {
            MicroscopyFormat::LeicaLif => "Leica LIF",
            MicroscopyFormat::ZeissCzi => "Carl Zeiss CZI",
        }
    }

    /// File suffix, including the leading dot.
    pub const fn extension(&self) -> &'static str {
        match self {
            MicroscopyFormat::LeicaLif => SUPPORTED_EXTENSIONS[0],
            MicroscopyFormat::ZeissCzi => SUPPORTED_EXTENSIONS[1],
        }
    }

    /// Detect the format of a single path string.
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| path.ends_with(format.extension()))
    }
}

// =============================================================================
// Format Detection
// =============================================================================

/// Detect the format of a host-supplied path.
///
/// # Returns
/// * `Some(format)` - single path ending in a supported suffix
/// * `None` - any other single path, or any multi-path input
pub fn detect_format(path: &PathInput) -> Option<MicroscopyFormat> {
    path.as_single().and_then(MicroscopyFormat::from_path)
}

/// Whether the reader can handle the given input.
pub fn is_supported_path(path: &PathInput) -> bool {
    detect_format(path).is_some()
}

// =============================================================================
// Tests
// =============================================================================
