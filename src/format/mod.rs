//! Format recognition for microscopy files.
//!
//! This module decides, from the path alone, whether the reader applies.
//!
//! # Format Detection
//!
//! Use [`detect::detect_format`] to identify the format of a host-supplied path.
//! Currently supported formats:
//!
//! - **Leica LIF**: `.lif` suffix
//! - **Carl Zeiss CZI**: `.czi` suffix

pub mod detect;
pub mod path;

pub use detect::{detect_format, is_supported_path, MicroscopyFormat, SUPPORTED_EXTENSIONS};
pub use path::PathInput;
