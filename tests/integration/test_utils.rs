//! Test utilities for integration tests.
//!
//! This module provides synthetic images with recognizable pixel values and
//! image sources that fail in controlled ways.

use ndarray::Array6;

use cellphy_reader::error::ImageError;
use cellphy_reader::image::{ImageSource, InMemoryImage, InMemorySource, PhysicalPixelSizes};

/// Pixel sizes used by every synthetic image (x, y, z).
pub const PIXEL_SIZES: PhysicalPixelSizes = PhysicalPixelSizes::new(0.25, 0.5, 2.0);

/// Plane height of synthetic images.
pub const HEIGHT: usize = 6;

/// Plane width of synthetic images.
pub const WIDTH: usize = 8;

// =============================================================================
// Synthetic Images
// =============================================================================

/// Value stored at a pixel of a synthetic image.
///
/// Encodes `(t, c, z)` so tests can tell which plane a value came from.
pub fn pixel_value(t: usize, c: usize, z: usize, y: usize, x: usize) -> f32 {
    (t * 10_000 + c * 1_000 + z * 100 + y * 10 + x) as f32
}

/// Build an image with `t` time points, `c` channels and `z` planes.
pub fn synthetic_image(t: usize, c: usize, z: usize, names: &[&str]) -> InMemoryImage {
    let data = Array6::from_shape_fn((1, t, c, z, HEIGHT, WIDTH), |(_, t, c, z, y, x)| {
        pixel_value(t, c, z, y, x)
    });
    InMemoryImage::new(
        data,
        names.iter().map(|n| n.to_string()).collect(),
        PIXEL_SIZES,
    )
}

/// Channel names `ch0`, `ch1`, ...
pub fn channel_names(c: usize) -> Vec<String> {
    (0..c).map(|i| format!("ch{}", i)).collect()
}

/// Build an image with generated channel names.
pub fn named_image(t: usize, c: usize, z: usize) -> InMemoryImage {
    let names = channel_names(c);
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    synthetic_image(t, c, z, &refs)
}

/// Source serving a single image under `path`.
pub fn source_with(path: &str, image: InMemoryImage) -> InMemorySource {
    InMemorySource::new().with_image(path, image)
}

// =============================================================================
// Failing Source
// =============================================================================

/// A source whose files all match a supported extension but fail to decode.
pub struct CorruptSource;

impl ImageSource for CorruptSource {
    type Handle = InMemoryImage;

    fn open(&self, path: &str) -> Result<Self::Handle, ImageError> {
        Err(ImageError::Corrupt {
            path: path.to_string(),
            reason: "truncated directory segment".to_string(),
        })
    }
}
