//! Image-access collaborator interface.
//!
//! Decoding LIF/CZI containers is not this crate's job. Whatever does it
//! plugs in through two traits:
//!
//! - [`ImageSource`] opens a path and returns a handle
//! - [`ImageHandle`] reports extents, channel names and pixel sizes, and
//!   hands out lazily evaluated slices of the image
//!
//! Dimensions follow the canonical `STCZYX` order (scene, time, channel,
//! depth, height, width).

use std::fmt;
use std::str::FromStr;

use crate::array::LazyArray;
use crate::error::ImageError;

// =============================================================================
// Dimensions
// =============================================================================

/// One named image axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    Scene,
    Time,
    Channel,
    Z,
    Y,
    X,
}

impl Dimension {
    /// All dimensions in canonical order.
    pub const CANONICAL: [Dimension; 6] = [
        Dimension::Scene,
        Dimension::Time,
        Dimension::Channel,
        Dimension::Z,
        Dimension::Y,
        Dimension::X,
    ];

    pub const fn as_char(&self) -> char {
        match self {
            Dimension::Scene => 'S',
            Dimension::Time => 'T',
            Dimension::Channel => 'C',
            Dimension::Z => 'Z',
            Dimension::Y => 'Y',
            Dimension::X => 'X',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        Self::CANONICAL.into_iter().find(|d| d.as_char() == c)
    }

    /// Position of this dimension in `STCZYX`.
    pub const fn canonical_axis(&self) -> usize {
        *self as usize
    }
}

/// Extents of an opened image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDims {
    pub s: usize,
    pub t: usize,
    pub c: usize,
    pub z: usize,
    pub y: usize,
    pub x: usize,
}

impl ImageDims {
    pub const fn new(s: usize, t: usize, c: usize, z: usize, y: usize, x: usize) -> Self {
        Self { s, t, c, z, y, x }
    }

    pub const fn size(&self, dim: Dimension) -> usize {
        match dim {
            Dimension::Scene => self.s,
            Dimension::Time => self.t,
            Dimension::Channel => self.c,
            Dimension::Z => self.z,
            Dimension::Y => self.y,
            Dimension::X => self.x,
        }
    }

    /// Extents in `STCZYX` order.
    pub const fn canonical_shape(&self) -> [usize; 6] {
        [self.s, self.t, self.c, self.z, self.y, self.x]
    }
}

/// Physical voxel spacing, typically in micrometers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalPixelSizes {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PhysicalPixelSizes {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl Default for PhysicalPixelSizes {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

// =============================================================================
// DimensionOrder
// =============================================================================

/// Requested axis order for a slice, e.g. `"ZYX"`.
///
/// Must be a non-empty subsequence of `STCZYX`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DimensionOrder(Vec<Dimension>);

impl DimensionOrder {
    pub fn dims(&self) -> &[Dimension] {
        &self.0
    }

    pub fn contains(&self, dim: Dimension) -> bool {
        self.0.contains(&dim)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for DimensionOrder {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ImageError::InvalidDimensionOrder(s.to_string());

        let dims = s
            .chars()
            .map(|c| Dimension::from_char(c).ok_or_else(invalid))
            .collect::<Result<Vec<_>, _>>()?;

        // Strictly increasing canonical position rules out repeats and reorders
        let ordered = dims.windows(2).all(|w| w[0] < w[1]);
        if dims.is_empty() || !ordered {
            return Err(invalid());
        }

        Ok(Self(dims))
    }
}

impl fmt::Display for DimensionOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for dim in &self.0 {
            write!(f, "{}", dim.as_char())?;
        }
        Ok(())
    }
}

// =============================================================================
// Selection
// =============================================================================

/// Fixed indices for the dimensions left out of a [`DimensionOrder`].
///
/// Dimensions neither ordered nor selected default to index 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    indices: [Option<usize>; 6],
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, dim: Dimension, index: usize) -> Self {
        self.indices[dim.canonical_axis()] = Some(index);
        self
    }

    pub fn scene(self, index: usize) -> Self {
        self.with(Dimension::Scene, index)
    }

    pub fn time(self, index: usize) -> Self {
        self.with(Dimension::Time, index)
    }

    pub fn channel(self, index: usize) -> Self {
        self.with(Dimension::Channel, index)
    }

    pub fn z(self, index: usize) -> Self {
        self.with(Dimension::Z, index)
    }

    pub fn get(&self, dim: Dimension) -> Option<usize> {
        self.indices[dim.canonical_axis()]
    }

    /// Fixed index of every canonical axis, or `None` for axes kept by `order`.
    ///
    /// Dimensions neither ordered nor selected resolve to 0. Fails if a
    /// dimension is both ordered and selected, or if an index is past the
    /// extent in `dims`.
    pub fn resolve(
        &self,
        dims: &ImageDims,
        order: &DimensionOrder,
    ) -> Result<[Option<usize>; 6], ImageError> {
        for dim in order.dims() {
            if self.get(*dim).is_some() {
                return Err(ImageError::ConflictingSelection(dim.as_char()));
            }
        }

        let mut fixed = [None; 6];
        for dim in Dimension::CANONICAL {
            if order.contains(dim) {
                continue;
            }
            let index = self.get(dim).unwrap_or(0);
            let size = dims.size(dim);
            if index >= size {
                return Err(ImageError::SelectionOutOfBounds {
                    dim: dim.as_char(),
                    index,
                    size,
                });
            }
            fixed[dim.canonical_axis()] = Some(index);
        }
        Ok(fixed)
    }

    /// Reduce a canonical `STCZYX` array to `order`.
    ///
    /// `full` must have shape `dims.canonical_shape()`. Every dimension not in
    /// `order` is fixed to its selected index (0 if unselected); the result
    /// keeps the remaining axes in canonical order.
    pub fn apply(
        &self,
        full: &LazyArray,
        dims: &ImageDims,
        order: &DimensionOrder,
    ) -> Result<LazyArray, ImageError> {
        let fixed = self.resolve(dims, order)?;

        let mut out = full.clone();
        // Highest axis first so lower axis positions stay valid
        for (axis, index) in fixed.iter().enumerate().rev() {
            if let Some(index) = index {
                out = out.select(axis, *index)?;
            }
        }
        Ok(out)
    }
}

// =============================================================================
// Collaborator Traits
// =============================================================================

/// An opened image.
pub trait ImageHandle {
    /// Extents of every dimension.
    fn dims(&self) -> ImageDims;

    /// Channel names, one per channel, in file order.
    fn channel_names(&self) -> Vec<String>;

    /// Physical voxel spacing.
    fn physical_pixel_sizes(&self) -> PhysicalPixelSizes;

    /// Lazily evaluated slice of the image in `order`.
    ///
    /// Dimensions missing from `order` are fixed by `selection`.
    fn lazy_data(
        &self,
        order: &DimensionOrder,
        selection: &Selection,
    ) -> Result<LazyArray, ImageError>;

    fn size_c(&self) -> usize {
        self.dims().c
    }

    fn size_t(&self) -> usize {
        self.dims().t
    }

    fn size_z(&self) -> usize {
        self.dims().z
    }

    fn size_y(&self) -> usize {
        self.dims().y
    }

    fn size_x(&self) -> usize {
        self.dims().x
    }
}

/// Opens images by path.
///
/// This abstraction lets the layer builder work with any decoding backend.
pub trait ImageSource: Send + Sync {
    /// The type of handle this source opens.
    type Handle: ImageHandle;

    /// Open the image at `path`.
    ///
    /// Fails if the file is missing, unreadable or corrupt.
    fn open(&self, path: &str) -> Result<Self::Handle, ImageError>;
}

// =============================================================================
// Tests
// =============================================================================
