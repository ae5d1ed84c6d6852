//! In-memory image collaborator.
//!
//! Serves images that are already decoded into an `STCZYX` ndarray. Useful
//! for hosts that decode elsewhere and for exercising the layer builder
//! without real LIF/CZI files. Every slice it hands out is lazy: one chunk
//! loader per `YX` plane, counted so callers can see when data is touched.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ndarray::{s, Array6, ArrayD};

use crate::array::{ChunkLoader, DataType, LazyArray};
use crate::error::{ArrayError, ImageError};

use super::reader::{
    DimensionOrder, ImageDims, ImageHandle, ImageSource, PhysicalPixelSizes, Selection,
};

// =============================================================================
// InMemoryImage
// =============================================================================

/// A decoded image held in memory.
///
/// Cloning is cheap; clones share pixel data and the plane-load counter.
#[derive(Debug, Clone)]
pub struct InMemoryImage {
    data: Arc<Array6<f32>>,
    dtype: DataType,
    channel_names: Vec<String>,
    pixel_sizes: PhysicalPixelSizes,
    planes_loaded: Arc<AtomicUsize>,
}

impl InMemoryImage {
    /// Wrap `STCZYX` pixel data.
    ///
    /// `channel_names` is reported as-is; it is not checked against the
    /// channel extent.
    pub fn new(
        data: Array6<f32>,
        channel_names: Vec<String>,
        pixel_sizes: PhysicalPixelSizes,
    ) -> Self {
        Self {
            data: Arc::new(data),
            dtype: DataType::F32,
            channel_names,
            pixel_sizes,
            planes_loaded: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Report a different element type.
    pub fn with_dtype(mut self, dtype: DataType) -> Self {
        self.dtype = dtype;
        self
    }

    /// Number of `YX` planes loaded so far, across all clones.
    pub fn planes_loaded(&self) -> usize {
        self.planes_loaded.load(Ordering::SeqCst)
    }

    /// Lazy view of the whole image in canonical `STCZYX` order.
    pub fn canonical(&self) -> Result<LazyArray, ArrayError> {
        self.subgraph(&[None; 6], &mut [0; 4], 0)
    }

    /// Graph over the axes left open in `fixed`, one loader per kept plane.
    ///
    /// Axes with a fixed index are not stacked, so planes outside the
    /// selection never get a loader.
    fn subgraph(
        &self,
        fixed: &[Option<usize>; 6],
        plane: &mut [usize; 4],
        axis: usize,
    ) -> Result<LazyArray, ArrayError> {
        if axis == plane.len() {
            return self.plane_array(fixed, plane);
        }

        match fixed[axis] {
            Some(index) => {
                plane[axis] = index;
                self.subgraph(fixed, plane, axis + 1)
            }
            None => {
                let extent = self.data.shape()[axis];
                let mut parts = Vec::with_capacity(extent);
                for index in 0..extent {
                    plane[axis] = index;
                    parts.push(self.subgraph(fixed, plane, axis + 1)?);
                }
                LazyArray::stack(parts)
            }
        }
    }

    /// One `YX` plane, reduced along `Y`/`X` if those are fixed.
    fn plane_array(
        &self,
        fixed: &[Option<usize>; 6],
        plane: &[usize; 4],
    ) -> Result<LazyArray, ArrayError> {
        let (_, _, _, _, ny, nx) = self.data.dim();
        let [s, t, c, z] = *plane;
        let mut array =
            LazyArray::from_loader(vec![ny, nx], self.dtype, self.plane_loader(s, t, c, z));

        if let Some(x) = fixed[5] {
            array = array.select(1, x)?;
        }
        if let Some(y) = fixed[4] {
            array = array.select(0, y)?;
        }
        Ok(array)
    }

    fn plane_loader(&self, s: usize, t: usize, c: usize, z: usize) -> ChunkLoader {
        let data = Arc::clone(&self.data);
        let counter = Arc::clone(&self.planes_loaded);
        Arc::new(move || -> Result<ArrayD<f32>, ArrayError> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(data.slice(s![s, t, c, z, .., ..]).to_owned().into_dyn())
        })
    }
}

impl ImageHandle for InMemoryImage {
    fn dims(&self) -> ImageDims {
        let (s, t, c, z, y, x) = self.data.dim();
        ImageDims::new(s, t, c, z, y, x)
    }

    fn channel_names(&self) -> Vec<String> {
        self.channel_names.clone()
    }

    fn physical_pixel_sizes(&self) -> PhysicalPixelSizes {
        self.pixel_sizes
    }

    fn lazy_data(
        &self,
        order: &DimensionOrder,
        selection: &Selection,
    ) -> Result<LazyArray, ImageError> {
        let fixed = selection.resolve(&self.dims(), order)?;
        Ok(self.subgraph(&fixed, &mut [0; 4], 0)?)
    }
}

// =============================================================================
// InMemorySource
// =============================================================================

/// Serves [`InMemoryImage`]s by path.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    images: HashMap<String, InMemoryImage>,
}

impl InMemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `image` under `path`, replacing any previous image.
    pub fn with_image(mut self, path: impl Into<String>, image: InMemoryImage) -> Self {
        self.insert(path, image);
        self
    }

    /// Register `image` under `path` in place.
    pub fn insert(&mut self, path: impl Into<String>, image: InMemoryImage) {
        self.images.insert(path.into(), image);
    }

    /// Number of registered images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether no image is registered.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl ImageSource for InMemorySource {
    type Handle = InMemoryImage;

    fn open(&self, path: &str) -> Result<Self::Handle, ImageError> {
        self.images
            .get(path)
            .cloned()
            .ok_or_else(|| ImageError::NotFound(path.to_string()))
    }
}

// =============================================================================
// Tests
// =============================================================================
