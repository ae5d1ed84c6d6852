//! Layer builder: turns an opened image into one layer per channel.
//!
//! For every channel the builder picks a [`ChannelLayout`] from the time and
//! depth extents, asks the collaborator for lazy slices in that layout,
//! stacks time points when there is more than one, and attaches display
//! metadata. No pixel data is loaded here.

use tracing::{debug, info};

use crate::array::LazyArray;
use crate::config::{ReaderConfig, SingleChannelNaming};
use crate::error::ReaderError;
use crate::format::PathInput;
use crate::image::{DimensionOrder, ImageHandle, ImageSource, PhysicalPixelSizes, Selection};

use super::colormap::colormap_for_channel;
use super::metadata::{LayerData, LayerMetadata};

// =============================================================================
// ChannelLayout
// =============================================================================

/// Array layout of a channel, chosen from the time and depth extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    /// T > 1, Z > 1: `(T, Z, Y, X)`
    TimeVolume,
    /// T > 1, Z == 1: `(T, Y, X)`
    TimeSeries,
    /// T == 1, Z > 1: `(Z, Y, X)`
    Volume,
    /// T == 1, Z == 1: `(Y, X)`
    Plane,
}

impl ChannelLayout {
    pub const fn from_extents(size_t: usize, size_z: usize) -> Self {
        match (size_t > 1, size_z > 1) {
            (true, true) => ChannelLayout::TimeVolume,
            (true, false) => ChannelLayout::TimeSeries,
            (false, true) => ChannelLayout::Volume,
            (false, false) => ChannelLayout::Plane,
        }
    }

    pub const fn axes(&self) -> &'static str {
        match self {
            ChannelLayout::TimeVolume => "TZYX",
            ChannelLayout::TimeSeries => "TYX",
            ChannelLayout::Volume => "ZYX",
            ChannelLayout::Plane => "YX",
        }
    }

    pub const fn ndim(&self) -> usize {
        self.axes().len()
    }

    pub const fn has_time(&self) -> bool {
        matches!(self, ChannelLayout::TimeVolume | ChannelLayout::TimeSeries)
    }

    pub const fn has_z(&self) -> bool {
        matches!(self, ChannelLayout::TimeVolume | ChannelLayout::Volume)
    }

    /// Scale vector for this layout; the time axis gets 1.
    pub fn scale(&self, pixel: &PhysicalPixelSizes) -> Vec<f64> {
        match self {
            ChannelLayout::TimeVolume => vec![1.0, pixel.z, pixel.y, pixel.x],
            ChannelLayout::TimeSeries => vec![1.0, pixel.y, pixel.x],
            ChannelLayout::Volume => vec![pixel.z, pixel.y, pixel.x],
            ChannelLayout::Plane => vec![pixel.y, pixel.x],
        }
    }

    /// Axis order of each slice requested from the collaborator.
    fn slice_order(&self) -> &'static str {
        if self.has_z() {
            "ZYX"
        } else {
            "YX"
        }
    }
}

// =============================================================================
// ChannelEntry
// =============================================================================

/// A channel's lazy data and display settings, keyed by channel name.
#[derive(Debug, Clone)]
pub struct ChannelEntry {
    pub name: String,
    pub data: LazyArray,
    pub scale: Vec<f64>,
    pub colormap: &'static str,
}

impl From<ChannelEntry> for LayerData {
    fn from(entry: ChannelEntry) -> Self {
        LayerData::new(
            entry.data,
            LayerMetadata::new(entry.name, entry.scale, entry.colormap),
        )
    }
}

/// Store `entry`, replacing an existing entry of the same name in place.
fn insert_entry(entries: &mut Vec<ChannelEntry>, entry: ChannelEntry) {
    match entries.iter_mut().find(|e| e.name == entry.name) {
        Some(existing) => *existing = entry,
        None => entries.push(entry),
    }
}

// =============================================================================
// LayerBuilder
// =============================================================================

/// Builds viewer layers from images opened through an [`ImageSource`].
///
/// The builder keeps no state between calls: each call opens the image,
/// builds fresh layers, and drops the handle.
pub struct LayerBuilder<S: ImageSource> {
    source: S,
    config: ReaderConfig,
}

impl<S: ImageSource> LayerBuilder<S> {
    /// Builder with the default [`ReaderConfig`].
    pub fn new(source: S) -> Self {
        Self::with_config(source, ReaderConfig::default())
    }

    pub fn with_config(source: S, config: ReaderConfig) -> Self {
        Self { source, config }
    }

    /// Build layers for a host-supplied path.
    ///
    /// # Errors
    ///
    /// - [`ReaderError::MultiplePaths`] for multi-file batches
    /// - [`ReaderError::Image`] if the collaborator cannot open or slice the file
    /// - [`ReaderError::Array`] if the reported extents cannot be assembled
    pub fn build(&self, path: &PathInput) -> Result<Vec<LayerData>, ReaderError> {
        match path {
            PathInput::Single(path) => self.build_path(path),
            PathInput::Multiple(paths) => Err(ReaderError::MultiplePaths(paths.len())),
        }
    }

    /// Build layers for a single path.
    pub fn build_path(&self, path: &str) -> Result<Vec<LayerData>, ReaderError> {
        info!("Reading file {}", path);
        let image = self.source.open(path)?;

        let entries = self.channel_entries(&image)?;

        Ok(entries
            .into_iter()
            .map(|entry| {
                debug!(
                    "Creating layer '{}' with shape {:?}",
                    entry.name,
                    entry.data.shape()
                );
                LayerData::from(entry)
            })
            .collect())
    }

    fn channel_entries(&self, image: &S::Handle) -> Result<Vec<ChannelEntry>, ReaderError> {
        let dims = image.dims();
        let channel_names = image.channel_names();
        let pixel = image.physical_pixel_sizes();
        let layout = ChannelLayout::from_extents(dims.t, dims.z);

        debug!(
            "Detected {} channel(s), {} time point(s), z depth {}, plane {}x{}",
            dims.c, dims.t, dims.z, dims.y, dims.x
        );
        debug!("Channel names: {:?}", channel_names);
        debug!("Layout {} with scale {:?}", layout.axes(), layout.scale(&pixel));

        let mut entries = Vec::new();

        if dims.c > 1 {
            for (index, name) in channel_names.into_iter().enumerate() {
                let data = self.channel_array(image, layout, index, dims.t)?;
                debug!("Channel {} ('{}') shape {:?}", index, name, data.shape());
                insert_entry(
                    &mut entries,
                    ChannelEntry {
                        name,
                        data,
                        scale: layout.scale(&pixel),
                        colormap: colormap_for_channel(index),
                    },
                );
            }
        } else {
            let data = self.channel_array(image, layout, 0, dims.t)?;
            let name = match self.config.single_channel_naming {
                SingleChannelNaming::Unset => String::new(),
                SingleChannelNaming::ChannelName => {
                    channel_names.into_iter().next().unwrap_or_default()
                }
            };
            debug!("Single channel '{}' shape {:?}", name, data.shape());
            insert_entry(
                &mut entries,
                ChannelEntry {
                    name,
                    data,
                    scale: layout.scale(&pixel),
                    colormap: colormap_for_channel(0),
                },
            );
        }

        Ok(entries)
    }

    /// Lazy array for one channel, optimized before it is stored.
    fn channel_array(
        &self,
        image: &S::Handle,
        layout: ChannelLayout,
        channel: usize,
        size_t: usize,
    ) -> Result<LazyArray, ReaderError> {
        let order: DimensionOrder = layout.slice_order().parse()?;
        let selection = |t: usize| {
            let selection = Selection::new().scene(0).channel(channel).time(t);
            if layout.has_z() {
                selection
            } else {
                selection.z(0)
            }
        };

        let array = if layout.has_time() {
            let slices = (0..size_t)
                .map(|t| image.lazy_data(&order, &selection(t)))
                .collect::<Result<Vec<_>, _>>()?;
            LazyArray::stack(slices)?
        } else {
            image.lazy_data(&order, &selection(0))?
        };

        Ok(array.optimize())
    }
}

// =============================================================================
// Tests
// =============================================================================
