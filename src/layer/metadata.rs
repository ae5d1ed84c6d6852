//! Layer output types.
//!
//! A [`LayerData`] is what the host receives per channel: the lazy array,
//! the keyword arguments for the viewer's "add image" call
//! ([`LayerMetadata`]), and the layer kind.

use serde::{Deserialize, Serialize};

use crate::array::LazyArray;

/// How overlapping layers are composited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Blending {
    #[default]
    Additive,
}

impl Blending {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Blending::Additive => "additive",
        }
    }
}

/// How volumes are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rendering {
    /// Maximum intensity projection
    #[default]
    Mip,
}

impl Rendering {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Rendering::Mip => "mip",
        }
    }
}

/// Kind of layer the host should create.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    #[default]
    Image,
}

impl LayerKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            LayerKind::Image => "image",
        }
    }
}

/// Display metadata for one layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerMetadata {
    pub name: String,
    pub blending: Blending,
    pub rendering: Rendering,
    /// Physical size per array axis; same length as the array's dimensionality
    pub scale: Vec<f64>,
    pub colormap: String,
}

impl LayerMetadata {
    /// Metadata with additive blending and MIP rendering.
    pub fn new(name: impl Into<String>, scale: Vec<f64>, colormap: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            blending: Blending::Additive,
            rendering: Rendering::Mip,
            scale,
            colormap: colormap.into(),
        }
    }

    /// The metadata as a JSON object of viewer keyword arguments.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

/// One layer handed to the host.
#[derive(Debug, Clone)]
pub struct LayerData {
    pub data: LazyArray,
    pub metadata: LayerMetadata,
    pub kind: LayerKind,
}

impl LayerData {
    pub fn new(data: LazyArray, metadata: LayerMetadata) -> Self {
        Self {
            data,
            metadata,
            kind: LayerKind::Image,
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Split into `(data, metadata, kind)`.
    pub fn into_tuple(self) -> (LazyArray, LayerMetadata, LayerKind) {
        (self.data, self.metadata, self.kind)
    }
}
