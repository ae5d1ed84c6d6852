//! Lazily evaluated multi-dimensional arrays.
//!
//! A [`LazyArray`] is a shape, a data type tag and a task graph. Building,
//! stacking, selecting and optimizing never touch pixel data; only
//! [`Chunk::load`] and [`LazyArray::compute`] call the leaf loaders.

use std::fmt;
use std::sync::Arc;

use ndarray::{ArrayD, Axis, IxDyn, Slice};
use rayon::prelude::*;

use crate::error::ArrayError;

use super::graph::{self, ChunkLoader, Node};

// =============================================================================
// DataType
// =============================================================================

/// Element type reported by the collaborator.
///
/// Evaluation always produces `f32`; the tag records what the file stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    U8,
    U16,
    U32,
    F32,
    F64,
}

impl DataType {
    /// Conventional array dtype name, e.g. `uint16`.
    pub const fn name(&self) -> &'static str {
        match self {
            DataType::U8 => "uint8",
            DataType::U16 => "uint16",
            DataType::U32 => "uint32",
            DataType::F32 => "float32",
            DataType::F64 => "float64",
        }
    }
}

// =============================================================================
// LazyArray
// =============================================================================

/// A multi-dimensional array whose data is produced on demand, chunk by chunk.
#[derive(Clone)]
pub struct LazyArray {
    node: Arc<Node>,
    dtype: DataType,
}

impl LazyArray {
    /// Create a single-chunk array backed by `loader`.
    ///
    /// The loader must return data of exactly `shape`; a mismatch is
    /// reported when the chunk is loaded.
    pub fn from_loader(shape: Vec<usize>, dtype: DataType, loader: ChunkLoader) -> Self {
        Self {
            node: Arc::new(Node::source(shape, loader)),
            dtype,
        }
    }

    /// Stack arrays of identical shape and type along a new leading axis.
    pub fn stack(arrays: Vec<LazyArray>) -> Result<Self, ArrayError> {
        let dtype = arrays.first().ok_or(ArrayError::EmptyStack)?.dtype;
        if let Some(other) = arrays.iter().find(|a| a.dtype != dtype) {
            return Err(ArrayError::DtypeMismatch {
                expected: dtype.name(),
                actual: other.dtype.name(),
            });
        }

        let parts = arrays.into_iter().map(|a| a.node).collect();
        Ok(Self {
            node: Arc::new(Node::stack(parts)?),
            dtype,
        })
    }

    /// Fix `index` along `axis`, returning an array with one fewer dimension.
    pub fn select(&self, axis: usize, index: usize) -> Result<Self, ArrayError> {
        Ok(Self {
            node: Arc::new(Node::select(Arc::clone(&self.node), axis, index)?),
            dtype: self.dtype,
        })
    }

    /// Collapse redundant graph nodes.
    ///
    /// The result evaluates to the same data and never has more nodes.
    pub fn optimize(&self) -> Self {
        Self {
            node: graph::optimize(&self.node),
            dtype: self.dtype,
        }
    }

    /// Extent of every axis.
    pub fn shape(&self) -> &[usize] {
        self.node.shape()
    }

    /// Number of axes.
    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// Element type reported by the collaborator.
    pub fn dtype(&self) -> DataType {
        self.dtype
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.shape().iter().product()
    }

    /// Whether any axis has zero extent.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of nodes in the task graph.
    pub fn node_count(&self) -> usize {
        self.node.count()
    }

    /// The chunk grid of this array, in row-major order of chunk offsets.
    pub fn chunks(&self) -> Vec<Chunk> {
        collect_chunks(&self.node)
    }

    /// Load every chunk and assemble the full array.
    ///
    /// Chunks are loaded in parallel on the rayon thread pool.
    pub fn compute(&self) -> Result<ArrayD<f32>, ArrayError> {
        let loaded = self
            .chunks()
            .into_par_iter()
            .map(|chunk| chunk.load().map(|data| (chunk, data)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut out = ArrayD::<f32>::zeros(IxDyn(self.shape()));
        for (chunk, data) in loaded {
            let mut region = out.slice_each_axis_mut(|desc| {
                let axis = desc.axis.index();
                Slice::from(chunk.offset[axis]..chunk.offset[axis] + chunk.shape[axis])
            });
            region.assign(&data);
        }
        Ok(out)
    }
}

impl fmt::Debug for LazyArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyArray")
            .field("shape", &self.shape())
            .field("dtype", &self.dtype)
            .field("nodes", &self.node_count())
            .finish()
    }
}

// =============================================================================
// Chunks
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChunkOp {
    /// Keep only `index` along `axis`
    Pick { axis: usize, index: usize },
    /// Insert a leading axis of length one
    Expand,
}

/// One independently loadable piece of a [`LazyArray`].
#[derive(Clone)]
pub struct Chunk {
    offset: Vec<usize>,
    shape: Vec<usize>,
    source_shape: Vec<usize>,
    loader: ChunkLoader,
    ops: Vec<ChunkOp>,
}

impl Chunk {
    /// Position of the chunk's first element within the array.
    pub fn offset(&self) -> &[usize] {
        &self.offset
    }

    /// Extent of the chunk along every axis of the array.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Load the chunk's data.
    ///
    /// Calls exactly one leaf loader.
    pub fn load(&self) -> Result<ArrayD<f32>, ArrayError> {
        let mut data = (self.loader)()?;
        if data.shape() != self.source_shape.as_slice() {
            return Err(ArrayError::ChunkShape {
                expected: self.source_shape.clone(),
                actual: data.shape().to_vec(),
            });
        }

        for op in &self.ops {
            data = match *op {
                ChunkOp::Pick { axis, index } => data.index_axis_move(Axis(axis), index),
                ChunkOp::Expand => data.insert_axis(Axis(0)),
            };
        }
        Ok(data)
    }
}

impl fmt::Debug for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chunk")
            .field("offset", &self.offset)
            .field("shape", &self.shape)
            .field("ops", &self.ops)
            .finish()
    }
}

fn collect_chunks(node: &Node) -> Vec<Chunk> {
    match node {
        Node::Source { shape, loader } => vec![Chunk {
            offset: vec![0; shape.len()],
            shape: shape.clone(),
            source_shape: shape.clone(),
            loader: Arc::clone(loader),
            ops: Vec::new(),
        }],
        Node::Stack { parts, .. } => parts
            .iter()
            .enumerate()
            .flat_map(|(i, part)| {
                collect_chunks(part).into_iter().map(move |mut chunk| {
                    chunk.offset.insert(0, i);
                    chunk.shape.insert(0, 1);
                    chunk.ops.push(ChunkOp::Expand);
                    chunk
                })
            })
            .collect(),
        Node::Select {
            input, axis, index, ..
        } => {
            let (axis, index) = (*axis, *index);
            collect_chunks(input)
                .into_iter()
                .filter(|chunk| {
                    chunk.offset[axis] <= index && index < chunk.offset[axis] + chunk.shape[axis]
                })
                .map(|mut chunk| {
                    let local = index - chunk.offset[axis];
                    chunk.offset.remove(axis);
                    chunk.shape.remove(axis);
                    chunk.ops.push(ChunkOp::Pick { axis, index: local });
                    chunk
                })
                .collect()
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
