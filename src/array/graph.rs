//! Task graph behind [`LazyArray`](super::LazyArray).
//!
//! A graph is a tree of reference-counted nodes. Leaves are chunk loaders;
//! inner nodes either stack their children along a new leading axis or
//! select one index along an axis. Nothing here ever loads data.

use std::fmt;
use std::sync::Arc;

use ndarray::ArrayD;

use crate::error::ArrayError;

/// Deferred producer of one chunk of data.
pub type ChunkLoader = Arc<dyn Fn() -> Result<ArrayD<f32>, ArrayError> + Send + Sync>;

pub(crate) enum Node {
    Source {
        shape: Vec<usize>,
        loader: ChunkLoader,
    },
    Stack {
        shape: Vec<usize>,
        parts: Vec<Arc<Node>>,
    },
    Select {
        shape: Vec<usize>,
        input: Arc<Node>,
        axis: usize,
        index: usize,
    },
}

impl Node {
    pub(crate) fn shape(&self) -> &[usize] {
        match self {
            Node::Source { shape, .. } | Node::Stack { shape, .. } | Node::Select { shape, .. } => {
                shape
            }
        }
    }

    pub(crate) fn source(shape: Vec<usize>, loader: ChunkLoader) -> Self {
        Node::Source { shape, loader }
    }

    /// Stack nodes of identical shape along a new leading axis.
    pub(crate) fn stack(parts: Vec<Arc<Node>>) -> Result<Self, ArrayError> {
        let first = parts.first().ok_or(ArrayError::EmptyStack)?;
        let part_shape = first.shape().to_vec();

        if let Some(other) = parts.iter().find(|p| p.shape() != part_shape.as_slice()) {
            return Err(ArrayError::ShapeMismatch {
                expected: part_shape,
                actual: other.shape().to_vec(),
            });
        }

        let mut shape = Vec::with_capacity(part_shape.len() + 1);
        shape.push(parts.len());
        shape.extend_from_slice(&part_shape);

        Ok(Node::Stack { shape, parts })
    }

    /// Fix `index` along `axis`, dropping that axis.
    pub(crate) fn select(input: Arc<Node>, axis: usize, index: usize) -> Result<Self, ArrayError> {
        let input_shape = input.shape();
        let ndim = input_shape.len();
        let len = *input_shape
            .get(axis)
            .ok_or(ArrayError::AxisOutOfBounds { axis, ndim })?;
        if index >= len {
            return Err(ArrayError::IndexOutOfBounds { axis, index, len });
        }

        let mut shape = input_shape.to_vec();
        shape.remove(axis);

        Ok(Node::Select {
            shape,
            input,
            axis,
            index,
        })
    }

    /// Number of nodes reachable from this one, counting shared nodes once per path.
    pub(crate) fn count(&self) -> usize {
        match self {
            Node::Source { .. } => 1,
            Node::Stack { parts, .. } => 1 + parts.iter().map(|p| p.count()).sum::<usize>(),
            Node::Select { input, .. } => 1 + input.count(),
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Source { shape, .. } => f.debug_struct("Source").field("shape", shape).finish(),
            Node::Stack { shape, parts } => f
                .debug_struct("Stack")
                .field("shape", shape)
                .field("parts", &parts.len())
                .finish(),
            Node::Select {
                shape, axis, index, ..
            } => f
                .debug_struct("Select")
                .field("shape", shape)
                .field("axis", axis)
                .field("index", index)
                .finish(),
        }
    }
}

// =============================================================================
// Optimization
// =============================================================================

/// Rewrite a graph so selections never sit above stacks.
///
/// A selection on the leading axis of a stack is replaced by the selected
/// part; a selection on a deeper axis is pushed into every part. Selections
/// that reach a source stay where they are.
pub(crate) fn optimize(node: &Arc<Node>) -> Arc<Node> {
    match node.as_ref() {
        Node::Source { .. } => Arc::clone(node),
        Node::Stack { shape, parts } => Arc::new(Node::Stack {
            shape: shape.clone(),
            parts: parts.iter().map(optimize).collect(),
        }),
        Node::Select {
            input, axis, index, ..
        } => push_select(optimize(input), *axis, *index),
    }
}

fn push_select(input: Arc<Node>, axis: usize, index: usize) -> Arc<Node> {
    match input.as_ref() {
        Node::Stack { parts, .. } if axis == 0 => Arc::clone(&parts[index]),
        Node::Stack { shape, parts } => {
            let mut out_shape = shape.clone();
            out_shape.remove(axis);
            Arc::new(Node::Stack {
                shape: out_shape,
                parts: parts
                    .iter()
                    .map(|p| push_select(Arc::clone(p), axis - 1, index))
                    .collect(),
            })
        }
        _ => {
            let mut shape = input.shape().to_vec();
            shape.remove(axis);
            Arc::new(Node::Select {
                shape,
                input,
                axis,
                index,
            })
        }
    }
}
