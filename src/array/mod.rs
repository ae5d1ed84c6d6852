//! Lazy array layer.
//!
//! Layers handed to the host never hold pixel data. Each one carries a
//! [`LazyArray`]: a shape, a [`DataType`] tag and a small task graph whose
//! leaves are chunk loaders supplied by the image collaborator.
//!
//! ```text
//!            Stack (T)
//!         ┌─────┼─────┐
//!         ▼     ▼     ▼
//!      Source Source Source     ← one ChunkLoader per plane/volume
//! ```
//!
//! Graphs are built with [`LazyArray::stack`] and [`LazyArray::select`],
//! simplified with [`LazyArray::optimize`], and evaluated either chunk by
//! chunk ([`LazyArray::chunks`] + [`Chunk::load`]) or all at once
//! ([`LazyArray::compute`]).

mod graph;
mod lazy;

pub use graph::ChunkLoader;
pub use lazy::{Chunk, DataType, LazyArray};
