//! Path input accepted by the reader.
//!
//! Hosts may hand the reader either a single path or a batch of paths.
//! Only single paths are ever recognized; batches exist so they can be
//! rejected explicitly rather than silently reading the first entry.

use std::fmt;

/// A single path or a list of paths, as supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathInput {
    /// One file
    Single(String),

    /// A multi-file batch
    Multiple(Vec<String>),
}

impl PathInput {
    /// The path string, if this is a single-path input.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            PathInput::Single(path) => Some(path),
            PathInput::Multiple(_) => None,
        }
    }

    /// Number of paths carried.
    pub fn len(&self) -> usize {
        match self {
            PathInput::Single(_) => 1,
            PathInput::Multiple(paths) => paths.len(),
        }
    }

    /// True for an empty batch.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&str> for PathInput {
    fn from(path: &str) -> Self {
        PathInput::Single(path.to_string())
    }
}

impl From<String> for PathInput {
    fn from(path: String) -> Self {
        PathInput::Single(path)
    }
}

impl From<Vec<String>> for PathInput {
    fn from(paths: Vec<String>) -> Self {
        PathInput::Multiple(paths)
    }
}

impl From<&[&str]> for PathInput {
    fn from(paths: &[&str]) -> Self {
        PathInput::Multiple(paths.iter().map(|p| p.to_string()).collect())
    }
}

impl fmt::Display for PathInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathInput::Single(path) => write!(f, "{}", path),
            PathInput::Multiple(paths) => write!(f, "[{}]", paths.join(", ")),
        }
    }
}
