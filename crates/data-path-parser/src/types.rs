//! Path segment types.

use std::fmt;

/// A single segment of a data path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    /// Mapping key: `user`, `['home town']`
    Key(String),
    /// Sequence index: `[0]`
    ///
    /// Signed so that caller-built paths can carry a negative index; the
    /// navigation layer rejects those with a dedicated error instead of
    /// ruling them out at the type level.
    Index(isize),
}

/// An ordered sequence of path segments.
pub type Path = Vec<PathStep>;

impl From<&str> for PathStep {
    fn from(key: &str) -> Self {
        PathStep::Key(key.to_string())
    }
}

impl From<String> for PathStep {
    fn from(key: String) -> Self {
        PathStep::Key(key)
    }
}

impl From<isize> for PathStep {
    fn from(index: isize) -> Self {
        PathStep::Index(index)
    }
}

impl From<i32> for PathStep {
    fn from(index: i32) -> Self {
        PathStep::Index(index as isize)
    }
}

impl From<usize> for PathStep {
    fn from(index: usize) -> Self {
        PathStep::Index(index as isize)
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Key(key) => f.write_str(key),
            PathStep::Index(index) => write!(f, "{}", index),
        }
    }
}
