//! Per-instance accessor over a reactive root container.

use std::borrow::Cow;

use data_path_parser::{parse_path, PathStep};
use serde_json::Value;

use crate::array;
use crate::error::DataPathError;
use crate::mutate;
use crate::reactive::Reactivity;

/// A path argument: pre-segmented steps or the string form.
#[derive(Debug, Clone)]
pub enum PathArg<'a> {
    Steps(Cow<'a, [PathStep]>),
    Text(&'a str),
}

impl<'a> From<&'a str> for PathArg<'a> {
    fn from(text: &'a str) -> Self {
        PathArg::Text(text)
    }
}

impl<'a> From<&'a String> for PathArg<'a> {
    fn from(text: &'a String) -> Self {
        PathArg::Text(text.as_str())
    }
}

impl<'a> From<&'a [PathStep]> for PathArg<'a> {
    fn from(steps: &'a [PathStep]) -> Self {
        PathArg::Steps(Cow::Borrowed(steps))
    }
}

impl<'a, const N: usize> From<&'a [PathStep; N]> for PathArg<'a> {
    fn from(steps: &'a [PathStep; N]) -> Self {
        PathArg::Steps(Cow::Borrowed(steps.as_slice()))
    }
}

impl From<Vec<PathStep>> for PathArg<'static> {
    fn from(steps: Vec<PathStep>) -> Self {
        PathArg::Steps(Cow::Owned(steps))
    }
}

impl<'a> From<&'a Vec<PathStep>> for PathArg<'a> {
    fn from(steps: &'a Vec<PathStep>) -> Self {
        PathArg::Steps(Cow::Borrowed(steps.as_slice()))
    }
}

impl<'a> PathArg<'a> {
    /// Apply the shared path preconditions and resolve to segments; the
    /// string form runs through the parser.
    fn resolve(self) -> Result<Cow<'a, [PathStep]>, DataPathError> {
        match self {
            PathArg::Text(text) => {
                if text.is_empty() {
                    return Err(DataPathError::EmptyPath);
                }
                Ok(Cow::Owned(parse_path(text)?))
            }
            PathArg::Steps(steps) => {
                if steps.is_empty() {
                    return Err(DataPathError::EmptyPath);
                }
                Ok(steps)
            }
        }
    }
}

/// Per-instance accessor: owns the root container once the host's
/// initialization phase hands it over, and dispatches every path operation
/// with the shared preconditions applied.
///
/// Before [`initialize`](Self::initialize) every operation fails with the
/// not-ready error.
#[derive(Debug)]
pub struct DataAccessor<R: Reactivity> {
    root: Option<Value>,
    reactivity: R,
}

impl<R: Reactivity> DataAccessor<R> {
    /// An accessor with no data yet.
    pub fn new(reactivity: R) -> Self {
        Self {
            root: None,
            reactivity,
        }
    }

    /// An accessor that is ready from the start.
    pub fn with_root(root: Value, reactivity: R) -> Self {
        Self {
            root: Some(root),
            reactivity,
        }
    }

    /// Hand over the live root container.
    pub fn initialize(&mut self, root: Value) {
        self.root = Some(root);
    }

    pub fn is_ready(&self) -> bool {
        self.root.is_some()
    }

    /// The live root container.
    pub fn root(&self) -> Result<&Value, DataPathError> {
        self.root.as_ref().ok_or(DataPathError::DataNotReady)
    }

    pub fn into_root(self) -> Option<Value> {
        self.root
    }

    pub fn get<'p>(&self, path: impl Into<PathArg<'p>>) -> Result<Option<&Value>, DataPathError> {
        let path = path.into().resolve()?;
        crate::get::get(self.root()?, &path)
    }

    pub fn has<'p>(&self, path: impl Into<PathArg<'p>>) -> Result<bool, DataPathError> {
        let path = path.into().resolve()?;
        crate::get::has(self.root()?, &path)
    }

    /// First of `paths` holding a value that is neither absent nor `null`.
    pub fn coalesce<'p, I, P>(&self, paths: I) -> Result<Option<&Value>, DataPathError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathArg<'p>>,
    {
        for path in paths {
            let path = path.into().resolve()?;
            if let Some(value) = crate::get::get(self.root()?, &path)? {
                if !value.is_null() {
                    return Ok(Some(value));
                }
            }
        }
        Ok(None)
    }

    pub fn set<'p>(
        &mut self,
        path: impl Into<PathArg<'p>>,
        value: Value,
    ) -> Result<(), DataPathError> {
        let path = path.into().resolve()?;
        let root = self.root.as_mut().ok_or(DataPathError::DataNotReady)?;
        mutate::set(root, &path, value, &mut self.reactivity)
    }

    pub fn delete<'p>(&mut self, path: impl Into<PathArg<'p>>) -> Result<(), DataPathError> {
        let path = path.into().resolve()?;
        let root = self.root.as_mut().ok_or(DataPathError::DataNotReady)?;
        mutate::delete(root, &path, &mut self.reactivity)
    }

    pub fn empty<'p>(&mut self, path: impl Into<PathArg<'p>>) -> Result<(), DataPathError> {
        let path = path.into().resolve()?;
        let root = self.root.as_mut().ok_or(DataPathError::DataNotReady)?;
        mutate::empty(root, &path, &mut self.reactivity)
    }

    pub fn splice<'p>(
        &mut self,
        path: impl Into<PathArg<'p>>,
        start: isize,
        delete_count: Option<usize>,
        items: Vec<Value>,
    ) -> Result<Vec<Value>, DataPathError> {
        let path = path.into().resolve()?;
        let root = self.root.as_mut().ok_or(DataPathError::DataNotReady)?;
        array::splice(root, &path, start, delete_count, items, &mut self.reactivity)
    }

    pub fn insert<'p>(
        &mut self,
        path: impl Into<PathArg<'p>>,
        start: isize,
        items: Vec<Value>,
    ) -> Result<(), DataPathError> {
        let path = path.into().resolve()?;
        let root = self.root.as_mut().ok_or(DataPathError::DataNotReady)?;
        array::insert(root, &path, start, items, &mut self.reactivity)
    }

    pub fn remove<'p>(
        &mut self,
        path: impl Into<PathArg<'p>>,
        start: isize,
        delete_count: Option<usize>,
    ) -> Result<Vec<Value>, DataPathError> {
        let path = path.into().resolve()?;
        let root = self.root.as_mut().ok_or(DataPathError::DataNotReady)?;
        array::remove(root, &path, start, delete_count, &mut self.reactivity)
    }

    pub fn push<'p>(
        &mut self,
        path: impl Into<PathArg<'p>>,
        value: Value,
    ) -> Result<usize, DataPathError> {
        let path = path.into().resolve()?;
        let root = self.root.as_mut().ok_or(DataPathError::DataNotReady)?;
        array::push(root, &path, value, &mut self.reactivity)
    }

    pub fn pop<'p>(&mut self, path: impl Into<PathArg<'p>>) -> Result<Option<Value>, DataPathError> {
        let path = path.into().resolve()?;
        let root = self.root.as_mut().ok_or(DataPathError::DataNotReady)?;
        array::pop(root, &path, &mut self.reactivity)
    }

    pub fn shift<'p>(
        &mut self,
        path: impl Into<PathArg<'p>>,
    ) -> Result<Option<Value>, DataPathError> {
        let path = path.into().resolve()?;
        let root = self.root.as_mut().ok_or(DataPathError::DataNotReady)?;
        array::shift(root, &path, &mut self.reactivity)
    }
}
