//! Read operations.

use data_path_parser::PathStep;
use serde_json::Value;

use crate::error::DataPathError;
use crate::step::{step_get, step_get_mut};

pub(crate) fn ensure_path(path: &[PathStep]) -> Result<(), DataPathError> {
    if path.is_empty() {
        Err(DataPathError::EmptyPath)
    } else {
        Ok(())
    }
}

/// Get the value at `path`.
///
/// `Ok(None)` means some step along the way held no value. A stored `null`
/// is a present value and comes back as `Some(&Value::Null)` — the walk
/// tests existence, never truthiness, so `0`, `false`, and `""` all come
/// back exactly as stored.
pub fn get<'a>(root: &'a Value, path: &[PathStep]) -> Result<Option<&'a Value>, DataPathError> {
    ensure_path(path)?;
    let mut current = root;
    for step in path {
        match step_get(current, step) {
            Some(value) => current = value,
            None => return Ok(None),
        }
    }
    Ok(Some(current))
}

/// Mutable twin of [`get`].
pub fn get_mut<'a>(
    root: &'a mut Value,
    path: &[PathStep],
) -> Result<Option<&'a mut Value>, DataPathError> {
    ensure_path(path)?;
    let mut current = root;
    for step in path {
        match step_get_mut(current, step) {
            Some(value) => current = value,
            None => return Ok(None),
        }
    }
    Ok(Some(current))
}

/// Whether `path` holds a meaningful value: present and not `null`.
pub fn has(root: &Value, path: &[PathStep]) -> Result<bool, DataPathError> {
    Ok(matches!(get(root, path)?, Some(value) if !value.is_null()))
}

/// First of `paths` whose value is neither absent nor `null`.
pub fn coalesce<'a>(
    root: &'a Value,
    paths: &[&[PathStep]],
) -> Result<Option<&'a Value>, DataPathError> {
    for path in paths {
        if let Some(value) = get(root, path)? {
            if !value.is_null() {
                return Ok(Some(value));
            }
        }
    }
    Ok(None)
}
