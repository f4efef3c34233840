//! Single-step container access shared by every walk.

use std::borrow::Cow;

use data_path_parser::PathStep;
use serde_json::Value;

/// Key form of a step when addressing a mapping. Indices address mappings by
/// their decimal string, mirroring host property lookup.
pub(crate) fn step_key(step: &PathStep) -> Cow<'_, str> {
    match step {
        PathStep::Key(key) => Cow::Borrowed(key.as_str()),
        PathStep::Index(index) => Cow::Owned(index.to_string()),
    }
}

/// Index form of a step when addressing a sequence. Numeric text keys alias
/// their index, mirroring host element lookup; a negative index has no slot.
pub(crate) fn step_index(step: &PathStep) -> Option<usize> {
    match step {
        PathStep::Index(index) => usize::try_from(*index).ok(),
        PathStep::Key(key) => key.parse::<usize>().ok(),
    }
}

pub(crate) fn step_get<'a>(container: &'a Value, step: &PathStep) -> Option<&'a Value> {
    match container {
        Value::Object(map) => map.get(step_key(step).as_ref()),
        Value::Array(arr) => step_index(step).and_then(|index| arr.get(index)),
        _ => None,
    }
}

pub(crate) fn step_get_mut<'a>(container: &'a mut Value, step: &PathStep) -> Option<&'a mut Value> {
    match container {
        Value::Object(map) => map.get_mut(step_key(step).as_ref()),
        Value::Array(arr) => step_index(step).and_then(move |index| arr.get_mut(index)),
        _ => None,
    }
}
