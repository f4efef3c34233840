//! Write operations: set, delete, empty.

use data_path_parser::PathStep;
use serde_json::{Map, Value};

use crate::error::DataPathError;
use crate::get::{ensure_path, get};
use crate::reactive::Reactivity;
use crate::step::{step_get, step_get_mut, step_index, step_key};

// ── Shared walk helpers ───────────────────────────────────────────────────

fn ensure_no_negative_index(path: &[PathStep]) -> Result<(), DataPathError> {
    if path
        .iter()
        .any(|step| matches!(step, PathStep::Index(index) if *index < 0))
    {
        Err(DataPathError::NegativeIndex)
    } else {
        Ok(())
    }
}

fn fresh_container(next: &PathStep) -> Value {
    match next {
        PathStep::Index(_) => Value::Array(Vec::new()),
        PathStep::Key(_) => Value::Object(Map::new()),
    }
}

/// Plain mutable walk that gives up on the first missing step.
pub(crate) fn walk_mut<'a>(root: &'a mut Value, path: &[PathStep]) -> Option<&'a mut Value> {
    let mut current = root;
    for step in path {
        current = step_get_mut(current, step)?;
    }
    Some(current)
}

// ── set ───────────────────────────────────────────────────────────────────

/// Set `value` at `path`, creating intermediate containers on demand.
///
/// Creation is type-driven: a step followed by an index gets a sequence,
/// anything else gets a mapping, and a sequence too short for the upcoming
/// index is extended with null slots. Root-level keys must already exist on
/// the root container — only deeper levels may introduce new properties.
pub fn set<R: Reactivity>(
    root: &mut Value,
    path: &[PathStep],
    value: Value,
    reactivity: &mut R,
) -> Result<(), DataPathError> {
    ensure_path(path)?;
    ensure_no_negative_index(path)?;

    if path.len() == 1 {
        // the root slot is already tracked by the host; write through it
        return match step_get_mut(root, &path[0]) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(DataPathError::RootPropertyCreate),
        };
    }

    let last = path.len() - 1;
    let mut current = root;
    for (i, step) in path[..last].iter().enumerate() {
        let next = &path[i + 1];
        let holds_container = matches!(
            step_get(current, step),
            Some(Value::Object(_)) | Some(Value::Array(_))
        );
        if !holds_container {
            if i == 0 {
                match step_get_mut(current, step) {
                    // an existing root slot may be overwritten in place
                    Some(slot) => *slot = fresh_container(next),
                    None => return Err(DataPathError::RootPropertyCreate),
                }
            } else {
                reactivity.register_property(current, step, fresh_container(next));
            }
        }
        if let PathStep::Index(index) = next {
            let wanted = *index as usize + 1;
            if let Some(Value::Array(arr)) = step_get_mut(current, step) {
                if arr.len() < wanted {
                    arr.resize(wanted, Value::Null);
                }
            }
        }
        current = step_get_mut(current, step)
            .expect("register_property implementations must store the supplied value");
    }
    reactivity.register_property(current, &path[last], value);
    Ok(())
}

// ── delete ────────────────────────────────────────────────────────────────

/// Delete the value at `path`.
///
/// Root-level keys cannot be deleted. A missing or scalar parent makes this
/// a no-op. Sequence slots are cleared in place through an observable
/// replace (length unchanged); mapping keys go through the collaborator's
/// remove so enumeration-based observers notice.
pub fn delete<R: Reactivity>(
    root: &mut Value,
    path: &[PathStep],
    reactivity: &mut R,
) -> Result<(), DataPathError> {
    ensure_path(path)?;
    if path.len() == 1 {
        return Err(DataPathError::RootPropertyDelete);
    }
    let (parent_path, step) = path.split_at(path.len() - 1);
    let step = &step[0];
    let parent = match walk_mut(root, parent_path) {
        Some(parent) => parent,
        None => return Ok(()),
    };
    if parent.is_array() {
        let len = parent.as_array().map_or(0, Vec::len);
        match step_index(step) {
            Some(index) if index < len => {
                reactivity.register_property(
                    parent,
                    &PathStep::Index(index as isize),
                    Value::Null,
                );
            }
            _ => {}
        }
    } else if parent.is_object() {
        reactivity.remove_property(parent, step_key(step).as_ref());
    }
    Ok(())
}

// ── empty ─────────────────────────────────────────────────────────────────

enum EmptyTarget {
    Untouched,
    Text,
    Sequence,
    Mapping,
    Unsupported,
}

/// Empty the value at `path`.
///
/// Text is replaced with `""` (text is immutable in the host's data model),
/// sequences are cleared, mappings lose every key through the collaborator.
/// An absent value is left alone; booleans and numbers cannot be emptied.
pub fn empty<R: Reactivity>(
    root: &mut Value,
    path: &[PathStep],
    reactivity: &mut R,
) -> Result<(), DataPathError> {
    ensure_path(path)?;
    let target = match get(root, path)? {
        None => EmptyTarget::Untouched,
        Some(Value::String(_)) => EmptyTarget::Text,
        Some(Value::Array(_)) => EmptyTarget::Sequence,
        Some(Value::Object(_)) => EmptyTarget::Mapping,
        // the host enumerates null like an object with no own keys
        Some(Value::Null) => EmptyTarget::Untouched,
        Some(_) => EmptyTarget::Unsupported,
    };
    match target {
        EmptyTarget::Untouched => Ok(()),
        EmptyTarget::Text => set(root, path, Value::String(String::new()), reactivity),
        EmptyTarget::Sequence => {
            if let Some(Value::Array(arr)) = walk_mut(root, path) {
                arr.clear();
            }
            Ok(())
        }
        EmptyTarget::Mapping => {
            if let Some(container) = walk_mut(root, path) {
                let keys: Vec<String> = container
                    .as_object()
                    .map(|map| map.keys().cloned().collect())
                    .unwrap_or_default();
                for key in keys {
                    reactivity.remove_property(container, &key);
                }
            }
            Ok(())
        }
        EmptyTarget::Unsupported => Err(DataPathError::UnsupportedEmptyType),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::Untracked;
    use serde_json::json;

    fn keys(steps: &[&str]) -> Vec<PathStep> {
        steps.iter().map(|s| PathStep::Key(s.to_string())).collect()
    }

    #[test]
    fn set_overwrites_existing_root_key() {
        let mut doc = json!({"a": 1});
        set(&mut doc, &keys(&["a"]), json!(2), &mut Untracked).unwrap();
        assert_eq!(doc, json!({"a": 2}));
    }

    #[test]
    fn set_rejects_new_root_key() {
        let mut doc = json!({"a": 1});
        let err = set(&mut doc, &keys(&["b"]), json!(2), &mut Untracked).unwrap_err();
        assert_eq!(err, DataPathError::RootPropertyCreate);
        assert_eq!(doc, json!({"a": 1}));
    }

    #[test]
    fn set_rejects_new_root_key_deep() {
        let mut doc = json!({"a": 1});
        let err = set(&mut doc, &keys(&["b", "c"]), json!(2), &mut Untracked).unwrap_err();
        assert_eq!(err, DataPathError::RootPropertyCreate);
    }

    #[test]
    fn set_creates_mapping_for_text_step() {
        let mut doc = json!({"a": {"b": "d", "c": ["e", "f", "g"]}});
        set(
            &mut doc,
            &keys(&["a", "d", "c"]),
            json!("x"),
            &mut Untracked,
        )
        .unwrap();
        assert_eq!(doc["a"]["d"], json!({"c": "x"}));
    }

    #[test]
    fn set_creates_and_extends_sequence_for_index_step() {
        let mut doc = json!({"a": {}});
        let path = vec![
            PathStep::Key("a".into()),
            PathStep::Key("e".into()),
            PathStep::Index(1),
        ];
        set(&mut doc, &path, json!("m"), &mut Untracked).unwrap();
        assert_eq!(doc["a"]["e"], json!([null, "m"]));
    }

    #[test]
    fn set_extends_existing_sequence() {
        let mut doc = json!({"a": {"list": [1]}});
        let path = vec![
            PathStep::Key("a".into()),
            PathStep::Key("list".into()),
            PathStep::Index(3),
        ];
        set(&mut doc, &path, json!(4), &mut Untracked).unwrap();
        assert_eq!(doc["a"]["list"], json!([1, null, null, 4]));
    }

    #[test]
    fn set_replaces_scalar_intermediate() {
        let mut doc = json!({"a": {"b": 5}});
        set(&mut doc, &keys(&["a", "b", "c"]), json!(1), &mut Untracked).unwrap();
        assert_eq!(doc, json!({"a": {"b": {"c": 1}}}));
    }

    #[test]
    fn set_rejects_negative_index_before_mutating() {
        let mut doc = json!({"a": {}});
        let path = vec![
            PathStep::Key("a".into()),
            PathStep::Key("e".into()),
            PathStep::Index(-1),
        ];
        let err = set(&mut doc, &path, json!(0), &mut Untracked).unwrap_err();
        assert_eq!(err, DataPathError::NegativeIndex);
        assert_eq!(err.to_string(), "Negative indexes are not allowed.");
        assert_eq!(doc, json!({"a": {}}));
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut doc = json!({"a": {}});
        let path = keys(&["a", "b", "c"]);
        set(&mut doc, &path, json!([1, 2]), &mut Untracked).unwrap();
        assert_eq!(get(&doc, &path).unwrap(), Some(&json!([1, 2])));
    }

    #[test]
    fn delete_root_key_fails() {
        let mut doc = json!({"a": 1});
        let err = delete(&mut doc, &keys(&["a"]), &mut Untracked).unwrap_err();
        assert_eq!(err, DataPathError::RootPropertyDelete);
    }

    #[test]
    fn delete_mapping_key() {
        let mut doc = json!({"a": {"b": 1, "c": 2}});
        delete(&mut doc, &keys(&["a", "b"]), &mut Untracked).unwrap();
        assert_eq!(doc, json!({"a": {"c": 2}}));
    }

    #[test]
    fn delete_sequence_slot_keeps_length() {
        let mut doc = json!({"a": {"list": [1, 2, 3]}});
        let path = vec![
            PathStep::Key("a".into()),
            PathStep::Key("list".into()),
            PathStep::Index(1),
        ];
        delete(&mut doc, &path, &mut Untracked).unwrap();
        assert_eq!(doc["a"]["list"], json!([1, null, 3]));
    }

    #[test]
    fn delete_out_of_bounds_is_noop() {
        let mut doc = json!({"a": {"list": [1]}});
        let path = vec![
            PathStep::Key("a".into()),
            PathStep::Key("list".into()),
            PathStep::Index(5),
        ];
        delete(&mut doc, &path, &mut Untracked).unwrap();
        assert_eq!(doc["a"]["list"], json!([1]));
    }

    #[test]
    fn delete_missing_parent_is_noop() {
        let mut doc = json!({"a": {}});
        delete(&mut doc, &keys(&["a", "x", "y"]), &mut Untracked).unwrap();
        assert_eq!(doc, json!({"a": {}}));
    }

    #[test]
    fn delete_scalar_parent_is_noop() {
        let mut doc = json!({"a": {"b": 5}});
        delete(&mut doc, &keys(&["a", "b", "c"]), &mut Untracked).unwrap();
        assert_eq!(doc, json!({"a": {"b": 5}}));
    }

    #[test]
    fn empty_text_replaces_with_blank() {
        let mut doc = json!({"a": {"s": "hello"}});
        empty(&mut doc, &keys(&["a", "s"]), &mut Untracked).unwrap();
        assert_eq!(doc["a"]["s"], json!(""));
    }

    #[test]
    fn empty_sequence_clears() {
        let mut doc = json!({"a": {"list": [1, 2]}});
        empty(&mut doc, &keys(&["a", "list"]), &mut Untracked).unwrap();
        assert_eq!(doc["a"]["list"], json!([]));
    }

    #[test]
    fn empty_mapping_removes_all_keys() {
        let mut doc = json!({"a": {"m": {"x": 1, "y": 2}}});
        empty(&mut doc, &keys(&["a", "m"]), &mut Untracked).unwrap();
        assert_eq!(doc["a"]["m"], json!({}));
    }

    #[test]
    fn empty_absent_is_noop() {
        let mut doc = json!({"a": {}});
        empty(&mut doc, &keys(&["a", "missing"]), &mut Untracked).unwrap();
        assert_eq!(doc, json!({"a": {}}));
    }

    #[test]
    fn empty_rejects_numbers_and_booleans() {
        let mut doc = json!({"a": {"n": 4, "b": true}});
        let err = empty(&mut doc, &keys(&["a", "n"]), &mut Untracked).unwrap_err();
        assert_eq!(err, DataPathError::UnsupportedEmptyType);
        assert_eq!(
            err.to_string(),
            "Value cannot be emptied. Type not supported."
        );
        let err = empty(&mut doc, &keys(&["a", "b"]), &mut Untracked).unwrap_err();
        assert_eq!(err, DataPathError::UnsupportedEmptyType);
    }

    #[test]
    fn empty_is_idempotent() {
        let mut doc = json!({"a": {"s": "x", "list": [1], "m": {"k": 1}}});
        for _ in 0..2 {
            empty(&mut doc, &keys(&["a", "s"]), &mut Untracked).unwrap();
            empty(&mut doc, &keys(&["a", "list"]), &mut Untracked).unwrap();
            empty(&mut doc, &keys(&["a", "m"]), &mut Untracked).unwrap();
        }
        assert_eq!(doc["a"], json!({"s": "", "list": [], "m": {}}));
    }
}
