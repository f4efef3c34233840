//! Sequence operations over a path-resolved array.

use data_path_parser::PathStep;
use serde_json::Value;

use crate::error::DataPathError;
use crate::get::get;
use crate::mutate::{set, walk_mut};
use crate::reactive::Reactivity;

/// Standard splice start semantics: negative counts from the end, both ends
/// clamp to the sequence bounds.
fn clamp_start(start: isize, len: usize) -> usize {
    if start < 0 {
        len.saturating_sub(start.unsigned_abs())
    } else {
        (start as usize).min(len)
    }
}

enum Resolved {
    Sequence,
    Absent,
    Other,
}

fn classify(root: &Value, path: &[PathStep]) -> Result<Resolved, DataPathError> {
    Ok(match get(root, path)? {
        Some(Value::Array(_)) => Resolved::Sequence,
        None => Resolved::Absent,
        Some(_) => Resolved::Other,
    })
}

/// Resolve the sequence at `path`, creating an empty one when absent.
fn sequence_mut<'a, R: Reactivity>(
    root: &'a mut Value,
    path: &[PathStep],
    reactivity: &mut R,
) -> Result<&'a mut Vec<Value>, DataPathError> {
    match classify(root, path)? {
        Resolved::Sequence => {}
        Resolved::Other => return Err(DataPathError::NotAnArray),
        Resolved::Absent => {
            if path.len() == 1 {
                // a brand-new root key would have to be registered
                return Err(DataPathError::RootPropertyCreate);
            }
            set(root, path, Value::Array(Vec::new()), reactivity)?;
        }
    }
    walk_mut(root, path)
        .and_then(Value::as_array_mut)
        .ok_or(DataPathError::NotAnArray)
}

/// Standard splice: remove `delete_count` elements at `start`, insert
/// `items` in their place, and return the removed elements.
///
/// `delete_count: None` is the call-site-omitted case and removes through
/// the end of the sequence; an explicit `Some(0)` removes nothing. An
/// absent sequence is created first (except at the root level).
pub fn splice<R: Reactivity>(
    root: &mut Value,
    path: &[PathStep],
    start: isize,
    delete_count: Option<usize>,
    items: Vec<Value>,
    reactivity: &mut R,
) -> Result<Vec<Value>, DataPathError> {
    let arr = sequence_mut(root, path, reactivity)?;
    let from = clamp_start(start, arr.len());
    let count = delete_count.unwrap_or(usize::MAX).min(arr.len() - from);
    Ok(arr.splice(from..from + count, items).collect())
}

/// Insert `items` at `start`. At least one item is required.
pub fn insert<R: Reactivity>(
    root: &mut Value,
    path: &[PathStep],
    start: isize,
    items: Vec<Value>,
    reactivity: &mut R,
) -> Result<(), DataPathError> {
    if items.is_empty() {
        return Err(DataPathError::NoItemsToInsert);
    }
    splice(root, path, start, Some(0), items, reactivity)?;
    Ok(())
}

/// Remove `delete_count` elements at `start` (default 1) and return them.
///
/// An absent path removes nothing and returns an empty sequence.
pub fn remove<R: Reactivity>(
    root: &mut Value,
    path: &[PathStep],
    start: isize,
    delete_count: Option<usize>,
    reactivity: &mut R,
) -> Result<Vec<Value>, DataPathError> {
    match classify(root, path)? {
        Resolved::Absent => Ok(Vec::new()),
        Resolved::Other => Err(DataPathError::NotAnArray),
        Resolved::Sequence => splice(
            root,
            path,
            start,
            Some(delete_count.unwrap_or(1)),
            Vec::new(),
            reactivity,
        ),
    }
}

/// Append `value` and return the new length. An absent sequence is created
/// first (except at the root level).
pub fn push<R: Reactivity>(
    root: &mut Value,
    path: &[PathStep],
    value: Value,
    reactivity: &mut R,
) -> Result<usize, DataPathError> {
    let arr = sequence_mut(root, path, reactivity)?;
    arr.push(value);
    Ok(arr.len())
}

/// Remove and return the last element; `None` when the sequence is empty.
pub fn pop<R: Reactivity>(
    root: &mut Value,
    path: &[PathStep],
    reactivity: &mut R,
) -> Result<Option<Value>, DataPathError> {
    let arr = sequence_mut(root, path, reactivity)?;
    Ok(arr.pop())
}

/// Remove and return the first element; `None` when the sequence is empty.
pub fn shift<R: Reactivity>(
    root: &mut Value,
    path: &[PathStep],
    reactivity: &mut R,
) -> Result<Option<Value>, DataPathError> {
    let arr = sequence_mut(root, path, reactivity)?;
    if arr.is_empty() {
        Ok(None)
    } else {
        Ok(Some(arr.remove(0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::Untracked;
    use serde_json::json;

    fn keys(steps: &[&str]) -> Vec<PathStep> {
        steps.iter().map(|s| PathStep::Key(s.to_string())).collect()
    }

    #[test]
    fn splice_omitted_count_removes_through_end() {
        let mut doc = json!({"array": ["one", "two", "three"]});
        let removed = splice(&mut doc, &keys(&["array"]), 1, None, vec![], &mut Untracked).unwrap();
        assert_eq!(removed, vec![json!("two"), json!("three")]);
        assert_eq!(doc["array"], json!(["one"]));
    }

    #[test]
    fn splice_zero_count_removes_nothing() {
        let mut doc = json!({"array": ["one", "two", "three"]});
        let removed =
            splice(&mut doc, &keys(&["array"]), 1, Some(0), vec![], &mut Untracked).unwrap();
        assert_eq!(removed, Vec::<Value>::new());
        assert_eq!(doc["array"], json!(["one", "two", "three"]));
    }

    #[test]
    fn splice_inserts_in_place() {
        let mut doc = json!({"array": [1, 4]});
        splice(
            &mut doc,
            &keys(&["array"]),
            1,
            Some(0),
            vec![json!(2), json!(3)],
            &mut Untracked,
        )
        .unwrap();
        assert_eq!(doc["array"], json!([1, 2, 3, 4]));
    }

    #[test]
    fn splice_replaces_range() {
        let mut doc = json!({"array": ["a", "b", "c"]});
        let removed = splice(
            &mut doc,
            &keys(&["array"]),
            0,
            Some(2),
            vec![json!("x")],
            &mut Untracked,
        )
        .unwrap();
        assert_eq!(removed, vec![json!("a"), json!("b")]);
        assert_eq!(doc["array"], json!(["x", "c"]));
    }

    #[test]
    fn splice_negative_start_counts_from_end() {
        let mut doc = json!({"array": [1, 2, 3]});
        let removed = splice(&mut doc, &keys(&["array"]), -2, None, vec![], &mut Untracked).unwrap();
        assert_eq!(removed, vec![json!(2), json!(3)]);
        assert_eq!(doc["array"], json!([1]));
    }

    #[test]
    fn splice_creates_absent_sequence_below_root() {
        let mut doc = json!({"a": {}});
        let removed = splice(
            &mut doc,
            &keys(&["a", "list"]),
            0,
            None,
            vec![json!(1)],
            &mut Untracked,
        )
        .unwrap();
        assert_eq!(removed, Vec::<Value>::new());
        assert_eq!(doc["a"]["list"], json!([1]));
    }

    #[test]
    fn splice_absent_root_sequence_fails() {
        let mut doc = json!({"a": {}});
        let err = splice(&mut doc, &keys(&["list"]), 0, None, vec![], &mut Untracked).unwrap_err();
        assert_eq!(err, DataPathError::RootPropertyCreate);
    }

    #[test]
    fn splice_non_sequence_fails() {
        let mut doc = json!({"a": {"s": "text"}});
        let err = splice(&mut doc, &keys(&["a", "s"]), 0, None, vec![], &mut Untracked).unwrap_err();
        assert_eq!(err, DataPathError::NotAnArray);
        assert_eq!(err.to_string(), "Path does not lead to an array.");
    }

    #[test]
    fn insert_requires_items() {
        let mut doc = json!({"a": {"list": []}});
        let err = insert(&mut doc, &keys(&["a", "list"]), 0, vec![], &mut Untracked).unwrap_err();
        assert_eq!(err, DataPathError::NoItemsToInsert);
        assert_eq!(err.to_string(), "No items to insert.");
    }

    #[test]
    fn insert_delegates_to_splice() {
        let mut doc = json!({"a": {"list": [1, 3]}});
        insert(
            &mut doc,
            &keys(&["a", "list"]),
            1,
            vec![json!(2)],
            &mut Untracked,
        )
        .unwrap();
        assert_eq!(doc["a"]["list"], json!([1, 2, 3]));
    }

    #[test]
    fn remove_defaults_to_one_element() {
        let mut doc = json!({"a": {"list": [1, 2, 3]}});
        let removed = remove(&mut doc, &keys(&["a", "list"]), 1, None, &mut Untracked).unwrap();
        assert_eq!(removed, vec![json!(2)]);
        assert_eq!(doc["a"]["list"], json!([1, 3]));
    }

    #[test]
    fn remove_absent_path_is_noop() {
        let mut doc = json!({"a": {}});
        let removed = remove(&mut doc, &keys(&["a", "list"]), 0, None, &mut Untracked).unwrap();
        assert_eq!(removed, Vec::<Value>::new());
        assert_eq!(doc, json!({"a": {}}));
    }

    #[test]
    fn remove_non_sequence_fails() {
        let mut doc = json!({"a": {"n": 1}});
        let err = remove(&mut doc, &keys(&["a", "n"]), 0, None, &mut Untracked).unwrap_err();
        assert_eq!(err, DataPathError::NotAnArray);
    }

    #[test]
    fn push_returns_new_length() {
        let mut doc = json!({"a": {"list": [1]}});
        let len = push(&mut doc, &keys(&["a", "list"]), json!(2), &mut Untracked).unwrap();
        assert_eq!(len, 2);
        assert_eq!(doc["a"]["list"], json!([1, 2]));
    }

    #[test]
    fn push_creates_absent_sequence_below_root() {
        let mut doc = json!({"a": {}});
        let len = push(&mut doc, &keys(&["a", "list"]), json!("x"), &mut Untracked).unwrap();
        assert_eq!(len, 1);
        assert_eq!(doc["a"]["list"], json!(["x"]));
    }

    #[test]
    fn push_absent_root_sequence_fails() {
        let mut doc = json!({"a": 1});
        let err = push(&mut doc, &keys(&["list"]), json!(1), &mut Untracked).unwrap_err();
        assert_eq!(err, DataPathError::RootPropertyCreate);
    }

    #[test]
    fn pop_and_shift() {
        let mut doc = json!({"a": {"list": [1, 2, 3]}});
        assert_eq!(
            pop(&mut doc, &keys(&["a", "list"]), &mut Untracked).unwrap(),
            Some(json!(3))
        );
        assert_eq!(
            shift(&mut doc, &keys(&["a", "list"]), &mut Untracked).unwrap(),
            Some(json!(1))
        );
        assert_eq!(doc["a"]["list"], json!([2]));
    }

    #[test]
    fn pop_empty_sequence_returns_none() {
        let mut doc = json!({"a": {"list": []}});
        assert_eq!(
            pop(&mut doc, &keys(&["a", "list"]), &mut Untracked).unwrap(),
            None
        );
        assert_eq!(
            shift(&mut doc, &keys(&["a", "list"]), &mut Untracked).unwrap(),
            None
        );
    }
}
