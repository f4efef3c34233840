//! Reactivity collaborator interface.

use data_path_parser::PathStep;
use serde_json::Value;

/// Host hooks invoked for every structural mutation the navigator performs.
///
/// `register_property` must actually store `value` at `step` — the
/// navigation engine descends into the stored slot right after calling it —
/// and make the binding observable. `remove_property` must delete a mapping
/// key such that observers relying on enumeration see it disappear.
///
/// How observability is achieved (subscriber lists, dirty marking,
/// dependency graphs) is entirely the host's business; [`Untracked`] is the
/// degenerate implementation for hosts without observers.
pub trait Reactivity {
    fn register_property(&mut self, container: &mut Value, step: &PathStep, value: Value);

    fn remove_property(&mut self, container: &mut Value, key: &str);
}

/// Direct writes with no notification bookkeeping.
#[derive(Debug, Default, Clone, Copy)]
pub struct Untracked;

impl Reactivity for Untracked {
    fn register_property(&mut self, container: &mut Value, step: &PathStep, value: Value) {
        match container {
            Value::Object(map) => {
                let key = match step {
                    PathStep::Key(key) => key.clone(),
                    PathStep::Index(index) => index.to_string(),
                };
                map.insert(key, value);
            }
            Value::Array(arr) => {
                let index = match step {
                    PathStep::Index(index) => usize::try_from(*index).ok(),
                    PathStep::Key(key) => key.parse::<usize>().ok(),
                };
                if let Some(index) = index {
                    if arr.len() <= index {
                        arr.resize(index + 1, Value::Null);
                    }
                    arr[index] = value;
                }
            }
            _ => {}
        }
    }

    fn remove_property(&mut self, container: &mut Value, key: &str) {
        if let Value::Object(map) = container {
            map.remove(key);
        }
    }
}
