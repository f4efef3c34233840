//! Path-driven navigation and mutation of nested data.
//!
//! Given a root container (`serde_json::Value`) and a path — pre-segmented
//! [`PathStep`]s or a string such as `a.b[0]['c d']` — this crate reads,
//! writes, and restructures deeply nested mappings and sequences, creating
//! intermediate containers on demand and reporting every structural change
//! to a host-supplied [`Reactivity`] collaborator.
//!
//! Containers stay owned by the caller: every operation borrows the root
//! for its duration and retains nothing afterwards. Absence is reported as
//! `None`, never conflated with stored falsy values — a `null`, `0`,
//! `false`, or `""` in the tree comes back exactly as stored.
//!
//! # Example
//!
//! ```
//! use data_path::{DataAccessor, Untracked};
//! use serde_json::json;
//!
//! let mut data = DataAccessor::with_root(json!({"user": {}}), Untracked);
//!
//! data.set("user.name", json!("Ada")).unwrap();
//! data.push("user.tags", json!("admin")).unwrap();
//!
//! assert_eq!(data.get("user.name").unwrap(), Some(&json!("Ada")));
//! assert_eq!(data.root().unwrap(), &json!({
//!     "user": {"name": "Ada", "tags": ["admin"]}
//! }));
//! ```
//!
//! The free functions ([`get()`], [`set()`], [`splice()`], …) operate on
//! any `Value` you already hold; [`DataAccessor`] wraps them behind a root
//! container handed over by the host's initialization phase.

mod accessor;
mod array;
mod error;
mod get;
mod mutate;
mod reactive;
mod step;
mod util;

pub use accessor::{DataAccessor, PathArg};
pub use array::{insert, pop, push, remove, shift, splice};
pub use data_path_parser::{parse_path, Path, PathStep, SyntaxError, SyntaxErrorKind};
pub use error::DataPathError;
pub use get::{coalesce, get, get_mut, has};
pub use mutate::{delete, empty, set};
pub use reactive::{Reactivity, Untracked};
pub use util::{format_path, is_child, is_path_equal, parent};
