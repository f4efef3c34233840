//! String-encoded data path parsing.
//!
//! Converts paths like `user.addresses[0]['home town']` into an ordered
//! sequence of [`PathStep`] segments: mapping keys and sequence indices.
//! The grammar is deliberately small — identifier words, dot access, and
//! bracket access with an integer or a quoted string:
//!
//! ```text
//! path            := word accessProperty*
//! accessProperty  := '.' word | '[' ( integer | quotedString ) ']'
//! word            := (letter | '_' | '$') (letter | digit | '_' | '$')*
//! ```
//!
//! # Example
//!
//! ```
//! use data_path_parser::{parse_path, PathStep};
//!
//! let path = parse_path("user.addresses[0]").unwrap();
//! assert_eq!(path, vec![
//!     PathStep::Key("user".to_string()),
//!     PathStep::Key("addresses".to_string()),
//!     PathStep::Index(0),
//! ]);
//! ```
//!
//! Failures carry the source column of the offending input:
//!
//! ```
//! use data_path_parser::parse_path;
//!
//! let err = parse_path("user..name").unwrap_err();
//! assert_eq!(err.to_string(), "Unexpected character. (near column 5)");
//! ```

mod cursor;
mod parser;
mod types;

pub use parser::{parse_path, SyntaxError, SyntaxErrorKind};
pub use types::{Path, PathStep};
