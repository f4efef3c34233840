//! Error types for path navigation and mutation.

use thiserror::Error;

pub use data_path_parser::SyntaxError;

/// Errors produced by path navigation, mutation, and the accessor surface.
///
/// The message strings are part of the public contract; hosts surface them
/// to users verbatim.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DataPathError {
    #[error("Path must not be empty")]
    EmptyPath,

    /// Raised by embedders whose bindings accept untyped paths; the typed
    /// Rust surface cannot produce it.
    #[error("Path must be an array.")]
    PathNotAnArray,

    /// Same, for surfaces that also accept the string form.
    #[error("Path must be an array or a string.")]
    PathNotAnArrayOrString,

    #[error("New properties cannot be created at the root level of the data object.")]
    RootPropertyCreate,

    #[error("Properties cannot be deleted from the root level of the data object.")]
    RootPropertyDelete,

    #[error("Path does not lead to an array.")]
    NotAnArray,

    #[error("Negative indexes are not allowed.")]
    NegativeIndex,

    #[error("No items to insert.")]
    NoItemsToInsert,

    #[error("Value cannot be emptied. Type not supported.")]
    UnsupportedEmptyType,

    #[error("Data object is not ready yet.")]
    DataNotReady,

    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}
