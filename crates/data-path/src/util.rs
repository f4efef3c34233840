//! Path helpers: formatting and structural comparisons.

use data_path_parser::PathStep;

/// Format segments back into the string grammar.
///
/// Identifier-shaped keys use dot form (bare for the root segment),
/// everything else the single-quoted bracket form; indices are bracketed.
pub fn format_path(path: &[PathStep]) -> String {
    let mut out = String::new();
    for (i, step) in path.iter().enumerate() {
        match step {
            PathStep::Key(key) if is_identifier(key) => {
                if i > 0 {
                    out.push('.');
                }
                out.push_str(key);
            }
            PathStep::Key(key) => {
                out.push_str("['");
                out.push_str(&escape_single_quoted(key));
                out.push_str("']");
            }
            PathStep::Index(index) => {
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
            }
        }
    }
    out
}

/// Compare two paths for structural equality.
pub fn is_path_equal(p1: &[PathStep], p2: &[PathStep]) -> bool {
    p1 == p2
}

/// Parent path, or `None` for a root-level path (a path of fewer than two
/// segments has no addressable parent).
pub fn parent(path: &[PathStep]) -> Option<&[PathStep]> {
    if path.len() < 2 {
        None
    } else {
        Some(&path[..path.len() - 1])
    }
}

/// Whether `parent` strictly contains `child`.
pub fn is_child(parent: &[PathStep], child: &[PathStep]) -> bool {
    parent.len() < child.len() && parent.iter().zip(child).all(|(a, b)| a == b)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn escape_single_quoted(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            _ => out.push(ch),
        }
    }
    out
}
