//! Path grammar rules and the backtracking combinators that drive them.

use std::fmt;

use thiserror::Error;

use crate::cursor::Cursor;
use crate::types::{Path, PathStep};

/// Base messages a syntax error can carry.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    #[error("Unexpected character.")]
    UnexpectedCharacter,
    #[error("Unexpected end of input.")]
    UnexpectedEnd,
}

/// Syntax error with an optional source-column span.
///
/// The span is assigned once, by the outermost alternation that discards the
/// failing attempt; inner layers that already annotated it win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    kind: SyntaxErrorKind,
    span: Option<(usize, usize)>,
}

impl SyntaxError {
    fn new(kind: SyntaxErrorKind) -> Self {
        Self { kind, span: None }
    }

    pub fn kind(&self) -> SyntaxErrorKind {
        self.kind
    }

    /// `(from, to)` column span of the failing input, if annotated.
    pub fn span(&self) -> Option<(usize, usize)> {
        self.span
    }

    fn annotate(&mut self, from: usize, to: usize) {
        if self.span.is_none() {
            self.span = Some((from, to));
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span {
            Some((from, to)) if from == to => {
                write!(f, "{} (near column {})", self.kind, from)
            }
            Some((from, to)) => {
                write!(f, "{} (near column {} up to {})", self.kind, from, to)
            }
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for SyntaxError {}

type Rule = fn(&mut Cursor) -> Result<PathStep, SyntaxError>;

/// Attempt each rule in order, restoring the cursor after a failed one.
/// Every rule failing is "no match", not an error.
fn attempt(cursor: &mut Cursor, rules: &[Rule]) -> Option<PathStep> {
    for rule in rules {
        let snapshot = cursor.save();
        match rule(cursor) {
            Ok(step) => return Some(step),
            Err(_) => cursor.restore(snapshot),
        }
    }
    None
}

/// Like [`attempt`], but every rule failing is a syntax error: the error of
/// the last attempted rule, annotated with the span it failed over.
fn require(cursor: &mut Cursor, rules: &[Rule]) -> Result<PathStep, SyntaxError> {
    let mut last = SyntaxError::new(SyntaxErrorKind::UnexpectedEnd);
    for rule in rules {
        let snapshot = cursor.save();
        match rule(cursor) {
            Ok(step) => return Ok(step),
            Err(mut err) => {
                err.annotate(snapshot, cursor.pos());
                cursor.restore(snapshot);
                last = err;
            }
        }
    }
    Err(last)
}

fn is_word_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

fn unexpected_here(cursor: &Cursor) -> SyntaxError {
    if cursor.is_at_end() {
        SyntaxError::new(SyntaxErrorKind::UnexpectedEnd)
    } else {
        SyntaxError::new(SyntaxErrorKind::UnexpectedCharacter)
    }
}

/// `word := (letter | '_' | '$') (letter | digit | '_' | '$')*`
///
/// Letters are ASCII only.
fn word(cursor: &mut Cursor) -> Result<PathStep, SyntaxError> {
    match cursor.peek(0) {
        Some(c) if is_word_start(c) => {
            let mut name = String::new();
            name.push(c);
            cursor.advance(1);
            while let Some(c) = cursor.peek(0) {
                if !is_word_char(c) {
                    break;
                }
                name.push(c);
                cursor.advance(1);
            }
            Ok(PathStep::Key(name))
        }
        _ => Err(unexpected_here(cursor)),
    }
}

/// `integer := digit+`
fn integer(cursor: &mut Cursor) -> Result<PathStep, SyntaxError> {
    let mut digits = String::new();
    while let Some(c) = cursor.peek(0) {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(c);
        cursor.advance(1);
    }
    if digits.is_empty() {
        return Err(unexpected_here(cursor));
    }
    digits
        .parse::<isize>()
        .map(PathStep::Index)
        .map_err(|_| SyntaxError::new(SyntaxErrorKind::UnexpectedCharacter))
}

/// `quotedString := '\'' charOrEscape* '\'' | '"' charOrEscape* '"'`
fn quoted_string(cursor: &mut Cursor) -> Result<PathStep, SyntaxError> {
    let quote = match cursor.peek(0) {
        Some(c @ ('\'' | '"')) => c,
        _ => return Err(unexpected_here(cursor)),
    };
    cursor.advance(1);
    let mut text = String::new();
    loop {
        match cursor.peek(0) {
            None => return Err(SyntaxError::new(SyntaxErrorKind::UnexpectedEnd)),
            Some(c) if c == quote => {
                cursor.advance(1);
                return Ok(PathStep::Key(text));
            }
            Some('\\') => {
                cursor.advance(1);
                escape(cursor, &mut text)?;
            }
            Some(c) => {
                text.push(c);
                cursor.advance(1);
            }
        }
    }
}

/// One escape sequence, cursor positioned after the backslash.
///
/// Unrecognized escapes emit the following character verbatim, matching the
/// permissiveness of the host's own string-literal grammar.
fn escape(cursor: &mut Cursor, text: &mut String) -> Result<(), SyntaxError> {
    match cursor.peek(0) {
        None => Err(SyntaxError::new(SyntaxErrorKind::UnexpectedEnd)),
        Some('u') => {
            let snapshot = cursor.save();
            cursor.advance(1);
            match hex4(cursor) {
                Some(unit) => {
                    push_code_unit(cursor, text, unit);
                    Ok(())
                }
                None => {
                    // not four hex digits: degrade to the literal `u`
                    cursor.restore(snapshot);
                    cursor.advance(1);
                    text.push('u');
                    Ok(())
                }
            }
        }
        Some(c) => {
            cursor.advance(1);
            text.push(match c {
                'b' => '\u{0008}',
                'f' => '\u{000C}',
                'n' => '\n',
                'r' => '\r',
                't' => '\t',
                // covers \' \" \\ \/ and the unrecognized fallback
                other => other,
            });
            Ok(())
        }
    }
}

fn hex4(cursor: &mut Cursor) -> Option<u16> {
    let mut unit: u16 = 0;
    for offset in 0..4 {
        let digit = cursor.peek(offset)?.to_digit(16)?;
        unit = unit << 4 | digit as u16;
    }
    cursor.advance(4);
    Some(unit)
}

/// `\uXXXX` names one UTF-16 code unit. A high surrogate followed by a low
/// surrogate escape decodes to the combined scalar; a lone surrogate has no
/// Rust representation and becomes U+FFFD.
fn push_code_unit(cursor: &mut Cursor, text: &mut String, unit: u16) {
    if (0xD800..=0xDBFF).contains(&unit) {
        if cursor.peek(0) == Some('\\') && cursor.peek(1) == Some('u') {
            let snapshot = cursor.save();
            cursor.advance(2);
            if let Some(low) = hex4(cursor) {
                if (0xDC00..=0xDFFF).contains(&low) {
                    let combined =
                        0x10000 + ((unit as u32 - 0xD800) << 10) + (low as u32 - 0xDC00);
                    text.push(char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER));
                    return;
                }
            }
            cursor.restore(snapshot);
        }
        text.push(char::REPLACEMENT_CHARACTER);
    } else if (0xDC00..=0xDFFF).contains(&unit) {
        text.push(char::REPLACEMENT_CHARACTER);
    } else {
        text.push(char::from_u32(unit as u32).unwrap_or(char::REPLACEMENT_CHARACTER));
    }
}

/// `accessProperty := '.' word | '[' (integer | quotedString) ']'`
fn access_property(cursor: &mut Cursor) -> Result<PathStep, SyntaxError> {
    match cursor.peek(0) {
        Some('.') => {
            cursor.advance(1);
            require(cursor, &[word])
        }
        Some('[') => {
            cursor.advance(1);
            let step = match attempt(cursor, &[integer, quoted_string]) {
                Some(step) => step,
                None => return Err(unexpected_here(cursor)),
            };
            match cursor.peek(0) {
                Some(']') => {
                    cursor.advance(1);
                    Ok(step)
                }
                _ => Err(unexpected_here(cursor)),
            }
        }
        _ => Err(unexpected_here(cursor)),
    }
}

/// Parse a string-encoded path into its segments.
///
/// `path := word accessProperty*` — the root segment is mandatory, so a
/// successful parse always yields at least one step.
pub fn parse_path(input: &str) -> Result<Path, SyntaxError> {
    let mut cursor = Cursor::new(input);
    let mut path = vec![require(&mut cursor, &[word])?];
    while !cursor.is_at_end() {
        path.push(require(&mut cursor, &[access_property])?);
    }
    Ok(path)
}
