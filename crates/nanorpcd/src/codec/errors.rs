//! Error types for literal parsing.

use thiserror::Error;

/// Errors raised by the strict literal parser.
///
/// Offsets are byte positions into the parsed text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Input ended inside a literal.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEnd { offset: usize },

    /// A character that cannot start or continue the current literal.
    #[error("unexpected character {found:?} at offset {offset}")]
    UnexpectedChar { offset: usize, found: char },

    /// A numeric literal that is neither an integer nor a float.
    #[error("invalid number literal {literal:?} at offset {offset}")]
    InvalidNumber { offset: usize, literal: String },

    /// An integer literal outside the signed 64-bit range.
    #[error("integer literal {literal} at offset {offset} does not fit in 64 bits")]
    IntegerOverflow { offset: usize, literal: String },

    /// A malformed escape sequence inside a string literal.
    #[error("invalid escape sequence at offset {offset}")]
    InvalidEscape { offset: usize },

    /// A bare identifier outside the fixed token set.
    #[error("unknown name {name:?} at offset {offset}")]
    UnknownName { offset: usize, name: String },

    /// A list, set, or mapping used as a set member or mapping key.
    #[error("unhashable type '{type_name}' at offset {offset}")]
    Unhashable {
        offset: usize,
        type_name: &'static str,
    },

    /// Containers nested beyond the parser's depth limit.
    #[error("nesting deeper than {limit} levels at offset {offset}")]
    TooDeep { offset: usize, limit: usize },

    /// Non-whitespace text after a complete literal.
    #[error("trailing characters at offset {offset}")]
    TrailingInput { offset: usize },
}
