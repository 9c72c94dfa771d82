//! Literal encoder.
//!
//! The output follows the peers' literal syntax: single-quoted strings,
//! `True`/`False`/`None`, `[...]` lists, `(...)` tuples with a trailing comma
//! for one member, `{...}` sets and mappings, and `set()` for the empty set.

use std::fmt::{self, Write};

use super::Value;

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => formatter.write_str("None"),
            Self::Bool(true) => formatter.write_str("True"),
            Self::Bool(false) => formatter.write_str("False"),
            Self::Int(number) => write!(formatter, "{number}"),
            Self::Float(number) => write_float(formatter, *number),
            Self::Str(text) => write_string(formatter, text),
            Self::List(items) => write_items(formatter, "[", items, "]"),
            Self::Tuple(items) if items.len() == 1 => write_items(formatter, "(", items, ",)"),
            Self::Tuple(items) => write_items(formatter, "(", items, ")"),
            Self::Set(items) if items.is_empty() => formatter.write_str("set()"),
            Self::Set(items) => write_items(formatter, "{", items, "}"),
            Self::Dict(pairs) => write_pairs(formatter, pairs),
        }
    }
}

fn write_float(formatter: &mut fmt::Formatter<'_>, number: f64) -> fmt::Result {
    if number.is_nan() {
        formatter.write_str("nan")
    } else if number.is_infinite() {
        formatter.write_str(if number.is_sign_negative() { "-inf" } else { "inf" })
    } else {
        // `Debug` always keeps a decimal point or exponent, so the literal
        // reads back as a float rather than an integer.
        write!(formatter, "{number:?}")
    }
}

fn write_string(formatter: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };
    formatter.write_char(quote)?;
    for character in text.chars() {
        match character {
            '\\' => formatter.write_str("\\\\")?,
            '\n' => formatter.write_str("\\n")?,
            '\r' => formatter.write_str("\\r")?,
            '\t' => formatter.write_str("\\t")?,
            _ if character == quote => {
                formatter.write_char('\\')?;
                formatter.write_char(character)?;
            }
            _ if character.is_control() => write_escape(formatter, character)?,
            _ => formatter.write_char(character)?,
        }
    }
    formatter.write_char(quote)
}

fn write_escape(formatter: &mut fmt::Formatter<'_>, character: char) -> fmt::Result {
    let code = u32::from(character);
    if code <= 0xff {
        write!(formatter, "\\x{code:02x}")
    } else if code <= 0xffff {
        write!(formatter, "\\u{code:04x}")
    } else {
        write!(formatter, "\\U{code:08x}")
    }
}

fn write_items(
    formatter: &mut fmt::Formatter<'_>,
    open: &str,
    items: &[Value],
    close: &str,
) -> fmt::Result {
    formatter.write_str(open)?;
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            formatter.write_str(", ")?;
        }
        write!(formatter, "{item}")?;
    }
    formatter.write_str(close)
}

fn write_pairs(formatter: &mut fmt::Formatter<'_>, pairs: &[(Value, Value)]) -> fmt::Result {
    formatter.write_char('{')?;
    for (index, (key, value)) in pairs.iter().enumerate() {
        if index > 0 {
            formatter.write_str(", ")?;
        }
        write!(formatter, "{key}: {value}")?;
    }
    formatter.write_char('}')
}
