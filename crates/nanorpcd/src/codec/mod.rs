//! Text codec for protocol lines.
//!
//! Values are written as literals in the peers' object notation and read
//! back with a small recursive-descent parser. Decoding is deliberately
//! permissive: a line that does not start with `{` or `[`, or that fails to
//! parse, comes back as a plain string and the dispatcher rejects it later.
//!
//! ```text
//! {'status': 'ok', 'ret': 13}
//! {'action': 'call', 'name': 'add', 'args': (4, 9), 'kwargs': {}}
//! ```

mod encoder;
mod errors;
mod parser;
mod value;


pub use self::errors::CodecError;
pub use self::parser::parse;
pub use self::value::{FromValue, Value};

/// Encodes a value as a single-line literal.
#[must_use]
pub fn encode(value: &Value) -> String {
    value.to_string()
}

/// Decodes a protocol line.
///
/// Lines starting with `{` or `[` are parsed as literals; everything else,
/// including structured text that fails to parse, is returned verbatim as
/// [`Value::Str`].
#[must_use]
pub fn decode(line: &str) -> Value {
    if line.starts_with(['{', '[']) {
        if let Ok(value) = parse(line) {
            return value;
        }
    }
    Value::Str(line.to_owned())
}
