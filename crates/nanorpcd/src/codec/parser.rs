//! Recursive-descent parser for the literal grammar.
//!
//! Only literals are accepted: strings, numbers, the fixed name tokens, and
//! lists, tuples, sets, and mappings of literals. Anything resembling an
//! expression (calls other than `set()`, operators, attribute access) is a
//! parse error.

use super::{CodecError, Value};

/// Maximum container nesting accepted from a peer.
pub(crate) const MAX_DEPTH: usize = 128;

/// Parses `text` as exactly one literal surrounded by optional whitespace.
///
/// # Errors
///
/// Returns a [`CodecError`] describing the first offending position.
pub fn parse(text: &str) -> Result<Value, CodecError> {
    let mut parser = Parser::new(text);
    let value = parser.value()?;
    parser.skip_whitespace();
    if parser.position < text.len() {
        return Err(CodecError::TrailingInput {
            offset: parser.position,
        });
    }
    Ok(value)
}

struct Parser<'a> {
    text: &'a str,
    position: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            position: 0,
            depth: 0,
        }
    }

    fn rest(&self) -> &'a str {
        self.text.get(self.position..).unwrap_or_default()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let next = self.peek()?;
        self.position += next.len_utf8();
        Some(next)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.position += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), CodecError> {
        let offset = self.position;
        match self.bump() {
            Some(found) if found == expected => Ok(()),
            Some(found) => Err(CodecError::UnexpectedChar { offset, found }),
            None => Err(CodecError::UnexpectedEnd { offset }),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn value(&mut self) -> Result<Value, CodecError> {
        self.skip_whitespace();
        let offset = self.position;
        match self.peek() {
            None => Err(CodecError::UnexpectedEnd { offset }),
            Some('[') => self.nested(Self::list),
            Some('(') => self.nested(Self::parenthesised),
            Some('{') => self.nested(Self::braced),
            Some('\'' | '"') => self.string().map(Value::Str),
            Some(first) if first.is_ascii_digit() || matches!(first, '+' | '-' | '.') => {
                self.number()
            }
            Some(first) if first.is_ascii_alphabetic() || first == '_' => self.name(),
            Some(found) => Err(CodecError::UnexpectedChar { offset, found }),
        }
    }

    fn nested(
        &mut self,
        parse_container: fn(&mut Self) -> Result<Value, CodecError>,
    ) -> Result<Value, CodecError> {
        if self.depth >= MAX_DEPTH {
            return Err(CodecError::TooDeep {
                offset: self.position,
                limit: MAX_DEPTH,
            });
        }
        self.depth += 1;
        let result = parse_container(self);
        self.depth -= 1;
        result
    }

    /// Parses comma-separated values up to `close`, allowing a trailing comma.
    /// Reports whether any comma was seen so `(x)` and `(x,)` can differ.
    fn sequence(&mut self, close: char) -> Result<(Vec<Value>, bool), CodecError> {
        let mut items = Vec::new();
        let mut saw_comma = false;
        loop {
            self.skip_whitespace();
            if self.eat(close) {
                return Ok((items, saw_comma));
            }
            items.push(self.value()?);
            self.skip_whitespace();
            if self.eat(',') {
                saw_comma = true;
                continue;
            }
            self.expect(close)?;
            return Ok((items, saw_comma));
        }
    }

    fn list(&mut self) -> Result<Value, CodecError> {
        self.expect('[')?;
        let (items, _) = self.sequence(']')?;
        Ok(Value::List(items))
    }

    fn parenthesised(&mut self) -> Result<Value, CodecError> {
        self.expect('(')?;
        let (mut items, saw_comma) = self.sequence(')')?;
        if !saw_comma && items.len() == 1 {
            if let Some(inner) = items.pop() {
                return Ok(inner);
            }
        }
        Ok(Value::Tuple(items))
    }

    fn braced(&mut self) -> Result<Value, CodecError> {
        self.expect('{')?;
        self.skip_whitespace();
        if self.eat('}') {
            return Ok(Value::Dict(Vec::new()));
        }
        let first_offset = self.position;
        let first = self.value()?;
        self.skip_whitespace();
        if self.eat(':') {
            self.mapping(first, first_offset)
        } else {
            self.set_members(first, first_offset)
        }
    }

    fn mapping(&mut self, first_key: Value, first_offset: usize) -> Result<Value, CodecError> {
        let mut entries = Vec::new();
        let mut key = first_key;
        let mut key_offset = first_offset;
        loop {
            require_hashable(&key, key_offset)?;
            let value = self.value()?;
            entries.push((key, value));
            self.skip_whitespace();
            if !self.eat(',') {
                self.expect('}')?;
                break;
            }
            self.skip_whitespace();
            if self.eat('}') {
                break;
            }
            key_offset = self.position;
            key = self.value()?;
            self.skip_whitespace();
            self.expect(':')?;
        }
        Ok(Value::dict(entries))
    }

    fn set_members(&mut self, first: Value, first_offset: usize) -> Result<Value, CodecError> {
        require_hashable(&first, first_offset)?;
        let mut members = vec![first];
        loop {
            if !self.eat(',') {
                self.expect('}')?;
                break;
            }
            self.skip_whitespace();
            if self.eat('}') {
                break;
            }
            let member_offset = self.position;
            let member = self.value()?;
            require_hashable(&member, member_offset)?;
            members.push(member);
            self.skip_whitespace();
        }
        Ok(Value::set(members))
    }

    fn string(&mut self) -> Result<String, CodecError> {
        let start = self.position;
        let Some(quote) = self.bump() else {
            return Err(CodecError::UnexpectedEnd { offset: start });
        };
        let mut text = String::new();
        loop {
            let offset = self.position;
            match self.bump() {
                None => return Err(CodecError::UnexpectedEnd { offset }),
                Some(found) if found == quote => return Ok(text),
                Some('\\') => self.escape(&mut text)?,
                Some(found @ ('\n' | '\r')) => {
                    return Err(CodecError::UnexpectedChar { offset, found });
                }
                Some(other) => text.push(other),
            }
        }
    }

    fn escape(&mut self, text: &mut String) -> Result<(), CodecError> {
        let offset = self.position;
        let Some(code) = self.bump() else {
            return Err(CodecError::UnexpectedEnd { offset });
        };
        match code {
            '\n' => {}
            '\\' | '\'' | '"' => text.push(code),
            'n' => text.push('\n'),
            'r' => text.push('\r'),
            't' => text.push('\t'),
            'a' => text.push('\u{07}'),
            'b' => text.push('\u{08}'),
            'f' => text.push('\u{0c}'),
            'v' => text.push('\u{0b}'),
            'x' => text.push(self.hex_escape(2, offset)?),
            'u' => text.push(self.hex_escape(4, offset)?),
            'U' => text.push(self.hex_escape(8, offset)?),
            '0'..='7' => text.push(self.octal_escape(code, offset)?),
            // Unrecognised escapes keep their backslash.
            other => {
                text.push('\\');
                text.push(other);
            }
        }
        Ok(())
    }

    fn hex_escape(&mut self, digits: usize, offset: usize) -> Result<char, CodecError> {
        let mut code: u32 = 0;
        for _ in 0..digits {
            let digit = self
                .bump()
                .and_then(|character| character.to_digit(16))
                .ok_or(CodecError::InvalidEscape { offset })?;
            code = code * 16 + digit;
        }
        char::from_u32(code).ok_or(CodecError::InvalidEscape { offset })
    }

    fn octal_escape(&mut self, first: char, offset: usize) -> Result<char, CodecError> {
        let mut code = first.to_digit(8).ok_or(CodecError::InvalidEscape { offset })?;
        for _ in 0..2 {
            match self.peek().and_then(|character| character.to_digit(8)) {
                Some(digit) => {
                    self.bump();
                    code = code * 8 + digit;
                }
                None => break,
            }
        }
        char::from_u32(code).ok_or(CodecError::InvalidEscape { offset })
    }

    fn number(&mut self) -> Result<Value, CodecError> {
        let start = self.position;
        let negative = self.eat('-');
        if !negative {
            self.eat('+');
        }
        self.skip_whitespace();
        if self.peek().is_some_and(|character| character.is_ascii_alphabetic()) {
            return match self.name()? {
                Value::Float(number) if negative => Ok(Value::Float(-number)),
                Value::Float(number) => Ok(Value::Float(number)),
                _ => Err(CodecError::InvalidNumber {
                    offset: start,
                    literal: self.text.get(start..self.position).unwrap_or_default().to_owned(),
                }),
            };
        }

        let digits_start = self.position;
        let mut is_float = false;
        let mut saw_digit = self.digits();
        if self.eat('.') {
            is_float = true;
            saw_digit |= self.digits();
        }
        if saw_digit && matches!(self.peek(), Some('e' | 'E')) {
            is_float = true;
            self.bump();
            if !self.eat('-') {
                self.eat('+');
            }
            saw_digit = self.digits();
        }

        let digits = self.text.get(digits_start..self.position).unwrap_or_default();
        let literal = if negative {
            format!("-{digits}")
        } else {
            digits.to_owned()
        };
        if !saw_digit {
            return Err(CodecError::InvalidNumber {
                offset: start,
                literal,
            });
        }

        if is_float {
            literal
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| CodecError::InvalidNumber {
                    offset: start,
                    literal,
                })
        } else {
            literal
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| CodecError::IntegerOverflow {
                    offset: start,
                    literal,
                })
        }
    }

    fn digits(&mut self) -> bool {
        let mut any = false;
        while self.peek().is_some_and(|character| character.is_ascii_digit()) {
            self.bump();
            any = true;
        }
        any
    }

    fn name(&mut self) -> Result<Value, CodecError> {
        let start = self.position;
        while self
            .peek()
            .is_some_and(|character| character.is_ascii_alphanumeric() || character == '_')
        {
            self.bump();
        }
        let name = self.text.get(start..self.position).unwrap_or_default();
        match name {
            "True" | "true" => Ok(Value::Bool(true)),
            "False" | "false" => Ok(Value::Bool(false)),
            "None" | "null" => Ok(Value::None),
            "inf" => Ok(Value::Float(f64::INFINITY)),
            "nan" => Ok(Value::Float(f64::NAN)),
            "set" => {
                self.skip_whitespace();
                self.expect('(')?;
                self.skip_whitespace();
                self.expect(')')?;
                Ok(Value::Set(Vec::new()))
            }
            other => Err(CodecError::UnknownName {
                offset: start,
                name: other.to_owned(),
            }),
        }
    }
}

fn require_hashable(value: &Value, offset: usize) -> Result<(), CodecError> {
    if value.is_hashable() {
        Ok(())
    } else {
        Err(CodecError::Unhashable {
            offset,
            type_name: value.type_name(),
        })
    }
}
