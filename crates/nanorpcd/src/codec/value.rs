//! The value domain carried by the wire protocol.

/// A literal value that the codec can encode and decode.
///
/// Mappings and sets keep insertion order so encoding is reproducible. Use
/// [`Value::dict`] and [`Value::set`] to build them with the usual
/// duplicate-key and duplicate-member rules applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The null token (`None`).
    None,
    /// `True` or `False`.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point number, including `inf` and `nan`.
    Float(f64),
    /// Unicode string.
    Str(String),
    /// Ordered, bracket-delimited sequence.
    List(Vec<Value>),
    /// Fixed-size, parenthesised sequence.
    Tuple(Vec<Value>),
    /// Unordered collection of distinct hashable members.
    Set(Vec<Value>),
    /// Mapping of hashable keys to values.
    Dict(Vec<(Value, Value)>),
}

impl Value {
    /// Builds a string value.
    pub fn str(text: impl Into<String>) -> Self {
        Self::Str(text.into())
    }

    /// Builds a mapping. A repeated key keeps its first position and takes the
    /// last value, as a literal `{k: 1, k: 2}` would.
    pub fn dict<K, I>(entries: I) -> Self
    where
        K: Into<Value>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut pairs: Vec<(Value, Value)> = Vec::new();
        for (key, value) in entries {
            let key = key.into();
            match pairs.iter_mut().find(|(existing, _)| *existing == key) {
                Some(slot) => slot.1 = value,
                None => pairs.push((key, value)),
            }
        }
        Self::Dict(pairs)
    }

    /// Builds a set, dropping repeated members.
    pub fn set<I>(members: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        let mut unique: Vec<Value> = Vec::new();
        for member in members {
            if !unique.contains(&member) {
                unique.push(member);
            }
        }
        Self::Set(unique)
    }

    /// Name of the value's type as the protocol's peers spell it.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "NoneType",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::List(_) => "list",
            Self::Tuple(_) => "tuple",
            Self::Set(_) => "set",
            Self::Dict(_) => "dict",
        }
    }

    /// Whether the value may be used as a mapping key or set member.
    pub fn is_hashable(&self) -> bool {
        match self {
            Self::List(_) | Self::Set(_) | Self::Dict(_) => false,
            Self::Tuple(items) => items.iter().all(Self::is_hashable),
            _ => true,
        }
    }

    /// Looks up a string key in a mapping.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Dict(pairs) => pairs.iter().find_map(|(candidate, value)| match candidate {
                Self::Str(text) if text == key => Some(value),
                _ => None,
            }),
            _ => None,
        }
    }

    /// Returns the text of a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the members of a list, tuple, or set.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) | Self::Tuple(items) | Self::Set(items) => Some(items),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

/// Conversion from a [`Value`] into a concrete Rust type.
///
/// Method handlers use this through
/// [`BoundArguments::get`](crate::target::BoundArguments::get).
pub trait FromValue: Sized {
    /// Type name used in mismatch messages.
    const EXPECTED: &'static str;

    /// Converts the value, returning `None` on a type mismatch.
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    const EXPECTED: &'static str = "any value";

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for i64 {
    const EXPECTED: &'static str = "int";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(number) => Some(*number),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "float";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(number) => Some(*number),
            Value::Int(number) => Some(*number as f64),
            _ => None,
        }
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "bool";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(flag) => Some(*flag),
            _ => None,
        }
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "str";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl FromValue for Vec<Value> {
    const EXPECTED: &'static str = "list or tuple";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::List(items) | Value::Tuple(items) => Some(items.clone()),
            _ => None,
        }
    }
}
