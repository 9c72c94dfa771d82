//! Bound call arguments and binding failures.

use thiserror::Error;

use crate::codec::{FromValue, Value};

/// Call arguments after binding against an [`ArgSpec`](super::ArgSpec).
#[derive(Debug, Clone, PartialEq)]
pub struct BoundArguments {
    function: String,
    named: Vec<(String, Value)>,
    varargs: Vec<Value>,
    varkw: Vec<(String, Value)>,
}

impl BoundArguments {
    pub(crate) fn new(
        function: &str,
        named: Vec<(String, Value)>,
        varargs: Vec<Value>,
        varkw: Vec<(String, Value)>,
    ) -> Self {
        Self {
            function: function.to_owned(),
            named,
            varargs,
            varkw,
        }
    }

    /// Raw value bound to a declared parameter.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.named
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, value)| value)
    }

    /// Converts the value bound to `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::Undeclared`] when the method's specification
    /// has no such parameter and [`ArgumentError::WrongType`] when the value
    /// does not convert.
    pub fn get<T: FromValue>(&self, name: &str) -> Result<T, ArgumentError> {
        let value = self.value(name).ok_or_else(|| ArgumentError::Undeclared {
            function: self.function.clone(),
            name: name.to_owned(),
        })?;
        T::from_value(value).ok_or_else(|| ArgumentError::WrongType {
            function: self.function.clone(),
            name: name.to_owned(),
            expected: T::EXPECTED,
            found: value.type_name(),
        })
    }

    /// Surplus positional values collected by the variadic parameter.
    pub fn varargs(&self) -> &[Value] {
        &self.varargs
    }

    /// Surplus keywords collected by the variadic-keyword parameter.
    pub fn varkw(&self) -> &[(String, Value)] {
        &self.varkw
    }
}

/// Errors raised when call arguments do not fit a method's specification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// More positional values than parameters and no variadic parameter.
    #[error(
        "{function}() takes {expected} positional argument{} but {given} {} given",
        plural_for(.expected),
        was_or_were(.given)
    )]
    TooManyPositional {
        function: String,
        expected: String,
        given: usize,
    },

    /// A parameter received both a positional value and a keyword.
    #[error("{function}() got multiple values for argument '{name}'")]
    MultipleValues { function: String, name: String },

    /// A keyword matched no parameter and there is no variadic keyword.
    #[error("{function}() got an unexpected keyword argument '{name}'")]
    UnexpectedKeyword { function: String, name: String },

    /// Required positional parameters were not supplied.
    #[error(
        "{function}() missing {} required positional argument{}: {}",
        .names.len(),
        plural(.names.len()),
        quoted_list(.names)
    )]
    MissingPositional { function: String, names: Vec<String> },

    /// Required keyword-only parameters were not supplied.
    #[error(
        "{function}() missing {} required keyword-only argument{}: {}",
        .names.len(),
        plural(.names.len()),
        quoted_list(.names)
    )]
    MissingKeywordOnly { function: String, names: Vec<String> },

    /// A bound value has the wrong type for the handler.
    #[error("{function}() argument '{name}' must be {expected}, not {found}")]
    WrongType {
        function: String,
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A handler asked for a parameter its specification does not declare.
    #[error("{function}() has no parameter named '{name}'")]
    Undeclared { function: String, name: String },
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

fn was_or_were(count: &usize) -> &'static str {
    if *count == 1 { "was" } else { "were" }
}

/// Suffix for a rendered count such as `1` or `from 1 to 2`.
fn plural_for(expected: &str) -> &'static str {
    if expected == "1" { "" } else { "s" }
}

/// Formats names as `'a'`, `'a' and 'b'`, or `'a', 'b', and 'c'`.
fn quoted_list(names: &[String]) -> String {
    let quoted: Vec<String> = names.iter().map(|name| format!("'{name}'")).collect();
    match quoted.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}
