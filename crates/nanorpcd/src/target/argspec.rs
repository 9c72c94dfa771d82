//! Hand-authored argument specifications.

use crate::codec::Value;

use super::binding::{ArgumentError, BoundArguments};

/// Argument specification of a remotely callable method.
///
/// Mirrors a full argument spec: ordered positional names, trailing defaults,
/// an optional variadic-positional and variadic-keyword parameter,
/// keyword-only parameters, and free-form annotations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgSpec {
    args: Vec<String>,
    defaults: Vec<Value>,
    varargs: Option<String>,
    varkw: Option<String>,
    kwonlyargs: Vec<String>,
    kwonlydefaults: Vec<(String, Value)>,
    annotations: Vec<(String, String)>,
}

impl ArgSpec {
    /// An empty specification (no parameters).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a required positional parameter.
    ///
    /// Required parameters must precede the ones added with
    /// [`with_default`](Self::with_default); defaults always bind to the last
    /// positional names.
    #[must_use]
    pub fn positional(mut self, name: impl Into<String>) -> Self {
        self.args.push(name.into());
        self
    }

    /// Appends a positional parameter with a default value.
    #[must_use]
    pub fn with_default(mut self, name: impl Into<String>, default: Value) -> Self {
        self.args.push(name.into());
        self.defaults.push(default);
        self
    }

    /// Names the variadic-positional parameter.
    #[must_use]
    pub fn varargs(mut self, name: impl Into<String>) -> Self {
        self.varargs = Some(name.into());
        self
    }

    /// Names the variadic-keyword parameter.
    #[must_use]
    pub fn varkw(mut self, name: impl Into<String>) -> Self {
        self.varkw = Some(name.into());
        self
    }

    /// Appends a keyword-only parameter, optionally with a default.
    #[must_use]
    pub fn keyword_only(mut self, name: impl Into<String>, default: Option<Value>) -> Self {
        let name = name.into();
        if let Some(value) = default {
            self.kwonlydefaults.push((name.clone(), value));
        }
        self.kwonlyargs.push(name);
        self
    }

    /// Records a type annotation for a parameter (or `return`).
    #[must_use]
    pub fn annotate(mut self, name: impl Into<String>, annotation: impl Into<String>) -> Self {
        self.annotations.push((name.into(), annotation.into()));
        self
    }

    /// Positional parameter names in order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Whether any parameter carries an annotation.
    pub fn is_annotated(&self) -> bool {
        !self.annotations.is_empty()
    }

    /// Serialisable form of the specification.
    ///
    /// `defaults` is a tuple or `None`, `kwonlydefaults` a mapping or `None`.
    /// Annotations are free text, so when any exist the whole mapping is
    /// replaced by its encoded string form.
    pub fn to_value(&self) -> Value {
        let strings = |names: &[String]| {
            Value::List(names.iter().map(|name| Value::str(name.as_str())).collect())
        };
        let defaults = if self.defaults.is_empty() {
            Value::None
        } else {
            Value::Tuple(self.defaults.clone())
        };
        let kwonlydefaults = if self.kwonlydefaults.is_empty() {
            Value::None
        } else {
            Value::dict(self.kwonlydefaults.iter().cloned())
        };
        let annotations = if self.is_annotated() {
            let mapping = Value::dict(
                self.annotations
                    .iter()
                    .map(|(name, text)| (name.as_str(), Value::str(text.as_str()))),
            );
            Value::Str(mapping.to_string())
        } else {
            Value::Dict(Vec::new())
        };

        Value::dict([
            ("args", strings(&self.args)),
            ("varargs", Value::from(self.varargs.clone())),
            ("varkw", Value::from(self.varkw.clone())),
            ("defaults", defaults),
            ("kwonlyargs", strings(&self.kwonlyargs)),
            ("kwonlydefaults", kwonlydefaults),
            ("annotations", annotations),
        ])
    }

    /// Binds call arguments to parameter names.
    ///
    /// Positional values fill `args` in order and overflow into `varargs`.
    /// Keywords match positional or keyword-only names and overflow into
    /// `varkw`. Missing parameters take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an [`ArgumentError`] naming `function` when the call does not
    /// fit the specification.
    pub fn bind(
        &self,
        function: &str,
        args: Vec<Value>,
        kwargs: Vec<(String, Value)>,
    ) -> Result<BoundArguments, ArgumentError> {
        let mut slots: Vec<Option<Value>> = vec![None; self.args.len()];
        let mut kwonly: Vec<Option<Value>> = vec![None; self.kwonlyargs.len()];
        let mut extra_positional = Vec::new();
        let mut extra_keywords = Vec::new();

        let given = args.len();
        for (index, value) in args.into_iter().enumerate() {
            match slots.get_mut(index) {
                Some(slot) => *slot = Some(value),
                None => extra_positional.push(value),
            }
        }
        if !extra_positional.is_empty() && self.varargs.is_none() {
            return Err(ArgumentError::TooManyPositional {
                function: function.to_owned(),
                expected: self.positional_range(),
                given,
            });
        }

        for (name, value) in kwargs {
            if let Some(index) = self.args.iter().position(|arg| *arg == name) {
                match slots.get_mut(index) {
                    Some(slot) if slot.is_none() => *slot = Some(value),
                    _ => {
                        return Err(ArgumentError::MultipleValues {
                            function: function.to_owned(),
                            name,
                        });
                    }
                }
            } else if let Some(index) = self.kwonlyargs.iter().position(|arg| *arg == name) {
                if let Some(slot) = kwonly.get_mut(index) {
                    *slot = Some(value);
                }
            } else if self.varkw.is_some() {
                extra_keywords.push((name, value));
            } else {
                return Err(ArgumentError::UnexpectedKeyword {
                    function: function.to_owned(),
                    name,
                });
            }
        }

        let named = self.fill_positional(function, slots)?;
        let keyword_only = self.fill_keyword_only(function, kwonly)?;

        Ok(BoundArguments::new(
            function,
            named.into_iter().chain(keyword_only).collect(),
            extra_positional,
            extra_keywords,
        ))
    }

    fn fill_positional(
        &self,
        function: &str,
        slots: Vec<Option<Value>>,
    ) -> Result<Vec<(String, Value)>, ArgumentError> {
        let first_default = self.args.len().saturating_sub(self.defaults.len());
        let mut bound = Vec::with_capacity(slots.len());
        let mut missing = Vec::new();
        for (index, (name, slot)) in self.args.iter().zip(slots).enumerate() {
            let value = slot.or_else(|| {
                index
                    .checked_sub(first_default)
                    .and_then(|offset| self.defaults.get(offset).cloned())
            });
            match value {
                Some(value) => bound.push((name.clone(), value)),
                None => missing.push(name.clone()),
            }
        }
        if missing.is_empty() {
            Ok(bound)
        } else {
            Err(ArgumentError::MissingPositional {
                function: function.to_owned(),
                names: missing,
            })
        }
    }

    fn fill_keyword_only(
        &self,
        function: &str,
        slots: Vec<Option<Value>>,
    ) -> Result<Vec<(String, Value)>, ArgumentError> {
        let mut bound = Vec::with_capacity(slots.len());
        let mut missing = Vec::new();
        for (name, slot) in self.kwonlyargs.iter().zip(slots) {
            let value = slot.or_else(|| {
                self.kwonlydefaults
                    .iter()
                    .find(|(candidate, _)| candidate == name)
                    .map(|(_, value)| value.clone())
            });
            match value {
                Some(value) => bound.push((name.clone(), value)),
                None => missing.push(name.clone()),
            }
        }
        if missing.is_empty() {
            Ok(bound)
        } else {
            Err(ArgumentError::MissingKeywordOnly {
                function: function.to_owned(),
                names: missing,
            })
        }
    }

    fn positional_range(&self) -> String {
        let maximum = self.args.len();
        let minimum = maximum.saturating_sub(self.defaults.len());
        if minimum == maximum {
            maximum.to_string()
        } else {
            format!("from {minimum} to {maximum}")
        }
    }
}
