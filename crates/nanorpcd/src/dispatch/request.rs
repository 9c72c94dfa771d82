//! Interpretation of decoded request values.
//!
//! A request is a mapping with an `action` key. `call` requests must also
//! carry `name`, `args`, and `kwargs`.

use crate::codec::{Value, encode};

use super::errors::DispatchError;

/// Action names understood by the dispatcher.
pub(crate) const METHOD_LIST_ACTION: &str = "get_rpc_method_list";
pub(crate) const CALL_ACTION: &str = "call";

/// A validated request.
#[derive(Debug, Clone, PartialEq)]
pub enum RpcRequest {
    /// Describe the target's public methods.
    MethodList,
    /// Invoke a method.
    Call {
        name: String,
        args: Vec<Value>,
        kwargs: Vec<(String, Value)>,
    },
}

impl RpcRequest {
    /// Interprets a decoded line as a request.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::MalformedRequest` if the value is not a
    /// mapping or a field has the wrong shape, and
    /// `DispatchError::UnknownAction` if `action` is not a known action
    /// name.
    pub fn from_value(value: &Value) -> Result<Self, DispatchError> {
        if !matches!(value, Value::Dict(_)) {
            return Err(DispatchError::malformed(format!(
                "expected a mapping, got {}",
                value.type_name()
            )));
        }
        let action = value
            .get("action")
            .ok_or_else(|| DispatchError::malformed("missing 'action'"))?;

        match action.as_str() {
            Some(METHOD_LIST_ACTION) => Ok(Self::MethodList),
            Some(CALL_ACTION) => Self::call(value),
            Some(other) => Err(DispatchError::unknown_action(other)),
            None => Err(DispatchError::unknown_action(encode(action))),
        }
    }

    fn call(value: &Value) -> Result<Self, DispatchError> {
        let name = match value.get("name") {
            Some(Value::Str(name)) => name.clone(),
            Some(other) => {
                return Err(DispatchError::malformed(format!(
                    "'name' must be str, not {}",
                    other.type_name()
                )));
            }
            None => return Err(DispatchError::malformed("missing 'name'")),
        };

        let args = match value.get("args") {
            None => return Err(DispatchError::malformed("missing 'args'")),
            Some(Value::List(items) | Value::Tuple(items)) => items.clone(),
            Some(other) => {
                return Err(DispatchError::malformed(format!(
                    "'args' must be a sequence, not {}",
                    other.type_name()
                )));
            }
        };

        let kwargs = match value.get("kwargs") {
            None => return Err(DispatchError::malformed("missing 'kwargs'")),
            Some(Value::Dict(pairs)) => keyword_pairs(pairs)?,
            Some(other) => {
                return Err(DispatchError::malformed(format!(
                    "'kwargs' must be a mapping, not {}",
                    other.type_name()
                )));
            }
        };

        Ok(Self::Call { name, args, kwargs })
    }
}

fn keyword_pairs(pairs: &[(Value, Value)]) -> Result<Vec<(String, Value)>, DispatchError> {
    pairs
        .iter()
        .map(|(key, value)| match key {
            Value::Str(name) => Ok((name.clone(), value.clone())),
            other => Err(DispatchError::malformed(format!(
                "keywords must be strings, not {}",
                other.type_name()
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::codec::decode;

    #[rstest]
    fn parses_method_list() {
        let request = RpcRequest::from_value(&decode("{'action': 'get_rpc_method_list'}"));
        assert_eq!(request, Ok(RpcRequest::MethodList));
    }

    #[rstest]
    fn parses_call_with_list_arguments() {
        let line = r#"{"action": "call", "name": "add", "args": [4, 9], "kwargs": {"x": None}}"#;
        let request = RpcRequest::from_value(&decode(line));
        assert_eq!(
            request,
            Ok(RpcRequest::Call {
                name: "add".to_owned(),
                args: vec![Value::Int(4), Value::Int(9)],
                kwargs: vec![("x".to_owned(), Value::None)],
            })
        );
    }

    #[rstest]
    #[case::bogus("{'action': 'bogus'}", "Unknown action: bogus")]
    #[case::not_a_string("{'action': 3}", "Unknown action: 3")]
    #[case::raw_string("hello", "malformed request: expected a mapping, got str")]
    #[case::list("[1, 2]", "malformed request: expected a mapping, got list")]
    #[case::no_action("{'name': 'add'}", "malformed request: missing 'action'")]
    #[case::no_name("{'action': 'call'}", "malformed request: missing 'name'")]
    #[case::no_arguments(
        "{'action': 'call', 'name': 'ping'}",
        "malformed request: missing 'args'"
    )]
    #[case::no_keywords(
        "{'action': 'call', 'name': 'ping', 'args': []}",
        "malformed request: missing 'kwargs'"
    )]
    #[case::bad_args(
        "{'action': 'call', 'name': 'f', 'args': 4, 'kwargs': {}}",
        "malformed request: 'args' must be a sequence, not int"
    )]
    #[case::bad_keyword(
        "{'action': 'call', 'name': 'f', 'args': [], 'kwargs': {1: 2}}",
        "malformed request: keywords must be strings, not int"
    )]
    fn rejects_unusable_requests(#[case] line: &str, #[case] message: &str) {
        let error = RpcRequest::from_value(&decode(line)).expect_err("request should fail");
        assert_eq!(error.to_string(), message);
    }
}
