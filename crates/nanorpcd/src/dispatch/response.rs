//! Status envelopes written back for every request.

use crate::codec::Value;

use super::errors::DispatchError;

/// Outcome of one request as sent to the client.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// `{'status': 'ok', 'ret': ...}`
    Ok { ret: Value },
    /// `{'status': 'failed', 'exception': ...}`
    Failed { exception: String },
}

impl Envelope {
    /// Wraps a dispatch result.
    pub fn from_result(result: Result<Value, DispatchError>) -> Self {
        match result {
            Ok(ret) => Self::Ok { ret },
            Err(error) => Self::Failed {
                exception: error.to_string(),
            },
        }
    }

    /// Whether the request succeeded.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    /// The wire form of the envelope.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Ok { ret } => Value::dict([("status", Value::str("ok")), ("ret", ret.clone())]),
            Self::Failed { exception } => Value::dict([
                ("status", Value::str("failed")),
                ("exception", Value::str(exception.as_str())),
            ]),
        }
    }
}
