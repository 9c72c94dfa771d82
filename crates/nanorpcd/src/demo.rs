//! The example adder served by the `nanorpcd` binary.

use std::sync::Arc;

use tracing::info;

use crate::codec::Value;
use crate::target::{
    ArgSpec, BoundArguments, MethodError, MethodTable, TableTarget, TargetRegistry,
};

/// Registry name of the demo target.
pub const EXAMPLE_ADDER: &str = "example_adder";

/// Description advertised by the demo server.
pub const DESCRIPTION: &str = "example adder nano_aqctl";

const DEMO_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::demo");

/// Stateless demo object with `add` and `print` methods.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExampleAdder;

impl ExampleAdder {
    /// The demo's method table.
    pub fn table() -> MethodTable<Self> {
        MethodTable::new("ExampleAdder")
            .method(
                "add",
                ArgSpec::new().positional("a").positional("b"),
                Some("Add two numbers and return result"),
                |_: &Self, args: &BoundArguments| {
                    let a: Value = args.get("a")?;
                    let b: Value = args.get("b")?;
                    add_values(&a, &b)
                },
            )
            .method(
                "print",
                ArgSpec::new().positional("msg"),
                Some("Print message"),
                |_: &Self, args: &BoundArguments| {
                    let message: Value = args.get("msg")?;
                    match message.as_str() {
                        Some(text) => info!(target: DEMO_TARGET, message = text, "print"),
                        None => info!(target: DEMO_TARGET, message = %message, "print"),
                    }
                    Ok(Value::None)
                },
            )
    }
}

/// Registry holding a single shared [`ExampleAdder`].
pub fn example_registry() -> TargetRegistry {
    let target = TableTarget::new(ExampleAdder, Arc::new(ExampleAdder::table()));
    info!(target: DEMO_TARGET, "ExampleAdder initialized");
    TargetRegistry::new().with_instance(EXAMPLE_ADDER, Arc::new(target))
}

/// `a + b` over the value domain: numeric addition and sequence
/// concatenation.
///
/// # Errors
///
/// Returns a [`MethodError`] on integer overflow or when the operand types
/// do not support addition.
pub fn add_values(a: &Value, b: &Value) -> Result<Value, MethodError> {
    match (a, b) {
        (Value::Str(left), Value::Str(right)) => Ok(Value::Str(format!("{left}{right}"))),
        (Value::List(left), Value::List(right)) => Ok(Value::List(concat(left, right))),
        (Value::Tuple(left), Value::Tuple(right)) => Ok(Value::Tuple(concat(left, right))),
        _ => match (integer(a), integer(b)) {
            (Some(left), Some(right)) => left
                .checked_add(right)
                .map(Value::Int)
                .ok_or_else(|| MethodError::new("integer overflow in add")),
            _ => match (float(a), float(b)) {
                (Some(left), Some(right)) => Ok(Value::Float(left + right)),
                _ => Err(MethodError::new(format!(
                    "unsupported operand type(s) for +: '{}' and '{}'",
                    a.type_name(),
                    b.type_name()
                ))),
            },
        },
    }
}

fn concat(left: &[Value], right: &[Value]) -> Vec<Value> {
    left.iter().chain(right).cloned().collect()
}

fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Int(number) => Some(*number),
        Value::Bool(flag) => Some(i64::from(*flag)),
        _ => None,
    }
}

fn float(value: &Value) -> Option<f64> {
    match value {
        Value::Float(number) => Some(*number),
        other => integer(other).map(|number| number as f64),
    }
}
