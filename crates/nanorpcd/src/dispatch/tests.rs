//! Dispatcher behaviour against a small table-driven target.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::codec::{Value, decode, encode};
use crate::target::{ArgSpec, MethodError, MethodTable, TableTarget, Target};

struct Calculator;

#[fixture]
fn calculator() -> TableTarget<Calculator> {
    let table = MethodTable::new("Calculator")
        .with_doc("Integer arithmetic.")
        .method(
            "add",
            ArgSpec::new().positional("a").positional("b"),
            Some("Returns a + b."),
            |_: &Calculator, args| {
                let a: i64 = args.get("a")?;
                let b: i64 = args.get("b")?;
                a.checked_add(b)
                    .map(Value::Int)
                    .ok_or_else(|| MethodError::new("integer overflow"))
            },
        )
        .method("_internal", ArgSpec::new(), None, |_, _| Ok(Value::None))
        .method("explode", ArgSpec::new(), None, |_, _| {
            panic!("boom");
        });
    TableTarget::new(Calculator, Arc::new(table))
}

fn respond(target: &dyn Target, line: &str) -> String {
    encode(&ActionRouter::new().respond(target, &decode(line)).to_value())
}

#[rstest]
fn calls_method_with_positional_arguments(calculator: TableTarget<Calculator>) {
    let reply = respond(
        &calculator,
        r#"{"action": "call", "name": "add", "args": [4, 9], "kwargs": {}}"#,
    );
    assert_eq!(reply, "{'status': 'ok', 'ret': 13}");
}

#[rstest]
fn calls_method_with_keywords(calculator: TableTarget<Calculator>) {
    let reply = respond(
        &calculator,
        "{'action': 'call', 'name': 'add', 'args': (1,), 'kwargs': {'b': 2}}",
    );
    assert_eq!(reply, "{'status': 'ok', 'ret': 3}");
}

#[rstest]
#[case::missing_method(
    "{'action': 'call', 'name': 'divide', 'args': [], 'kwargs': {}}",
    "'Calculator' object has no attribute 'divide'"
)]
#[case::unknown_action("{'action': 'bogus'}", "Unknown action: bogus")]
#[case::arity(
    "{'action': 'call', 'name': 'add', 'args': [1], 'kwargs': {}}",
    "add() missing 1 required positional argument: 'b'"
)]
#[case::method_failure(
    "{'action': 'call', 'name': 'add', 'args': [9223372036854775807, 1], 'kwargs': {}}",
    "integer overflow"
)]
#[case::panic(
    "{'action': 'call', 'name': 'explode', 'args': [], 'kwargs': {}}",
    "method 'explode' panicked"
)]
#[case::missing_arguments(
    "{'action': 'call', 'name': 'add'}",
    "malformed request: missing 'args'"
)]
fn failures_become_failed_envelopes(
    calculator: TableTarget<Calculator>,
    #[case] line: &str,
    #[case] exception: &str,
) {
    let envelope = ActionRouter::new().respond(&calculator, &decode(line));
    assert_eq!(
        envelope,
        Envelope::Failed {
            exception: exception.to_owned()
        }
    );
}

#[rstest]
fn method_list_hides_underscored_names(calculator: TableTarget<Calculator>) {
    let listing = ActionRouter::new().method_list(&calculator);
    assert_eq!(listing.get("docstring"), Some(&Value::str("Integer arithmetic.")));
    let Some(Value::Dict(methods)) = listing.get("methods") else {
        panic!("methods should be a mapping");
    };
    let names: Vec<&Value> = methods.iter().map(|(name, _)| name).collect();
    assert_eq!(names, [&Value::str("add"), &Value::str("explode")]);
}

#[rstest]
fn method_list_is_stable(calculator: TableTarget<Calculator>) {
    let request = "{'action': 'get_rpc_method_list'}";
    let first = respond(&calculator, request);
    let second = respond(&calculator, request);
    assert_eq!(first, second);
    assert!(first.starts_with("{'status': 'ok', 'ret': {'docstring': 'Integer arithmetic.'"));
}
