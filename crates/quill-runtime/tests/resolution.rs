//! Operand resolution properties

use proptest::prelude::*;
use quill_runtime::{resolve, Bindings, RuntimeError, Value};

proptest! {
    #[test]
    fn integer_literals_round_trip(n in any::<i64>()) {
        prop_assert_eq!(resolve(&Bindings::new(), &n.to_string()), Ok(Value::Integer(n)));
    }

    #[test]
    fn quoted_text_is_unwrapped(s in "[^\"]*") {
        let operand = format!("\"{}\"", s);
        prop_assert_eq!(resolve(&Bindings::new(), &operand), Ok(Value::Text(s)));
    }

    #[test]
    fn unbound_names_fail(name in "[a-z_][a-z0-9_]{0,12}") {
        let result = resolve(&Bindings::new(), &name);
        let is_unknown = matches!(result, Err(RuntimeError::UnknownOperand { .. }));
        prop_assert!(is_unknown);
    }
}

#[test]
fn bound_name_resolves() {
    let bindings = quill_runtime::process("name = 5").unwrap();
    assert_eq!(resolve(&bindings, "name"), Ok(Value::Integer(5)));
}
