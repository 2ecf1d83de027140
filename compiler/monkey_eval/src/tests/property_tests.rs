use proptest::prelude::*;

use super::try_eval;
use crate::{EvalErrorKind, Value};

fn source_for(a: i64, op: &str, b: i64) -> String {
    format!("({a}) {op} ({b})")
}

proptest! {
    #[test]
    fn addition_matches_checked_add(a in -1_000_000_000i64..1_000_000_000, b in -1_000_000_000i64..1_000_000_000) {
        prop_assert_eq!(try_eval(&source_for(a, "+", b)), Ok(Value::Integer(a + b)));
    }

    #[test]
    fn multiplication_matches_or_overflows(a in any::<i32>(), b in any::<i32>()) {
        let (a, b) = (i64::from(a) * 4, i64::from(b) * 4);
        let result = try_eval(&source_for(a, "*", b));
        match a.checked_mul(b) {
            Some(product) => prop_assert_eq!(result, Ok(Value::Integer(product))),
            None => prop_assert_eq!(
                result.map_err(|e| e.kind),
                Err(EvalErrorKind::IntegerOverflow { operation: "multiplication" })
            ),
        }
    }

    #[test]
    fn division_truncates_toward_zero(a in -10_000i64..10_000, b in -100i64..100) {
        prop_assume!(b != 0);
        prop_assert_eq!(try_eval(&source_for(a, "/", b)), Ok(Value::Integer(a / b)));
        prop_assert_eq!(try_eval(&source_for(a, "%", b)), Ok(Value::Integer(a % b)));
    }

    #[test]
    fn comparisons_agree_with_i64(a in any::<i32>(), b in any::<i32>()) {
        let (a, b) = (i64::from(a), i64::from(b));
        prop_assert_eq!(try_eval(&source_for(a, "<", b)), Ok(Value::Boolean(a < b)));
        prop_assert_eq!(try_eval(&source_for(a, ">", b)), Ok(Value::Boolean(a > b)));
        prop_assert_eq!(try_eval(&source_for(a, "==", b)), Ok(Value::Boolean(a == b)));
        prop_assert_eq!(try_eval(&source_for(a, "!=", b)), Ok(Value::Boolean(a != b)));
    }
}
