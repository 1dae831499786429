//! Type predicates and the two equality tests
//!
//! One predicate per value kind, plus `equal?` (semantic equality) and
//! `is?` (same-cell identity). `list?` tests S-expressions; inert data
//! lists answer to `quoted-list?`.

use crate::env::Environment;
use crate::error::LispError;
use crate::value::Value;
use std::rc::Rc;

use super::expect_argc;

fn predicate(
    function: &'static str,
    args: &[Value],
    test: fn(&Value) -> bool,
) -> Result<Value, LispError> {
    expect_argc(function, args, 1)?;
    Ok(Value::Bool(test(&args[0])))
}

pub fn builtin_integer_p(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    predicate("integer?", &args, |v| matches!(v, Value::Int(_)))
}

pub fn builtin_float_p(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    predicate("float?", &args, |v| matches!(v, Value::Float(_)))
}

pub fn builtin_boolean_p(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    predicate("boolean?", &args, |v| matches!(v, Value::Bool(_)))
}

pub fn builtin_string_p(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    predicate("string?", &args, |v| matches!(v, Value::Str(_)))
}

pub fn builtin_list_p(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    predicate("list?", &args, |v| matches!(v, Value::Sexpr(_)))
}

pub fn builtin_quoted_list_p(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    predicate("quoted-list?", &args, |v| matches!(v, Value::Qexpr(_)))
}

pub fn builtin_error_p(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    predicate("error?", &args, |v| matches!(v, Value::Err(_)))
}

pub fn builtin_procedure_p(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    predicate("procedure?", &args, |v| matches!(v, Value::Lambda { .. }))
}

pub fn builtin_builtin_p(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    predicate("builtin?", &args, |v| matches!(v, Value::Builtin(_)))
}

/// Semantic equality over any two values
pub fn builtin_equal(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    expect_argc("equal?", &args, 2)?;
    Ok(Value::Bool(Value::equal(&args[0], &args[1])))
}

/// Same-cell identity
pub fn builtin_is(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    expect_argc("is?", &args, 2)?;
    Ok(Value::Bool(Value::is(&args[0], &args[1])))
}

/// Register all type predicates in the environment
pub fn register(env: &Rc<Environment>) {
    env.put("integer?", Value::builtin("integer?", builtin_integer_p));
    env.put("float?", Value::builtin("float?", builtin_float_p));
    env.put("boolean?", Value::builtin("boolean?", builtin_boolean_p));
    env.put("string?", Value::builtin("string?", builtin_string_p));
    env.put("list?", Value::builtin("list?", builtin_list_p));
    env.put(
        "quoted-list?",
        Value::builtin("quoted-list?", builtin_quoted_list_p),
    );
    env.put("error?", Value::builtin("error?", builtin_error_p));
    env.put("procedure?", Value::builtin("procedure?", builtin_procedure_p));
    env.put("builtin?", Value::builtin("builtin?", builtin_builtin_p));
    env.put("equal?", Value::builtin("equal?", builtin_equal));
    env.put("is?", Value::builtin("is?", builtin_is));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> Rc<Environment> {
        Environment::new()
    }

    fn is_true(v: Result<Value, LispError>) -> bool {
        matches!(v, Ok(Value::Bool(true)))
    }

    #[test]
    fn test_kind_predicates() {
        let e = env();
        assert!(is_true(builtin_integer_p(&e, vec![Value::Int(1)])));
        assert!(is_true(builtin_float_p(&e, vec![Value::Float(1.0)])));
        assert!(!is_true(builtin_integer_p(&e, vec![Value::Float(1.0)])));
        assert!(is_true(builtin_boolean_p(&e, vec![Value::Bool(false)])));
        assert!(is_true(builtin_string_p(&e, vec![Value::Str("".into())])));
        assert!(is_true(builtin_error_p(&e, vec![Value::Err("x".into())])));
    }

    #[test]
    fn test_list_predicates_distinguish_s_and_q() {
        let e = env();
        assert!(is_true(builtin_list_p(&e, vec![Value::unit()])));
        assert!(!is_true(builtin_list_p(&e, vec![Value::Qexpr(vec![])])));
        assert!(is_true(builtin_quoted_list_p(&e, vec![Value::Qexpr(vec![])])));
        assert!(!is_true(builtin_quoted_list_p(&e, vec![Value::unit()])));
    }

    #[test]
    fn test_procedure_predicates() {
        let e = env();
        let lambda = Value::Lambda {
            params: vec![],
            body: vec![],
            env: e.clone(),
        };
        let plus = Value::builtin("+", crate::builtins::arithmetic::builtin_add);
        assert!(is_true(builtin_procedure_p(&e, vec![lambda.clone()])));
        assert!(!is_true(builtin_procedure_p(&e, vec![plus.clone()])));
        assert!(is_true(builtin_builtin_p(&e, vec![plus])));
        assert!(!is_true(builtin_builtin_p(&e, vec![lambda])));
    }

    #[test]
    fn test_equal_builtin() {
        let e = env();
        assert!(is_true(builtin_equal(
            &e,
            vec![
                Value::Qexpr(vec![Value::Int(1)]),
                Value::Qexpr(vec![Value::Int(1)]),
            ],
        )));
        // two distinct error cells are never equal
        assert!(!is_true(builtin_equal(
            &e,
            vec![Value::Err("x".into()), Value::Err("x".into())],
        )));
    }

    #[test]
    fn test_is_builtin_sees_distinct_cells() {
        let e = env();
        // both arguments are separate cells in the argument list
        assert!(!is_true(builtin_is(
            &e,
            vec![Value::Int(1), Value::Int(1)],
        )));
    }
}
