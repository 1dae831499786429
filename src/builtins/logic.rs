//! Logic operations: and, or, not
//!
//! `and` and `or` are registered as special builtins: the evaluator hands
//! them their operand forms unevaluated, and they evaluate left to right
//! only as far as needed. Both return the last value examined rather than
//! forcing a boolean, so `(or #f 5)` is `5`.

use crate::env::Environment;
use crate::error::LispError;
use crate::eval::eval;
use crate::value::Value;
use std::rc::Rc;

use super::expect_argc;

/// Short-circuiting conjunction; `#t` on no operands
pub fn builtin_and(env: &Rc<Environment>, forms: Vec<Value>) -> Result<Value, LispError> {
    let mut last = Value::Bool(true);
    for form in forms {
        last = eval(env, form);
        if last.is_err() || !last.truthy() {
            return Ok(last);
        }
    }
    Ok(last)
}

/// Short-circuiting disjunction; `#f` on no operands
pub fn builtin_or(env: &Rc<Environment>, forms: Vec<Value>) -> Result<Value, LispError> {
    let mut last = Value::Bool(false);
    for form in forms {
        last = eval(env, form);
        if last.is_err() || last.truthy() {
            return Ok(last);
        }
    }
    Ok(last)
}

/// Truthiness negation
pub fn builtin_not(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    expect_argc("not", &args, 1)?;
    Ok(Value::Bool(!args[0].truthy()))
}

/// Register all logic builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.put("and", Value::special_builtin("and", builtin_and));
    env.put("or", Value::special_builtin("or", builtin_or));
    env.put("not", Value::builtin("not", builtin_not));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::register_builtins;
    use crate::parser::parse;
    use crate::reader::read;

    fn run(src: &str) -> Value {
        let env = Environment::new();
        register_builtins(&env);
        let forms = parse(src).expect("source should parse");
        let mut result = Value::unit();
        for form in &forms {
            result = eval(&env, read(form));
        }
        result
    }

    #[test]
    fn test_and_returns_last_examined() {
        assert!(Value::equal(&run("(and)"), &Value::Bool(true)));
        assert!(Value::equal(&run("(and 1 2 3)"), &Value::Int(3)));
        assert!(Value::equal(&run("(and #t #f #t)"), &Value::Bool(false)));
    }

    #[test]
    fn test_or_returns_first_truthy() {
        assert!(Value::equal(&run("(or)"), &Value::Bool(false)));
        assert!(Value::equal(&run("(or #f 5 6)"), &Value::Int(5)));
        assert!(Value::equal(&run("(or #f #f)"), &Value::Bool(false)));
    }

    #[test]
    fn test_and_short_circuits_evaluation() {
        // the erroring second operand must never run
        assert!(Value::equal(&run("(and #f (head {}))"), &Value::Bool(false)));
    }

    #[test]
    fn test_or_short_circuits_evaluation() {
        assert!(Value::equal(&run("(or #t (head {}))"), &Value::Bool(true)));
    }

    #[test]
    fn test_err_operand_propagates() {
        assert!(run("(and #t (head {}))").is_err());
        assert!(run("(or #f (head {}))").is_err());
    }

    #[test]
    fn test_not_uses_truthiness() {
        assert!(Value::equal(&run("(not #f)"), &Value::Bool(true)));
        assert!(Value::equal(&run("(not #t)"), &Value::Bool(false)));
        assert!(Value::equal(&run("(not 0)"), &Value::Bool(false)));
        assert!(Value::equal(&run("(not {})"), &Value::Bool(false)));
    }
}
