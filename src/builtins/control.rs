//! Control flow: if, cond
//!
//! Branches are Q-expressions so that only the chosen one is ever
//! evaluated; the predicate itself arrives already evaluated like any
//! other argument. A branch's forms run in sequence and the last value
//! wins, matching lambda bodies.

use crate::env::Environment;
use crate::error::LispError;
use crate::eval::{eval, eval_forms};
use crate::value::Value;
use std::rc::Rc;

use super::{expect_argc, into_qexpr};

/// `(if pred {then} {else})`
pub fn builtin_if(env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_argc("if", &args, 3)?;
    let otherwise = into_qexpr("if", args.remove(2), 2)?;
    let consequent = into_qexpr("if", args.remove(1), 1)?;
    let branch = if args.remove(0).truthy() {
        consequent
    } else {
        otherwise
    };
    Ok(eval_forms(env, branch))
}

/// `(cond {p1 body1 ...} {p2 body2 ...} ...)` — first truthy predicate
/// selects the clause; a body-less clause yields its predicate's value;
/// no match yields `()`.
pub fn builtin_cond(env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    for (i, clause) in args.into_iter().enumerate() {
        let mut forms = into_qexpr("cond", clause, i)?;
        if forms.is_empty() {
            return Err(LispError::domain_error(
                "cond",
                "clause must contain a predicate.",
            ));
        }
        let pred = eval(env, forms.remove(0));
        if pred.is_err() {
            return Ok(pred);
        }
        if pred.truthy() {
            if forms.is_empty() {
                return Ok(pred);
            }
            return Ok(eval_forms(env, forms));
        }
    }
    Ok(Value::unit())
}

/// Register all control builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.put("if", Value::builtin("if", builtin_if));
    env.put("cond", Value::builtin("cond", builtin_cond));
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
    fn test_if_selects_branch() {
        assert!(Value::equal(&run("(if #t {1} {2})"), &Value::Int(1)));
        assert!(Value::equal(&run("(if #f {1} {2})"), &Value::Int(2)));
        assert!(Value::equal(
            &run("(if (< 3 2) {\"yes\"} {\"no\"})"),
            &Value::Str("no".into()),
        ));
    }

    #[test]
    fn test_if_only_evaluates_chosen_branch() {
        assert!(Value::equal(&run("(if #f {(head {})} {42})"), &Value::Int(42)));
    }

    #[test]
    fn test_if_truthiness_of_predicate() {
        // any non-#f predicate selects the consequent
        assert!(Value::equal(&run("(if 0 {1} {2})"), &Value::Int(1)));
        assert!(Value::equal(&run("(if {} {1} {2})"), &Value::Int(1)));
    }

    #[test]
    fn test_if_empty_branch_yields_unit() {
        assert!(Value::equal(&run("(if #f {1} {})"), &Value::unit()));
    }

    #[test]
    fn test_if_branch_sequence_returns_last() {
        assert!(Value::equal(&run("(if #t {1 2 3} {})"), &Value::Int(3)));
    }

    #[test]
    fn test_if_requires_quoted_branches() {
        assert!(run("(if #t 1 2)").is_err());
    }

    #[test]
    fn test_if_arity() {
        assert!(run("(if #t {1})").is_err());
    }

    #[test]
    fn test_cond_picks_first_truthy() {
        let v = run("(cond {(< 2 1) 10} {(< 1 2) 20} {#t 30})");
        assert!(Value::equal(&v, &Value::Int(20)));
    }

    #[test]
    fn test_cond_no_match_yields_unit() {
        assert!(Value::equal(&run("(cond {#f 1} {#f 2})"), &Value::unit()));
    }

    #[test]
    fn test_cond_bodyless_clause_yields_predicate() {
        assert!(Value::equal(&run("(cond {#f 1} {5})"), &Value::Int(5)));
    }

    #[test]
    fn test_cond_err_predicate_propagates() {
        assert!(run("(cond {(head {}) 1} {#t 2})").is_err());
    }

    #[test]
    fn test_cond_skipped_clauses_never_run() {
        let v = run("(cond {#t 1} {#t (head {})})");
        assert!(Value::equal(&v, &Value::Int(1)));
    }
}
