//! Error construction: error, assert
//!
//! Errors are first-class values, not exceptions. `error` builds one from
//! a code string; `assert` passes its predicate through when truthy and
//! produces an assertion error otherwise.

use crate::env::Environment;
use crate::error::LispError;
use crate::value::Value;
use std::rc::Rc;

use super::{expect_argc, into_str};

/// `(error code)` — construct an error value
pub fn builtin_error(_env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_argc("error", &args, 1)?;
    let code = into_str("error", args.remove(0), 0)?;
    Ok(LispError::User(code).into())
}

/// `(assert pred msg)` — pred when truthy, an assertion error otherwise
pub fn builtin_assert(_env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_argc("assert", &args, 2)?;
    let message = into_str("assert", args.remove(1), 1)?;
    let pred = args.remove(0);
    if pred.truthy() {
        Ok(pred)
    } else {
        Err(LispError::Assertion(message))
    }
}

/// Register all error builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.put("error", Value::builtin("error", builtin_error));
    env.put("assert", Value::builtin("assert", builtin_assert));
}
