//! Numeric comparison: <, =
//!
//! Binary, with the same int/float promotion as arithmetic; both yield a
//! boolean. The richer relations (>, >=, <=, !=) are derived from these
//! two in the prelude, and general structural equality lives in `equal?`.

use crate::env::Environment;
use crate::error::LispError;
use crate::value::Value;
use std::rc::Rc;

use super::expect_argc;

fn numeric_pair(function: &'static str, args: &[Value]) -> Result<(f64, f64), LispError> {
    let mut out = [0.0; 2];
    for (i, arg) in args.iter().enumerate() {
        out[i] = match arg {
            Value::Int(n) => *n as f64,
            Value::Float(x) => *x,
            other => return Err(LispError::type_error(function, "integer or float", other, i)),
        };
    }
    Ok((out[0], out[1]))
}

/// Numeric less-than
pub fn builtin_lt(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    expect_argc("<", &args, 2)?;
    match (&args[0], &args[1]) {
        (Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a < b)),
        _ => {
            let (a, b) = numeric_pair("<", &args)?;
            Ok(Value::Bool(a < b))
        }
    }
}

/// Numeric equality; an integer and a float compare by promoted value
pub fn builtin_num_eq(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    expect_argc("=", &args, 2)?;
    match (&args[0], &args[1]) {
        (Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a == b)),
        _ => {
            let (a, b) = numeric_pair("=", &args)?;
            Ok(Value::Bool(a == b))
        }
    }
}

/// Register all comparison builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.put("<", Value::builtin("<", builtin_lt));
    env.put("=", Value::builtin("=", builtin_num_eq));
}
