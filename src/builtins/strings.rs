//! String operations: concat

use crate::env::Environment;
use crate::error::LispError;
use crate::value::Value;
use std::rc::Rc;

/// Concatenate any number of strings; no arguments yields `""`
pub fn builtin_concat(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    let mut out = String::new();
    for (i, arg) in args.iter().enumerate() {
        match arg {
            Value::Str(s) => out.push_str(s),
            other => return Err(LispError::type_error("concat", "string", other, i)),
        }
    }
    Ok(Value::Str(out))
}

/// Register all string builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.put("concat", Value::builtin("concat", builtin_concat));
}
