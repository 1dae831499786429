//! Source loading: load

use crate::env::Environment;
use crate::error::LispError;
use crate::run;
use crate::value::Value;
use std::path::Path;
use std::rc::Rc;

use super::{expect_argc, into_str};

/// `(load "path")` — evaluate a file as a sequence of top-level forms.
/// Yields the last form's value, or the first error encountered.
pub fn builtin_load(env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_argc("load", &args, 1)?;
    let path = into_str("load", args.remove(0), 0)?;
    Ok(run::load_file(env, Path::new(&path)))
}

/// Register all I/O builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.put("load", Value::builtin("load", builtin_load));
}
