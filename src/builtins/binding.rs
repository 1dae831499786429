//! Definition and application: def, def*, \, fun, apply
//!
//! `def` binds in the frame of the call site, `def*` in the global frame.
//! `\` constructs a lambda closing over the calling environment; `fun` is
//! the usual sugar for naming one. `apply` splices a quoted argument list
//! through the ordinary application path.

use crate::env::Environment;
use crate::error::LispError;
use crate::eval;
use crate::value::Value;
use std::rc::Rc;

use super::{expect_argc, expect_min_argc, into_qexpr, symbol_names};

fn define_all(
    function: &'static str,
    frame: &Rc<Environment>,
    mut args: Vec<Value>,
) -> Result<Value, LispError> {
    expect_min_argc(function, &args, 2)?;
    let keys = into_qexpr(function, args.remove(0), 0)?;
    let names = symbol_names(function, keys)?;

    if names.len() != args.len() {
        return Err(LispError::domain_error(
            function,
            format!("{} symbol(s) but {} value(s).", names.len(), args.len()),
        ));
    }

    for (name, value) in names.into_iter().zip(args.iter()) {
        frame.put(name, value.clone());
    }
    Ok(Value::Sexpr(args))
}

/// `(def {syms ...} v1 ... vn)` — bind in the current frame
pub fn builtin_def(env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    define_all("def", env, args)
}

/// `(def* {syms ...} v1 ... vn)` — bind in the global frame
pub fn builtin_def_global(env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    define_all("def*", &env.global(), args)
}

/// `(\ {params} {body})` — build a lambda capturing the current environment
pub fn builtin_lambda(env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_argc("\\", &args, 2)?;
    let body = into_qexpr("\\", args.remove(1), 1)?;
    let params = symbol_names("\\", into_qexpr("\\", args.remove(0), 0)?)?;
    Ok(Value::Lambda {
        params,
        body,
        env: env.clone(),
    })
}

/// `(fun {name params ...} {body})` — sugar for `def` of a lambda
pub fn builtin_fun(env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_argc("fun", &args, 2)?;
    let body = into_qexpr("fun", args.remove(1), 1)?;
    let mut header = symbol_names("fun", into_qexpr("fun", args.remove(0), 0)?)?;
    if header.is_empty() {
        return Err(LispError::domain_error("fun", "header must name the function."));
    }

    let name = header.remove(0);
    let lambda = Value::Lambda {
        params: header,
        body,
        env: env.clone(),
    };
    env.put(name, lambda.clone());
    Ok(Value::Sexpr(vec![lambda]))
}

/// `(apply proc args)` — call proc with the elements of a quoted list
pub fn builtin_apply(env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_argc("apply", &args, 2)?;
    let spliced = into_qexpr("apply", args.remove(1), 1)?;
    let proc = args.remove(0);
    Ok(eval::apply(env, proc, spliced))
}

/// Register all binding builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.put("def", Value::builtin("def", builtin_def));
    env.put("def*", Value::builtin("def*", builtin_def_global));
    env.put("\\", Value::builtin("\\", builtin_lambda));
    env.put("fun", Value::builtin("fun", builtin_fun));
    env.put("apply", Value::builtin("apply", builtin_apply));
}
