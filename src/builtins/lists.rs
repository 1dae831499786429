//! List operations over Q-expressions
//!
//! Q-expressions are the language's data lists; every operation here
//! requires them and leaves S-expressions to the evaluator.
//!
//! - `list`: collect the arguments into a Q-expression
//! - `eval`: unquote a Q-expression and evaluate it
//! - `head`/`tail`/`init`/`last`: decompose a non-empty list
//! - `nth`: positional access, negative indices count from the end
//! - `cons`: prepend an element
//! - `join`: concatenate lists
//! - `len`: element count

use crate::env::Environment;
use crate::error::LispError;
use crate::eval::eval;
use crate::value::Value;
use std::rc::Rc;

use super::{expect_argc, expect_min_argc, into_int, into_qexpr};

fn empty_list_error(function: &'static str) -> LispError {
    LispError::domain_error(function, "undefined on empty list '{}'.")
}

/// Collect the (already evaluated) arguments into a Q-expression
pub fn builtin_list(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    Ok(Value::Qexpr(args))
}

/// Convert a Q-expression into an S-expression and evaluate it
pub fn builtin_eval(env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_argc("eval", &args, 1)?;
    let items = into_qexpr("eval", args.remove(0), 0)?;
    Ok(eval(env, Value::Sexpr(items)))
}

pub fn builtin_head(_env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_argc("head", &args, 1)?;
    let mut items = into_qexpr("head", args.remove(0), 0)?;
    if items.is_empty() {
        return Err(empty_list_error("head"));
    }
    Ok(items.remove(0))
}

pub fn builtin_tail(_env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_argc("tail", &args, 1)?;
    let mut items = into_qexpr("tail", args.remove(0), 0)?;
    if items.is_empty() {
        return Err(empty_list_error("tail"));
    }
    items.remove(0);
    Ok(Value::Qexpr(items))
}

pub fn builtin_init(_env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_argc("init", &args, 1)?;
    let mut items = into_qexpr("init", args.remove(0), 0)?;
    if items.pop().is_none() {
        return Err(empty_list_error("init"));
    }
    Ok(Value::Qexpr(items))
}

pub fn builtin_last(_env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_argc("last", &args, 1)?;
    let mut items = into_qexpr("last", args.remove(0), 0)?;
    match items.pop() {
        Some(item) => Ok(item),
        None => Err(empty_list_error("last")),
    }
}

/// `(nth i xs)`; a negative index counts back from the end
pub fn builtin_nth(_env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_argc("nth", &args, 2)?;
    let mut items = into_qexpr("nth", args.remove(1), 1)?;
    let index = into_int("nth", args.remove(0), 0)?;
    if items.is_empty() {
        return Err(empty_list_error("nth"));
    }

    let len = items.len() as i64;
    let resolved = if index < 0 { len + index } else { index };
    if resolved < 0 || resolved >= len {
        return Err(LispError::domain_error(
            "nth",
            format!("index {} out of bounds for list of length {}.", index, len),
        ));
    }
    Ok(items.remove(resolved as usize))
}

/// Prepend a value to a Q-expression
pub fn builtin_cons(_env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_argc("cons", &args, 2)?;
    let mut items = into_qexpr("cons", args.remove(1), 1)?;
    items.insert(0, args.remove(0));
    Ok(Value::Qexpr(items))
}

/// Concatenate one or more Q-expressions
pub fn builtin_join(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    expect_min_argc("join", &args, 1)?;
    let mut joined = Vec::new();
    for (i, arg) in args.into_iter().enumerate() {
        joined.extend(into_qexpr("join", arg, i)?);
    }
    Ok(Value::Qexpr(joined))
}

pub fn builtin_len(_env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_argc("len", &args, 1)?;
    let items = into_qexpr("len", args.remove(0), 0)?;
    Ok(Value::Int(items.len() as i64))
}

/// Register all list builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.put("list", Value::builtin("list", builtin_list));
    env.put("eval", Value::builtin("eval", builtin_eval));
    env.put("head", Value::builtin("head", builtin_head));
    env.put("tail", Value::builtin("tail", builtin_tail));
    env.put("init", Value::builtin("init", builtin_init));
    env.put("last", Value::builtin("last", builtin_last));
    env.put("nth", Value::builtin("nth", builtin_nth));
    env.put("cons", Value::builtin("cons", builtin_cons));
    env.put("join", Value::builtin("join", builtin_join));
    env.put("len", Value::builtin("len", builtin_len));
}
