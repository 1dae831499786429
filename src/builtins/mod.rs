//! # Built-in Procedures
//!
//! The procedures registered in the global environment before any source
//! is evaluated, organized by category:
//!
//! - **[arithmetic]**: +, -, *, /, %, ^, min, max
//! - **[comparison]**: <, =
//! - **[lists]**: list, eval, head, tail, init, last, nth, cons, join, len
//! - **[logic]**: and, or, not
//! - **[types]**: integer?, float?, boolean?, string?, list?, quoted-list?,
//!   error?, procedure?, builtin?, equal?, is?
//! - **[binding]**: def, def*, \, fun, apply
//! - **[control]**: if, cond
//! - **[strings]**: concat
//! - **[errors]**: error, assert
//! - **[io]**: load
//!
//! Every builtin owns its argument list and validates it with the shared
//! helpers below, so arity and type failures carry the procedure name and
//! the offending position.

use crate::env::Environment;
use crate::error::LispError;
use crate::value::Value;
use std::rc::Rc;

pub mod arithmetic;
pub mod binding;
pub mod comparison;
pub mod control;
pub mod errors;
pub mod io;
pub mod lists;
pub mod logic;
pub mod strings;
pub mod types;

/// Register all built-in procedures in the given (global) environment
pub fn register_builtins(env: &Rc<Environment>) {
    arithmetic::register(env);
    comparison::register(env);
    lists::register(env);
    logic::register(env);
    types::register(env);
    binding::register(env);
    control::register(env);
    strings::register(env);
    errors::register(env);
    io::register(env);
}

// ============================================================================
// Shared argument validation
// ============================================================================

pub(crate) fn expect_argc(
    function: &'static str,
    args: &[Value],
    count: usize,
) -> Result<(), LispError> {
    if args.len() != count {
        return Err(LispError::arity_error(function, count.to_string(), args.len()));
    }
    Ok(())
}

pub(crate) fn expect_min_argc(
    function: &'static str,
    args: &[Value],
    min: usize,
) -> Result<(), LispError> {
    if args.len() < min {
        return Err(LispError::arity_error(
            function,
            format!("at least {}", min),
            args.len(),
        ));
    }
    Ok(())
}

pub(crate) fn into_qexpr(
    function: &'static str,
    arg: Value,
    position: usize,
) -> Result<Vec<Value>, LispError> {
    match arg {
        Value::Qexpr(items) => Ok(items),
        other => Err(LispError::type_error(function, "Q-expression", &other, position)),
    }
}

pub(crate) fn into_int(
    function: &'static str,
    arg: Value,
    position: usize,
) -> Result<i64, LispError> {
    match arg {
        Value::Int(n) => Ok(n),
        other => Err(LispError::type_error(function, "integer", &other, position)),
    }
}

pub(crate) fn into_str(
    function: &'static str,
    arg: Value,
    position: usize,
) -> Result<String, LispError> {
    match arg {
        Value::Str(s) => Ok(s),
        other => Err(LispError::type_error(function, "string", &other, position)),
    }
}

/// Unpack a Q-expression of symbols (parameter lists, `def` keys)
pub(crate) fn symbol_names(
    function: &'static str,
    items: Vec<Value>,
) -> Result<Vec<String>, LispError> {
    items
        .into_iter()
        .map(|item| match item {
            Value::Sym(name) => Ok(name),
            other => Err(LispError::domain_error(
                function,
                format!("expected a list of symbols, found '{}'.", other.type_name()),
            )),
        })
        .collect()
}
