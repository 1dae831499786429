// ABOUTME: Evaluator module reducing values in an environment

use crate::env::Environment;
use crate::error::LispError;
use crate::value::{Builtin, Value};
use std::rc::Rc;

/// Reduce a value in an environment. Symbols resolve through the frame
/// chain, S-expressions apply, everything else (Q-expressions included)
/// is already a value. Errors come back as `Value::Err`, never by unwind.
pub fn eval(env: &Rc<Environment>, v: Value) -> Value {
    match v {
        Value::Sym(name) => match env.get(&name) {
            Some(value) => value,
            None => LispError::UnboundSymbol(name).into(),
        },
        Value::Sexpr(items) => eval_sexpr(env, items),
        other => other,
    }
}

/// Evaluate a sequence of forms in order, returning the last result.
/// An error value terminates the sequence. An empty sequence yields `()`.
pub fn eval_forms(env: &Rc<Environment>, forms: Vec<Value>) -> Value {
    let mut result = Value::unit();
    for form in forms {
        result = eval(env, form);
        if result.is_err() {
            break;
        }
    }
    result
}

fn eval_sexpr(env: &Rc<Environment>, items: Vec<Value>) -> Value {
    let mut forms = items.into_iter();
    let head = match forms.next() {
        Some(form) => form,
        None => return Value::unit(),
    };

    let proc = eval(env, head);
    if proc.is_err() {
        return proc;
    }

    // Special builtins receive their operand forms raw so they can decide
    // what to evaluate (and, or).
    if let Value::Builtin(b) = &proc {
        if b.special {
            return run_builtin(env, *b, forms.collect());
        }
    }

    let mut args = Vec::with_capacity(forms.len());
    for form in forms {
        let arg = eval(env, form);
        if arg.is_err() {
            return arg;
        }
        args.push(arg);
    }

    apply(env, proc, args)
}

/// Apply a procedure to already-evaluated arguments. Shared between
/// S-expression application and the `apply` builtin.
pub fn apply(env: &Rc<Environment>, proc: Value, args: Vec<Value>) -> Value {
    // An error argument never reaches a procedure, whichever path
    // dispatched here.
    for arg in &args {
        if arg.is_err() {
            return arg.clone();
        }
    }

    match proc {
        Value::Builtin(b) => run_builtin(env, b, args),
        Value::Lambda {
            params,
            body,
            env: captured,
        } => call_lambda(params, body, &captured, args),
        other => LispError::NotApplicable(other.type_name()).into(),
    }
}

fn run_builtin(env: &Rc<Environment>, b: Builtin, args: Vec<Value>) -> Value {
    match (b.func)(env, args) {
        Ok(v) => v,
        Err(e) => e.into(),
    }
}

/// Call a lambda: fresh frame under the captured environment, formals
/// bound in lockstep with `&`-tail support, body forms run in order.
fn call_lambda(
    params: Vec<String>,
    body: Vec<Value>,
    captured: &Rc<Environment>,
    args: Vec<Value>,
) -> Value {
    let frame = Environment::with_parent(captured.clone());
    if let Err(e) = bind_params(&frame, params, args) {
        return e.into();
    }
    eval_forms(&frame, body)
}

fn bind_params(
    frame: &Rc<Environment>,
    params: Vec<String>,
    args: Vec<Value>,
) -> Result<(), LispError> {
    let mut params = params.into_iter();
    let mut args = args.into_iter();

    while let Some(param) = params.next() {
        if param == "&" {
            // The single parameter after '&' takes the remaining arguments
            // as a quoted list.
            let rest_name = params.next().ok_or(LispError::LambdaArity)?;
            if params.next().is_some() {
                return Err(LispError::LambdaArity);
            }
            frame.put(rest_name, Value::Qexpr(args.collect()));
            return Ok(());
        }
        match args.next() {
            Some(arg) => frame.put(param, arg),
            None => return Err(LispError::LambdaArity),
        }
    }

    if args.next().is_some() {
        return Err(LispError::LambdaArity);
    }
    Ok(())
}
