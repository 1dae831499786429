//! Arithmetic operations: +, -, *, /, %, ^, min, max
//!
//! Variadic over integers and floats with float contagion: if any operand
//! is a float, the whole computation is carried out in floats and the
//! result is a float.
//!
//! - `+`: sum (identity: 0)
//! - `-`: subtract subsequent args from first, or negate a single arg
//! - `*`: product (identity: 1)
//! - `/`: divide first by subsequent args, or reciprocal of a single arg
//! - `%`: remainder, integers only
//! - `^`: exponentiation, right-associative
//! - `min`/`max`: smallest/largest operand

use crate::env::Environment;
use crate::error::LispError;
use crate::value::Value;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Min,
    Max,
}

#[derive(Clone, Copy)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn as_f64(self) -> f64 {
        match self {
            Num::Int(n) => n as f64,
            Num::Float(x) => x,
        }
    }
}

fn numeric_args(function: &'static str, args: &[Value]) -> Result<Vec<Num>, LispError> {
    args.iter()
        .enumerate()
        .map(|(i, arg)| match arg {
            Value::Int(n) => Ok(Num::Int(*n)),
            Value::Float(x) => Ok(Num::Float(*x)),
            other => Err(LispError::type_error(function, "integer or float", other, i)),
        })
        .collect()
}

fn overflow(function: &'static str) -> LispError {
    LispError::domain_error(function, "integer overflow.")
}

fn division_by_zero(function: &'static str) -> LispError {
    LispError::domain_error(function, "division by zero.")
}

fn int_pow(function: &'static str, base: i64, exp: i64) -> Result<i64, LispError> {
    if exp < 0 {
        return Err(LispError::domain_error(
            function,
            "negative exponent for integer power.",
        ));
    }
    let exp = u32::try_from(exp).map_err(|_| overflow(function))?;
    base.checked_pow(exp).ok_or_else(|| overflow(function))
}

fn int_step(function: &'static str, op: Op, a: i64, b: i64) -> Result<i64, LispError> {
    match op {
        Op::Add => a.checked_add(b).ok_or_else(|| overflow(function)),
        Op::Sub => a.checked_sub(b).ok_or_else(|| overflow(function)),
        Op::Mul => a.checked_mul(b).ok_or_else(|| overflow(function)),
        Op::Div => {
            if b == 0 {
                return Err(division_by_zero(function));
            }
            a.checked_div(b).ok_or_else(|| overflow(function))
        }
        Op::Mod => {
            if b == 0 {
                return Err(division_by_zero(function));
            }
            a.checked_rem(b).ok_or_else(|| overflow(function))
        }
        Op::Pow => int_pow(function, a, b),
        Op::Min => Ok(a.min(b)),
        Op::Max => Ok(a.max(b)),
    }
}

fn float_step(function: &'static str, op: Op, a: f64, b: f64) -> Result<f64, LispError> {
    match op {
        Op::Add => Ok(a + b),
        Op::Sub => Ok(a - b),
        Op::Mul => Ok(a * b),
        Op::Div => {
            if b == 0.0 {
                return Err(division_by_zero(function));
            }
            Ok(a / b)
        }
        Op::Mod => Err(LispError::domain_error(function, "Modulo not defined on float.")),
        Op::Pow => Ok(a.powf(b)),
        Op::Min => Ok(a.min(b)),
        Op::Max => Ok(a.max(b)),
    }
}

fn fold_int(function: &'static str, op: Op, xs: Vec<i64>) -> Result<Value, LispError> {
    let mut acc;
    if op == Op::Pow {
        // right-associative: (^ 2 3 2) is 2^(3^2)
        let mut it = xs.into_iter().rev();
        acc = match it.next() {
            Some(x) => x,
            None => return Err(LispError::arity_error(function, "at least 1", 0)),
        };
        for x in it {
            acc = int_step(function, op, x, acc)?;
        }
    } else {
        let mut it = xs.into_iter();
        acc = match it.next() {
            Some(x) => x,
            None => return Err(LispError::arity_error(function, "at least 1", 0)),
        };
        for x in it {
            acc = int_step(function, op, acc, x)?;
        }
    }
    Ok(Value::Int(acc))
}

fn fold_float(function: &'static str, op: Op, xs: Vec<f64>) -> Result<Value, LispError> {
    let mut acc;
    if op == Op::Pow {
        let mut it = xs.into_iter().rev();
        acc = match it.next() {
            Some(x) => x,
            None => return Err(LispError::arity_error(function, "at least 1", 0)),
        };
        for x in it {
            acc = float_step(function, op, x, acc)?;
        }
    } else {
        let mut it = xs.into_iter();
        acc = match it.next() {
            Some(x) => x,
            None => return Err(LispError::arity_error(function, "at least 1", 0)),
        };
        for x in it {
            acc = float_step(function, op, acc, x)?;
        }
    }
    Ok(Value::Float(acc))
}

fn arith(function: &'static str, op: Op, args: Vec<Value>) -> Result<Value, LispError> {
    if args.is_empty() {
        return match op {
            Op::Add => Ok(Value::Int(0)),
            Op::Mul => Ok(Value::Int(1)),
            _ => Err(LispError::arity_error(function, "at least 1", 0)),
        };
    }

    let mut nums = numeric_args(function, &args)?;

    // (- x) negates, (/ x) is the reciprocal
    if nums.len() == 1 && op == Op::Sub {
        nums.insert(0, Num::Int(0));
    } else if nums.len() == 1 && op == Op::Div {
        nums.insert(0, Num::Int(1));
    }

    if nums.iter().any(|n| matches!(n, Num::Float(_))) {
        fold_float(function, op, nums.into_iter().map(Num::as_f64).collect())
    } else {
        let ints = nums
            .into_iter()
            .map(|n| match n {
                Num::Int(v) => v,
                Num::Float(x) => x as i64,
            })
            .collect();
        fold_int(function, op, ints)
    }
}

pub fn builtin_add(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    arith("+", Op::Add, args)
}

pub fn builtin_sub(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    arith("-", Op::Sub, args)
}

pub fn builtin_mul(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    arith("*", Op::Mul, args)
}

pub fn builtin_div(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    arith("/", Op::Div, args)
}

pub fn builtin_mod(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    arith("%", Op::Mod, args)
}

pub fn builtin_pow(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    arith("^", Op::Pow, args)
}

pub fn builtin_min(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    arith("min", Op::Min, args)
}

pub fn builtin_max(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    arith("max", Op::Max, args)
}

/// Register all arithmetic builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.put("+", Value::builtin("+", builtin_add));
    env.put("-", Value::builtin("-", builtin_sub));
    env.put("*", Value::builtin("*", builtin_mul));
    env.put("/", Value::builtin("/", builtin_div));
    env.put("%", Value::builtin("%", builtin_mod));
    env.put("^", Value::builtin("^", builtin_pow));
    env.put("min", Value::builtin("min", builtin_min));
    env.put("max", Value::builtin("max", builtin_max));
}
