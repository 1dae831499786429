// ABOUTME: Value types representing qlisp data and expressions

use crate::env::Environment;
use crate::error::LispError;
use std::fmt;
use std::rc::Rc;

/// Signature shared by every builtin procedure. Builtins receive the
/// environment of the call site and an owned argument list; host-level
/// failures are reported as `LispError` and materialized into `Value::Err`
/// by the evaluator.
pub type BuiltinFn = fn(&Rc<Environment>, Vec<Value>) -> Result<Value, LispError>;

/// A named builtin procedure. `special` builtins receive their operand
/// forms unevaluated and drive evaluation themselves (`and`, `or`).
#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub special: bool,
    pub func: BuiltinFn,
}

#[derive(Debug, Clone)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Sym(String),
    Str(String),
    /// First-class error value; short-circuits any containing S-expression.
    Err(String),
    Builtin(Builtin),
    Lambda {
        params: Vec<String>,
        body: Vec<Value>,
        env: Rc<Environment>,
    },
    /// Applicative list: evaluating it applies its head to the rest.
    Sexpr(Vec<Value>),
    /// Quoted list: inert data until passed through `eval`.
    Qexpr(Vec<Value>),
}

impl Value {
    pub fn builtin(name: &'static str, func: BuiltinFn) -> Value {
        Value::Builtin(Builtin {
            name,
            special: false,
            func,
        })
    }

    /// A builtin whose arguments are handed over unevaluated.
    pub fn special_builtin(name: &'static str, func: BuiltinFn) -> Value {
        Value::Builtin(Builtin {
            name,
            special: true,
            func,
        })
    }

    /// The empty S-expression `()`, the unit-like result of empty bodies.
    pub fn unit() -> Value {
        Value::Sexpr(Vec::new())
    }

    pub fn is_err(&self) -> bool {
        matches!(self, Value::Err(_))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Sym(_) => "symbol",
            Value::Str(_) => "string",
            Value::Err(_) => "error",
            Value::Builtin(_) => "builtin procedure",
            Value::Lambda { .. } => "lambda procedure",
            Value::Sexpr(_) => "S-expression",
            Value::Qexpr(_) => "Q-expression",
        }
    }

    /// Structural identity: true only when both references name the very
    /// same cell. Intended for same-cell tests, not value comparison.
    pub fn is(v: &Value, w: &Value) -> bool {
        std::ptr::eq(v, w)
    }

    /// Semantic equality. Errors and lambdas compare by identity only;
    /// builtins by function handle; everything else by content.
    pub fn equal(v: &Value, w: &Value) -> bool {
        match (v, w) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Sym(a), Value::Sym(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Err(_), Value::Err(_)) => std::ptr::eq(v, w),
            (Value::Builtin(a), Value::Builtin(b)) => a.func as usize == b.func as usize,
            (Value::Lambda { .. }, Value::Lambda { .. }) => std::ptr::eq(v, w),
            (Value::Sexpr(a), Value::Sexpr(b)) | (Value::Qexpr(a), Value::Qexpr(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| Value::equal(x, y))
            }
            _ => false,
        }
    }

    /// Every value is truthy except `#f`.
    pub fn truthy(&self) -> bool {
        !matches!(self, Value::Bool(false))
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, items: &[Value], open: char, close: char) -> fmt::Result {
    write!(f, "{}", open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, "{}", close)
}

/// Floats must re-read as floats, so a fractionless value like 4 prints
/// as 4.0 rather than the bare shortest form.
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if !x.is_finite() {
        return write!(f, "{}", x);
    }
    let text = format!("{}", x);
    if text.contains(['.', 'e', 'E']) {
        write!(f, "{}", text)
    } else {
        write!(f, "{}.0", text)
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    write!(f, "\"")?;
    for c in s.chars() {
        match c {
            '\n' => write!(f, "\\n")?,
            '\t' => write!(f, "\\t")?,
            '\r' => write!(f, "\\r")?,
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            c => write!(f, "{}", c)?,
        }
    }
    write!(f, "\"")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", if *b { "#t" } else { "#f" }),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write_float(f, *x),
            Value::Sym(s) => write!(f, "{}", s),
            Value::Str(s) => write_quoted(f, s),
            Value::Err(msg) => write!(f, "<error: {}>", msg),
            Value::Builtin(b) => write!(f, "<builtin procedure '{}'>", b.name),
            Value::Lambda { .. } => write!(f, "<lambda procedure>"),
            Value::Sexpr(items) => write_seq(f, items, '(', ')'),
            Value::Qexpr(items) => write_seq(f, items, '{', '}'),
        }
    }
}
