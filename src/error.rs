// ABOUTME: Error types covering every failure kind the interpreter reports

use crate::value::Value;
use thiserror::Error;

/// Host-side representation of an interpreter error. The evaluator never
/// unwinds on these: at every dispatch boundary a `LispError` is rendered
/// into a first-class `Value::Err`, which then propagates as data.
#[derive(Error, Debug, Clone)]
pub enum LispError {
    /// Wrong argument kind for a builtin, naming the offending position
    #[error("Procedure '{function}' expected argument {position} of type '{expected}', got '{actual}'.")]
    TypeMismatch {
        function: &'static str,
        expected: &'static str,
        actual: &'static str,
        position: usize,
    },

    /// Wrong argument count for a builtin
    #[error("Procedure '{function}' expected {expected} argument(s), got {actual}.")]
    Arity {
        function: &'static str,
        expected: String, // "2", "at least 1"
        actual: usize,
    },

    /// Operation undefined on this input (empty list, out-of-range index,
    /// division by zero, ...)
    #[error("Procedure '{function}': {message}")]
    Domain {
        function: &'static str,
        message: String,
    },

    #[error("Unbound symbol '{0}'.")]
    UnboundSymbol(String),

    #[error("Object of type '{0}' is not applicable.")]
    NotApplicable(&'static str),

    #[error("Wrong number of arguments to lambda.")]
    LambdaArity,

    #[error("Assertion error: {0}")]
    Assertion(String),

    /// Raised by the `error` builtin
    #[error("{0}")]
    User(String),

    /// Malformed literal reaching the reader
    #[error("Invalid number ({kind}): {literal}.")]
    BadLiteral {
        kind: &'static str,
        literal: String,
    },

    #[error("Cannot load file '{path}': {message}")]
    Io { path: String, message: String },
}

impl LispError {
    /// Create a type mismatch error with full context
    pub fn type_error(
        function: &'static str,
        expected: &'static str,
        actual: &Value,
        position: usize,
    ) -> Self {
        LispError::TypeMismatch {
            function,
            expected,
            actual: actual.type_name(),
            position,
        }
    }

    /// Create an arity error with expected and actual counts
    pub fn arity_error(function: &'static str, expected: impl Into<String>, actual: usize) -> Self {
        LispError::Arity {
            function,
            expected: expected.into(),
            actual,
        }
    }

    /// Create a domain error with function context
    pub fn domain_error(function: &'static str, message: impl Into<String>) -> Self {
        LispError::Domain {
            function,
            message: message.into(),
        }
    }
}

impl From<LispError> for Value {
    fn from(e: LispError) -> Value {
        Value::Err(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_error_message() {
        let e = LispError::type_error("head", "Q-expression", &Value::Int(3), 0);
        assert_eq!(
            e.to_string(),
            "Procedure 'head' expected argument 0 of type 'Q-expression', got 'integer'."
        );
    }

    #[test]
    fn test_arity_error_message() {
        let e = LispError::arity_error("cons", "2", 3);
        assert_eq!(e.to_string(), "Procedure 'cons' expected 2 argument(s), got 3.");
    }

    #[test]
    fn test_unbound_symbol_becomes_err_value() {
        let v: Value = LispError::UnboundSymbol("foo".into()).into();
        match v {
            Value::Err(msg) => assert_eq!(msg, "Unbound symbol 'foo'."),
            _ => panic!("Expected Err value"),
        }
    }
}
