// ABOUTME: Shared driver for evaluating source text and loading files

use crate::env::Environment;
use crate::error::LispError;
use crate::eval::eval;
use crate::parser;
use crate::reader;
use crate::value::Value;
use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

thread_local! {
    /// Reentrant load depth, used to indent status messages when loaded
    /// files load further files.
    static LOAD_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Parse a source text into its top-level forms, already converted to
/// values. A parse failure is a textual diagnostic.
pub fn read_forms(source: &str) -> Result<Vec<Value>, String> {
    let forms = parser::parse(source)?;
    Ok(forms.iter().map(reader::read).collect())
}

/// Evaluate a whole source text, returning the value of the last form.
/// The first error value halts the sequence and becomes the result;
/// empty input yields `()`.
pub fn eval_source(env: &Rc<Environment>, source: &str) -> Result<Value, String> {
    let mut result = Value::unit();
    for form in read_forms(source)? {
        result = eval(env, form);
        if result.is_err() {
            break;
        }
    }
    Ok(result)
}

/// Load and evaluate a file. An unreadable file is a host-level I/O
/// failure for the caller to handle; a parse diagnostic or an error value
/// in the program comes back as an ordinary error value.
pub fn try_load_file(env: &Rc<Environment>, path: &Path) -> Result<Value, LispError> {
    let depth = LOAD_DEPTH.with(|d| d.get());
    let indent = "  ".repeat(depth);
    println!("{}Loading file '{}'...", indent, path.display());

    let source = std::fs::read_to_string(path).map_err(|e| LispError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    LOAD_DEPTH.with(|d| d.set(depth + 1));
    let result = eval_source(env, &source);
    LOAD_DEPTH.with(|d| d.set(depth));
    println!("{}done.", indent);

    Ok(match result {
        Ok(value) => value,
        Err(diagnostic) => Value::Err(diagnostic),
    })
}

/// Same as [`try_load_file`] with the I/O failure folded into an error
/// value, so user code can inspect the result of `load` uniformly.
pub fn load_file(env: &Rc<Environment>, path: &Path) -> Value {
    match try_load_file(env, path) {
        Ok(value) => value,
        Err(e) => e.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::register_builtins;

    fn setup() -> Rc<Environment> {
        let env = Environment::new();
        register_builtins(&env);
        env
    }

    #[test]
    fn test_eval_source_returns_last_value() {
        let env = setup();
        let v = eval_source(&env, "(def {x} 1) (+ x 2)").expect("parses");
        assert!(Value::equal(&v, &Value::Int(3)));
    }

    #[test]
    fn test_eval_source_halts_at_first_error() {
        let env = setup();
        let v = eval_source(&env, "(def {x} 1) (head {}) (def {y} 2)").expect("parses");
        assert!(v.is_err());
        // the form after the error never ran
        assert!(env.get("y").is_none());
        assert!(env.get("x").is_some());
    }

    #[test]
    fn test_eval_source_empty_is_unit() {
        let env = setup();
        let v = eval_source(&env, "  ; nothing here\n").expect("parses");
        assert!(Value::equal(&v, &Value::unit()));
    }

    #[test]
    fn test_eval_source_parse_failure_is_diagnostic() {
        let env = setup();
        assert!(eval_source(&env, "(+ 1").is_err());
    }

    #[test]
    fn test_unreadable_file_is_host_io_error() {
        let env = setup();
        let path = Path::new("no/such/dir/program.qlisp");
        match try_load_file(&env, path) {
            Err(LispError::Io { .. }) => {}
            other => panic!("Expected Err(Io), got {:?}", other),
        }
        // the uniform wrapper folds the same failure into an error value
        match load_file(&env, path) {
            Value::Err(msg) => assert!(msg.contains("Cannot load file"), "got: {}", msg),
            other => panic!("Expected Err value, got {}", other),
        }
    }
}
