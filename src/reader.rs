// ABOUTME: Reader module converting parsed syntax trees into values

use crate::error::LispError;
use crate::parser::Syntax;
use crate::value::Value;

/// Convert a syntax node into a value. Malformed literals become error
/// values rather than host errors, so a bad number inside a program
/// surfaces through the usual propagation path.
pub fn read(node: &Syntax) -> Value {
    match node {
        Syntax::Boolean(text) => Value::Bool(text == "#t"),
        Syntax::Number(text) => read_number(text),
        Syntax::Str(text) => Value::Str(unescape(strip_quotes(text))),
        Syntax::Symbol(text) => Value::Sym(text.clone()),
        Syntax::Sexpr(children) => Value::Sexpr(children.iter().map(read).collect()),
        Syntax::Qexpr(children) => Value::Qexpr(children.iter().map(read).collect()),
    }
}

/// A literal containing `.`, `e` or `E` is a float, anything else an
/// integer. Out-of-range literals yield error values.
fn read_number(text: &str) -> Value {
    if text.contains(['.', 'e', 'E']) {
        match text.parse::<f64>() {
            Ok(x) if x.is_finite() => Value::Float(x),
            _ => LispError::BadLiteral {
                kind: "float",
                literal: text.to_string(),
            }
            .into(),
        }
    } else {
        match text.parse::<i64>() {
            Ok(n) => Value::Int(n),
            Err(_) => LispError::BadLiteral {
                kind: "integer",
                literal: text.to_string(),
            }
            .into(),
        }
    }
}

fn strip_quotes(raw: &str) -> &str {
    raw.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(raw)
}

/// Expand the standard escapes; an unrecognized escape is kept verbatim.
fn unescape(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('"') => result.push('"'),
            Some('\\') => result.push('\\'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn read_one(input: &str) -> Value {
        let forms = parse(input).expect("input should parse");
        assert_eq!(forms.len(), 1);
        read(&forms[0])
    }

    #[test]
    fn test_read_integers() {
        assert!(Value::equal(&read_one("42"), &Value::Int(42)));
        assert!(Value::equal(&read_one("-42"), &Value::Int(-42)));
    }

    #[test]
    fn test_read_floats() {
        assert!(Value::equal(&read_one("3.14"), &Value::Float(3.14)));
        assert!(Value::equal(&read_one("1."), &Value::Float(1.0)));
        assert!(Value::equal(&read_one("2e3"), &Value::Float(2000.0)));
        assert!(Value::equal(&read_one("1.5e-1"), &Value::Float(0.15)));
    }

    #[test]
    fn test_integer_out_of_range_is_error() {
        let v = read_one("99999999999999999999");
        match v {
            Value::Err(msg) => assert!(msg.contains("Invalid number (integer)"), "got: {}", msg),
            other => panic!("Expected Err, got {}", other),
        }
    }

    #[test]
    fn test_float_out_of_range_is_error() {
        let v = read_one("1e999");
        match v {
            Value::Err(msg) => assert!(msg.contains("Invalid number (float)"), "got: {}", msg),
            other => panic!("Expected Err, got {}", other),
        }
    }

    #[test]
    fn test_read_booleans() {
        assert!(Value::equal(&read_one("#t"), &Value::Bool(true)));
        assert!(Value::equal(&read_one("#f"), &Value::Bool(false)));
    }

    #[test]
    fn test_read_string_escapes() {
        assert!(Value::equal(
            &read_one("\"a\\nb\\t\\\"c\\\\\""),
            &Value::Str("a\nb\t\"c\\".into()),
        ));
        // unknown escapes stay verbatim
        assert!(Value::equal(&read_one("\"a\\qb\""), &Value::Str("a\\qb".into())));
    }

    #[test]
    fn test_read_exprs() {
        let v = read_one("(+ 1 {2 3})");
        let expected = Value::Sexpr(vec![
            Value::Sym("+".into()),
            Value::Int(1),
            Value::Qexpr(vec![Value::Int(2), Value::Int(3)]),
        ]);
        assert!(Value::equal(&v, &expected));
    }

    #[test]
    fn test_print_read_round_trip() {
        let values = [
            Value::Bool(true),
            Value::Int(-17),
            Value::Float(2.5),
            Value::Float(4.0),
            Value::Sym("concat".into()),
            Value::Str("line\none \"two\"".into()),
            Value::Sexpr(vec![Value::Sym("+".into()), Value::Int(1), Value::Float(2.0)]),
            Value::Qexpr(vec![Value::Qexpr(vec![]), Value::Str("x".into())]),
        ];
        for v in &values {
            let printed = format!("{}", v);
            let reread = read_one(&printed);
            assert!(Value::equal(v, &reread), "round-trip failed for {}", printed);
        }
    }
}
