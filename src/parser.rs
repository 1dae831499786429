// ABOUTME: Parser module producing qlisp syntax trees using nom combinators

use nom::{
    branch::alt,
    bytes::complete::{escaped, tag, take_while, take_while1},
    character::complete::{anychar, char, digit0, digit1, multispace1, none_of, one_of},
    combinator::{opt, recognize, value},
    multi::many0,
    IResult, Parser,
};

/// A parsed syntax node. Atoms keep their raw source text; the reader is
/// responsible for turning literals into values (and for rejecting
/// out-of-range ones).
#[derive(Debug, Clone, PartialEq)]
pub enum Syntax {
    Boolean(String),
    Number(String),
    /// Raw source slice, still including the delimiting quotes
    Str(String),
    Symbol(String),
    Sexpr(Vec<Syntax>),
    Qexpr(Vec<Syntax>),
}

/// Parse a whole source text into its top-level forms. Failures are
/// textual diagnostics for the caller to print, never error values.
pub fn parse(input: &str) -> Result<Vec<Syntax>, String> {
    let mut forms = Vec::new();
    let mut rest = input;

    loop {
        if let Ok((r, ())) = ws(rest) {
            rest = r;
        }
        if rest.is_empty() {
            break;
        }
        match parse_expr(rest) {
            Ok((r, form)) => {
                forms.push(form);
                rest = r;
            }
            Err(_) => return Err(diagnostic(rest)),
        }
    }

    Ok(forms)
}

fn diagnostic(rest: &str) -> String {
    let line = rest.lines().next().unwrap_or("");
    let snippet: String = line.chars().take(24).collect();
    format!("Parse error near '{}'.", snippet.trim_end())
}

/// Parse a comment: `;` through end of line
fn parse_comment(input: &str) -> IResult<&str, ()> {
    let (input, _) = char(';')(input)?;
    let (input, _) = take_while(|c| c != '\n')(input)?;
    Ok((input, ()))
}

/// Skip whitespace and comments
fn ws(input: &str) -> IResult<&str, ()> {
    many0(alt((value((), multispace1), parse_comment)))
        .map(|_| ())
        .parse(input)
}

/// Parse a number literal: `-?[0-9]*\.[0-9]+` or `-?[0-9]+\.?`, with an
/// optional `[eE]-?[0-9]+` exponent. Tried before symbols so `-5` is a
/// number while `-` alone stays a symbol.
fn parse_number(input: &str) -> IResult<&str, Syntax> {
    recognize((
        opt(char('-')),
        alt((
            recognize((digit0, char('.'), digit1)),
            recognize((digit1, opt(char('.')))),
        )),
        opt((one_of("eE"), opt(char('-')), digit1)),
    ))
    .map(|text: &str| Syntax::Number(text.to_string()))
    .parse(input)
}

/// Parse a boolean literal (#t or #f)
fn parse_boolean(input: &str) -> IResult<&str, Syntax> {
    alt((tag("#t"), tag("#f")))
        .map(|text: &str| Syntax::Boolean(text.to_string()))
        .parse(input)
}

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "_+-*/\\=<>!&?^".contains(c)
}

fn parse_symbol(input: &str) -> IResult<&str, Syntax> {
    take_while1(is_symbol_char)
        .map(|text: &str| Syntax::Symbol(text.to_string()))
        .parse(input)
}

/// Parse a string literal, keeping the raw slice. Escape expansion is the
/// reader's job; here the escape just has to be stepped over so a `\"`
/// does not close the literal.
fn parse_string(input: &str) -> IResult<&str, Syntax> {
    recognize((
        char('"'),
        opt(escaped(none_of("\"\\"), '\\', anychar)),
        char('"'),
    ))
    .map(|text: &str| Syntax::Str(text.to_string()))
    .parse(input)
}

fn parse_sexpr(input: &str) -> IResult<&str, Syntax> {
    let (input, _) = char('(')(input)?;
    let (input, items) = many0(parse_expr).parse(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = char(')')(input)?;
    Ok((input, Syntax::Sexpr(items)))
}

fn parse_qexpr(input: &str) -> IResult<&str, Syntax> {
    let (input, _) = char('{')(input)?;
    let (input, items) = many0(parse_expr).parse(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = char('}')(input)?;
    Ok((input, Syntax::Qexpr(items)))
}

fn parse_expr(input: &str) -> IResult<&str, Syntax> {
    let (input, _) = ws(input)?;
    alt((
        parse_boolean,
        parse_number,
        parse_string,
        parse_symbol,
        parse_sexpr,
        parse_qexpr,
    ))
    .parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(input: &str) -> Syntax {
        let forms = parse(input).expect("input should parse");
        assert_eq!(forms.len(), 1, "expected a single form");
        forms.into_iter().next().unwrap()
    }

    #[test]
    fn test_parse_integers() {
        assert_eq!(one("42"), Syntax::Number("42".into()));
        assert_eq!(one("-42"), Syntax::Number("-42".into()));
    }

    #[test]
    fn test_parse_floats_and_exponents() {
        assert_eq!(one("3.14"), Syntax::Number("3.14".into()));
        assert_eq!(one("-.5"), Syntax::Number("-.5".into()));
        assert_eq!(one("1."), Syntax::Number("1.".into()));
        assert_eq!(one("2e10"), Syntax::Number("2e10".into()));
        assert_eq!(one("1.5e-3"), Syntax::Number("1.5e-3".into()));
    }

    #[test]
    fn test_parse_booleans() {
        assert_eq!(one("#t"), Syntax::Boolean("#t".into()));
        assert_eq!(one("#f"), Syntax::Boolean("#f".into()));
    }

    #[test]
    fn test_parse_symbols() {
        assert_eq!(one("foo"), Syntax::Symbol("foo".into()));
        assert_eq!(one("+"), Syntax::Symbol("+".into()));
        assert_eq!(one("-"), Syntax::Symbol("-".into()));
        assert_eq!(one("quoted-list?"), Syntax::Symbol("quoted-list?".into()));
        assert_eq!(one("\\"), Syntax::Symbol("\\".into()));
        assert_eq!(one("def*"), Syntax::Symbol("def*".into()));
    }

    #[test]
    fn test_parse_strings_raw() {
        assert_eq!(one("\"hello\""), Syntax::Str("\"hello\"".into()));
        assert_eq!(one("\"\""), Syntax::Str("\"\"".into()));
        // escaped quote does not close the literal
        assert_eq!(one("\"a\\\"b\""), Syntax::Str("\"a\\\"b\"".into()));
    }

    #[test]
    fn test_parse_sexpr() {
        let form = one("(+ 1 2)");
        assert_eq!(
            form,
            Syntax::Sexpr(vec![
                Syntax::Symbol("+".into()),
                Syntax::Number("1".into()),
                Syntax::Number("2".into()),
            ])
        );
    }

    #[test]
    fn test_parse_qexpr_nested() {
        let form = one("{1 {2 3}}");
        assert_eq!(
            form,
            Syntax::Qexpr(vec![
                Syntax::Number("1".into()),
                Syntax::Qexpr(vec![Syntax::Number("2".into()), Syntax::Number("3".into())]),
            ])
        );
    }

    #[test]
    fn test_parse_empty_groups() {
        assert_eq!(one("()"), Syntax::Sexpr(vec![]));
        assert_eq!(one("{ }"), Syntax::Qexpr(vec![]));
    }

    #[test]
    fn test_comments_are_whitespace() {
        let forms = parse("; a comment\n(+ 1 2) ; trailing\n; last").expect("should parse");
        assert_eq!(forms.len(), 1);
    }

    #[test]
    fn test_multiple_top_level_forms() {
        let forms = parse("(def {x} 1)\n(+ x 1)").expect("should parse");
        assert_eq!(forms.len(), 2);
    }

    #[test]
    fn test_unclosed_sexpr_is_diagnostic() {
        let err = parse("(+ 1 2").expect_err("should fail");
        assert!(err.starts_with("Parse error"), "got: {}", err);
    }

    #[test]
    fn test_stray_close_is_diagnostic() {
        assert!(parse(")").is_err());
        assert!(parse("(+ 1))").is_err());
    }
}
