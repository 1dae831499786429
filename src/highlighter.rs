// ABOUTME: Syntax highlighter for the REPL with ANSI color support
// Implements rustyline's Highlighter trait to color qlisp syntax
// elements while preserving display width

use rustyline::completion::Completer;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Helper;
use std::borrow::Cow;
use std::collections::HashSet;

// ANSI color codes (3-bit/4-bit colors for maximum terminal compatibility)
const COLOR_RESET: &str = "\x1b[0m";
const COLOR_DELIMS: &str = "\x1b[1;34m"; // Bold blue
const COLOR_CORE_FORM: &str = "\x1b[1;35m"; // Bold magenta
const COLOR_BUILTIN: &str = "\x1b[36m"; // Cyan
const COLOR_NUMBER: &str = "\x1b[33m"; // Yellow
const COLOR_STRING: &str = "\x1b[32m"; // Green
const COLOR_BOOLEAN: &str = "\x1b[33m"; // Yellow
const COLOR_COMMENT: &str = "\x1b[90m"; // Bright black (gray)

/// REPL helper providing syntax-aware color highlighting
pub struct LispHelper;

impl LispHelper {
    pub fn new() -> Self {
        LispHelper
    }
}

impl Default for LispHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Helper for LispHelper {}

impl Completer for LispHelper {
    type Candidate = String;
}

impl Hinter for LispHelper {
    type Hint = String;
}

impl Validator for LispHelper {}

impl Highlighter for LispHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let highlighted = highlight_line(line, &core_forms(), &builtin_names());
        if highlighted == line {
            Cow::Borrowed(line)
        } else {
            Cow::Owned(highlighted)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

/// Names that shape programs rather than compute values
fn core_forms() -> HashSet<&'static str> {
    ["def", "def*", "\\", "fun", "if", "cond", "and", "or", "eval", "load"]
        .into_iter()
        .collect()
}

fn builtin_names() -> HashSet<&'static str> {
    [
        "+", "-", "*", "/", "%", "^", "min", "max", "<", "=", "list", "head", "tail", "init",
        "last", "nth", "cons", "join", "len", "not", "integer?", "float?", "boolean?", "string?",
        "list?", "quoted-list?", "error?", "procedure?", "builtin?", "equal?", "is?", "apply",
        "concat", "error", "assert",
    ]
    .into_iter()
    .collect()
}

fn push_colored(result: &mut String, color: &str, text: &str) {
    result.push_str(color);
    result.push_str(text);
    result.push_str(COLOR_RESET);
}

fn looks_numeric(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    digits.chars().any(|c| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || ".eE-".contains(c))
}

fn highlight_line(
    line: &str,
    core: &HashSet<&'static str>,
    builtins: &HashSet<&'static str>,
) -> String {
    let mut result = String::new();
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            // Comments run to end of line
            ';' => {
                result.push_str(COLOR_COMMENT);
                while i < chars.len() {
                    result.push(chars[i]);
                    i += 1;
                }
                result.push_str(COLOR_RESET);
            }

            // Strings: preserve exact content, step over escapes
            '"' => {
                result.push_str(COLOR_STRING);
                result.push(chars[i]);
                i += 1;
                while i < chars.len() {
                    result.push(chars[i]);
                    if chars[i] == '\\' && i + 1 < chars.len() {
                        i += 1;
                        result.push(chars[i]);
                    } else if chars[i] == '"' {
                        i += 1;
                        break;
                    }
                    i += 1;
                }
                result.push_str(COLOR_RESET);
            }

            c @ ('(' | ')' | '{' | '}') => {
                push_colored(&mut result, COLOR_DELIMS, &c.to_string());
                i += 1;
            }

            c if c.is_whitespace() => {
                result.push(c);
                i += 1;
            }

            // Anything else is a token up to the next delimiter
            _ => {
                let start = i;
                while i < chars.len()
                    && !chars[i].is_whitespace()
                    && !"(){};\"".contains(chars[i])
                {
                    i += 1;
                }
                let token: String = chars[start..i].iter().collect();
                if token == "#t" || token == "#f" {
                    push_colored(&mut result, COLOR_BOOLEAN, &token);
                } else if looks_numeric(&token) {
                    push_colored(&mut result, COLOR_NUMBER, &token);
                } else if core.contains(token.as_str()) {
                    push_colored(&mut result, COLOR_CORE_FORM, &token);
                } else if builtins.contains(token.as_str()) {
                    push_colored(&mut result, COLOR_BUILTIN, &token);
                } else {
                    result.push_str(&token);
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlight(line: &str) -> String {
        highlight_line(line, &core_forms(), &builtin_names())
    }

    #[test]
    fn test_plain_symbols_pass_through() {
        assert_eq!(highlight("foo bar"), "foo bar");
    }

    #[test]
    fn test_numbers_are_colored() {
        let out = highlight("42");
        assert!(out.contains(COLOR_NUMBER));
        assert!(out.contains("42"));
    }

    #[test]
    fn test_core_forms_and_builtins_differ() {
        let out = highlight("(def {x} (head {1}))");
        assert!(out.contains(COLOR_CORE_FORM));
        assert!(out.contains(COLOR_BUILTIN));
        assert!(out.contains(COLOR_DELIMS));
    }

    #[test]
    fn test_string_with_escaped_quote_stays_one_string() {
        let out = highlight("\"a\\\"b\" tail");
        // 'tail' lies outside the string and gets the builtin color
        assert!(out.contains(COLOR_BUILTIN));
    }

    #[test]
    fn test_comment_swallows_rest_of_line() {
        let out = highlight("1 ; def");
        assert!(out.contains(COLOR_COMMENT));
        // 'def' inside the comment is not highlighted as a core form
        assert!(!out.contains(COLOR_CORE_FORM));
    }

    #[test]
    fn test_stripped_output_preserves_text() {
        let line = "(fun {inc n} {(+ n 1)}) ; sugar";
        let out = highlight(line);
        let stripped = out
            .replace(COLOR_RESET, "")
            .replace(COLOR_DELIMS, "")
            .replace(COLOR_CORE_FORM, "")
            .replace(COLOR_BUILTIN, "")
            .replace(COLOR_NUMBER, "")
            .replace(COLOR_STRING, "")
            .replace(COLOR_BOOLEAN, "")
            .replace(COLOR_COMMENT, "");
        assert_eq!(stripped, line);
    }
}
