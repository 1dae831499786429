// ABOUTME: Configuration and constants for the interpreter

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const WELCOME_MESSAGE: &str = "qlisp version 0.1.0";
pub const WELCOME_HINT: &str = "Type (exit) or press Ctrl-D to leave.";

pub const PROMPT: &str = "qlisp> ";

/// Well-known path of the prelude, written in qlisp itself and loaded
/// before any user source.
pub const PRELUDE_PATH: &str = "lang/base.qlisp";

pub const HISTORY_FILE: &str = ".qlisp_history";
