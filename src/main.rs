// ABOUTME: CLI entry point: load files, then drop into the REPL

use clap::Parser;
use qlisp::builtins::register_builtins;
use qlisp::config::{HISTORY_FILE, PRELUDE_PATH, PROMPT, WELCOME_HINT, WELCOME_MESSAGE};
use qlisp::env::Environment;
use qlisp::eval::eval;
use qlisp::highlighter::LispHelper;
use qlisp::run;
use qlisp::value::Value;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Tree-walking interpreter for the qlisp language
#[derive(Parser, Debug)]
#[command(name = "qlisp")]
#[command(version = qlisp::config::VERSION)]
#[command(about = "A small Lisp with Q-expressions")]
struct CliArgs {
    /// Source files to load in order after the prelude
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Exit after loading files instead of starting the REPL
    #[arg(long = "stop")]
    stop: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let env = Environment::new();
    register_builtins(&env);

    let prelude = Path::new(PRELUDE_PATH);
    if prelude.exists() {
        if let Value::Err(msg) = run::load_file(&env, prelude) {
            eprintln!("Warning: failed to load prelude: {}", msg);
        }
    }

    for file in &args.files {
        match run::try_load_file(&env, file) {
            // an unreadable source file is an unrecoverable I/O error:
            // exit non-zero instead of limping into the REPL
            Err(e) => return Err(Box::new(e)),
            Ok(Value::Err(msg)) => println!("Error: {}", msg),
            Ok(_) => {}
        }
    }

    if args.stop {
        return Ok(());
    }

    repl(&env)
}

fn repl(env: &Rc<Environment>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::builder().auto_add_history(true).build();
    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(LispHelper::new()));
    let _ = rl.load_history(HISTORY_FILE);

    println!("{}", WELCOME_MESSAGE);
    println!("{}", WELCOME_HINT);

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                if line.trim() == "(exit)" {
                    break;
                }
                eval_and_print(env, &line);
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(err) => {
                let _ = rl.save_history(HISTORY_FILE);
                return Err(Box::new(err));
            }
        }
    }

    let _ = rl.save_history(HISTORY_FILE);
    Ok(())
}

/// Evaluate every form on the line and print each result
fn eval_and_print(env: &Rc<Environment>, line: &str) {
    match run::read_forms(line) {
        Ok(forms) => {
            for form in forms {
                match eval(env, form) {
                    Value::Err(msg) => println!("Error: {}", msg),
                    value => println!("{}", value),
                }
            }
        }
        Err(diagnostic) => eprintln!("{}", diagnostic),
    }
}
