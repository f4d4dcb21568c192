//! Interactive read-eval-print loop and file runner
//!
//! [`Session`] holds the line-accumulation logic so it can be driven by
//! rustyline in the binary and directly by tests.

use std::fs;
use std::path::Path;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use subscheme_core::{Environment, Error, Result, Tokenizer, Value, parse_sexp};

use crate::interpreter::{eval, eval_source};
use crate::options::{CONTINUATION_PROMPT, Options};
use crate::stdlib::global_environment;

// ============================================================================
// Session
// ============================================================================

/// Outcome of feeding one line of input to a [`Session`]
#[derive(Debug)]
pub enum Feed {
    /// The accumulated text ends inside an expression; more lines are needed
    Incomplete,
    /// One result per top-level expression, in order
    Evaluated(Vec<Result<Value>>),
    /// `quit` was called; results of the expressions before it are kept
    Quit(Vec<Result<Value>>),
}

pub struct Session {
    env: Environment,
    pending: String,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_environment(global_environment())
    }

    pub fn with_environment(env: Environment) -> Self {
        Session {
            env,
            pending: String::new(),
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Whether earlier lines are waiting for the rest of an expression
    pub fn is_continuing(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Drop any partially entered expression
    pub fn reset(&mut self) {
        self.pending.clear();
    }

    /// Append `line` to the pending text and evaluate it once it parses.
    /// Errors are reported per expression; a failing expression does not
    /// stop the ones after it. When the reader hits text it can never
    /// accept, the expressions read before it still run and the syntax
    /// error is reported last; the rest of the input is discarded.
    pub fn feed(&mut self, line: &str) -> Feed {
        if self.is_continuing() {
            self.pending.push('\n');
        }
        self.pending.push_str(line);

        let mut tokens = Tokenizer::new(&self.pending);
        let mut exprs = Vec::new();
        let mut syntax_error = None;
        while !tokens.is_exhausted() {
            match parse_sexp(&mut tokens) {
                Ok(expr) => exprs.push(expr),
                Err(err) if err.is_incomplete() => return Feed::Incomplete,
                Err(err) => {
                    syntax_error = Some(err);
                    break;
                }
            }
        }
        self.pending.clear();

        let mut results = Vec::with_capacity(exprs.len() + 1);
        for expr in &exprs {
            match eval(expr, &self.env) {
                Err(Error::Quit) => return Feed::Quit(results),
                result => results.push(result),
            }
        }
        if let Some(err) = syntax_error {
            results.push(Err(err));
        }
        Feed::Evaluated(results)
    }
}

fn report(results: Vec<Result<Value>>) {
    for result in results {
        match result {
            Ok(Value::Unspecified) => {}
            Ok(value) => println!("{value}"),
            Err(err) => {
                log::debug!("evaluation failed: {err:?}");
                eprintln!("{err}");
            }
        }
    }
}

// ============================================================================
// Drivers
// ============================================================================

pub fn run_repl(options: &Options) -> rustyline::Result<()> {
    let mut rl = DefaultEditor::new()?;
    if let Some(path) = &options.history {
        if let Err(err) = rl.load_history(path) {
            log::debug!("no history loaded from {}: {err}", path.display());
        }
    }

    let mut session = Session::new();

    loop {
        let prompt = if session.is_continuing() {
            CONTINUATION_PROMPT
        } else {
            options.prompt.as_str()
        };

        match rl.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                match session.feed(&line) {
                    Feed::Incomplete => {}
                    Feed::Evaluated(results) => report(results),
                    Feed::Quit(results) => {
                        report(results);
                        break;
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                session.reset();
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err),
        }
    }

    println!("Exiting... Bye!");

    if let Some(path) = &options.history {
        if let Err(err) = rl.save_history(path) {
            log::warn!("could not save history to {}: {err}", path.display());
        }
    }
    Ok(())
}

/// Evaluate each file in one shared global environment and return the
/// final value. A `quit` inside a file stops evaluation quietly with no
/// value.
pub fn run_files<P: AsRef<Path>>(paths: &[P]) -> std::result::Result<Option<Value>, String> {
    let env = global_environment();
    let mut last = None;

    for path in paths {
        let path = path.as_ref();
        let source = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read file '{}': {e}", path.display()))?;
        log::debug!("evaluating {}", path.display());

        match eval_source(&source, &env) {
            Ok(Some(value)) => last = Some(value),
            Ok(None) => {}
            Err(Error::Quit) => return Ok(None),
            Err(err) => return Err(format!("{}: {err}", path.display())),
        }
    }

    Ok(last.filter(|v| !matches!(v, Value::Unspecified)))
}
