//! Error taxonomy shared by the reader and the evaluator
//!
//! Every failure in the language core is reported through [`Error`]. The
//! `Quit` variant is not a failure: it is the control signal raised by the
//! `quit` primitive and must be allowed to travel past every handler up to
//! whatever drives the evaluation.

use std::fmt;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Categorizes reader failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// Input ended before an expression was complete (missing `)`,
    /// dangling quote, empty input). More input may fix it.
    Incomplete,
    /// A token appeared where it can never be valid, such as a stray `)`.
    Unexpected,
}

/// Expected argument count of a procedure or special form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    /// Whether `provided` arguments satisfy this arity
    pub fn accepts(&self, provided: usize) -> bool {
        match *self {
            Arity::Exactly(n) => provided == n,
            Arity::AtLeast(n) => provided >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "{n}"),
            Arity::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Syntax {
        kind: SyntaxErrorKind,
        message: String,
    },
    UndefinedSymbol(String),
    Arity {
        procedure: String,
        expected: Arity,
        provided: usize,
    },
    Type(String),
    Arithmetic(String),
    /// Termination requested by `quit`
    Quit,
}

impl Error {
    pub fn incomplete(message: impl Into<String>) -> Self {
        Error::Syntax {
            kind: SyntaxErrorKind::Incomplete,
            message: message.into(),
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Error::Syntax {
            kind: SyntaxErrorKind::Unexpected,
            message: message.into(),
        }
    }

    pub fn arity(procedure: impl Into<String>, expected: Arity, provided: usize) -> Self {
        Error::Arity {
            procedure: procedure.into(),
            expected,
            provided,
        }
    }

    /// True for syntax errors that more input could resolve
    pub fn is_incomplete(&self) -> bool {
        matches!(
            self,
            Error::Syntax {
                kind: SyntaxErrorKind::Incomplete,
                ..
            }
        )
    }

    pub fn is_quit(&self) -> bool {
        matches!(self, Error::Quit)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Syntax { message, .. } => write!(f, "SyntaxError: {message}"),
            Error::UndefinedSymbol(name) => write!(f, "Undefined symbol: {name}"),
            Error::Arity {
                procedure,
                expected,
                provided,
            } => write!(
                f,
                "ArityError: {procedure}: expected {expected} arguments ({provided} provided)"
            ),
            Error::Type(msg) => write!(f, "TypeError: {msg}"),
            Error::Arithmetic(msg) => write!(f, "ArithmeticError: {msg}"),
            Error::Quit => write!(f, "quit"),
        }
    }
}

impl std::error::Error for Error {}
