//! Core language definition for Subscheme
//!
//! This crate contains the fundamental types, tokenizer, parser and
//! environment model for the Subscheme language. It does not evaluate
//! anything - the evaluator and primitive procedures live in the
//! `subscheme` crate.

pub mod environment;
pub mod error;
pub mod interner;
pub mod language;
pub mod lexer;
pub mod numeric;
pub mod parser;

// Re-export commonly used items for convenience
pub use environment::Environment;
pub use error::{Arity, Error, Result, SyntaxErrorKind};
pub use interner::InternedSymbol;
pub use language::{AtomType, Closure, NativeFn, Primitive, Value};
pub use lexer::Tokenizer;
pub use numeric::NumericType;
pub use parser::{parse, parse_all, parse_atom, parse_list, parse_sexp};
