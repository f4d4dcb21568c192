//! Subscheme runtime - evaluator and primitive procedures
//!
//! This crate provides the execution side of Subscheme:
//! - Tree-walking evaluator with a closed set of special forms
//! - Primitive procedures and global environment seeding
//! - REPL session handling and file runner
//! - Command-line options for the `subscheme` binary

pub mod interpreter;
pub mod options;
pub mod repl;
pub mod stdlib;

// Re-export evaluator entry points
pub use interpreter::{Form, apply, call, eval, eval_source};

// Re-export global environment setup
pub use stdlib::{global_environment, register_primitives};

pub use options::Options;
pub use repl::{Feed, Session};
