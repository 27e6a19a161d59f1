//! Shared types for the incant interpreter.
//!
//! This crate defines the syntax-node tree, source positions, runtime
//! values, transaction-action descriptors, and the error types used
//! across all interpreter stages.

mod action;
mod error;
mod span;
mod value;
pub mod ast;

pub use action::Action;
pub use error::{EvalError, SyntaxError};
pub use span::{Position, SourceFile, Span};
pub use value::{is_address, is_hex_bytes, Value};

/// Result type used throughout the interpreter stages.
pub type Result<T> = std::result::Result<T, EvalError>;
