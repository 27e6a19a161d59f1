//! Error types for the incant interpreter.
//!
//! Two families: [`SyntaxError`] for parse-time failures (positioned,
//! serializable for the embedding editor) and [`EvalError`] for
//! everything after parsing. Full-mode evaluation propagates `EvalError`
//! unmodified and aborts; the eager pass swallows them per node.

use crate::Position;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A parse-time error. Parsing fails fast: the first structural error
/// aborts the whole parse and no partial node list is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("syntax error at {position}: {message}")]
pub struct SyntaxError {
    pub position: Position,
    pub message: String,
}

impl SyntaxError {
    pub fn new(position: Position, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

/// Evaluation error — resolution misses, validation failures, scope
/// collisions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Argument count outside a command's declared bound.
    #[error("command '{command}' expects {expected} argument(s), got {actual}")]
    Arity {
        command: String,
        expected: String,
        actual: usize,
    },
    /// Option name not in the command's allow-list.
    #[error("command '{command}' does not accept option '--{option}'")]
    UnknownOption { command: String, option: String },
    /// Module (or alias target) lookup miss in full mode.
    #[error("module '{0}' not found; was it loaded?")]
    UnresolvedModule(String),
    /// Command lookup miss inside a resolved module.
    #[error("command '{command}' not found on module '{module}'")]
    UnresolvedCommand { module: String, command: String },
    /// Semantic validation failure (malformed address, bad literal, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Non-global add colliding with an existing (identifier, space)
    /// pair in the current scope frame.
    #[error("binding '{identifier}' already exists in the current scope of the {space} space")]
    DuplicateBinding { identifier: String, space: String },
    /// A call expression or chain-dependent helper was evaluated without
    /// a connected chain client.
    #[error("no chain connection available: {0}")]
    Connection(String),
    /// Parse failure surfaced through an evaluation entry point.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_display_carries_position() {
        let err = SyntaxError::new(Position::new(3, 7), "unexpected ']'");
        assert_eq!(err.to_string(), "syntax error at 3:7: unexpected ']'");
    }

    #[test]
    fn syntax_error_json_shape() {
        let err = SyntaxError::new(Position::new(1, 4), "unterminated string");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"line\":1"));
        assert!(json.contains("\"col\":4"));
        assert!(json.contains("\"message\":\"unterminated string\""));

        let back: SyntaxError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }

    #[test]
    fn eval_error_messages() {
        let err = EvalError::UnknownOption {
            command: "raw".into(),
            option: "gas".into(),
        };
        assert_eq!(err.to_string(), "command 'raw' does not accept option '--gas'");

        let err = EvalError::DuplicateBinding {
            identifier: "x".into(),
            space: "user".into(),
        };
        assert_eq!(
            err.to_string(),
            "binding 'x' already exists in the current scope of the user space"
        );
    }
}
