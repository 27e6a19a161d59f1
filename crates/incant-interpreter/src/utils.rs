//! Argument and option validation shared by command implementations.

use incant_types::ast::{CommandExpression, Node, NodeKind};
use incant_types::{EvalError, Result, Value};

use crate::interpreter::Interpreter;

/// Accepted argument count for a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
    AtMost(usize),
    Between(usize, usize),
}

impl Arity {
    fn accepts(self, n: usize) -> bool {
        match self {
            Arity::Exact(want) => n == want,
            Arity::AtLeast(min) => n >= min,
            Arity::AtMost(max) => n <= max,
            Arity::Between(min, max) => n >= min && n <= max,
        }
    }

    fn describe(self) -> String {
        match self {
            Arity::Exact(want) => want.to_string(),
            Arity::AtLeast(min) => format!("at least {min}"),
            Arity::AtMost(max) => format!("at most {max}"),
            Arity::Between(min, max) => format!("between {min} and {max}"),
        }
    }
}

/// Fail with [`EvalError::Arity`] when the argument count is outside the
/// accepted range.
pub fn check_args_length(node: &CommandExpression, arity: Arity) -> Result<()> {
    if arity.accepts(node.args.len()) {
        return Ok(());
    }
    Err(EvalError::Arity {
        command: node.name.clone(),
        expected: arity.describe(),
        actual: node.args.len(),
    })
}

/// Fail with [`EvalError::UnknownOption`] on the first `--option` the
/// command does not declare.
pub fn check_opts(node: &CommandExpression, allowed: &[&str]) -> Result<()> {
    for opt in &node.opts {
        if !allowed.contains(&opt.name.as_str()) {
            return Err(EvalError::UnknownOption {
                command: node.name.clone(),
                option: opt.name.clone(),
            });
        }
    }
    Ok(())
}

/// Interpret the value of a named option, if present.
pub fn get_opt_value(
    interpreter: &mut Interpreter,
    node: &CommandExpression,
    name: &str,
) -> Result<Option<Value>> {
    match node.opt(name) {
        Some(value) => Ok(Some(interpreter.interpret_node(value)?)),
        None => Ok(None),
    }
}

/// Evaluate a node without an interpreter, covering only the forms that
/// need no bindings or chain access. Eager executions use this to bind
/// speculative values; anything context-dependent comes back as `None`.
pub fn eval_literal(node: &Node) -> Option<Value> {
    match &node.kind {
        NodeKind::NumberLiteral { value, power, time_unit } => {
            Value::from_number_literal(value, *power, *time_unit).ok()
        }
        NodeKind::StringLiteral(s) => Some(Value::String(s.clone())),
        NodeKind::BoolLiteral(b) => Some(Value::Bool(*b)),
        NodeKind::ProbableIdentifier(text) => {
            if incant_types::is_address(text) {
                Some(Value::Address(text.clone()))
            } else if incant_types::is_hex_bytes(text) {
                Some(Value::Bytes(text.clone()))
            } else {
                Some(Value::String(text.clone()))
            }
        }
        NodeKind::ArrayExpression(elements) => elements
            .iter()
            .map(eval_literal)
            .collect::<Option<Vec<_>>>()
            .map(Value::Array),
        _ => None,
    }
}
