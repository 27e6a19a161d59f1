//! `set $variable value`

use incant_types::ast::{CommandExpression, Node, NodeKind};
use incant_types::{Action, EvalError, Position, Result, Value};

use crate::bindings::{AllBindingsOpts, BindingValue, BindingsManager, BindingsSpace};
use crate::interpreter::Interpreter;
use crate::module::{Command, LazyBindings};
use crate::utils::{check_args_length, check_opts, eval_literal, Arity};

/// Declares a user variable in the current scope. Variables are bound
/// under their `$`-prefixed name in the USER space; redeclaring one in
/// the same scope is an error.
pub struct SetCommand;

fn variable_key(node: &CommandExpression) -> Result<String> {
    match &node.args[0].kind {
        NodeKind::VariableIdentifier(name) => Ok(format!("${name}")),
        other => Err(EvalError::InvalidArgument(format!(
            "set expects a $variable as its first argument, got {other:?}"
        ))),
    }
}

impl Command for SetCommand {
    fn run(&self, interpreter: &mut Interpreter, node: &CommandExpression) -> Result<Vec<Action>> {
        check_args_length(node, Arity::Exact(2))?;
        check_opts(node, &[])?;
        let key = variable_key(node)?;
        let value = interpreter.interpret_node(&node.args[1])?;
        interpreter
            .bindings
            .set_binding(key, BindingValue::Value(value), BindingsSpace::User, false)?;
        Ok(Vec::new())
    }

    fn run_eager_execution(
        &self,
        node: &CommandExpression,
        _bindings: &BindingsManager,
        _is_closest_to_caret: bool,
    ) -> Result<Option<LazyBindings>> {
        check_args_length(node, Arity::Exact(2))?;
        let key = variable_key(node)?;
        // Context-dependent values cannot be evaluated here; the name
        // still has to exist for downstream resolution and completion.
        let value = eval_literal(&node.args[1]).unwrap_or(Value::String(String::new()));
        Ok(Some(Box::new(move |bindings| {
            bindings.set_binding(key, BindingValue::Value(value), BindingsSpace::User, false)
        })))
    }

    fn build_completion_items_for_arg(
        &self,
        arg_index: usize,
        args: &[Node],
        bindings: &BindingsManager,
        _caret: Position,
    ) -> Vec<String> {
        match arg_index {
            // The slot declares a fresh name, nothing to suggest.
            0 => Vec::new(),
            // The value slot may reference any variable except the one
            // being declared.
            1 => {
                let declared = match args.first().map(|a| &a.kind) {
                    Some(NodeKind::VariableIdentifier(name)) => Some(format!("${name}")),
                    _ => None,
                };
                bindings
                    .get_all_binding_identifiers(AllBindingsOpts::spaces(&[BindingsSpace::User]))
                    .into_iter()
                    .filter(|id| Some(id) != declared.as_ref())
                    .collect()
            }
            _ => Vec::new(),
        }
    }
}
