//! `exec target signature [params...] [--value amount] [--from address]`

use incant_types::ast::{CommandExpression, Node, NodeKind};
use incant_types::{Action, EvalError, Position, Result};

use crate::bindings::{AllBindingsOpts, BindingsManager, BindingsSpace};
use crate::interpreter::Interpreter;
use crate::module::Command;
use crate::utils::{check_args_length, check_opts, get_opt_value, Arity};

/// Encodes and emits one contract call. Encoding goes through the chain
/// client, so running this command requires a connection.
pub struct ExecCommand;

fn signature(node: &Node) -> Result<String> {
    match &node.kind {
        NodeKind::StringLiteral(s) => Ok(s.clone()),
        NodeKind::ProbableIdentifier(s) => Ok(s.clone()),
        other => Err(EvalError::InvalidArgument(format!(
            "exec expects a function signature, got {other:?}"
        ))),
    }
}

impl Command for ExecCommand {
    fn run(&self, interpreter: &mut Interpreter, node: &CommandExpression) -> Result<Vec<Action>> {
        check_args_length(node, Arity::AtLeast(2))?;
        check_opts(node, &["value", "from"])?;

        let to = interpreter.interpret_node(&node.args[0])?.as_address()?.to_owned();
        let signature = signature(&node.args[1])?;
        let params = node.args[2..]
            .iter()
            .map(|arg| interpreter.interpret_node(arg))
            .collect::<Result<Vec<_>>>()?;
        let data = interpreter.client()?.encode_call(&signature, &params)?;

        let mut action = Action::new(to, data);
        if let Some(value) = get_opt_value(interpreter, node, "value")? {
            action = action.with_value(value.as_number()?);
        }
        let from = match get_opt_value(interpreter, node, "from")? {
            Some(v) => Some(v.as_address()?.to_owned()),
            None => interpreter.account().map(str::to_owned),
        };
        if let Some(from) = from {
            action = action.with_from(from);
        }
        Ok(vec![action])
    }

    fn build_completion_items_for_arg(
        &self,
        arg_index: usize,
        _args: &[Node],
        bindings: &BindingsManager,
        _caret: Position,
    ) -> Vec<String> {
        if arg_index == 0 {
            bindings.get_all_binding_identifiers(AllBindingsOpts::spaces(&[BindingsSpace::Addr]))
        } else {
            Vec::new()
        }
    }
}
