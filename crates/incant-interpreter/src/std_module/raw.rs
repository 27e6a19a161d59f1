//! `raw target data [value] [--from address]`

use incant_types::ast::{CommandExpression, Node};
use incant_types::{Action, EvalError, Position, Result, Value};

use crate::bindings::{AllBindingsOpts, BindingsManager, BindingsSpace};
use crate::interpreter::Interpreter;
use crate::module::Command;
use crate::utils::{check_args_length, check_opts, get_opt_value, Arity};

/// Emits a single pre-encoded transaction. The calldata is taken as-is,
/// so this is the escape hatch for anything no command covers yet.
pub struct RawCommand;

impl Command for RawCommand {
    fn run(&self, interpreter: &mut Interpreter, node: &CommandExpression) -> Result<Vec<Action>> {
        check_args_length(node, Arity::Between(2, 3))?;
        check_opts(node, &["from"])?;

        let to = interpreter.interpret_node(&node.args[0])?.as_address()?.to_owned();
        let data = match interpreter.interpret_node(&node.args[1])? {
            Value::Bytes(b) => b,
            Value::Address(a) => a,
            other => {
                return Err(EvalError::InvalidArgument(format!(
                    "raw expects 0x-prefixed calldata, got {other}"
                )))
            }
        };

        let mut action = Action::new(to, data);
        if let Some(arg) = node.args.get(2) {
            let value = interpreter.interpret_node(arg)?.as_number()?;
            action = action.with_value(value);
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
        match arg_index {
            0 | 1 | 2 => {
                bindings.get_all_binding_identifiers(AllBindingsOpts::spaces(&[BindingsSpace::Addr]))
            }
            _ => Vec::new(),
        }
    }
}
