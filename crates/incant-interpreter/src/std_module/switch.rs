//! `switch chain`

use incant_types::ast::CommandExpression;
use incant_types::{Action, EvalError, Result, Value};

use crate::bindings::{BindingValue, BindingsManager, BindingsSpace};
use crate::interpreter::Interpreter;
use crate::module::{Command, LazyBindings};
use crate::utils::{check_args_length, check_opts, eval_literal, Arity};

/// Bookkeeping identifier holding the selected chain id.
pub const CHAIN_ID: &str = "chainId";

/// Selects the chain the rest of the script targets, by numeric id or
/// by well-known name.
pub struct SwitchCommand;

fn chain_id(value: &Value) -> Result<u64> {
    match value {
        Value::Number(n) => u64::try_from(*n)
            .map_err(|_| EvalError::InvalidArgument(format!("invalid chain id {n}"))),
        Value::String(name) => match name.as_str() {
            "mainnet" => Ok(1),
            "gnosis" => Ok(100),
            "polygon" => Ok(137),
            "sepolia" => Ok(11_155_111),
            other => Err(EvalError::InvalidArgument(format!("unknown chain '{other}'"))),
        },
        other => Err(EvalError::InvalidArgument(format!(
            "switch expects a chain id or name, got {other}"
        ))),
    }
}

impl Command for SwitchCommand {
    fn run(&self, interpreter: &mut Interpreter, node: &CommandExpression) -> Result<Vec<Action>> {
        check_args_length(node, Arity::Exact(1))?;
        check_opts(node, &[])?;
        let id = chain_id(&interpreter.interpret_node(&node.args[0])?)?;
        interpreter.config.chain_id = Some(id);
        // Global add: a later switch replaces the visible entry.
        interpreter.bindings.set_binding(
            CHAIN_ID,
            BindingValue::Text(id.to_string()),
            BindingsSpace::Other,
            true,
        )?;
        Ok(Vec::new())
    }

    fn run_eager_execution(
        &self,
        node: &CommandExpression,
        _bindings: &BindingsManager,
        is_closest_to_caret: bool,
    ) -> Result<Option<LazyBindings>> {
        // Only the occurrence nearest the caret defines the chain
        // context the editor should describe.
        if !is_closest_to_caret {
            return Ok(None);
        }
        check_args_length(node, Arity::Exact(1))?;
        let value = eval_literal(&node.args[0]).ok_or_else(|| {
            EvalError::InvalidArgument("switch expects a literal chain id or name".into())
        })?;
        let id = chain_id(&value)?;
        Ok(Some(Box::new(move |bindings| {
            bindings.set_binding(CHAIN_ID, BindingValue::Text(id.to_string()), BindingsSpace::Other, true)
        })))
    }
}
