//! `load module` / `load module as alias`

use std::sync::Arc;

use incant_types::ast::{CommandExpression, Node, NodeKind};
use incant_types::{Action, EvalError, Position, Result};

use crate::bindings::{Binding, BindingValue, BindingsManager, BindingsSpace};
use crate::interpreter::Interpreter;
use crate::module::{Command, LazyBindings, ModuleCatalog, ModuleData};
use crate::utils::{check_args_length, check_opts, Arity};

/// Brings a module from the catalog into scope: one MODULE binding
/// under the canonical name and one ALIAS binding pointing at it, under
/// the chosen short name or the canonical name itself.
pub struct LoadCommand {
    catalog: Arc<ModuleCatalog>,
}

impl LoadCommand {
    pub fn new(catalog: Arc<ModuleCatalog>) -> Self {
        LoadCommand { catalog }
    }

    /// `[name]` or `[name, as, alias]`.
    fn parse_spec(node: &CommandExpression) -> Result<(String, String)> {
        fn word(arg: &Node, what: &str) -> Result<String> {
            match &arg.kind {
                NodeKind::ProbableIdentifier(text) => Ok(text.clone()),
                other => Err(EvalError::InvalidArgument(format!(
                    "load expects {what}, got {other:?}"
                ))),
            }
        }
        match node.args.len() {
            1 => {
                let name = word(&node.args[0], "a module name")?;
                Ok((name.clone(), name))
            }
            3 => {
                let name = word(&node.args[0], "a module name")?;
                if word(&node.args[1], "the keyword 'as'")? != "as" {
                    return Err(EvalError::InvalidArgument(
                        "load expects 'as' between the module name and its alias".into(),
                    ));
                }
                let alias = word(&node.args[2], "an alias")?;
                Ok((name, alias))
            }
            _ => Err(EvalError::InvalidArgument(
                "load expects 'load module' or 'load module as alias'".into(),
            )),
        }
    }

    fn module_for(&self, name: &str) -> Option<ModuleData> {
        if name == super::NAME {
            // Re-aliasing the preloaded module is legal: `load std as a`.
            return Some(super::module_data(Arc::clone(&self.catalog)));
        }
        self.catalog.get(name).cloned()
    }

    fn bindings_for(&self, name: &str, alias: &str) -> Option<Vec<Binding>> {
        let data = self.module_for(name)?;
        Some(vec![
            Binding::new(name, BindingValue::Module(data), BindingsSpace::Module),
            Binding::new(alias, BindingValue::Alias(name.to_owned()), BindingsSpace::Alias),
        ])
    }
}

impl Command for LoadCommand {
    fn run(&self, interpreter: &mut Interpreter, node: &CommandExpression) -> Result<Vec<Action>> {
        check_args_length(node, Arity::Between(1, 3))?;
        check_opts(node, &[])?;
        let (name, alias) = Self::parse_spec(node)?;
        let module = self
            .module_for(&name)
            .ok_or_else(|| EvalError::UnresolvedModule(name.clone()))?;
        // The module binding merges so an already-loaded module (std
        // included) can still gain a fresh alias; a clashing alias is a
        // real error.
        interpreter.bindings.merge_bindings(vec![Binding::new(
            &name,
            BindingValue::Module(module),
            BindingsSpace::Module,
        )]);
        interpreter
            .bindings
            .set_binding(alias, BindingValue::Alias(name), BindingsSpace::Alias, false)?;
        Ok(Vec::new())
    }

    fn run_eager_execution(
        &self,
        node: &CommandExpression,
        _bindings: &BindingsManager,
        _is_closest_to_caret: bool,
    ) -> Result<Option<LazyBindings>> {
        let (name, alias) = Self::parse_spec(node)?;
        // An unknown module is not an eager-mode error, it just binds
        // nothing.
        let Some(bindings) = self.bindings_for(&name, &alias) else {
            return Ok(None);
        };
        Ok(Some(Box::new(move |manager| {
            manager.merge_bindings(bindings);
            Ok(())
        })))
    }

    fn build_completion_items_for_arg(
        &self,
        arg_index: usize,
        _args: &[Node],
        bindings: &BindingsManager,
        _caret: Position,
    ) -> Vec<String> {
        if arg_index != 0 {
            return Vec::new();
        }
        self.catalog
            .keys()
            .filter(|name| !bindings.has_binding(name, BindingsSpace::Module))
            .cloned()
            .collect()
    }
}
