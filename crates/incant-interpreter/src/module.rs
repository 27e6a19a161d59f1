//! Module, command and helper contracts.
//!
//! A module is a named bag of commands and helper functions. Loaded
//! modules live in the MODULE space of the bindings manager and are
//! reached through the ALIAS space, so `load giveth as g` makes
//! `g:donate ...` dispatch into the giveth module.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use incant_types::ast::{CommandExpression, Node};
use incant_types::{Action, Position, Result, Value};

use crate::bindings::{BindingValue, BindingsManager, BindingsSpace, DEFAULT_MODULE};
use crate::interpreter::Interpreter;

/// Deferred binding mutation produced by an eager execution. Collected
/// while scanning in reverse source order, applied in forward source
/// order once the scan is done.
pub type LazyBindings = Box<dyn FnOnce(&mut BindingsManager) -> Result<()> + Send>;

/// A command implementation.
///
/// `run` is the full-interpretation entry point and the only mandatory
/// method. The other two back the editor surface and default to doing
/// nothing, which is the right behavior for commands that neither bind
/// names nor take completable arguments.
pub trait Command: Send + Sync {
    /// Execute the command for real, returning the on-chain actions it
    /// contributes to the script's output.
    fn run(&self, interpreter: &mut Interpreter, node: &CommandExpression) -> Result<Vec<Action>>;

    /// Speculatively execute for editor analysis. Must not touch the
    /// chain. `is_closest_to_caret` is true for the last textual
    /// occurrence of this command in the script.
    fn run_eager_execution(
        &self,
        _node: &CommandExpression,
        _bindings: &BindingsManager,
        _is_closest_to_caret: bool,
    ) -> Result<Option<LazyBindings>> {
        Ok(None)
    }

    /// Identifier suggestions for the argument slot the caret is in.
    fn build_completion_items_for_arg(
        &self,
        _arg_index: usize,
        _args: &[Node],
        _bindings: &BindingsManager,
        _caret: Position,
    ) -> Vec<String> {
        Vec::new()
    }
}

/// A helper function implementation, invoked as `@name(args...)` in
/// expression position.
pub trait HelperFunction: Send + Sync {
    fn run(&self, interpreter: &mut Interpreter, args: &[Node]) -> Result<Value>;
}

/// The commands and helpers a module exposes.
#[derive(Clone, Default)]
pub struct ModuleData {
    commands: BTreeMap<String, Arc<dyn Command>>,
    helpers: BTreeMap<String, Arc<dyn HelperFunction>>,
}

impl ModuleData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_command(mut self, name: impl Into<String>, command: Arc<dyn Command>) -> Self {
        self.commands.insert(name.into(), command);
        self
    }

    pub fn with_helper(mut self, name: impl Into<String>, helper: Arc<dyn HelperFunction>) -> Self {
        self.helpers.insert(name.into(), helper);
        self
    }

    pub fn command(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.commands.get(name).cloned()
    }

    pub fn helper(&self, name: &str) -> Option<Arc<dyn HelperFunction>> {
        self.helpers.get(name).cloned()
    }

    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    pub fn helper_names(&self) -> impl Iterator<Item = &str> {
        self.helpers.keys().map(String::as_str)
    }
}

impl fmt::Debug for ModuleData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleData")
            .field("commands", &self.commands.keys().collect::<Vec<_>>())
            .field("helpers", &self.helpers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Modules available to `load`, keyed by canonical name. The std module
/// is preloaded and never appears here.
pub type ModuleCatalog = BTreeMap<String, ModuleData>;

/// Resolve the module a command node dispatches into.
///
/// The explicit qualifier wins, else the scope's active module, else
/// [`DEFAULT_MODULE`]. The name then takes a single hop through the
/// ALIAS space to a canonical identifier; alias-to-alias chains are not
/// followed. Returns the canonical identifier together with the module,
/// or the identifier alone when no module is loaded under it.
pub fn resolve_module<'b>(
    node: &CommandExpression,
    bindings: &'b BindingsManager,
) -> (String, Option<&'b ModuleData>) {
    let name = node
        .module
        .clone()
        .or_else(|| bindings.scope_module())
        .unwrap_or_else(|| DEFAULT_MODULE.to_owned());
    let canonical = bindings
        .get_binding_value(&name, BindingsSpace::Alias)
        .and_then(BindingValue::as_alias_target)
        .map(str::to_owned)
        .unwrap_or(name);
    let module = bindings
        .get_binding_value(&canonical, BindingsSpace::Module)
        .and_then(BindingValue::as_module);
    (canonical, module)
}

/// Resolve a command node to its canonical module identifier and
/// implementation. `None` for the implementation means either the
/// module is not loaded or the module has no such command.
pub fn resolve_command_node(
    node: &CommandExpression,
    bindings: &BindingsManager,
) -> (String, Option<Arc<dyn Command>>) {
    let (canonical, module) = resolve_module(node, bindings);
    let command = module.and_then(|m| m.command(&node.name));
    (canonical, command)
}
