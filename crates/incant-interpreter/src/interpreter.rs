//! Full-mode interpretation.
//!
//! Full mode runs a script for real: commands execute top to bottom,
//! the first error aborts the run, and the output is the flat list of
//! transaction actions the commands produced, in source order.

use std::sync::Arc;

use incant_types::ast::{CommandExpression, Node, NodeKind};
use incant_types::{is_address, is_hex_bytes, Action, EvalError, Result, Value};

use crate::bindings::{AllBindingsOpts, BindingValue, BindingsManager, BindingsSpace};
use crate::module::{resolve_module, ModuleCatalog};
use crate::std_module;

/// External chain access. Call expressions and calldata encoding go
/// through this seam so the interpreter itself stays offline; tests
/// plug in a canned implementation.
pub trait ChainClient: Send + Sync {
    /// Read-only contract call: `target::method(args)`.
    fn call(&self, target: &str, method: &str, args: &[Value]) -> Result<Value>;

    /// ABI-encode a function call into `0x`-prefixed calldata.
    fn encode_call(&self, signature: &str, args: &[Value]) -> Result<String>;
}

/// Static interpreter configuration.
#[derive(Debug, Clone, Default)]
pub struct InterpreterConfig {
    /// The account actions are sent from; `@me` resolves to it.
    pub account: Option<String>,
    pub chain_id: Option<u64>,
}

/// The full-mode evaluator. One instance per script run.
pub struct Interpreter {
    pub bindings: BindingsManager,
    pub config: InterpreterConfig,
    catalog: Arc<ModuleCatalog>,
    client: Option<Arc<dyn ChainClient>>,
}

impl Interpreter {
    /// Build an interpreter with the std module preloaded and the given
    /// catalog available to `load`.
    pub fn new(config: InterpreterConfig, catalog: ModuleCatalog) -> Self {
        let catalog = Arc::new(catalog);
        let mut bindings = BindingsManager::new();
        std_module::seed(&mut bindings, &catalog);
        Interpreter {
            bindings,
            config,
            catalog,
            client: None,
        }
    }

    pub fn with_client(mut self, client: Arc<dyn ChainClient>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn catalog(&self) -> &ModuleCatalog {
        &self.catalog
    }

    /// Run a parsed script. Commands execute in source order; the first
    /// failing command aborts the run and no partial action list is
    /// returned.
    pub fn interpret(&mut self, nodes: &[Node]) -> Result<Vec<Action>> {
        let mut actions = Vec::new();
        for node in nodes {
            let NodeKind::CommandExpression(command) = &node.kind else {
                return Err(EvalError::InvalidArgument(format!(
                    "expected a command, got {node}"
                )));
            };
            actions.extend(self.run_command(command)?);
        }
        Ok(actions)
    }

    /// Parse and run a script in one step.
    pub fn interpret_source(&mut self, source: &str) -> Result<Vec<Action>> {
        let nodes = incant_parser::parse(source).map_err(EvalError::from)?;
        self.interpret(&nodes)
    }

    fn run_command(&mut self, command: &CommandExpression) -> Result<Vec<Action>> {
        let (canonical, implementation) = {
            let (canonical, module) = resolve_module(command, &self.bindings);
            match module {
                None => return Err(EvalError::UnresolvedModule(canonical)),
                Some(module) => (canonical, module.command(&command.name)),
            }
        };
        let implementation = implementation.ok_or_else(|| EvalError::UnresolvedCommand {
            module: canonical,
            command: command.name.clone(),
        })?;
        implementation.run(self, command)
    }

    /// Evaluate one expression node to a value.
    pub fn interpret_node(&mut self, node: &Node) -> Result<Value> {
        match &node.kind {
            NodeKind::NumberLiteral { value, power, time_unit } => {
                Value::from_number_literal(value, *power, *time_unit)
            }
            NodeKind::StringLiteral(s) => Ok(Value::String(s.clone())),
            NodeKind::BoolLiteral(b) => Ok(Value::Bool(*b)),
            NodeKind::ArrayExpression(elements) => elements
                .iter()
                .map(|el| self.interpret_node(el))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            NodeKind::VariableIdentifier(name) => {
                let key = format!("${name}");
                self.bindings
                    .get_binding_value(&key, BindingsSpace::User)
                    .and_then(BindingValue::as_value)
                    .cloned()
                    .ok_or_else(|| {
                        EvalError::InvalidArgument(format!("variable {key} is not defined"))
                    })
            }
            NodeKind::ProbableIdentifier(text) => Ok(self.resolve_probable_identifier(text)),
            NodeKind::HelperFunctionExpression { name, args } => self.run_helper(name, args),
            NodeKind::CallExpression { target, method, args } => {
                let target = self.interpret_node(target)?;
                let target = target.as_address()?.to_owned();
                let args = args
                    .iter()
                    .map(|a| self.interpret_node(a))
                    .collect::<Result<Vec<_>>>()?;
                self.client()?.call(&target, method, &args)
            }
            NodeKind::CommandExpression(c) => Err(EvalError::InvalidArgument(format!(
                "command '{}' cannot appear in expression position",
                c.name
            ))),
        }
    }

    /// Contextual meaning of a bare word: a literal address or byte
    /// string stays literal, a name bound in the ADDR or USER space
    /// resolves to its binding, anything else is plain text.
    fn resolve_probable_identifier(&self, text: &str) -> Value {
        if is_address(text) {
            return Value::Address(text.to_owned());
        }
        if is_hex_bytes(text) {
            return Value::Bytes(text.to_owned());
        }
        if let Some(addr) = self
            .bindings
            .get_binding_value(text, BindingsSpace::Addr)
            .and_then(BindingValue::as_address)
        {
            return Value::Address(addr.to_owned());
        }
        if let Some(value) = self
            .bindings
            .get_binding_value(text, BindingsSpace::User)
            .and_then(BindingValue::as_value)
        {
            return value.clone();
        }
        Value::String(text.to_owned())
    }

    fn run_helper(&mut self, name: &str, args: &[Node]) -> Result<Value> {
        let helper = self
            .bindings
            .get_all_bindings(AllBindingsOpts::spaces(&[BindingsSpace::Module]))
            .into_iter()
            .find_map(|b| b.value.as_module().and_then(|m| m.helper(name)));
        match helper {
            Some(helper) => helper.run(self, args),
            None => Err(EvalError::InvalidArgument(format!(
                "helper @{name} is not provided by any loaded module"
            ))),
        }
    }

    pub(crate) fn client(&self) -> Result<&Arc<dyn ChainClient>> {
        self.client
            .as_ref()
            .ok_or_else(|| EvalError::Connection("no chain client configured".into()))
    }

    /// The account actions originate from, when configured.
    pub fn account(&self) -> Option<&str> {
        self.config.account.as_deref()
    }
}

impl std::fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("config", &self.config)
            .field("modules", &self.catalog.keys().collect::<Vec<_>>())
            .field("connected", &self.client.is_some())
            .finish()
    }
}
