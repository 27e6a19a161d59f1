//! The incant interpreter.
//!
//! Scripts parse into command nodes and run in one of two modes. Full
//! mode executes for real: sequential, abort on first error, output is
//! the ordered list of transaction actions. Eager mode runs the same
//! commands speculatively for the editor: no chain access, errors
//! swallowed per statement, output is the bindings describing what
//! names exist at the caret.

pub mod bindings;
pub mod eager;
pub mod interpreter;
pub mod module;
pub mod std_module;
pub mod utils;

pub use bindings::{AllBindingsOpts, Binding, BindingValue, BindingsManager, BindingsSpace};
pub use eager::{run_eager_executions, run_load_commands};
pub use interpreter::{ChainClient, Interpreter, InterpreterConfig};
pub use module::{
    resolve_command_node, resolve_module, Command, HelperFunction, LazyBindings, ModuleCatalog,
    ModuleData,
};
