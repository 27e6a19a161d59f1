//! The built-in `std` module: variable declaration, module loading,
//! raw and encoded transactions, chain selection, and the core helper
//! functions. It is preloaded into every script and is the implicit
//! dispatch target of unqualified commands.

mod exec;
mod helpers;
mod load;
mod raw;
mod set;
mod switch;

use std::sync::Arc;

use crate::bindings::{Binding, BindingValue, BindingsManager, BindingsSpace, DEFAULT_MODULE};
use crate::module::{ModuleCatalog, ModuleData};

pub use exec::ExecCommand;
pub use helpers::{DateHelper, MeHelper};
pub use load::LoadCommand;
pub use raw::RawCommand;
pub use set::SetCommand;
pub use switch::{SwitchCommand, CHAIN_ID};

pub const NAME: &str = DEFAULT_MODULE;

/// Build the std module. `load` needs the catalog to know what it can
/// bring into scope.
pub fn module_data(catalog: Arc<ModuleCatalog>) -> ModuleData {
    ModuleData::new()
        .with_command("set", Arc::new(SetCommand))
        .with_command("load", Arc::new(LoadCommand::new(catalog)))
        .with_command("raw", Arc::new(RawCommand))
        .with_command("exec", Arc::new(ExecCommand))
        .with_command("switch", Arc::new(SwitchCommand))
        .with_helper("me", Arc::new(MeHelper))
        .with_helper("date", Arc::new(DateHelper))
}

/// Install std into a bindings manager under its canonical name and the
/// identity alias. Idempotent.
pub fn seed(bindings: &mut BindingsManager, catalog: &Arc<ModuleCatalog>) {
    bindings.merge_bindings(vec![
        Binding::new(
            NAME,
            BindingValue::Module(module_data(Arc::clone(catalog))),
            BindingsSpace::Module,
        ),
        Binding::new(NAME, BindingValue::Alias(NAME.to_owned()), BindingsSpace::Alias),
    ]);
}
