//! Suggestion builders.
//!
//! All builders read from an eagerly-populated [`BindingsManager`]; the
//! embedding editor runs the eager pass on every keystroke, then asks
//! for the item groups relevant to the caret location.

use incant_interpreter::bindings::DEFAULT_MODULE;
use incant_interpreter::{
    resolve_command_node, AllBindingsOpts, BindingsManager, BindingsSpace,
};
use incant_types::ast::CommandExpression;
use incant_types::Position;

use crate::items::{CompletionItem, CompletionKind};

/// Sort bucket for argument-specific suggestions, the top group.
const SORT_ARG: &str = "1";
/// Sort bucket for variables.
const SORT_VAR: &str = "2";
/// Sort bucket for helpers.
const SORT_HELPER: &str = "3";

/// Command and helper suggestions for every loaded module.
///
/// Commands of the default module appear unqualified; other modules'
/// commands are qualified with the module's alias (or canonical name
/// when it was loaded without one). Helpers insert with a trailing
/// `()` so the caret lands ready for arguments.
pub fn build_module_completion_items(
    bindings: &BindingsManager,
) -> (Vec<CompletionItem>, Vec<CompletionItem>) {
    let mut commands = Vec::new();
    let mut helpers = Vec::new();
    for binding in bindings.get_all_bindings(AllBindingsOpts::spaces(&[BindingsSpace::Module])) {
        let Some(module) = binding.value.as_module() else {
            continue;
        };
        let canonical = binding.identifier.as_str();
        let prefix = if canonical == DEFAULT_MODULE {
            None
        } else {
            Some(alias_of(bindings, canonical))
        };
        for name in module.command_names() {
            let label = match &prefix {
                Some(p) => format!("{p}:{name}"),
                None => name.to_owned(),
            };
            commands.push(CompletionItem::new(label, CompletionKind::Command));
        }
        for name in module.helper_names() {
            helpers.push(
                CompletionItem::new(format!("@{name}"), CompletionKind::Property)
                    .with_insert_text(format!("@{name}()"))
                    .with_sort_text(SORT_HELPER),
            );
        }
    }
    (commands, helpers)
}

/// The name a module is addressed by: the first alias pointing at it,
/// else its canonical identifier.
fn alias_of(bindings: &BindingsManager, canonical: &str) -> String {
    bindings
        .get_all_bindings(AllBindingsOpts::spaces(&[BindingsSpace::Alias]))
        .into_iter()
        .find(|b| b.value.as_alias_target() == Some(canonical) && b.identifier != canonical)
        .map(|b| b.identifier.clone())
        .unwrap_or_else(|| canonical.to_owned())
}

/// Visible `$variable` suggestions at the caret.
///
/// Inside a `set` command the declaration slot offers nothing, and the
/// value slot omits the variable being declared.
pub fn build_var_completion_items(
    bindings: &BindingsManager,
    current_command: Option<&CommandExpression>,
    caret: Position,
) -> Vec<CompletionItem> {
    let mut excluded: Option<String> = None;
    if let Some(command) = current_command {
        if command.module.as_deref().unwrap_or(DEFAULT_MODULE) == DEFAULT_MODULE
            && command.name == "set"
        {
            match calculate_current_arg_index(command, caret) {
                0 => return Vec::new(),
                _ => excluded = command.args.first().map(|arg| arg.to_string()),
            }
        }
    }
    bindings
        .get_all_binding_identifiers(AllBindingsOpts::spaces(&[BindingsSpace::User]))
        .into_iter()
        .filter(|identifier| Some(identifier) != excluded.as_ref())
        .map(|identifier| {
            CompletionItem::new(identifier, CompletionKind::Variable).with_sort_text(SORT_VAR)
        })
        .collect()
}

/// Argument-specific suggestions: the resolved command decides what
/// belongs in the slot the caret is in. An unresolvable command simply
/// offers nothing.
pub fn build_current_arg_completion_items(
    bindings: &BindingsManager,
    command: &CommandExpression,
    caret: Position,
) -> Vec<CompletionItem> {
    let (_, implementation) = resolve_command_node(command, bindings);
    let Some(implementation) = implementation else {
        return Vec::new();
    };
    let arg_index = calculate_current_arg_index(command, caret);
    implementation
        .build_completion_items_for_arg(arg_index, &command.args, bindings, caret)
        .into_iter()
        .map(|identifier| {
            CompletionItem::new(identifier, CompletionKind::Field).with_sort_text(SORT_ARG)
        })
        .collect()
}

/// Which argument slot of `command` the caret is in: the index of the
/// argument whose span covers it, else the number of arguments lying
/// entirely before it.
pub fn calculate_current_arg_index(command: &CommandExpression, caret: Position) -> usize {
    for (index, arg) in command.args.iter().enumerate() {
        if arg.span.contains(caret) {
            return index;
        }
    }
    command.args.iter().filter(|arg| arg.span.end < caret).count()
}
