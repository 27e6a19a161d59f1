//! Eager (speculative) evaluation for editor analysis.
//!
//! The eager pass never touches the chain and never fails: its product
//! is a populated [`BindingsManager`] describing what names exist at
//! the caret, not a list of actions. Commands are scanned in reverse
//! source order so the last textual occurrence of each command can be
//! flagged as closest to the caret, then the deferred binding updates
//! they produced are applied in forward source order so later
//! statements see the names earlier ones declared.

use std::collections::BTreeSet;
use std::sync::Arc;

use incant_types::ast::{Node, NodeKind};

use crate::bindings::BindingsManager;
use crate::module::{resolve_command_node, LazyBindings, ModuleCatalog};
use crate::std_module;

/// Run every command in `nodes` eagerly against `bindings`.
///
/// Each command contributes its qualified key (canonical module id plus
/// command name) to a seen-set whether or not it resolves, so only the
/// last occurrence of a command observes `is_closest_to_caret = true`.
/// Failures of individual executions or deferred updates are swallowed:
/// a malformed statement must not block resolution of the rest of the
/// script.
pub fn run_eager_executions(nodes: &[Node], bindings: &mut BindingsManager) {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut deferred: Vec<LazyBindings> = Vec::new();

    for node in nodes.iter().rev() {
        let NodeKind::CommandExpression(command) = &node.kind else {
            continue;
        };
        let (canonical, implementation) = resolve_command_node(command, bindings);
        let key = format!("{canonical}:{}", command.name);
        let is_closest_to_caret = seen.insert(key);

        let Some(implementation) = implementation else {
            continue;
        };
        match implementation.run_eager_execution(command, bindings, is_closest_to_caret) {
            Ok(Some(lazy)) => deferred.push(lazy),
            Ok(None) => {}
            // A statement mid-edit is expected to be broken.
            Err(_) => {}
        }
    }

    for lazy in deferred.into_iter().rev() {
        // Same policy as above: a bad deferred update is dropped.
        let _ = lazy(bindings);
    }
}

/// Seed `bindings` with the std module and eagerly run only the `load`
/// commands of the script, so module and alias bindings exist before
/// the editor asks what is in scope.
pub fn run_load_commands(
    nodes: &[Node],
    bindings: &mut BindingsManager,
    catalog: &Arc<ModuleCatalog>,
) {
    std_module::seed(bindings, catalog);
    let loads: Vec<Node> = nodes
        .iter()
        .filter(|node| {
            matches!(
                &node.kind,
                NodeKind::CommandExpression(c)
                    if c.module.as_deref().unwrap_or(std_module::NAME) == std_module::NAME
                        && c.name == "load"
            )
        })
        .cloned()
        .collect();
    run_eager_executions(&loads, bindings);
}
