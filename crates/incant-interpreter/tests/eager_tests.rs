use std::sync::{Arc, Mutex};

use incant_interpreter::std_module::CHAIN_ID;
use incant_interpreter::{
    run_eager_executions, run_load_commands, BindingValue, BindingsManager, BindingsSpace,
    Command, Interpreter, LazyBindings, ModuleCatalog, ModuleData,
};
use incant_types::ast::{CommandExpression, Node};
use incant_types::{Action, Result, Value};

/// Records the closest-to-caret flag each eager invocation observed,
/// tagged with the command's first argument.
struct ProbeCommand {
    log: Arc<Mutex<Vec<(String, bool)>>>,
}

impl Command for ProbeCommand {
    fn run(&self, _interpreter: &mut Interpreter, _node: &CommandExpression) -> Result<Vec<Action>> {
        Ok(Vec::new())
    }

    fn run_eager_execution(
        &self,
        node: &CommandExpression,
        _bindings: &BindingsManager,
        is_closest_to_caret: bool,
    ) -> Result<Option<LazyBindings>> {
        let tag = node.args.first().map(|a| a.to_string()).unwrap_or_default();
        self.log.lock().unwrap().push((tag, is_closest_to_caret));
        Ok(None)
    }
}

fn probe_catalog() -> (Arc<ModuleCatalog>, Arc<Mutex<Vec<(String, bool)>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut catalog = ModuleCatalog::new();
    catalog.insert(
        "probe".into(),
        ModuleData::new().with_command("ping", Arc::new(ProbeCommand { log: Arc::clone(&log) })),
    );
    (Arc::new(catalog), log)
}

fn eager_run(source: &str, catalog: &Arc<ModuleCatalog>) -> BindingsManager {
    let nodes: Vec<Node> = incant_parser::parse(source).unwrap();
    let mut bindings = BindingsManager::new();
    run_load_commands(&nodes, &mut bindings, catalog);
    run_eager_executions(&nodes, &mut bindings);
    bindings
}

fn user_value(bindings: &BindingsManager, key: &str) -> Option<Value> {
    bindings
        .get_binding_value(key, BindingsSpace::User)
        .and_then(BindingValue::as_value)
        .cloned()
}

#[test]
fn set_binds_its_variable() {
    let (catalog, _) = probe_catalog();
    let bindings = eager_run("set $amount 100", &catalog);
    assert_eq!(user_value(&bindings, "$amount"), Some(Value::Number(100)));
}

#[test]
fn earlier_declarations_apply_before_later_statements() {
    let (catalog, _) = probe_catalog();
    let bindings = eager_run("set $a 1\nset $b $a", &catalog);
    assert_eq!(user_value(&bindings, "$a"), Some(Value::Number(1)));
    // $a is context-dependent from $b's point of view, but $b itself
    // must still exist for completion.
    assert!(bindings.has_binding("$b", BindingsSpace::User));
}

#[test]
fn only_the_last_occurrence_is_closest_to_caret() {
    let (catalog, log) = probe_catalog();
    eager_run("load probe\nprobe:ping a\nprobe:ping b", &catalog);
    let observed = log.lock().unwrap().clone();
    // Scanned in reverse source order.
    assert_eq!(observed, vec![("b".to_owned(), true), ("a".to_owned(), false)]);
}

#[test]
fn alias_and_canonical_qualifiers_share_one_key() {
    let (catalog, log) = probe_catalog();
    eager_run("load probe as p\nprobe:ping a\np:ping b", &catalog);
    let observed = log.lock().unwrap().clone();
    assert_eq!(observed, vec![("b".to_owned(), true), ("a".to_owned(), false)]);
}

#[test]
fn load_binds_module_and_alias() {
    let (catalog, _) = probe_catalog();
    let bindings = eager_run("load probe as p", &catalog);
    assert!(bindings.has_binding("probe", BindingsSpace::Module));
    assert_eq!(
        bindings
            .get_binding_value("p", BindingsSpace::Alias)
            .and_then(BindingValue::as_alias_target),
        Some("probe")
    );
}

#[test]
fn unresolvable_commands_are_silently_skipped() {
    let (catalog, _) = probe_catalog();
    let bindings = eager_run("foo:bar 1\nset $x 2", &catalog);
    assert_eq!(user_value(&bindings, "$x"), Some(Value::Number(2)));
}

#[test]
fn per_statement_errors_do_not_stop_the_pass() {
    let (catalog, _) = probe_catalog();
    // The first set is malformed; the second still binds.
    let bindings = eager_run("set 1 2\nset $y 3", &catalog);
    assert_eq!(user_value(&bindings, "$y"), Some(Value::Number(3)));
}

#[test]
fn duplicate_declarations_keep_the_first_value() {
    let (catalog, _) = probe_catalog();
    // The second declaration's deferred update collides and is dropped.
    let bindings = eager_run("set $a 1\nset $a 2", &catalog);
    assert_eq!(user_value(&bindings, "$a"), Some(Value::Number(1)));
}

#[test]
fn switch_context_comes_from_the_closest_occurrence() {
    let (catalog, _) = probe_catalog();
    let bindings = eager_run("switch mainnet\nswitch gnosis", &catalog);
    assert_eq!(
        bindings
            .get_binding_value(CHAIN_ID, BindingsSpace::Other)
            .and_then(BindingValue::as_text),
        Some("100")
    );
}

#[test]
fn eager_pass_never_touches_full_mode_state() {
    let (catalog, _) = probe_catalog();
    // A raw command resolves and eagerly runs as a no-op; nothing is
    // bound and nothing panics without a chain client.
    let bindings = eager_run(
        "raw 0x1111111111111111111111111111111111111111 0x1234",
        &catalog,
    );
    assert!(!bindings.has_binding("$x", BindingsSpace::User));
}
