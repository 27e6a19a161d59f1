use std::sync::Arc;

use incant_complete::{
    build_current_arg_completion_items, build_module_completion_items,
    build_var_completion_items, calculate_current_arg_index, CompletionItem, CompletionKind,
};
use incant_interpreter::{
    run_eager_executions, run_load_commands, BindingValue, BindingsManager, BindingsSpace,
    Command, Interpreter, ModuleCatalog, ModuleData,
};
use incant_types::ast::{CommandExpression, NodeKind};
use incant_types::{Action, Position, Result};

const VAULT: &str = "0x1111111111111111111111111111111111111111";

struct DonateCommand;

impl Command for DonateCommand {
    fn run(&self, _interpreter: &mut Interpreter, _node: &CommandExpression) -> Result<Vec<Action>> {
        Ok(Vec::new())
    }
}

fn catalog() -> Arc<ModuleCatalog> {
    let mut catalog = ModuleCatalog::new();
    catalog.insert(
        "giveth".into(),
        ModuleData::new().with_command("donate", Arc::new(DonateCommand)),
    );
    Arc::new(catalog)
}

fn eager_bindings(source: &str) -> BindingsManager {
    let nodes = incant_parser::parse(source).unwrap();
    let mut bindings = BindingsManager::new();
    run_load_commands(&nodes, &mut bindings, &catalog());
    run_eager_executions(&nodes, &mut bindings);
    bindings
}

fn command(source: &str) -> CommandExpression {
    let nodes = incant_parser::parse(source).unwrap();
    match &nodes[0].kind {
        NodeKind::CommandExpression(c) => c.clone(),
        other => panic!("expected a command, got {other:?}"),
    }
}

fn labels(items: &[CompletionItem]) -> Vec<&str> {
    items.iter().map(|i| i.label.as_str()).collect()
}

#[test]
fn module_items_qualify_by_alias() {
    let bindings = eager_bindings("load giveth as g");
    let (commands, helpers) = build_module_completion_items(&bindings);

    let commands = labels(&commands);
    assert!(commands.contains(&"set"));
    assert!(commands.contains(&"raw"));
    assert!(commands.contains(&"g:donate"));
    assert!(!commands.contains(&"giveth:donate"));

    let me = helpers.iter().find(|i| i.label == "@me").unwrap();
    assert_eq!(me.insert_text, "@me()");
    assert_eq!(me.sort_text.as_deref(), Some("3"));
    assert_eq!(me.kind, CompletionKind::Property);
}

#[test]
fn module_items_fall_back_to_canonical_name() {
    let bindings = eager_bindings("load giveth");
    let (commands, _) = build_module_completion_items(&bindings);
    assert!(labels(&commands).contains(&"giveth:donate"));
}

#[test]
fn var_items_list_visible_variables() {
    let bindings = eager_bindings("set $a 1\nset $b 2");
    let items = build_var_completion_items(&bindings, None, Position::new(3, 1));
    let mut names = labels(&items);
    names.sort_unstable();
    assert_eq!(names, vec!["$a", "$b"]);
    assert!(items
        .iter()
        .all(|i| i.kind == CompletionKind::Variable && i.sort_text.as_deref() == Some("2")));
}

#[test]
fn set_declaration_slot_offers_nothing() {
    let bindings = eager_bindings("set $a 1");
    let current = command("set $a 1");
    // Caret inside the $a argument.
    let items = build_var_completion_items(&bindings, Some(&current), Position::new(1, 5));
    assert!(items.is_empty());
}

#[test]
fn set_value_slot_excludes_the_declared_variable() {
    let bindings = eager_bindings("set $a 1\nset $b 2");
    let current = command("set $b 2");
    // Caret inside the value argument.
    let items = build_var_completion_items(&bindings, Some(&current), Position::new(1, 8));
    assert_eq!(labels(&items), vec!["$a"]);
}

#[test]
fn current_arg_items_come_from_the_resolved_command() {
    let mut bindings = eager_bindings("");
    bindings
        .set_binding("vault", BindingValue::Address(VAULT.into()), BindingsSpace::Addr, false)
        .unwrap();
    let current = command("raw vault 0x00");
    let items = build_current_arg_completion_items(&bindings, &current, Position::new(1, 5));
    assert_eq!(labels(&items), vec!["vault"]);
    assert_eq!(items[0].kind, CompletionKind::Field);
    assert_eq!(items[0].sort_text.as_deref(), Some("1"));
}

#[test]
fn unresolvable_commands_offer_nothing() {
    let bindings = eager_bindings("");
    let current = command("foo:bar x");
    let items = build_current_arg_completion_items(&bindings, &current, Position::new(1, 9));
    assert!(items.is_empty());
}

#[test]
fn arg_index_tracks_the_caret() {
    let current = command("raw vault 0x00 5");
    // Inside the first and second arguments.
    assert_eq!(calculate_current_arg_index(&current, Position::new(1, 6)), 0);
    assert_eq!(calculate_current_arg_index(&current, Position::new(1, 12)), 1);
    // Well past the last argument.
    assert_eq!(calculate_current_arg_index(&current, Position::new(1, 40)), 3);
}

#[test]
fn items_serialize_camel_case() {
    let item = CompletionItem::new("$a", CompletionKind::Variable).with_sort_text("2");
    let json = serde_json::to_string(&item).unwrap();
    assert_eq!(
        json,
        "{\"label\":\"$a\",\"insertText\":\"$a\",\"kind\":\"variable\",\"sortText\":\"2\"}"
    );
}
