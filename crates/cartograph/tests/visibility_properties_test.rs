//! Property tests for the visibility state machine.
//!
//! Random sequences of the four operations are replayed against a fixed
//! catalogue with two modules that share a connector.

use proptest::prelude::*;

use cartograph::{
    Explorer,
    catalogue::{Catalogue, Category, DisplayLabel, EdgeClass, EdgeRecord, NodeRecord},
    config::AppConfig,
    geometry::Point,
    identifier::Id,
    selection::Action,
};

const NODES: [&str; 9] = [
    "pa_t1", "pa_f1", "pa_f2", "pb_t2", "pb_f3", "pb_t3", "pb_f4", "px_key", "px_note",
];
const MODULES: [&str; 3] = ["pa", "pb", "zz"];

fn node(id: &str, category: Category) -> NodeRecord {
    NodeRecord::new(Id::new(id), category, DisplayLabel::parse(id))
}

fn edge(from: &str, to: &str, class: EdgeClass) -> EdgeRecord {
    EdgeRecord::new(Id::new(from), Id::new(to), class)
}

fn catalogue() -> Catalogue {
    Catalogue::new()
        .with_module("pa")
        .with_module("pb")
        .with_node(node("pa_t1", Category::Table))
        .with_node(node("pa_f1", Category::Field))
        .with_node(node("pa_f2", Category::Field))
        .with_node(node("pb_t2", Category::Table))
        .with_node(node("pb_f3", Category::Field))
        .with_node(node("pb_t3", Category::Table))
        .with_node(node("pb_f4", Category::Field))
        .with_node(node("px_key", Category::Connector))
        .with_node(node("px_note", Category::Field))
        .with_edge(edge("pa_t1", "pa_f1", EdgeClass::Ownership))
        .with_edge(edge("pa_t1", "pa_f2", EdgeClass::Ownership))
        .with_edge(edge("pa_t1", "px_key", EdgeClass::Ownership))
        .with_edge(edge("pb_t2", "pb_f3", EdgeClass::Ownership))
        .with_edge(edge("pb_t2", "pa_f2", EdgeClass::Ownership))
        .with_edge(edge("pb_t3", "pb_f4", EdgeClass::Ownership))
        .with_edge(edge("pb_t2", "px_key", EdgeClass::CrossReference))
        .with_edge(edge("pb_f4", "px_key", EdgeClass::CrossReference))
        .with_edge(edge("pa_f1", "px_note", EdgeClass::Annotation))
        .with_anchor(Id::new("pa_t1"), Point::new(0.0, 0.0))
        .with_anchor(Id::new("pb_t2"), Point::new(600.0, 0.0))
        .with_anchor(Id::new("pb_t3"), Point::new(1200.0, 0.0))
        .with_anchor(Id::new("px_key"), Point::new(600.0, 400.0))
        .with_anchor(Id::new("px_note"), Point::new(-300.0, 300.0))
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        prop::sample::select(NODES.to_vec()).prop_map(|id| Action::HideNode(Id::new(id))),
        prop::sample::select(NODES.to_vec()).prop_map(|id| Action::HideTableCascade(Id::new(id))),
        prop::sample::select(MODULES.to_vec()).prop_map(|m| Action::ToggleModule(m.to_string())),
        Just(Action::RevealAll),
    ]
}

fn hidden_flags(explorer: &Explorer) -> Vec<bool> {
    explorer.graph().nodes().map(|n| n.is_hidden()).collect()
}

fn replay(actions: &[Action]) -> Explorer {
    let mut explorer = Explorer::load(&catalogue(), AppConfig::default()).unwrap();
    for action in actions {
        explorer.apply(action);
    }
    explorer
}

/// After any sequence, every edge is hidden exactly when an endpoint is.
fn check_edge_invariant(actions: Vec<Action>) -> Result<(), TestCaseError> {
    let mut explorer = Explorer::load(&catalogue(), AppConfig::default()).unwrap();
    for action in &actions {
        explorer.apply(action);
        for edge in explorer.graph().edges() {
            let from = explorer.graph().node(edge.from()).unwrap().is_hidden();
            let to = explorer.graph().node(edge.to()).unwrap().is_hidden();
            prop_assert_eq!(edge.is_hidden(), from || to);
        }
    }
    Ok(())
}

/// Reveal-all from any state shows everything, and a second call changes nothing.
fn check_reveal_all(actions: Vec<Action>) -> Result<(), TestCaseError> {
    let mut explorer = replay(&actions);

    explorer.reveal_all();
    prop_assert!(explorer.graph().nodes().all(|n| !n.is_hidden()));
    prop_assert!(explorer.graph().edges().all(|e| !e.is_hidden()));
    for module in MODULES {
        prop_assert!(!explorer.is_suppressed(module));
    }

    let second = explorer.reveal_all();
    prop_assert_eq!(second.nodes_changed(), 0);
    Ok(())
}

/// Toggling an unsuppressed module twice restores every node flag.
fn check_module_round_trip(actions: Vec<Action>, module: &str) -> Result<(), TestCaseError> {
    let mut explorer = replay(&actions);
    if explorer.is_suppressed(module) {
        return Ok(());
    }

    let before = hidden_flags(&explorer);
    explorer.toggle_module(module);
    explorer.toggle_module(module);

    prop_assert_eq!(hidden_flags(&explorer), before);
    prop_assert!(explorer.graph().edges_consistent());
    Ok(())
}

/// The cascade never hides a connector or a node outside the table's reach.
fn check_cascade_shallow(actions: Vec<Action>) -> Result<(), TestCaseError> {
    let mut explorer = replay(&actions);
    let before = hidden_flags(&explorer);

    explorer.hide_table_cascade(Id::new("pb_t2"));

    let reach = ["pb_t2", "pb_f3", "pa_f2"];
    for (node, was_hidden) in explorer.graph().nodes().zip(before) {
        let name = node.id().to_string();
        if reach.contains(&name.as_str()) {
            prop_assert!(node.is_hidden());
        } else {
            prop_assert_eq!(node.is_hidden(), was_hidden, "{} changed", name);
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn edge_visibility_invariant(actions in prop::collection::vec(action_strategy(), 0..24)) {
        check_edge_invariant(actions)?;
    }

    #[test]
    fn reveal_all_total_and_idempotent(actions in prop::collection::vec(action_strategy(), 0..24)) {
        check_reveal_all(actions)?;
    }

    #[test]
    fn module_toggle_round_trip(
        actions in prop::collection::vec(action_strategy(), 0..24),
        module in prop::sample::select(MODULES.to_vec()),
    ) {
        check_module_round_trip(actions, module)?;
    }

    #[test]
    fn cascade_is_shallow(actions in prop::collection::vec(action_strategy(), 0..24)) {
        check_cascade_shallow(actions)?;
    }
}
