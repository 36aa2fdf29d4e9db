//! Integration tests for the Explorer API
//!
//! These tests drive the public facade the way a presentation shell would.

use float_cmp::assert_approx_eq;

use cartograph::{
    CartographError, Explorer, UiEvent,
    catalogue::{Catalogue, Category, DisplayLabel, EdgeClass, EdgeRecord, NodeRecord},
    config::AppConfig,
    geometry::Point,
    identifier::Id,
    layout::LayoutError,
    selection::Action,
};

fn node(id: &str, category: Category) -> NodeRecord {
    NodeRecord::new(Id::new(id), category, DisplayLabel::parse(id))
}

fn edge(from: &str, to: &str, class: EdgeClass) -> EdgeRecord {
    EdgeRecord::new(Id::new(from), Id::new(to), class)
}

/// `T1` owns `F1`, `F2`, `F3` and references connector `C1`; `T2` also references `C1`.
fn scenario() -> Catalogue {
    Catalogue::new()
        .with_node(node("T1", Category::Table))
        .with_node(node("F1", Category::Field))
        .with_node(node("F2", Category::Field))
        .with_node(node("F3", Category::Field))
        .with_node(node("C1", Category::Connector))
        .with_node(node("T2", Category::Table))
        .with_node(node("G1", Category::Field))
        .with_edge(edge("T1", "F1", EdgeClass::Ownership))
        .with_edge(edge("T1", "F2", EdgeClass::Ownership))
        .with_edge(edge("T1", "F3", EdgeClass::Ownership))
        .with_edge(edge("T1", "C1", EdgeClass::CrossReference))
        .with_edge(edge("T2", "C1", EdgeClass::CrossReference))
        .with_edge(edge("T2", "G1", EdgeClass::Ownership))
        .with_edge(edge("G1", "C1", EdgeClass::CrossReference))
        .with_anchor(Id::new("T1"), Point::new(0.0, 0.0))
        .with_anchor(Id::new("T2"), Point::new(800.0, 0.0))
        .with_anchor(Id::new("C1"), Point::new(400.0, 300.0))
}

fn is_hidden(explorer: &Explorer, id: &str) -> bool {
    explorer.graph().node(Id::new(id)).unwrap().is_hidden()
}

fn edge_hidden(explorer: &Explorer, from: &str, to: &str) -> bool {
    explorer
        .graph()
        .edges()
        .find(|e| e.from() == Id::new(from) && e.to() == Id::new(to))
        .unwrap()
        .is_hidden()
}

#[test]
fn test_hide_table_cascade_scenario() {
    let mut explorer = Explorer::load(&scenario(), AppConfig::default()).unwrap();

    explorer.hide_table_cascade(Id::new("T1"));

    for id in ["T1", "F1", "F2", "F3"] {
        assert!(is_hidden(&explorer, id), "{id} should be hidden");
    }
    for id in ["C1", "T2", "G1"] {
        assert!(!is_hidden(&explorer, id), "{id} should stay visible");
    }
    assert!(edge_hidden(&explorer, "T1", "C1"));
    assert!(!edge_hidden(&explorer, "T2", "C1"));
    assert!(!edge_hidden(&explorer, "G1", "C1"));
    assert!(explorer.graph().edges_consistent());
}

#[test]
fn test_scenario_layout() {
    let explorer = Explorer::load(&scenario(), AppConfig::default()).unwrap();
    let scene = explorer.scene();

    let f3 = scene.position(Id::new("F3")).unwrap();
    assert_approx_eq!(f32, f3.x(), -100.0);
    assert_approx_eq!(f32, f3.y(), 160.0);

    let g1 = scene.position(Id::new("G1")).unwrap();
    assert_approx_eq!(f32, g1.x(), 700.0);
    assert_approx_eq!(f32, g1.y(), 100.0);

    let c1 = scene.position(Id::new("C1")).unwrap();
    assert_approx_eq!(f32, c1.x(), 400.0);

    let bounds = scene.visible_bounds().unwrap();
    assert_approx_eq!(f32, bounds.min_x(), -100.0);
    assert_approx_eq!(f32, bounds.max_x(), 800.0);
    assert_approx_eq!(f32, bounds.max_y(), 300.0);
}

#[test]
fn test_module_toggle_and_reveal() {
    let catalogue = scenario().with_module("T1").with_module("T2");
    let mut explorer = Explorer::load(&catalogue, AppConfig::default()).unwrap();

    explorer.toggle_module("T2");
    assert!(explorer.is_suppressed("T2"));
    assert!(is_hidden(&explorer, "T2"));
    assert!(is_hidden(&explorer, "G1"));
    assert!(!is_hidden(&explorer, "C1"));
    assert!(edge_hidden(&explorer, "G1", "C1"));
    assert!(!edge_hidden(&explorer, "T1", "C1"));

    explorer.hide_node(Id::new("C1"));
    explorer.reveal_all();

    assert!(!explorer.is_suppressed("T2"));
    assert_eq!(explorer.scene().visible_nodes().count(), 7);
    assert_eq!(explorer.scene().visible_edges().count(), 7);
}

fn prefixed_tables() -> Catalogue {
    Catalogue::new()
        .with_node(node("icu_stays", Category::Table))
        .with_node(node("icustays_extra", Category::Table))
        .with_node(node("xt_field", Category::Field))
        .with_edge(edge("icustays_extra", "xt_field", EdgeClass::Ownership))
        .with_anchor(Id::new("icu_stays"), Point::new(0.0, 0.0))
        .with_anchor(Id::new("icustays_extra"), Point::new(400.0, 0.0))
}

#[test]
fn test_module_covers_every_matching_table() {
    let mut explorer = Explorer::load(&prefixed_tables(), AppConfig::default()).unwrap();

    explorer.toggle_module("icu");

    assert!(is_hidden(&explorer, "icu_stays"));
    assert!(is_hidden(&explorer, "icustays_extra"));
    assert!(is_hidden(&explorer, "xt_field"));
}

#[test]
fn test_module_toggle_with_undeclared_prefix() {
    let catalogue = prefixed_tables().with_module("icu");
    let mut explorer = Explorer::load(&catalogue, AppConfig::default()).unwrap();

    let change = explorer.toggle_module("icu_st");

    assert_eq!(change.nodes_changed(), 1);
    assert!(is_hidden(&explorer, "icu_stays"));
    assert!(!is_hidden(&explorer, "icustays_extra"));
}

#[test]
fn test_tables_at_signed_zero_overlap() {
    let catalogue = Catalogue::new()
        .with_node(node("sz_a", Category::Table))
        .with_node(node("sz_b", Category::Table))
        .with_anchor(Id::new("sz_a"), Point::new(0.0, 0.0))
        .with_anchor(Id::new("sz_b"), Point::new(-0.0, 0.0));

    let result = Explorer::load(&catalogue, AppConfig::default());

    assert!(matches!(
        result,
        Err(CartographError::Layout(
            LayoutError::DuplicateTablePosition { .. }
        ))
    ));
}

#[test]
fn test_selection_gating() {
    let mut explorer = Explorer::load(&scenario(), AppConfig::default()).unwrap();

    let table = explorer.project(Some(Id::new("T1")));
    assert!(
        table
            .actions()
            .contains(&Action::HideTableCascade(Id::new("T1")))
    );

    for id in ["F1", "C1"] {
        let projection = explorer.project(Some(Id::new(id)));
        assert_eq!(projection.actions(), [Action::HideNode(Id::new(id))]);
    }

    explorer.dispatch(UiEvent::NodeClicked(Some(Id::new("F1"))));
    assert_eq!(explorer.selection().title(), "F1");
    explorer.dispatch(UiEvent::Action(Action::HideTableCascade(Id::new("T1"))));
    assert!(explorer.selection().is_empty());
}

#[test]
fn test_load_from_toml() {
    let source = r#"
        modules = ["hosp"]

        [[nodes]]
        id = "hosp_patients"
        category = "table"
        label = "hosp_patients\n(Patient demographics)"
        description = "Static demographic data, one row per patient."

        [[nodes]]
        id = "anchor_age"
        category = "field"
        label = "anchor_age\n(Age at anchor year)"

        [[nodes]]
        id = "subject_id"
        category = "connector"
        label = "subject_id\n(Patient identifier)"

        [[edges]]
        from = "hosp_patients"
        to = "anchor_age"
        class = "ownership"

        [[edges]]
        from = "hosp_patients"
        to = "subject_id"
        class = "cross_reference"

        [anchors]
        hosp_patients = { x = -400.0, y = -200.0 }
        subject_id = { x = 0.0, y = 0.0 }
    "#;
    let catalogue: Catalogue = toml::from_str(source).unwrap();
    let mut explorer = Explorer::load(&catalogue, AppConfig::default()).unwrap();

    let projection = explorer.select(Some(Id::new("hosp_patients"))).clone();
    assert_eq!(projection.title(), "hosp_patients");
    assert_eq!(projection.subtitle(), "Patient demographics");

    explorer.toggle_module("hosp");
    let visible: Vec<String> = explorer
        .scene()
        .visible_nodes()
        .map(|n| n.id.to_string())
        .collect();
    assert_eq!(visible, ["subject_id"]);
}

#[test]
fn test_reference_error() {
    let catalogue = scenario().with_edge(edge("T1", "nowhere", EdgeClass::Annotation));

    let result = Explorer::load(&catalogue, AppConfig::default());
    assert!(matches!(result, Err(CartographError::Reference(_))));
}
