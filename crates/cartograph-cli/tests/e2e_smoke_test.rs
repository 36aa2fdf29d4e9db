use std::{fs, path::PathBuf};

use tempfile::tempdir;

use cartograph::{CartographError, Explorer, config::AppConfig, identifier::Id};
use cartograph_cli::{Args, format_projection, load_catalogue};

fn mimic_catalogue() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../catalogues/mimic.toml")
}

fn run_to_string(configure: impl FnOnce(&mut Args)) -> String {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("out.svg");

    let mut args = Args::new(
        mimic_catalogue().to_string_lossy(),
        output_path.to_string_lossy(),
    );
    configure(&mut args);

    cartograph_cli::run(&args).expect("Failed to run on the demo catalogue");
    fs::read_to_string(&output_path).expect("Failed to read output")
}

#[test]
fn e2e_smoke_test_demo_catalogue() {
    let svg = run_to_string(|_| {});

    assert!(svg.contains("<svg"));
    assert_eq!(svg.matches("<rect").count(), 7);
    assert_eq!(svg.matches("<polygon").count(), 4);
    assert_eq!(svg.matches("<ellipse").count(), 26);
    assert!(svg.contains("Patient demographics"));
}

#[test]
fn e2e_hide_table_removes_owned_fields() {
    let svg = run_to_string(|args| args.hide_table.push("hosp_patients".to_string()));

    assert!(!svg.contains("Patient demographics"));
    assert!(!svg.contains("anchor_age"));
    assert_eq!(svg.matches("<rect").count(), 6);
    // Connectors are never cascaded.
    assert_eq!(svg.matches("<polygon").count(), 4);
}

#[test]
fn e2e_toggle_module_and_reveal_all() {
    let svg = run_to_string(|args| args.toggle_module.push("icu".to_string()));

    assert!(!svg.contains("ICU stays"));
    assert!(svg.contains("ICU stay identifier"));
    assert_eq!(svg.matches("<rect").count(), 4);

    let svg = run_to_string(|args| {
        args.toggle_module.push("icu".to_string());
        args.reveal_all = true;
    });

    assert!(svg.contains("ICU stays"));
    assert_eq!(svg.matches("<rect").count(), 7);
}

#[test]
fn e2e_unknown_ids_are_ignored() {
    let svg = run_to_string(|args| {
        args.hide.push("no_such_node".to_string());
        args.hide_table.push("gender".to_string());
        args.toggle_module.push("ed".to_string());
        args.select = Some("no_such_node".to_string());
    });

    assert_eq!(svg.matches("<rect").count(), 7);
    assert_eq!(svg.matches("<ellipse").count(), 26);
}

#[test]
fn e2e_projection_of_demo_table() {
    let catalogue = load_catalogue(mimic_catalogue()).expect("Failed to load catalogue");
    let mut explorer =
        Explorer::load(&catalogue, AppConfig::default()).expect("Failed to load explorer");

    let text = format_projection(explorer.select(Some(Id::new("hosp_patients"))));

    assert!(text.starts_with("hosp_patients\nPatient demographics"));
    assert!(text.contains("One row per patient."));
    assert!(text.contains("[Hide this node]"));
    assert!(text.contains("[Hide table and its fields]"));

    let text = format_projection(explorer.select(Some(Id::new("gender"))));
    assert!(text.contains("No description available."));
    assert!(!text.contains("[Hide table and its fields]"));
}

#[test]
fn e2e_layout_error_is_reported() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input_path = temp_dir.path().join("broken.toml");
    fs::write(
        &input_path,
        r#"
[[nodes]]
id = "lonely_table"
category = "table"
label = "lonely_table"
"#,
    )
    .expect("Failed to write catalogue");

    let args = Args::new(
        input_path.to_string_lossy(),
        temp_dir.path().join("out.svg").to_string_lossy(),
    );

    let err = cartograph_cli::run(&args).unwrap_err();
    assert!(matches!(err, CartographError::Layout(_)));
    assert!(!temp_dir.path().join("out.svg").exists());
}

#[test]
fn e2e_reference_error_is_reported() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input_path = temp_dir.path().join("dangling.toml");
    fs::write(
        &input_path,
        r#"
[[nodes]]
id = "t_only"
category = "table"
label = "t_only"

[[edges]]
from = "t_only"
to = "missing_field"
class = "ownership"

[anchors]
t_only = { x = 0.0, y = 0.0 }
"#,
    )
    .expect("Failed to write catalogue");

    let args = Args::new(
        input_path.to_string_lossy(),
        temp_dir.path().join("out.svg").to_string_lossy(),
    );

    let err = cartograph_cli::run(&args).unwrap_err();
    assert!(matches!(err, CartographError::Reference(_)));
}
