//! CLI logic for the Cartograph explorer.
//!
//! The CLI is a non-interactive presentation shell: it loads a catalogue,
//! replays the visibility operations given on the command line and exports
//! what remains visible as SVG.

pub mod error_adapter;
pub mod render;

mod args;
mod config;

pub use args::Args;
pub use config::{load_catalogue, load_config};

use log::info;

use cartograph::{CartographError, Explorer, identifier::Id, selection::Projection};

use render::LogSink;

/// Run the Cartograph CLI application
///
/// Operations are replayed in a fixed order: single-node hides, table
/// cascades, module toggles and finally reveal-all.
///
/// # Errors
///
/// Returns `CartographError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Catalogue parsing and reference errors
/// - Layout errors
pub fn run(args: &Args) -> Result<(), CartographError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing catalogue"
    );

    let app_config = load_config(args.config.as_ref())?;
    let catalogue = load_catalogue(&args.input)?;

    let mut explorer =
        Explorer::load(&catalogue, app_config.clone())?.with_sink(Box::new(LogSink::new()));

    for id in &args.hide {
        explorer.hide_node(Id::new(id));
    }
    for id in &args.hide_table {
        explorer.hide_table_cascade(Id::new(id));
    }
    for prefix in &args.toggle_module {
        explorer.toggle_module(prefix);
    }
    if args.reveal_all {
        explorer.reveal_all();
    }

    if let Some(id) = &args.select {
        let projection = explorer.select(Some(Id::new(id)));
        println!("{}", format_projection(projection));
    }

    let doc = render::render_scene(explorer.scene(), app_config.style())?;
    render::write_document(&args.output, &doc)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}

/// Formats a detail panel as plain text.
pub fn format_projection(projection: &Projection) -> String {
    let mut out = projection.title().to_string();
    if !projection.subtitle().is_empty() {
        out.push('\n');
        out.push_str(projection.subtitle());
    }
    if !projection.description().is_empty() {
        out.push_str("\n\n");
        out.push_str(projection.description());
    }
    for action in projection.actions() {
        out.push_str("\n  [");
        out.push_str(&action.to_string());
        out.push(']');
    }
    out
}
