//! SVG export of a [`Scene`].
//!
//! Visible edges are drawn first as straight lines between node centers, then
//! visible nodes on top: tables as rectangles, fields as ellipses and
//! connectors as diamonds. Hidden nodes and edges are left out of the
//! document entirely.

use std::{fs::File, io::Write, path::Path};

use log::{debug, error, info};
use svg::{
    Document,
    node::{Text as SvgText, element as svg_element},
};

use cartograph::{
    CartographError,
    catalogue::{Category, EdgeClass},
    config::StyleConfig,
    geometry::{Bounds, Point},
    scene::{NodeView, RenderSink, Scene},
};

const MARGIN: f32 = 80.0;
const TABLE_WIDTH: f32 = 160.0;
const TABLE_HEIGHT: f32 = 44.0;
const FIELD_RADIUS_X: f32 = 70.0;
const FIELD_RADIUS_Y: f32 = 22.0;
const CONNECTOR_RADIUS: f32 = 36.0;
const FONT_SIZE: f32 = 12.0;

/// Renders the visible part of `scene` into an SVG document.
///
/// # Errors
///
/// Returns [`CartographError::Config`] if a configured style color cannot be
/// parsed.
pub fn render_scene(scene: Scene<'_>, style: &StyleConfig) -> Result<Document, CartographError> {
    let bounds = scene
        .visible_bounds()
        .unwrap_or_else(|| Bounds::from_point(Point::default()))
        .inflate(MARGIN);

    let mut doc = Document::new()
        .set(
            "viewBox",
            format!(
                "{} {} {} {}",
                bounds.min_x(),
                bounds.min_y(),
                bounds.width(),
                bounds.height()
            ),
        )
        .set("width", bounds.width())
        .set("height", bounds.height());

    if let Some(background) = style.background_color().map_err(CartographError::Config)? {
        let min_point = bounds.min_point();
        doc = doc.add(
            svg_element::Rectangle::new()
                .set("x", min_point.x())
                .set("y", min_point.y())
                .set("width", bounds.width())
                .set("height", bounds.height())
                .set("fill", background.to_string()),
        );
    }

    let mut edges_count = 0;
    for edge in scene.visible_edges() {
        let (Some(from), Some(to)) = (scene.position(edge.from), scene.position(edge.to)) else {
            continue;
        };
        let color = style
            .edge_color(edge.class)
            .map_err(CartographError::Config)?;

        let mut line = svg_element::Line::new()
            .set("x1", from.x())
            .set("y1", from.y())
            .set("x2", to.x())
            .set("y2", to.y())
            .set("stroke", color.to_string())
            .set("stroke-width", 1.5);
        match edge.class {
            EdgeClass::Ownership => {}
            EdgeClass::CrossReference => line = line.set("stroke-width", 2.5),
            EdgeClass::Annotation => line = line.set("stroke-dasharray", "6,4"),
        }
        doc = doc.add(line);
        edges_count += 1;
    }

    let mut nodes_count = 0;
    for node in scene.visible_nodes() {
        let color = style
            .node_color(node.category)
            .map_err(CartographError::Config)?;
        let fill = color.to_string();
        let center = node.position;

        doc = match node.category {
            Category::Table => doc.add(
                svg_element::Rectangle::new()
                    .set("x", center.x() - TABLE_WIDTH / 2.0)
                    .set("y", center.y() - TABLE_HEIGHT / 2.0)
                    .set("width", TABLE_WIDTH)
                    .set("height", TABLE_HEIGHT)
                    .set("rx", 4.0)
                    .set("fill", fill)
                    .set("stroke", "black"),
            ),
            Category::Field => doc.add(
                svg_element::Ellipse::new()
                    .set("cx", center.x())
                    .set("cy", center.y())
                    .set("rx", FIELD_RADIUS_X)
                    .set("ry", FIELD_RADIUS_Y)
                    .set("fill", fill)
                    .set("stroke", "black"),
            ),
            Category::Connector => doc.add(
                svg_element::Polygon::new()
                    .set("points", diamond_points(center))
                    .set("fill", fill)
                    .set("stroke", "black"),
            ),
        };
        doc = doc.add(label_text(&node));
        nodes_count += 1;
    }

    debug!(nodes_count, edges_count; "Scene rendered");
    Ok(doc)
}

/// Writes an SVG document to `path`.
///
/// # Errors
///
/// Returns [`CartographError::Io`] if the file cannot be created or written.
pub fn write_document(path: impl AsRef<Path>, doc: &Document) -> Result<(), CartographError> {
    let path = path.as_ref();
    let file_name = path.display().to_string();
    info!(file_name; "Creating SVG file");

    let mut f = match File::create(path) {
        Ok(file) => file,
        Err(err) => {
            error!(file_name, err:err; "Failed to create SVG file");
            return Err(err.into());
        }
    };

    if let Err(err) = write!(f, "{doc}") {
        error!(file_name, err:err; "Failed to write SVG content");
        return Err(err.into());
    }

    Ok(())
}

fn diamond_points(center: Point) -> String {
    let (x, y) = (center.x(), center.y());
    let r = CONNECTOR_RADIUS;
    format!(
        "{},{} {},{} {},{} {},{}",
        x,
        y - r,
        x + r,
        y,
        x,
        y + r,
        x - r,
        y
    )
}

fn label_text(node: &NodeView<'_>) -> svg_element::Text {
    let center = node.position;
    let gloss = node.label.gloss();
    let lines: Vec<&str> = if gloss.is_empty() {
        vec![node.label.primary()]
    } else {
        vec![node.label.primary(), gloss]
    };

    let line_height = FONT_SIZE * 1.2;
    let y_offset = -(lines.len() as f32 + 1.0) * line_height / 2.0;

    let mut text = svg_element::Text::new("")
        .set("x", center.x())
        .set("y", center.y() + y_offset)
        .set("text-anchor", "middle")
        .set("dominant-baseline", "central")
        .set("font-family", "sans-serif")
        .set("font-size", FONT_SIZE);

    for line in lines {
        let tspan = svg_element::TSpan::new("")
            .set("x", center.x())
            .set("dy", line_height)
            .add(SvgText::new(line));
        text = text.add(tspan);
    }
    text
}

/// A sink that logs what each redraw would show.
#[derive(Debug, Default)]
pub struct LogSink {
    redraws: usize,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderSink for LogSink {
    fn redraw(&mut self, scene: &Scene<'_>) {
        self.redraws += 1;
        debug!(
            redraw = self.redraws,
            visible_nodes = scene.visible_nodes().count(),
            visible_edges = scene.visible_edges().count();
            "Scene redrawn"
        );
    }
}
