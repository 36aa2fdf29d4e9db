//! Static catalogue records.
//!
//! A catalogue is the external, hand-authored description of a knowledge
//! graph: an ordered list of nodes, an ordered list of edges, the anchor table
//! that pins tables and connectors to fixed coordinates, and optionally the
//! module prefixes the shell offers as toggle buttons.
//!
//! Order matters. Nodes and edges are kept exactly as authored, and the
//! layout uses edge order to break ties (see the field grid rule in the
//! `cartograph` crate).
//!
//! # Example
//!
//! ```
//! use cartograph_core::catalogue::{Catalogue, Category};
//!
//! let source = r#"
//! modules = ["hosp"]
//!
//! [[nodes]]
//! id = "hosp_patients"
//! category = "table"
//! label = "hosp_patients\n(Patient demographics)"
//!
//! [[nodes]]
//! id = "gender"
//! category = "field"
//! label = "gender\nAdministrative sex"
//!
//! [[edges]]
//! from = "hosp_patients"
//! to = "gender"
//! class = "ownership"
//!
//! [anchors]
//! hosp_patients = { x = 0.0, y = 0.0 }
//! "#;
//!
//! let catalogue: Catalogue = toml::from_str(source).unwrap();
//! assert_eq!(catalogue.nodes().len(), 2);
//! assert_eq!(catalogue.nodes()[0].category(), Category::Table);
//! assert_eq!(catalogue.nodes()[0].label().gloss(), "Patient demographics");
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{geometry::Point, identifier::Id};

/// The kind of a catalogue node. Every node has exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// A data source or table. Always anchor-positioned.
    Table,
    /// A column or attribute owned by a table, or a free-standing note.
    Field,
    /// A field shared across many tables (a cross-reference key).
    Connector,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Table => "table",
            Self::Field => "field",
            Self::Connector => "connector",
        };
        f.write_str(name)
    }
}

/// The color class of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeClass {
    /// A table owns a field.
    Ownership,
    /// A table or field references a connector.
    CrossReference,
    /// A node references a descriptive note.
    Annotation,
}

impl fmt::Display for EdgeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ownership => "ownership",
            Self::CrossReference => "cross_reference",
            Self::Annotation => "annotation",
        };
        f.write_str(name)
    }
}

/// A two-part display label: a primary name and a short gloss.
///
/// Catalogues write labels as a single string with the gloss on the second
/// line, optionally wrapped in parentheses.
///
/// # Examples
///
/// ```
/// use cartograph_core::catalogue::DisplayLabel;
///
/// let label = DisplayLabel::parse("icu_stays\n(ICU admissions)");
/// assert_eq!(label.primary(), "icu_stays");
/// assert_eq!(label.gloss(), "ICU admissions");
///
/// let bare = DisplayLabel::parse("subject_id");
/// assert_eq!(bare.gloss(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct DisplayLabel {
    primary: String,
    gloss: String,
}

impl DisplayLabel {
    /// Creates a label from its two parts.
    pub fn new(primary: impl Into<String>, gloss: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            gloss: gloss.into(),
        }
    }

    /// Splits a catalogue label at its first newline.
    pub fn parse(text: &str) -> Self {
        let (primary, gloss) = text.split_once('\n').unwrap_or((text, ""));
        let gloss = gloss.trim();
        let gloss = gloss
            .strip_prefix('(')
            .and_then(|inner| inner.strip_suffix(')'))
            .unwrap_or(gloss);
        Self::new(primary.trim(), gloss.trim())
    }

    /// Returns the primary name.
    pub fn primary(&self) -> &str {
        &self.primary
    }

    /// Returns the short gloss, empty when the label has none.
    pub fn gloss(&self) -> &str {
        &self.gloss
    }
}

impl From<String> for DisplayLabel {
    fn from(text: String) -> Self {
        Self::parse(&text)
    }
}

impl From<DisplayLabel> for String {
    fn from(label: DisplayLabel) -> Self {
        if label.gloss.is_empty() {
            label.primary
        } else {
            format!("{}\n({})", label.primary, label.gloss)
        }
    }
}

/// A node as authored in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    id: Id,
    category: Category,
    label: DisplayLabel,
    #[serde(default)]
    description: Option<String>,
}

impl NodeRecord {
    pub fn new(id: Id, category: Category, label: DisplayLabel) -> Self {
        Self {
            id,
            category,
            label,
            description: None,
        }
    }

    /// Sets the rich description shown on selection (builder style).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn label(&self) -> &DisplayLabel {
        &self.label
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// An edge as authored in the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    from: Id,
    to: Id,
    class: EdgeClass,
}

impl EdgeRecord {
    pub fn new(from: Id, to: Id, class: EdgeClass) -> Self {
        Self { from, to, class }
    }

    pub fn from(&self) -> Id {
        self.from
    }

    pub fn to(&self) -> Id {
        self.to
    }

    pub fn class(&self) -> EdgeClass {
        self.class
    }
}

/// Hand-authored coordinates for tables, connectors and free-standing notes.
///
/// Insertion order is preserved so that configuration errors are reported
/// in the order the author wrote the table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnchorTable {
    anchors: IndexMap<Id, Point>,
}

impl AnchorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an anchor (builder style). A later anchor for the same id replaces the earlier one.
    pub fn with_anchor(mut self, id: Id, position: Point) -> Self {
        self.insert(id, position);
        self
    }

    pub fn insert(&mut self, id: Id, position: Point) {
        self.anchors.insert(id, position);
    }

    pub fn get(&self, id: Id) -> Option<Point> {
        self.anchors.get(&id).copied()
    }

    pub fn contains(&self, id: Id) -> bool {
        self.anchors.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Id, Point)> + '_ {
        self.anchors.iter().map(|(id, point)| (*id, *point))
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

/// The complete static input for one diagram.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalogue {
    /// Declared module prefixes, in button order.
    #[serde(default)]
    modules: Vec<String>,
    nodes: Vec<NodeRecord>,
    #[serde(default)]
    edges: Vec<EdgeRecord>,
    #[serde(default)]
    anchors: AnchorTable,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module(mut self, prefix: impl Into<String>) -> Self {
        self.modules.push(prefix.into());
        self
    }

    pub fn with_node(mut self, node: NodeRecord) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn with_edge(mut self, edge: EdgeRecord) -> Self {
        self.edges.push(edge);
        self
    }

    pub fn with_anchor(mut self, id: Id, position: Point) -> Self {
        self.anchors.insert(id, position);
        self
    }

    pub fn modules(&self) -> &[String] {
        &self.modules
    }

    pub fn nodes(&self) -> &[NodeRecord] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeRecord] {
        &self.edges
    }

    pub fn anchors(&self) -> &AnchorTable {
        &self.anchors
    }
}
