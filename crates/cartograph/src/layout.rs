//! The Layout Calculator.
//!
//! Places every node without any simulation. The result is a pure function
//! of the graph topology, the anchor table and the grid constants in
//! [`LayoutConfig`]; running it twice yields identical coordinates.
//!
//! # Placement rules
//!
//! - Tables and connectors take their anchor coordinate. A missing anchor is
//!   a configuration error; there is no fallback packing.
//! - A field owned by a table through an ownership edge goes into a
//!   two-column grid below that table. Index `i` in the table's group lands
//!   at column `i % 2`, row `i / 2`:
//!
//! ```text
//!              table (tx, ty)
//!                    │ start_offset
//!        ┌───────────┴───────────┐
//!     [0] (tx - cs/2)        [1] (tx + cs/2)     row 0
//!     [2]                    [3]                 row 0 + row_spacing
//!     [4]                                        row 0 + 2 * row_spacing
//! ```
//!
//! - Groups are built by walking the edge list once. A field owned by more
//!   than one table joins the group of the first ownership edge that names
//!   it; later owners skip it without leaving a gap.
//! - A field with its own anchor (a free-standing note, or an owned field the
//!   author chose to pin) takes the anchor and does not occupy a grid slot.
//! - Any other field is a configuration error, and so are anchors with a
//!   NaN or infinite coordinate and two tables anchored at the same point
//!   (`-0.0` and `0.0` count as the same).

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, info};
use thiserror::Error;

use cartograph_core::{
    catalogue::{AnchorTable, Category, EdgeClass},
    geometry::Point,
    identifier::Id,
};

use crate::{config::LayoutConfig, graph::GraphStore};

/// Configuration errors that stop layout from completing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("{category} node `{id}` has no entry in the anchor table")]
    MissingAnchor { id: Id, category: Category },

    #[error("field node `{0}` is not owned by any table and has no anchor")]
    UnplacedNode(Id),

    #[error("tables `{first}` and `{second}` are anchored at the same position")]
    DuplicateTablePosition { first: Id, second: Id },

    #[error("anchor table references unknown node `{0}`")]
    UnknownAnchor(Id),

    #[error("anchor for `{id}` is not a finite coordinate ({x}, {y})")]
    NonFiniteAnchor { id: Id, x: f32, y: f32 },
}

/// A complete coordinate assignment, in catalogue node order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    positions: IndexMap<Id, Point>,
}

impl Layout {
    /// Returns the coordinate assigned to `id`.
    pub fn position(&self, id: Id) -> Option<Point> {
        self.positions.get(&id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Id, Point)> + '_ {
        self.positions.iter().map(|(id, point)| (*id, *point))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Deterministic anchor-and-grid layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutCalculator {
    config: LayoutConfig,
}

impl LayoutCalculator {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Calculates a position for every node in `graph`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] if a table or connector lacks an anchor, a
    /// field can be placed neither by grid nor by anchor, two tables share an
    /// anchor, or an anchor names a node that does not exist.
    pub fn calculate(
        &self,
        graph: &GraphStore,
        anchors: &AnchorTable,
    ) -> Result<Layout, LayoutError> {
        info!(
            nodes_count = graph.nodes_count(),
            anchors_count = anchors.len();
            "Calculating layout"
        );

        if let Some((id, _)) = anchors.iter().find(|(id, _)| !graph.contains_node(*id)) {
            return Err(LayoutError::UnknownAnchor(id));
        }
        if let Some((id, point)) = anchors.iter().find(|(_, point)| !point.is_finite()) {
            return Err(LayoutError::NonFiniteAnchor {
                id,
                x: point.x(),
                y: point.y(),
            });
        }

        let mut placed = HashMap::<Id, Point>::with_capacity(graph.nodes_count());

        for node in graph.nodes() {
            let category = node.category();
            if category == Category::Field {
                continue;
            }
            let anchor = anchors.get(node.id()).ok_or(LayoutError::MissingAnchor {
                id: node.id(),
                category,
            })?;
            placed.insert(node.id(), anchor);
        }

        Self::check_table_overlap(graph, &placed)?;

        let groups = Self::ownership_groups(graph, anchors);
        for (table, fields) in &groups {
            let origin = placed[table];
            for (index, field) in fields.iter().enumerate() {
                placed.insert(*field, self.grid_slot(origin, index));
            }
            debug!(table:% = table, fields_count = fields.len(); "Placed field grid");
        }

        for node in graph.nodes() {
            if placed.contains_key(&node.id()) {
                continue;
            }
            let anchor = anchors
                .get(node.id())
                .ok_or(LayoutError::UnplacedNode(node.id()))?;
            placed.insert(node.id(), anchor);
        }

        let positions: IndexMap<Id, Point> = graph
            .nodes()
            .map(|node| (node.id(), placed[&node.id()]))
            .collect();

        info!(positioned = positions.len(), grids = groups.len(); "Layout calculated");
        Ok(Layout { positions })
    }

    /// Returns the grid coordinate of the `index`-th field under a table at `origin`.
    pub fn grid_slot(&self, origin: Point, index: usize) -> Point {
        let column = (index % 2) as f32;
        let row = (index / 2) as f32;
        let dx = (column - 0.5) * self.config.column_spacing();
        let dy = self.config.start_offset() + row * self.config.row_spacing();
        origin.add_point(Point::new(dx, dy))
    }

    /// Walks the edge list once and assigns each grid-placed field to the
    /// first table that owns it.
    fn ownership_groups(graph: &GraphStore, anchors: &AnchorTable) -> IndexMap<Id, Vec<Id>> {
        let mut groups = IndexMap::<Id, Vec<Id>>::new();
        let mut assigned = HashMap::<Id, Id>::new();

        for edge in graph.edges() {
            if edge.class() != EdgeClass::Ownership {
                continue;
            }
            let (Some(owner), Some(target)) = (graph.node(edge.from()), graph.node(edge.to()))
            else {
                continue;
            };
            if owner.category() != Category::Table
                || target.category() != Category::Field
                || anchors.contains(target.id())
            {
                continue;
            }
            if let Some(first_owner) = assigned.get(&target.id()) {
                if *first_owner != owner.id() {
                    debug!(
                        field:% = target.id(),
                        placed_under:% = first_owner,
                        skipped_owner:% = owner.id();
                        "Field owned by several tables"
                    );
                }
                continue;
            }
            assigned.insert(target.id(), owner.id());
            groups.entry(owner.id()).or_default().push(target.id());
        }

        groups
    }

    fn check_table_overlap(
        graph: &GraphStore,
        placed: &HashMap<Id, Point>,
    ) -> Result<(), LayoutError> {
        let mut seen: Vec<(Id, Point)> = Vec::new();
        for table in graph.tables() {
            let point = placed[&table.id()];
            let duplicate = seen.iter().find(|(_, other)| other.same_position(point));
            if let Some((first, _)) = duplicate {
                return Err(LayoutError::DuplicateTablePosition {
                    first: *first,
                    second: table.id(),
                });
            }
            seen.push((table.id(), point));
        }
        Ok(())
    }
}
