//! The render-facing snapshot.
//!
//! The core never draws. After every mutation it hands a [`Scene`] to each
//! registered [`RenderSink`]; the sink reads positions and hidden flags and
//! does the pixels.

use cartograph_core::{
    catalogue::{Category, DisplayLabel, EdgeClass},
    geometry::{Bounds, Point},
    identifier::Id,
};

use crate::graph::{EdgeId, GraphStore};

/// The rendering engine seam.
pub trait RenderSink {
    /// Called with the current scene after load and after every visibility change.
    fn redraw(&mut self, scene: &Scene<'_>);
}

/// A node as the renderer sees it.
#[derive(Debug, Clone, Copy)]
pub struct NodeView<'a> {
    pub id: Id,
    pub category: Category,
    pub label: &'a DisplayLabel,
    pub position: Point,
    pub hidden: bool,
    pub fixed: bool,
}

/// An edge as the renderer sees it.
#[derive(Debug, Clone, Copy)]
pub struct EdgeView {
    pub id: EdgeId,
    pub from: Id,
    pub to: Id,
    pub class: EdgeClass,
    pub hidden: bool,
}

/// Read-only view over a laid-out graph store.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    graph: &'a GraphStore,
}

impl<'a> Scene<'a> {
    /// Wraps a graph store that has been through layout.
    pub(crate) fn new(graph: &'a GraphStore) -> Self {
        debug_assert!(graph.is_laid_out(), "scene built before layout");
        Self { graph }
    }

    /// Returns every node in catalogue order.
    pub fn nodes(self) -> impl Iterator<Item = NodeView<'a>> + 'a {
        self.graph.nodes().map(|node| NodeView {
            id: node.id(),
            category: node.category(),
            label: node.label(),
            position: node.position().unwrap_or_default(),
            hidden: node.is_hidden(),
            fixed: node.is_fixed(),
        })
    }

    /// Returns every edge in catalogue order.
    pub fn edges(self) -> impl Iterator<Item = EdgeView> + 'a {
        self.graph.edges().map(|edge| EdgeView {
            id: edge.id(),
            from: edge.from(),
            to: edge.to(),
            class: edge.class(),
            hidden: edge.is_hidden(),
        })
    }

    pub fn visible_nodes(self) -> impl Iterator<Item = NodeView<'a>> + 'a {
        self.nodes().filter(|node| !node.hidden)
    }

    pub fn visible_edges(self) -> impl Iterator<Item = EdgeView> + 'a {
        self.edges().filter(|edge| !edge.hidden)
    }

    /// Returns the position of `id`.
    pub fn position(&self, id: Id) -> Option<Point> {
        self.graph.node(id).and_then(|node| node.position())
    }

    /// Returns the box spanned by the visible nodes' centers, `None` when
    /// nothing is visible.
    pub fn visible_bounds(&self) -> Option<Bounds> {
        let mut positions = self.visible_nodes().map(|node| node.position);
        let first = positions.next()?;
        Some(positions.fold(Bounds::from_point(first), Bounds::include))
    }
}
