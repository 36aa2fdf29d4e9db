//! The Graph Store.
//!
//! Holds the authoritative set of nodes and edges built from a
//! [`Catalogue`], together with the per-node incoming/outgoing edge indices
//! used for traversal and for incremental edge re-derivation.
//!
//! # Mutation discipline
//!
//! The store is built once and never gains or loses nodes or edges. Two
//! kinds of attributes change afterwards, each through a crate-private
//! entry point:
//!
//! - `position` and `fixed`, written once by [`GraphStore::apply_layout`].
//! - node `hidden`, written by the visibility engine. Edge `hidden` has no
//!   setter at all; it is recomputed from endpoint visibility by
//!   [`GraphStore::rederive_edges`] or [`GraphStore::rederive_incident`], so
//!   `edge.hidden == from.hidden || to.hidden` holds whenever control returns
//!   to a caller.

use std::{collections::HashMap, fmt};

use indexmap::IndexMap;
use log::{debug, trace};
use thiserror::Error;

use cartograph_core::{
    catalogue::{Catalogue, Category, DisplayLabel, EdgeClass, NodeRecord},
    geometry::Point,
    identifier::Id,
};

use crate::layout::Layout;

/// Reference errors detected while building the store from a catalogue.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("node `{0}` is declared more than once")]
    DuplicateNode(Id),

    #[error("edge #{edge} references unknown {role} node `{id}`")]
    UnknownEndpoint {
        edge: usize,
        role: EndpointRole,
        id: Id,
    },
}

/// Which end of an edge a reference error points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointRole {
    Source,
    Target,
}

impl fmt::Display for EndpointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Synthetic edge identity: the edge's position in the catalogue edge list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(usize);

impl EdgeId {
    /// Returns the position of the edge in catalogue order.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// A node in the store.
#[derive(Debug, Clone)]
pub struct Node {
    record: NodeRecord,
    position: Option<Point>,
    hidden: bool,
    fixed: bool,
}

impl Node {
    fn new(record: NodeRecord) -> Self {
        Self {
            record,
            position: None,
            hidden: false,
            fixed: false,
        }
    }

    pub fn id(&self) -> Id {
        self.record.id()
    }

    pub fn category(&self) -> Category {
        self.record.category()
    }

    pub fn label(&self) -> &DisplayLabel {
        self.record.label()
    }

    pub fn description(&self) -> Option<&str> {
        self.record.description()
    }

    /// Returns the laid-out position, `None` until layout has been applied.
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Returns true once the node has been positioned. Nothing moves a fixed node.
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }
}

/// A directed edge in the store.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    id: EdgeId,
    from: Id,
    to: Id,
    class: EdgeClass,
    hidden: bool,
}

impl Edge {
    pub fn id(&self) -> EdgeId {
        self.id
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

    /// Derived visibility: true if either endpoint is hidden.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn touches(&self, id: Id) -> bool {
        self.from == id || self.to == id
    }
}

/// Node and edge storage with typed attributes.
///
/// Nodes iterate in catalogue order; edges iterate in catalogue order and
/// are addressed by [`EdgeId`].
#[derive(Debug, Clone)]
pub struct GraphStore {
    nodes: IndexMap<Id, Node>,
    edges: Vec<Edge>,
    incoming_edges: HashMap<Id, Vec<EdgeId>>,
    outgoing_edges: HashMap<Id, Vec<EdgeId>>,
}

impl GraphStore {
    /// Builds the store from a catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError`] if a node id is declared twice or an edge
    /// references a node id that does not exist.
    pub fn from_catalogue(catalogue: &Catalogue) -> Result<Self, GraphError> {
        let mut nodes = IndexMap::with_capacity(catalogue.nodes().len());
        for record in catalogue.nodes() {
            let id = record.id();
            if nodes.insert(id, Node::new(record.clone())).is_some() {
                return Err(GraphError::DuplicateNode(id));
            }
        }

        let mut store = Self {
            nodes,
            edges: Vec::with_capacity(catalogue.edges().len()),
            incoming_edges: HashMap::new(),
            outgoing_edges: HashMap::new(),
        };

        for (index, record) in catalogue.edges().iter().enumerate() {
            if !store.contains_node(record.from()) {
                return Err(GraphError::UnknownEndpoint {
                    edge: index,
                    role: EndpointRole::Source,
                    id: record.from(),
                });
            }
            if !store.contains_node(record.to()) {
                return Err(GraphError::UnknownEndpoint {
                    edge: index,
                    role: EndpointRole::Target,
                    id: record.to(),
                });
            }
            store.add_edge(record.from(), record.to(), record.class());
        }

        debug!(
            nodes_count = store.nodes.len(),
            edges_count = store.edges.len();
            "Graph store built"
        );
        Ok(store)
    }

    fn add_edge(&mut self, from: Id, to: Id, class: EdgeClass) {
        let id = EdgeId(self.edges.len());
        self.edges.push(Edge {
            id,
            from,
            to,
            class,
            hidden: false,
        });
        self.outgoing_edges.entry(from).or_default().push(id);
        self.incoming_edges.entry(to).or_default().push(id);
    }

    /// Returns the node with the given id, if it exists.
    pub fn node(&self, id: Id) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains_node(&self, id: Id) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Returns an iterator over all nodes in catalogue order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns an iterator over the table-category nodes in catalogue order.
    pub fn tables(&self) -> impl Iterator<Item = &Node> {
        self.nodes()
            .filter(|node| node.category() == Category::Table)
    }

    /// Returns the edge with the given id, if it exists.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0)
    }

    /// Returns an iterator over all edges in catalogue order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn edges_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the edges whose source is `id`, in catalogue order.
    pub fn outgoing_edges(&self, id: Id) -> impl Iterator<Item = &Edge> {
        self.outgoing_edges
            .get(&id)
            .into_iter()
            .flatten()
            .map(|edge_id| &self.edges[edge_id.0])
    }

    /// Returns the edges whose target is `id`, in catalogue order.
    pub fn incoming_edges(&self, id: Id) -> impl Iterator<Item = &Edge> {
        self.incoming_edges
            .get(&id)
            .into_iter()
            .flatten()
            .map(|edge_id| &self.edges[edge_id.0])
    }

    /// Returns every edge touching `id`. A self-loop is reported once.
    pub fn incident_edges(&self, id: Id) -> impl Iterator<Item = &Edge> {
        self.outgoing_edges(id)
            .chain(self.incoming_edges(id).filter(move |edge| edge.from != id))
    }

    /// Returns the targets of ownership edges whose source is `id`, in edge order.
    pub fn owned_targets(&self, id: Id) -> impl Iterator<Item = &Node> {
        self.outgoing_edges(id)
            .filter(|edge| edge.class == EdgeClass::Ownership)
            .map(|edge| &self.nodes[&edge.to])
    }

    /// Returns the nodes a table drags along when it is hidden: every
    /// ownership target that is not a connector.
    pub fn cascade_targets(&self, table: Id) -> impl Iterator<Item = &Node> {
        self.owned_targets(table)
            .filter(|node| node.category() != Category::Connector)
    }

    /// Returns true when every edge's hidden flag matches its endpoints.
    pub fn edges_consistent(&self) -> bool {
        self.edges
            .iter()
            .all(|edge| edge.hidden == self.endpoint_hidden(edge))
    }

    /// Returns true once layout has positioned every node.
    pub fn is_laid_out(&self) -> bool {
        self.nodes.values().all(|node| node.position.is_some())
    }

    fn endpoint_hidden(&self, edge: &Edge) -> bool {
        self.nodes[&edge.from].hidden || self.nodes[&edge.to].hidden
    }

    /// Writes layout coordinates onto the nodes and marks them fixed.
    pub(crate) fn apply_layout(&mut self, layout: &Layout) {
        for (id, position) in layout.iter() {
            if let Some(node) = self.nodes.get_mut(&id) {
                node.position = Some(position);
                node.fixed = true;
            }
        }
        trace!(positioned = layout.len(); "Layout applied to graph store");
    }

    /// Sets the hidden flag of one node. Returns true if the flag changed.
    ///
    /// Edge flags are left stale; callers must follow up with a re-derivation pass.
    pub(crate) fn set_node_hidden(&mut self, id: Id, hidden: bool) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) if node.hidden != hidden => {
                node.hidden = hidden;
                true
            }
            _ => false,
        }
    }

    /// Bulk patch of node hidden flags. Returns the ids whose flag changed.
    pub(crate) fn set_nodes_hidden<I>(&mut self, ids: I, hidden: bool) -> Vec<Id>
    where
        I: IntoIterator<Item = Id>,
    {
        ids.into_iter()
            .filter(|id| self.set_node_hidden(*id, hidden))
            .collect()
    }

    /// Sets every node's hidden flag. Returns how many nodes changed.
    pub(crate) fn set_all_nodes_hidden(&mut self, hidden: bool) -> usize {
        let mut changed = 0;
        for node in self.nodes.values_mut() {
            if node.hidden != hidden {
                node.hidden = hidden;
                changed += 1;
            }
        }
        changed
    }

    /// Recomputes every edge's hidden flag from its endpoints.
    pub(crate) fn rederive_edges(&mut self) {
        for index in 0..self.edges.len() {
            let hidden = self.endpoint_hidden(&self.edges[index]);
            self.edges[index].hidden = hidden;
        }
    }

    /// Recomputes the hidden flag of the edges touching `id` only.
    pub(crate) fn rederive_incident(&mut self, id: Id) {
        let incident: Vec<EdgeId> = self.incident_edges(id).map(Edge::id).collect();
        for edge_id in incident {
            let hidden = self.endpoint_hidden(&self.edges[edge_id.0]);
            let edge = &mut self.edges[edge_id.0];
            debug_assert!(edge.touches(id));
            edge.hidden = hidden;
        }
    }
}
