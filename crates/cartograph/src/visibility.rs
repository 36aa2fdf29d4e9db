//! The Visibility Engine.
//!
//! A state machine layered over the [`GraphStore`]: every node is either
//! visible or hidden, and every module prefix is either suppressed or not.
//! Four operations move between states:
//!
//! | operation            | nodes touched                     | edge pass |
//! |----------------------|-----------------------------------|-----------|
//! | `hide_node`          | the node                          | incident  |
//! | `hide_table_cascade` | the table and its owned fields    | full scan |
//! | `toggle_module`      | every member of the module        | full scan |
//! | `reveal_all`         | every node                        | full scan |
//!
//! Node flags are patched first and edge flags are re-derived once afterwards,
//! so no half-applied cascade is ever observable. None of the operations can
//! fail: unknown ids and prefixes are logged and ignored.
//!
//! Suppressing a module remembers which of its members the suppression
//! itself hid. Un-suppressing reveals exactly those, so a suppress/unsuppress
//! pair restores every member's previous flag. A member that is also covered
//! by another suppressed module stays hidden and is handed over to that
//! module instead.

use indexmap::IndexMap;
use log::{debug, info, warn};

use cartograph_core::{catalogue::Category, identifier::Id};

use crate::{graph::GraphStore, module::ModuleIndex};

/// Summary of what a visibility operation did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibilityChange {
    nodes_changed: usize,
    clears_selection: bool,
}

impl VisibilityChange {
    fn new(nodes_changed: usize, clears_selection: bool) -> Self {
        Self {
            nodes_changed,
            clears_selection,
        }
    }

    /// Number of nodes whose hidden flag flipped.
    pub fn nodes_changed(&self) -> usize {
        self.nodes_changed
    }

    /// True when the detail panel must be cleared.
    pub fn clears_selection(&self) -> bool {
        self.clears_selection
    }
}

/// Per-view visibility state and the operations over it.
#[derive(Debug, Clone, Default)]
pub struct VisibilityEngine {
    modules: ModuleIndex,
    /// Suppressed prefixes, each with the nodes its suppression hid.
    suppressed: IndexMap<String, Vec<Id>>,
}

impl VisibilityEngine {
    pub fn new(modules: ModuleIndex) -> Self {
        Self {
            modules,
            suppressed: IndexMap::new(),
        }
    }

    pub fn modules(&self) -> &ModuleIndex {
        &self.modules
    }

    /// Returns whether the module toggle for `prefix` is currently active.
    pub fn is_suppressed(&self, prefix: &str) -> bool {
        self.suppressed.contains_key(prefix)
    }

    /// Returns the currently suppressed prefixes in the order they were suppressed.
    pub fn suppressed(&self) -> impl Iterator<Item = &str> {
        self.suppressed.keys().map(String::as_str)
    }

    /// Hides a single node and the edges touching it.
    pub fn hide_node(&mut self, graph: &mut GraphStore, id: Id) -> VisibilityChange {
        if !graph.contains_node(id) {
            warn!(node:% = id; "Ignoring hide request for unknown node");
            return VisibilityChange::default();
        }

        let changed = graph.set_node_hidden(id, true);
        graph.rederive_incident(id);

        info!(node:% = id, changed; "Node hidden");
        VisibilityChange::new(usize::from(changed), true)
    }

    /// Hides a table together with every non-connector node it owns.
    ///
    /// Connectors owned by the table stay visible; edges touching the table
    /// or the hidden fields are hidden by the edge pass. The cascade is one
    /// level deep.
    pub fn hide_table_cascade(&mut self, graph: &mut GraphStore, table: Id) -> VisibilityChange {
        let category = graph.node(table).map(|node| node.category());
        if category != Some(Category::Table) {
            warn!(node:% = table, category:?; "Ignoring table cascade for non-table node");
            return VisibilityChange::default();
        }

        let targets: Vec<Id> = std::iter::once(table)
            .chain(graph.cascade_targets(table).map(|node| node.id()))
            .collect();
        let changed = graph.set_nodes_hidden(targets, true);
        graph.rederive_edges();

        info!(table:% = table, nodes_changed = changed.len(); "Table hidden with its fields");
        VisibilityChange::new(changed.len(), true)
    }

    /// Flips the suppressed state of a module.
    ///
    /// Suppressing hides every table in the module and their non-connector
    /// fields. Un-suppressing reveals the nodes that suppression hid. The edge
    /// pass covers the whole graph, since module members share edges with
    /// other modules through connectors.
    pub fn toggle_module(&mut self, graph: &mut GraphStore, prefix: &str) -> VisibilityChange {
        let changed = match self.suppressed.shift_remove(prefix) {
            Some(hidden_by_module) => self.unsuppress(graph, prefix, hidden_by_module),
            None => {
                let members: Vec<Id> = self.modules.members(prefix).collect();
                if members.is_empty() {
                    debug!(module = prefix; "Module has no members");
                }
                let hidden = graph.set_nodes_hidden(members, true);
                let count = hidden.len();
                self.suppressed.insert(prefix.to_string(), hidden);
                count
            }
        };
        graph.rederive_edges();

        info!(
            module = prefix,
            suppressed = self.is_suppressed(prefix),
            nodes_changed = changed;
            "Module toggled"
        );
        VisibilityChange::new(changed, false)
    }

    fn unsuppress(&mut self, graph: &mut GraphStore, prefix: &str, hidden: Vec<Id>) -> usize {
        let mut to_reveal = Vec::with_capacity(hidden.len());
        for id in hidden {
            let still_covered = self
                .suppressed
                .iter_mut()
                .find(|(other, _)| self.modules.contains(other, id));
            match still_covered {
                Some((other, owned)) => {
                    debug!(node:% = id, from = prefix, to = other.as_str(); "Node stays suppressed");
                    owned.push(id);
                }
                None => to_reveal.push(id),
            }
        }
        graph.set_nodes_hidden(to_reveal, false).len()
    }

    /// Makes every node and edge visible and clears every module toggle.
    pub fn reveal_all(&mut self, graph: &mut GraphStore) -> VisibilityChange {
        let changed = graph.set_all_nodes_hidden(false);
        graph.rederive_edges();
        self.suppressed.clear();

        info!(nodes_changed = changed; "All nodes revealed");
        VisibilityChange::new(changed, false)
    }
}
