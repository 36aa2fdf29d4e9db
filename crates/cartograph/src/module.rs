//! Module membership.
//!
//! A module is the set of tables whose primary name starts with a given
//! prefix, together with the non-connector fields those tables own. Two
//! tables can sit in the same module under different prefixes, and one table
//! can sit in several modules at once (`icu` and `icustays` both cover
//! `icustays_extra`).
//!
//! Table names and their cascade fields are captured once from the graph.
//! The button prefixes only fix display order and the explicit `module_of`
//! relation.

use std::collections::HashMap;

use indexmap::IndexSet;
use log::debug;

use cartograph_core::identifier::Id;

use crate::graph::GraphStore;

/// One table and the non-connector fields it owns.
#[derive(Debug, Clone)]
struct TableEntry {
    name: String,
    table: Id,
    fields: Vec<Id>,
}

impl TableEntry {
    fn ids(&self) -> impl Iterator<Item = Id> + '_ {
        std::iter::once(self.table).chain(self.fields.iter().copied())
    }
}

/// Module buttons, the explicit `node -> module` mapping, and the table
/// entries membership is matched against.
#[derive(Debug, Clone, Default)]
pub struct ModuleIndex {
    prefixes: Vec<String>,
    module_of: HashMap<Id, String>,
    tables: Vec<TableEntry>,
}

impl ModuleIndex {
    /// Builds the index.
    ///
    /// When `declared` is non-empty those prefixes are the module buttons, in
    /// that order. Otherwise one button is derived per distinct table-name
    /// prefix: the text before the first `separator` (or the whole name when
    /// it has none).
    ///
    /// `module_of` assigns a table to the longest button prefix its primary
    /// name starts with, and a field to the module of the first table that
    /// owns it. Membership itself is not limited to the buttons; see
    /// [`ModuleIndex::members`].
    pub fn new(graph: &GraphStore, declared: &[String], separator: &str) -> Self {
        let prefixes: Vec<String> = if declared.is_empty() {
            Self::derive_prefixes(graph, separator)
        } else {
            declared.to_vec()
        };

        let tables: Vec<TableEntry> = graph
            .tables()
            .map(|table| TableEntry {
                name: table.label().primary().to_string(),
                table: table.id(),
                fields: graph
                    .cascade_targets(table.id())
                    .map(|node| node.id())
                    .collect(),
            })
            .collect();

        let mut module_of = HashMap::new();
        for entry in &tables {
            let Some(prefix) = prefixes
                .iter()
                .filter(|prefix| entry.name.starts_with(prefix.as_str()))
                .max_by_key(|prefix| prefix.len())
            else {
                continue;
            };
            for id in entry.ids() {
                module_of.entry(id).or_insert_with(|| prefix.clone());
            }
        }

        let index = Self {
            prefixes,
            module_of,
            tables,
        };
        for prefix in &index.prefixes {
            debug!(
                module = prefix.as_str(),
                members_count = index.members(prefix).len();
                "Module indexed"
            );
        }
        index
    }

    fn derive_prefixes(graph: &GraphStore, separator: &str) -> Vec<String> {
        let mut prefixes = IndexSet::new();
        for table in graph.tables() {
            let name = table.label().primary();
            let prefix = name
                .split_once(separator)
                .map_or(name, |(prefix, _)| prefix);
            prefixes.insert(prefix.to_string());
        }
        prefixes.into_iter().collect()
    }

    /// Returns the module prefixes in button order.
    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.prefixes.iter().map(String::as_str)
    }

    /// Returns the button module a table or owned field belongs to.
    pub fn module_of(&self, id: Id) -> Option<&str> {
        self.module_of.get(&id).map(String::as_str)
    }

    /// Returns every table whose primary name starts with `prefix`, each
    /// followed by its non-connector fields, in catalogue order and without
    /// repeats. Any prefix works, not only the button prefixes.
    pub fn members(&self, prefix: &str) -> indexmap::set::IntoIter<Id> {
        let members: IndexSet<Id> = self
            .matching(prefix)
            .flat_map(|entry| entry.ids())
            .collect();
        members.into_iter()
    }

    pub fn contains(&self, prefix: &str, id: Id) -> bool {
        self.matching(prefix)
            .any(|entry| entry.ids().any(|member| member == id))
    }

    fn matching<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a TableEntry> + 'a {
        self.tables
            .iter()
            .filter(move |entry| entry.name.starts_with(prefix))
    }
}
