//! The Selection Projection.
//!
//! Turns "the user clicked node N" (or clicked empty space) into the record
//! a detail panel displays. Projection is a pure read of the graph store: it
//! never changes visibility, it only hands back the [`Action`]s the shell may
//! invoke next.

use std::fmt;

use cartograph_core::{catalogue::Category, identifier::Id};

use crate::{config::DetailConfig, graph::GraphStore};

/// A user-invokable visibility operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    HideNode(Id),
    HideTableCascade(Id),
    ToggleModule(String),
    RevealAll,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HideNode(_) => f.write_str("Hide this node"),
            Self::HideTableCascade(_) => f.write_str("Hide table and its fields"),
            Self::ToggleModule(prefix) => write!(f, "Toggle {prefix}"),
            Self::RevealAll => f.write_str("Show all"),
        }
    }
}

/// The display record for the detail panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    node: Option<Id>,
    title: String,
    subtitle: String,
    description: String,
    actions: Vec<Action>,
}

impl Projection {
    /// The placeholder shown when nothing is selected.
    pub fn empty(prompt: &str) -> Self {
        Self {
            node: None,
            title: String::new(),
            subtitle: String::new(),
            description: prompt.to_string(),
            actions: Vec::new(),
        }
    }

    /// The selected node, `None` for the placeholder.
    pub fn node(&self) -> Option<Id> {
        self.node
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn is_empty(&self) -> bool {
        self.node.is_none()
    }
}

/// Builds [`Projection`]s using the configured placeholder texts.
#[derive(Debug, Clone, Default)]
pub struct Projector {
    detail: DetailConfig,
}

impl Projector {
    pub fn new(detail: DetailConfig) -> Self {
        Self { detail }
    }

    /// Projects the selected node, or the placeholder when `selected` is
    /// `None` or names no node.
    pub fn project(&self, graph: &GraphStore, selected: Option<Id>) -> Projection {
        let Some(node) = selected.and_then(|id| graph.node(id)) else {
            return self.empty();
        };

        let mut actions = vec![Action::HideNode(node.id())];
        if node.category() == Category::Table {
            actions.push(Action::HideTableCascade(node.id()));
        }

        Projection {
            node: Some(node.id()),
            title: node.label().primary().to_string(),
            subtitle: node.label().gloss().to_string(),
            description: node
                .description()
                .unwrap_or(self.detail.no_description())
                .to_string(),
            actions,
        }
    }

    /// The placeholder projection.
    pub fn empty(&self) -> Projection {
        Projection::empty(self.detail.empty_prompt())
    }
}
