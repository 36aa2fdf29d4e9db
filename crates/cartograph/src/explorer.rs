//! The facade a presentation shell drives.
//!
//! [`Explorer`] owns one view of a catalogue: the laid-out graph store, the
//! visibility state and the current detail-panel projection. Every mutation
//! runs to completion and then pushes a fresh [`Scene`] to the registered
//! [`RenderSink`]s.

use log::{debug, info, trace};

use cartograph_core::{catalogue::Catalogue, identifier::Id};

use crate::{
    config::AppConfig,
    error::CartographError,
    graph::GraphStore,
    layout::LayoutCalculator,
    module::ModuleIndex,
    scene::{RenderSink, Scene},
    selection::{Action, Projection, Projector},
    visibility::{VisibilityChange, VisibilityEngine},
};

/// An event reported by the UI shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A click on a node, or on empty space when `None`.
    NodeClicked(Option<Id>),
    /// A button press.
    Action(Action),
}

/// One interactive view of a catalogue.
///
/// # Examples
///
/// ```rust
/// use cartograph::{
///     Explorer,
///     catalogue::{Catalogue, Category, DisplayLabel, EdgeClass, EdgeRecord, NodeRecord},
///     config::AppConfig,
///     geometry::Point,
///     identifier::Id,
/// };
///
/// let catalogue = Catalogue::new()
///     .with_node(NodeRecord::new(Id::new("doc_t"), Category::Table, DisplayLabel::parse("doc_t")))
///     .with_node(NodeRecord::new(Id::new("doc_f"), Category::Field, DisplayLabel::parse("doc_f")))
///     .with_edge(EdgeRecord::new(Id::new("doc_t"), Id::new("doc_f"), EdgeClass::Ownership))
///     .with_anchor(Id::new("doc_t"), Point::new(0.0, 0.0));
///
/// let mut explorer = Explorer::load(&catalogue, AppConfig::default())
///     .expect("Failed to load catalogue");
///
/// explorer.hide_table_cascade(Id::new("doc_t"));
/// assert_eq!(explorer.scene().visible_nodes().count(), 0);
///
/// explorer.reveal_all();
/// assert_eq!(explorer.scene().visible_edges().count(), 1);
/// ```
pub struct Explorer {
    graph: GraphStore,
    visibility: VisibilityEngine,
    projector: Projector,
    selection: Projection,
    sinks: Vec<Box<dyn RenderSink>>,
}

impl Explorer {
    /// Builds the graph store, runs layout and indexes modules.
    ///
    /// # Errors
    ///
    /// Returns [`CartographError`] for an invalid configuration, a reference
    /// error in the catalogue, or a layout configuration error. Nothing is
    /// exposed to renderers unless every step succeeds.
    pub fn load(catalogue: &Catalogue, config: AppConfig) -> Result<Self, CartographError> {
        info!(
            nodes_count = catalogue.nodes().len(),
            edges_count = catalogue.edges().len();
            "Loading catalogue"
        );
        config.validate().map_err(CartographError::Config)?;

        let mut graph = GraphStore::from_catalogue(catalogue)?;

        let layout = LayoutCalculator::new(*config.layout()).calculate(&graph, catalogue.anchors())?;
        graph.apply_layout(&layout);
        debug!("Layout applied");

        let modules = ModuleIndex::new(
            &graph,
            catalogue.modules(),
            config.modules().separator(),
        );
        let projector = Projector::new(config.detail().clone());
        let selection = projector.empty();

        info!(modules_count = modules.prefixes().count(); "Catalogue loaded");
        Ok(Self {
            graph,
            visibility: VisibilityEngine::new(modules),
            projector,
            selection,
            sinks: Vec::new(),
        })
    }

    /// Registers a renderer and immediately sends it the current scene.
    pub fn with_sink(mut self, mut sink: Box<dyn RenderSink>) -> Self {
        sink.redraw(&Scene::new(&self.graph));
        self.sinks.push(sink);
        self
    }

    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    /// Returns the current render snapshot.
    pub fn scene(&self) -> Scene<'_> {
        Scene::new(&self.graph)
    }

    /// Returns the current detail-panel projection.
    pub fn selection(&self) -> &Projection {
        &self.selection
    }

    /// Returns the module prefixes in button order.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.visibility.modules().prefixes()
    }

    /// Returns whether a module toggle button should render as active.
    pub fn is_suppressed(&self, prefix: &str) -> bool {
        self.visibility.is_suppressed(prefix)
    }

    /// Projects a node without changing the current selection.
    pub fn project(&self, selected: Option<Id>) -> Projection {
        self.projector.project(&self.graph, selected)
    }

    /// Makes `selected` the current selection and returns its projection.
    pub fn select(&mut self, selected: Option<Id>) -> &Projection {
        self.selection = self.project(selected);
        trace!(selection:? = self.selection.node(); "Selection changed");
        &self.selection
    }

    pub fn hide_node(&mut self, id: Id) -> VisibilityChange {
        let change = self.visibility.hide_node(&mut self.graph, id);
        self.after_change(change);
        change
    }

    pub fn hide_table_cascade(&mut self, table: Id) -> VisibilityChange {
        let change = self.visibility.hide_table_cascade(&mut self.graph, table);
        self.after_change(change);
        change
    }

    pub fn toggle_module(&mut self, prefix: &str) -> VisibilityChange {
        let change = self.visibility.toggle_module(&mut self.graph, prefix);
        self.after_change(change);
        change
    }

    pub fn reveal_all(&mut self) -> VisibilityChange {
        let change = self.visibility.reveal_all(&mut self.graph);
        self.after_change(change);
        change
    }

    /// Runs the action a button press stands for.
    pub fn apply(&mut self, action: &Action) -> VisibilityChange {
        match action {
            Action::HideNode(id) => self.hide_node(*id),
            Action::HideTableCascade(id) => self.hide_table_cascade(*id),
            Action::ToggleModule(prefix) => self.toggle_module(prefix),
            Action::RevealAll => self.reveal_all(),
        }
    }

    /// Routes a UI event to the projection or to a visibility operation.
    pub fn dispatch(&mut self, event: UiEvent) {
        debug!(event:?; "Dispatching UI event");
        match event {
            UiEvent::NodeClicked(selected) => {
                self.select(selected);
            }
            UiEvent::Action(action) => {
                self.apply(&action);
            }
        }
    }

    fn after_change(&mut self, change: VisibilityChange) {
        if change.clears_selection() {
            self.selection = self.projector.empty();
        }
        debug_assert!(self.graph.edges_consistent());

        let scene = Scene::new(&self.graph);
        for sink in &mut self.sinks {
            sink.redraw(&scene);
        }
    }
}
