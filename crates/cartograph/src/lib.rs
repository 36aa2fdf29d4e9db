//! Cartograph - deterministic layout and cascading visibility for static
//! knowledge-graph diagrams.
//!
//! A catalogue of tables, fields and connector keys is laid out once without
//! any physics simulation, then progressively decluttered by hiding single
//! nodes, whole tables with their fields, or whole modules, and restored with
//! a single reveal-all. Drawing is left to whatever implements
//! [`scene::RenderSink`].
//!
//! # Components
//!
//! - [`graph::GraphStore`] - nodes and edges with typed attributes
//! - [`layout::LayoutCalculator`] - anchor and two-column grid placement
//! - [`module::ModuleIndex`] - explicit module membership
//! - [`visibility::VisibilityEngine`] - the show/hide state machine
//! - [`selection::Projector`] - the detail-panel projection
//! - [`Explorer`] - the facade a presentation shell drives

pub mod config;
pub mod graph;
pub mod layout;
pub mod module;
pub mod scene;
pub mod selection;
pub mod visibility;

mod error;
mod explorer;

pub use cartograph_core::{catalogue, color, geometry, identifier};

pub use error::CartographError;
pub use explorer::{Explorer, UiEvent};
