//! Configuration types for Cartograph.
//!
//! This module provides configuration structures that control how the
//! diagram is laid out, how modules are derived, what the detail panel shows
//! when there is nothing to show, and how a shell should color the result.
//! All types implement [`serde::Deserialize`] for loading from external
//! sources; every field has a default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`LayoutConfig`] - Field grid constants for the layout calculator.
//! - [`ModuleConfig`] - How module prefixes are derived when a catalogue declares none.
//! - [`DetailConfig`] - Placeholder texts for the selection projection.
//! - [`StyleConfig`] - Colors for presentation shells.
//!
//! # Example
//!
//! ```
//! # use cartograph::config::AppConfig;
//! let config: AppConfig = toml::from_str(r#"
//!     [layout]
//!     row_spacing = 80.0
//! "#).unwrap();
//!
//! assert_eq!(config.layout().row_spacing(), 80.0);
//! assert_eq!(config.layout().column_spacing(), 200.0);
//! assert!(config.validate().is_ok());
//! ```

use serde::Deserialize;

use cartograph_core::{
    catalogue::{Category, EdgeClass},
    color::Color,
};

/// Top-level configuration combining every section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    layout: LayoutConfig,

    #[serde(default)]
    modules: ModuleConfig,

    #[serde(default)]
    detail: DetailConfig,

    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the given layout section and defaults elsewhere.
    pub fn new(layout: LayoutConfig) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the module configuration.
    pub fn modules(&self) -> &ModuleConfig {
        &self.modules
    }

    /// Returns the detail panel configuration.
    pub fn detail(&self) -> &DetailConfig {
        &self.detail
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Checks every section for values that would make the diagram unusable.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid value found.
    pub fn validate(&self) -> Result<(), String> {
        self.layout.validate()?;
        self.modules.validate()?;
        self.style.validate()
    }
}

/// Field grid constants.
///
/// Owned fields are placed in two columns centered on their table, starting
/// `start_offset` below it, one row every `row_spacing`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LayoutConfig {
    /// Horizontal distance between the two grid columns.
    #[serde(default = "default_column_spacing")]
    column_spacing: f32,

    /// Vertical distance between grid rows.
    #[serde(default = "default_row_spacing")]
    row_spacing: f32,

    /// Vertical distance from a table to its first grid row.
    #[serde(default = "default_start_offset")]
    start_offset: f32,
}

fn default_column_spacing() -> f32 {
    200.0
}

fn default_row_spacing() -> f32 {
    60.0
}

fn default_start_offset() -> f32 {
    100.0
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            column_spacing: default_column_spacing(),
            row_spacing: default_row_spacing(),
            start_offset: default_start_offset(),
        }
    }
}

impl LayoutConfig {
    pub fn new(column_spacing: f32, row_spacing: f32, start_offset: f32) -> Self {
        Self {
            column_spacing,
            row_spacing,
            start_offset,
        }
    }

    pub fn column_spacing(&self) -> f32 {
        self.column_spacing
    }

    pub fn row_spacing(&self) -> f32 {
        self.row_spacing
    }

    pub fn start_offset(&self) -> f32 {
        self.start_offset
    }

    fn validate(&self) -> Result<(), String> {
        let values = [
            ("column_spacing", self.column_spacing),
            ("row_spacing", self.row_spacing),
            ("start_offset", self.start_offset),
        ];
        for (name, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(format!(
                    "layout.{name} must be a non-negative number, got {value}"
                ));
            }
        }
        Ok(())
    }
}

/// How module prefixes are derived.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleConfig {
    /// When a catalogue declares no modules, a table's module is the part of
    /// its primary name before the first occurrence of this separator.
    #[serde(default = "default_separator")]
    separator: String,
}

fn default_separator() -> String {
    "_".to_string()
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
        }
    }
}

impl ModuleConfig {
    pub fn separator(&self) -> &str {
        &self.separator
    }

    fn validate(&self) -> Result<(), String> {
        if self.separator.is_empty() {
            return Err("modules.separator must not be empty".to_string());
        }
        Ok(())
    }
}

/// Placeholder texts for the detail panel.
#[derive(Debug, Clone, Deserialize)]
pub struct DetailConfig {
    /// Shown as the description of a node that has none.
    #[serde(default = "default_no_description")]
    no_description: String,

    /// Shown when nothing is selected.
    #[serde(default = "default_empty_prompt")]
    empty_prompt: String,
}

fn default_no_description() -> String {
    "No description available.".to_string()
}

fn default_empty_prompt() -> String {
    "Click on a node to see its details.".to_string()
}

impl Default for DetailConfig {
    fn default() -> Self {
        Self {
            no_description: default_no_description(),
            empty_prompt: default_empty_prompt(),
        }
    }
}

impl DetailConfig {
    pub fn no_description(&self) -> &str {
        &self.no_description
    }

    pub fn empty_prompt(&self) -> &str {
        &self.empty_prompt
    }
}

/// Colors for presentation shells, as CSS color strings.
///
/// Fields that are not set fall back to the built-in palette.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    background_color: Option<String>,

    #[serde(default)]
    table_color: Option<String>,

    #[serde(default)]
    field_color: Option<String>,

    #[serde(default)]
    connector_color: Option<String>,

    #[serde(default)]
    ownership_color: Option<String>,

    #[serde(default)]
    cross_reference_color: Option<String>,

    #[serde(default)]
    annotation_color: Option<String>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_deref()
            .map(Color::new)
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the fill [`Color`] for nodes of `category`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn node_color(&self, category: Category) -> Result<Color, String> {
        let (configured, fallback) = match category {
            Category::Table => (&self.table_color, "#97c2fc"),
            Category::Field => (&self.field_color, "#fff2cc"),
            Category::Connector => (&self.connector_color, "#f4b183"),
        };
        Self::resolve(configured.as_deref(), fallback)
            .map_err(|err| format!("Invalid {category} color in config: {err}"))
    }

    /// Returns the stroke [`Color`] for edges of `class`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn edge_color(&self, class: EdgeClass) -> Result<Color, String> {
        let (configured, fallback) = match class {
            EdgeClass::Ownership => (&self.ownership_color, "#848484"),
            EdgeClass::CrossReference => (&self.cross_reference_color, "#e06666"),
            EdgeClass::Annotation => (&self.annotation_color, "#6aa84f"),
        };
        Self::resolve(configured.as_deref(), fallback)
            .map_err(|err| format!("Invalid {class} color in config: {err}"))
    }

    fn resolve(configured: Option<&str>, fallback: &str) -> Result<Color, String> {
        Color::new(configured.unwrap_or(fallback))
    }

    fn validate(&self) -> Result<(), String> {
        self.background_color()?;
        for category in [Category::Table, Category::Field, Category::Connector] {
            self.node_color(category)?;
        }
        for class in [
            EdgeClass::Ownership,
            EdgeClass::CrossReference,
            EdgeClass::Annotation,
        ] {
            self.edge_color(class)?;
        }
        Ok(())
    }
}
