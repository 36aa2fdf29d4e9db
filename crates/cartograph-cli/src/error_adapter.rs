//! Error adapter for converting CartographError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Catalogue errors
//! carry no source spans, so every error renders as a single report with a
//! code and, where one applies, a help line.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use cartograph::{CartographError, layout::LayoutError};

/// Adapter for a [`CartographError`].
pub struct ErrorAdapter<'a>(pub &'a CartographError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            CartographError::Io(_) => "cartograph::io",
            CartographError::Catalogue(_) => "cartograph::catalogue",
            CartographError::Reference(_) => "cartograph::reference",
            CartographError::Layout(_) => "cartograph::layout",
            CartographError::Config(_) => "cartograph::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            CartographError::Reference(_) => "every edge endpoint must name a node in the catalogue",
            CartographError::Layout(LayoutError::MissingAnchor { .. }) => {
                "add an entry for this node under [anchors]"
            }
            CartographError::Layout(LayoutError::UnplacedNode(_)) => {
                "give the field an owning table or an anchor"
            }
            CartographError::Layout(LayoutError::DuplicateTablePosition { .. }) => {
                "move one of the tables to a distinct anchor"
            }
            CartographError::Layout(LayoutError::UnknownAnchor(_)) => {
                "remove the anchor or add the node it refers to"
            }
            CartographError::Layout(LayoutError::NonFiniteAnchor { .. }) => {
                "anchor coordinates must be finite numbers"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`CartographError`] into a list of reportable errors.
pub fn to_reportables(err: &CartographError) -> Vec<Reportable<'_>> {
    vec![Reportable::Error(ErrorAdapter(err))]
}
