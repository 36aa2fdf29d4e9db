//! Error types for Cartograph operations.
//!
//! Every error here is a load-time error: once an [`crate::Explorer`] exists,
//! its visibility operations are total and never fail.

use std::io;

use thiserror::Error;

use crate::{graph::GraphError, layout::LayoutError};

/// The main error type for Cartograph operations.
#[derive(Debug, Error)]
pub enum CartographError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Catalogue error: {0}")]
    Catalogue(String),

    #[error("Reference error: {0}")]
    Reference(#[from] GraphError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Configuration error: {0}")]
    Config(String),
}
