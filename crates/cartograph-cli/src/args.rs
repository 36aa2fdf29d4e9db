//! Command-line argument definitions for the Cartograph CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Besides the input/output paths, configuration file and
//! logging verbosity, the arguments replay visibility operations against the
//! loaded catalogue before the SVG is exported.

use clap::Parser;

/// Command-line arguments for the Cartograph explorer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input catalogue (TOML)
    #[arg(help = "Path to the catalogue file")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Hide a single node (repeatable)
    #[arg(long = "hide", value_name = "ID")]
    pub hide: Vec<String>,

    /// Hide a table together with the fields it owns (repeatable)
    #[arg(long = "hide-table", value_name = "ID")]
    pub hide_table: Vec<String>,

    /// Toggle a module by prefix (repeatable)
    #[arg(long = "toggle-module", value_name = "PREFIX")]
    pub toggle_module: Vec<String>,

    /// Reveal every node after the other operations ran
    #[arg(long)]
    pub reveal_all: bool,

    /// Print the detail panel for a node
    #[arg(long, value_name = "ID")]
    pub select: Option<String>,
}

impl Args {
    /// Creates arguments for `input` and `output` with no replayed operations.
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            config: None,
            log_level: "off".to_string(),
            hide: Vec::new(),
            hide_table: Vec::new(),
            toggle_module: Vec::new(),
            reveal_all: false,
            select: None,
        }
    }
}
