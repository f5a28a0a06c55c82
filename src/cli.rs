//! Command-line interface definitions and parsing
//!
//! # Commands
//!
//! - **render**: load a page file, play filter/sort/navigation operations
//!   against it and print the resulting view
//! - **prefs**: show or reset the stored sort preference
//! - **config**: print the effective configuration or write it to a file
//!
//! # Examples
//!
//! ```bash
//! topicview render page.json --tag rust --tag async --any
//! topicview render page.json --sort importance --dir asc --fragment '#topic-42'
//! topicview -vv prefs --reset
//! topicview config init --force
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::filter::TagMode;
use crate::sort::{SortDirection, SortKey};

/// Sort key as accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKeyArg {
    Date,
    Importance,
}

impl From<SortKeyArg> for SortKey {
    fn from(arg: SortKeyArg) -> Self {
        match arg {
            SortKeyArg::Date => Self::Date,
            SortKeyArg::Importance => Self::Importance,
        }
    }
}

/// Sort direction as accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirectionArg {
    Asc,
    Desc,
}

impl From<SortDirectionArg> for SortDirection {
    fn from(arg: SortDirectionArg) -> Self {
        match arg {
            SortDirectionArg::Asc => Self::Asc,
            SortDirectionArg::Desc => Self::Desc,
        }
    }
}

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,

    /// Write the effective configuration to the config file
    Init {
        /// Overwrite an existing file
        #[arg(long = "force")]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "topicview")]
#[command(about = "Filter, sort and navigate a topic index page", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Read configuration from this file instead of the default location
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render a page after applying filters, sorting and navigation
    #[command(visible_alias = "r")]
    Render {
        /// Page model in JSON
        #[arg(value_name = "PAGE")]
        page: PathBuf,

        /// Free-text query matched against titles and summaries
        #[arg(short = 'q', long = "query")]
        query: Option<String>,

        /// Select a tag (repeatable)
        #[arg(short = 't', long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Match entries with ANY selected tag instead of ALL
        #[arg(long = "any")]
        any: bool,

        /// Sort key; the choice is remembered
        #[arg(short = 's', long = "sort", value_enum)]
        sort: Option<SortKeyArg>,

        /// Sort direction; the choice is remembered
        #[arg(short = 'd', long = "dir", value_enum)]
        dir: Option<SortDirectionArg>,

        /// Fragment present when the page loads, e.g. '#topic-42'
        #[arg(short = 'f', long = "fragment")]
        fragment: Option<String>,

        /// Viewport width in pixels
        #[arg(short = 'w', long = "width")]
        width: Option<u32>,

        /// Do not read or write the preference store
        #[arg(long = "ephemeral")]
        ephemeral: bool,
    },
    /// Show the stored sort preference
    Prefs {
        /// Forget the stored preference
        #[arg(long = "reset")]
        reset: bool,
    },
    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Commands {
    /// Tag mode requested by the render command
    #[must_use]
    pub const fn tag_mode(&self) -> TagMode {
        match self {
            Self::Render { any, .. } => TagMode::from_or_checked(*any),
            Self::Prefs { .. } | Self::Config { .. } => TagMode::All,
        }
    }
}
