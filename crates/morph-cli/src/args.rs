use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Configuration file used when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "morph.json";

/// CLI arguments for the morph binary.
#[derive(Parser, Debug)]
#[command(
    name = "morph",
    version,
    about = "Inspect how property values are transformed between classes"
)]
pub struct CliArgs {
    /// Mapper configuration file (defaults to ./morph.json).
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable color in text output. Defaults to whether stdout is a terminal.
    #[arg(long, global = true)]
    pub pretty: Option<bool>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the transformer chosen for every property of SOURCE mapped into TARGET.
    Plan {
        /// Source class, or `array`.
        source: String,
        /// Target class, or `array`.
        target: String,

        /// Plan for populating an existing TARGET object instead of building one.
        #[arg(long)]
        populate: bool,
    },

    /// Plan every declared mapping and report failures and unmapped properties.
    Check {
        /// Also fail when a target property has no transformer.
        #[arg(long)]
        strict: bool,
    },

    /// Flatten a type given as JSON (e.g. '{"builtin":"int"}') into legacy types.
    Legacy {
        #[arg(value_name = "TYPE")]
        ty: String,

        /// Keep a bare `null` type instead of dropping it.
        #[arg(long = "keep-null")]
        keep_null: bool,
    },

    /// List declared classes.
    Classes,
}

impl CliArgs {
    pub fn config_path(&self) -> &Path {
        self.config
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_CONFIG))
    }

    pub fn color(&self) -> bool {
        self.pretty
            .unwrap_or_else(|| std::io::stdout().is_terminal())
    }
}
