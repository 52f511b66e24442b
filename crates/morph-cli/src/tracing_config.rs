//! Tracing configuration for inspecting transformer lookups.
//!
//! Supports three output formats controlled by `MORPH_LOG_FORMAT`:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `tree`: hierarchical indented output via `tracing-tree`
//! - `json`: one JSON object per span/event
//!
//! ```bash
//! # Which factory matched each property
//! MORPH_LOG=morph_mapper=trace MORPH_LOG_FORMAT=tree morph plan User UserDto
//!
//! # Plain text
//! MORPH_LOG=debug morph check
//! ```
//!
//! Without `MORPH_LOG_FORMAT`, `--json` selects `json` so a run that prints
//! JSON on stdout also logs JSON on stderr. The subscriber is only
//! initialised when `MORPH_LOG` (or `RUST_LOG`) is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    /// An explicit format wins; otherwise logs follow the `--json` flag.
    pub fn select(explicit: Option<&str>, json_output: bool) -> Self {
        match explicit {
            Some(value) if !value.is_empty() => Self::parse(value),
            _ if json_output => Self::Json,
            _ => Self::Text,
        }
    }
}

/// `MORPH_LOG` takes precedence over `RUST_LOG`; both use `RUST_LOG` syntax.
fn build_filter() -> EnvFilter {
    match std::env::var("MORPH_LOG") {
        Ok(directives) => EnvFilter::builder().parse_lossy(directives),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Installs the global subscriber on stderr. `json_output` is the CLI's
/// `--json` flag.
pub fn init_tracing(json_output: bool) {
    if std::env::var_os("MORPH_LOG").is_none() && std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    let format = LogFormat::select(
        std::env::var("MORPH_LOG_FORMAT").ok().as_deref(),
        json_output,
    );
    let filter = build_filter();

    match format {
        // Span nesting shows which factory answered for which property.
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer()
                .json()
                .with_current_span(false)
                .with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
