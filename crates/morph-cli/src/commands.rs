//! Subcommand implementations. Each writes its report to `out` and returns
//! the process exit status.

use anyhow::{Context, Result};
use morph_mapper::config::ClassConfig;
use morph_mapper::{AutoMapper, MorphConfig, load_config};
use morph_types::{ClassRegistry, Type, convert_type_to_legacy_types};
use serde::Serialize;
use std::io::Write;
use tracing::debug;

use crate::args::{CliArgs, Command};
use crate::reporter::Reporter;

pub const EXIT_SUCCESS: i32 = 0;
/// `check --strict` found target properties without a transformer.
pub const EXIT_UNMAPPED: i32 = 1;
/// At least one declared mapping could not be planned.
pub const EXIT_ERRORS: i32 = 2;

/// Outcome of planning one declared mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckEntry {
    pub source: String,
    pub target: String,
    pub mapped: usize,
    pub unmapped: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
struct LegacyReport<'a> {
    #[serde(rename = "type")]
    ty: String,
    legacy: Option<&'a [morph_types::LegacyType]>,
}

#[derive(Serialize)]
struct ClassReport<'a> {
    name: &'a str,
    #[serde(flatten)]
    class: &'a ClassConfig,
}

pub fn run(args: &CliArgs, out: &mut dyn Write) -> Result<i32> {
    let reporter = Reporter::new(args.color());
    match &args.command {
        Command::Plan {
            source,
            target,
            populate,
        } => plan(args, &reporter, source, target, *populate, out),
        Command::Check { strict } => check(args, &reporter, *strict, out),
        Command::Legacy { ty, keep_null } => legacy(args, &reporter, ty, *keep_null, out),
        Command::Classes => classes(args, &reporter, out),
    }
}

fn load(args: &CliArgs) -> Result<MorphConfig> {
    let path = args.config_path();
    debug!(config = %path.display(), "loading mapper configuration");
    load_config(path)
}

fn plan(
    args: &CliArgs,
    reporter: &Reporter,
    source: &str,
    target: &str,
    populate: bool,
    out: &mut dyn Write,
) -> Result<i32> {
    let mapper = AutoMapper::from_config(&load(args)?)?;
    let plan = if populate {
        mapper.plan_into(source, target)
    } else {
        mapper.plan(source, target)
    };
    let plan = plan.with_context(|| format!("failed to plan {source} -> {target}"))?;

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&plan)?)?;
    } else {
        write!(out, "{}", reporter.render_plan(&plan))?;
    }
    Ok(EXIT_SUCCESS)
}

fn check(args: &CliArgs, reporter: &Reporter, strict: bool, out: &mut dyn Write) -> Result<i32> {
    let config = load(args)?;
    let mapper = AutoMapper::from_config(&config)?;

    let entries: Vec<CheckEntry> = config
        .mappings
        .iter()
        .map(|mapping| match mapper.plan(&mapping.source, &mapping.target) {
            Ok(plan) => CheckEntry {
                source: mapping.source.clone(),
                target: mapping.target.clone(),
                mapped: plan.properties.len(),
                unmapped: plan.unmapped,
                error: None,
            },
            Err(err) => CheckEntry {
                source: mapping.source.clone(),
                target: mapping.target.clone(),
                mapped: 0,
                unmapped: Vec::new(),
                error: Some(err.to_string()),
            },
        })
        .collect();

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&entries)?)?;
    } else {
        write!(out, "{}", reporter.render_check(&entries))?;
    }

    let status = if entries.iter().any(|entry| entry.error.is_some()) {
        EXIT_ERRORS
    } else if strict && entries.iter().any(|entry| !entry.unmapped.is_empty()) {
        EXIT_UNMAPPED
    } else {
        EXIT_SUCCESS
    };
    Ok(status)
}

fn legacy(
    args: &CliArgs,
    reporter: &Reporter,
    source: &str,
    keep_null: bool,
    out: &mut dyn Write,
) -> Result<i32> {
    let ty: Type = serde_json::from_str(source).context("failed to parse type JSON")?;
    // Class kinds come from the configuration when one is given.
    let ty = match &args.config {
        Some(_) => load(args)?.resolve()?.classes.resolve_type(&ty),
        None => ClassRegistry::with_builtin_classes().resolve_type(&ty),
    };
    let legacy = convert_type_to_legacy_types(Some(&ty), keep_null);

    if args.json {
        let report = LegacyReport {
            ty: ty.to_string(),
            legacy: legacy.as_deref(),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write!(out, "{}", reporter.render_legacy(&ty, legacy.as_deref()))?;
    }
    Ok(EXIT_SUCCESS)
}

fn classes(args: &CliArgs, reporter: &Reporter, out: &mut dyn Write) -> Result<i32> {
    let config = load(args)?;
    // Fails on unknown parents before anything is printed.
    config.resolve()?;

    if args.json {
        let classes: Vec<ClassReport<'_>> = config
            .classes
            .iter()
            .map(|(name, class)| ClassReport { name, class })
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&classes)?)?;
    } else {
        write!(out, "{}", reporter.render_classes(&config))?;
    }
    Ok(EXIT_SUCCESS)
}
