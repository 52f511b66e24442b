use colored::Colorize;
use morph_mapper::{MappingPlan, MorphConfig, PropertyMapping};
use morph_types::{ClassKind, LegacyType, Type};
use std::fmt::Write;

use crate::commands::CheckEntry;

/// Text rendering for command results.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    pub fn render_plan(&self, plan: &MappingPlan) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}",
            self.heading(&format!("{} -> {}", plan.metadata.source, plan.metadata.target))
        );

        let width = plan
            .properties
            .iter()
            .map(|mapping| mapping.property.len())
            .chain(plan.unmapped.iter().map(String::len))
            .max()
            .unwrap_or(0);

        for mapping in &plan.properties {
            let _ = writeln!(
                out,
                "  {:<width$}  {}{}",
                mapping.property,
                mapping.transformer,
                self.flags(mapping)
            );
        }
        for property in &plan.unmapped {
            let _ = writeln!(
                out,
                "  {:<width$}  {}",
                property,
                self.warning("no transformer")
            );
        }
        out
    }

    pub fn render_check(&self, entries: &[CheckEntry]) -> String {
        let mut out = String::new();
        for entry in entries {
            let pair = format!("{} -> {}", entry.source, entry.target);
            if let Some(error) = &entry.error {
                let _ = writeln!(out, "{} {pair}: {error}", self.error("error"));
            } else if entry.unmapped.is_empty() {
                let _ = writeln!(out, "{} {pair}: {} properties", self.ok("ok"), entry.mapped);
            } else {
                let _ = writeln!(
                    out,
                    "{} {pair}: {} properties, unmapped: {}",
                    self.warning("warning"),
                    entry.mapped,
                    entry.unmapped.join(", ")
                );
            }
        }
        out
    }

    pub fn render_legacy(&self, ty: &Type, legacy: Option<&[LegacyType]>) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.heading(&ty.to_string()));
        match legacy {
            None => {
                let _ = writeln!(out, "  {}", self.warning("no legacy representation"));
            }
            Some(types) => {
                for legacy in types {
                    let _ = writeln!(out, "  {legacy}");
                }
            }
        }
        out
    }

    pub fn render_classes(&self, config: &MorphConfig) -> String {
        let mut out = String::new();
        for (name, class) in &config.classes {
            let kind = match class.info.kind {
                ClassKind::Class => "class".to_string(),
                ClassKind::UnitEnum => "enum".to_string(),
                ClassKind::BackedEnum { backing } => {
                    format!("enum: {}", backing.builtin_kind().as_str())
                }
            };
            let _ = write!(out, "{} ({kind}", self.heading(name));
            if class.info.readonly {
                out.push_str(", readonly");
            }
            out.push(')');
            if !class.info.parents.is_empty() {
                let _ = write!(out, " extends {}", class.info.parents.join(", "));
            }
            out.push('\n');
            for (property, descriptor) in &class.properties {
                let ty = descriptor
                    .ty
                    .as_ref()
                    .map_or_else(|| "?".to_string(), ToString::to_string);
                let _ = writeln!(out, "  {property}: {ty}");
            }
        }
        out
    }

    fn flags(&self, mapping: &PropertyMapping) -> String {
        let mut flags = Vec::new();
        if mapping.should_ignore_property() {
            flags.push("ignored".to_string());
        }
        if mapping.check_exists {
            flags.push("optional".to_string());
        }
        if let Some(depth) = mapping.max_depth {
            flags.push(format!("max depth {depth}"));
        }
        if let Some(groups) = mapping.target_groups.as_ref().or(mapping.source_groups.as_ref()) {
            flags.push(format!("groups {}", groups.join("|")));
        }
        if flags.is_empty() {
            return String::new();
        }
        let flags = format!(" [{}]", flags.join(", "));
        if self.color {
            flags.dimmed().to_string()
        } else {
            flags
        }
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn ok(&self, text: &str) -> String {
        if self.color {
            text.green().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn warning(&self, text: &str) -> String {
        if self.color {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    fn error(&self, text: &str) -> String {
        if self.color {
            text.red().bold().to_string()
        } else {
            text.to_string()
        }
    }
}
