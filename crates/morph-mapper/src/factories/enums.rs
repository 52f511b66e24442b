use super::{TransformerContext, TransformerFactory, unique_pair};
use crate::errors::MapperError;
use crate::metadata::MapperMetadata;
use crate::transformer::Transformer;
use morph_types::{BuiltinKind, ClassRegistry, LegacyType};

/// Enum conversions.
///
/// - backed enum to a non-enum: the case's scalar value
/// - non-enum to a backed enum: case lookup by value
/// - enum to enum: copy
///
/// Unit enums have no scalar value, so they only ever copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumTransformerFactory;

impl EnumTransformerFactory {
    pub const NAME: &'static str = "enum";
}

fn enum_class<'t>(ty: &'t LegacyType, classes: &ClassRegistry) -> Option<&'t str> {
    if ty.builtin_type() != BuiltinKind::Object {
        return None;
    }
    ty.class_name().filter(|class| classes.is_enum(class))
}

impl TransformerFactory for EnumTransformerFactory {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn priority(&self) -> i32 {
        18
    }

    fn get_transformer(
        &self,
        source: Option<&[LegacyType]>,
        target: Option<&[LegacyType]>,
        _metadata: &MapperMetadata,
        ctx: &TransformerContext<'_>,
    ) -> Result<Option<Transformer>, MapperError> {
        let Some((source, target)) = unique_pair(source, target) else {
            return Ok(None);
        };
        let classes = ctx.classes;
        let source_enum = enum_class(source, classes);
        let target_enum = enum_class(target, classes);

        let transformer = match (source_enum, target_enum) {
            (Some(_), Some(_)) => Some(Transformer::Copy),
            (Some(class), None) if classes.is_backed_enum(class) => Some(Transformer::SourceEnum),
            (None, Some(class)) if classes.is_backed_enum(class) => Some(Transformer::TargetEnum {
                class: class.to_string(),
            }),
            _ => None,
        };
        Ok(transformer)
    }
}
