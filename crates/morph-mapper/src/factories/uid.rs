use super::{TransformerContext, TransformerFactory, unique_pair};
use crate::errors::MapperError;
use crate::metadata::MapperMetadata;
use crate::transformer::Transformer;
use morph_types::classes::{ABSTRACT_UID, ULID};
use morph_types::{BuiltinKind, ClassRegistry, LegacyType};

/// UUID/ULID values: copied between UID properties, rendered to or parsed
/// from strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct UidTransformerFactory;

impl UidTransformerFactory {
    pub const NAME: &'static str = "uid";
}

fn uid_class<'t>(ty: &'t LegacyType, classes: &ClassRegistry) -> Option<&'t str> {
    if ty.builtin_type() != BuiltinKind::Object {
        return None;
    }
    ty.class_name()
        .filter(|class| classes.is_subclass_of(class, ABSTRACT_UID))
}

impl TransformerFactory for UidTransformerFactory {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn priority(&self) -> i32 {
        24
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

        let transformer = match (uid_class(source, ctx.classes), uid_class(target, ctx.classes)) {
            (Some(_), Some(_)) => Some(Transformer::Copy),
            (Some(class), None) if target.builtin_type() == BuiltinKind::String => {
                Some(Transformer::UidToString {
                    ulid: ctx.classes.is_subclass_of(class, ULID),
                })
            }
            (None, Some(class)) if source.builtin_type() == BuiltinKind::String => {
                Some(Transformer::StringToUid {
                    class: class.to_string(),
                })
            }
            _ => None,
        };
        Ok(transformer)
    }
}
