use super::{TransformerContext, TransformerFactory};
use crate::errors::MapperError;
use crate::metadata::MapperMetadata;
use crate::transformer::Transformer;
use morph_types::LegacyType;

/// A single nullable source type: the non-null part is transformed by the
/// chain and wrapped so null passes through.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullableTransformerFactory;

impl NullableTransformerFactory {
    pub const NAME: &'static str = "nullable";
}

impl TransformerFactory for NullableTransformerFactory {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn priority(&self) -> i32 {
        64
    }

    fn get_transformer(
        &self,
        source: Option<&[LegacyType]>,
        target: Option<&[LegacyType]>,
        metadata: &MapperMetadata,
        ctx: &TransformerContext<'_>,
    ) -> Result<Option<Transformer>, MapperError> {
        let Some([source_type]) = source else {
            return Ok(None);
        };
        // `null` and `mixed` stay nullable once stripped; the builtin
        // factory handles them directly.
        if !source_type.is_nullable() || source_type.builtin_type().is_nullable() {
            return Ok(None);
        }

        let target_nullable = target.is_some_and(|target| target.iter().any(LegacyType::is_nullable));
        let stripped = [source_type.non_nullable()];
        let inner = ctx.delegate(Self::NAME, Some(&stripped), target, metadata)?;

        Ok(inner.map(|inner| Transformer::nullable(inner, target_nullable)))
    }
}
