use super::{TransformerContext, TransformerFactory};
use crate::errors::MapperError;
use crate::metadata::MapperMetadata;
use crate::transformer::Transformer;
use morph_types::LegacyType;

/// One source type and several target types: the first target type the
/// chain can produce a transformer for wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniqueTypeTransformerFactory;

impl UniqueTypeTransformerFactory {
    pub const NAME: &'static str = "unique_type";
}

impl TransformerFactory for UniqueTypeTransformerFactory {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn priority(&self) -> i32 {
        32
    }

    fn get_transformer(
        &self,
        source: Option<&[LegacyType]>,
        target: Option<&[LegacyType]>,
        metadata: &MapperMetadata,
        ctx: &TransformerContext<'_>,
    ) -> Result<Option<Transformer>, MapperError> {
        let (Some(source), Some(target)) = (source, target) else {
            return Ok(None);
        };
        if source.len() != 1 || target.len() <= 1 {
            return Ok(None);
        }

        for target_type in target {
            let single = std::slice::from_ref(target_type);
            if let Some(transformer) = ctx.delegate(Self::NAME, Some(source), Some(single), metadata)? {
                return Ok(Some(transformer));
            }
        }
        Ok(None)
    }
}
