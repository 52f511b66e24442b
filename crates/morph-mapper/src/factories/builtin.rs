use super::{TransformerContext, TransformerFactory};
use crate::errors::MapperError;
use crate::metadata::MapperMetadata;
use crate::transformer::Transformer;
use morph_types::{BuiltinKind, LegacyType};

/// Builtin kinds copied or cast directly.
const BUILTIN: [BuiltinKind; 10] = [
    BuiltinKind::Bool,
    BuiltinKind::Callable,
    BuiltinKind::False,
    BuiltinKind::Float,
    BuiltinKind::Int,
    BuiltinKind::Iterable,
    BuiltinKind::Null,
    BuiltinKind::Resource,
    BuiltinKind::String,
    BuiltinKind::True,
];

/// A single scalar-like source type, cast to whichever target type fits.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTransformerFactory;

impl BuiltinTransformerFactory {
    pub const NAME: &'static str = "builtin";
}

impl TransformerFactory for BuiltinTransformerFactory {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn priority(&self) -> i32 {
        8
    }

    fn get_transformer(
        &self,
        source: Option<&[LegacyType]>,
        target: Option<&[LegacyType]>,
        _metadata: &MapperMetadata,
        _ctx: &TransformerContext<'_>,
    ) -> Result<Option<Transformer>, MapperError> {
        let Some([source]) = source else {
            return Ok(None);
        };
        if !BUILTIN.contains(&source.builtin_type()) {
            return Ok(None);
        }
        Ok(Some(Transformer::Builtin {
            source: source.clone(),
            targets: target.map(<[LegacyType]>::to_vec).unwrap_or_default(),
        }))
    }
}
