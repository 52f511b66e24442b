//! Errors raised while building transformers and mapping plans.

use morph_types::TypeError;
use thiserror::Error;

/// Mapper failures. "No transformer found" is not an error; factories and
/// the chain report it as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapperError {
    /// A factory that delegates to the chain was asked without one.
    #[error("transformer factory \"{factory}\" requires a chain transformer factory")]
    MissingChain { factory: &'static str },

    #[error("cannot populate read-only target class \"{class}\"")]
    ReadOnlyTarget { class: String },

    #[error("unknown class \"{class}\"")]
    UnknownClass { class: String },

    #[error("no mapping from \"{source_class}\" to \"{target_class}\": {reason}")]
    NoMapping {
        source_class: String,
        target_class: String,
        reason: &'static str,
    },

    #[error(transparent)]
    Type(#[from] TypeError),
}
