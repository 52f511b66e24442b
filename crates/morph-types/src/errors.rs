//! Error taxonomy for type construction and type queries.

use thiserror::Error;

/// Errors raised by the type algebra.
///
/// `InvalidArgument` is a malformed construction request and is always
/// surfaced to the caller. `Logic` means a well-formed type was asked a
/// question its shape cannot answer; callers can avoid it with an `is_*`
/// pre-check, and the legacy adapter turns it into "no legacy type".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Logic(String),
}

impl TypeError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub(crate) fn logic(message: impl Into<String>) -> Self {
        Self::Logic(message.into())
    }

    /// Whether this error is a query-time logic error rather than a bad
    /// construction request.
    pub fn is_logic(&self) -> bool {
        matches!(self, Self::Logic(_))
    }
}
