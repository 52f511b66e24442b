//! Centralized limits for recursive type walks.
//!
//! Type values are finite trees, so recursion always terminates; the limits
//! only keep pathological inputs (for example a configuration file with a
//! thousand nested generics) from exhausting the stack.

/// Maximum nesting depth the legacy adapter walks before giving up.
///
/// Each generic parameter, union member or collection wrapper adds one level.
/// Exceeding the limit is reported as "no legacy representation", the same
/// outcome as any other unrepresentable shape.
///
/// ```text
/// array<int, array<int, array<int, ... 64 levels ... >>>
/// ```
pub const MAX_LEGACY_CONVERSION_DEPTH: usize = 64;
