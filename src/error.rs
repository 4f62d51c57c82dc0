//! Error types for store and tree operations.
//!
//! Validation failures are never errors - they land in the form's ErrorMap.
//! `FormError` covers structural problems only: malformed paths, writes that
//! contradict the shape of the value tree, bad pattern rules.

use thiserror::Error;

pub use crate::path::PathError;

/// Errors from form store and value tree operations.
#[derive(Debug, Error)]
pub enum FormError {
    /// A field path failed to parse.
    #[error(transparent)]
    Path(#[from] PathError),

    /// A pattern rule was built from an invalid regular expression.
    #[error("invalid pattern rule: {0}")]
    Pattern(#[from] regex::Error),

    /// A key segment was applied to a non-object value.
    #[error("`{path}` expects an object at `{segment}`")]
    ExpectedObject { path: String, segment: String },

    /// An index segment was applied to a non-array value.
    #[error("`{path}` expects an array at index {index}")]
    ExpectedArray { path: String, index: usize },

    /// An array operation referenced an index past the end of the list.
    #[error("`{path}` has no element at index {index} (len {len})")]
    IndexOutOfBounds {
        path: String,
        index: usize,
        len: usize,
    },

    /// A value was serialized into the tree and the conversion failed.
    #[error("value conversion failed: {0}")]
    Convert(#[from] serde_json::Error),
}

// =============================================================================
// TESTS
// =============================================================================
