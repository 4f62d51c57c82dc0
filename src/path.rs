//! Field Paths - Addressing into the form value tree.
//!
//! A `FieldPath` names one location in the nested form state, e.g.
//! `addresses[0].street` or `contactPerson.email`. Both bracket and dot
//! notation are accepted on parse (`addresses.0.street` works too); display
//! always renders the bracket form.
//!
//! # Example
//!
//! ```
//! use spark_forms::path::FieldPath;
//!
//! let path: FieldPath = "addresses[0].zipCode".parse().unwrap();
//! assert_eq!(path.to_string(), "addresses[0].zipCode");
//! assert_eq!(path.segments().len(), 3);
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// =============================================================================
// ERRORS
// =============================================================================

/// Errors produced while parsing a field path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The path string was empty.
    #[error("field path is empty")]
    Empty,

    /// Two dots in a row, a leading/trailing dot, or an empty `[]`.
    #[error("field path `{0}` contains an empty segment")]
    EmptySegment(String),

    /// A `[` without a matching `]`.
    #[error("field path `{0}` has an unclosed bracket")]
    UnclosedBracket(String),

    /// Bracket contents that are not a non-negative integer.
    #[error("field path `{path}` has a non-numeric index `{index}`")]
    BadIndex { path: String, index: String },
}

// =============================================================================
// SEGMENTS
// =============================================================================

/// One step into the value tree: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => write!(f, "{key}"),
            Segment::Index(index) => write!(f, "[{index}]"),
        }
    }
}

// =============================================================================
// FIELD PATH
// =============================================================================

/// A parsed path into the form value tree.
///
/// Paths are ordered and hashable so they can key the ErrorMap and the rule
/// registry directly.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Parse a path from dot/bracket notation.
    pub fn parse(raw: &str) -> Result<FieldPath, PathError> {
        if raw.is_empty() {
            return Err(PathError::Empty);
        }

        let mut segments = Vec::new();
        let mut rest = raw;

        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix('.') {
                if segments.is_empty() || after.is_empty() || after.starts_with('.') {
                    return Err(PathError::EmptySegment(raw.to_string()));
                }
                rest = after;
                continue;
            }

            if let Some(after) = rest.strip_prefix('[') {
                let Some(close) = after.find(']') else {
                    return Err(PathError::UnclosedBracket(raw.to_string()));
                };
                let inner = &after[..close];
                if inner.is_empty() {
                    return Err(PathError::EmptySegment(raw.to_string()));
                }
                let index = inner.parse::<usize>().map_err(|_| PathError::BadIndex {
                    path: raw.to_string(),
                    index: inner.to_string(),
                })?;
                segments.push(Segment::Index(index));
                rest = &after[close + 1..];
                continue;
            }

            // Bare segment up to the next delimiter.
            let end = rest
                .find(['.', '['])
                .unwrap_or(rest.len());
            let word = &rest[..end];
            if word.is_empty() {
                return Err(PathError::EmptySegment(raw.to_string()));
            }
            // Dot-notation indices (`addresses.0.street`) become Index segments.
            match word.parse::<usize>() {
                Ok(index) => segments.push(Segment::Index(index)),
                Err(_) => segments.push(Segment::Key(word.to_string())),
            }
            rest = &rest[end..];
        }

        if segments.is_empty() {
            return Err(PathError::Empty);
        }

        Ok(FieldPath { segments })
    }

    /// The path's segments in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Append an object key, returning the extended path.
    pub fn push_key(&self, key: &str) -> FieldPath {
        let mut segments = self.segments.clone();
        segments.push(Segment::Key(key.to_string()));
        FieldPath { segments }
    }

    /// Append an array index, returning the extended path.
    pub fn push_index(&self, index: usize) -> FieldPath {
        let mut segments = self.segments.clone();
        segments.push(Segment::Index(index));
        FieldPath { segments }
    }

    /// Concatenate two paths.
    pub fn join(&self, other: &FieldPath) -> FieldPath {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        FieldPath { segments }
    }

    /// True if `self` is `prefix` or lies underneath it.
    pub fn starts_with(&self, prefix: &FieldPath) -> bool {
        self.segments.len() >= prefix.segments.len()
            && self.segments[..prefix.segments.len()] == prefix.segments
    }

    /// The array index immediately following `prefix`, if this path points
    /// into an element of that array.
    pub fn index_after(&self, prefix: &FieldPath) -> Option<usize> {
        if !self.starts_with(prefix) {
            return None;
        }
        match self.segments.get(prefix.segments.len()) {
            Some(Segment::Index(index)) => Some(*index),
            _ => None,
        }
    }

    /// Replace the array index immediately following `prefix`.
    ///
    /// Used when an array element is removed and paths for the elements
    /// behind it shift down by one.
    pub fn with_index_after(&self, prefix: &FieldPath, index: usize) -> FieldPath {
        let mut segments = self.segments.clone();
        if self.starts_with(prefix) {
            if let Some(slot) = segments.get_mut(prefix.segments.len()) {
                if matches!(slot, Segment::Index(_)) {
                    *slot = Segment::Index(index);
                }
            }
        }
        FieldPath { segments }
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        FieldPath::parse(raw)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            if position > 0 && matches!(segment, Segment::Key(_)) {
                write!(f, ".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
