//! Error types for tree building and cursor access.
//!
//! Two families of errors exist:
//!
//! - [`ParseError`] is produced while turning markup into a document tree.
//!   It carries the line and column reported by the tree builder.
//! - [`PullError`] is produced by the pull cursor itself, for requests that
//!   make no sense at the current position (attribute access off a start
//!   tag, an index past the end) or for unknown feature names.

use std::fmt;

use crate::reader::EventKind;

/// Source location within the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    /// 1-based line number (0 when unknown).
    pub line: u32,
    /// 1-based column number (0 when unknown).
    pub column: u32,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The error type returned when input cannot be turned into a document tree.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// The primary error message.
    pub message: String,
    /// Where in the source the error occurred.
    pub location: SourceLocation,
}

impl ParseError {
    /// Creates a `ParseError` without position information.
    pub(crate) fn without_location(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: SourceLocation::default(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse error at {}: {}", self.location, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Errors raised by [`PullParser`](crate::reader::PullParser) accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullError {
    /// `set_feature` was called with a name the parser does not know.
    UnsupportedFeature(String),
    /// An attribute accessor was called while the cursor was not on a
    /// start tag.
    NotOnStartTag {
        /// The event the cursor was positioned on.
        event: EventKind,
    },
    /// An attribute or namespace index was outside `0..len`.
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of available entries.
        len: usize,
    },
}

impl PullError {
    /// Returns `true` for the out-of-position family of errors
    /// ([`NotOnStartTag`](Self::NotOnStartTag) and
    /// [`IndexOutOfRange`](Self::IndexOutOfRange)).
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            Self::NotOnStartTag { .. } | Self::IndexOutOfRange { .. }
        )
    }
}

impl fmt::Display for PullError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFeature(name) => write!(f, "unsupported feature: {name}"),
            Self::NotOnStartTag { event } => {
                write!(f, "attribute access requires a start tag, current event is {event}")
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range (length {len})")
            }
        }
    }
}

impl std::error::Error for PullError {}
