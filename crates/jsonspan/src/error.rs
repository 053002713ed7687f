//! Parse failure reporting.
//!
//! Every failed read operation produces a [`JsonError`] carrying an
//! [`ErrorKind`] classification and the cursor position (in code units of the
//! reader's encoding) at the point of failure. Errors are immutable once
//! constructed and always terminate the current parse: nothing in the engine
//! catches and retries them.
//!
//! The object-mapping layer sitting above the reader can attach the target
//! type it was materializing via [`JsonError::with_target`], yielding
//! diagnostics of the form "unexpected token at position 17 while reading
//! `my::Config`".

use alloc::string::String;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, JsonError>;

/// Classification of a parse failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A structural token (`{`, `[`, `:`, `,`, …) was required and something
    /// else was found.
    #[error("unexpected token")]
    UnexpectedToken,
    /// The input ended in the middle of a value.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// A code-unit sequence matches no grammar production, e.g. a malformed
    /// literal, number, or escape sequence.
    #[error("invalid symbol")]
    InvalidSymbol,
    /// Trailing non-whitespace input after a complete top-level value.
    #[error("end of data expected")]
    EndOfDataExpected,
    /// A textual enum value that the target type does not define. Raised by
    /// the mapping layer, never by the reader itself.
    #[error("invalid enum value")]
    InvalidEnumValue,
    /// Nested structure deeper than [`NESTING_LIMIT`](crate::NESTING_LIMIT)
    /// while building a dynamic value.
    #[error("nesting limit of {0} exceeded")]
    NestingLimitExceeded(usize),
    /// The underlying streaming source failed while refilling the staging
    /// buffer.
    #[error("source error: {0}")]
    Source(String),
}

/// A fatal JSON parse error.
///
/// `position` counts code units consumed from the start of the input, in the
/// unit of the reader's encoding (bytes for UTF-8, 16-bit units for UTF-16).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at position {position} while reading {}", .target.unwrap_or("value"))]
pub struct JsonError {
    kind: ErrorKind,
    position: usize,
    target: Option<&'static str>,
}

impl JsonError {
    /// Constructs an error of `kind` at `position`, with no target type
    /// attached.
    #[must_use]
    pub fn new(kind: ErrorKind, position: usize) -> Self {
        Self {
            kind,
            position,
            target: None,
        }
    }

    /// Attaches the type that was being materialized when the failure
    /// occurred. Intended for the object-mapping layer; the reader itself
    /// never knows the target type.
    #[must_use]
    pub fn with_target<T>(mut self) -> Self {
        self.target = Some(core::any::type_name::<T>());
        self
    }

    /// The failure classification.
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Code units consumed when the failure was raised.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The attached target type name, if the mapping layer supplied one.
    #[must_use]
    pub fn target(&self) -> Option<&'static str> {
        self.target
    }
}
