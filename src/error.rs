//! Unified error type for codec and filter operations.

use thiserror::Error;

use crate::format::PnmFormat;

/// Unified error type for decode, encode, and Sobel operations.
///
/// Every error is detected at its origin and returned synchronously to the
/// direct caller; there is no retry and no partial result. A partially
/// decoded image is dropped, never returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PnmError {
    /// File cannot be opened, read, or written, or the input ended while
    /// scanning the header.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Bad magic token, or a valid magic of the wrong kind for the
    /// requested image (e.g. opening a graymap as a pixmap).
    #[error("format error: {0}")]
    Format(String),

    /// The declared pixel count cannot be satisfied from the remaining
    /// tokens or bytes, or a header field is out of range.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid caller configuration (e.g. a thread count below 1).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A decode resource limit was exceeded.
    #[error("limit exceeded: {0}")]
    Limit(&'static str),
}

impl PnmError {
    /// Unexpected end of input, classified as an IO failure.
    pub(crate) fn eof(context: &str) -> Self {
        PnmError::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            context.to_string(),
        ))
    }

    /// A magic token that is valid NetPBM but not the requested kind.
    pub(crate) fn wrong_kind(found: PnmFormat, wanted: &str) -> Self {
        PnmError::Format(format!(
            "expected a {wanted} image, found {found:?} ({})",
            found.magic_str()
        ))
    }
}
