//! Error surface for the abbreviation expansion engine

use thiserror::Error;

/// Errors produced while expanding an abbreviation.
#[derive(Debug, Error)]
pub enum ExpandError {
    /// The abbreviation could not be parsed.
    #[error("parse error: {message}")]
    Parse {
        /// Human-readable description of what was expected.
        message: String,
        /// Byte offset into the original input where the failure occurred, if known.
        position: Option<usize>,
    },

    /// A filter name was rejected by a caller that validates strictly.
    ///
    /// The engine's own filter-chain resolution never constructs this variant:
    /// unrecognised filters are ignored silently per the source behaviour.
    #[error("unknown filter: {0}")]
    UnknownFilter(String),

    /// An internal invariant was violated (e.g. a tag-maker received a non-tag node).
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Description of the violated invariant.
        message: String,
    },

    /// The embedded or caller-supplied snippet/preferences JSON did not deserialise.
    #[error("invalid snippet/preferences data: {0}")]
    Data(#[from] serde_json::Error),
}

impl ExpandError {
    /// Construct a [`ExpandError::Parse`] with no known position.
    pub fn parse(message: impl Into<String>) -> Self {
        ExpandError::Parse {
            message: message.into(),
            position: None,
        }
    }

    /// Construct a [`ExpandError::Parse`] annotated with a byte offset.
    pub fn parse_at(message: impl Into<String>, position: usize) -> Self {
        ExpandError::Parse {
            message: message.into(),
            position: Some(position),
        }
    }

    /// Construct a [`ExpandError::InvalidInput`].
    pub fn invalid(message: impl Into<String>) -> Self {
        ExpandError::InvalidInput {
            message: message.into(),
        }
    }
}
