//! Error handling for tablegrid
//!
//! The core passes are lenient and never fail; errors only arise from strict
//! placement and from loading table documents.

use thiserror::Error;

use crate::core::grid::Address;

/// Table grid error type
#[derive(Debug, Error)]
pub enum GridError {
    /// A cell declared a rowspan or colspan of zero
    #[error("cell at {address} declares a zero {axis}")]
    ZeroSpan { address: Address, axis: &'static str },

    /// A rowspan reaches past the last row of the table
    #[error("cell at {address} spans {rowspan} rows but only {available} remain")]
    SpanOutOfBounds {
        address: Address,
        rowspan: usize,
        available: usize,
    },

    /// A declared span exceeds the configured limit
    #[error("cell at {address} declares a {axis} of {span}, above the limit of {limit}")]
    SpanTooLarge {
        address: Address,
        axis: &'static str,
        span: usize,
        limit: usize,
    },

    /// A span would claim a coordinate already occupied by another cell
    #[error("cell at {address} overlaps a cell anchored at {occupied_by}")]
    Overlap {
        address: Address,
        occupied_by: Address,
    },

    /// Unrecognized row section name
    #[error("unknown table section '{name}'")]
    UnknownSection { name: String },

    /// Two cells in a document share an id
    #[error("duplicate cell id '{id}'")]
    DuplicateId { id: String },

    /// A table document is structurally invalid
    #[error("invalid table document: {message}")]
    InvalidDocument { message: String },

    /// JSON decoding or encoding failed
    #[error("JSON error: {message}")]
    Json { message: String },

    /// IO error (for file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> Self {
        GridError::Json {
            message: err.to_string(),
        }
    }
}

/// Result type for grid operations
pub type GridResult<T> = Result<T, GridError>;

// Convenience constructors for errors
impl GridError {
    pub fn invalid(message: impl Into<String>) -> Self {
        GridError::InvalidDocument {
            message: message.into(),
        }
    }

    /// Whether this error comes from strict placement rather than input loading
    pub fn is_placement(&self) -> bool {
        matches!(
            self,
            GridError::ZeroSpan { .. }
                | GridError::SpanOutOfBounds { .. }
                | GridError::SpanTooLarge { .. }
                | GridError::Overlap { .. }
        )
    }
}
