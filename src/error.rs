use thiserror::Error;

/// Errors returned by the clustering engine and its collaborators.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// A distance metric name that does not map to any [`Metric`](crate::Metric).
    #[error("unknown distance metric {0:?}")]
    UnknownMetric(String),

    /// An inspection method was called before a successful fit.
    #[error("model is not fitted; call `fit` first")]
    NotFitted,

    /// Points in a dataset have inconsistent dimensionality.
    #[error("dimension mismatch at row {index}: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Row whose length disagrees with row 0.
        index: usize,
        /// Expected dimensionality.
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// A dataset does not have the number of rows the operation expects.
    #[error("length mismatch: expected {expected} rows, found {found}")]
    LengthMismatch {
        /// Expected row count.
        expected: usize,
        /// Found row count.
        found: usize,
    },

    /// A row contains NaN or an infinite coordinate.
    #[error("non-finite value in row {index}")]
    NonFiniteValue {
        /// Offending row.
        index: usize,
    },

    /// The run observed its cancellation flag between outer-loop iterations.
    #[error("clustering cancelled after {processed} points")]
    Cancelled {
        /// Number of points the outer loop had scanned.
        processed: usize,
    },
}

impl Error {
    /// Whether this error comes from invalid configuration rather than input data.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::InvalidParameter { .. } | Error::UnknownMetric(_))
    }
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
