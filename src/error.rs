use thiserror::Error;

/// Errors raised while configuring or running a polynomial fit.
#[derive(Debug, Error)]
pub enum FitError {
    /// A configuration value is out of range. Raised before any optimization work.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An objective evaluation produced NaN or an infinity.
    #[error("non-finite objective value {value} for candidate {index}")]
    NonFiniteResult {
        /// Population index (or iteration, for the descent baseline)
        index: usize,
        /// The offending value
        value: f64,
    },

    /// The optimizer already completed its run and its population is frozen.
    #[error("optimizer has finished, population is frozen")]
    Finished,
}

pub type Result<T> = std::result::Result<T, FitError>;

impl FitError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        FitError::InvalidConfiguration(message.into())
    }

    /// Passes `value` through unless it is NaN or infinite.
    pub(crate) fn ensure_finite(index: usize, value: f64) -> Result<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(FitError::NonFiniteResult { index, value })
        }
    }

    pub fn is_config_error(&self) -> bool {
        matches!(self, FitError::InvalidConfiguration(_))
    }

    pub fn is_numeric_error(&self) -> bool {
        matches!(self, FitError::NonFiniteResult { .. })
    }
}
