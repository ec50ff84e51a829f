//! # Errors
//!
//! Every fallible operation in the crate returns [`GmError`]. All failures are deterministic,
//! so nothing here is retried or repaired.
//!
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GmError>;

#[derive(Debug, Error)]
pub enum GmError {
  /// Shape inconsistency between matrix/vector operands.
  #[error("dimension mismatch in {context}: expected {expected}, got {actual}")]
  DimensionMismatch {
    context: &'static str,
    expected: String,
    actual: String,
  },

  /// Covariance failed Cholesky factorization.
  #[error("matrix of dimension {dim} is not positive semi-definite (pivot {pivot} = {value:e})")]
  NonPositiveSemiDefinite { dim: usize, pivot: usize, value: f64 },

  #[error("unknown distribution family '{0}'")]
  UnknownFamily(String),

  #[error("invalid parameter for {family}: {name} = {value}")]
  InvalidParameter {
    family: &'static str,
    name: &'static str,
    value: f64,
  },

  #[error("{family} takes {expected} parameters, got {actual}")]
  ArityMismatch {
    family: &'static str,
    expected: usize,
    actual: usize,
  },

  #[error("empty input sequence: {0}")]
  EmptyInput(&'static str),

  #[error("output buffer has length {actual}, expected {expected}")]
  SizeMismatch { expected: usize, actual: usize },

  #[error("inverse transform left an imaginary residual of {max:e} (tolerance {tolerance:e})")]
  ImaginaryResidual { max: f64, tolerance: f64 },

  #[error("invalid scenario: {field} {reason}")]
  InvalidScenario { field: &'static str, reason: String },

  #[error("invalid calibration: {0}")]
  InvalidCalibration(String),

  #[error(transparent)]
  Io(#[from] std::io::Error),

  #[error(transparent)]
  Json(#[from] serde_json::Error),
}

impl GmError {
  pub(crate) fn shape_mismatch(
    context: &'static str,
    expected: (usize, usize),
    actual: (usize, usize),
  ) -> Self {
    GmError::DimensionMismatch {
      context,
      expected: format!("{}x{}", expected.0, expected.1),
      actual: format!("{}x{}", actual.0, actual.1),
    }
  }

  pub(crate) fn length_mismatch(context: &'static str, expected: usize, actual: usize) -> Self {
    GmError::DimensionMismatch {
      context,
      expected: expected.to_string(),
      actual: actual.to_string(),
    }
  }
}
