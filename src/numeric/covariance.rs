use ndarray::Array1;
use ndarray::Array2;

use crate::error::GmError;
use crate::error::Result;

/// Scales a correlation matrix by standard deviations, `C_ij = R_ij * s_i * s_j`.
///
/// The output is symmetric exactly when `corr` is; nothing is symmetrized or repaired, and
/// positive semi-definiteness is left to the caller (see [`super::cholesky_lower`]).
pub fn corr_to_cov(corr: &Array2<f64>, std_dev: &Array1<f64>) -> Result<Array2<f64>> {
  let n = std_dev.len();
  if corr.dim() != (n, n) {
    return Err(GmError::shape_mismatch("corr_to_cov", (n, n), corr.dim()));
  }

  Ok(Array2::from_shape_fn((n, n), |(i, j)| {
    corr[[i, j]] * std_dev[i] * std_dev[j]
  }))
}

/// Largest `|A_ij - A_ji|`.
pub fn max_asymmetry(m: &Array2<f64>) -> f64 {
  let (rows, cols) = m.dim();
  let mut worst = 0.0_f64;
  for i in 0..rows.min(cols) {
    for j in (i + 1)..rows.min(cols) {
      worst = worst.max((m[[i, j]] - m[[j, i]]).abs());
    }
  }
  worst
}
