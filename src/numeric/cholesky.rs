use nalgebra::DMatrix;
use ndarray::Array2;
use tracing::warn;

use crate::error::GmError;
use crate::error::Result;

const PIVOT_TOLERANCE: f64 = 1e-10;

/// Lower-triangular `L` with `L L^T = cov`.
///
/// Positive-definite input goes through nalgebra. When that is rejected the matrix is
/// factored column by column, accepting pivots within `1e-10 * max(diag)` of zero so that
/// semi-definite covariances (for instance a zero marginal variance) still factor. Below a
/// zero pivot `d_j` every remaining residual `r_ij` must satisfy
/// `|r_ij| <= sqrt(max(d_j, 0) * max(diag)) + 1e-10 * max(diag)`, the Schur-complement bound
/// up to rounding. A clearly negative pivot, or a residual breaking that bound, fails with
/// [`GmError::NonPositiveSemiDefinite`]; the matrix is never jittered or projected.
pub fn cholesky_lower(cov: &Array2<f64>) -> Result<Array2<f64>> {
  let (rows, cols) = cov.dim();
  if rows != cols {
    return Err(GmError::shape_mismatch("cholesky_lower", (rows, rows), (rows, cols)));
  }
  let n = rows;

  if let Some((i, j)) = cov.indexed_iter().find(|(_, v)| !v.is_finite()).map(|(ix, _)| ix) {
    return Err(GmError::NonPositiveSemiDefinite {
      dim: n,
      pivot: i.min(j),
      value: cov[[i, j]],
    });
  }

  let dense = DMatrix::from_fn(n, n, |i, j| cov[[i, j]]);
  if let Some(chol) = dense.cholesky() {
    let l = chol.l();
    return Ok(Array2::from_shape_fn((n, n), |(i, j)| l[(i, j)]));
  }

  warn!(dim = n, "covariance is not positive definite, trying semi-definite factorization");
  semidefinite_lower(cov)
}

fn semidefinite_lower(cov: &Array2<f64>) -> Result<Array2<f64>> {
  let n = cov.nrows();
  let scale = cov.diag().iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
  let tol = PIVOT_TOLERANCE * scale.max(f64::MIN_POSITIVE);
  let mut l = Array2::<f64>::zeros((n, n));

  for j in 0..n {
    let mut d = cov[[j, j]];
    for k in 0..j {
      d -= l[[j, k]] * l[[j, k]];
    }

    if d < -tol {
      return Err(GmError::NonPositiveSemiDefinite {
        dim: n,
        pivot: j,
        value: d,
      });
    }

    if d <= tol {
      // zero pivot: the rest of the column must already be explained by earlier columns
      let bound = (d.max(0.0) * scale).sqrt() + tol;
      for i in (j + 1)..n {
        let mut r = cov[[i, j]];
        for k in 0..j {
          r -= l[[i, k]] * l[[j, k]];
        }
        if r.abs() > bound {
          return Err(GmError::NonPositiveSemiDefinite {
            dim: n,
            pivot: j,
            value: d,
          });
        }
      }
      continue;
    }

    let pivot = d.sqrt();
    l[[j, j]] = pivot;
    for i in (j + 1)..n {
      let mut s = cov[[i, j]];
      for k in 0..j {
        s -= l[[i, k]] * l[[j, k]];
      }
      l[[i, j]] = s / pivot;
    }
  }

  Ok(l)
}
