use crate::error::GmError;
use crate::error::Result;

/// Full discrete convolution, `out[k] = sum_i x[i] * y[k - i]`, of length `m + n - 1`.
pub fn convolve_1d(x: &[f64], y: &[f64]) -> Result<Vec<f64>> {
  if x.is_empty() {
    return Err(GmError::EmptyInput("convolve_1d: x"));
  }
  if y.is_empty() {
    return Err(GmError::EmptyInput("convolve_1d: y"));
  }

  let mut out = vec![0.0; x.len() + y.len() - 1];
  for (i, &xi) in x.iter().enumerate() {
    for (j, &yj) in y.iter().enumerate() {
      out[i + j] += xi * yj;
    }
  }
  Ok(out)
}
