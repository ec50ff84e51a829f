/// Composite trapezoidal rule over uniformly spaced samples,
/// `sum_{i=0}^{N-2} h (f_i + f_{i+1}) / 2`.
///
/// Fewer than two samples span no interval and integrate to `0`.
pub fn trapazoid_rule(samples: &[f64], spacing: f64) -> f64 {
  samples
    .windows(2)
    .map(|w| spacing * (w[0] + w[1]) / 2.0)
    .sum()
}
