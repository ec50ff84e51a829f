//! # Traits
//!
//! $$
//! F^{-1}\big(F(x)\big)=x,\qquad F(x)=\int_{-\infty}^{x} f(t)\,dt
//! $$
//!

/// Closed-form characteristics of a univariate law.
///
/// Sampling lives on [`rand_distr::Distribution`]; this trait carries what downstream
/// inverse-transform code needs on top of it.
pub trait DistributionExt {
  fn pdf(&self, x: f64) -> f64;

  fn cdf(&self, x: f64) -> f64;

  /// Quantile function. `p` outside `[0, 1]` yields `NaN`.
  fn inv_cdf(&self, p: f64) -> f64;

  /// Survival function `1 - F(x)`.
  fn sf(&self, x: f64) -> f64 {
    1.0 - self.cdf(x)
  }

  /// Inverse survival function, `x` with `1 - F(x) = q`. `q` outside `[0, 1]` yields `NaN`.
  fn inv_sf(&self, q: f64) -> f64 {
    if !(0.0..=1.0).contains(&q) {
      return f64::NAN;
    }
    self.inv_cdf(1.0 - q)
  }

  fn mean(&self) -> f64;

  fn variance(&self) -> f64;

  fn std_dev(&self) -> f64 {
    self.variance().sqrt()
  }
}
