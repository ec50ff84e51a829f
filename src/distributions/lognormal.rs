//! # LogNormal
//!
//! $$
//! f(x)=\frac{1}{x\sigma\sqrt{2\pi}}\exp\!\left(-\frac{(\ln x-\mu)^2}{2\sigma^2}\right),\quad x>0
//! $$
//!
use rand::Rng;
use rand_distr::Distribution;
use statrs::distribution::Continuous;
use statrs::distribution::ContinuousCDF;

use super::check_finite;
use super::check_positive;
use super::invalid;
use super::quantile_or_nan;
use crate::error::Result;
use crate::traits::DistributionExt;

const FAMILY: &str = "LogNormal";

/// ln X ~ N(mu, sigma^2).
#[derive(Debug, Clone)]
pub struct LogNormalDist {
  mu: f64,
  sigma: f64,
  sampler: rand_distr::LogNormal<f64>,
  law: statrs::distribution::LogNormal,
}

impl LogNormalDist {
  pub fn new(mu: f64, sigma: f64) -> Result<Self> {
    check_finite(FAMILY, "log-mean", mu)?;
    check_positive(FAMILY, "log-std", sigma)?;
    Ok(Self {
      mu,
      sigma,
      sampler: rand_distr::LogNormal::new(mu, sigma)
        .map_err(|_| invalid(FAMILY, "log-std", sigma))?,
      law: statrs::distribution::LogNormal::new(mu, sigma)
        .map_err(|_| invalid(FAMILY, "log-std", sigma))?,
    })
  }

  pub fn log_mean(&self) -> f64 {
    self.mu
  }

  pub fn log_std(&self) -> f64 {
    self.sigma
  }
}

impl Distribution<f64> for LogNormalDist {
  fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
    self.sampler.sample(rng)
  }
}

impl DistributionExt for LogNormalDist {
  fn pdf(&self, x: f64) -> f64 {
    if x <= 0.0 {
      return 0.0;
    }
    self.law.pdf(x)
  }

  fn cdf(&self, x: f64) -> f64 {
    if x <= 0.0 {
      return 0.0;
    }
    self.law.cdf(x)
  }

  fn inv_cdf(&self, p: f64) -> f64 {
    quantile_or_nan(p, |p| self.law.inverse_cdf(p))
  }

  fn sf(&self, x: f64) -> f64 {
    if x <= 0.0 {
      return 1.0;
    }
    self.law.sf(x)
  }

  /// Reflects `ln x` about `mu`.
  fn inv_sf(&self, q: f64) -> f64 {
    (2.0 * self.mu - self.inv_cdf(q).ln()).exp()
  }

  fn mean(&self) -> f64 {
    (self.mu + 0.5 * self.sigma * self.sigma).exp()
  }

  fn variance(&self) -> f64 {
    let s2 = self.sigma * self.sigma;
    (s2.exp() - 1.0) * (2.0 * self.mu + s2).exp()
  }
}
