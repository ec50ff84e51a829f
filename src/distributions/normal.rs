//! # Normal
//!
//! $$
//! f(x)=\frac{1}{\sigma\sqrt{2\pi}}\exp\!\left(-\frac{(x-\mu)^2}{2\sigma^2}\right)
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

const FAMILY: &str = "Normal";

/// Normal law N(mean, std_dev^2).
#[derive(Debug, Clone)]
pub struct NormalDist {
  mean: f64,
  std_dev: f64,
  sampler: rand_distr::Normal<f64>,
  law: statrs::distribution::Normal,
}

impl NormalDist {
  pub fn new(mean: f64, std_dev: f64) -> Result<Self> {
    check_finite(FAMILY, "mean", mean)?;
    check_positive(FAMILY, "std", std_dev)?;
    Ok(Self {
      mean,
      std_dev,
      sampler: rand_distr::Normal::new(mean, std_dev).map_err(|_| invalid(FAMILY, "std", std_dev))?,
      law: statrs::distribution::Normal::new(mean, std_dev)
        .map_err(|_| invalid(FAMILY, "std", std_dev))?,
    })
  }

  pub fn location(&self) -> f64 {
    self.mean
  }

  pub fn scale(&self) -> f64 {
    self.std_dev
  }
}

impl Distribution<f64> for NormalDist {
  fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
    self.sampler.sample(rng)
  }
}

impl DistributionExt for NormalDist {
  fn pdf(&self, x: f64) -> f64 {
    self.law.pdf(x)
  }

  fn cdf(&self, x: f64) -> f64 {
    self.law.cdf(x)
  }

  fn inv_cdf(&self, p: f64) -> f64 {
    quantile_or_nan(p, |p| self.law.inverse_cdf(p))
  }

  fn sf(&self, x: f64) -> f64 {
    self.law.sf(x)
  }

  fn inv_sf(&self, q: f64) -> f64 {
    2.0 * self.mean - self.inv_cdf(q)
  }

  fn mean(&self) -> f64 {
    self.mean
  }

  fn variance(&self) -> f64 {
    self.std_dev * self.std_dev
  }
}
