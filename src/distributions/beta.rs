//! # Beta
//!
//! $$
//! f(x)=\frac{x^{\alpha-1}(1-x)^{\beta-1}}{B(\alpha,\beta)},\quad 0<x<1
//! $$
//!
use rand::Rng;
use rand_distr::Distribution;
use statrs::distribution::Continuous;
use statrs::distribution::ContinuousCDF;

use super::check_positive;
use super::invalid;
use super::solve_probability;
use crate::error::Result;
use crate::traits::DistributionExt;

const FAMILY: &str = "Beta";

#[derive(Debug, Clone)]
pub struct BetaDist {
  alpha: f64,
  beta: f64,
  sampler: rand_distr::Beta<f64>,
  law: statrs::distribution::Beta,
}

impl BetaDist {
  pub fn new(alpha: f64, beta: f64) -> Result<Self> {
    check_positive(FAMILY, "alpha", alpha)?;
    check_positive(FAMILY, "beta", beta)?;
    Ok(Self {
      alpha,
      beta,
      sampler: rand_distr::Beta::new(alpha, beta).map_err(|_| invalid(FAMILY, "alpha", alpha))?,
      law: statrs::distribution::Beta::new(alpha, beta)
        .map_err(|_| invalid(FAMILY, "alpha", alpha))?,
    })
  }

  pub fn alpha(&self) -> f64 {
    self.alpha
  }

  pub fn beta(&self) -> f64 {
    self.beta
  }
}

impl Distribution<f64> for BetaDist {
  fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
    self.sampler.sample(rng)
  }
}

impl DistributionExt for BetaDist {
  fn pdf(&self, x: f64) -> f64 {
    if !(0.0..=1.0).contains(&x) {
      return 0.0;
    }
    self.law.pdf(x)
  }

  fn cdf(&self, x: f64) -> f64 {
    if x <= 0.0 {
      0.0
    } else if x >= 1.0 {
      1.0
    } else {
      self.law.cdf(x)
    }
  }

  fn inv_cdf(&self, p: f64) -> f64 {
    if !(0.0..=1.0).contains(&p) {
      return f64::NAN;
    }
    if p == 0.0 || p == 1.0 {
      return p;
    }
    solve_probability(FAMILY, p, 0.0, 1.0, |x| self.cdf(x))
  }

  fn sf(&self, x: f64) -> f64 {
    if x <= 0.0 {
      1.0
    } else if x >= 1.0 {
      0.0
    } else {
      self.law.sf(x)
    }
  }

  fn inv_sf(&self, q: f64) -> f64 {
    if !(0.0..=1.0).contains(&q) {
      return f64::NAN;
    }
    if q == 0.0 || q == 1.0 {
      return 1.0 - q;
    }
    solve_probability(FAMILY, q, 0.0, 1.0, |x| self.sf(x))
  }

  fn mean(&self) -> f64 {
    self.alpha / (self.alpha + self.beta)
  }

  fn variance(&self) -> f64 {
    let s = self.alpha + self.beta;
    self.alpha * self.beta / (s * s * (s + 1.0))
  }
}
