//! # Inverse Gaussian
//!
//! $$
//! f(x)=\sqrt{\frac{\lambda}{2\pi x^3}}\exp\!\left(-\frac{\lambda(x-\mu)^2}{2\mu^2x}\right),\quad x>0
//! $$
//!
use std::f64::consts::PI;

use rand::Rng;
use rand_distr::Distribution;
use statrs::distribution::ContinuousCDF;
use statrs::distribution::Normal;

use super::check_positive;
use super::invalid;
use super::solve_probability;
use crate::error::Result;
use crate::traits::DistributionExt;

const FAMILY: &str = "InverseGaussian";
const MAX_EXPANSIONS: usize = 256;

/// Wald law with mean `mu` and shape `lambda`.
#[derive(Debug, Clone)]
pub struct InverseGaussDist {
  mu: f64,
  lambda: f64,
  sampler: rand_distr::InverseGaussian<f64>,
  std_normal: Normal,
}

impl InverseGaussDist {
  pub fn new(mu: f64, lambda: f64) -> Result<Self> {
    check_positive(FAMILY, "mean", mu)?;
    check_positive(FAMILY, "shape", lambda)?;
    Ok(Self {
      mu,
      lambda,
      sampler: rand_distr::InverseGaussian::new(mu, lambda)
        .map_err(|_| invalid(FAMILY, "shape", lambda))?,
      std_normal: Normal::new(0.0, 1.0).map_err(|_| invalid(FAMILY, "shape", lambda))?,
    })
  }

  pub fn shape(&self) -> f64 {
    self.lambda
  }

  /// `exp(2 lambda / mu) * Phi(-r (x / mu + 1))`, kept in log space since the
  /// exponential alone overflows for large shapes.
  fn reflected_term(&self, r: f64, x: f64) -> f64 {
    let tail_cdf = self.std_normal.cdf(-r * (x / self.mu + 1.0));
    if tail_cdf > 0.0 {
      (2.0 * self.lambda / self.mu + tail_cdf.ln()).exp()
    } else {
      0.0
    }
  }
}

impl Distribution<f64> for InverseGaussDist {
  fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
    self.sampler.sample(rng)
  }
}

impl DistributionExt for InverseGaussDist {
  fn pdf(&self, x: f64) -> f64 {
    if x <= 0.0 {
      return 0.0;
    }
    let d = x - self.mu;
    (self.lambda / (2.0 * PI * x.powi(3))).sqrt()
      * (-self.lambda * d * d / (2.0 * self.mu * self.mu * x)).exp()
  }

  fn cdf(&self, x: f64) -> f64 {
    if x <= 0.0 {
      return 0.0;
    }
    let r = (self.lambda / x).sqrt();
    let head = self.std_normal.cdf(r * (x / self.mu - 1.0));
    (head + self.reflected_term(r, x)).clamp(0.0, 1.0)
  }

  fn sf(&self, x: f64) -> f64 {
    if x <= 0.0 {
      return 1.0;
    }
    let r = (self.lambda / x).sqrt();
    let head = self.std_normal.sf(r * (x / self.mu - 1.0));
    (head - self.reflected_term(r, x)).clamp(0.0, 1.0)
  }

  fn inv_cdf(&self, p: f64) -> f64 {
    if !(0.0..=1.0).contains(&p) {
      return f64::NAN;
    }
    if p == 0.0 {
      return 0.0;
    }
    if p == 1.0 {
      return f64::INFINITY;
    }

    let mut hi = self.mu;
    let mut expansions = 0;
    while self.cdf(hi) < p {
      hi *= 2.0;
      expansions += 1;
      if expansions > MAX_EXPANSIONS {
        return f64::INFINITY;
      }
    }
    solve_probability(FAMILY, p, 0.0, hi, |x| self.cdf(x))
  }

  fn inv_sf(&self, q: f64) -> f64 {
    if !(0.0..=1.0).contains(&q) {
      return f64::NAN;
    }
    if q == 0.0 {
      return f64::INFINITY;
    }
    if q == 1.0 {
      return 0.0;
    }
    if q >= 0.5 {
      return self.inv_cdf(1.0 - q);
    }

    let lo = self.inv_cdf(0.5);
    let mut hi = 2.0 * lo.max(self.mu);
    let mut expansions = 0;
    while self.sf(hi) >= q {
      hi *= 2.0;
      expansions += 1;
      if expansions > MAX_EXPANSIONS {
        return f64::INFINITY;
      }
    }
    solve_probability(FAMILY, q, lo, hi, |x| self.sf(x))
  }

  fn mean(&self) -> f64 {
    self.mu
  }

  fn variance(&self) -> f64 {
    self.mu.powi(3) / self.lambda
  }
}
