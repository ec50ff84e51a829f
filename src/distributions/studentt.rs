//! # Student-t
//!
//! $$
//! X=\mu+s\,T_\nu,\qquad f_T(t)=\frac{\Gamma(\frac{\nu+1}{2})}{\sqrt{\nu\pi}\,\Gamma(\frac{\nu}{2})}\left(1+\frac{t^2}{\nu}\right)^{-\frac{\nu+1}{2}}
//! $$
//!
use rand::Rng;
use rand_distr::Distribution;
use statrs::distribution::Continuous;
use statrs::distribution::ContinuousCDF;

use super::check_finite;
use super::check_positive;
use super::invalid;
use super::solve_probability;
use crate::error::Result;
use crate::traits::DistributionExt;

const FAMILY: &str = "StudentT";
const MAX_EXPANSIONS: usize = 1100;

/// Location-scale Student-t.
#[derive(Debug, Clone)]
pub struct StudentTDist {
  location: f64,
  scale: f64,
  dof: f64,
  sampler: rand_distr::StudentT<f64>,
  law: statrs::distribution::StudentsT,
}

impl StudentTDist {
  pub fn new(location: f64, scale: f64, dof: f64) -> Result<Self> {
    check_finite(FAMILY, "location", location)?;
    check_positive(FAMILY, "scale", scale)?;
    check_positive(FAMILY, "dof", dof)?;
    Ok(Self {
      location,
      scale,
      dof,
      sampler: rand_distr::StudentT::new(dof).map_err(|_| invalid(FAMILY, "dof", dof))?,
      law: statrs::distribution::StudentsT::new(location, scale, dof)
        .map_err(|_| invalid(FAMILY, "scale", scale))?,
    })
  }

  pub fn location(&self) -> f64 {
    self.location
  }

  pub fn scale(&self) -> f64 {
    self.scale
  }

  pub fn dof(&self) -> f64 {
    self.dof
  }

  /// Quantile for `0 < p <= 0.5`, searched on `[lo, location]`.
  fn lower_quantile(&self, p: f64) -> f64 {
    let mut lo = self.location - self.scale;
    let mut expansions = 0;
    while self.cdf(lo) >= p {
      lo = self.location - 2.0 * (self.location - lo);
      expansions += 1;
      if expansions > MAX_EXPANSIONS || !lo.is_finite() {
        return f64::NEG_INFINITY;
      }
    }
    solve_probability(FAMILY, p, lo, self.location, |x| self.cdf(x))
  }
}

impl Distribution<f64> for StudentTDist {
  fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
    self.location + self.scale * self.sampler.sample(rng)
  }
}

impl DistributionExt for StudentTDist {
  fn pdf(&self, x: f64) -> f64 {
    self.law.pdf(x)
  }

  fn cdf(&self, x: f64) -> f64 {
    self.law.cdf(x)
  }

  fn inv_cdf(&self, p: f64) -> f64 {
    if !(0.0..=1.0).contains(&p) {
      return f64::NAN;
    }
    if p == 0.0 {
      return f64::NEG_INFINITY;
    }
    if p == 1.0 {
      return f64::INFINITY;
    }
    if p > 0.5 {
      return 2.0 * self.location - self.lower_quantile(1.0 - p);
    }
    self.lower_quantile(p)
  }

  fn sf(&self, x: f64) -> f64 {
    self.law.sf(x)
  }

  fn inv_sf(&self, q: f64) -> f64 {
    2.0 * self.location - self.inv_cdf(q)
  }

  /// Undefined (`NaN`) for `dof <= 1`.
  fn mean(&self) -> f64 {
    if self.dof > 1.0 {
      self.location
    } else {
      f64::NAN
    }
  }

  fn variance(&self) -> f64 {
    if self.dof > 2.0 {
      self.scale * self.scale * self.dof / (self.dof - 2.0)
    } else if self.dof > 1.0 {
      f64::INFINITY
    } else {
      f64::NAN
    }
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use approx::assert_relative_eq;
  use rand::rngs::StdRng;
  use rand::SeedableRng;
  use rand_distr::Distribution;

  use super::StudentTDist;
  use crate::error::GmError;
  use crate::traits::DistributionExt;

  #[test]
  fn rejects_non_positive_scale_and_dof() {
    assert!(matches!(
      StudentTDist::new(0.205, 0.0, 7.25),
      Err(GmError::InvalidParameter { name: "scale", .. })
    ));
    assert!(matches!(
      StudentTDist::new(0.205, 0.232, -7.25),
      Err(GmError::InvalidParameter { name: "dof", .. })
    ));
  }

  #[test]
  fn symmetric_about_location() {
    let dist = StudentTDist::new(0.792, 0.157, 4.223).unwrap();
    assert_abs_diff_eq!(dist.cdf(0.792), 0.5, epsilon = 1e-10);
    assert_abs_diff_eq!(dist.cdf(0.792 - 0.3) + dist.cdf(0.792 + 0.3), 1.0, epsilon = 1e-10);
    assert_abs_diff_eq!(dist.inv_cdf(0.5), 0.792, epsilon = 1e-12);
    assert!(dist.variance() > 0.157 * 0.157);
  }

  #[test]
  fn quantile_inverts_cdf() {
    let dist = StudentTDist::new(0.205, 0.232, 7.25).unwrap();
    for p in [1e-15, 1e-6, 0.05, 0.3, 0.5, 0.8, 0.999] {
      let x = dist.inv_cdf(p);
      assert_relative_eq!(dist.cdf(x), p, max_relative = 1e-9);
    }
    assert!(dist.inv_cdf(1.2).is_nan());
    assert_eq!(dist.inv_cdf(0.0), f64::NEG_INFINITY);
  }

  #[test]
  fn extreme_tail_quantiles_are_finite() {
    let dist = StudentTDist::new(0.2, 0.2, 7.25).unwrap();
    let lower = dist.inv_cdf(1e-300);
    assert!(lower.is_finite() && lower < -1e30, "inv_cdf(1e-300) = {lower}");
    assert_relative_eq!(dist.cdf(lower), 1e-300, max_relative = 1e-8);

    let upper = dist.inv_sf(1e-300);
    assert!(upper.is_finite());
    assert_relative_eq!(upper - 0.2, 0.2 - lower, max_relative = 1e-12);
    assert_relative_eq!(dist.sf(upper), 1e-300, max_relative = 1e-8);
  }

  #[test]
  fn heavy_tail_moments() {
    let dist = StudentTDist::new(0.0, 1.0, 1.5).unwrap();
    assert_eq!(dist.variance(), f64::INFINITY);
    let cauchy = StudentTDist::new(0.0, 1.0, 1.0).unwrap();
    assert!(cauchy.mean().is_nan());
  }

  #[test]
  fn sampling_centres_on_location() {
    let dist = StudentTDist::new(0.205, 0.232, 7.25).unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let n = 100_000;
    let mean = (0..n).map(|_| dist.sample(&mut rng)).sum::<f64>() / n as f64;
    assert!((mean - 0.205).abs() < 0.01, "mean {mean}");
  }
}
