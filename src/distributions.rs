//! # Distributions
//!
//! $$
//! X_k = F_k^{-1}\big(\Phi(Z_k)\big),\qquad Z_k\sim\mathcal N(0,1)
//! $$
//!
//! Marginal laws of the latent model parameters. The set of families is closed, so
//! [`Marginal`] is a plain sum type and [`factory`] resolves names onto it.
//!
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand_distr::Distribution;
use roots::find_root_brent;
use roots::Convergency;
use statrs::function::erf::erfc;
use tracing::warn;

use crate::error::GmError;
use crate::error::Result;
use crate::traits::DistributionExt;

pub mod beta;
pub mod factory;
pub mod inverse_gauss;
pub mod lognormal;
pub mod normal;
pub mod studentt;

pub use beta::BetaDist;
pub use factory::MarginalSpec;
pub use inverse_gauss::InverseGaussDist;
pub use lognormal::LogNormalDist;
pub use normal::NormalDist;
pub use studentt::StudentTDist;

pub(crate) fn invalid(family: &'static str, name: &'static str, value: f64) -> GmError {
  GmError::InvalidParameter {
    family,
    name,
    value,
  }
}

pub(crate) fn check_finite(family: &'static str, name: &'static str, value: f64) -> Result<()> {
  if value.is_finite() {
    Ok(())
  } else {
    Err(invalid(family, name, value))
  }
}

pub(crate) fn check_positive(family: &'static str, name: &'static str, value: f64) -> Result<()> {
  if value.is_finite() && value > 0.0 {
    Ok(())
  } else {
    Err(invalid(family, name, value))
  }
}

/// statrs panics outside the unit interval.
pub(crate) fn quantile_or_nan(p: f64, f: impl Fn(f64) -> f64) -> f64 {
  if (0.0..=1.0).contains(&p) {
    f(p)
  } else {
    f64::NAN
  }
}

const ROOT_LOG_TOL: f64 = 1e-12;
const ROOT_MAX_ITER: usize = 500;

/// Brent stopping rule: a log-probability residual below `log_tol`, or a bracket a few ulps
/// wide. The step test is relative so quantiles far out in a heavy tail (`|x| ~ 1e40`)
/// terminate as well as those near zero.
struct ProbabilityConvergency {
  log_tol: f64,
  max_iter: usize,
}

impl Convergency<f64> for ProbabilityConvergency {
  fn is_root_found(&mut self, y: f64) -> bool {
    y.abs() < self.log_tol
  }

  fn is_converged(&mut self, x1: f64, x2: f64) -> bool {
    (x1 - x2).abs() <= 4.0 * f64::EPSILON * x1.abs().max(x2.abs())
  }

  fn is_iteration_limit_reached(&mut self, iter: usize) -> bool {
    iter >= self.max_iter
  }
}

/// Solves `g(x) = target` on `[lo, hi]` for a monotone probability `g` (cdf or survival)
/// whose values at the ends straddle `target`.
///
/// The search runs on `ln g - ln target`, so the match is relative and tail probabilities
/// down to `f64::MIN_POSITIVE` keep their precision.
pub(crate) fn solve_probability(
  family: &'static str,
  target: f64,
  lo: f64,
  hi: f64,
  g: impl Fn(f64) -> f64,
) -> f64 {
  let ln_target = target.max(f64::MIN_POSITIVE).ln();
  let f = |x: f64| g(x).max(f64::MIN_POSITIVE).ln() - ln_target;
  let mut convergency = ProbabilityConvergency {
    log_tol: ROOT_LOG_TOL,
    max_iter: ROOT_MAX_ITER,
  };
  match find_root_brent(lo, hi, f, &mut convergency) {
    Ok(x) => x,
    Err(error) => {
      warn!(family, target, lo, hi, ?error, "quantile root search failed");
      f64::NAN
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarginalFamily {
  Normal,
  LogNormal,
  Beta,
  StudentT,
  InverseGaussian,
}

impl MarginalFamily {
  pub const ALL: [MarginalFamily; 5] = [
    MarginalFamily::Normal,
    MarginalFamily::LogNormal,
    MarginalFamily::Beta,
    MarginalFamily::StudentT,
    MarginalFamily::InverseGaussian,
  ];

  /// Number of hyperparameters the constructor takes.
  pub fn arity(&self) -> usize {
    match self {
      MarginalFamily::StudentT => 3,
      _ => 2,
    }
  }

  pub fn name(&self) -> &'static str {
    match self {
      MarginalFamily::Normal => "Normal",
      MarginalFamily::LogNormal => "LogNormal",
      MarginalFamily::Beta => "Beta",
      MarginalFamily::StudentT => "StudentT",
      MarginalFamily::InverseGaussian => "InverseGaussian",
    }
  }
}

impl fmt::Display for MarginalFamily {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for MarginalFamily {
  type Err = GmError;

  /// Case-insensitive; also accepts the legacy `*Dist` registry names.
  fn from_str(s: &str) -> Result<Self> {
    let key: String = s
      .chars()
      .filter(|c| !matches!(c, '-' | '_' | ' '))
      .collect::<String>()
      .to_ascii_lowercase();
    let key = key.strip_suffix("dist").unwrap_or(&key);
    match key {
      "normal" | "gaussian" => Ok(MarginalFamily::Normal),
      "lognormal" => Ok(MarginalFamily::LogNormal),
      "beta" => Ok(MarginalFamily::Beta),
      "studentt" | "studentst" | "t" => Ok(MarginalFamily::StudentT),
      "inversegaussian" | "inversegauss" | "ig" | "wald" => Ok(MarginalFamily::InverseGaussian),
      _ => Err(GmError::UnknownFamily(s.to_string())),
    }
  }
}

/// One of the fixed marginal families.
#[derive(Debug, Clone)]
pub enum Marginal {
  Normal(NormalDist),
  LogNormal(LogNormalDist),
  Beta(BetaDist),
  StudentT(StudentTDist),
  InverseGaussian(InverseGaussDist),
}

macro_rules! dispatch {
  ($self:ident, $d:ident => $body:expr) => {
    match $self {
      Marginal::Normal($d) => $body,
      Marginal::LogNormal($d) => $body,
      Marginal::Beta($d) => $body,
      Marginal::StudentT($d) => $body,
      Marginal::InverseGaussian($d) => $body,
    }
  };
}

impl Marginal {
  pub fn family(&self) -> MarginalFamily {
    match self {
      Marginal::Normal(_) => MarginalFamily::Normal,
      Marginal::LogNormal(_) => MarginalFamily::LogNormal,
      Marginal::Beta(_) => MarginalFamily::Beta,
      Marginal::StudentT(_) => MarginalFamily::StudentT,
      Marginal::InverseGaussian(_) => MarginalFamily::InverseGaussian,
    }
  }

  /// Hyperparameters in constructor order.
  pub fn params(&self) -> Vec<f64> {
    match self {
      Marginal::Normal(d) => vec![d.location(), d.scale()],
      Marginal::LogNormal(d) => vec![d.log_mean(), d.log_std()],
      Marginal::Beta(d) => vec![d.alpha(), d.beta()],
      Marginal::StudentT(d) => vec![d.location(), d.scale(), d.dof()],
      Marginal::InverseGaussian(d) => vec![d.mean(), d.shape()],
    }
  }

  /// Maps a standard-normal variate onto this law, `F^{-1}(Phi(z))`.
  ///
  /// Normal and lognormal laws are mapped in closed form. For the others a positive `z` goes
  /// through the survival side, `S^{-1}(Phi(-z))`, so the upper tail does not round to 1.
  pub fn map_standard_normal(&self, z: f64) -> f64 {
    match self {
      Marginal::Normal(d) => d.location() + d.scale() * z,
      Marginal::LogNormal(d) => (d.log_mean() + d.log_std() * z).exp(),
      _ if z > 0.0 => self.inv_sf(standard_normal_cdf(-z)),
      _ => self.inv_cdf(standard_normal_cdf(z)),
    }
  }
}

fn standard_normal_cdf(z: f64) -> f64 {
  0.5 * erfc(-z / std::f64::consts::SQRT_2)
}

impl Distribution<f64> for Marginal {
  fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
    dispatch!(self, d => d.sample(rng))
  }
}

impl DistributionExt for Marginal {
  fn pdf(&self, x: f64) -> f64 {
    dispatch!(self, d => d.pdf(x))
  }

  fn cdf(&self, x: f64) -> f64 {
    dispatch!(self, d => d.cdf(x))
  }

  fn inv_cdf(&self, p: f64) -> f64 {
    dispatch!(self, d => d.inv_cdf(p))
  }

  fn sf(&self, x: f64) -> f64 {
    dispatch!(self, d => d.sf(x))
  }

  fn inv_sf(&self, q: f64) -> f64 {
    dispatch!(self, d => d.inv_sf(q))
  }

  fn mean(&self) -> f64 {
    dispatch!(self, d => d.mean())
  }

  fn variance(&self) -> f64 {
    dispatch!(self, d => d.variance())
  }
}

impl From<NormalDist> for Marginal {
  fn from(d: NormalDist) -> Self {
    Marginal::Normal(d)
  }
}

impl From<LogNormalDist> for Marginal {
  fn from(d: LogNormalDist) -> Self {
    Marginal::LogNormal(d)
  }
}

impl From<BetaDist> for Marginal {
  fn from(d: BetaDist) -> Self {
    Marginal::Beta(d)
  }
}

impl From<StudentTDist> for Marginal {
  fn from(d: StudentTDist) -> Self {
    Marginal::StudentT(d)
  }
}

impl From<InverseGaussDist> for Marginal {
  fn from(d: InverseGaussDist) -> Self {
    Marginal::InverseGaussian(d)
  }
}
