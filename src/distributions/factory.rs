//! # Factory
//!
//! Resolves a family name plus hyperparameters onto a concrete [`Marginal`].
//!
use serde::Deserialize;
use serde::Serialize;

use super::BetaDist;
use super::InverseGaussDist;
use super::LogNormalDist;
use super::Marginal;
use super::MarginalFamily;
use super::NormalDist;
use super::StudentTDist;
use crate::error::GmError;
use crate::error::Result;

/// Builds a marginal from a family name, e.g. `create("LognormalDist", &[-1.735, 0.523])`.
pub fn create(name: &str, params: &[f64]) -> Result<Marginal> {
  build(name.parse()?, params)
}

pub fn build(family: MarginalFamily, params: &[f64]) -> Result<Marginal> {
  if params.len() != family.arity() {
    return Err(GmError::ArityMismatch {
      family: family.name(),
      expected: family.arity(),
      actual: params.len(),
    });
  }

  let marginal: Marginal = match family {
    MarginalFamily::Normal => NormalDist::new(params[0], params[1])?.into(),
    MarginalFamily::LogNormal => LogNormalDist::new(params[0], params[1])?.into(),
    MarginalFamily::Beta => BetaDist::new(params[0], params[1])?.into(),
    MarginalFamily::StudentT => StudentTDist::new(params[0], params[1], params[2])?.into(),
    MarginalFamily::InverseGaussian => InverseGaussDist::new(params[0], params[1])?.into(),
  };
  Ok(marginal)
}

/// Serializable form of a factory call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginalSpec {
  pub family: String,
  pub params: Vec<f64>,
}

impl MarginalSpec {
  pub fn new(family: MarginalFamily, params: &[f64]) -> Self {
    Self {
      family: family.name().to_string(),
      params: params.to_vec(),
    }
  }

  pub fn build(&self) -> Result<Marginal> {
    create(&self.family, &self.params)
  }
}

impl From<&Marginal> for MarginalSpec {
  fn from(marginal: &Marginal) -> Self {
    MarginalSpec::new(marginal.family(), &marginal.params())
  }
}
