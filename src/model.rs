//! # Model
//!
//! $$
//! \nu \mid (M, R, V_{S30}) \sim \mathcal N\big(\beta c,\; \operatorname{diag}(\sigma) R \operatorname{diag}(\sigma)\big),
//! \qquad \theta_k = F_k^{-1}\big(\Phi(\nu_k)\big)
//! $$
//!
//! Scenario-conditioned distribution of the 18 ground-motion model parameters
//! (Vlachos, Papakonstantinou & Deodatis 2018). Construction is the only operation: it
//! builds the mean vector from the scenario, the covariance from the calibration, draws
//! `num_spectra` correlated realizations and instantiates the 18 marginal laws. A model
//! that exists is complete and immutable.
//!
//! | Module          | Description                                             |
//! |-----------------|---------------------------------------------------------|
//! | [`scenario`]    | Covariates, normalization and site classification.      |
//! | [`calibration`] | Regression, variance, correlation and marginal tables.  |
//!
use ndarray::Array1;
use ndarray::Array2;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::distributions::Marginal;
use crate::distributions::MarginalSpec;
use crate::error::GmError;
use crate::error::Result;
use crate::numeric::corr_to_cov;
use crate::numeric::MultivariateNormal;
use crate::numeric::SamplingStrategy;
use crate::numeric::DEFAULT_SEED;

pub mod calibration;
pub mod scenario;

pub use calibration::CalibrationRecord;
pub use calibration::CalibrationTables;
pub use calibration::NUM_PARAMETERS;
pub use calibration::NUM_PREDICTORS;
pub use scenario::NormalizedCovariates;
pub use scenario::ScenarioCovariates;
pub use scenario::SiteClass;

/// Sampling configuration. The seed is fixed by the caller (or [`DEFAULT_SEED`]), so two
/// models built from the same inputs hold identical realizations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
  pub seed: u64,
  pub strategy: SamplingStrategy,
}

impl Default for ModelConfig {
  fn default() -> Self {
    Self {
      seed: DEFAULT_SEED,
      strategy: SamplingStrategy::Sequential,
    }
  }
}

#[derive(Debug, Clone)]
pub struct ScenarioParameterModel {
  covariates: ScenarioCovariates,
  site_class: SiteClass,
  time_step: f64,
  freq_step: f64,
  num_spectra: usize,
  num_sims: usize,
  config: ModelConfig,
  conditional_means: Array1<f64>,
  parameter_means: Array1<f64>,
  covariance: Array2<f64>,
  realizations: Array2<f64>,
  marginals: Vec<Marginal>,
}

impl ScenarioParameterModel {
  /// Builds the model with the published calibration and the default seed.
  ///
  /// `time_step` and `freq_step` are carried for downstream synthesis and not validated.
  pub fn new(
    covariates: ScenarioCovariates,
    time_step: f64,
    freq_step: f64,
    num_spectra: usize,
    num_sims: usize,
  ) -> Result<Self> {
    Self::with_calibration(
      covariates,
      time_step,
      freq_step,
      num_spectra,
      num_sims,
      &CalibrationTables::default(),
      ModelConfig::default(),
    )
  }

  pub fn with_calibration(
    covariates: ScenarioCovariates,
    time_step: f64,
    freq_step: f64,
    num_spectra: usize,
    num_sims: usize,
    tables: &CalibrationTables,
    config: ModelConfig,
  ) -> Result<Self> {
    covariates.validate()?;
    if num_spectra == 0 {
      return Err(GmError::InvalidScenario {
        field: "num_spectra",
        reason: "must be at least 1".to_string(),
      });
    }
    if num_sims == 0 {
      return Err(GmError::InvalidScenario {
        field: "num_sims",
        reason: "must be at least 1".to_string(),
      });
    }

    let site_class = covariates.site_class();
    let conditional_means = covariates.conditional_means();
    debug!(?covariates, ?site_class, "scenario normalized");

    let parameter_means = tables.coefficients().dot(&conditional_means);
    debug!(means = ?parameter_means.as_slice(), "parameter means");

    let covariance = corr_to_cov(tables.correlation(), &tables.std_devs())?;
    debug!(dim = covariance.nrows(), "covariance built");

    let realizations = MultivariateNormal::new(config.seed)
      .with_strategy(config.strategy)
      .generate(&parameter_means, &covariance, num_spectra)?;

    let marginals = tables
      .marginals()
      .iter()
      .map(MarginalSpec::build)
      .collect::<Result<Vec<_>>>()?;
    if marginals.len() != NUM_PARAMETERS {
      return Err(GmError::length_mismatch(
        "ScenarioParameterModel marginals",
        NUM_PARAMETERS,
        marginals.len(),
      ));
    }
    debug!(num_spectra, num_sims, seed = config.seed, "parameter model ready");

    Ok(Self {
      covariates,
      site_class,
      time_step,
      freq_step,
      num_spectra,
      num_sims,
      config,
      conditional_means,
      parameter_means,
      covariance,
      realizations,
      marginals,
    })
  }

  /// `num_spectra x 18` draws of the transformed-normal parameters.
  pub fn realizations(&self) -> &Array2<f64> {
    &self.realizations
  }

  /// Marginal law of parameter slot `index` (`0..18`).
  pub fn marginal(&self, index: usize) -> Result<&Marginal> {
    self
      .marginals
      .get(index)
      .ok_or_else(|| GmError::DimensionMismatch {
        context: "ScenarioParameterModel::marginal",
        expected: format!("index < {NUM_PARAMETERS}"),
        actual: index.to_string(),
      })
  }

  pub fn marginals(&self) -> &[Marginal] {
    &self.marginals
  }

  /// Realizations mapped to physical units, `F_k^{-1}(Phi(z))` column by column.
  pub fn physical_realizations(&self) -> Array2<f64> {
    Array2::from_shape_fn(self.realizations.dim(), |(i, k)| {
      self.marginals[k].map_standard_normal(self.realizations[[i, k]])
    })
  }

  pub fn parameter_means(&self) -> &Array1<f64> {
    &self.parameter_means
  }

  pub fn covariance(&self) -> &Array2<f64> {
    &self.covariance
  }

  pub fn conditional_means(&self) -> &Array1<f64> {
    &self.conditional_means
  }

  pub fn site_class(&self) -> SiteClass {
    self.site_class
  }

  pub fn covariates(&self) -> &ScenarioCovariates {
    &self.covariates
  }

  pub fn time_step(&self) -> f64 {
    self.time_step
  }

  pub fn freq_step(&self) -> f64 {
    self.freq_step
  }

  pub fn num_spectra(&self) -> usize {
    self.num_spectra
  }

  pub fn num_sims(&self) -> usize {
    self.num_sims
  }

  pub fn seed(&self) -> u64 {
    self.config.seed
  }

  pub fn config(&self) -> &ModelConfig {
    &self.config
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use tracing_test::traced_test;

  use super::CalibrationTables;
  use super::ModelConfig;
  use super::ScenarioCovariates;
  use super::ScenarioParameterModel;
  use super::SiteClass;
  use super::NUM_PARAMETERS;
  use crate::distributions::Marginal;
  use crate::error::GmError;
  use crate::numeric::SamplingStrategy;
  use crate::numeric::DEFAULT_SEED;

  fn scenario() -> ScenarioCovariates {
    ScenarioCovariates::new(7.0, 20.0, 310.0)
  }

  #[test]
  #[traced_test]
  fn builds_with_published_calibration() {
    let model = ScenarioParameterModel::new(scenario(), 0.01, 0.2, 25, 3).unwrap();
    assert_eq!(model.realizations().dim(), (25, NUM_PARAMETERS));
    assert_eq!(model.marginals().len(), NUM_PARAMETERS);
    assert_eq!(model.site_class(), SiteClass::Medium);
    assert_eq!(model.seed(), DEFAULT_SEED);
    assert_eq!(model.num_spectra(), 25);
    assert_eq!(model.num_sims(), 3);
    assert_eq!(model.time_step(), 0.01);
    assert_eq!(model.freq_step(), 0.2);
    assert!(model.realizations().iter().all(|v| v.is_finite()));
    assert!(logs_contain("parameter model ready"));
  }

  #[test]
  fn means_are_coefficients_times_conditional_vector() {
    let tables = CalibrationTables::default();
    let model = ScenarioParameterModel::new(scenario(), 0.01, 0.2, 1, 1).unwrap();
    let c = model.conditional_means();
    for k in 0..NUM_PARAMETERS {
      let expected: f64 = (0..7).map(|j| tables.coefficients()[[k, j]] * c[j]).sum();
      assert_abs_diff_eq!(model.parameter_means()[k], expected, epsilon = 1e-12);
    }
  }

  #[test]
  fn covariance_scales_correlation_by_variance() {
    let tables = CalibrationTables::default();
    let model = ScenarioParameterModel::new(scenario(), 0.01, 0.2, 1, 1).unwrap();
    let cov = model.covariance();
    for k in 0..NUM_PARAMETERS {
      assert_abs_diff_eq!(cov[[k, k]], tables.variance()[k], epsilon = 1e-12);
    }
    let expected = tables.correlation()[[0, 17]] * (0.90_f64 * 0.80).sqrt();
    assert_abs_diff_eq!(cov[[0, 17]], expected, epsilon = 1e-12);
    assert_eq!(cov[[0, 17]], cov[[17, 0]]);
  }

  #[test]
  fn same_inputs_same_realizations() {
    for strategy in [SamplingStrategy::Sequential, SamplingStrategy::PerRowStreams] {
      let config = ModelConfig {
        seed: 7,
        strategy,
      };
      let tables = CalibrationTables::default();
      let build = || {
        ScenarioParameterModel::with_calibration(scenario(), 0.01, 0.2, 12, 1, &tables, config)
          .unwrap()
      };
      assert_eq!(build().realizations(), build().realizations());

      let other = ScenarioParameterModel::with_calibration(
        scenario(),
        0.01,
        0.2,
        12,
        1,
        &tables,
        ModelConfig { seed: 8, ..config },
      )
      .unwrap();
      assert_ne!(build().realizations(), other.realizations());
    }
  }

  #[test]
  fn marginal_slots_follow_the_table() {
    let model = ScenarioParameterModel::new(scenario(), 0.01, 0.2, 1, 1).unwrap();
    assert!(matches!(model.marginal(0).unwrap(), Marginal::LogNormal(_)));
    assert!(matches!(model.marginal(2).unwrap(), Marginal::Normal(_)));
    assert!(matches!(model.marginal(8).unwrap(), Marginal::Beta(_)));
    assert!(matches!(model.marginal(11).unwrap(), Marginal::StudentT(_)));
    assert!(matches!(model.marginal(12).unwrap(), Marginal::InverseGaussian(_)));
    assert!(matches!(model.marginal(17).unwrap(), Marginal::LogNormal(_)));
    assert!(matches!(
      model.marginal(18),
      Err(GmError::DimensionMismatch { .. })
    ));
  }

  #[test]
  fn physical_realizations_respect_supports() {
    let model = ScenarioParameterModel::new(scenario(), 0.01, 0.2, 200, 1).unwrap();
    let physical = model.physical_realizations();
    assert_eq!(physical.dim(), model.realizations().dim());
    for row in physical.rows() {
      for (k, v) in row.iter().enumerate() {
        assert!(v.is_finite(), "slot {k} gave {v}");
        match model.marginal(k).unwrap() {
          Marginal::LogNormal(_) | Marginal::InverseGaussian(_) => assert!(*v > 0.0),
          Marginal::Beta(_) => assert!((0.0..=1.0).contains(v)),
          _ => {}
        }
      }
    }
  }

  #[test]
  fn extreme_scenario_keeps_physical_values_finite() {
    // large magnitude at the nearest admissible distance on a very soft site
    let extreme = ScenarioCovariates::new(8.0, -4.9, 5.0);
    let model = ScenarioParameterModel::new(extreme, 0.01, 0.2, 500, 1).unwrap();
    assert!(model.parameter_means().iter().any(|m| *m > 10.0));
    let physical = model.physical_realizations();
    for row in physical.rows() {
      for (k, v) in row.iter().enumerate() {
        assert!(v.is_finite(), "slot {k} gave {v}");
        match model.marginal(k).unwrap() {
          Marginal::LogNormal(_) | Marginal::InverseGaussian(_) => assert!(*v > 0.0),
          Marginal::Beta(_) => assert!((0.0..=1.0).contains(v)),
          _ => {}
        }
      }
    }
  }

  #[test]
  fn rejects_bad_counts_and_covariates() {
    assert!(matches!(
      ScenarioParameterModel::new(scenario(), 0.01, 0.2, 0, 1),
      Err(GmError::InvalidScenario {
        field: "num_spectra",
        ..
      })
    ));
    assert!(matches!(
      ScenarioParameterModel::new(scenario(), 0.01, 0.2, 1, 0),
      Err(GmError::InvalidScenario {
        field: "num_sims",
        ..
      })
    ));
    assert!(matches!(
      ScenarioParameterModel::new(ScenarioCovariates::new(7.0, 20.0, -1.0), 0.01, 0.2, 1, 1),
      Err(GmError::InvalidScenario {
        field: "site_stiffness",
        ..
      })
    ));
  }

  #[test]
  fn model_config_deserializes_with_defaults() {
    let config: ModelConfig =
      serde_json::from_str(r#"{ "strategy": "per_row_streams" }"#).unwrap();
    assert_eq!(config.seed, DEFAULT_SEED);
    assert_eq!(config.strategy, SamplingStrategy::PerRowStreams);
  }
}
