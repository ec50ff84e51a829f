//! # stochastic-gm
//!
//! $$
//! \theta = F^{-1}\big(\Phi(\nu)\big),\qquad \nu \sim \mathcal N(\beta c,\; C)
//! $$
//!
//! Stochastic ground-motion parameter model for scenario earthquakes, together with the
//! numeric primitives a synthesis pipeline needs downstream.
//!
//! | Module              | Description                                                        |
//! |---------------------|--------------------------------------------------------------------|
//! | [`model`]           | Scenario covariates, calibration tables, the parameter model.      |
//! | [`distributions`]   | The five marginal families and the name-based factory.             |
//! | [`numeric`]         | Covariance, Cholesky, correlated sampling, convolution, FFT.       |
//! | [`traits`]          | `DistributionExt`: pdf, cdf, quantile and moments.                 |
//! | [`error`]           | `GmError` and the crate `Result`.                                  |
//!
//! ```ignore
//! use stochastic_gm::model::ScenarioCovariates;
//! use stochastic_gm::model::ScenarioParameterModel;
//!
//! let scenario = ScenarioCovariates::new(7.0, 20.0, 310.0);
//! let model = ScenarioParameterModel::new(scenario, 0.01, 0.2, 100, 1)?;
//! let z = model.realizations();
//! let theta = model.physical_realizations();
//! ```
//!
pub mod distributions;
pub mod error;
pub mod model;
pub mod numeric;
pub mod traits;

pub use distributions::Marginal;
pub use distributions::MarginalFamily;
pub use error::GmError;
pub use error::Result;
pub use model::CalibrationTables;
pub use model::ModelConfig;
pub use model::ScenarioCovariates;
pub use model::ScenarioParameterModel;
pub use numeric::SamplingStrategy;
pub use traits::DistributionExt;
