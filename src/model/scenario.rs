//! # Scenario
//!
//! $$
//! c = \big[1,\; m',\; \ln r',\; m'\ln r',\; \delta_{soft}\ln v',\; \delta_{med}\ln v',\; \delta_{hard}\ln v'\big],
//! \qquad m'=\tfrac{M}{6},\; r'=\tfrac{R+5}{30},\; v'=\tfrac{V_{S30}}{450}
//! $$
//!
use impl_new_derive::ImplNew;
use ndarray::array;
use ndarray::Array1;
use serde::Deserialize;
use serde::Serialize;

use crate::error::GmError;
use crate::error::Result;

const MAGNITUDE_SCALE: f64 = 6.0;
const DISTANCE_OFFSET: f64 = 5.0;
const DISTANCE_SCALE: f64 = 30.0;
const STIFFNESS_SCALE: f64 = 450.0;

/// Earthquake scenario: moment magnitude, rupture distance (km) and site stiffness
/// proxy `Vs30` (m/s).
#[derive(ImplNew, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioCovariates {
  pub magnitude: f64,
  pub distance: f64,
  pub site_stiffness: f64,
}

/// Covariates after the fixed affine rescaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedCovariates {
  pub magnitude: f64,
  pub distance: f64,
  pub site_stiffness: f64,
}

impl ScenarioCovariates {
  pub fn validate(&self) -> Result<()> {
    for (field, value) in [
      ("magnitude", self.magnitude),
      ("distance", self.distance),
      ("site_stiffness", self.site_stiffness),
    ] {
      if !value.is_finite() {
        return Err(GmError::InvalidScenario {
          field,
          reason: format!("must be finite, got {value}"),
        });
      }
    }
    if self.distance + DISTANCE_OFFSET <= 0.0 {
      return Err(GmError::InvalidScenario {
        field: "distance",
        reason: format!("must exceed -{DISTANCE_OFFSET}, got {}", self.distance),
      });
    }
    if self.site_stiffness <= 0.0 {
      return Err(GmError::InvalidScenario {
        field: "site_stiffness",
        reason: format!("must be positive, got {}", self.site_stiffness),
      });
    }
    Ok(())
  }

  pub fn normalized(&self) -> NormalizedCovariates {
    NormalizedCovariates {
      magnitude: self.magnitude / MAGNITUDE_SCALE,
      distance: (self.distance + DISTANCE_OFFSET) / DISTANCE_SCALE,
      site_stiffness: self.site_stiffness / STIFFNESS_SCALE,
    }
  }

  pub fn site_class(&self) -> SiteClass {
    SiteClass::from_stiffness(self.site_stiffness)
  }

  /// The 7-vector `c` the regression coefficients act on. Assumes [`Self::validate`] passed.
  pub fn conditional_means(&self) -> Array1<f64> {
    let n = self.normalized();
    let [soft, medium, hard] = self.site_class().indicators();
    let ln_r = n.distance.ln();
    let ln_v = n.site_stiffness.ln();
    array![
      1.0,
      n.magnitude,
      ln_r,
      n.magnitude * ln_r,
      soft * ln_v,
      medium * ln_v,
      hard * ln_v
    ]
  }
}

/// Soil category from `Vs30`: soft up to 300 m/s, medium up to 450 m/s, hard above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SiteClass {
  Soft,
  Medium,
  Hard,
}

impl SiteClass {
  pub fn from_stiffness(site_stiffness: f64) -> Self {
    if site_stiffness <= 300.0 {
      SiteClass::Soft
    } else if site_stiffness <= 450.0 {
      SiteClass::Medium
    } else {
      SiteClass::Hard
    }
  }

  /// One-hot `[soft, medium, hard]`.
  pub fn indicators(&self) -> [f64; 3] {
    match self {
      SiteClass::Soft => [1.0, 0.0, 0.0],
      SiteClass::Medium => [0.0, 1.0, 0.0],
      SiteClass::Hard => [0.0, 0.0, 1.0],
    }
  }
}
