use ndarray::Array1;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use rand_distr::Distribution;
use rand_distr::StandardNormal;
use rayon::prelude::*;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::trace;

use super::cholesky::cholesky_lower;
use crate::error::GmError;
use crate::error::Result;

/// Seed used when the caller does not supply one.
pub const DEFAULT_SEED: u64 = 100;

/// How the random stream is laid out across sample rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingStrategy {
  /// One generator, advanced row-major: row 0 is fully drawn before row 1 starts.
  /// Successive `generate` calls continue the same stream.
  #[default]
  Sequential,
  /// Row `i` is drawn from its own generator seeded from `(seed, i)`; rows are computed in
  /// parallel. Row `i` depends only on the seed and `i`.
  PerRowStreams,
}

/// Correlated multivariate normal sampler, `x = mean + L z` with `L L^T = cov`.
#[derive(Debug, Clone)]
pub struct MultivariateNormal {
  seed: u64,
  strategy: SamplingStrategy,
  rng: StdRng,
}

impl Default for MultivariateNormal {
  fn default() -> Self {
    Self::new(DEFAULT_SEED)
  }
}

impl MultivariateNormal {
  pub fn new(seed: u64) -> Self {
    Self {
      seed,
      strategy: SamplingStrategy::default(),
      rng: StdRng::seed_from_u64(seed),
    }
  }

  pub fn with_strategy(mut self, strategy: SamplingStrategy) -> Self {
    self.strategy = strategy;
    self
  }

  pub fn seed(&self) -> u64 {
    self.seed
  }

  pub fn strategy(&self) -> SamplingStrategy {
    self.strategy
  }

  /// Restarts the stream from `seed`.
  pub fn reseed(&mut self, seed: u64) {
    self.seed = seed;
    self.rng = StdRng::seed_from_u64(seed);
  }

  /// Draws `num_samples` rows from N(mean, cov). The result is `num_samples x mean.len()`.
  pub fn generate(
    &mut self,
    mean: &Array1<f64>,
    cov: &Array2<f64>,
    num_samples: usize,
  ) -> Result<Array2<f64>> {
    let dim = mean.len();
    if cov.dim() != (dim, dim) {
      return Err(GmError::shape_mismatch(
        "MultivariateNormal::generate",
        (dim, dim),
        cov.dim(),
      ));
    }

    let l = cholesky_lower(cov)?;
    debug!(
      dim,
      num_samples,
      strategy = ?self.strategy,
      seed = self.seed,
      "drawing correlated normal samples"
    );

    match self.strategy {
      SamplingStrategy::Sequential => {
        let mut out = Array2::<f64>::zeros((num_samples, dim));
        for (i, mut row) in out.rows_mut().into_iter().enumerate() {
          let x = correlated_draw(&mut self.rng, mean, &l);
          trace!(row = i, "sequential draw");
          row.assign(&x);
        }
        Ok(out)
      }
      SamplingStrategy::PerRowStreams => {
        let seed = self.seed;
        let rows: Vec<Array1<f64>> = (0..num_samples)
          .into_par_iter()
          .map(|i| {
            let mut rng = StdRng::seed_from_u64(row_seed(seed, i));
            correlated_draw(&mut rng, mean, &l)
          })
          .collect();

        let mut out = Array2::<f64>::zeros((num_samples, dim));
        for (mut dst, src) in out.rows_mut().into_iter().zip(rows.iter()) {
          dst.assign(src);
        }
        Ok(out)
      }
    }
  }
}

fn correlated_draw<R: Rng + ?Sized>(
  rng: &mut R,
  mean: &Array1<f64>,
  l: &Array2<f64>,
) -> Array1<f64> {
  let z: Array1<f64> = (0..mean.len())
    .map(|_| -> f64 { StandardNormal.sample(rng) })
    .collect();
  mean + &l.dot(&z)
}

/// Seed of the sub-stream for `row`, a splitmix64 mix of the base seed and the row index.
pub fn row_seed(seed: u64, row: usize) -> u64 {
  splitmix64(seed ^ splitmix64(row as u64))
}

fn splitmix64(x: u64) -> u64 {
  let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
  z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
  z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
  z ^ (z >> 31)
}
