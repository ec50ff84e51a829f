//! # Numeric
//!
//! $$
//! C_{ij}=R_{ij}\sigma_i\sigma_j,\qquad x = \mu + Lz,\; LL^\top = C
//! $$
//!
//! Stateless primitives shared by the parameter model and by synthesis pipelines.
//!
//! | Module            | Description                                                       |
//! |-------------------|-------------------------------------------------------------------|
//! | [`covariance`]    | Correlation to covariance conversion.                             |
//! | [`cholesky`]      | Lower Cholesky factor of a positive semi-definite matrix.         |
//! | [`mvn`]           | Seeded correlated multivariate-normal sampling.                   |
//! | [`convolution`]   | Full 1-D discrete convolution.                                    |
//! | [`integration`]   | Composite trapezoidal rule on a uniform grid.                     |
//! | [`fft`]           | Real part of the inverse discrete Fourier transform.              |
//!
pub mod cholesky;
pub mod convolution;
pub mod covariance;
pub mod fft;
pub mod integration;
pub mod mvn;

pub use cholesky::cholesky_lower;
pub use convolution::convolve_1d;
pub use covariance::corr_to_cov;
pub use fft::inverse_fft;
pub use fft::inverse_fft_checked;
pub use fft::inverse_fft_into;
pub use fft::inverse_fft_with_residual;
pub use integration::trapazoid_rule;
pub use mvn::MultivariateNormal;
pub use mvn::SamplingStrategy;
pub use mvn::DEFAULT_SEED;
