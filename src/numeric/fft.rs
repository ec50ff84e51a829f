use ndarray::Array1;
use ndarray::ArrayView1;
use ndrustfft::ndifft;
use ndrustfft::FftHandler;
use num_complex::Complex64;
use tracing::debug;

use crate::error::GmError;
use crate::error::Result;

/// Real part of the inverse DFT, `x[k] = (1/N) sum_j X[j] exp(2 pi i j k / N)`.
///
/// The imaginary component is discarded; use [`inverse_fft_checked`] when the spectrum may
/// not belong to a real signal.
pub fn inverse_fft(spectrum: &[Complex64]) -> Result<Vec<f64>> {
  let (real, _) = inverse_fft_with_residual(spectrum)?;
  Ok(real)
}

/// Like [`inverse_fft`] but writes into a caller-sized buffer, which must have length `N`.
pub fn inverse_fft_into(spectrum: &[Complex64], output: &mut [f64]) -> Result<()> {
  if output.len() != spectrum.len() {
    return Err(GmError::SizeMismatch {
      expected: spectrum.len(),
      actual: output.len(),
    });
  }
  let (real, _) = inverse_fft_with_residual(spectrum)?;
  output.copy_from_slice(&real);
  Ok(())
}

/// Fails with [`GmError::ImaginaryResidual`] when any `|Im x[k]|` exceeds `tolerance`.
pub fn inverse_fft_checked(spectrum: &[Complex64], tolerance: f64) -> Result<Vec<f64>> {
  let (real, residual) = inverse_fft_with_residual(spectrum)?;
  if residual > tolerance || residual.is_nan() {
    return Err(GmError::ImaginaryResidual {
      max: residual,
      tolerance,
    });
  }
  Ok(real)
}

/// Real part of the inverse transform together with the largest discarded `|Im x[k]|`.
pub fn inverse_fft_with_residual(spectrum: &[Complex64]) -> Result<(Vec<f64>, f64)> {
  if spectrum.is_empty() {
    return Err(GmError::EmptyInput("inverse_fft: spectrum"));
  }

  let n = spectrum.len();
  let input = ArrayView1::from(spectrum);
  let mut output = Array1::<Complex64>::zeros(n);
  let handler = FftHandler::<f64>::new(n);
  ndifft(&input, &mut output, &handler, 0);

  let residual = output.iter().fold(0.0_f64, |acc, c| acc.max(c.im.abs()));
  debug!(n, residual, "inverse transform");
  Ok((output.iter().map(|c| c.re).collect(), residual))
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use approx::assert_relative_eq;
  use num_complex::Complex64;

  use super::inverse_fft;
  use super::inverse_fft_checked;
  use super::inverse_fft_into;
  use super::inverse_fft_with_residual;
  use crate::error::GmError;

  fn five_point_spectrum() -> Vec<Complex64> {
    vec![
      Complex64::new(15.0, 0.0),
      Complex64::new(-2.5, 3.440954801177933),
      Complex64::new(-2.5, 0.812299240582266),
      Complex64::new(-2.5, -0.812299240582266),
      Complex64::new(-2.5, -3.440954801177933),
    ]
  }

  #[test]
  fn recovers_real_signal() {
    let out = inverse_fft(&five_point_spectrum()).unwrap();
    assert_eq!(out.len(), 5);
    for (got, want) in out.iter().zip([1.0, 2.0, 3.0, 4.0, 5.0]) {
      assert_relative_eq!(*got, want, max_relative = 0.01);
    }
  }

  #[test]
  fn rounded_spectrum_still_within_one_percent() {
    let spectrum = vec![
      Complex64::new(15.0, 0.0),
      Complex64::new(-2.5, 3.4410),
      Complex64::new(-2.5, 0.8123),
      Complex64::new(-2.5, -0.8123),
      Complex64::new(-2.5, -3.4410),
    ];
    let out = inverse_fft(&spectrum).unwrap();
    for (got, want) in out.iter().zip([1.0, 2.0, 3.0, 4.0, 5.0]) {
      assert_relative_eq!(*got, want, max_relative = 0.01);
    }
  }

  #[test]
  fn hermitian_spectrum_has_negligible_imaginary_residual() {
    let (_, residual) = inverse_fft_with_residual(&five_point_spectrum()).unwrap();
    assert!(residual < 1e-12, "residual {residual}");
    assert!(inverse_fft_checked(&five_point_spectrum(), 1e-9).is_ok());
  }

  #[test]
  fn non_hermitian_spectrum_is_flagged() {
    let spectrum = vec![
      Complex64::new(1.0, 0.0),
      Complex64::new(0.0, 4.0),
      Complex64::new(0.0, 0.0),
      Complex64::new(0.0, 0.0),
    ];
    match inverse_fft_checked(&spectrum, 1e-9) {
      Err(GmError::ImaginaryResidual { max, .. }) => {
        assert_abs_diff_eq!(max, 1.0, epsilon = 1e-12)
      }
      other => panic!("unexpected {other:?}"),
    }
  }

  #[test]
  fn buffer_length_must_match() {
    let mut short = vec![0.0; 4];
    assert!(matches!(
      inverse_fft_into(&five_point_spectrum(), &mut short),
      Err(GmError::SizeMismatch {
        expected: 5,
        actual: 4
      })
    ));

    let mut exact = vec![0.0; 5];
    inverse_fft_into(&five_point_spectrum(), &mut exact).unwrap();
    assert_relative_eq!(exact[4], 5.0, max_relative = 0.01);
  }

  #[test]
  fn dc_only_spectrum_is_constant() {
    let mut spectrum = vec![Complex64::new(0.0, 0.0); 8];
    spectrum[0] = Complex64::new(8.0, 0.0);
    let out = inverse_fft(&spectrum).unwrap();
    for v in out {
      assert_abs_diff_eq!(v, 1.0, epsilon = 1e-12);
    }
  }

  #[test]
  fn empty_spectrum_is_an_error() {
    assert!(matches!(inverse_fft(&[]), Err(GmError::EmptyInput(_))));
  }
}
