use approx::assert_abs_diff_eq;
use ndarray::Axis;
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::Distribution;
use stochastic_gm::distributions::factory;
use stochastic_gm::model::NUM_PARAMETERS;
use stochastic_gm::numeric::convolve_1d;
use stochastic_gm::numeric::inverse_fft;
use stochastic_gm::numeric::trapazoid_rule;
use stochastic_gm::CalibrationTables;
use stochastic_gm::DistributionExt;
use stochastic_gm::GmError;
use stochastic_gm::ModelConfig;
use stochastic_gm::SamplingStrategy;
use stochastic_gm::ScenarioCovariates;
use stochastic_gm::ScenarioParameterModel;

fn northridge_like() -> ScenarioCovariates {
  ScenarioCovariates::new(6.7, 15.0, 380.0)
}

#[test]
fn realizations_are_spectra_by_parameters() {
  let model = ScenarioParameterModel::new(northridge_like(), 0.005, 0.1, 40, 2).unwrap();
  assert_eq!(model.realizations().nrows(), 40);
  assert_eq!(model.realizations().ncols(), NUM_PARAMETERS);
}

#[test]
fn construction_is_reproducible() {
  let a = ScenarioParameterModel::new(northridge_like(), 0.005, 0.1, 30, 1).unwrap();
  let b = ScenarioParameterModel::new(northridge_like(), 0.005, 0.1, 30, 1).unwrap();
  assert_eq!(a.realizations(), b.realizations());
  assert_eq!(a.physical_realizations(), b.physical_realizations());
}

#[test]
fn seed_and_strategy_come_from_config() {
  let tables = CalibrationTables::default();
  let sequential = ScenarioParameterModel::with_calibration(
    northridge_like(),
    0.005,
    0.1,
    30,
    1,
    &tables,
    ModelConfig::default(),
  )
  .unwrap();
  let parallel = ScenarioParameterModel::with_calibration(
    northridge_like(),
    0.005,
    0.1,
    30,
    1,
    &tables,
    ModelConfig {
      strategy: SamplingStrategy::PerRowStreams,
      ..ModelConfig::default()
    },
  )
  .unwrap();
  assert_eq!(sequential.seed(), parallel.seed());
  assert_eq!(sequential.parameter_means(), parallel.parameter_means());
  assert_ne!(sequential.realizations(), parallel.realizations());
}

#[test]
fn sample_mean_tracks_parameter_means() {
  let model = ScenarioParameterModel::new(northridge_like(), 0.005, 0.1, 20_000, 1).unwrap();
  let mean = model.realizations().mean_axis(Axis(0)).unwrap();
  for (got, want) in mean.iter().zip(model.parameter_means().iter()) {
    assert_abs_diff_eq!(got, want, epsilon = 0.05);
  }
}

#[test]
fn marginal_handles_sample() {
  let model = ScenarioParameterModel::new(northridge_like(), 0.005, 0.1, 1, 1).unwrap();
  let mut rng = StdRng::seed_from_u64(42);
  for k in 0..NUM_PARAMETERS {
    let marginal = model.marginal(k).unwrap();
    let x = marginal.sample(&mut rng);
    assert!(x.is_finite(), "slot {k}");
    assert!(marginal.cdf(x) >= 0.0 && marginal.cdf(x) <= 1.0);
  }
  assert!(matches!(
    model.marginal(NUM_PARAMETERS),
    Err(GmError::DimensionMismatch { .. })
  ));
}

#[test]
fn calibration_loaded_from_json_builds_the_same_model() {
  let json = CalibrationTables::default().to_json_string().unwrap();
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("calibration.json");
  std::fs::write(&path, json).unwrap();

  let tables = CalibrationTables::from_json_file(&path).unwrap();
  let loaded = ScenarioParameterModel::with_calibration(
    northridge_like(),
    0.005,
    0.1,
    10,
    1,
    &tables,
    ModelConfig::default(),
  )
  .unwrap();
  let builtin = ScenarioParameterModel::new(northridge_like(), 0.005, 0.1, 10, 1).unwrap();
  for (a, b) in loaded.realizations().iter().zip(builtin.realizations().iter()) {
    assert_abs_diff_eq!(a, b, epsilon = 1e-9);
  }
}

#[test]
fn extreme_scenario_maps_to_finite_parameters() {
  let extreme = ScenarioCovariates::new(8.0, -4.9, 5.0);
  let model = ScenarioParameterModel::new(extreme, 0.005, 0.1, 300, 1).unwrap();
  let physical = model.physical_realizations();
  assert!(physical.iter().all(|v| v.is_finite()));
  for (k, column) in physical.axis_iter(Axis(1)).enumerate() {
    let marginal = model.marginal(k).unwrap();
    for v in column.iter() {
      let p = marginal.cdf(*v);
      assert!((0.0..=1.0).contains(&p), "slot {k}: cdf({v}) = {p}");
    }
  }
}

#[test]
fn invalid_scenarios_are_rejected() {
  let bad = ScenarioCovariates::new(6.7, -10.0, 380.0);
  assert!(matches!(
    ScenarioParameterModel::new(bad, 0.005, 0.1, 1, 1),
    Err(GmError::InvalidScenario { field: "distance", .. })
  ));
  assert!(ScenarioParameterModel::new(northridge_like(), 0.005, 0.1, 0, 1).is_err());
}

#[test]
fn factory_and_numeric_utilities_are_public() {
  let marginal = factory::create("StudentstDist", &[0.205, 0.232, 7.250]).unwrap();
  assert_abs_diff_eq!(marginal.mean(), 0.205, epsilon = 1e-12);

  assert_eq!(convolve_1d(&[3.0, 4.0, 5.0], &[2.0, 1.0]).unwrap(), vec![6.0, 11.0, 14.0, 5.0]);
  assert_eq!(trapazoid_rule(&[1.0, 4.0, 9.0, 16.0, 25.0], 1.0), 42.0);

  let spectrum = [
    Complex64::new(10.0, 0.0),
    Complex64::new(-2.0, 2.0),
    Complex64::new(-2.0, 0.0),
    Complex64::new(-2.0, -2.0),
  ];
  let signal = inverse_fft(&spectrum).unwrap();
  for (got, want) in signal.iter().zip([1.0, 2.0, 3.0, 4.0]) {
    assert_abs_diff_eq!(*got, want, epsilon = 1e-12);
  }
}
