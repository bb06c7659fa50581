use chrono::{Duration, NaiveDate};
use country_data::{profile_or_default, ModelKind};
use pandemic_forecast::cleaning::{CleanSeries, CleaningLevel};
use pandemic_forecast::features;
use pandemic_forecast::models::FittedRegression;
use pandemic_forecast::training::{self, split_index};
use rstest::rstest;

fn feature_matrix(n: usize) -> features::FeatureMatrix {
    let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
    let series = CleanSeries {
        country: "Testland".to_string(),
        dates: (0..n as i64).map(|i| start + Duration::days(i)).collect(),
        new_cases: (0..n).map(|i| 80.0 + 20.0 * ((i % 9) as f64)).collect(),
        new_deaths: (0..n).map(|i| 3.0 + (i % 5) as f64).collect(),
        new_vaccinations: None,
        stringency_index: None,
        total_cases: vec![0.0; n],
        total_deaths: vec![0.0; n],
    };
    features::build(&series, profile_or_default("France"), CleaningLevel::Standard).unwrap()
}

#[test]
fn test_split_index_is_exact_floor_of_80_percent() {
    for n in [5usize, 10, 20, 21, 25, 33, 99, 120] {
        assert_eq!(split_index(n), (n as f64 * 0.8) as usize, "n = {}", n);
    }
}

#[test]
fn test_chronological_split_never_leaks_future_dates() {
    let matrix = feature_matrix(60);
    let train_size = split_index(matrix.len());

    let max_train_date = matrix.dates[..train_size].iter().max().unwrap();
    let min_test_date = matrix.dates[train_size..].iter().min().unwrap();
    assert!(max_train_date < min_test_date);
}

#[rstest]
#[case(ModelKind::Linear)]
#[case(ModelKind::RandomForest)]
#[case(ModelKind::GradientBoost)]
fn test_training_reports_sample_counts_and_sane_metrics(#[case] kind: ModelKind) {
    let matrix = feature_matrix(60);
    let outcome = training::train_and_evaluate(kind, &matrix).unwrap();

    assert_eq!(outcome.training_samples, split_index(matrix.len()));
    assert_eq!(
        outcome.training_samples + outcome.test_samples,
        matrix.len()
    );

    // Sanitization contract: anything reported is finite, and the
    // normalized R² sits inside [0, 1].
    for value in [
        outcome.metrics.rmse,
        outcome.metrics.mae,
        outcome.metrics.r2,
    ]
    .into_iter()
    .flatten()
    {
        assert!(value.is_finite());
    }
    if let Some(normalized) = outcome.metrics.r2_normalized {
        assert!((0.0..=1.0).contains(&normalized));
    }
}

#[rstest]
#[case(ModelKind::Linear)]
#[case(ModelKind::RandomForest)]
#[case(ModelKind::GradientBoost)]
fn test_training_is_deterministic(#[case] kind: ModelKind) {
    let matrix = feature_matrix(50);
    let first = training::train_and_evaluate(kind, &matrix).unwrap();
    let second = training::train_and_evaluate(kind, &matrix).unwrap();

    assert_eq!(first.metrics, second.metrics);

    let probe = matrix.rows.last().unwrap();
    let scaled_first = first.scaler.transform_row(probe);
    let scaled_second = second.scaler.transform_row(probe);
    assert_eq!(
        first.fitted.predict_row(&scaled_first),
        second.fitted.predict_row(&scaled_second)
    );
}
