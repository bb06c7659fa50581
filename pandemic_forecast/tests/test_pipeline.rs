use chrono::NaiveDate;
use country_data::ModelKind;
use pandemic_forecast::cleaning::CleaningLevel;
use pandemic_forecast::error::ForecastError;
use pandemic_forecast::pipeline::{
    country_listing, list_countries, predict_cases, PredictionRequest,
};
use rstest::rstest;

#[test]
fn test_senegal_standard_random_forest_scenario() {
    let request =
        PredictionRequest::new("Senegal", ModelKind::RandomForest, 7, CleaningLevel::Standard)
            .unwrap();
    let result = predict_cases(&request).unwrap();

    assert_eq!(result.country, "Senegal");
    assert_eq!(result.model_type, ModelKind::RandomForest);
    assert_eq!(result.cleaning_level, CleaningLevel::Standard);
    assert!(!result.fallback_mode);
    assert!(result.warning.is_none());

    assert_eq!(result.predictions.len(), 7);
    assert!(result.predictions.iter().all(|p| p.prediction >= 0.0));
    assert!(result
        .predictions
        .windows(2)
        .all(|w| w[0].date < w[1].date));

    // Dates serialize as ISO calendar days.
    let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
    let dates = json["predictions"].as_array().unwrap();
    for entry in dates {
        let text = entry["date"].as_str().unwrap();
        assert!(NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok());
    }

    assert_eq!(result.country_profile.name, "Senegal");
    assert!(result.training_samples > result.test_samples);
    assert!(result
        .features_used
        .iter()
        .any(|name| name == "seasonal_sin"));
}

#[rstest]
#[case(ModelKind::Linear)]
#[case(ModelKind::RandomForest)]
#[case(ModelKind::GradientBoost)]
fn test_predictions_are_non_negative_for_every_model(#[case] kind: ModelKind) {
    let request = PredictionRequest::new("France", kind, 14, CleaningLevel::Standard).unwrap();
    let result = predict_cases(&request).unwrap();

    assert_eq!(result.predictions.len(), 14);
    assert!(result.predictions.iter().all(|p| p.prediction >= 0.0));
    if let Some(normalized) = result.metrics.r2_normalized {
        assert!((0.0..=1.0).contains(&normalized));
    }
}

#[test]
fn test_identical_requests_produce_identical_results() {
    let request =
        PredictionRequest::new("Germany", ModelKind::GradientBoost, 10, CleaningLevel::Strict)
            .unwrap();
    let first = predict_cases(&request).unwrap();
    let second = predict_cases(&request).unwrap();

    assert_eq!(first.metrics, second.metrics);
    assert_eq!(first.predictions, second.predictions);
    assert_eq!(first.training_samples, second.training_samples);
}

#[test]
fn test_unknown_country_is_rejected_with_hints() {
    let request =
        PredictionRequest::new("Atlantis", ModelKind::Linear, 7, CleaningLevel::Standard).unwrap();
    let err = predict_cases(&request).unwrap_err();

    assert!(err.is_validation());
    match &err {
        ForecastError::UnknownCountry { sample, .. } => {
            assert!(!sample.is_empty());
            assert!(sample.len() <= 10);
        }
        other => panic!("expected UnknownCountry, got {:?}", other),
    }
}

#[test]
fn test_unsupported_model_tag_is_rejected() {
    let err =
        PredictionRequest::from_tags("Senegal", "quantum_regressor", 7, "standard").unwrap_err();
    assert!(err.is_validation());
    let message = err.to_string();
    assert!(message.contains("quantum_regressor"));
    assert!(message.contains("linear"));
    assert!(message.contains("random_forest"));
    assert!(message.contains("gradient_boost"));
}

#[rstest]
#[case(0)]
#[case(31)]
fn test_out_of_range_horizon_is_rejected(#[case] horizon: usize) {
    let err = PredictionRequest::new("Senegal", ModelKind::Linear, horizon, CleaningLevel::Standard)
        .unwrap_err();
    assert!(matches!(err, ForecastError::InvalidParameter(_)));
}

#[test]
fn test_empty_country_is_rejected() {
    let err =
        PredictionRequest::new("  ", ModelKind::Linear, 7, CleaningLevel::Standard).unwrap_err();
    assert!(matches!(err, ForecastError::InvalidParameter(_)));
}

#[test]
fn test_invalid_cleaning_tag_is_rejected() {
    let err = PredictionRequest::from_tags("Senegal", "linear", 7, "aggressive").unwrap_err();
    assert!(matches!(err, ForecastError::InvalidParameter(_)));
}

#[test]
fn test_list_countries_is_sorted_and_distinct() {
    let countries = list_countries(None).unwrap();
    assert!(countries.len() >= 10);
    assert!(countries.windows(2).all(|w| w[0] < w[1]));
    assert!(countries.iter().any(|c| c == "Senegal"));
}

#[test]
fn test_country_listing_partitions_featured_countries() {
    let listing = country_listing(None).unwrap();
    assert_eq!(
        listing.total_countries,
        listing.featured_countries.len() + listing.other_countries.len()
    );
    assert!(listing
        .featured_countries
        .iter()
        .any(|c| c.name == "Senegal"));
    // Monaco ships in the sample data but has no profile.
    assert!(listing.other_countries.iter().any(|c| c == "Monaco"));
}

#[test]
fn test_insufficient_history_is_rejected() {
    let request =
        PredictionRequest::new("Monaco", ModelKind::Linear, 7, CleaningLevel::Standard).unwrap();
    let err = predict_cases(&request).unwrap_err();
    assert!(matches!(err, ForecastError::InsufficientData { .. }));
}
