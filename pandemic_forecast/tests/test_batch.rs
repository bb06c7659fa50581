use country_data::{profiles, ModelKind};
use pandemic_forecast::batch::predict_all;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_batch_covers_every_configured_country() {
    let batch = predict_all(ModelKind::Linear, 7, None).unwrap();

    assert_eq!(batch.summary.total_countries, 10);
    assert_eq!(batch.summary.african_countries, 5);
    assert_eq!(batch.summary.other_countries, 5);
    assert_eq!(batch.summary.model_type, ModelKind::Linear);
    assert_eq!(batch.summary.horizon_days, 7);

    // The sample dataset carries enough history for every configured country.
    assert!(batch.failures.is_empty(), "failures: {:?}", batch.failures);
    assert_eq!(batch.predictions_by_country.len(), 10);

    for (country, result) in &batch.predictions_by_country {
        assert_eq!(result.predictions.len(), 7);
        // The fan-out path prefers each country's recommended model over the
        // caller-supplied default.
        let recommended = profiles().get(country.as_str()).unwrap().recommended_model;
        assert_eq!(result.model_type, recommended);
    }
}

#[test]
fn test_one_failing_country_does_not_abort_the_batch() {
    // A dataset that only has history for two configured countries: every
    // other country fails its gate while the batch keeps going.
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "location,date,new_cases,new_deaths,new_vaccinations,stringency_index,total_cases,total_deaths"
    )
    .unwrap();
    for country in ["Senegal", "France"] {
        for day in 0..60 {
            writeln!(
                file,
                "{},2021-{:02}-{:02},{}.0,2.0,100.0,55.0,1000.0,20.0",
                country,
                1 + day / 28,
                1 + day % 28,
                50 + (day * 7) % 40
            )
            .unwrap();
        }
    }

    let batch = predict_all(ModelKind::Linear, 7, Some(file.path())).unwrap();

    assert_eq!(batch.predictions_by_country.len(), 2);
    assert!(batch.predictions_by_country.contains_key("Senegal"));
    assert!(batch.predictions_by_country.contains_key("France"));

    assert_eq!(batch.failures.len(), 8);
    for failure in &batch.failures {
        assert!(!failure.error.is_empty());
    }
}
