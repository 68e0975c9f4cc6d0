//! End-to-end scoring of plot tables through the public pipeline API.

use kiwo_common::schema::{GRAZING_PRESSURE, SHRUB_PERCENT};
use kiwo_common::{MissingCell, PlotTable, ValidationError};
use kiwo_ranker::{normalize_and_score, Diagnosis, WeightConfig, CONSTANT_COLUMN_FALLBACK};
use kiwo_test_utils::pretty_assertions::assert_eq;
use kiwo_test_utils::{random_table, sample_table, table_from_rows};

#[test]
fn test_sample_survey_diagnoses() {
    let scored = normalize_and_score(&sample_table(), &WeightConfig::default()).unwrap();
    assert!(!scored.is_failed());

    let diagnoses: Vec<(&str, Diagnosis)> = scored
        .rows()
        .iter()
        .map(|r| (r.plot_name(), r.diagnosis()))
        .collect();
    assert_eq!(
        diagnoses,
        vec![
            ("Kofar Gabas", Diagnosis::HighlySuitable),
            ("Dutsen Rafi", Diagnosis::TooMuchShrubCover),
            ("Rijiyar Lemo", Diagnosis::ModeratelySuitable),
            ("Tudun Wada", Diagnosis::TooMuchShrubCover),
            ("Gidan Dan Hausa", Diagnosis::HighlySuitable),
            ("Sabon Gari", Diagnosis::ModeratelySuitable),
        ]
    );

    let best = scored.top(1)[0];
    assert_eq!(best.plot_name(), "Gidan Dan Hausa");
    assert!((best.gss() - 1.0).abs() < 1e-9);
    assert_eq!(scored.bottom(1)[0].plot_name(), "Tudun Wada");
}

#[test]
fn test_locations_and_extras_survive_scoring() {
    let scored = normalize_and_score(&sample_table(), &WeightConfig::default()).unwrap();
    let kofar = scored.find_plot("Kofar Gabas").unwrap();
    assert!(kofar.record.location.is_some());
    assert_eq!(kofar.record.cell_text("surveyor").as_deref(), Some("Aisha"));
    assert!(scored.find_plot("Gidan Dan Hausa").unwrap().record.location.is_none());
    assert_eq!(scored.columns.last().map(String::as_str), Some("surveyor"));
}

#[test]
fn test_output_order_mirrors_input() {
    let table = random_table(42, 50);
    let scored = normalize_and_score(&table, &WeightConfig::default()).unwrap();
    let names: Vec<String> = scored.rows().iter().map(|r| r.plot_name().to_string()).collect();
    let expected: Vec<String> = (0..50).map(|i| format!("Plot {i}")).collect();
    assert_eq!(names, expected);
}

#[test]
fn test_gss_in_unit_interval_for_random_tables() {
    let weight_sets = [
        WeightConfig::default(),
        WeightConfig::new(0.25, 0.25, 0.25, 0.25),
        WeightConfig::new(0.1, 0.6, 0.2, 0.1),
    ];
    for seed in 0..20 {
        let table = random_table(seed, 1 + seed as usize * 3);
        for weights in &weight_sets {
            let scored = normalize_and_score(&table, weights).unwrap();
            for gss in scored.gss_values() {
                assert!((-1e-12..=1.0 + 1e-12).contains(&gss), "seed {seed}: GSS {gss}");
            }
        }
    }
}

#[test]
fn test_two_rows_biomass_only() {
    let table = table_from_rows(&[("A", 10.0, 3.0, 1.0, 9.0), ("B", 20.0, 8.0, 2.0, 4.0)]);
    let scored = normalize_and_score(&table, &WeightConfig::new(1.0, 0.0, 0.0, 0.0)).unwrap();
    let normalised: Vec<f64> = scored.rows().iter().map(|r| r.score.normalized.biomass).collect();
    assert_eq!(normalised, vec![0.0, 1.0]);
    assert_eq!(scored.gss_values(), vec![0.0, 1.0]);
}

#[test]
fn test_single_row_uses_fallback() {
    let table = table_from_rows(&[("Only", 55.0, 20.0, 1.5, 12.0)]);
    let scored = normalize_and_score(&table, &WeightConfig::default()).unwrap();
    let row = &scored.rows()[0];
    assert_eq!(row.score.normalized.as_array(), [CONSTANT_COLUMN_FALLBACK; 4]);
    let expected = 0.4 * CONSTANT_COLUMN_FALLBACK + 3.0 * 0.2 * (1.0 - CONSTANT_COLUMN_FALLBACK);
    assert!((row.gss() - expected).abs() < 1e-12);
}

#[test]
fn test_missing_shrub_column() {
    let table = PlotTable::new(["Plot Name", "available_biomass", "grazing_pressure", "total woody count"])
        .with_row(["A", "1", "2", "3"]);
    let err = normalize_and_score(&table, &WeightConfig::default()).unwrap_err();
    assert_eq!(err.missing_columns(), &[SHRUB_PERCENT.to_string()]);
    assert!(err.to_string().contains("Shrub %"));
}

#[test]
fn test_null_grazing_value_is_validation_error() {
    let mut table = table_from_rows(&[("A", 1.0, 2.0, 3.0, 4.0)]);
    table.push_row(vec![
        Some("B".to_string()),
        Some("5".to_string()),
        Some("6".to_string()),
        None,
        Some("8".to_string()),
    ]);
    let err = normalize_and_score(&table, &WeightConfig::default()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::MissingValues(vec![MissingCell {
            row: 1,
            column: GRAZING_PRESSURE.to_string(),
        }])
    );
}

#[test]
fn test_each_run_gets_its_own_id() {
    let table = sample_table();
    let a = normalize_and_score(&table, &WeightConfig::default()).unwrap();
    let b = normalize_and_score(&table, &WeightConfig::default()).unwrap();
    assert_ne!(a.run_id, b.run_id);
    assert_eq!(a.gss_values(), b.gss_values());
}
