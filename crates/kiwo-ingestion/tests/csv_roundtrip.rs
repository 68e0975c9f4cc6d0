//! Load a survey from disk, score it, export it and read the export back.

use kiwo_ingestion::{export_to_file, load_table, read_exported_scores, ExportProjection};
use kiwo_ranker::{normalize_and_score, WeightConfig};
use kiwo_test_utils::{random_table, temp_csv, SAMPLE_CSV};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_sample_file_roundtrip_minimal() {
    let input = temp_csv(SAMPLE_CSV).unwrap();
    let table = load_table(input.path()).await.unwrap();
    let scored = normalize_and_score(&table, &WeightConfig::default()).unwrap();

    let out_dir = tempfile::tempdir().unwrap();
    let out_path = out_dir.path().join("gss.csv");
    export_to_file(&scored, ExportProjection::Minimal, &out_path).await.unwrap();

    let content = std::fs::read_to_string(&out_path).unwrap();
    let exported = read_exported_scores(content.as_bytes()).unwrap();

    let names: Vec<&str> = exported.iter().map(|r| r.plot_name.as_str()).collect();
    let expected: Vec<&str> = scored.rows().iter().map(|r| r.plot_name()).collect();
    assert_eq!(names, expected);
    for (row, original) in exported.iter().zip(scored.rows()) {
        assert!((row.gss - original.gss()).abs() < 1e-12);
    }
}

#[tokio::test]
async fn test_full_export_reimports_as_plot_table() {
    let input = temp_csv(SAMPLE_CSV).unwrap();
    let table = load_table(input.path()).await.unwrap();
    let scored = normalize_and_score(&table, &WeightConfig::default()).unwrap();

    let out_dir = tempfile::tempdir().unwrap();
    let out_path = out_dir.path().join("full.csv");
    export_to_file(&scored, ExportProjection::Full, &out_path).await.unwrap();

    // An export is itself a valid survey: the extra GSS/Diagnosis columns ride along.
    let reloaded = load_table(&out_path).await.unwrap();
    assert_eq!(reloaded.len(), table.len());
    assert!(reloaded.has_column("surveyor"));
    assert!(reloaded.has_column("GSS"));

    let rescored = normalize_and_score(&reloaded, &WeightConfig::default()).unwrap();
    assert_eq!(rescored.gss_values().len(), scored.len());
    for (a, b) in rescored.gss_values().iter().zip(scored.gss_values()) {
        assert!((a - b).abs() < 1e-9);
    }
    let diagnoses: Vec<_> = read_exported_scores(std::fs::read_to_string(&out_path).unwrap().as_bytes())
        .unwrap()
        .into_iter()
        .map(|r| r.diagnosis)
        .collect();
    let expected: Vec<_> = scored.rows().iter().map(|r| Some(r.diagnosis())).collect();
    assert_eq!(diagnoses, expected);
}

#[test]
fn test_random_tables_roundtrip_exactly() {
    for seed in 0..5 {
        let scored = normalize_and_score(&random_table(seed, 25), &WeightConfig::default()).unwrap();
        let csv = kiwo_ingestion::to_csv_string(&scored, ExportProjection::Minimal).unwrap();
        let exported = read_exported_scores(csv.as_bytes()).unwrap();
        let gss: Vec<f64> = exported.iter().map(|r| r.gss).collect();
        assert_eq!(gss, scored.gss_values());
    }
}

#[tokio::test]
async fn test_rescoring_an_export_can_be_exported_again() {
    let input = temp_csv(SAMPLE_CSV).unwrap();
    let scored = normalize_and_score(&load_table(input.path()).await.unwrap(), &WeightConfig::default()).unwrap();

    let out_dir = tempfile::tempdir().unwrap();
    let first = out_dir.path().join("first.csv");
    export_to_file(&scored, ExportProjection::Full, &first).await.unwrap();

    let rescored = normalize_and_score(&load_table(&first).await.unwrap(), &WeightConfig::default()).unwrap();
    let second = out_dir.path().join("second.csv");
    export_to_file(&rescored, ExportProjection::Full, &second).await.unwrap();

    let content = std::fs::read_to_string(&second).unwrap();
    let header = content.lines().next().unwrap();
    assert_eq!(header.matches("GSS").count(), 1);
    assert_eq!(header.matches("Diagnosis").count(), 1);

    let exported = read_exported_scores(content.as_bytes()).unwrap();
    assert_eq!(exported.len(), scored.len());
    for (row, original) in exported.iter().zip(scored.rows()) {
        assert_eq!(row.plot_name, original.plot_name());
        assert!((row.gss - original.gss()).abs() < 1e-9);
    }
}
