use grades_chart::data::{
    DataLoader, GradeAggregator, GradeCounts, LoaderError, SummaryRow, EXPORT_HEADER,
};
use std::fs;
use tempfile::tempdir;

const STUDENTS: &str = include_str!("fixtures/students.csv");

#[test]
fn test_full_pipeline() {
    let (table, stats) = GradeAggregator::parse_with_stats(STUDENTS).expect("Failed to parse CSV");

    assert_eq!(stats.columns.grade, 2);
    assert_eq!(stats.columns.internet, 4);
    assert_eq!(stats.data_lines, 10);
    assert_eq!(stats.skipped_lines, 2);
    assert_eq!(stats.unrecognized_access, 1);

    assert_eq!(table.get("A"), Some(&GradeCounts::new(2, 0)));
    assert_eq!(table.get("B"), Some(&GradeCounts::new(1, 1)));
    assert_eq!(table.get("E"), Some(&GradeCounts::new(1, 0)));
    assert_eq!(table.get("F"), Some(&GradeCounts::new(0, 0)));

    let aggregator = GradeAggregator::default();
    assert_eq!(
        aggregator.build_summary_rows(&table),
        vec![
            SummaryRow::new("A", 2, 0),
            SummaryRow::new("B", 1, 1),
            SummaryRow::new("C", 0, 1),
            SummaryRow::new("D", 1, 0),
            SummaryRow::new("F", 0, 0),
        ]
    );

    let series = aggregator.build_chart_series(&table);
    assert_eq!(series.grades(), vec!["A", "B", "C", "D", "F"]);
    assert_eq!(series.max_total(), 2);
}

#[test]
fn test_export_round_trip_through_files() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("students.csv");
    let output = dir.path().join("AggregatedData.csv");
    fs::write(&input, STUDENTS).unwrap();

    let mut loader = DataLoader::default();
    loader.load_csv(&input).unwrap();
    loader.export_csv(&output).unwrap();

    let exported = fs::read_to_string(&output).unwrap();
    assert_eq!(
        exported,
        format!("{}\nA,2,0\nB,1,1\nC,0,1\nD,1,0\nF,0,0\n", EXPORT_HEADER)
    );
}

#[test]
fn test_missing_file_reports_io_error() {
    let dir = tempdir().unwrap();
    let mut loader = DataLoader::default();
    let err = loader.load_csv(dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, LoaderError::Io(_)));
    assert!(loader.get_table().is_none());
}
