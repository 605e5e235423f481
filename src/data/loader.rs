//! CSV Data Loader Module
//! Reads grade CSV files from disk and writes aggregated exports back.

use crate::data::aggregator::{
    AggregationTable, ChartSeries, FormatError, GradeAggregator, ParseStats, SummaryRow,
};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Format(#[from] FormatError),
    #[error("No data loaded")]
    NoData,
}

/// Holds the aggregation table from the most recent successful load.
pub struct DataLoader {
    aggregator: GradeAggregator,
    table: Option<AggregationTable>,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new(GradeAggregator::default())
    }
}

impl DataLoader {
    pub fn new(aggregator: GradeAggregator) -> Self {
        Self {
            aggregator,
            table: None,
            file_path: None,
        }
    }

    /// Load and aggregate a CSV file.
    ///
    /// The held table is replaced only when both reading and parsing succeed.
    pub fn load_csv(&mut self, path: impl AsRef<Path>) -> Result<ParseStats, LoaderError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Reading CSV");

        // Non UTF-8 bytes are replaced rather than rejected.
        let bytes = fs::read(path)?;
        let text = String::from_utf8_lossy(&bytes);

        let (table, stats) = GradeAggregator::parse_with_stats(&text)?;

        let unlisted = self.aggregator.unlisted_grades(&table);
        if !unlisted.is_empty() {
            debug!(?unlisted, "Grades outside the display order will not be shown");
        }
        if stats.skipped_lines > 0 {
            warn!(skipped = stats.skipped_lines, "Skipped malformed CSV rows");
        }
        info!(
            path = %path.display(),
            rows = stats.counted_rows(),
            grades = table.len(),
            "Loaded grade data"
        );

        self.table = Some(table);
        self.file_path = Some(path.to_path_buf());
        Ok(stats)
    }

    /// Write the serialized table to `path`, creating or truncating it.
    pub fn export_csv(&self, path: impl AsRef<Path>) -> Result<(), LoaderError> {
        let path = path.as_ref();
        let table = self.table.as_ref().ok_or(LoaderError::NoData)?;
        let csv = self.aggregator.serialize(table);

        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(csv.as_bytes())?;
        writer.flush()?;

        info!(path = %path.display(), bytes = csv.len(), "Exported aggregated data");
        Ok(())
    }

    pub fn has_data(&self) -> bool {
        self.table.is_some()
    }

    /// Get a reference to the loaded table.
    pub fn get_table(&self) -> Option<&AggregationTable> {
        self.table.as_ref()
    }

    /// Get file path.
    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    pub fn chart_series(&self) -> Option<ChartSeries> {
        self.table
            .as_ref()
            .map(|table| self.aggregator.build_chart_series(table))
    }

    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        self.table
            .as_ref()
            .map(|table| self.aggregator.build_summary_rows(table))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregator::GradeCounts;
    use tempfile::tempdir;

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_replaces_table() {
        let dir = tempdir().unwrap();
        let first = write_file(dir.path(), "first.csv", "Grade,Internet\nA,yes\nB,no\n");
        let second = write_file(dir.path(), "second.csv", "Grade,Internet\nC,yes\n");

        let mut loader = DataLoader::default();
        loader.load_csv(&first).unwrap();
        loader.load_csv(&second).unwrap();

        let table = loader.get_table().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("C"), Some(&GradeCounts::new(1, 0)));
        assert!(!table.contains("A"));
        assert_eq!(loader.get_file_path(), Some(&second));
    }

    #[test]
    fn test_failed_load_keeps_prior_state() {
        let dir = tempdir().unwrap();
        let good = write_file(dir.path(), "good.csv", "Grade,Internet\nA,yes\n");
        let bad = write_file(dir.path(), "bad.csv", "Grade,Score\nA,90\n");

        let mut loader = DataLoader::default();
        loader.load_csv(&good).unwrap();

        let err = loader.load_csv(&bad).unwrap_err();
        assert!(matches!(err, LoaderError::Format(FormatError::MissingColumns)));

        let err = loader.load_csv(dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, LoaderError::Io(_)));

        assert_eq!(loader.get_file_path(), Some(&good));
        assert_eq!(loader.summary_rows(), vec![SummaryRow::new("A", 1, 0)]);
    }

    #[test]
    fn test_empty_file_is_format_error() {
        let dir = tempdir().unwrap();
        let empty = write_file(dir.path(), "empty.csv", "");

        let mut loader = DataLoader::default();
        let err = loader.load_csv(&empty).unwrap_err();
        assert!(matches!(err, LoaderError::Format(FormatError::EmptyFile)));
        assert!(!loader.has_data());
    }

    #[test]
    fn test_export_writes_serialized_csv() {
        let dir = tempdir().unwrap();
        let input = write_file(
            dir.path(),
            "grades.csv",
            "Student,Grade,Internet\nAnn,B,yes\nBob,A,no\nCid,E,yes\nDee,B,yes\n",
        );
        let output = dir.path().join("AggregatedData.csv");

        let mut loader = DataLoader::default();
        loader.load_csv(&input).unwrap();
        loader.export_csv(&output).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(
            written,
            "Grade,With Internet,Without Internet\nA,0,1\nB,2,0\n"
        );
    }

    #[test]
    fn test_export_truncates_existing_file() {
        let dir = tempdir().unwrap();
        let input = write_file(dir.path(), "grades.csv", "Grade,Internet\nF,no\n");
        let output = write_file(dir.path(), "out.csv", &"x".repeat(500));

        let mut loader = DataLoader::default();
        loader.load_csv(&input).unwrap();
        loader.export_csv(&output).unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "Grade,With Internet,Without Internet\nF,0,1\n"
        );
    }

    #[test]
    fn test_export_without_data_fails() {
        let dir = tempdir().unwrap();
        let loader = DataLoader::default();
        let err = loader.export_csv(dir.path().join("out.csv")).unwrap_err();
        assert!(matches!(err, LoaderError::NoData));
        assert!(loader.chart_series().is_none());
        assert!(loader.summary_rows().is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_tolerated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.csv");
        let mut bytes = b"Name,Grade,Internet\n".to_vec();
        bytes.extend_from_slice(b"Jos\xe9,A,yes\n");
        fs::write(&path, bytes).unwrap();

        let mut loader = DataLoader::default();
        loader.load_csv(&path).unwrap();
        assert_eq!(loader.summary_rows(), vec![SummaryRow::new("A", 1, 0)]);
    }
}
