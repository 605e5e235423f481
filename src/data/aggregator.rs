//! Grade Aggregator Module
//! Turns grade / internet-access CSV text into per-grade counts and back.
//!
//! Parsing is deliberately naive: fields are split on commas with no quoting
//! support, and rows that cannot be read are skipped instead of failing the
//! whole file.

use crate::config::GradeOrder;
use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

/// Header line written by [`GradeAggregator::serialize`].
pub const EXPORT_HEADER: &str = "Grade,With Internet,Without Internet";

const GRADE_COLUMN_KEY: &str = "grade";
const INTERNET_COLUMN_KEY: &str = "internet";
const BYTE_ORDER_MARK: char = '\u{feff}';

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("CSV file is empty")]
    EmptyFile,
    #[error("CSV file missing required columns: Grade and/or Internet")]
    MissingColumns,
}

/// Split text into lines ending in `\n`, `\r\n` or a lone `\r`.
///
/// A trailing terminator does not produce an extra empty line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(|c: char| c == '\r' || c == '\n') {
            Some(pos) => {
                let line = &rest[..pos];
                let terminator = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[pos + terminator..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

/// Internet-access value of a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternetAccess {
    Yes,
    No,
    /// Anything other than yes/no. Counted in neither bucket.
    Unknown,
}

impl InternetAccess {
    /// Case-insensitive exact match on "yes" / "no".
    pub fn classify(value: &str) -> Self {
        if value.eq_ignore_ascii_case("yes") {
            InternetAccess::Yes
        } else if value.eq_ignore_ascii_case("no") {
            InternetAccess::No
        } else {
            InternetAccess::Unknown
        }
    }
}

/// Positions of the grade and internet columns in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndices {
    pub grade: usize,
    pub internet: usize,
}

impl ColumnIndices {
    /// Resolve columns from a header line.
    ///
    /// Each column is the first header field whose trimmed, lower-cased name
    /// contains the key substring.
    pub fn resolve(header: &str) -> Result<Self, FormatError> {
        let header = header.strip_prefix(BYTE_ORDER_MARK).unwrap_or(header);
        let names: Vec<String> = header
            .split(',')
            .map(|field| field.trim().to_lowercase())
            .collect();

        let find = |key: &str| names.iter().position(|name| name.contains(key));

        match (find(GRADE_COLUMN_KEY), find(INTERNET_COLUMN_KEY)) {
            (Some(grade), Some(internet)) => Ok(Self { grade, internet }),
            _ => Err(FormatError::MissingColumns),
        }
    }

    fn required_len(&self) -> usize {
        self.grade.max(self.internet) + 1
    }
}

/// One data row reduced to the two fields that matter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeRecord {
    pub grade: String,
    pub access: InternetAccess,
}

impl GradeRecord {
    /// Build a record from a raw line, or `None` if the line is too short or
    /// either field is blank.
    pub fn from_line(line: &str, columns: ColumnIndices) -> Option<Self> {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < columns.required_len() {
            return None;
        }

        let grade = fields[columns.grade].trim();
        let internet = fields[columns.internet].trim();
        if grade.is_empty() || internet.is_empty() {
            return None;
        }

        Some(Self {
            grade: grade.to_string(),
            access: InternetAccess::classify(internet),
        })
    }
}

/// Per-grade counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GradeCounts {
    pub with_internet: usize,
    pub without_internet: usize,
}

impl GradeCounts {
    pub fn new(with_internet: usize, without_internet: usize) -> Self {
        Self {
            with_internet,
            without_internet,
        }
    }

    fn record(&mut self, access: InternetAccess) {
        match access {
            InternetAccess::Yes => self.with_internet += 1,
            InternetAccess::No => self.without_internet += 1,
            InternetAccess::Unknown => {}
        }
    }
}

/// Grade label -> counts, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationTable {
    grades: IndexMap<String, GradeCounts>,
}

impl AggregationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one record. The grade key is created even when the access value
    /// is unknown.
    pub fn record(&mut self, record: GradeRecord) {
        self.grades
            .entry(record.grade)
            .or_default()
            .record(record.access);
    }

    pub fn get(&self, grade: &str) -> Option<&GradeCounts> {
        self.grades.get(grade)
    }

    pub fn contains(&self, grade: &str) -> bool {
        self.grades.contains_key(grade)
    }

    /// Iterate in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GradeCounts)> {
        self.grades.iter().map(|(grade, counts)| (grade.as_str(), counts))
    }

    pub fn len(&self) -> usize {
        self.grades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grades.is_empty()
    }
}

/// Bookkeeping from one parse pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseStats {
    pub columns: ColumnIndices,
    /// Lines after the header.
    pub data_lines: usize,
    /// Lines dropped for being too short or having a blank field.
    pub skipped_lines: usize,
    /// Rows whose access value was neither yes nor no.
    pub unrecognized_access: usize,
}

impl ParseStats {
    pub fn counted_rows(&self) -> usize {
        self.data_lines - self.skipped_lines
    }
}

/// Two parallel series for the stacked bar chart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartSeries {
    pub with_internet: Vec<(String, usize)>,
    pub without_internet: Vec<(String, usize)>,
}

impl ChartSeries {
    /// Grade labels along the x axis.
    pub fn grades(&self) -> Vec<String> {
        self.with_internet
            .iter()
            .map(|(grade, _)| grade.clone())
            .collect()
    }

    /// Tallest stacked bar.
    pub fn max_total(&self) -> usize {
        self.with_internet
            .iter()
            .zip(&self.without_internet)
            .map(|((_, with), (_, without))| with + without)
            .max()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.with_internet.is_empty()
    }
}

/// One line of the summary table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub grade: String,
    pub with_internet: usize,
    pub without_internet: usize,
}

impl SummaryRow {
    pub fn new(grade: impl Into<String>, with_internet: usize, without_internet: usize) -> Self {
        Self {
            grade: grade.into(),
            with_internet,
            without_internet,
        }
    }
}

/// Stateless transform between CSV text and [`AggregationTable`].
///
/// The only configuration is the [`GradeOrder`] used to filter and sort
/// everything that leaves the table.
#[derive(Debug, Clone, Default)]
pub struct GradeAggregator {
    order: GradeOrder,
}

impl GradeAggregator {
    pub fn new(order: GradeOrder) -> Self {
        Self { order }
    }

    /// Parse CSV text into a fresh table.
    pub fn parse(text: &str) -> Result<AggregationTable, FormatError> {
        Self::parse_with_stats(text).map(|(table, _)| table)
    }

    /// Parse CSV text, also reporting how many lines were skipped.
    pub fn parse_with_stats(text: &str) -> Result<(AggregationTable, ParseStats), FormatError> {
        let mut lines = split_lines(text);
        let header = lines.next().ok_or(FormatError::EmptyFile)?;
        let columns = ColumnIndices::resolve(header)?;
        debug!(
            grade_column = columns.grade,
            internet_column = columns.internet,
            "Resolved CSV columns"
        );

        let mut table = AggregationTable::new();
        let mut stats = ParseStats {
            columns,
            data_lines: 0,
            skipped_lines: 0,
            unrecognized_access: 0,
        };

        for line in lines {
            stats.data_lines += 1;
            let Some(record) = GradeRecord::from_line(line, columns) else {
                stats.skipped_lines += 1;
                continue;
            };
            if record.access == InternetAccess::Unknown {
                stats.unrecognized_access += 1;
            }
            table.record(record);
        }

        debug!(
            data_lines = stats.data_lines,
            skipped = stats.skipped_lines,
            unrecognized = stats.unrecognized_access,
            grades = table.len(),
            "Parsed grade CSV"
        );
        Ok((table, stats))
    }

    /// Grades in display order, paired with their counts.
    fn ordered<'a>(
        &'a self,
        table: &'a AggregationTable,
    ) -> impl Iterator<Item = (&'a str, &'a GradeCounts)> + 'a {
        self.order
            .iter()
            .filter_map(move |grade| table.get(grade).map(|counts| (grade, counts)))
    }

    /// Grades present in the table that no display or export path will show.
    pub fn unlisted_grades<'a>(&self, table: &'a AggregationTable) -> Vec<&'a str> {
        table
            .iter()
            .map(|(grade, _)| grade)
            .filter(|grade| !self.order.contains(grade))
            .collect()
    }

    /// Render the table as export CSV. Unlisted grades are omitted.
    pub fn serialize(&self, table: &AggregationTable) -> String {
        let mut out = String::new();
        out.push_str(EXPORT_HEADER);
        out.push('\n');
        for (grade, counts) in self.ordered(table) {
            out.push_str(&format!(
                "{},{},{}\n",
                grade, counts.with_internet, counts.without_internet
            ));
        }
        out
    }

    pub fn build_chart_series(&self, table: &AggregationTable) -> ChartSeries {
        let mut series = ChartSeries::default();
        for (grade, counts) in self.ordered(table) {
            series
                .with_internet
                .push((grade.to_string(), counts.with_internet));
            series
                .without_internet
                .push((grade.to_string(), counts.without_internet));
        }
        series
    }

    pub fn build_summary_rows(&self, table: &AggregationTable) -> Vec<SummaryRow> {
        self.ordered(table)
            .map(|(grade, counts)| {
                SummaryRow::new(grade, counts.with_internet, counts.without_internet)
            })
            .collect()
    }
}
