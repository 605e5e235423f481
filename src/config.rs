//! Application Configuration
//! Window layout, chart labels, export defaults and the canonical grade order.

/// Window and chart title.
pub const APP_TITLE: &str = "Student Grades vs Internet Access";
pub const WINDOW_SIZE: [f32; 2] = [900.0, 600.0];
pub const MIN_WINDOW_SIZE: [f32; 2] = [640.0, 420.0];

/// Share of the central panel height given to the chart (rest goes to the table).
pub const CHART_HEIGHT_RATIO: f32 = 0.75;

pub const X_AXIS_LABEL: &str = "Grade";
pub const Y_AXIS_LABEL: &str = "Number of Students";
pub const WITH_INTERNET_LABEL: &str = "With Internet";
pub const WITHOUT_INTERNET_LABEL: &str = "Without Internet";

/// Series colours shared by the on-screen chart and the PNG export.
pub const WITH_INTERNET_RGB: (u8, u8, u8) = (52, 152, 219); // Blue
pub const WITHOUT_INTERNET_RGB: (u8, u8, u8) = (231, 76, 60); // Red

pub const DEFAULT_EXPORT_NAME: &str = "AggregatedData.csv";
pub const DEFAULT_CHART_IMAGE_NAME: &str = "GradesChart.png";
pub const CHART_IMAGE_SIZE: (u32, u32) = (1200, 800);

/// Log filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Grades shown in the chart, the summary table and the export, in this order.
pub const CANONICAL_GRADE_ORDER: [&str; 5] = ["A", "B", "C", "D", "F"];

/// Ordered grade list acting as both sort order and inclusion filter.
///
/// Grades absent from the list are still counted while parsing, but never
/// reach any display or export path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeOrder {
    grades: Vec<String>,
}

impl Default for GradeOrder {
    fn default() -> Self {
        Self::canonical()
    }
}

impl GradeOrder {
    /// The fixed `A, B, C, D, F` order.
    pub fn canonical() -> Self {
        Self::new(CANONICAL_GRADE_ORDER)
    }

    pub fn new<I, S>(grades: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            grades: grades.into_iter().map(Into::into).collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.grades.iter().map(String::as_str)
    }

    /// Case-sensitive membership test.
    pub fn contains(&self, grade: &str) -> bool {
        self.grades.iter().any(|g| g == grade)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        let order = GradeOrder::canonical();
        let grades: Vec<&str> = order.iter().collect();
        assert_eq!(grades, vec!["A", "B", "C", "D", "F"]);
        assert_eq!(order, GradeOrder::default());
    }

    #[test]
    fn test_contains_is_case_sensitive() {
        let order = GradeOrder::canonical();
        assert!(order.contains("A"));
        assert!(!order.contains("a"));
        assert!(!order.contains("E"));
    }
}
