//! Data module - CSV parsing, aggregation and export

mod aggregator;
mod loader;

pub use aggregator::{
    AggregationTable, ChartSeries, ColumnIndices, FormatError, GradeAggregator, GradeCounts,
    GradeRecord, InternetAccess, ParseStats, SummaryRow, EXPORT_HEADER,
};
pub use loader::{DataLoader, LoaderError};
