//! Student Grades vs Internet Access
//!
//! Loads a CSV of student grades and internet-access status, counts students
//! per grade, and shows the result as a stacked bar chart and summary table.
//! The aggregated counts can be exported back to CSV.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
