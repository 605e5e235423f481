//! Static Chart Renderer
//! Writes the stacked grade chart to a PNG file with plotters.
//!
//! Stacking is drawn as two histograms over the same segments: the bar
//! totals in the "without" colour first, then the "with" counts over them.

use crate::config::{
    APP_TITLE, WITHOUT_INTERNET_LABEL, WITHOUT_INTERNET_RGB, WITH_INTERNET_LABEL,
    WITH_INTERNET_RGB, X_AXIS_LABEL, Y_AXIS_LABEL,
};
use crate::data::ChartSeries;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::info;

const WITH_COLOR: RGBColor = RGBColor(WITH_INTERNET_RGB.0, WITH_INTERNET_RGB.1, WITH_INTERNET_RGB.2);
const WITHOUT_COLOR: RGBColor = RGBColor(
    WITHOUT_INTERNET_RGB.0,
    WITHOUT_INTERNET_RGB.1,
    WITHOUT_INTERNET_RGB.2,
);

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("No chart data to render")]
    NoData,
    #[error("Failed to render chart: {0}")]
    Draw(String),
}

fn draw_error<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Draw(err.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the chart to a PNG at `path`.
    pub fn render_png(
        series: &ChartSeries,
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), RenderError> {
        if series.is_empty() {
            return Err(RenderError::NoData);
        }

        let root = BitMapBackend::new(path, size).into_drawing_area();
        Self::draw(&root, series)?;
        root.present().map_err(draw_error)?;

        info!(path = %path.display(), width = size.0, height = size.1, "Saved chart image");
        Ok(())
    }

    /// Upper bound of the count axis, leaving headroom above the tallest bar.
    pub fn y_axis_top(max_total: usize) -> usize {
        (max_total + max_total.div_ceil(10)).max(max_total + 1)
    }

    fn draw<DB>(root: &DrawingArea<DB, Shift>, series: &ChartSeries) -> Result<(), RenderError>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE).map_err(draw_error)?;

        let grades = series.grades();
        let y_top = Self::y_axis_top(series.max_total());

        let mut chart = ChartBuilder::on(root)
            .caption(APP_TITLE, ("sans-serif", 30))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d((0usize..grades.len()).into_segmented(), 0usize..y_top)
            .map_err(draw_error)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(X_AXIS_LABEL)
            .y_desc(Y_AXIS_LABEL)
            .x_labels(grades.len())
            .x_label_formatter(&|segment| match segment {
                SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => {
                    grades.get(*i).cloned().unwrap_or_default()
                }
                SegmentValue::Last => String::new(),
            })
            .axis_desc_style(("sans-serif", 18))
            .draw()
            .map_err(draw_error)?;

        let totals = series
            .with_internet
            .iter()
            .zip(&series.without_internet)
            .enumerate()
            .map(|(i, ((_, with), (_, without)))| (i, with + without));
        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(WITHOUT_COLOR.filled())
                    .margin(20)
                    .data(totals),
            )
            .map_err(draw_error)?
            .label(WITHOUT_INTERNET_LABEL)
            .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], WITHOUT_COLOR.filled()));

        let with_counts = series
            .with_internet
            .iter()
            .enumerate()
            .map(|(i, (_, with))| (i, *with));
        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(WITH_COLOR.filled())
                    .margin(20)
                    .data(with_counts),
            )
            .map_err(draw_error)?
            .label(WITH_INTERNET_LABEL)
            .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], WITH_COLOR.filled()));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(draw_error)?;

        Ok(())
    }
}
