//! Charts module - Chart rendering

mod plotter;
mod renderer;

pub use plotter::{ChartPlotter, WITHOUT_INTERNET_COLOR, WITH_INTERNET_COLOR};
pub use renderer::{RenderError, StaticChartRenderer};
