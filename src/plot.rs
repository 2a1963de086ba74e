//! Histogram rendering of intron lengths.
//!
//! Rendering is optional: it needs the `plots` feature (which pulls in
//! [`plotly`](https://docs.rs/plotly)). Without it, [`render_histogram()`] returns
//! [`IntronScanError::NoPlottingCapability`] and callers fall back to the text
//! report.

use std::path::Path;

use crate::error::IntronScanError;
use crate::Position;

/// Inputs of the length histogram: the lengths plus the mean and median to mark.
#[derive(Clone, Debug)]
pub struct HistogramData<'a> {
    pub lengths: &'a [Position],
    pub mean: f64,
    pub median: f64,
    pub bins: usize,
}

/// Renders a [`HistogramData`] to a file.
pub trait HistogramRenderer {
    fn render(&self, data: &HistogramData<'_>, output: &Path) -> Result<(), IntronScanError>;
}

/// The default renderer: an HTML histogram via plotly, if compiled in.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultRenderer;

impl HistogramRenderer for DefaultRenderer {
    fn render(&self, data: &HistogramData<'_>, output: &Path) -> Result<(), IntronScanError> {
        render_histogram(data, output)
    }
}

#[cfg(feature = "plots")]
pub fn render_histogram(data: &HistogramData<'_>, output: &Path) -> Result<(), IntronScanError> {
    use plotly::common::{DashType, Title};
    use plotly::layout::{Axis, Layout, Shape, ShapeLine, ShapeType};
    use plotly::{Histogram, Plot};

    use crate::data::operations::to_f64_vec;

    let vertical_line = |x: f64, color: &str| {
        Shape::new()
            .shape_type(ShapeType::Line)
            .x_ref("x")
            .y_ref("paper")
            .x0(x)
            .x1(x)
            .y0(0.0)
            .y1(1.0)
            .line(ShapeLine::new().color(color.to_string()).width(1.5).dash(DashType::Dash))
    };

    let trace = Histogram::new(to_f64_vec(data.lengths))
        .n_bins_x(data.bins)
        .name("Intron length");
    let layout = Layout::new()
        .title(Title::with_text("Distribution of Intron Lengths"))
        .x_axis(Axis::new().title(Title::with_text("Intron Length (bp)")))
        .y_axis(Axis::new().title(Title::with_text("Frequency")))
        .shapes(vec![
            vertical_line(data.mean, "blue"),
            vertical_line(data.median, "red"),
        ]);

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);
    plot.write_html(output);
    if output.is_file() {
        Ok(())
    } else {
        Err(IntronScanError::PlotError(format!(
            "'{}' was not written",
            output.display()
        )))
    }
}

#[cfg(not(feature = "plots"))]
pub fn render_histogram(_data: &HistogramData<'_>, _output: &Path) -> Result<(), IntronScanError> {
    Err(IntronScanError::NoPlottingCapability)
}
