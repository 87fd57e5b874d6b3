//! Multi-series line chart

use crate::error::{AdvisorError, Result};
use crate::model::{LineStyle, Marker};

use super::svg::{
    Document, Frame, LegendEntry, auto_ticks, dash_array, decimals_for, ensure_finite, extent,
    format_tick, padded, ticks_in,
};

/// One plotted line
#[derive(Clone, Debug)]
pub struct LineSeries {
    pub label: String,
    pub color: &'static str,
    pub style: LineStyle,
    pub marker: Option<Marker>,
    pub points: Vec<(f64, f64)>,
}

impl LineSeries {
    pub fn new(label: impl Into<String>, color: &'static str, points: Vec<(f64, f64)>) -> Self {
        Self {
            label: label.into(),
            color,
            style: LineStyle::Solid,
            marker: None,
            points,
        }
    }

    /// Plot `values` against their index (0, 1, 2, ...)
    pub fn indexed(label: impl Into<String>, color: &'static str, values: &[f64]) -> Self {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v))
            .collect();
        Self::new(label, color, points)
    }

    #[must_use]
    pub const fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub const fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }
}

/// How x-axis ticks are placed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum XTicks {
    /// One tick per whole number, for step-indexed data
    Steps,
    /// Nice-number ticks
    #[default]
    Auto,
}

/// Line chart with title, axis labels, optional grid and legend
#[derive(Clone, Debug)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
    pub x_ticks: XTicks,
    pub grid: bool,
    pub legend: bool,
    pub series: Vec<LineSeries>,
}

impl LineChart {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            width: 800,
            height: 500,
            x_ticks: XTicks::Auto,
            grid: true,
            legend: true,
            series: Vec::new(),
        }
    }

    #[must_use]
    pub const fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn axis_labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_label = x.into();
        self.y_label = y.into();
        self
    }

    #[must_use]
    pub const fn x_ticks(mut self, ticks: XTicks) -> Self {
        self.x_ticks = ticks;
        self
    }

    #[must_use]
    pub fn series(mut self, series: LineSeries) -> Self {
        self.series.push(series);
        self
    }

    /// Render the chart as a standalone SVG document
    pub fn render(&self) -> Result<String> {
        let points = || self.series.iter().flat_map(|s| s.points.iter().copied());

        ensure_finite(&self.title, points().flat_map(|(x, y)| [x, y]))?;
        let (Some(xs), Some(ys)) = (extent(points().map(|p| p.0)), extent(points().map(|p| p.1)))
        else {
            return Err(AdvisorError::EmptySeries(format!(
                "line chart '{}' has no points",
                self.title
            )));
        };

        let x_domain = padded(xs);
        let y_domain = padded(ys);
        ensure_finite(
            &format!("{} axis range", self.title),
            [x_domain.0, x_domain.1, y_domain.0, y_domain.1],
        )?;
        let frame = Frame::new(self.width, self.height, x_domain, y_domain);

        // too many steps for one tick each falls back to nice ticks
        let step_ticks = match self.x_ticks {
            XTicks::Steps => ticks_in(x_domain, 1.0),
            XTicks::Auto => Vec::new(),
        };
        let x_ticks = if step_ticks.is_empty() {
            labelled(auto_ticks(x_domain))
        } else {
            step_ticks
                .into_iter()
                .map(|v| (v, format_tick(v, 0)))
                .collect()
        };
        let y_ticks = labelled(auto_ticks(y_domain));

        let mut doc = Document::new(self.width, self.height);
        doc.x_ticks(&frame, &x_ticks, self.grid);
        doc.y_ticks(&frame, &y_ticks, self.grid);

        for series in &self.series {
            let pixels: Vec<(f64, f64)> = series
                .points
                .iter()
                .map(|&(x, y)| (frame.px(x), frame.py(y)))
                .collect();
            doc.polyline(&pixels, series.color, dash_array(series.style));
            if let Some(marker) = series.marker {
                for &p in &pixels {
                    doc.marker(marker, p, series.color);
                }
            }
        }

        doc.frame_border(&frame);
        doc.title(&self.title);
        doc.x_label(&frame, &self.x_label);
        doc.y_label(&frame, &self.y_label);

        if self.legend {
            let entries: Vec<LegendEntry<'_>> = self
                .series
                .iter()
                .filter(|s| !s.label.is_empty())
                .map(|s| LegendEntry {
                    label: &s.label,
                    color: s.color,
                    style: s.style,
                    marker: s.marker,
                })
                .collect();
            doc.legend(&frame, &entries);
        }

        Ok(doc.finish())
    }
}

fn labelled((ticks, step): (Vec<f64>, f64)) -> Vec<(f64, String)> {
    let decimals = decimals_for(step);
    ticks
        .into_iter()
        .map(|v| (v, format_tick(v, decimals)))
        .collect()
}
