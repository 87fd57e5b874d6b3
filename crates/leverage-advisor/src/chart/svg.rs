//! SVG building blocks shared by the line and bar charts.

use std::fmt::Write as _;

use crate::error::{AdvisorError, Result};
use crate::model::{LineStyle, Marker};

const MARGIN_LEFT: f64 = 72.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 48.0;
const MARGIN_BOTTOM: f64 = 56.0;

/// Upper bound on ticks per axis
const MAX_TICKS: i64 = 200;

/// Fraction of the data span added on each side of an axis
pub(crate) const AXIS_PAD: f64 = 0.05;

const GRID_COLOR: &str = "#b0b0b0";
const AXIS_COLOR: &str = "#000";
const TEXT_COLOR: &str = "#222";

/// Plot area inside the canvas plus the data-to-pixel mapping
#[derive(Clone, Copy, Debug)]
pub(crate) struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    x_domain: (f64, f64),
    y_domain: (f64, f64),
}

impl Frame {
    pub(crate) fn new(
        canvas_width: u32,
        canvas_height: u32,
        x_domain: (f64, f64),
        y_domain: (f64, f64),
    ) -> Self {
        Self {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: f64::from(canvas_width) - MARGIN_LEFT - MARGIN_RIGHT,
            height: f64::from(canvas_height) - MARGIN_TOP - MARGIN_BOTTOM,
            x_domain,
            y_domain,
        }
    }

    pub(crate) fn px(&self, x: f64) -> f64 {
        let (lo, hi) = self.x_domain;
        self.left + (x - lo) / (hi - lo) * self.width
    }

    pub(crate) fn py(&self, y: f64) -> f64 {
        let (lo, hi) = self.y_domain;
        self.top + (1.0 - (y - lo) / (hi - lo)) * self.height
    }

    pub(crate) const fn left(&self) -> f64 {
        self.left
    }

    pub(crate) fn right(&self) -> f64 {
        self.left + self.width
    }

    pub(crate) const fn top(&self) -> f64 {
        self.top
    }

    pub(crate) fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub(crate) fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    pub(crate) fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Min and max of the values, or `None` when there are none
pub(crate) fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Widen a data range by [`AXIS_PAD`] on each side; flat ranges get a unit margin
pub(crate) fn padded((lo, hi): (f64, f64)) -> (f64, f64) {
    if (hi - lo).abs() < f64::EPSILON {
        let adjust = if lo == 0.0 { 1.0 } else { lo.abs() * 0.1 };
        return (lo - adjust, hi + adjust);
    }
    let pad = (hi - lo) * AXIS_PAD;
    (lo - pad, hi + pad)
}

pub(crate) fn ensure_finite(what: &str, values: impl IntoIterator<Item = f64>) -> Result<()> {
    match values.into_iter().find(|v| !v.is_finite()) {
        Some(v) => Err(AdvisorError::NonFinite(format!("{what} contains {v}"))),
        None => Ok(()),
    }
}

/// Step of 1, 2, 2.5 or 5 times a power of ten giving roughly `target` ticks
pub(crate) fn nice_step(span: f64, target: usize) -> f64 {
    let raw = span / target.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let norm = raw / magnitude;
    let factor = if norm <= 1.0 {
        1.0
    } else if norm <= 2.0 {
        2.0
    } else if norm <= 2.5 {
        2.5
    } else if norm <= 5.0 {
        5.0
    } else {
        10.0
    };
    factor * magnitude
}

/// Tick values on `step` multiples that fall inside the domain.
///
/// Empty when the domain or step is not finite or would need more than
/// [`MAX_TICKS`] ticks.
pub(crate) fn ticks_in((lo, hi): (f64, f64), step: f64) -> Vec<f64> {
    if !(lo.is_finite() && hi.is_finite() && step.is_finite() && step > 0.0) {
        return Vec::new();
    }
    let (first, last) = ((lo / step).ceil(), (hi / step).floor());
    if last - first >= MAX_TICKS as f64 {
        return Vec::new();
    }
    let (first, last) = (first as i64, last as i64);
    (first..=last)
        .map(|i| {
            let v = i as f64 * step;
            if v.abs() < step * 1e-9 { 0.0 } else { v }
        })
        .collect()
}

/// Automatic ticks for a domain
pub(crate) fn auto_ticks(domain: (f64, f64)) -> (Vec<f64>, f64) {
    let step = nice_step(domain.1 - domain.0, 6);
    (ticks_in(domain, step), step)
}

/// Fewest decimals that represent every multiple of `step` exactly
pub(crate) fn decimals_for(step: f64) -> usize {
    (0..=6)
        .find(|&d| {
            let scaled = step * 10f64.powi(d as i32);
            (scaled - scaled.round()).abs() < 1e-6
        })
        .unwrap_or(6)
}

pub(crate) fn format_tick(value: f64, decimals: usize) -> String {
    // adding zero folds -0.0 into 0.0
    format!("{:.*}", decimals, value + 0.0)
}

pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

pub(crate) const fn dash_array(style: LineStyle) -> Option<&'static str> {
    match style {
        LineStyle::Solid => None,
        LineStyle::Dashed => Some("8 4"),
        LineStyle::DashDot => Some("8 4 2 4"),
    }
}

/// Accumulates SVG markup for one figure
pub(crate) struct Document {
    body: String,
    width: u32,
    height: u32,
}

impl Document {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        let mut body = String::new();
        let _ = write!(
            body,
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}"><style>text{{font-family:DejaVu Sans,Arial,sans-serif;fill:{TEXT_COLOR}}}</style><rect width="100%" height="100%" fill="#fff" />"##
        );
        Self { body, width, height }
    }

    pub(crate) fn title(&mut self, title: &str) {
        let _ = write!(
            self.body,
            r#"<text x="{x:.2}" y="28" text-anchor="middle" font-size="16">{title}</text>"#,
            x = f64::from(self.width) / 2.0,
            title = escape(title)
        );
    }

    pub(crate) fn x_label(&mut self, frame: &Frame, label: &str) {
        let _ = write!(
            self.body,
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle" font-size="12">{label}</text>"#,
            x = frame.center_x(),
            y = f64::from(self.height) - 14.0,
            label = escape(label)
        );
    }

    pub(crate) fn y_label(&mut self, frame: &Frame, label: &str) {
        let _ = write!(
            self.body,
            r#"<text x="18" y="{y:.2}" text-anchor="middle" font-size="12" transform="rotate(-90 18 {y:.2})">{label}</text>"#,
            y = frame.center_y(),
            label = escape(label)
        );
    }

    /// Vertical grid line and tick label at each x value
    pub(crate) fn x_ticks(&mut self, frame: &Frame, ticks: &[(f64, String)], grid: bool) {
        for (value, label) in ticks {
            let x = frame.px(*value);
            if grid {
                self.line((x, frame.top()), (x, frame.bottom()), GRID_COLOR, 0.8, None);
            }
            self.line((x, frame.bottom()), (x, frame.bottom() + 4.0), AXIS_COLOR, 1.0, None);
            let _ = write!(
                self.body,
                r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle" font-size="11">{label}</text>"#,
                y = frame.bottom() + 18.0,
                label = escape(label)
            );
        }
    }

    /// Horizontal grid line and tick label at each y value
    pub(crate) fn y_ticks(&mut self, frame: &Frame, ticks: &[(f64, String)], grid: bool) {
        for (value, label) in ticks {
            let y = frame.py(*value);
            if grid {
                self.line((frame.left(), y), (frame.right(), y), GRID_COLOR, 0.8, None);
            }
            self.line((frame.left() - 4.0, y), (frame.left(), y), AXIS_COLOR, 1.0, None);
            let _ = write!(
                self.body,
                r#"<text x="{x:.2}" y="{y:.2}" text-anchor="end" font-size="11">{label}</text>"#,
                x = frame.left() - 8.0,
                y = y + 4.0,
                label = escape(label)
            );
        }
    }

    pub(crate) fn frame_border(&mut self, frame: &Frame) {
        let _ = write!(
            self.body,
            r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" fill="none" stroke="{AXIS_COLOR}" stroke-width="1" />"#,
            x = frame.left(),
            y = frame.top(),
            w = frame.right() - frame.left(),
            h = frame.bottom() - frame.top()
        );
    }

    pub(crate) fn line(
        &mut self,
        (x1, y1): (f64, f64),
        (x2, y2): (f64, f64),
        color: &str,
        width: f64,
        dash: Option<&str>,
    ) {
        let _ = write!(
            self.body,
            r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" stroke="{color}" stroke-width="{width}"{dash} />"#,
            dash = dash_attr(dash)
        );
    }

    pub(crate) fn polyline(&mut self, points: &[(f64, f64)], color: &str, dash: Option<&str>) {
        let coords = points
            .iter()
            .map(|(x, y)| format!("{x:.2},{y:.2}"))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = write!(
            self.body,
            r#"<polyline fill="none" stroke="{color}" stroke-width="1.5" stroke-linejoin="round"{dash} points="{coords}" />"#,
            dash = dash_attr(dash)
        );
    }

    pub(crate) fn marker(&mut self, marker: Marker, (x, y): (f64, f64), color: &str) {
        let _ = match marker {
            Marker::Circle => write!(
                self.body,
                r#"<circle cx="{x:.2}" cy="{y:.2}" r="4" fill="{color}" />"#
            ),
            Marker::Square => write!(
                self.body,
                r#"<rect x="{x:.2}" y="{y:.2}" width="8" height="8" fill="{color}" />"#,
                x = x - 4.0,
                y = y - 4.0
            ),
            Marker::Triangle => write!(
                self.body,
                r#"<polygon points="{x:.2},{top:.2} {l:.2},{b:.2} {r:.2},{b:.2}" fill="{color}" />"#,
                top = y - 5.0,
                b = y + 4.0,
                l = x - 5.0,
                r = x + 5.0
            ),
        };
    }

    pub(crate) fn rect(&mut self, (x, y): (f64, f64), (w, h): (f64, f64), color: &str) {
        let _ = write!(
            self.body,
            r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" fill="{color}" />"#
        );
    }

    /// Boxed legend in the top-right corner of the plot area
    pub(crate) fn legend(&mut self, frame: &Frame, entries: &[LegendEntry<'_>]) {
        if entries.is_empty() {
            return;
        }

        let longest = entries.iter().map(|e| e.label.chars().count()).max().unwrap_or(0);
        let width = longest as f64 * 7.0 + 48.0;
        let height = entries.len() as f64 * 18.0 + 8.0;
        let x = frame.right() - width - 10.0;
        let y = frame.top() + 10.0;

        let _ = write!(
            self.body,
            r##"<rect x="{x:.2}" y="{y:.2}" width="{width:.2}" height="{height:.2}" fill="#fff" fill-opacity="0.8" stroke="#ccc" rx="3" />"##
        );

        for (i, entry) in entries.iter().enumerate() {
            let row = y + 13.0 + i as f64 * 18.0;
            let dash = dash_array(entry.style);
            self.line((x + 8.0, row), (x + 32.0, row), entry.color, 1.5, dash);
            if let Some(marker) = entry.marker {
                self.marker(marker, (x + 20.0, row), entry.color);
            }
            let _ = write!(
                self.body,
                r#"<text x="{tx:.2}" y="{ty:.2}" font-size="11">{label}</text>"#,
                tx = x + 40.0,
                ty = row + 4.0,
                label = escape(entry.label)
            );
        }
    }

    pub(crate) fn finish(mut self) -> String {
        self.body.push_str("</svg>");
        self.body
    }
}

pub(crate) struct LegendEntry<'a> {
    pub(crate) label: &'a str,
    pub(crate) color: &'a str,
    pub(crate) style: LineStyle,
    pub(crate) marker: Option<Marker>,
}

fn dash_attr(dash: Option<&str>) -> String {
    dash.map(|d| format!(r#" stroke-dasharray="{d}""#))
        .unwrap_or_default()
}
