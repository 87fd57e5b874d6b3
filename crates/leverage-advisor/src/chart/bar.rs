//! Categorical bar chart

use crate::error::{AdvisorError, Result};

use super::svg::{
    AXIS_PAD, Document, Frame, auto_ticks, decimals_for, ensure_finite, extent, format_tick,
};

/// Width of a bar in category units
const BAR_WIDTH: f64 = 0.8;

#[derive(Clone, Debug)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: &'static str,
}

impl Bar {
    pub fn new(label: impl Into<String>, value: f64, color: &'static str) -> Self {
        Self {
            label: label.into(),
            value,
            color,
        }
    }
}

/// Bars drawn from a zero baseline, one per category
#[derive(Clone, Debug)]
pub struct BarChart {
    pub title: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
    pub grid: bool,
    pub bars: Vec<Bar>,
}

impl BarChart {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            y_label: String::new(),
            width: 600,
            height: 500,
            grid: false,
            bars: Vec::new(),
        }
    }

    #[must_use]
    pub const fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = label.into();
        self
    }

    #[must_use]
    pub fn bar(mut self, bar: Bar) -> Self {
        self.bars.push(bar);
        self
    }

    pub fn render(&self) -> Result<String> {
        ensure_finite(&self.title, self.bars.iter().map(|b| b.value))?;
        let Some((lo, hi)) = extent(self.bars.iter().map(|b| b.value)) else {
            return Err(AdvisorError::EmptySeries(format!(
                "bar chart '{}' has no bars",
                self.title
            )));
        };

        // Bars always grow from zero, so zero stays inside the value axis
        let (lo, hi) = (lo.min(0.0), hi.max(0.0));
        let span = if hi > lo { hi - lo } else { 1.0 };
        let y_domain = match (lo < 0.0, hi > 0.0) {
            (false, false) => (0.0, 1.0),
            (below, above) => (
                if below { lo - span * AXIS_PAD } else { 0.0 },
                if above { hi + span * AXIS_PAD } else { 0.0 },
            ),
        };
        ensure_finite(&format!("{} axis range", self.title), [y_domain.0, y_domain.1])?;
        let slots = self.bars.len() as f64;
        let x_domain = (-0.6, slots - 0.4);
        let frame = Frame::new(self.width, self.height, x_domain, y_domain);

        let (ticks, step) = auto_ticks(y_domain);
        let decimals = decimals_for(step);
        let y_ticks: Vec<(f64, String)> = ticks
            .into_iter()
            .map(|v| (v, format_tick(v, decimals)))
            .collect();
        let x_ticks: Vec<(f64, String)> = self
            .bars
            .iter()
            .enumerate()
            .map(|(i, b)| (i as f64, b.label.clone()))
            .collect();

        let mut doc = Document::new(self.width, self.height);
        doc.y_ticks(&frame, &y_ticks, self.grid);
        doc.x_ticks(&frame, &x_ticks, self.grid);

        let baseline = frame.py(0.0);
        for (i, bar) in self.bars.iter().enumerate() {
            let center = i as f64;
            let left = frame.px(center - BAR_WIDTH / 2.0);
            let right = frame.px(center + BAR_WIDTH / 2.0);
            let top = frame.py(bar.value);
            let (y, h) = if top < baseline {
                (top, baseline - top)
            } else {
                (baseline, top - baseline)
            };
            doc.rect((left, y), (right - left, h), bar.color);
        }

        doc.frame_border(&frame);
        doc.title(&self.title);
        doc.y_label(&frame, &self.y_label);

        Ok(doc.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_bars() {
        let svg = BarChart::new("Average Entry Price by Leverage Sequence")
            .y_label("Average Entry Price")
            .bar(Bar::new("Increasing", 86.72, "green"))
            .bar(Bar::new("Decreasing", 93.33, "red"))
            .bar(Bar::new("Uniform", 90.0, "purple"))
            .render()
            .unwrap();

        assert!(svg.contains("Average Entry Price by Leverage Sequence"));
        for label in ["Increasing", "Decreasing", "Uniform"] {
            assert!(svg.contains(&format!(">{label}</text>")));
        }
        for color in ["green", "red", "purple"] {
            assert!(svg.contains(&format!(r#"fill="{color}""#)));
        }
        // baseline tick at zero
        assert!(svg.contains(r#"font-size="11">0</text>"#));
        assert!(!svg.contains("#b0b0b0"));
    }

    #[test]
    fn test_negative_bar_hangs_below_baseline() {
        let svg = BarChart::new("Mixed")
            .bar(Bar::new("up", 2.0, "green"))
            .bar(Bar::new("down", -1.0, "red"))
            .render()
            .unwrap();
        assert_eq!(svg.matches(r#"fill="red""#).count(), 1);
        assert!(svg.contains(r#"font-size="11">-1</text>"#));
    }

    #[test]
    fn test_range_beyond_f64_is_rejected() {
        let err = BarChart::new("Huge")
            .bar(Bar::new("max", f64::MAX, "green"))
            .bar(Bar::new("min", -f64::MAX, "red"))
            .render()
            .unwrap_err();
        assert!(matches!(err, AdvisorError::NonFinite(_)));
    }

    #[test]
    fn test_empty_bar_chart_is_an_error() {
        let err = BarChart::new("Nothing").render().unwrap_err();
        assert!(matches!(err, AdvisorError::EmptySeries(_)));
    }
}
