//! Research Report
//!
//! Renders the four leveraged-DCA charts into the output directory.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::chart::{self, Bar, BarChart, LineChart, LineSeries, XTicks};
use crate::error::{AdvisorError, Result};
use crate::model::{EntrySummary, LeverageSchedule, Marker, PriceLadder};
use crate::strategy::{DrawdownSweep, LeveragedDca};

pub const DCA_LEVELS_FILE: &str = "placeholder_dca_levels.svg";
pub const LEVERAGE_ALLOCATION_FILE: &str = "placeholder_leverage_allocation.svg";
pub const AVG_ENTRY_FILE: &str = "placeholder_avg_entry.svg";
pub const PNL_CHART_FILE: &str = "placeholder_pl_chart.svg";

/// Report configuration
#[derive(Clone, Debug)]
pub struct ReportConfig {
    /// Directory the charts are written into
    pub output_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}

impl ReportConfig {
    /// Read `DCA_REPORT_DIR` from the process environment.
    ///
    /// The binary loads `.env` before calling this.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank values fall back to `.`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let output_dir = lookup("DCA_REPORT_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map_or_else(|| PathBuf::from("."), PathBuf::from);

        Self { output_dir }
    }

    pub fn path_for(&self, file: &str) -> PathBuf {
        self.output_dir.join(file)
    }
}

/// What a report run produced
#[derive(Clone, Debug)]
pub struct ReportOutcome {
    pub summaries: Vec<EntrySummary>,
    pub files: Vec<PathBuf>,
}

/// Compute the reference averages and render all four charts
pub fn generate(config: &ReportConfig) -> Result<ReportOutcome> {
    let dca = LeveragedDca::reference();
    let summaries = dca.evaluate()?;
    let sweep = DrawdownSweep::reference();

    let files = vec![
        config.path_for(DCA_LEVELS_FILE),
        config.path_for(LEVERAGE_ALLOCATION_FILE),
        config.path_for(AVG_ENTRY_FILE),
        config.path_for(PNL_CHART_FILE),
    ];

    render_dca_levels(&dca.ladder, &files[0])?;
    render_leverage_allocation(&dca.schedules, &files[1])?;
    render_average_entry(&summaries, &files[2])?;
    render_pnl_vs_drawdown(&sweep, &files[3])?;

    Ok(ReportOutcome { summaries, files })
}

/// Price per DCA step
pub fn render_dca_levels(ladder: &PriceLadder, path: &Path) -> Result<()> {
    for (step, price) in ladder.levels().iter().enumerate() {
        if let Some(drawdown) = ladder.drawdown_pct(step) {
            tracing::debug!(step, %price, %drawdown, "dca level");
        }
    }

    let svg = LineChart::new("DCA Levels vs Drawdown")
        .size(800, 500)
        .axis_labels("DCA Step", "Price")
        .x_ticks(XTicks::Steps)
        .series(
            LineSeries::indexed("DCA Price", "blue", &to_f64s(ladder.levels())?)
                .with_marker(Marker::Circle),
        )
        .render()?;
    chart::save(&svg, path)
}

/// Leverage multiplier per DCA step, one line per schedule
pub fn render_leverage_allocation(schedules: &[LeverageSchedule], path: &Path) -> Result<()> {
    let mut chart = LineChart::new("Leverage Allocation Across DCA Steps")
        .size(800, 500)
        .axis_labels("DCA Step", "Leverage")
        .x_ticks(XTicks::Steps);

    for schedule in schedules {
        let scheme = schedule.scheme;
        chart = chart.series(
            LineSeries::indexed(
                format!("{} Leverage", scheme.label()),
                scheme.color(),
                &to_f64s(&schedule.multipliers)?,
            )
            .with_style(scheme.line_style())
            .with_marker(scheme.marker()),
        );
    }

    chart::save(&chart.render()?, path)
}

/// One bar per scheme showing its weighted average entry
pub fn render_average_entry(summaries: &[EntrySummary], path: &Path) -> Result<()> {
    let mut chart = BarChart::new("Average Entry Price by Leverage Sequence")
        .size(600, 500)
        .y_label("Average Entry Price");

    for summary in summaries {
        chart = chart.bar(Bar::new(
            summary.scheme.label(),
            to_f64(summary.average_entry)?,
            summary.scheme.color(),
        ));
    }

    chart::save(&chart.render()?, path)
}

/// Simulated P/L against market drawdown, both in percent
pub fn render_pnl_vs_drawdown(sweep: &DrawdownSweep, path: &Path) -> Result<()> {
    let xs = sweep.drawdowns_pct();
    let mut chart = LineChart::new("Simulated P/L vs Market Drawdown")
        .size(800, 500)
        .axis_labels("Market Drawdown (%)", "P/L (%)");

    for curve in &sweep.curves {
        let points = xs
            .iter()
            .zip(&curve.pnl)
            .map(|(&x, &pnl)| (x, pnl * 100.0))
            .collect();
        chart = chart.series(
            LineSeries::new(
                format!("{} Leverage", curve.scheme.label()),
                curve.scheme.color(),
                points,
            ),
        );
    }

    chart::save(&chart.render()?, path)
}

fn to_f64(value: Decimal) -> Result<f64> {
    value
        .to_f64()
        .ok_or_else(|| AdvisorError::NonFinite(format!("{value} does not fit in f64")))
}

fn to_f64s(values: &[Decimal]) -> Result<Vec<f64>> {
    values.iter().copied().map(to_f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LeverageScheme;
    use rust_decimal_macros::dec;

    fn read(path: &Path) -> String {
        std::fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_generate_writes_four_charts() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig {
            output_dir: dir.path().to_path_buf(),
        };

        let outcome = generate(&config).unwrap();
        assert_eq!(outcome.summaries.len(), 3);
        assert_eq!(outcome.files.len(), 4);

        for file in [DCA_LEVELS_FILE, LEVERAGE_ALLOCATION_FILE, AVG_ENTRY_FILE, PNL_CHART_FILE] {
            let path = dir.path().join(file);
            let metadata = std::fs::metadata(&path).unwrap();
            assert!(metadata.len() > 0, "{file} is empty");
            assert!(read(&path).starts_with("<svg"));
        }
    }

    #[test]
    fn test_dca_levels_chart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DCA_LEVELS_FILE);
        render_dca_levels(&PriceLadder::reference(), &path).unwrap();

        let svg = read(&path);
        assert!(svg.contains("DCA Levels vs Drawdown"));
        assert!(svg.contains("DCA Price"));
        assert!(svg.contains(r#"stroke="blue""#));
    }

    #[test]
    fn test_leverage_allocation_chart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LEVERAGE_ALLOCATION_FILE);
        let schedules: Vec<_> = LeverageScheme::ALL
            .into_iter()
            .map(LeverageSchedule::reference)
            .collect();
        render_leverage_allocation(&schedules, &path).unwrap();

        let svg = read(&path);
        for label in ["Increasing Leverage", "Decreasing Leverage", "Uniform Leverage"] {
            assert!(svg.contains(label));
        }
        assert_eq!(svg.matches("<polyline").count(), 3);
        assert!(svg.contains("<polygon"));
    }

    #[test]
    fn test_average_entry_chart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(AVG_ENTRY_FILE);
        let summaries = LeveragedDca::reference().evaluate().unwrap();
        render_average_entry(&summaries, &path).unwrap();

        let svg = read(&path);
        assert!(svg.contains(r#"width="600""#));
        assert!(svg.contains("Average Entry Price"));
        assert!(svg.contains(r#"fill="purple""#));
    }

    #[test]
    fn test_pnl_chart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PNL_CHART_FILE);
        render_pnl_vs_drawdown(&DrawdownSweep::reference(), &path).unwrap();

        let svg = read(&path);
        assert!(svg.contains("Simulated P/L vs Market Drawdown"));
        assert!(svg.contains("Market Drawdown (%)"));
        assert!(!svg.contains("<circle"));
    }

    #[test]
    fn test_existing_file_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DCA_LEVELS_FILE);
        std::fs::write(&path, "stale").unwrap();

        render_dca_levels(&PriceLadder::reference(), &path).unwrap();
        assert!(!read(&path).contains("stale"));
    }

    #[test]
    fn test_unwritable_destination_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(AVG_ENTRY_FILE);
        let summaries = vec![EntrySummary {
            scheme: LeverageScheme::Uniform,
            average_entry: dec!(90),
            total_leverage: dec!(30),
            discount_pct: dec!(10),
        }];

        let err = render_average_entry(&summaries, &path).unwrap_err();
        assert!(matches!(err, AdvisorError::Io { .. }));
        assert!(!err.is_input_error());
        assert!(!path.exists());
    }

    #[test]
    fn test_every_renderer_reports_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-dir");
        let dca = LeveragedDca::reference();

        assert!(render_dca_levels(&dca.ladder, &missing.join("a.svg")).is_err());
        assert!(render_leverage_allocation(&dca.schedules, &missing.join("b.svg")).is_err());
        assert!(render_pnl_vs_drawdown(&DrawdownSweep::reference(), &missing.join("c.svg")).is_err());
    }

    #[test]
    fn test_config_from_lookup() {
        let config = ReportConfig::from_lookup(|key| {
            (key == "DCA_REPORT_DIR").then(|| "/tmp/dca-charts".to_string())
        });
        assert_eq!(config.output_dir, PathBuf::from("/tmp/dca-charts"));
        assert_eq!(
            config.path_for(AVG_ENTRY_FILE),
            Path::new("/tmp/dca-charts").join(AVG_ENTRY_FILE)
        );

        let blank = ReportConfig::from_lookup(|_| Some("   ".to_string()));
        assert_eq!(blank.output_dir, PathBuf::from("."));

        let unset = ReportConfig::from_lookup(|_| None);
        assert_eq!(unset.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_config_paths() {
        let config = ReportConfig::default();
        assert_eq!(config.path_for(PNL_CHART_FILE), Path::new(".").join(PNL_CHART_FILE));
    }
}
