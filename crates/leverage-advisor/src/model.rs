//! Domain Models
//!
//! Price ladders and leverage schedules for a leveraged DCA entry.
//! Uses `rust_decimal` for all prices and multipliers - never use f64 for money!

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};

/// Ordered price levels, one per DCA step. Never empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Decimal>", into = "Vec<Decimal>")]
pub struct PriceLadder {
    levels: Vec<Decimal>,
}

impl PriceLadder {
    pub fn new(levels: Vec<Decimal>) -> Result<Self> {
        if levels.is_empty() {
            return Err(AdvisorError::EmptySeries("price ladder has no levels".into()));
        }
        Ok(Self { levels })
    }

    /// The reference ladder: five steps from 100 down to 80
    pub fn reference() -> Self {
        Self {
            levels: vec![dec!(100), dec!(95), dec!(90), dec!(85), dec!(80)],
        }
    }

    pub fn levels(&self) -> &[Decimal] {
        &self.levels
    }

    /// Number of DCA steps
    pub fn steps(&self) -> usize {
        self.levels.len()
    }

    /// First (reference) price level
    pub fn first(&self) -> Decimal {
        self.levels[0]
    }

    /// Percentage decline of a step's price from the first level
    pub fn drawdown_pct(&self, step: usize) -> Option<Decimal> {
        let first = self.first();
        if first == Decimal::ZERO {
            return None;
        }
        let price = *self.levels.get(step)?;
        first
            .checked_sub(price)?
            .checked_div(first)?
            .checked_mul(dec!(100))
    }
}

impl TryFrom<Vec<Decimal>> for PriceLadder {
    type Error = AdvisorError;

    fn try_from(levels: Vec<Decimal>) -> Result<Self> {
        Self::new(levels)
    }
}

impl From<PriceLadder> for Vec<Decimal> {
    fn from(ladder: PriceLadder) -> Self {
        ladder.levels
    }
}

/// How leverage is distributed across the DCA steps
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeverageScheme {
    /// Light early, heavy on the deepest levels
    Increasing,
    /// Heavy early, light on the deepest levels
    Decreasing,
    /// Same multiplier at every step
    Uniform,
}

/// Dash pattern of a plotted line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    DashDot,
}

/// Point marker of a plotted line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Square,
    Triangle,
}

impl LeverageScheme {
    pub const ALL: [Self; 3] = [Self::Increasing, Self::Decreasing, Self::Uniform];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Increasing => "Increasing",
            Self::Decreasing => "Decreasing",
            Self::Uniform => "Uniform",
        }
    }

    /// Chart color (SVG named color)
    pub const fn color(self) -> &'static str {
        match self {
            Self::Increasing => "green",
            Self::Decreasing => "red",
            Self::Uniform => "purple",
        }
    }

    pub const fn line_style(self) -> LineStyle {
        match self {
            Self::Increasing => LineStyle::Solid,
            Self::Decreasing => LineStyle::Dashed,
            Self::Uniform => LineStyle::DashDot,
        }
    }

    pub const fn marker(self) -> Marker {
        match self {
            Self::Increasing => Marker::Circle,
            Self::Decreasing => Marker::Square,
            Self::Uniform => Marker::Triangle,
        }
    }
}

/// Leverage multipliers aligned index-for-index with a price ladder
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeverageSchedule {
    pub scheme: LeverageScheme,
    pub multipliers: Vec<Decimal>,
}

impl LeverageSchedule {
    pub fn new(scheme: LeverageScheme, multipliers: Vec<Decimal>) -> Self {
        Self { scheme, multipliers }
    }

    /// Reference multipliers for a five-step ladder
    pub fn reference(scheme: LeverageScheme) -> Self {
        let multipliers = match scheme {
            LeverageScheme::Increasing => vec![dec!(2), dec!(4), dec!(6), dec!(7), dec!(10)],
            LeverageScheme::Decreasing => vec![dec!(10), dec!(8), dec!(6), dec!(4), dec!(2)],
            LeverageScheme::Uniform => vec![dec!(6); 5],
        };
        Self::new(scheme, multipliers)
    }

    /// Sum of all multipliers
    pub fn total(&self) -> Result<Decimal> {
        checked_sum(&self.multipliers)
            .ok_or_else(|| AdvisorError::Overflow("leverage total exceeds Decimal range".into()))
    }
}

/// Outcome of averaging one leverage schedule over a ladder
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrySummary {
    pub scheme: LeverageScheme,

    /// Leverage-weighted average entry price
    pub average_entry: Decimal,

    /// Sum of the schedule's multipliers
    pub total_leverage: Decimal,

    /// How far the average entry sits below the first level (percentage)
    pub discount_pct: Decimal,
}

impl EntrySummary {
    /// One-line human readable summary, prices and percentages rounded to cents
    pub fn summary(&self) -> String {
        // Decimal's Display ignores width, so pad the formatted strings
        let average = format!("{:.2}", self.average_entry.round_dp(2));
        let total = self.total_leverage.to_string();
        let discount = format!("{:.2}", self.discount_pct.round_dp(2));
        format!(
            "{:<10} avg entry {average:>8}  total leverage {total:>5}  discount {discount:>5}%",
            self.scheme.label(),
        )
    }
}

/// Sum that stops at `None` instead of panicking past `Decimal::MAX`
pub(crate) fn checked_sum(values: &[Decimal]) -> Option<Decimal> {
    values
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ladder_rejected() {
        let err = PriceLadder::new(Vec::new()).unwrap_err();
        assert!(matches!(err, AdvisorError::EmptySeries(_)));
    }

    #[test]
    fn test_reference_ladder() {
        let ladder = PriceLadder::reference();
        assert_eq!(ladder.steps(), 5);
        assert_eq!(ladder.first(), dec!(100));
        assert_eq!(ladder.drawdown_pct(0), Some(dec!(0)));
        assert_eq!(ladder.drawdown_pct(4), Some(dec!(20)));
        assert_eq!(ladder.drawdown_pct(5), None);
    }

    #[test]
    fn test_reference_schedules_align_with_ladder() {
        for scheme in LeverageScheme::ALL {
            let schedule = LeverageSchedule::reference(scheme);
            assert_eq!(schedule.multipliers.len(), PriceLadder::reference().steps());
        }
        assert_eq!(LeverageSchedule::reference(LeverageScheme::Increasing).total().unwrap(), dec!(29));
        assert_eq!(LeverageSchedule::reference(LeverageScheme::Decreasing).total().unwrap(), dec!(30));
        assert_eq!(LeverageSchedule::reference(LeverageScheme::Uniform).total().unwrap(), dec!(30));
    }

    #[test]
    fn test_total_overflow_is_an_error() {
        let schedule = LeverageSchedule::new(LeverageScheme::Uniform, vec![Decimal::MAX, dec!(1)]);
        assert!(matches!(schedule.total().unwrap_err(), AdvisorError::Overflow(_)));
    }

    #[test]
    fn test_drawdown_overflow_is_none() {
        let ladder = PriceLadder::new(vec![Decimal::MAX, Decimal::MIN]).unwrap();
        assert_eq!(ladder.drawdown_pct(1), None);
    }

    #[test]
    fn test_summary_rounds_to_cents() {
        let summary = EntrySummary {
            scheme: LeverageScheme::Increasing,
            average_entry: dec!(2515) / dec!(29),
            total_leverage: dec!(29),
            discount_pct: dec!(13.2758620689655),
        };
        assert_eq!(
            summary.summary(),
            "Increasing avg entry    86.72  total leverage    29  discount 13.28%"
        );
    }

    #[test]
    fn test_scheme_styles_are_distinct() {
        let [a, b, c] = LeverageScheme::ALL;
        assert_ne!(a.color(), b.color());
        assert_ne!(b.color(), c.color());
        assert_ne!(a.marker(), c.marker());
        assert_eq!(c.line_style(), LineStyle::DashDot);
    }
}
