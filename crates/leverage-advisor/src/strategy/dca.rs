//! Leveraged Dollar-Cost Averaging
//!
//! Weights each DCA step by its leverage multiplier to find the effective
//! average entry price.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};
use crate::model::{EntrySummary, LeverageScheme, LeverageSchedule, PriceLadder, checked_sum};

/// Leverage-weighted average entry: `sum(price * leverage) / sum(leverage)`.
///
/// Errors instead of dividing by zero when the leverage sums to zero, and
/// instead of panicking when a product or sum leaves the `Decimal` range.
pub fn weighted_average_entry(prices: &[Decimal], leverage: &[Decimal]) -> Result<Decimal> {
    if prices.is_empty() {
        return Err(AdvisorError::EmptySeries("no prices to average".into()));
    }
    if prices.len() != leverage.len() {
        return Err(AdvisorError::LengthMismatch {
            prices: prices.len(),
            leverage: leverage.len(),
        });
    }
    if let Some(negative) = leverage.iter().find(|l| l.is_sign_negative() && !l.is_zero()) {
        return Err(AdvisorError::InvalidLeverage(format!(
            "multiplier {negative} is negative"
        )));
    }

    let total_leverage = checked_sum(leverage)
        .ok_or_else(|| AdvisorError::Overflow("leverage total exceeds Decimal range".into()))?;
    if total_leverage.is_zero() {
        return Err(AdvisorError::ZeroLeverage);
    }

    let weighted = prices
        .iter()
        .zip(leverage)
        .try_fold(Decimal::ZERO, |acc, (p, l)| acc.checked_add(p.checked_mul(*l)?))
        .ok_or_else(|| {
            AdvisorError::Overflow("price * leverage exceeds Decimal range".into())
        })?;

    weighted
        .checked_div(total_leverage)
        .ok_or_else(|| AdvisorError::Overflow("average entry exceeds Decimal range".into()))
}

/// A price ladder evaluated under several leverage schedules
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LeveragedDca {
    pub ladder: PriceLadder,
    pub schedules: Vec<LeverageSchedule>,
}

impl LeveragedDca {
    pub fn new(ladder: PriceLadder, schedules: Vec<LeverageSchedule>) -> Self {
        Self { ladder, schedules }
    }

    /// Reference ladder with the increasing, decreasing and uniform schedules
    pub fn reference() -> Self {
        Self::new(
            PriceLadder::reference(),
            LeverageScheme::ALL.into_iter().map(LeverageSchedule::reference).collect(),
        )
    }

    /// Compute the average entry for every schedule, in schedule order
    pub fn evaluate(&self) -> Result<Vec<EntrySummary>> {
        let first = self.ladder.first();

        self.schedules
            .iter()
            .map(|schedule| {
                let average_entry =
                    weighted_average_entry(self.ladder.levels(), &schedule.multipliers)?;
                let discount_pct = if first.is_zero() {
                    Decimal::ZERO
                } else {
                    first
                        .checked_sub(average_entry)
                        .and_then(|d| d.checked_div(first))
                        .and_then(|d| d.checked_mul(dec!(100)))
                        .ok_or_else(|| {
                            AdvisorError::Overflow("entry discount exceeds Decimal range".into())
                        })?
                };

                tracing::debug!(
                    scheme = schedule.scheme.label(),
                    %average_entry,
                    "computed weighted average entry"
                );

                Ok(EntrySummary {
                    scheme: schedule.scheme,
                    average_entry,
                    total_leverage: schedule.total()?,
                    discount_pct,
                })
            })
            .collect()
    }
}
