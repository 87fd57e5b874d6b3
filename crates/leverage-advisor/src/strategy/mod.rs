//! Entry Strategies
//!
//! Leverage-weighted DCA averaging and the synthetic drawdown sweep.

mod dca;
mod drawdown;

pub use dca::{LeveragedDca, weighted_average_entry};
pub use drawdown::{DrawdownSweep, PnlCurve, PnlModel, linspace};
