//! # leverage-advisor
//!
//! Weighted-average entry analysis for a leveraged dollar-cost-averaging
//! ladder, plus the static charts that summarize it.
//!
//! ## How leverage moves the entry
//!
//! Each DCA step is weighted by its leverage multiplier:
//!
//! ```text
//! avg_entry = sum(price_i * leverage_i) / sum(leverage_i)
//! ```
//!
//! ## Reference ladder: 100 → 80 in five steps
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Scheme       Leverage              Avg entry   Discount │
//! ├──────────────────────────────────────────────────────────┤
//! │  Increasing   2  4  6  7  10          86.72      13.28%  │
//! │  Uniform      6  6  6  6  6           90.00      10.00%  │
//! │  Decreasing   10 8  6  4  2           93.33       6.67%  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Loading the deepest levels hardest gives the lowest entry, at the cost of
//! carrying the most leverage when the market is furthest down.

pub mod chart;
pub mod error;
pub mod model;
pub mod report;
pub mod strategy;

pub use error::{AdvisorError, Result};
pub use model::{EntrySummary, LeverageSchedule, LeverageScheme, PriceLadder};
pub use report::{ReportConfig, ReportOutcome, generate};
pub use strategy::{DrawdownSweep, LeveragedDca, weighted_average_entry};
