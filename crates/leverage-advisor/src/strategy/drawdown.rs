//! Synthetic P/L vs Drawdown
//!
//! Illustrative linear P/L curves over a market drawdown sweep. These are not
//! derived from the price ladder; they only feed the P/L chart.

use crate::model::LeverageScheme;

/// `n` evenly spaced values from `start` to `end`, both endpoints included
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Linear P/L model: `base - drawdown * sensitivity` (fractions, not percent)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PnlModel {
    pub base: f64,
    pub sensitivity: f64,
}

impl PnlModel {
    pub const fn for_scheme(scheme: LeverageScheme) -> Self {
        match scheme {
            LeverageScheme::Increasing => Self { base: 0.05, sensitivity: 0.2 },
            LeverageScheme::Decreasing => Self { base: 0.02, sensitivity: 0.25 },
            LeverageScheme::Uniform => Self { base: 0.03, sensitivity: 0.22 },
        }
    }

    pub fn pnl_at(&self, drawdown: f64) -> f64 {
        drawdown.mul_add(-self.sensitivity, self.base)
    }

    pub fn simulate(&self, drawdowns: &[f64]) -> Vec<f64> {
        drawdowns.iter().map(|&d| self.pnl_at(d)).collect()
    }
}

/// One simulated P/L curve
#[derive(Clone, Debug)]
pub struct PnlCurve {
    pub scheme: LeverageScheme,
    pub pnl: Vec<f64>,
}

/// Drawdown axis with one P/L curve per leverage scheme
#[derive(Clone, Debug)]
pub struct DrawdownSweep {
    pub drawdowns: Vec<f64>,
    pub curves: Vec<PnlCurve>,
}

impl DrawdownSweep {
    pub const MAX_DRAWDOWN: f64 = 0.1;
    pub const POINTS: usize = 50;

    pub fn new(drawdowns: Vec<f64>, schemes: &[LeverageScheme]) -> Self {
        let curves = schemes
            .iter()
            .map(|&scheme| PnlCurve {
                scheme,
                pnl: PnlModel::for_scheme(scheme).simulate(&drawdowns),
            })
            .collect();
        Self { drawdowns, curves }
    }

    /// 0% to 10% drawdown in 50 points for all three schemes
    pub fn reference() -> Self {
        Self::new(
            linspace(0.0, Self::MAX_DRAWDOWN, Self::POINTS),
            &LeverageScheme::ALL,
        )
    }

    /// Drawdown axis in percent
    pub fn drawdowns_pct(&self) -> Vec<f64> {
        self.drawdowns.iter().map(|d| d * 100.0).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let xs = linspace(0.0, 0.1, 50);
        assert_eq!(xs.len(), 50);
        assert_eq!(xs[0], 0.0);
        assert_eq!(xs[49], 0.1);
        assert!(xs.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_linspace_degenerate() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 1.0, 1), vec![3.0]);
        assert_eq!(linspace(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_pnl_model() {
        let model = PnlModel::for_scheme(LeverageScheme::Increasing);
        assert!((model.pnl_at(0.0) - 0.05).abs() < 1e-12);
        assert!((model.pnl_at(0.1) - 0.03).abs() < 1e-12);

        let decreasing = PnlModel::for_scheme(LeverageScheme::Decreasing);
        assert!((decreasing.pnl_at(0.1) + 0.005).abs() < 1e-12);
    }

    #[test]
    fn test_reference_sweep() {
        let sweep = DrawdownSweep::reference();
        assert_eq!(sweep.drawdowns.len(), DrawdownSweep::POINTS);
        assert_eq!(sweep.curves.len(), 3);
        assert!(sweep.curves.iter().all(|c| c.pnl.len() == DrawdownSweep::POINTS));

        let pct = sweep.drawdowns_pct();
        assert!((pct[49] - 10.0).abs() < 1e-9);
    }
}
