//! Chart Rendering
//!
//! Static SVG line and bar charts, written as standalone documents.

mod bar;
mod line;
mod svg;

pub use bar::{Bar, BarChart};
pub use line::{LineChart, LineSeries, XTicks};

use std::path::Path;

use crate::error::{AdvisorError, Result};

/// Write a rendered chart to `path`, replacing any existing file
pub fn save(svg: &str, path: &Path) -> Result<()> {
    std::fs::write(path, svg).map_err(|source| AdvisorError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = svg.len(), "chart written");
    Ok(())
}
