//! leverage-report
//!
//! Computes the leverage-weighted average entries for the reference DCA
//! ladder and writes the four research charts.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leverage_advisor::{ReportConfig, generate};

fn main() -> anyhow::Result<()> {
    // Load environment before anything reads RUST_LOG or DCA_REPORT_DIR
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ReportConfig::from_env();
    tracing::info!(output_dir = %config.output_dir.display(), "generating DCA leverage report");

    let outcome = match generate(&config) {
        Ok(outcome) => outcome,
        Err(err) => {
            if err.is_input_error() {
                tracing::error!("reference DCA data is invalid: {err}");
            } else {
                tracing::error!("could not write charts: {err}");
            }
            return Err(err.into());
        }
    };

    println!("Average entry by leverage sequence:");
    for summary in &outcome.summaries {
        println!("  {}", summary.summary());
    }
    println!();
    println!("Plots generated and saved as SVG files for your research paper:");
    for file in &outcome.files {
        println!("  {}", file.display());
    }

    Ok(())
}
