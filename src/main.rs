//! One-shot entry point: load the raw sales file, clean it, aggregate the
//! report views, and write the JSON document for the visualization.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use vehicle_sales_report::{
    analyzers::aggregate::aggregate, cleaner::clean_with_report, output::write_report,
    parser::load_records,
};

#[derive(Parser)]
#[command(name = "vehicle_sales_report")]
#[command(about = "Clean vehicle sale records and build the infographic data file", long_about = None)]
struct Cli {
    /// Raw sales CSV to read
    #[arg(short, long, default_value = "../car_prices.csv")]
    input: PathBuf,

    /// JSON document to write
    #[arg(short, long, default_value = "data/vehicle_data.json")]
    output: PathBuf,

    /// Reference year for vehicle ages
    #[arg(long, default_value_t = 2025)]
    current_year: i64,
}

fn main() -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    tracing_subscriber::registry().with(stderr_layer).init();

    let cli = Cli::parse();

    let raw = load_records(&cli.input)?;
    let (records, report) = clean_with_report(&raw);
    debug!("{}", serde_json::to_string(&report)?);
    drop(raw);

    let document = aggregate(&records, cli.current_year);
    write_report(&cli.output, &document)?;

    info!(output = %cli.output.display(), "Processing complete");
    Ok(())
}
