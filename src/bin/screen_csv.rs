use anyhow::Context;
use clap::Parser;
use heart_screen::core::batch;
use heart_screen::utils::{logger, validation::Validate};
use heart_screen::{load_engine, ServiceConfig};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};

#[derive(Parser)]
#[command(name = "screen_csv")]
#[command(about = "Screen every record of a CSV file against the model ensemble")]
struct Args {
    /// CSV file whose header names the 13 feature columns
    input: String,

    /// Write results here instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Artifact directory or .zip bundle (overrides artifacts.location)
    #[arg(long)]
    artifacts: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入配置
    let mut config = match &args.config {
        Some(path) => ServiceConfig::from_file(path)
            .with_context(|| format!("Failed to load config file '{}'", path))?,
        None => ServiceConfig::default(),
    };
    if let Some(location) = &args.artifacts {
        config.artifacts.location = location.clone();
        config.artifacts.base_dir = None;
    }

    logger::init_logger(&config.logging.format, args.verbose, &config.logging.level);
    config.validate()?;

    tracing::info!("📁 Screening records from: {}", args.input);
    let engine = load_engine(&config)
        .await
        .context("Model artifacts could not be loaded")?;

    let input = BufReader::new(
        File::open(&args.input).with_context(|| format!("Cannot open '{}'", args.input))?,
    );
    let output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Cannot create '{}'", path))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let summary = batch::screen_csv(&engine, input, output)?;
    if let Some(path) = &args.output {
        println!("✅ {} records screened, {} rejected", summary.scored, summary.rejected);
        println!("📁 Output saved to: {}", path);
    }

    Ok(())
}
