use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use subshift::config::Config;
use subshift::shift::{print_summary, shift_files, BatchOptions};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "subshift")]
#[command(version, about = "Batch timeline shifting for subtitle files")]
#[command(
    long_about = "Shift every timestamp in SRT and ASS subtitle files by a fixed offset. Adjusted copies are written next to each input with an '-adjusted' suffix."
)]
struct Cli {
    /// Subtitle files to shift (.srt or .ass)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Offset in seconds, positive or negative (e.g. 1.5, -2.25)
    #[arg(short = 't', long, allow_hyphen_values = true)]
    offset: f64,

    /// Directory for adjusted files (defaults to alongside each input)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Number of files processed concurrently
    #[arg(short, long)]
    concurrency: Option<usize>,

    /// Print the batch report as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = Config::load().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    if let Some(ref dir) = cli.output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }

    let options = BatchOptions {
        offset_secs: cli.offset,
        output_dir: cli.output_dir,
        concurrency: cli.concurrency.unwrap_or(config.concurrency),
        show_progress: !cli.json,
    };

    info!("Files:  {}", cli.files.len());
    info!("Offset: {:+.3}s", options.offset_secs);

    let report = shift_files(&cli.files, &options).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    if report.failed > 0 {
        anyhow::bail!("{} file(s) failed", report.failed);
    }

    Ok(())
}
