use crate::config::SubtitleFormat;
use crate::error::{Result, SubshiftError};
use crate::subtitle::shift_content;
use futures::stream::{FuturesUnordered, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// Options for a batch shift run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Offset in seconds applied to every time-bearing field.
    pub offset_secs: f64,
    /// Directory for adjusted files; defaults to alongside each input.
    pub output_dir: Option<PathBuf>,
    /// Number of files processed concurrently.
    pub concurrency: usize,
    /// Show a progress bar.
    pub show_progress: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            offset_secs: 0.0,
            output_dir: None,
            concurrency: 4,
            show_progress: true,
        }
    }
}

/// Outcome of one file's shift unit. A failed file carries the error message
/// and no output path; it is never reported as a success.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub error: Option<String>,
}

impl FileOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-file outcomes for a batch, in input order. The batch is best-effort:
/// one failing file does not undo or block the others, and outputs already
/// written stay on disk.
#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
    pub succeeded: usize,
    pub failed: usize,
    pub total_time_ms: u64,
}

/// Derive the output path for an input: `movie.srt` becomes
/// `movie-adjusted.srt`, placed in `output_dir` when given.
pub fn derive_output_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let file_name = match input.extension() {
        Some(ext) => format!("{}-adjusted.{}", stem, ext.to_string_lossy()),
        None => format!("{}-adjusted", stem),
    };
    match output_dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    }
}

/// Run one file's unit of work: read, parse, shift, serialize, write.
pub async fn shift_file(input: &Path, output: &Path, offset_secs: f64) -> Result<()> {
    if !input.exists() {
        return Err(SubshiftError::FileNotFound(input.display().to_string()));
    }

    let format = SubtitleFormat::from_path(input)
        .ok_or_else(|| SubshiftError::UnsupportedFormat(input.display().to_string()))?;

    let content = tokio::fs::read_to_string(input).await?;
    let adjusted = shift_content(&content, format, offset_secs)?;
    tokio::fs::write(output, adjusted).await?;

    debug!(
        "Shifted {} by {:+.3}s -> {}",
        input.display(),
        offset_secs,
        output.display()
    );
    Ok(())
}

/// Shift a batch of subtitle files concurrently.
///
/// Each file is an independent unit with no ordering dependency on the
/// others; concurrency is bounded by `options.concurrency`. Outcomes are
/// returned in input order regardless of completion order.
pub async fn shift_files(inputs: &[PathBuf], options: &BatchOptions) -> BatchReport {
    let start_time = Instant::now();
    let total = inputs.len();

    info!(
        "Shifting {} file(s) by {:+.3}s with concurrency {}",
        total, options.offset_secs, options.concurrency
    );

    let progress_bar = if options.show_progress {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let semaphore = Arc::new(Semaphore::new(options.concurrency.max(1)));
    let mut futures = FuturesUnordered::new();

    for (index, input) in inputs.iter().enumerate() {
        let sem = semaphore.clone();
        let pb = progress_bar.clone();
        let input = input.clone();
        let output = derive_output_path(&input, options.output_dir.as_deref());
        let offset_secs = options.offset_secs;

        futures.push(async move {
            let _permit = sem.acquire().await.expect("Semaphore closed");

            let result = shift_file(&input, &output, offset_secs).await;

            if let Some(ref pb) = pb {
                pb.inc(1);
            }

            let outcome = match result {
                Ok(()) => FileOutcome {
                    input,
                    output: Some(output),
                    error: None,
                },
                Err(e) => {
                    warn!("Failed to shift {}: {}", input.display(), e);
                    FileOutcome {
                        input,
                        output: None,
                        error: Some(e.to_string()),
                    }
                }
            };
            (index, outcome)
        });
    }

    let mut indexed: Vec<(usize, FileOutcome)> = Vec::with_capacity(total);
    while let Some(item) = futures.next().await {
        indexed.push(item);
    }
    indexed.sort_by_key(|(index, _)| *index);

    if let Some(pb) = progress_bar {
        pb.finish_and_clear();
    }

    let outcomes: Vec<FileOutcome> = indexed.into_iter().map(|(_, o)| o).collect();
    let succeeded = outcomes.iter().filter(|o| o.succeeded()).count();
    let failed = total - succeeded;

    info!("Batch complete: {} succeeded, {} failed", succeeded, failed);

    BatchReport {
        outcomes,
        succeeded,
        failed,
        total_time_ms: start_time.elapsed().as_millis() as u64,
    }
}

/// Print a human-readable summary of a batch run.
pub fn print_summary(report: &BatchReport) {
    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("                     Timeline Shift Complete                    ");
    println!("═══════════════════════════════════════════════════════════════");
    println!();
    for outcome in &report.outcomes {
        match (&outcome.output, &outcome.error) {
            (Some(output), _) => println!("  ✓ {} -> {}", outcome.input.display(), output.display()),
            (None, Some(error)) => println!("  ✗ {}: {}", outcome.input.display(), error),
            (None, None) => {}
        }
    }
    println!();
    println!("  Succeeded:  {}", report.succeeded);
    println!("  Failed:     {}", report.failed);
    println!("  Total time: {:.2}s", report.total_time_ms as f64 / 1000.0);
    println!();
    println!("═══════════════════════════════════════════════════════════════");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_output_path() {
        assert_eq!(
            derive_output_path(Path::new("/media/movie.srt"), None),
            PathBuf::from("/media/movie-adjusted.srt")
        );
        assert_eq!(
            derive_output_path(Path::new("show.ass"), Some(Path::new("/out"))),
            PathBuf::from("/out/show-adjusted.ass")
        );
        assert_eq!(
            derive_output_path(Path::new("noext"), None),
            PathBuf::from("noext-adjusted")
        );
    }

    #[test]
    fn test_batch_options_default() {
        let options = BatchOptions::default();
        assert_eq!(options.concurrency, 4);
        assert!(options.output_dir.is_none());
        assert!(options.show_progress);
    }

    #[tokio::test]
    async fn test_shift_file_missing_input() {
        let result = shift_file(
            Path::new("/definitely/missing.srt"),
            Path::new("/tmp/out.srt"),
            1.0,
        )
        .await;
        assert!(matches!(result, Err(SubshiftError::FileNotFound(_))));
    }

    #[tokio::test]
    async fn test_shift_file_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("notes.txt");
        std::fs::write(&input, "hello").unwrap();

        let result = shift_file(&input, &dir.path().join("out.txt"), 1.0).await;
        assert!(matches!(result, Err(SubshiftError::UnsupportedFormat(_))));
    }
}
