//! mp3prune - Duplicate MP3 Remover
//!
//! A Rust CLI application that removes duplicate MP3 files from directories,
//! keeping the earliest-modified copy of each group. Files are grouped by
//! content hash (BLAKE3), by track-number prefix, or all together.

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod scanner;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use cli::{Cli, OutputFormat};
use config::Config;
use duplicates::{DedupeConfig, Deduplicator, GroupingStrategy};
use error::ExitCode;
use output::{text, JsonOutput, PathReport};

/// Settings for one invocation after merging configuration and flags.
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Input paths, already normalised
    pub paths: Vec<PathBuf>,
    /// Pass configuration
    pub dedupe: DedupeConfig,
    /// Output format
    pub output: OutputFormat,
}

impl RunSettings {
    /// Merge the loaded configuration with command-line flags.
    #[must_use]
    pub fn resolve(cli: &Cli, config: &Config) -> Self {
        let strategy_name = cli.strategy.as_deref().unwrap_or(&config.strategy);
        let io_threads = cli.io_threads.unwrap_or(config.io_threads);

        Self {
            paths: normalize_inputs(cli.paths.clone()),
            dedupe: DedupeConfig::default()
                .with_strategy(GroupingStrategy::from_name(strategy_name))
                .with_io_threads(io_threads)
                .with_dry_run(cli.dry_run),
            output: cli.output,
        }
    }
}

/// Default to the current directory when no paths are given.
#[must_use]
pub fn normalize_inputs(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    if paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        paths
    }
}

/// Process a single input path.
///
/// Non-directories are skipped untouched. A directory that cannot be listed
/// becomes a [`PathReport::Failed`]; it never stops later inputs.
pub fn process_path(dedup: &Deduplicator, path: &Path) -> PathReport {
    if !path.is_dir() {
        log::debug!("Skipping {}: not a directory", path.display());
        return PathReport::Skipped {
            path: path.to_path_buf(),
        };
    }

    match dedup.run(path) {
        Ok(report) => PathReport::Directory(report),
        Err(e) => {
            log::warn!("Failed to process {}: {}", path.display(), e);
            PathReport::Failed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        }
    }
}

/// Exit code for a finished run.
#[must_use]
pub fn exit_code_for(reports: &[PathReport]) -> ExitCode {
    if reports.iter().any(PathReport::has_errors) {
        ExitCode::PartialSuccess
    } else {
        ExitCode::Success
    }
}

/// Run every input path through the pass, writing results to `writer`.
///
/// Text output is written per path as soon as that path is done; JSON output
/// is written once at the end.
///
/// # Errors
///
/// Returns an error if writing the output fails.
pub fn run_with_writer<W: Write>(
    settings: &RunSettings,
    dedup: &Deduplicator,
    writer: &mut W,
) -> Result<ExitCode> {
    let mut reports = Vec::with_capacity(settings.paths.len());

    for path in &settings.paths {
        let report = process_path(dedup, path);
        if settings.output == OutputFormat::Text {
            text::write_path_report(writer, &report).context("Failed to write output")?;
            writer.flush().context("Failed to write output")?;
        }
        reports.push(report);
    }

    let exit_code = exit_code_for(&reports);

    if settings.output == OutputFormat::Json {
        JsonOutput::new(&reports, exit_code)
            .write_to(writer)
            .context("Failed to write JSON output")?;
    }

    log::debug!(
        "Processed {} path(s), exit code {}",
        reports.len(),
        exit_code.code_prefix()
    );
    Ok(exit_code)
}

/// Main application logic.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or output cannot be
/// written.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let settings = RunSettings::resolve(&cli, &config);
    log::debug!(
        "Strategy {}, {} I/O thread(s), dry run: {}",
        settings.dedupe.strategy,
        settings.dedupe.io_threads,
        settings.dedupe.dry_run
    );

    let dedup = Deduplicator::new(settings.dedupe.clone());
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    run_with_writer(&settings, &dedup, &mut handle)
}
