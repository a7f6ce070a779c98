//! Command-line interface.
//!
//! Parses arguments, resolves the directory to organize, loads the category
//! list, and drives one categorizer pass per category followed by a single
//! normalization pass, with a progress bar and a live log tail per pass.

use crate::config::load_categories;
use crate::known_folders::{KnownFolder, expand_tilde, known_folder_path};
use crate::logger::{LogStore, StoreLogger};
use crate::mover::FsMover;
use crate::output::OutputFormatter;
use crate::processor::CategoryProcessor;
use crate::progress::BarReporter;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

/// Number of recent log lines shown under each category pass.
const LOG_TAIL: usize = 8;

/// Organize a directory into category subdirectories.
#[derive(Debug, Parser)]
#[command(name = "sortdir", version, about)]
pub struct Cli {
    /// Organize the user's Downloads folder
    #[arg(short = 'd', long, conflicts_with_all = ["documents", "path"])]
    pub downloads: bool,

    /// Organize the user's Documents folder
    #[arg(short = 'm', long, conflicts_with = "path")]
    pub documents: bool,

    /// Organize a specific directory
    #[arg(short = 'p', long, value_name = "PATH")]
    pub path: Option<String>,

    /// Simulate the run without moving anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Category configuration file (TOML)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Resolves the target directory from the parsed flags.
    fn target_dir(&self) -> Result<PathBuf, String> {
        if self.downloads {
            return known_folder_path(KnownFolder::Downloads)
                .ok_or_else(|| "Could not locate a Downloads folder".to_string());
        }
        if self.documents {
            return known_folder_path(KnownFolder::Documents)
                .ok_or_else(|| "Could not locate a Documents folder".to_string());
        }
        match &self.path {
            Some(p) => Ok(expand_tilde(p)),
            None => Err("No directory given: use -d, -m or -p <PATH> (see --help)".to_string()),
        }
    }
}

/// Runs the full organization: one pass per category, then normalization.
pub fn run(cli: &Cli) -> Result<(), String> {
    let dir = cli.target_dir()?;
    if !dir.is_dir() {
        return Err(format!("Directory does not exist: {}", dir.display()));
    }

    let categories =
        load_categories(cli.config.as_deref()).map_err(|e| format!("Configuration error: {}", e))?;

    OutputFormatter::info(&format!("Organizing: {}", dir.display()));
    if cli.dry_run {
        OutputFormatter::dry_run_notice("No files will be moved.");
    }

    let store = Arc::new(LogStore::new());
    let logger = StoreLogger::new(Arc::clone(&store));
    let mover = FsMover;
    let processor = CategoryProcessor::new(&mover).with_logger(&logger);

    let mut moved_counts = Vec::with_capacity(categories.len());
    for category in &categories {
        let bar = OutputFormatter::create_progress_bar(1);
        bar.set_message(category.name.clone());
        let reporter = BarReporter::new(bar.clone());

        let moved = processor
            .process_category(&dir, category, cli.dry_run, Some(&reporter))
            .map_err(|e| format!("Category {} failed: {}", category.name, e))?;
        bar.finish();

        OutputFormatter::success(&format!("{}: {} moved", category.name, moved));
        OutputFormatter::recent_logs(&category.name, &store.last_for_category(&category.name, LOG_TAIL));
        moved_counts.push((category.name.clone(), moved));
    }

    let bar = OutputFormatter::create_progress_bar(1);
    bar.set_message("Normalize");
    let reporter = BarReporter::new(bar.clone());
    processor
        .normalize_categories(&dir, &categories, cli.dry_run, Some(&reporter))
        .map_err(|e| format!("Normalization failed: {}", e))?;
    bar.finish();
    OutputFormatter::success("Normalization complete");

    OutputFormatter::summary_table(&moved_counts);
    if cli.dry_run {
        OutputFormatter::dry_run_notice("Dry run complete. Run again without -n to apply.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_path_and_dry_run() {
        let cli = Cli::parse_from(["sortdir", "-p", "/tmp/somewhere", "--dry-run"]);
        assert_eq!(cli.path.as_deref(), Some("/tmp/somewhere"));
        assert!(cli.dry_run);
        assert!(!cli.downloads);
    }

    #[test]
    fn test_cli_rejects_conflicting_targets() {
        let result = Cli::try_parse_from(["sortdir", "-d", "-p", "/tmp/x"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_target_dir_requires_some_target() {
        let cli = Cli::parse_from(["sortdir"]);
        assert!(cli.target_dir().is_err());
    }

    #[test]
    fn test_run_fails_on_missing_directory() {
        let cli = Cli::parse_from(["sortdir", "-p", "/non/existent/dir"]);
        let result = run(&cli);
        assert!(result.is_err());
    }
}
