//! Output formatting and styling.
//!
//! Centralizes colored console output and progress-bar construction for the
//! CLI so formatting can change in one place.

use crate::logger::LogEntry;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Manages CLI output with consistent styling.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Creates a progress bar for a category pass.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} {msg:<12} [{bar:40.cyan/blue}] {pos}/{len}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓░"),
        );
        pb
    }

    /// Prints the most recent log lines captured for a category.
    pub fn recent_logs(category: &str, entries: &[LogEntry]) {
        if entries.is_empty() {
            return;
        }
        println!("{}", format!("Recent ({}):", category).dimmed());
        for entry in entries {
            println!("  {}", entry.message.dimmed());
        }
    }

    /// Prints a summary table of moved counts by category.
    ///
    /// Categories are shown in run order, followed by a total row.
    pub fn summary_table(moved_counts: &[(String, usize)]) {
        Self::header("SUMMARY");

        let max_category_len = moved_counts
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0)
            .max(8);

        println!(
            "{:<width$} | {}",
            "Category".bold(),
            "Moved".bold(),
            width = max_category_len
        );
        println!("{}", "-".repeat(max_category_len + 10));

        let mut total = 0usize;
        for (category, count) in moved_counts {
            total += count;
            let file_word = if *count == 1 { "file" } else { "files" };
            println!(
                "{:<width$} | {} {}",
                category,
                count.to_string().green(),
                file_word,
                width = max_category_len
            );
        }

        println!("{}", "-".repeat(max_category_len + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            total.to_string().green().bold(),
            if total == 1 { "file" } else { "files" },
            width = max_category_len
        );
    }
}
