//! Progress reporting contract and the indicatif-backed reporter.

use indicatif::ProgressBar;

/// Consumer of per-category progress updates.
///
/// Within one category run `current` is monotonically non-decreasing and
/// `total` may be revised upward once (when a flatten phase recomputes it)
/// but never downward. Implementations are invoked synchronously inline with
/// the move loop and must not block.
pub trait ProgressReporter {
    fn report(&self, category: &str, current: usize, total: usize);
}

/// Adapts a [`ProgressBar`] to the [`ProgressReporter`] contract.
///
/// The bar length only grows and the position only advances, so out-of-order
/// or repeated reports cannot make the bar move backwards.
pub struct BarReporter {
    bar: ProgressBar,
}

impl BarReporter {
    pub fn new(bar: ProgressBar) -> Self {
        Self { bar }
    }
}

impl ProgressReporter for BarReporter {
    fn report(&self, category: &str, current: usize, total: usize) {
        self.bar.set_message(category.to_string());
        if total > 0 && self.bar.length().unwrap_or(0) < total as u64 {
            self.bar.set_length(total as u64);
        }
        if (current as u64) > self.bar.position() {
            self.bar.set_position(current as u64);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_reporter_total_never_shrinks() {
        let bar = ProgressBar::hidden();
        let reporter = BarReporter::new(bar.clone());

        reporter.report("Images", 0, 3);
        assert_eq!(bar.length(), Some(3));

        // Flatten revises the total upward.
        reporter.report("Images", 2, 5);
        assert_eq!(bar.length(), Some(5));

        // A lower total must be ignored.
        reporter.report("Images", 2, 1);
        assert_eq!(bar.length(), Some(5));
    }

    #[test]
    fn test_bar_reporter_position_is_monotonic() {
        let bar = ProgressBar::hidden();
        let reporter = BarReporter::new(bar.clone());

        reporter.report("Docs", 2, 4);
        assert_eq!(bar.position(), 2);

        reporter.report("Docs", 1, 4);
        assert_eq!(bar.position(), 2);

        reporter.report("Docs", 4, 4);
        assert_eq!(bar.position(), 4);
    }
}
