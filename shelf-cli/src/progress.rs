//! Terminal progress bar for long exports and imports.

use indicatif::{ProgressBar, ProgressStyle};
use shelf_archive::{ArchiveProgress, Phase};

/// Collections smaller than this finish too quickly for a bar to help.
const MIN_RECORDS_FOR_BAR: usize = 200;

pub(crate) struct BarProgress {
    bar: ProgressBar,
    enabled: bool,
}

impl BarProgress {
    /// Create a hidden bar that appears on the first record of a large run.
    ///
    /// When `quiet` is true the bar never draws.
    pub(crate) fn new(quiet: bool) -> Self {
        let bar = ProgressBar::hidden();
        let style = ProgressStyle::with_template("  {bar:40.cyan/blue} {pos:>6}/{len:6} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        bar.set_style(style);
        Self { bar, enabled: !quiet }
    }

    fn maybe_show(&self, total: usize) {
        if self.enabled && total >= MIN_RECORDS_FOR_BAR && self.bar.is_hidden() {
            self.bar.set_length(total as u64);
            self.bar.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        }
    }
}

impl ArchiveProgress for BarProgress {
    fn on_record(&self, current: usize, total: usize, name: &str) {
        self.maybe_show(total);
        self.bar.set_position(current as u64);
        self.bar.set_message(name.to_string());
    }

    fn on_phase(&self, phase: &Phase<'_>) {
        self.bar.suspend(|| log::debug!("{}", phase));
    }

    fn on_complete(&self, message: &str) {
        self.bar.finish_and_clear();
        log::debug!("{}", message);
    }
}
