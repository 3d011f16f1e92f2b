//! Progress reporting for archive export and import.

use std::cell::Cell;
use std::fmt;
use std::path::Path;

/// A stage of an export or import run.
#[derive(Debug, Clone, Copy)]
pub enum Phase<'a> {
    /// Encoding entries into fixed records.
    Encoding { records: usize },
    /// Writing the header and records to disk.
    Writing { path: &'a Path },
    /// Checking magic, version and checksum before an import.
    Verifying { path: &'a Path },
    /// Reconciling and storing verified records.
    Importing { records: usize },
}

impl fmt::Display for Phase<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Encoding { records } => write!(f, "Encoding {records} records"),
            Phase::Writing { path } => write!(f, "Writing {}", path.display()),
            Phase::Verifying { path } => write!(f, "Verifying {}", path.display()),
            Phase::Importing { records } => write!(f, "Importing {records} records"),
        }
    }
}

/// Receives updates while an archive is written or imported.
pub trait ArchiveProgress {
    /// A record was encoded (export) or stored (import). `current` is 1-based.
    fn on_record(&self, current: usize, total: usize, name: &str);

    fn on_phase(&self, phase: &Phase<'_>);

    /// Record `index` lost data in `fields` while being encoded.
    fn on_truncated(&self, index: usize, name: &str, fields: &[&'static str]) {
        let _ = (index, name, fields);
    }

    fn on_complete(&self, message: &str);
}

/// Discards all updates.
pub struct SilentProgress;

impl ArchiveProgress for SilentProgress {
    fn on_record(&self, _current: usize, _total: usize, _name: &str) {}
    fn on_phase(&self, _phase: &Phase<'_>) {}
    fn on_complete(&self, _message: &str) {}
}

/// Logs phases, every 500th record, and a closing line that counts
/// truncated records.
#[derive(Default)]
pub struct LogProgress {
    truncated: Cell<usize>,
}

impl LogProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records reported through [`ArchiveProgress::on_truncated`] so far.
    pub fn truncated(&self) -> usize {
        self.truncated.get()
    }
}

impl ArchiveProgress for LogProgress {
    fn on_record(&self, current: usize, total: usize, name: &str) {
        if current.is_multiple_of(500) || current == total {
            let percent = current * 100 / total.max(1);
            log::info!("  [{current}/{total} {percent:>3}%] {name}");
        }
    }

    fn on_phase(&self, phase: &Phase<'_>) {
        log::info!("{phase}");
    }

    fn on_truncated(&self, _index: usize, _name: &str, _fields: &[&'static str]) {
        self.truncated.set(self.truncated.get() + 1);
    }

    fn on_complete(&self, message: &str) {
        match self.truncated.get() {
            0 => log::info!("{message}"),
            n => log::info!("{message} ({n} records truncated)"),
        }
    }
}

#[cfg(test)]
#[path = "tests/progress_tests.rs"]
mod tests;
