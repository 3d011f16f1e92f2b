//! Write catalog entries to an archive file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use shelf_catalog::types::CatalogEntry;

use crate::envelope::FileEnvelope;
use crate::error::ArchiveError;
use crate::progress::{ArchiveProgress, Phase};
use crate::record::{FixedRecord, RECORD_SIZE};
use crate::store::EntrySource;

/// How the archive reaches its destination path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Write `<path>.tmp`, then rename it over `path`.
    #[default]
    Atomic,
    /// Write directly to `path`. An interrupted write leaves a partial file.
    InPlace,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    pub mode: WriteMode,
}

/// What an export wrote.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub records: usize,
    /// Records with at least one text field cut to fit.
    pub truncated_records: usize,
    pub hash: String,
}

/// Encode `entries` in order and write them with their header to `path`.
pub fn export(
    path: &Path,
    entries: &[CatalogEntry],
    options: ExportOptions,
    progress: Option<&dyn ArchiveProgress>,
) -> Result<ExportSummary, ArchiveError> {
    let record_count = u32::try_from(entries.len())
        .map_err(|_| ArchiveError::TooManyRecords(entries.len()))?;

    if let Some(p) = progress {
        p.on_phase(&Phase::Encoding {
            records: entries.len(),
        });
    }

    let mut record_bytes = Vec::with_capacity(entries.len() * RECORD_SIZE);
    let mut truncated_records = 0;
    for (i, entry) in entries.iter().enumerate() {
        let record = FixedRecord::encode(entry);
        let lossy = record.truncated_fields();
        if !lossy.is_empty() {
            truncated_records += 1;
            log::warn!(
                "Record {} '{}' truncated to fit: {}",
                i,
                entry.name,
                lossy.join(", ")
            );
            if let Some(p) = progress {
                p.on_truncated(i, &entry.name, &lossy);
            }
        }
        record_bytes.extend_from_slice(&record.to_bytes());

        if let Some(p) = progress {
            p.on_record(i + 1, entries.len(), &entry.name);
        }
    }

    let envelope = FileEnvelope::build(&record_bytes);
    debug_assert_eq!(envelope.record_count, record_count);
    let hash = envelope.stored_hash();

    if let Some(p) = progress {
        p.on_phase(&Phase::Writing { path });
    }
    match options.mode {
        WriteMode::Atomic => write_atomically(path, &envelope, &record_bytes)?,
        WriteMode::InPlace => write_archive(path, &envelope, &record_bytes)?,
    }

    log::debug!("Wrote {} records to {} ({})", entries.len(), path.display(), hash);

    Ok(ExportSummary {
        path: path.to_path_buf(),
        records: entries.len(),
        truncated_records,
        hash,
    })
}

/// Fetch entries from `source` once and export them.
pub fn export_from<S: EntrySource>(
    source: &mut S,
    path: &Path,
    options: ExportOptions,
    progress: Option<&dyn ArchiveProgress>,
) -> Result<ExportSummary, ArchiveError> {
    let entries = source.fetch_entries().map_err(ArchiveError::store)?;
    export(path, &entries, options, progress)
}

/// `<path>.tmp` alongside the destination, so the rename stays on one filesystem.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write to the temporary path and rename it over `path`. The temporary file
/// is removed if either step fails.
fn write_atomically(path: &Path, envelope: &FileEnvelope, record_bytes: &[u8]) -> Result<(), ArchiveError> {
    let tmp = temp_path(path);
    let result = write_archive(&tmp, envelope, record_bytes).and_then(|()| {
        std::fs::rename(&tmp, path).map_err(|source| ArchiveError::Write {
            path: path.to_path_buf(),
            source,
        })
    });
    if result.is_err() {
        if let Err(e) = std::fs::remove_file(&tmp) {
            log::debug!("Could not remove {}: {}", tmp.display(), e);
        }
    }
    result
}

fn write_archive(path: &Path, envelope: &FileEnvelope, record_bytes: &[u8]) -> Result<(), ArchiveError> {
    let write = || -> std::io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        out.write_all(&envelope.to_bytes())?;
        out.write_all(record_bytes)?;
        out.into_inner().map_err(|e| e.into_error())?.sync_all()
    };
    write().map_err(|source| ArchiveError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "tests/export_tests.rs"]
mod tests;
