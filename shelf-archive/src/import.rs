//! Read archive files back into a catalog.
//!
//! Import only proceeds from a fully verified file, and reconciles the
//! denormalized genre and tag names in each record against the destination
//! store. Viewing reads whatever it can and reports the verification outcome
//! alongside the entries.

use std::collections::HashMap;
use std::path::Path;

use shelf_catalog::tags::join_tag_names;
use shelf_catalog::types::{CatalogEntry, ImportLog};

use crate::error::ArchiveError;
use crate::progress::{ArchiveProgress, Phase};
use crate::record::FixedRecord;
use crate::store::CatalogSink;
use crate::verify::{verify_and_read, VerifyOutcome};

/// Result of importing an archive.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// Records in the file.
    pub total: usize,
    pub imported: usize,
    pub failed: Vec<FailedRecord>,
    /// Set when the records were stored but the history entry was not.
    pub history_error: Option<String>,
}

impl ImportReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// A record the store refused.
#[derive(Debug, Clone)]
pub struct FailedRecord {
    /// Position of the record in the file.
    pub index: usize,
    pub name: String,
    pub reason: String,
}

/// Entries read for inspection, with the verification outcome.
#[derive(Debug, Clone)]
pub struct ViewResult {
    pub outcome: VerifyOutcome,
    pub entries: Vec<CatalogEntry>,
}

/// Import every record of a verified archive as a new entry owned by `owner_id`.
///
/// A file that does not verify is rejected before the sink is touched.
/// Records the sink refuses are collected in the report and the remaining
/// records are still imported. A failure to record the import history does
/// not undo or fail the import; it is reported in
/// [`ImportReport::history_error`].
pub fn import<S: CatalogSink>(
    path: &Path,
    owner_id: i32,
    sink: &mut S,
    progress: Option<&dyn ArchiveProgress>,
) -> Result<ImportReport, ArchiveError> {
    if let Some(p) = progress {
        p.on_phase(&Phase::Verifying { path });
    }
    let verified = verify_and_read(path);
    if !verified.outcome.is_ok() {
        return Err(ArchiveError::Rejected(verified.outcome));
    }

    let total = verified.records.len();
    if let Some(p) = progress {
        p.on_phase(&Phase::Importing { records: total });
    }

    let mut report = ImportReport {
        total,
        ..ImportReport::default()
    };
    let mut reconciler = Reconciler::new(sink, owner_id);

    for (index, record) in verified.records.iter().enumerate() {
        let entry = record.decode();
        match reconciler.import_entry(&entry) {
            Ok(game_id) => {
                log::debug!("Imported '{}' as game {}", entry.name, game_id);
                report.imported += 1;
            }
            Err(reason) => {
                log::warn!("Record {} '{}' not imported: {}", index, entry.name, reason);
                report.failed.push(FailedRecord {
                    index,
                    name: entry.name.clone(),
                    reason,
                });
            }
        }

        if let Some(p) = progress {
            p.on_record(index + 1, total, &entry.name);
        }
    }

    let history = ImportLog {
        id: 0,
        source_name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
        owner_id,
        imported_at: chrono::Utc::now().to_rfc3339(),
        records_total: total as i64,
        records_imported: report.imported as i64,
        records_failed: report.failed.len() as i64,
    };
    if let Err(e) = reconciler.sink.record_import(&history) {
        log::warn!("Import history for {} not recorded: {}", history.source_name, e);
        report.history_error = Some(e.to_string());
    }

    if let Some(p) = progress {
        p.on_complete(&format!(
            "Imported {} of {} records ({} failed)",
            report.imported,
            total,
            report.failed.len()
        ));
    }

    Ok(report)
}

/// Read an archive for inspection without trusting it.
///
/// Never fails: a non-`Ok` outcome is logged and returned with whatever
/// complete records were read before verification stopped.
pub fn read_for_view(path: &Path) -> ViewResult {
    let verified = verify_and_read(path);
    if !verified.outcome.is_ok() {
        log::warn!("{}", verified.outcome);
    }
    ViewResult {
        outcome: verified.outcome,
        entries: verified.records.iter().map(FixedRecord::decode).collect(),
    }
}

// ── Reconciliation ──────────────────────────────────────────────────────────

/// Maps genre and tag names to destination ids, caching lookups for one import.
struct Reconciler<'s, S: CatalogSink> {
    sink: &'s mut S,
    owner_id: i32,
    genres: HashMap<String, Option<i32>>,
    tags: HashMap<String, i32>,
}

impl<'s, S: CatalogSink> Reconciler<'s, S> {
    fn new(sink: &'s mut S, owner_id: i32) -> Self {
        Self {
            sink,
            owner_id,
            genres: HashMap::new(),
            tags: HashMap::new(),
        }
    }

    /// Reconcile and persist one decoded record, returning the new entry id.
    fn import_entry(&mut self, decoded: &CatalogEntry) -> Result<i32, String> {
        let genre_id = match decoded.genre.as_deref() {
            Some(name) => self.genre_id(name)?,
            None => None,
        };

        let names = decoded.tag_names();
        let mut tag_ids = Vec::with_capacity(names.len());
        for name in &names {
            let id = self.tag_id(name)?;
            if !tag_ids.contains(&id) {
                tag_ids.push(id);
            }
        }

        let entry = CatalogEntry {
            id: 0,
            owner_id: self.owner_id,
            genre_id,
            genre: genre_id.and_then(|_| decoded.genre.clone()),
            tags: join_tag_names(&names),
            ..decoded.clone()
        };

        self.sink
            .persist_new_entry(&entry, &tag_ids)
            .map_err(|e| e.to_string())
    }

    fn genre_id(&mut self, name: &str) -> Result<Option<i32>, String> {
        if let Some(&cached) = self.genres.get(name) {
            return Ok(cached);
        }
        let id = self
            .sink
            .resolve_genre_by_name(name)
            .map_err(|e| format!("genre '{}': {}", name, e))?;
        if id.is_none() {
            log::debug!("Genre '{}' not in catalog; importing without genre", name);
        }
        self.genres.insert(name.to_string(), id);
        Ok(id)
    }

    fn tag_id(&mut self, name: &str) -> Result<i32, String> {
        if let Some(&cached) = self.tags.get(name) {
            return Ok(cached);
        }
        let id = self
            .sink
            .resolve_or_create_tag(name, self.owner_id)
            .map_err(|e| format!("tag '{}': {}", name, e))?;
        self.tags.insert(name.to_string(), id);
        Ok(id)
    }
}
