//! Collection archive files: export, verification, import, and viewing.
//!
//! An archive is a 100-byte header followed by fixed-size records, one per
//! catalog entry. The header carries a SHA-256 of the record bytes so a file
//! can be checked before anything in it is trusted. Genres and tags are
//! stored by name and reconciled against the destination store on import.

pub mod envelope;
pub mod error;
pub mod export;
pub mod import;
pub mod progress;
pub mod record;
pub mod store;
pub mod text;
pub mod verify;

mod util;

pub use envelope::{sha256_hex, FileEnvelope, FILE_MAGIC, FORMAT_VERSION, HEADER_SIZE};
pub use error::ArchiveError;
pub use export::{export, export_from, ExportOptions, ExportSummary, WriteMode};
pub use import::{import, read_for_view, FailedRecord, ImportReport, ViewResult};
pub use progress::{ArchiveProgress, LogProgress, Phase, SilentProgress};
pub use record::{FixedRecord, RECORD_SIZE};
pub use store::{CatalogSink, EntrySource, SqliteCatalog};
pub use text::FixedText;
pub use verify::{verify, VerifyOutcome, VerifyStage};
