use std::path::PathBuf;

use thiserror::Error;

use crate::verify::VerifyOutcome;

#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The file failed verification and was not imported.
    #[error("{0}")]
    Rejected(VerifyOutcome),
    #[error("Cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Too many records for one archive: {0}")]
    TooManyRecords(usize),
    #[error("Store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ArchiveError {
    pub(crate) fn store<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Store(Box::new(err))
    }
}
