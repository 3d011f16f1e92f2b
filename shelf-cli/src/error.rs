use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Archive could not be written or read
    #[error("Archive error: {0}")]
    Archive(String),

    /// Archive failed verification
    #[error("{0}")]
    Verification(String),

    /// Some records of an import were refused by the store
    #[error("{failed} of {total} records were not imported")]
    ImportIncomplete { failed: usize, total: usize },

    /// Name did not match any known genre or tag
    #[error("Unknown {kind}: '{name}'")]
    UnknownName { kind: &'static str, name: String },

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn archive(msg: impl Into<String>) -> Self {
        Self::Archive(msg.into())
    }

    pub(crate) fn verification(msg: impl Into<String>) -> Self {
        Self::Verification(msg.into())
    }

    pub(crate) fn unknown_genre(name: impl Into<String>) -> Self {
        Self::UnknownName {
            kind: "genre",
            name: name.into(),
        }
    }

    pub(crate) fn unknown_tag(name: impl Into<String>) -> Self {
        Self::UnknownName {
            kind: "tag",
            name: name.into(),
        }
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

impl From<shelf_archive::ArchiveError> for CliError {
    fn from(err: shelf_archive::ArchiveError) -> Self {
        match err {
            shelf_archive::ArchiveError::Rejected(outcome) => Self::verification(outcome.to_string()),
            other => Self::archive(other.to_string()),
        }
    }
}
