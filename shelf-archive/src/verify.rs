//! Archive verification.
//!
//! Verification is a small state machine over one open file handle:
//!
//! ```text
//! Start → Opened → EnvelopeRead → MagicOk → VersionOk → RecordsRead → HashOk → Done
//!                              ↘ MagicFail  ↘ VersionFail            ↘ HashFail
//! ```
//!
//! Any read attempt may instead move to `IoFail`. Every failure stage moves
//! straight to `Done`. The magic is checked before the version, and the
//! version before any record is read. All declared records are read and
//! hashed before the digest is compared, so a short record stream is a read
//! error rather than a smaller archive.

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::envelope::{FileEnvelope, FILE_MAGIC, FORMAT_VERSION, HEADER_SIZE};
use crate::record::{FixedRecord, RECORD_SIZE};

/// Classified result of verifying an archive file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    Ok,
    FileNotFound {
        path: PathBuf,
    },
    InvalidMagic {
        path: PathBuf,
        found: u32,
    },
    /// The file declares a newer format than this build understands.
    InvalidVersion {
        path: PathBuf,
        declared: u16,
        supported: u16,
    },
    HashMismatch {
        path: PathBuf,
        expected: String,
        computed: String,
    },
    ReadError {
        path: PathBuf,
        reason: String,
    },
}

impl VerifyOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Short machine-friendly name of the outcome.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::FileNotFound { .. } => "file-not-found",
            Self::InvalidMagic { .. } => "invalid-magic",
            Self::InvalidVersion { .. } => "invalid-version",
            Self::HashMismatch { .. } => "hash-mismatch",
            Self::ReadError { .. } => "read-error",
        }
    }
}

impl fmt::Display for VerifyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "File verified"),
            Self::FileNotFound { path } => write!(f, "File not found: {}", path.display()),
            Self::InvalidMagic { path, found } => write!(
                f,
                "Not a collection archive: {} (magic 0x{:08X}, expected 0x{:08X})",
                path.display(),
                found,
                FILE_MAGIC
            ),
            Self::InvalidVersion {
                path,
                declared,
                supported,
            } => write!(
                f,
                "Unsupported archive version {} in {} (this build reads up to {})",
                declared,
                path.display(),
                supported
            ),
            Self::HashMismatch {
                path,
                expected,
                computed,
            } => write!(
                f,
                "Checksum mismatch in {}: header has {}, records hash to {}",
                path.display(),
                if expected.is_empty() { "<empty>" } else { expected },
                computed
            ),
            Self::ReadError { path, reason } => {
                write!(f, "Read error in {}: {}", path.display(), reason)
            }
        }
    }
}

/// Stages of the verification state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyStage {
    Start,
    Opened,
    EnvelopeRead,
    MagicOk,
    MagicFail,
    VersionOk,
    VersionFail,
    RecordsRead,
    HashOk,
    HashFail,
    IoFail,
    Done,
}

/// Outcome of a verification pass plus every complete record it read.
#[derive(Debug)]
pub(crate) struct VerifiedFile {
    pub outcome: VerifyOutcome,
    pub records: Vec<FixedRecord>,
}

/// Verify an archive without keeping its records.
pub fn verify(path: &Path) -> VerifyOutcome {
    verify_and_read(path).outcome
}

/// Verify an archive, returning the records that were hashed.
///
/// The file is opened once; callers consume exactly the bytes that were
/// verified.
pub(crate) fn verify_and_read(path: &Path) -> VerifiedFile {
    let mut run = VerifyRun::new(path);
    let outcome = loop {
        match run.step() {
            Ok(VerifyStage::Done) => {
                run.enter(VerifyStage::Done);
                break VerifyOutcome::Ok;
            }
            Ok(next) => run.enter(next),
            Err((fail_stage, outcome)) => {
                run.enter(fail_stage);
                run.enter(VerifyStage::Done);
                break outcome;
            }
        }
    };

    VerifiedFile {
        outcome,
        records: run.records,
    }
}

type StepResult = Result<VerifyStage, (VerifyStage, VerifyOutcome)>;

struct VerifyRun<'a> {
    path: &'a Path,
    stage: VerifyStage,
    reader: Option<BufReader<File>>,
    envelope: Option<FileEnvelope>,
    records: Vec<FixedRecord>,
    computed_hash: String,
}

impl<'a> VerifyRun<'a> {
    fn new(path: &'a Path) -> Self {
        Self {
            path,
            stage: VerifyStage::Start,
            reader: None,
            envelope: None,
            records: Vec::new(),
            computed_hash: String::new(),
        }
    }

    fn enter(&mut self, next: VerifyStage) {
        log::debug!("verify {}: {:?} -> {:?}", self.path.display(), self.stage, next);
        self.stage = next;
    }

    fn step(&mut self) -> StepResult {
        match self.stage {
            VerifyStage::Start => self.open(),
            VerifyStage::Opened => self.read_envelope(),
            VerifyStage::EnvelopeRead => self.check_magic(),
            VerifyStage::MagicOk => self.check_version(),
            VerifyStage::VersionOk => self.read_records(),
            VerifyStage::RecordsRead => self.compare_hash(),
            VerifyStage::HashOk => Ok(VerifyStage::Done),
            VerifyStage::MagicFail
            | VerifyStage::VersionFail
            | VerifyStage::HashFail
            | VerifyStage::IoFail
            | VerifyStage::Done => Err((VerifyStage::Done, self.read_error("verification already finished"))),
        }
    }

    fn open(&mut self) -> StepResult {
        match File::open(self.path) {
            Ok(file) => {
                self.reader = Some(BufReader::new(file));
                Ok(VerifyStage::Opened)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err((
                VerifyStage::IoFail,
                VerifyOutcome::FileNotFound {
                    path: self.path.to_path_buf(),
                },
            )),
            Err(e) => Err(self.io_fail(format!("cannot open: {e}"))),
        }
    }

    fn read_envelope(&mut self) -> StepResult {
        let Some(reader) = self.reader.as_mut() else {
            return Err(self.io_fail("file is not open".to_string()));
        };
        let mut header = [0u8; HEADER_SIZE];
        match reader.read_exact(&mut header) {
            Ok(()) => {
                self.envelope = Some(FileEnvelope::from_bytes(&header));
                Ok(VerifyStage::EnvelopeRead)
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                Err(self.io_fail("file is shorter than the header".to_string()))
            }
            Err(e) => Err(self.io_fail(format!("cannot read header: {e}"))),
        }
    }

    fn check_magic(&mut self) -> StepResult {
        let found = self.envelope.as_ref().map_or(0, |env| env.magic);
        if found == FILE_MAGIC {
            Ok(VerifyStage::MagicOk)
        } else {
            Err((
                VerifyStage::MagicFail,
                VerifyOutcome::InvalidMagic {
                    path: self.path.to_path_buf(),
                    found,
                },
            ))
        }
    }

    fn check_version(&mut self) -> StepResult {
        let declared = self.envelope.as_ref().map_or(0, |env| env.version);
        if declared <= FORMAT_VERSION {
            Ok(VerifyStage::VersionOk)
        } else {
            Err((
                VerifyStage::VersionFail,
                VerifyOutcome::InvalidVersion {
                    path: self.path.to_path_buf(),
                    declared,
                    supported: FORMAT_VERSION,
                },
            ))
        }
    }

    fn read_records(&mut self) -> StepResult {
        let declared = self.envelope.as_ref().map_or(0, |env| env.record_count);
        let Some(reader) = self.reader.as_mut() else {
            return Err(self.io_fail("file is not open".to_string()));
        };

        // Capacity is capped so a corrupt count cannot force a huge allocation.
        self.records.reserve((declared as usize).min(1024));
        let mut hasher = Sha256::new();
        let mut buf = [0u8; RECORD_SIZE];
        for index in 0..declared {
            if let Err(e) = reader.read_exact(&mut buf) {
                let reason = if e.kind() == io::ErrorKind::UnexpectedEof {
                    format!("record stream ends after {index} of {declared} records")
                } else {
                    format!("cannot read record {index}: {e}")
                };
                return Err(self.io_fail(reason));
            }
            hasher.update(buf);
            self.records.push(FixedRecord::from_bytes(&buf));
        }

        self.computed_hash = hex::encode(hasher.finalize());
        Ok(VerifyStage::RecordsRead)
    }

    fn compare_hash(&mut self) -> StepResult {
        let expected = self
            .envelope
            .as_ref()
            .map(FileEnvelope::stored_hash)
            .unwrap_or_default();
        if expected == self.computed_hash {
            Ok(VerifyStage::HashOk)
        } else {
            Err((
                VerifyStage::HashFail,
                VerifyOutcome::HashMismatch {
                    path: self.path.to_path_buf(),
                    expected,
                    computed: self.computed_hash.clone(),
                },
            ))
        }
    }

    fn read_error(&self, reason: &str) -> VerifyOutcome {
        VerifyOutcome::ReadError {
            path: self.path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    fn io_fail(&self, reason: String) -> (VerifyStage, VerifyOutcome) {
        (VerifyStage::IoFail, self.read_error(&reason))
    }
}

#[cfg(test)]
#[path = "tests/verify_tests.rs"]
mod tests;
