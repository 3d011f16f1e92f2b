use super::*;
use crate::envelope::FileEnvelope;
use shelf_catalog::types::CatalogEntry;

fn write_archive(dir: &Path, names: &[&str]) -> PathBuf {
    let mut records = Vec::new();
    for name in names {
        records.extend_from_slice(&FixedRecord::encode(&CatalogEntry::new(*name)).to_bytes());
    }
    let mut bytes = FileEnvelope::build(&records).to_bytes().to_vec();
    bytes.extend_from_slice(&records);
    let path = dir.join("collection.tmp");
    std::fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn verified_file_carries_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_archive(dir.path(), &["Doom", "Myst"]);
    let verified = verify_and_read(&path);
    assert!(verified.outcome.is_ok());
    let names: Vec<_> = verified.records.iter().map(|r| r.name.to_string_lossy()).collect();
    assert_eq!(names, vec!["Doom", "Myst"]);
}

#[test]
fn short_stream_keeps_complete_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_archive(dir.path(), &["Doom", "Myst"]);
    let mut bytes = std::fs::read(&path).unwrap();
    bytes.truncate(HEADER_SIZE + RECORD_SIZE + 10);
    std::fs::write(&path, bytes).unwrap();

    let verified = verify_and_read(&path);
    match &verified.outcome {
        VerifyOutcome::ReadError { reason, .. } => {
            assert!(reason.contains("1 of 2"), "unexpected reason: {reason}")
        }
        other => panic!("expected ReadError, got {other:?}"),
    }
    assert_eq!(verified.records.len(), 1);
}

#[test]
fn file_shorter_than_header_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stub.tmp");
    std::fs::write(&path, b"PMET").unwrap();
    assert_eq!(verify(&path).kind(), "read-error");
}

#[test]
fn outcome_messages_carry_context() {
    let path = PathBuf::from("backup.tmp");
    let version = VerifyOutcome::InvalidVersion {
        path: path.clone(),
        declared: 5,
        supported: 4,
    };
    let text = version.to_string();
    assert!(text.contains('5') && text.contains('4') && text.contains("backup.tmp"));

    let mismatch = VerifyOutcome::HashMismatch {
        path,
        expected: "aa".to_string(),
        computed: "bb".to_string(),
    };
    let text = mismatch.to_string();
    assert!(text.contains("aa") && text.contains("bb"));
    assert!(!mismatch.is_ok());
}
