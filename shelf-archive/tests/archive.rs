use std::path::{Path, PathBuf};

use shelf_archive::*;
use shelf_catalog::types::CatalogEntry;

fn portal() -> CatalogEntry {
    CatalogEntry {
        id: 12,
        disk_space: 15.0,
        ram_usage: 2.0,
        vram_required: 1.0,
        genre_id: Some(8),
        genre: Some("Puzzle".to_string()),
        completed: true,
        owner_id: 1,
        rating: Some(9),
        tags: "classic, short".to_string(),
        ..CatalogEntry::new("Portal")
    }
}

fn sample_entries() -> Vec<CatalogEntry> {
    vec![
        portal(),
        CatalogEntry {
            id: 13,
            disk_space: 3.0,
            ram_usage: 0.5,
            vram_required: 0.5,
            owner_id: 1,
            is_installed: true,
            url: "https://store.example/doom".to_string(),
            notes: "Rip and tear; ünïcödé survives too".to_string(),
            ..CatalogEntry::new("Doom")
        },
    ]
}

fn export_to(dir: &Path, entries: &[CatalogEntry]) -> PathBuf {
    let path = dir.join("collection.tmp");
    export(&path, entries, ExportOptions::default(), None).unwrap();
    path
}

fn rewrite(path: &Path, edit: impl FnOnce(&mut Vec<u8>)) {
    let mut bytes = std::fs::read(path).unwrap();
    edit(&mut bytes);
    std::fs::write(path, bytes).unwrap();
}

#[test]
fn export_then_view_returns_same_entries() {
    let dir = tempfile::tempdir().unwrap();
    let entries = sample_entries();
    let path = export_to(dir.path(), &entries);

    let view = read_for_view(&path);
    assert!(view.outcome.is_ok());
    assert_eq!(view.entries, entries);
}

#[test]
fn file_layout_is_header_then_records() {
    let dir = tempfile::tempdir().unwrap();
    let entries = sample_entries();
    let path = export_to(dir.path(), &entries);

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), HEADER_SIZE + 2 * RECORD_SIZE);
    assert_eq!(&bytes[0..4], &FILE_MAGIC.to_le_bytes());
    assert_eq!(u16::from_le_bytes([bytes[4], bytes[5]]), FORMAT_VERSION);
    assert_eq!(u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]), 2);
    assert_eq!(&bytes[10..74], sha256_hex(&bytes[HEADER_SIZE..]).as_bytes());
}

#[test]
fn summary_reports_hash_and_count() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.tmp");
    let summary = export(&path, &sample_entries(), ExportOptions::default(), None).unwrap();
    assert_eq!(summary.records, 2);
    assert_eq!(summary.truncated_records, 0);
    assert_eq!(summary.path, path);

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(summary.hash, sha256_hex(&bytes[HEADER_SIZE..]));
}

#[test]
fn in_place_and_atomic_write_identical_files() {
    let dir = tempfile::tempdir().unwrap();
    let atomic = dir.path().join("atomic.tmp");
    let in_place = dir.path().join("in_place.tmp");
    let entries = sample_entries();
    export(&atomic, &entries, ExportOptions { mode: WriteMode::Atomic }, None).unwrap();
    export(&in_place, &entries, ExportOptions { mode: WriteMode::InPlace }, None).unwrap();
    assert_eq!(std::fs::read(&atomic).unwrap(), std::fs::read(&in_place).unwrap());
}

#[test]
fn long_name_is_cut_to_255_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let name = "N".repeat(300);
    let path = export_to(dir.path(), &[CatalogEntry::new(name.clone())]);

    let view = read_for_view(&path);
    assert!(view.outcome.is_ok());
    assert_eq!(view.entries[0].name, &name[..255]);
}

#[test]
fn multibyte_cut_is_lossy_but_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    // The genre field keeps 63 bytes: 31 whole characters and half of the next.
    let genre = "é".repeat(40);
    let entry = CatalogEntry {
        genre: Some(genre),
        ..CatalogEntry::new("Café")
    };
    let path = export_to(dir.path(), &[entry]);

    let view = read_for_view(&path);
    let decoded = view.entries[0].genre.clone().unwrap();
    assert_eq!(decoded, format!("{}\u{FFFD}", "é".repeat(31)));
    assert_eq!(view.entries[0].name, "Café");
}

#[test]
fn verify_accepts_fresh_exports() {
    let dir = tempfile::tempdir().unwrap();
    let path = export_to(dir.path(), &sample_entries());
    assert_eq!(verify(&path), VerifyOutcome::Ok);

    let empty = dir.path().join("empty.tmp");
    export(&empty, &[], ExportOptions::default(), None).unwrap();
    assert_eq!(std::fs::metadata(&empty).unwrap().len() as usize, HEADER_SIZE);
    assert_eq!(verify(&empty), VerifyOutcome::Ok);
}

#[test]
fn verify_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.tmp");
    assert_eq!(verify(&path), VerifyOutcome::FileNotFound { path });
}

#[test]
fn any_flipped_record_byte_is_hash_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let entries = sample_entries();
    let path = export_to(dir.path(), &entries);
    let pristine = std::fs::read(&path).unwrap();

    for offset in [HEADER_SIZE, HEADER_SIZE + 300, HEADER_SIZE + RECORD_SIZE + 1000, pristine.len() - 1] {
        let mut bytes = pristine.clone();
        bytes[offset] ^= 0x01;
        std::fs::write(&path, &bytes).unwrap();
        match verify(&path) {
            VerifyOutcome::HashMismatch { expected, computed, .. } => {
                assert_eq!(expected, sha256_hex(&pristine[HEADER_SIZE..]));
                assert_eq!(computed, sha256_hex(&bytes[HEADER_SIZE..]));
            }
            other => panic!("offset {offset}: expected HashMismatch, got {other:?}"),
        }
    }
}

#[test]
fn corrupted_magic_is_invalid_magic() {
    let dir = tempfile::tempdir().unwrap();
    let path = export_to(dir.path(), &sample_entries());
    rewrite(&path, |bytes| bytes[0] = b'X');
    assert!(matches!(verify(&path), VerifyOutcome::InvalidMagic { .. }));
}

#[test]
fn newer_version_is_invalid_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = export_to(dir.path(), &sample_entries());
    rewrite(&path, |bytes| {
        bytes[4..6].copy_from_slice(&(FORMAT_VERSION + 1).to_le_bytes());
    });
    assert_eq!(
        verify(&path),
        VerifyOutcome::InvalidVersion {
            path: path.clone(),
            declared: FORMAT_VERSION + 1,
            supported: FORMAT_VERSION,
        }
    );
}

#[test]
fn older_version_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = export_to(dir.path(), &sample_entries());
    rewrite(&path, |bytes| {
        bytes[4..6].copy_from_slice(&(FORMAT_VERSION - 1).to_le_bytes());
    });
    assert_eq!(verify(&path), VerifyOutcome::Ok);
}

#[test]
fn magic_is_checked_before_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = export_to(dir.path(), &sample_entries());
    rewrite(&path, |bytes| {
        bytes[0] = 0;
        bytes[4..6].copy_from_slice(&99u16.to_le_bytes());
    });
    assert!(matches!(verify(&path), VerifyOutcome::InvalidMagic { .. }));
}

#[test]
fn declared_five_with_two_present_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = export_to(dir.path(), &sample_entries());
    rewrite(&path, |bytes| bytes[6..10].copy_from_slice(&5u32.to_le_bytes()));
    assert!(matches!(verify(&path), VerifyOutcome::ReadError { .. }));

    // Viewing still shows the two complete records.
    let view = read_for_view(&path);
    assert_eq!(view.outcome.kind(), "read-error");
    assert_eq!(view.entries.len(), 2);
}

#[test]
fn view_is_fail_open_on_hash_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let path = export_to(dir.path(), &sample_entries());
    rewrite(&path, |bytes| bytes[HEADER_SIZE + 4] = b'Q');

    let view = read_for_view(&path);
    assert!(matches!(view.outcome, VerifyOutcome::HashMismatch { .. }));
    assert_eq!(view.entries.len(), 2);
    assert_eq!(view.entries[0].name, "Qortal");
}

#[test]
fn view_of_foreign_file_has_no_entries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, vec![b'#'; 4096]).unwrap();

    let view = read_for_view(&path);
    assert!(matches!(view.outcome, VerifyOutcome::InvalidMagic { .. }));
    assert!(view.entries.is_empty());
}
