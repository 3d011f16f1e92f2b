use shelf_archive::{export, read_for_view, ExportOptions, HEADER_SIZE};

use super::*;

fn write_portal(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("a.tmp");
    let entry = CatalogEntry {
        rating: Some(9),
        tags: "classic, short".to_string(),
        ..CatalogEntry::new("Portal")
    };
    export(&path, &[entry], ExportOptions::default(), None).unwrap();
    path
}

#[test]
fn json_for_tampered_file_is_a_single_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_portal(dir.path());
    let mut bytes = std::fs::read(&path).unwrap();
    bytes[HEADER_SIZE + 20] ^= 0xFF;
    std::fs::write(&path, bytes).unwrap();

    let view = read_for_view(&path);
    assert!(!view.outcome.is_ok());
    let text = render_json(&path, &view).unwrap();
    assert!(text.starts_with('{'));

    let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(doc["verified"], false);
    assert!(doc["problem"].as_str().unwrap().contains("Checksum mismatch"));
    assert_eq!(doc["entries"].as_array().unwrap().len(), 1);
}

#[test]
fn json_for_verified_file_has_no_problem() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_portal(dir.path());

    let text = render_json(&path, &read_for_view(&path)).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(doc["verified"], true);
    assert!(doc["problem"].is_null());
    assert_eq!(doc["entries"][0]["name"], "Portal");
    assert_eq!(doc["entries"][0]["rating"], 9);
    assert_eq!(doc["entries"][0]["tags"], "classic, short");
}
