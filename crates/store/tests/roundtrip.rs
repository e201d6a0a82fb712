use std::fs;

use tempfile::tempdir;

use album_core::{AddRequest, Collection, TOTAL_STICKERS};
use album_store::{load, save};

#[test]
fn missing_store_loads_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("collection.csv");

    let report = load(&path).unwrap();
    assert!(report.collection.is_empty());
    assert_eq!(report.skipped_rows, 0);
    // load never creates the file; the first save does
    assert!(!path.exists());
}

#[test]
fn first_save_creates_store_with_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("collection.csv");

    save(&path, &Collection::new()).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "sticker_number,amount\n");
}

/// Golden output snapshot: rows ascending by id, plain `<id>,<count>`
/// with no quoting. Previously-produced stores must stay readable, so
/// any change here must be deliberate.
#[test]
fn golden_store_output() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("collection.csv");

    let collection: Collection = [(17, 1), (2, 3), (720, 2), (1, 1)].into_iter().collect();
    save(&path, &collection).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        "sticker_number,amount\n1,1\n2,3\n17,1\n720,2\n"
    );
}

#[test]
fn roundtrip_preserves_collection() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("collection.csv");

    let collection: Collection = [(4, 1), (9, 2), (300, 5)].into_iter().collect();
    save(&path, &collection).unwrap();

    let report = load(&path).unwrap();
    assert_eq!(report.collection, collection);
    assert_eq!(report.skipped_rows, 0);
}

#[test]
fn save_load_save_is_byte_identical() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("collection.csv");

    let collection: Collection = [(1, 1), (50, 4), (700, 1)].into_iter().collect();
    save(&path, &collection).unwrap();
    let first = fs::read(&path).unwrap();

    let reloaded = load(&path).unwrap().collection;
    save(&path, &reloaded).unwrap();
    let second = fs::read(&path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn no_temp_file_left_behind() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("collection.csv");

    save(&path, &Collection::new()).unwrap();

    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["collection.csv".to_string()]);
}

#[test]
fn rejected_add_leaves_store_unchanged() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("collection.csv");

    let collection: Collection = [(5, 1)].into_iter().collect();
    save(&path, &collection).unwrap();
    let before = fs::read(&path).unwrap();

    // 800 is out of range: the whole request is rejected before any
    // mutation, so nothing is ever saved.
    assert!(AddRequest::new(vec![5, 800], TOTAL_STICKERS).is_err());

    let after = fs::read(&path).unwrap();
    assert_eq!(before, after);
}
