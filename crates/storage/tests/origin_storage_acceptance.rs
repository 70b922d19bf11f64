use std::sync::Arc;

use storage::{open, FileStore, KeyValueStore, StorageError};

#[test]
fn directory_location_survives_process_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let location = dir.path().to_string_lossy().to_string();

    let first = open(&location, "https://ableed.example").expect("open");
    first.set("ableed:auth", "1").expect("set");
    drop(first);

    let second = open(&location, "https://ableed.example").expect("reopen");
    assert_eq!(second.get("ableed:auth").expect("get").as_deref(), Some("1"));

    second.remove("ableed:auth").expect("remove");
    let third = open(&location, "https://ableed.example").expect("reopen again");
    assert_eq!(third.get("ableed:auth").expect("get"), None);
}

#[test]
fn shared_handle_sees_writes_from_every_clone() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store: Arc<FileStore> =
        Arc::new(FileStore::open(dir.path(), "https://ableed.example").expect("open"));
    let writer = Arc::clone(&store);

    writer.set("ableed:auth", "1").expect("set");
    assert_eq!(store.get("ableed:auth").expect("get").as_deref(), Some("1"));
}

#[test]
fn unreadable_data_dir_surfaces_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "file in the way").expect("write blocker");

    let err = FileStore::open(&blocker, "https://ableed.example").expect_err("must fail");
    assert!(matches!(err, StorageError::Io { .. }));
}
