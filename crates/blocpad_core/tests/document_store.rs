use blocpad_core::{
    BlockKind, BlockService, DocumentStore, JsonDocumentStore, StoreError, TreeService, Workspace,
};
use tempfile::TempDir;

fn temp_store() -> (TempDir, JsonDocumentStore) {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = JsonDocumentStore::new(dir.path().join("ws.bpad"));
    (dir, store)
}

#[test]
fn ensure_default_creates_an_empty_document() {
    let (_dir, store) = temp_store();

    store.ensure_default().expect("first ensure succeeds");
    let document = store.load().expect("fresh document loads");

    assert_eq!(document.meta.app, "Blocpad");
    assert_eq!(document.meta.version, "1.0");
    assert!(!document.meta.created.is_empty());
    assert!(document.folders.is_empty());
}

#[test]
fn ensure_default_never_overwrites_an_existing_document() {
    let (_dir, store) = temp_store();
    let mut ws = Workspace::open(store).expect("workspace opens");
    TreeService::new(&mut ws)
        .create_folder("Keep")
        .expect("folder created");

    let store = JsonDocumentStore::new(ws.location().to_path_buf());
    store.ensure_default().expect("repeat ensure succeeds");

    let reloaded = store.load().expect("document reloads");
    assert!(reloaded.folders.contains_key("Keep"));
}

#[test]
fn save_then_load_round_trips_modulo_last_modified() {
    let (_dir, store) = temp_store();
    let mut ws = Workspace::open(store).expect("workspace opens");

    TreeService::new(&mut ws)
        .create_folder("Notes")
        .expect("folder created");
    TreeService::new(&mut ws)
        .create_file("Notes", "todo")
        .expect("file created");
    BlockService::new(&mut ws)
        .add_block("Notes", "todo", BlockKind::Text, "buy milk")
        .expect("block added");

    let in_memory = ws.document().clone();
    let reloaded = JsonDocumentStore::new(ws.location().to_path_buf())
        .load()
        .expect("document reloads");

    assert_eq!(reloaded.folders, in_memory.folders);
    assert_eq!(reloaded.meta.created, in_memory.meta.created);
    assert_eq!(reloaded.meta.last_modified, in_memory.meta.last_modified);
}

#[test]
fn load_reports_unreadable_file_as_io_error() {
    let (_dir, store) = temp_store();
    let err = store.load().unwrap_err();
    assert!(matches!(err, StoreError::Io(_)));
}

#[test]
fn load_reports_malformed_json_as_json_error() {
    let (dir, store) = temp_store();
    std::fs::write(dir.path().join("ws.bpad"), "{not json").expect("write garbage");

    let err = store.load().unwrap_err();
    assert!(matches!(err, StoreError::Json(_)));
}

#[test]
fn load_backfills_missing_meta_key() {
    let (dir, store) = temp_store();
    std::fs::write(dir.path().join("ws.bpad"), r#"{"folders":{}}"#).expect("write document");

    let document = store.load().expect("partial document loads");
    assert_eq!(document.meta.app, "Blocpad");
    assert!(!document.meta.created.is_empty());
}

#[test]
fn save_updates_last_modified() {
    let (_dir, store) = temp_store();
    let mut ws = Workspace::open(store).expect("workspace opens");
    let before = ws.document().meta.last_modified.clone();

    TreeService::new(&mut ws)
        .create_folder("Later")
        .expect("folder created");

    assert_ne!(ws.document().meta.last_modified, before);
    assert!(!ws.document().meta.last_modified.is_empty());
}
