use blocpad_core::{
    BlockId, BlockKind, BlockService, BlockServiceError, DocumentStore, JsonDocumentStore,
    TreeService, Workspace, IMAGE_ASSET_DIR,
};
use tempfile::TempDir;

fn workspace_with_file() -> (TempDir, Workspace<JsonDocumentStore>) {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = JsonDocumentStore::new(dir.path().join("ws.bpad"));
    let mut ws = Workspace::open(store).expect("workspace opens");
    TreeService::new(&mut ws)
        .create_folder("Notes")
        .expect("folder created");
    TreeService::new(&mut ws)
        .create_file("Notes", "todo")
        .expect("file created");
    (dir, ws)
}

fn blocks(ws: &Workspace<JsonDocumentStore>) -> &Vec<blocpad_core::Block> {
    &ws.document().folders["Notes"].files["todo"].blocks
}

#[test]
fn add_block_appends_in_order_and_survives_reload() {
    let (_dir, mut ws) = workspace_with_file();
    let mut svc = BlockService::new(&mut ws);
    svc.add_block("Notes", "todo", BlockKind::Heading, "Groceries")
        .expect("heading added");
    svc.add_block("Notes", "todo", BlockKind::Text, "buy milk")
        .expect("text added");
    svc.add_block("Notes", "todo", BlockKind::Code, "fn main() {}")
        .expect("code added");

    let kinds: Vec<BlockKind> = blocks(&ws).iter().map(|b| b.kind).collect();
    assert_eq!(kinds, vec![BlockKind::Heading, BlockKind::Text, BlockKind::Code]);

    let reloaded = JsonDocumentStore::new(ws.location().to_path_buf())
        .load()
        .expect("document reloads");
    assert_eq!(reloaded.folders["Notes"].files["todo"].blocks, *blocks(&ws));
}

#[test]
fn add_block_trims_content_and_rejects_blank() {
    let (_dir, mut ws) = workspace_with_file();
    let mut svc = BlockService::new(&mut ws);

    svc.add_block("Notes", "todo", BlockKind::Text, "  padded  ")
        .expect("trimmed content ok");
    let err = svc
        .add_block("Notes", "todo", BlockKind::Text, "   ")
        .unwrap_err();
    assert!(matches!(err, BlockServiceError::EmptyContent));

    assert_eq!(blocks(&ws)[0].content, "padded");
}

#[test]
fn add_block_validates_folder_and_file() {
    let (_dir, mut ws) = workspace_with_file();
    let mut svc = BlockService::new(&mut ws);

    let err = svc
        .add_block("Missing", "todo", BlockKind::Text, "x")
        .unwrap_err();
    assert!(matches!(err, BlockServiceError::FolderNotFound(_)));

    let err = svc
        .add_block("Notes", "absent", BlockKind::Text, "x")
        .unwrap_err();
    assert!(matches!(err, BlockServiceError::FileNotFound { file, .. } if file == "absent"));
}

#[test]
fn edit_block_changes_kind_and_content_but_keeps_identity() {
    let (_dir, mut ws) = workspace_with_file();
    let id = BlockService::new(&mut ws)
        .add_block("Notes", "todo", BlockKind::Text, "plain")
        .expect("block added");
    let created = blocks(&ws)[0].created.clone();

    BlockService::new(&mut ws)
        .edit_block("Notes", "todo", id, BlockKind::Code, "let x = 1;")
        .expect("block edited");

    let block = &blocks(&ws)[0];
    assert_eq!(block.id, id);
    assert_eq!(block.created, created);
    assert_eq!(block.kind, BlockKind::Code);
    assert_eq!(block.content, "let x = 1;");
}

#[test]
fn edit_block_rejects_unknown_id() {
    let (_dir, mut ws) = workspace_with_file();
    BlockService::new(&mut ws)
        .add_block("Notes", "todo", BlockKind::Text, "keep")
        .expect("block added");

    let stray = BlockId::new_v4();
    let err = BlockService::new(&mut ws)
        .edit_block("Notes", "todo", stray, BlockKind::Text, "new")
        .unwrap_err();
    assert!(matches!(err, BlockServiceError::BlockNotFound(id) if id == stray));
    assert_eq!(blocks(&ws)[0].content, "keep");
}

#[test]
fn delete_block_removes_exactly_the_addressed_duplicate() {
    let (_dir, mut ws) = workspace_with_file();
    let mut svc = BlockService::new(&mut ws);
    let first = svc
        .add_block("Notes", "todo", BlockKind::Text, "same words")
        .expect("first added");
    let second = svc
        .add_block("Notes", "todo", BlockKind::Text, "same words")
        .expect("second added");

    svc.delete_block("Notes", "todo", first)
        .expect("first deleted");

    let remaining = blocks(&ws);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, second);
    assert_eq!(remaining[0].content, "same words");
}

#[test]
fn delete_block_preserves_order_of_the_rest() {
    let (_dir, mut ws) = workspace_with_file();
    let mut svc = BlockService::new(&mut ws);
    svc.add_block("Notes", "todo", BlockKind::Text, "one")
        .expect("added");
    let middle = svc
        .add_block("Notes", "todo", BlockKind::Text, "two")
        .expect("added");
    svc.add_block("Notes", "todo", BlockKind::Text, "three")
        .expect("added");

    svc.delete_block("Notes", "todo", middle)
        .expect("middle deleted");

    let contents: Vec<&str> = blocks(&ws).iter().map(|b| b.content.as_str()).collect();
    assert_eq!(contents, vec!["one", "three"]);
}

#[test]
fn image_block_copies_source_into_asset_dir() {
    let (dir, mut ws) = workspace_with_file();
    let source = dir.path().join("shot.png");
    std::fs::write(&source, b"fake png bytes").expect("write source image");

    let id = BlockService::new(&mut ws)
        .add_block("Notes", "todo", BlockKind::Image, source.to_str().unwrap())
        .expect("image block added");

    let block = blocks(&ws).iter().find(|b| b.id == id).expect("block present");
    assert!(block.content.starts_with(IMAGE_ASSET_DIR));
    assert!(block.content.ends_with(".png"));

    let copied = ws.base_dir().join(&block.content);
    let bytes = std::fs::read(copied).expect("asset copy exists");
    assert_eq!(bytes, b"fake png bytes");
}

#[test]
fn image_block_rejects_blank_and_missing_sources() {
    let (dir, mut ws) = workspace_with_file();
    let mut svc = BlockService::new(&mut ws);

    let err = svc
        .add_block("Notes", "todo", BlockKind::Image, "   ")
        .unwrap_err();
    assert!(matches!(err, BlockServiceError::MissingImageSource));

    let ghost = dir.path().join("nope.png");
    let err = svc
        .add_block("Notes", "todo", BlockKind::Image, ghost.to_str().unwrap())
        .unwrap_err();
    assert!(matches!(err, BlockServiceError::Asset(_)));
    assert!(blocks(&ws).is_empty());
}
