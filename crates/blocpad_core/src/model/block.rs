//! Content block model.
//!
//! # Responsibility
//! - Define the tagged block variant stored inside files.
//! - Give every block a stable identity for edit/delete by id.
//!
//! # Invariants
//! - `id` is generated once and never reused for another block.
//! - Non-image blocks carry raw text; image blocks carry a path relative to
//!   the document's directory.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::document::now_timestamp;

/// Stable identifier for one content block.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type BlockId = Uuid;

/// Exhaustive content kind for one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Section heading text.
    Heading,
    /// Free-form paragraph text.
    Text,
    /// Preformatted code snippet.
    Code,
    /// URL opened by the presentation layer.
    Link,
    /// Asset-relative path to a copied image file.
    Image,
}

impl BlockKind {
    /// Wire/tag name for logging and diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Text => "text",
            Self::Code => "code",
            Self::Link => "link",
            Self::Image => "image",
        }
    }

    /// Whether content for this kind is an asset path instead of raw text.
    pub fn is_image(self) -> bool {
        matches!(self, Self::Image)
    }
}

/// One unit of content within a file.
///
/// Legacy payloads may lack `id` or `created`; serde back-fills them so
/// older documents stay loadable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Stable identity used for edit/delete, never structural equality.
    #[serde(default = "Uuid::new_v4")]
    pub id: BlockId,
    /// Serialized as `type` to match the document schema.
    #[serde(rename = "type")]
    pub kind: BlockKind,
    /// Raw text, or an asset-relative path for image blocks.
    pub content: String,
    /// ISO-8601 creation timestamp, informative only.
    #[serde(default)]
    pub created: String,
}

impl Block {
    /// Creates a block with a fresh id and creation timestamp.
    pub fn new(kind: BlockKind, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            content: content.into(),
            created: now_timestamp(),
        }
    }

    /// Discards imported provenance: new identity, creation time set to now.
    pub fn refresh_provenance(&mut self, now: &str) {
        self.id = Uuid::new_v4();
        self.created = now.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::{Block, BlockKind};

    #[test]
    fn block_serializes_kind_under_type_key() {
        let block = Block::new(BlockKind::Code, "fn main() {}");
        let json = serde_json::to_value(&block).expect("block should serialize");
        assert_eq!(json["type"], "code");
        assert_eq!(json["content"], "fn main() {}");
    }

    #[test]
    fn legacy_block_without_id_gets_generated_identity() {
        let raw = r#"{"type":"text","content":"buy milk"}"#;
        let block: Block = serde_json::from_str(raw).expect("legacy block should load");
        assert_eq!(block.kind, BlockKind::Text);
        assert!(!block.id.is_nil());
        assert!(block.created.is_empty());
    }

    #[test]
    fn unknown_kind_tag_is_rejected() {
        let raw = r#"{"type":"video","content":"x"}"#;
        assert!(serde_json::from_str::<Block>(raw).is_err());
    }
}
