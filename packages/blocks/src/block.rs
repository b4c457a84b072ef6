//! The block tree.
//!
//! A campaign's body is a flat list of [`Block`]s; the `columns` kind nests
//! further block lists inside typed [`Column`]s, recursively. Node identity
//! is the string `id`, unique across the whole tree.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::settings::BlockSettings;

/// Every block kind the palette offers. `Columns` is the only container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Title,
    Text,
    Image,
    Video,
    Button,
    Logo,
    Social,
    Html,
    Payment,
    Divider,
    Product,
    Navigation,
    Spacer,
    Columns,
}

impl BlockKind {
    pub const ALL: [BlockKind; 14] = [
        BlockKind::Title,
        BlockKind::Text,
        BlockKind::Image,
        BlockKind::Video,
        BlockKind::Button,
        BlockKind::Logo,
        BlockKind::Social,
        BlockKind::Html,
        BlockKind::Payment,
        BlockKind::Divider,
        BlockKind::Product,
        BlockKind::Navigation,
        BlockKind::Spacer,
        BlockKind::Columns,
    ];

    pub fn is_container(&self) -> bool {
        matches!(self, BlockKind::Columns)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlockKind::Title => "title",
            BlockKind::Text => "text",
            BlockKind::Image => "image",
            BlockKind::Video => "video",
            BlockKind::Button => "button",
            BlockKind::Logo => "logo",
            BlockKind::Social => "social",
            BlockKind::Html => "html",
            BlockKind::Payment => "payment",
            BlockKind::Divider => "divider",
            BlockKind::Product => "product",
            BlockKind::Navigation => "navigation",
            BlockKind::Spacer => "spacer",
            BlockKind::Columns => "columns",
        };
        write!(f, "{}", name)
    }
}

/// A single content block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    #[serde(flatten)]
    pub settings: BlockSettings,
}

impl Block {
    pub fn new(id: impl Into<String>, settings: BlockSettings) -> Self {
        Self {
            id: id.into(),
            settings,
        }
    }

    pub fn kind(&self) -> BlockKind {
        self.settings.kind()
    }

    /// Number of blocks in this subtree, the block itself included.
    pub fn subtree_len(&self) -> usize {
        let mut count = 1;
        if let Some(cols) = self.settings.columns() {
            for column in &cols.columns {
                count += block_count(&column.blocks);
            }
        }
        count
    }
}

/// One cell of a `columns` block; `blocks` follows the full block shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Column {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            blocks: Vec::new(),
        }
    }
}

/// Total block count across a tree, nested column content included.
pub fn block_count(blocks: &[Block]) -> usize {
    blocks.iter().map(Block::subtree_len).sum()
}

/// Locate a block anywhere in the tree by id.
pub fn find_block<'a>(blocks: &'a [Block], id: &str) -> Option<&'a Block> {
    for block in blocks {
        if block.id == id {
            return Some(block);
        }
        if let Some(cols) = block.settings.columns() {
            for column in &cols.columns {
                if let Some(found) = find_block(&column.blocks, id) {
                    return Some(found);
                }
            }
        }
    }
    None
}

pub fn find_block_mut<'a>(blocks: &'a mut [Block], id: &str) -> Option<&'a mut Block> {
    for block in blocks {
        if block.id == id {
            return Some(block);
        }
        if let Some(cols) = block.settings.columns_mut() {
            for column in &mut cols.columns {
                if let Some(found) = find_block_mut(&mut column.blocks, id) {
                    return Some(found);
                }
            }
        }
    }
    None
}

/// Locate a column anywhere in the tree by its id.
pub fn find_column_mut<'a>(blocks: &'a mut [Block], column_id: &str) -> Option<&'a mut Column> {
    for block in blocks {
        if let Some(cols) = block.settings.columns_mut() {
            for column in &mut cols.columns {
                if column.id == column_id {
                    return Some(column);
                }
                if let Some(found) = find_column_mut(&mut column.blocks, column_id) {
                    return Some(found);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id_generator::IdGenerator;
    use crate::settings::{ColumnsSettings, RichTextSettings};

    fn text_block(id: &str, content: &str) -> Block {
        Block::new(
            id,
            BlockSettings::Text(RichTextSettings {
                content: Some(content.to_string()),
                ..Default::default()
            }),
        )
    }

    fn columns_block(id: &str, columns: Vec<Column>) -> Block {
        let count = columns.len();
        Block::new(
            id,
            BlockSettings::Columns(ColumnsSettings {
                columns,
                column_count: count,
                layout: vec![100.0 / count as f64; count],
                gap: None,
                padding: None,
                background_color: None,
            }),
        )
    }

    #[test]
    fn test_find_block_in_nested_column() {
        let mut col = Column::new("col-1");
        col.blocks.push(text_block("t-2", "nested"));
        let tree = vec![
            text_block("t-1", "top"),
            columns_block("c-1", vec![col, Column::new("col-2")]),
        ];

        assert!(find_block(&tree, "t-1").is_some());
        assert!(find_block(&tree, "t-2").is_some());
        assert!(find_block(&tree, "c-1").is_some());
        assert!(find_block(&tree, "missing").is_none());
    }

    #[test]
    fn test_block_count_includes_nested_content() {
        let mut col = Column::new("col-1");
        col.blocks.push(text_block("t-2", "a"));
        col.blocks.push(text_block("t-3", "b"));
        let tree = vec![
            text_block("t-1", "top"),
            columns_block("c-1", vec![col, Column::new("col-2")]),
        ];

        // t-1 + c-1 + t-2 + t-3
        assert_eq!(block_count(&tree), 4);
    }

    #[test]
    fn test_block_json_round_trip() {
        let mut ids = IdGenerator::from_seed("doc".to_string());
        let block = Block::new(
            ids.new_id(),
            BlockSettings::default_for(BlockKind::Columns, &mut ids),
        );

        let json = serde_json::to_string(&block).unwrap();
        let parsed: Block = serde_json::from_str(&json).unwrap();

        assert_eq!(block, parsed);
        assert_eq!(parsed.kind(), BlockKind::Columns);
    }

    #[test]
    fn test_wire_format_has_type_and_settings_keys() {
        let block = text_block("b-1", "hi");
        let json = serde_json::to_value(&block).unwrap();

        assert_eq!(json["id"], "b-1");
        assert_eq!(json["type"], "text");
        assert_eq!(json["settings"]["content"], "hi");
    }
}
