//! # Tree Mutations
//!
//! High-level structural operations on the block tree.
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: Each mutation represents a semantic operation
//! 2. **Tree-safe**: Container content moves and deletes as one subtree
//! 3. **Resilient**: Lookup misses no-op instead of erroring
//! 4. **Total**: A block being moved is never dropped, even when its drop
//!    target vanished mid-operation
//!
//! ## Mutation Semantics
//!
//! ### Reorder
//! - Removes the block from wherever it sits (root or any nested column)
//! - Reinserts before the target block, or appends when the target is a
//!   column or the root canvas sentinel
//! - Same-id reorder leaves the tree untouched
//!
//! ### Delete
//! - Removes the block and all nested column content
//! - Clears selection when the selected block went with it
//!
//! ### Duplicate / AddTemplateBlocks
//! - Deep-clone with recursively re-issued ids, for every block and column
//!   in the subtree

use serde::{Deserialize, Serialize};
use tracing::warn;

use mailcraft_blocks::{find_block, find_column_mut, Block, BlockKind, BlockSettings, IdGenerator};

use crate::document::{Document, ROOT_CANVAS};

/// Structural operations on the block tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Add a new block with palette defaults, appended to the root canvas
    /// or into the named column
    AddBlock {
        kind: BlockKind,
        container_id: Option<String>,
    },

    /// Shallow-merge a settings patch into the block with this id
    UpdateBlock {
        id: String,
        patch: BlockSettings,
    },

    /// Remove a block (and any nested column content) from the tree
    DeleteBlock {
        id: String,
    },

    /// Deep-clone a subtree and insert it right after the original
    DuplicateBlock {
        id: String,
    },

    /// Move a block before `over_id`, or append when `over_id` names a
    /// column or the root canvas
    ReorderBlocks {
        active_id: String,
        over_id: String,
    },

    /// Adopt an externally supplied block array (template or prebuilt
    /// section) into the target container
    AddTemplateBlocks {
        blocks: Vec<Block>,
        container_id: Option<String>,
    },
}

/// Whether a mutation changed the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Changed,
    Ignored,
}

impl Applied {
    pub fn changed(&self) -> bool {
        matches!(self, Applied::Changed)
    }
}

impl Mutation {
    /// Apply this mutation to a document's tree. Never fails: unknown ids
    /// and containers make the operation a no-op.
    pub(crate) fn apply_to(&self, doc: &mut Document) -> Applied {
        match self {
            Mutation::AddBlock { kind, container_id } => {
                apply_add(doc, *kind, container_id.as_deref())
            }
            Mutation::UpdateBlock { id, patch } => apply_update(doc, id, patch),
            Mutation::DeleteBlock { id } => apply_delete(doc, id),
            Mutation::DuplicateBlock { id } => apply_duplicate(doc, id),
            Mutation::ReorderBlocks { active_id, over_id } => {
                apply_reorder(doc, active_id, over_id)
            }
            Mutation::AddTemplateBlocks {
                blocks,
                container_id,
            } => apply_add_template(doc, blocks, container_id.as_deref()),
        }
    }
}

fn apply_add(doc: &mut Document, kind: BlockKind, container_id: Option<&str>) -> Applied {
    let id = doc.ids.new_id();
    let settings = BlockSettings::default_for(kind, &mut doc.ids);
    let block = Block::new(id.clone(), settings);

    match append_to_container(&mut doc.blocks, container_id, vec![block]) {
        Ok(()) => {
            doc.selected = Some(id);
            Applied::Changed
        }
        Err(_) => {
            warn!(
                container = container_id.unwrap_or(ROOT_CANVAS),
                kind = %kind,
                "add target not found, ignoring"
            );
            Applied::Ignored
        }
    }
}

fn apply_update(doc: &mut Document, id: &str, patch: &BlockSettings) -> Applied {
    let Some(block) = mailcraft_blocks::find_block_mut(&mut doc.blocks, id) else {
        warn!(id, "update target not found, ignoring");
        return Applied::Ignored;
    };

    if block.settings.merge(patch.clone()) {
        Applied::Changed
    } else {
        warn!(
            id,
            expected = %block.kind(),
            got = %patch.kind(),
            "settings patch kind mismatch, ignoring"
        );
        Applied::Ignored
    }
}

fn apply_delete(doc: &mut Document, id: &str) -> Applied {
    if remove_block(&mut doc.blocks, id).is_none() {
        return Applied::Ignored;
    }

    // The selected block may have been the target or nested inside it.
    if let Some(selected) = doc.selected.as_deref() {
        if find_block(&doc.blocks, selected).is_none() {
            doc.selected = None;
        }
    }
    Applied::Changed
}

fn apply_duplicate(doc: &mut Document, id: &str) -> Applied {
    match duplicate_in(&mut doc.blocks, id, &mut doc.ids) {
        Some(clone_id) => {
            doc.selected = Some(clone_id);
            Applied::Changed
        }
        None => {
            warn!(id, "duplicate target not found, ignoring");
            Applied::Ignored
        }
    }
}

fn apply_reorder(doc: &mut Document, active_id: &str, over_id: &str) -> Applied {
    if active_id == over_id {
        return Applied::Ignored;
    }

    let Some(moved) = remove_block(&mut doc.blocks, active_id) else {
        warn!(id = active_id, "reorder source not found, ignoring");
        return Applied::Ignored;
    };

    if over_id == ROOT_CANVAS {
        doc.blocks.push(moved);
        return Applied::Changed;
    }

    // A column id appends; a sibling block id inserts before it.
    if let Some(column) = find_column_mut(&mut doc.blocks, over_id) {
        column.blocks.push(moved);
        return Applied::Changed;
    }

    match insert_before(&mut doc.blocks, over_id, moved) {
        Ok(()) => Applied::Changed,
        Err(block) => {
            // The target vanished (or sat inside the moved subtree). Never
            // drop a block: restore it at the end of the root list.
            warn!(id = over_id, "reorder target not found, restoring at root");
            doc.blocks.push(block);
            Applied::Changed
        }
    }
}

fn apply_add_template(
    doc: &mut Document,
    template_blocks: &[Block],
    container_id: Option<&str>,
) -> Applied {
    if template_blocks.is_empty() {
        return Applied::Ignored;
    }

    let adopted: Vec<Block> = template_blocks
        .iter()
        .map(|block| clone_with_fresh_ids(block, &mut doc.ids))
        .collect();

    match append_to_container(&mut doc.blocks, container_id, adopted) {
        Ok(()) => Applied::Changed,
        Err(_) => {
            warn!(
                container = container_id.unwrap_or(ROOT_CANVAS),
                "template target not found, ignoring"
            );
            Applied::Ignored
        }
    }
}

/// Append into the root list or the named column, handing the blocks back
/// when the container does not exist.
fn append_to_container(
    blocks: &mut Vec<Block>,
    container_id: Option<&str>,
    items: Vec<Block>,
) -> Result<(), Vec<Block>> {
    match container_id {
        None | Some(ROOT_CANVAS) => {
            blocks.extend(items);
            Ok(())
        }
        Some(column_id) => match find_column_mut(blocks, column_id) {
            Some(column) => {
                column.blocks.extend(items);
                Ok(())
            }
            None => Err(items),
        },
    }
}

/// Remove the block with this id from wherever it sits and return it.
pub(crate) fn remove_block(blocks: &mut Vec<Block>, id: &str) -> Option<Block> {
    if let Some(pos) = blocks.iter().position(|block| block.id == id) {
        return Some(blocks.remove(pos));
    }

    for block in blocks {
        if let Some(cols) = block.settings.columns_mut() {
            for column in &mut cols.columns {
                if let Some(removed) = remove_block(&mut column.blocks, id) {
                    return Some(removed);
                }
            }
        }
    }

    None
}

/// Insert a block immediately before `over_id` in whichever list contains
/// it. Hands the block back when the target is not in the tree.
fn insert_before(blocks: &mut Vec<Block>, over_id: &str, block: Block) -> Result<(), Block> {
    if let Some(pos) = blocks.iter().position(|candidate| candidate.id == over_id) {
        blocks.insert(pos, block);
        return Ok(());
    }

    let mut carried = block;
    for host in blocks.iter_mut() {
        if let Some(cols) = host.settings.columns_mut() {
            for column in &mut cols.columns {
                match insert_before(&mut column.blocks, over_id, carried) {
                    Ok(()) => return Ok(()),
                    Err(back) => carried = back,
                }
            }
        }
    }

    Err(carried)
}

/// Find the block, deep-clone it with fresh ids, insert the clone right
/// after the original. Returns the clone's id.
fn duplicate_in(blocks: &mut Vec<Block>, id: &str, ids: &mut IdGenerator) -> Option<String> {
    if let Some(pos) = blocks.iter().position(|block| block.id == id) {
        let clone = clone_with_fresh_ids(&blocks[pos], ids);
        let clone_id = clone.id.clone();
        blocks.insert(pos + 1, clone);
        return Some(clone_id);
    }

    for block in blocks {
        if let Some(cols) = block.settings.columns_mut() {
            for column in &mut cols.columns {
                if let Some(clone_id) = duplicate_in(&mut column.blocks, id, ids) {
                    return Some(clone_id);
                }
            }
        }
    }

    None
}

/// Deep-clone a subtree, re-issuing ids for every block and column in it.
pub(crate) fn clone_with_fresh_ids(block: &Block, ids: &mut IdGenerator) -> Block {
    let mut clone = block.clone();
    clone.id = ids.new_id();

    if let Some(cols) = clone.settings.columns_mut() {
        for column in &mut cols.columns {
            column.id = ids.new_id();
            column.blocks = column
                .blocks
                .iter()
                .map(|nested| clone_with_fresh_ids(nested, ids))
                .collect();
        }
    }

    clone
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailcraft_blocks::RichTextSettings;

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::UpdateBlock {
            id: "text-123".to_string(),
            patch: BlockSettings::Text(RichTextSettings {
                content: Some("Hello World".to_string()),
                ..Default::default()
            }),
        };

        let json = serde_json::to_string(&mutation).unwrap();
        let deserialized: Mutation = serde_json::from_str(&json).unwrap();

        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_clone_with_fresh_ids_reissues_recursively() {
        let mut ids = IdGenerator::from_seed("doc".to_string());
        let block = Block::new(
            "orig",
            BlockSettings::default_for(BlockKind::Columns, &mut ids),
        );

        let clone = clone_with_fresh_ids(&block, &mut ids);

        assert_ne!(clone.id, block.id);
        let original_cols = block.settings.columns().unwrap();
        let clone_cols = clone.settings.columns().unwrap();
        for (original, cloned) in original_cols.columns.iter().zip(&clone_cols.columns) {
            assert_ne!(original.id, cloned.id);
        }
    }

    #[test]
    fn test_remove_block_from_empty_tree() {
        let mut blocks: Vec<Block> = Vec::new();
        assert!(remove_block(&mut blocks, "anything").is_none());
    }
}
