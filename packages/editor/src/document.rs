//! # Document Handle
//!
//! The canonical block tree for one campaign editing session, plus the
//! state that travels with it: selection, the id generator and the
//! undo/redo history.
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Mutate → Snapshot → Export / Save
//!   ↓       ↓        ↓           ↓
//! Tree   Mutation  History   compiler-html / auto-save
//! ```
//!
//! All mutation goes through [`Document::apply`], which commits a history
//! snapshot after any change. Undo/redo adopt snapshots back into the live
//! tree. The GUI shell binds the platform undo/redo accelerators to
//! [`Document::undo`] / [`Document::redo`].

use mailcraft_blocks::{find_block, Block, Campaign, IdGenerator};

use crate::errors::EditorError;
use crate::history::History;
use crate::mutations::{Applied, Mutation};

/// Sentinel container id naming the root canvas as a drop/append target.
pub const ROOT_CANVAS: &str = "root-canvas";

/// Editable campaign document
#[derive(Debug)]
pub struct Document {
    /// Campaign this session edits
    campaign_id: String,

    /// Canonical block tree
    pub(crate) blocks: Vec<Block>,

    /// Id of the active (selected) block, if any
    pub(crate) selected: Option<String>,

    /// Id source for creation, duplication and template adoption
    pub(crate) ids: IdGenerator,

    /// Bounded snapshot log
    history: History<Vec<Block>>,

    /// Increments on every committed change
    version: u64,
}

impl Document {
    /// Create an empty document for a campaign.
    pub fn new(campaign_id: impl Into<String>) -> Self {
        let campaign_id = campaign_id.into();
        Self {
            ids: IdGenerator::new(&campaign_id),
            campaign_id,
            blocks: Vec::new(),
            selected: None,
            history: History::new(Vec::new()),
            version: 0,
        }
    }

    /// Create a document seeded with a campaign's stored tree.
    pub fn from_campaign(campaign: &Campaign) -> Self {
        let mut doc = Self::new(campaign.id.clone());
        doc.load(campaign.blocks.clone());
        doc
    }

    /// Replace the tree wholesale (campaign or template load). Existing ids
    /// are kept; the id generator resumes past any it recognizes so it never
    /// re-issues a live id. Selection clears and history reseeds.
    pub fn load(&mut self, blocks: Vec<Block>) {
        self.ids.resume_past(&blocks);
        self.history.reseed(blocks.clone());
        self.blocks = blocks;
        self.selected = None;
    }

    /// Load a tree from its JSON form.
    pub fn load_json(&mut self, json: &str) -> Result<(), EditorError> {
        let blocks: Vec<Block> = serde_json::from_str(json)?;
        self.load(blocks);
        Ok(())
    }

    pub fn campaign_id(&self) -> &str {
        &self.campaign_id
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Select a block by id; selecting an unknown id clears the selection.
    pub fn select(&mut self, id: Option<&str>) {
        self.selected = id
            .filter(|id| find_block(&self.blocks, id).is_some())
            .map(str::to_string);
    }

    /// Current document version (committed changes since load).
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Apply a mutation and commit a history snapshot when it changed the
    /// tree. Returns what happened; this never fails.
    pub fn apply(&mut self, mutation: Mutation) -> Applied {
        let applied = mutation.apply_to(self);

        if applied.changed() {
            // Deep-equality dedup lives in the history: an update that
            // rewrote a block with identical settings commits nothing.
            if self.history.commit(&self.blocks) {
                self.version += 1;
            }
        }

        applied
    }

    /// Step back one snapshot. Returns false at the boundary.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        self.blocks = snapshot.clone();
        self.version += 1;
        self.fix_selection();
        true
    }

    /// Step forward one snapshot. Returns false at the boundary.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        self.blocks = snapshot.clone();
        self.version += 1;
        self.fix_selection();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn fix_selection(&mut self) {
        if let Some(selected) = self.selected.as_deref() {
            if find_block(&self.blocks, selected).is_none() {
                self.selected = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailcraft_blocks::{BlockKind, BlockSettings, RichTextSettings};

    #[test]
    fn test_new_document_is_empty() {
        let doc = Document::new("campaign-1");
        assert!(doc.blocks().is_empty());
        assert!(doc.selected().is_none());
        assert_eq!(doc.version(), 0);
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_add_selects_new_block() {
        let mut doc = Document::new("campaign-1");
        let applied = doc.apply(Mutation::AddBlock {
            kind: BlockKind::Text,
            container_id: None,
        });

        assert!(applied.changed());
        assert_eq!(doc.blocks().len(), 1);
        assert_eq!(doc.selected(), Some(doc.blocks()[0].id.as_str()));
        assert_eq!(doc.version(), 1);
    }

    #[test]
    fn test_load_replaces_tree_and_resets_history() {
        let mut doc = Document::new("campaign-1");
        doc.apply(Mutation::AddBlock {
            kind: BlockKind::Text,
            container_id: None,
        });

        doc.load(vec![Block::new(
            "ext-1",
            BlockSettings::Text(RichTextSettings::default()),
        )]);

        assert_eq!(doc.blocks().len(), 1);
        assert_eq!(doc.blocks()[0].id, "ext-1");
        assert!(doc.selected().is_none());
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_load_json_rejects_malformed_input() {
        let mut doc = Document::new("campaign-1");
        assert!(doc.load_json("not json").is_err());
        assert!(doc.load_json("[]").is_ok());
    }

    #[test]
    fn test_select_unknown_id_clears_selection() {
        let mut doc = Document::new("campaign-1");
        doc.apply(Mutation::AddBlock {
            kind: BlockKind::Text,
            container_id: None,
        });

        doc.select(Some("nope"));
        assert!(doc.selected().is_none());
    }
}
