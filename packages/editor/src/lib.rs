//! # Mailcraft Editor
//!
//! Core block-tree editing engine for email templates.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ blocks: typed block tree + ranges           │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + mutations      │
//! │  - Canonical tree + selection               │
//! │  - Apply structural mutations               │
//! │  - Snapshot history (undo/redo)             │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html: tree → email HTML            │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core principles
//!
//! 1. **The tree is the source of truth**: exported HTML is a derived view
//! 2. **Node identity is the id string**, never pointer identity
//! 3. **Mutations never fail**: lookup misses no-op, the editor stays live
//! 4. **History is linear**: committing after an undo discards the redo tail
//!
//! ## Usage
//!
//! ```rust
//! use mailcraft_editor::{Document, Mutation};
//! use mailcraft_blocks::BlockKind;
//!
//! let mut doc = Document::new("campaign-1");
//!
//! doc.apply(Mutation::AddBlock {
//!     kind: BlockKind::Text,
//!     container_id: None,
//! });
//! assert_eq!(doc.blocks().len(), 1);
//!
//! doc.undo();
//! assert!(doc.blocks().is_empty());
//! ```

mod document;
mod errors;
mod history;
mod mutations;

pub use document::{Document, ROOT_CANVAS};
pub use errors::EditorError;
pub use history::History;
pub use mutations::{Applied, Mutation};
