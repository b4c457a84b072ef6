//! Editing-session scenarios: cross-container moves, template adoption,
//! cascade deletes and selection behavior.

use mailcraft_blocks::{Block, BlockKind, BlockSettings, Column, ColumnsSettings, RichTextSettings};
use mailcraft_editor::{Document, Mutation, ROOT_CANVAS};

fn column_ids(doc: &Document) -> Vec<String> {
    doc.blocks()
        .iter()
        .filter_map(|block| block.settings.columns())
        .flat_map(|cols| cols.columns.iter().map(|column| column.id.clone()))
        .collect()
}

fn setup_columns_session() -> (Document, Vec<String>) {
    let mut doc = Document::new("campaign-xyz");
    doc.apply(Mutation::AddBlock {
        kind: BlockKind::Columns,
        container_id: None,
    });
    doc.apply(Mutation::AddBlock {
        kind: BlockKind::Text,
        container_id: None,
    });
    let columns = column_ids(&doc);
    (doc, columns)
}

#[test]
fn drag_root_block_into_a_column() {
    let (mut doc, columns) = setup_columns_session();
    let text_id = doc.blocks()[1].id.clone();

    doc.apply(Mutation::ReorderBlocks {
        active_id: text_id.clone(),
        over_id: columns[0].clone(),
    });

    assert_eq!(doc.blocks().len(), 1);
    let cols = doc.blocks()[0].settings.columns().unwrap();
    assert_eq!(cols.columns[0].blocks[0].id, text_id);
}

#[test]
fn drag_between_columns_and_back_to_root() {
    let (mut doc, columns) = setup_columns_session();
    let text_id = doc.blocks()[1].id.clone();

    doc.apply(Mutation::ReorderBlocks {
        active_id: text_id.clone(),
        over_id: columns[0].clone(),
    });
    doc.apply(Mutation::ReorderBlocks {
        active_id: text_id.clone(),
        over_id: columns[1].clone(),
    });

    {
        let cols = doc.blocks()[0].settings.columns().unwrap();
        assert!(cols.columns[0].blocks.is_empty());
        assert_eq!(cols.columns[1].blocks[0].id, text_id);
    }

    doc.apply(Mutation::ReorderBlocks {
        active_id: text_id.clone(),
        over_id: ROOT_CANVAS.to_string(),
    });

    assert_eq!(doc.blocks().len(), 2);
    assert_eq!(doc.blocks()[1].id, text_id);
}

#[test]
fn reorder_before_a_sibling_inside_a_column() {
    let (mut doc, columns) = setup_columns_session();
    doc.apply(Mutation::AddBlock {
        kind: BlockKind::Button,
        container_id: Some(columns[0].clone()),
    });
    doc.apply(Mutation::AddBlock {
        kind: BlockKind::Divider,
        container_id: Some(columns[0].clone()),
    });

    let (button_id, divider_id) = {
        let cols = doc.blocks()[0].settings.columns().unwrap();
        (
            cols.columns[0].blocks[0].id.clone(),
            cols.columns[0].blocks[1].id.clone(),
        )
    };

    doc.apply(Mutation::ReorderBlocks {
        active_id: divider_id.clone(),
        over_id: button_id.clone(),
    });

    let cols = doc.blocks()[0].settings.columns().unwrap();
    assert_eq!(cols.columns[0].blocks[0].id, divider_id);
    assert_eq!(cols.columns[0].blocks[1].id, button_id);
}

#[test]
fn deleting_columns_block_cascades_and_clears_nested_selection() {
    let (mut doc, columns) = setup_columns_session();
    doc.apply(Mutation::AddBlock {
        kind: BlockKind::Text,
        container_id: Some(columns[0].clone()),
    });
    // The nested text block is now selected.
    assert!(doc.selected().is_some());
    let nested_id = doc.selected().unwrap().to_string();

    let columns_id = doc.blocks()[0].id.clone();
    doc.apply(Mutation::DeleteBlock { id: columns_id });

    assert_eq!(doc.blocks().len(), 1);
    assert!(doc.selected().is_none());
    assert!(mailcraft_blocks::find_block(doc.blocks(), &nested_id).is_none());
}

#[test]
fn template_adoption_reissues_every_id() {
    let mut template_column = Column::new("tpl-col");
    template_column.blocks.push(Block::new(
        "tpl-text",
        BlockSettings::Text(RichTextSettings {
            content: Some("from template".to_string()),
            ..Default::default()
        }),
    ));
    let template = vec![
        Block::new(
            "tpl-cols",
            BlockSettings::Columns(ColumnsSettings {
                columns: vec![template_column],
                column_count: 1,
                layout: vec![100.0],
                gap: None,
                padding: None,
                background_color: None,
            }),
        ),
        Block::new("tpl-title", {
            BlockSettings::Title(RichTextSettings {
                content: Some("Headline".to_string()),
                ..Default::default()
            })
        }),
    ];

    let mut doc = Document::new("campaign-xyz");
    doc.apply(Mutation::AddTemplateBlocks {
        blocks: template.clone(),
        container_id: None,
    });
    // Adopting the same template twice must not collide.
    doc.apply(Mutation::AddTemplateBlocks {
        blocks: template,
        container_id: None,
    });

    assert_eq!(doc.blocks().len(), 4);
    for block in doc.blocks() {
        assert!(!block.id.starts_with("tpl-"));
        if let Some(cols) = block.settings.columns() {
            for column in &cols.columns {
                assert!(!column.id.starts_with("tpl-"));
                for nested in &column.blocks {
                    assert!(!nested.id.starts_with("tpl-"));
                }
            }
        }
    }

    // Content came through the clone untouched.
    let cols = doc.blocks()[0].settings.columns().unwrap();
    let nested = cols.columns[0].blocks[0].settings.rich_text().unwrap();
    assert_eq!(nested.content.as_deref(), Some("from template"));
}

#[test]
fn adding_into_unknown_container_is_ignored() {
    let mut doc = Document::new("campaign-xyz");
    let applied = doc.apply(Mutation::AddBlock {
        kind: BlockKind::Text,
        container_id: Some("no-such-column".to_string()),
    });

    assert!(!applied.changed());
    assert!(doc.blocks().is_empty());
    assert!(doc.selected().is_none());
    assert_eq!(doc.version(), 0);
}

#[test]
fn undo_after_cross_container_move_restores_layout() {
    let (mut doc, columns) = setup_columns_session();
    let text_id = doc.blocks()[1].id.clone();
    let before = doc.blocks().to_vec();

    doc.apply(Mutation::ReorderBlocks {
        active_id: text_id,
        over_id: columns[0].clone(),
    });
    assert_eq!(doc.blocks().len(), 1);

    assert!(doc.undo());
    assert_eq!(doc.blocks(), &before[..]);
}

#[test]
fn committing_after_undo_discards_redo_branch() {
    let mut doc = Document::new("campaign-xyz");
    doc.apply(Mutation::AddBlock {
        kind: BlockKind::Text,
        container_id: None,
    });
    doc.apply(Mutation::AddBlock {
        kind: BlockKind::Button,
        container_id: None,
    });

    doc.undo();
    assert!(doc.can_redo());

    doc.apply(Mutation::AddBlock {
        kind: BlockKind::Divider,
        container_id: None,
    });

    assert!(!doc.can_redo());
    assert_eq!(doc.blocks().len(), 2);
    assert_eq!(doc.blocks()[1].kind(), BlockKind::Divider);
}
