use mailcraft_blocks::{Block, Column};

/// Visitor pattern for traversing block trees immutably
///
/// This trait provides default implementations that walk the entire tree.
/// Override specific visit_* methods to perform custom actions on nodes.
pub trait BlockVisitor: Sized {
    fn visit_blocks(&mut self, blocks: &[Block]) {
        walk_blocks(self, blocks);
    }

    fn visit_block(&mut self, block: &Block) {
        walk_block(self, block);
    }

    fn visit_column(&mut self, column: &Column) {
        walk_column(self, column);
    }
}

/// Mutable visitor pattern for transforming block trees
///
/// Similar to BlockVisitor, but provides mutable access to nodes.
/// Use this when you need to modify the tree during traversal.
pub trait BlockVisitorMut: Sized {
    fn visit_blocks_mut(&mut self, blocks: &mut Vec<Block>) {
        walk_blocks_mut(self, blocks);
    }

    fn visit_block_mut(&mut self, block: &mut Block) {
        walk_block_mut(self, block);
    }

    fn visit_column_mut(&mut self, column: &mut Column) {
        walk_column_mut(self, column);
    }
}

// Default walk implementations for immutable visitor

pub fn walk_blocks<V: BlockVisitor>(visitor: &mut V, blocks: &[Block]) {
    for block in blocks {
        visitor.visit_block(block);
    }
}

pub fn walk_block<V: BlockVisitor>(visitor: &mut V, block: &Block) {
    if let Some(cols) = block.settings.columns() {
        for column in &cols.columns {
            visitor.visit_column(column);
        }
    }
}

pub fn walk_column<V: BlockVisitor>(visitor: &mut V, column: &Column) {
    for block in &column.blocks {
        visitor.visit_block(block);
    }
}

// Default walk implementations for mutable visitor

pub fn walk_blocks_mut<V: BlockVisitorMut>(visitor: &mut V, blocks: &mut Vec<Block>) {
    for block in blocks {
        visitor.visit_block_mut(block);
    }
}

pub fn walk_block_mut<V: BlockVisitorMut>(visitor: &mut V, block: &mut Block) {
    if let Some(cols) = block.settings.columns_mut() {
        for column in &mut cols.columns {
            visitor.visit_column_mut(column);
        }
    }
}

pub fn walk_column_mut<V: BlockVisitorMut>(visitor: &mut V, column: &mut Column) {
    for block in &mut column.blocks {
        visitor.visit_block_mut(block);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailcraft_blocks::{BlockKind, BlockSettings, ColumnsSettings, RichTextSettings};

    struct KindCounter {
        counts: Vec<BlockKind>,
    }

    impl BlockVisitor for KindCounter {
        fn visit_block(&mut self, block: &Block) {
            self.counts.push(block.kind());
            walk_block(self, block);
        }
    }

    #[test]
    fn test_visitor_reaches_nested_blocks() {
        let mut column = Column::new("col-1");
        column.blocks.push(Block::new(
            "t-2",
            BlockSettings::Text(RichTextSettings::default()),
        ));

        let tree = vec![
            Block::new("t-1", BlockSettings::Text(RichTextSettings::default())),
            Block::new(
                "c-1",
                BlockSettings::Columns(ColumnsSettings {
                    columns: vec![column],
                    column_count: 1,
                    layout: vec![100.0],
                    gap: None,
                    padding: None,
                    background_color: None,
                }),
            ),
        ];

        let mut counter = KindCounter { counts: vec![] };
        counter.visit_blocks(&tree);

        assert_eq!(
            counter.counts,
            vec![BlockKind::Text, BlockKind::Columns, BlockKind::Text]
        );
    }
}
