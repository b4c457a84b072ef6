use std::collections::HashSet;

use mailcraft_blocks::{Block, Column};
use mailcraft_common::{walk_block, walk_column, BlockVisitor};

use crate::diagnostic::Diagnostic;
use crate::rules::RuleRegistry;

/// Options for configuring the linter
#[derive(Debug, Default)]
pub struct LintOptions {
    /// Custom rule registry (uses default if None)
    pub registry: Option<RuleRegistry>,
}

/// Lint a block tree and return diagnostics
pub fn lint_blocks(blocks: &[Block], options: LintOptions) -> Vec<Diagnostic> {
    let registry = options.registry.unwrap_or_default();

    let mut walk = LintWalk {
        registry: &registry,
        seen_ids: HashSet::new(),
        diagnostics: Vec::new(),
    };
    walk.visit_blocks(blocks);
    walk.diagnostics
}

struct LintWalk<'a> {
    registry: &'a RuleRegistry,
    seen_ids: HashSet<String>,
    diagnostics: Vec<Diagnostic>,
}

impl LintWalk<'_> {
    fn note_id(&mut self, id: &str, what: &str) {
        if !self.seen_ids.insert(id.to_string()) {
            self.diagnostics.push(Diagnostic::error(
                "unique-ids",
                format!("duplicate {} id '{}'", what, id),
                id,
            ));
        }
    }
}

impl BlockVisitor for LintWalk<'_> {
    fn visit_block(&mut self, block: &Block) {
        self.note_id(&block.id, "block");

        for rule in self.registry.rules() {
            self.diagnostics.extend(rule.check_block(block));
        }

        walk_block(self, block);
    }

    fn visit_column(&mut self, column: &Column) {
        self.note_id(&column.id, "column");
        walk_column(self, column);
    }
}
