mod columns_layout;
mod highlight_color;
mod link_urls;
mod range_bounds;

pub use columns_layout::ColumnsLayoutRule;
pub use highlight_color::HighlightColorRule;
pub use link_urls::{is_valid_link_target, LinkUrlsRule};
pub use range_bounds::RangeBoundsRule;

use crate::diagnostic::Diagnostic;
use mailcraft_blocks::Block;

/// Trait for implementing lint rules
pub trait Rule {
    /// Unique identifier for this rule
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Check a single block. Tree-wide checks (id uniqueness) live in the
    /// linter itself.
    fn check_block(&self, block: &Block) -> Vec<Diagnostic>;
}

/// Registry of all available lint rules
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    /// Create a new registry with all built-in rules
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(RangeBoundsRule),
                Box::new(HighlightColorRule),
                Box::new(LinkUrlsRule),
                Box::new(ColumnsLayoutRule),
            ],
        }
    }

    /// Get all registered rules
    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a custom rule to the registry
    pub fn add_rule(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &format!("{} rules", self.rules.len()))
            .finish()
    }
}
