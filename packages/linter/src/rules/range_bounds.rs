use crate::diagnostic::Diagnostic;
use crate::rules::Rule;
use mailcraft_blocks::Block;

/// Emphasis and link ranges must satisfy `start < end <= content.len()`.
pub struct RangeBoundsRule;

impl Rule for RangeBoundsRule {
    fn name(&self) -> &'static str {
        "range-bounds"
    }

    fn description(&self) -> &'static str {
        "Formatting ranges must lie within the block's content"
    }

    fn check_block(&self, block: &Block) -> Vec<Diagnostic> {
        let Some(settings) = block.settings.rich_text() else {
            return Vec::new();
        };

        let content_len = settings.content.as_deref().map_or(0, str::len);
        let mut diagnostics = Vec::new();

        let spans = settings
            .emphasis
            .iter()
            .flatten()
            .map(|range| ("emphasis", range.start, range.end))
            .chain(
                settings
                    .links
                    .iter()
                    .flatten()
                    .map(|range| ("link", range.start, range.end)),
            );

        for (kind, start, end) in spans {
            if start >= end {
                diagnostics.push(Diagnostic::error(
                    "range-bounds",
                    format!(
                        "{} range {}..{} is empty or inverted",
                        kind, start, end
                    ),
                    &block.id,
                ));
            } else if end > content_len {
                diagnostics.push(Diagnostic::error(
                    "range-bounds",
                    format!(
                        "{} range {}..{} exceeds content length {}",
                        kind, start, end, content_len
                    ),
                    &block.id,
                ));
            }
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailcraft_blocks::{BlockSettings, EmphasisRange, EmphasisStyle, LinkRange, RichTextSettings};

    fn block_with_ranges(
        content: &str,
        emphasis: Vec<EmphasisRange>,
        links: Vec<LinkRange>,
    ) -> Block {
        Block::new(
            "b-1",
            BlockSettings::Text(RichTextSettings {
                content: Some(content.to_string()),
                emphasis: Some(emphasis),
                links: Some(links),
                ..Default::default()
            }),
        )
    }

    #[test]
    fn test_valid_ranges_pass() {
        let block = block_with_ranges(
            "Hello world",
            vec![EmphasisRange::new(0, 5, EmphasisStyle::Bold)],
            vec![LinkRange::new(6, 11, "/promo")],
        );
        assert!(RangeBoundsRule.check_block(&block).is_empty());
    }

    #[test]
    fn test_out_of_bounds_range_is_flagged() {
        let block = block_with_ranges(
            "short",
            vec![EmphasisRange::new(0, 50, EmphasisStyle::Bold)],
            vec![],
        );
        let diagnostics = RangeBoundsRule.check_block(&block);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("exceeds content length"));
    }

    #[test]
    fn test_inverted_range_is_flagged() {
        let block = block_with_ranges(
            "content",
            vec![EmphasisRange::new(4, 2, EmphasisStyle::Italic)],
            vec![],
        );
        let diagnostics = RangeBoundsRule.check_block(&block);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("empty or inverted"));
    }
}
