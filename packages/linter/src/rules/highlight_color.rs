use crate::diagnostic::Diagnostic;
use crate::rules::Rule;
use mailcraft_blocks::{Block, EmphasisStyle};

/// Highlight emphasis carries the color it renders with.
pub struct HighlightColorRule;

impl Rule for HighlightColorRule {
    fn name(&self) -> &'static str {
        "highlight-color"
    }

    fn description(&self) -> &'static str {
        "Highlight ranges must specify a color"
    }

    fn check_block(&self, block: &Block) -> Vec<Diagnostic> {
        let Some(settings) = block.settings.rich_text() else {
            return Vec::new();
        };

        settings
            .emphasis
            .iter()
            .flatten()
            .filter(|range| range.style == EmphasisStyle::Highlight && range.color.is_none())
            .map(|range| {
                Diagnostic::error(
                    "highlight-color",
                    format!("highlight range {}..{} has no color", range.start, range.end),
                    &block.id,
                )
                .with_suggestion("Set a color on the highlight range")
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailcraft_blocks::{BlockSettings, EmphasisRange, RichTextSettings};

    #[test]
    fn test_highlight_without_color_is_flagged() {
        let block = Block::new(
            "b-1",
            BlockSettings::Text(RichTextSettings {
                content: Some("highlighted".to_string()),
                emphasis: Some(vec![EmphasisRange::new(0, 4, EmphasisStyle::Highlight)]),
                ..Default::default()
            }),
        );

        let diagnostics = HighlightColorRule.check_block(&block);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule, "highlight-color");
    }

    #[test]
    fn test_highlight_with_color_passes() {
        let block = Block::new(
            "b-1",
            BlockSettings::Text(RichTextSettings {
                content: Some("highlighted".to_string()),
                emphasis: Some(vec![EmphasisRange::highlight(0, 4, "#ffee00")]),
                ..Default::default()
            }),
        );

        assert!(HighlightColorRule.check_block(&block).is_empty());
    }
}
