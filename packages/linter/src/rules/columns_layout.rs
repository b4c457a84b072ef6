use crate::diagnostic::Diagnostic;
use crate::rules::Rule;
use mailcraft_blocks::Block;

/// `layout` width count and `column_count` must match the actual columns;
/// widths should sum to roughly 100 percent.
pub struct ColumnsLayoutRule;

impl Rule for ColumnsLayoutRule {
    fn name(&self) -> &'static str {
        "columns-layout"
    }

    fn description(&self) -> &'static str {
        "Column layout metadata must agree with the column list"
    }

    fn check_block(&self, block: &Block) -> Vec<Diagnostic> {
        let Some(settings) = block.settings.columns() else {
            return Vec::new();
        };

        let mut diagnostics = Vec::new();

        if settings.layout.len() != settings.columns.len()
            || settings.column_count != settings.columns.len()
        {
            diagnostics.push(Diagnostic::error(
                "columns-layout",
                format!(
                    "columns block has {} columns, columnCount {} and {} layout widths",
                    settings.columns.len(),
                    settings.column_count,
                    settings.layout.len()
                ),
                &block.id,
            ));
        }

        let total: f64 = settings.layout.iter().sum();
        if !settings.layout.is_empty() && (total - 100.0).abs() > 1.0 {
            diagnostics.push(
                Diagnostic::warning(
                    "columns-layout",
                    format!("column widths sum to {total}, expected ~100"),
                    &block.id,
                )
                .with_suggestion("Rebalance the layout widths to total 100"),
            );
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailcraft_blocks::{BlockSettings, Column, ColumnsSettings};

    fn columns_block(columns: usize, column_count: usize, layout: Vec<f64>) -> Block {
        Block::new(
            "c-1",
            BlockSettings::Columns(ColumnsSettings {
                columns: (0..columns).map(|i| Column::new(format!("col-{i}"))).collect(),
                column_count,
                layout,
                gap: None,
                padding: None,
                background_color: None,
            }),
        )
    }

    #[test]
    fn test_consistent_layout_passes() {
        let block = columns_block(2, 2, vec![50.0, 50.0]);
        assert!(ColumnsLayoutRule.check_block(&block).is_empty());
    }

    #[test]
    fn test_count_mismatch_is_an_error() {
        let block = columns_block(2, 3, vec![50.0, 50.0]);
        let diagnostics = ColumnsLayoutRule.check_block(&block);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].level, crate::DiagnosticLevel::Error);
    }

    #[test]
    fn test_unbalanced_widths_warn() {
        let block = columns_block(2, 2, vec![40.0, 40.0]);
        let diagnostics = ColumnsLayoutRule.check_block(&block);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].level, crate::DiagnosticLevel::Warning);
    }
}
