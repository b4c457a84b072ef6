pub mod export;
pub mod lint;
pub mod normalize;

pub use export::ExportArgs;
pub use lint::LintArgs;
pub use normalize::NormalizeArgs;

use anyhow::{Context, Result};
use mailcraft_blocks::Campaign;
use std::path::Path;

/// Read and parse a campaign JSON file.
pub fn load_campaign(path: &Path) -> Result<Campaign> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&source)
        .with_context(|| format!("{} is not a valid campaign file", path.display()))
}
