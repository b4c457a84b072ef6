use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use mailcraft_compiler_html::generate_email_html;
use mailcraft_parser::normalize_all_blocks;

use crate::commands::load_campaign;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Campaign JSON file
    pub input: PathBuf,

    /// Output HTML file (defaults to the input path with .html)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: ExportArgs) -> Result<()> {
    let mut campaign = load_campaign(&args.input)?;

    // Legacy campaigns may still carry rich HTML in their content fields.
    campaign.blocks = normalize_all_blocks(&campaign.blocks);

    let html = generate_email_html(&campaign);

    let output = args
        .output
        .unwrap_or_else(|| args.input.with_extension("html"));
    std::fs::write(&output, html)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "{} {} → {}",
        "Exported".green().bold(),
        args.input.display(),
        output.display()
    );

    Ok(())
}
