use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use mailcraft_parser::normalize_all_blocks;

use crate::commands::load_campaign;

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Campaign JSON file
    pub input: PathBuf,

    /// Output JSON file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: NormalizeArgs) -> Result<()> {
    let mut campaign = load_campaign(&args.input)?;

    campaign.blocks = normalize_all_blocks(&campaign.blocks);
    campaign.design.blocks = campaign.blocks.clone();

    let json = serde_json::to_string_pretty(&campaign)?;

    match args.output {
        Some(output) => {
            std::fs::write(&output, json)
                .with_context(|| format!("failed to write {}", output.display()))?;
            println!(
                "{} {} → {}",
                "Normalized".green().bold(),
                args.input.display(),
                output.display()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}
