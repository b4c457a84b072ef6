use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;

use mailcraft_linter::{lint_blocks, DiagnosticLevel, LintOptions};

use crate::commands::load_campaign;

#[derive(Args, Debug)]
pub struct LintArgs {
    /// Campaign JSON file
    pub input: PathBuf,
}

pub fn run(args: LintArgs) -> Result<()> {
    let campaign = load_campaign(&args.input)?;
    let diagnostics = lint_blocks(&campaign.blocks, LintOptions::default());

    if diagnostics.is_empty() {
        println!("{} no issues found", "OK".green().bold());
        return Ok(());
    }

    let mut errors = 0;
    for diagnostic in &diagnostics {
        let label = match diagnostic.level {
            DiagnosticLevel::Error => {
                errors += 1;
                "error".red().bold()
            }
            DiagnosticLevel::Warning => "warning".yellow().bold(),
            DiagnosticLevel::Info => "info".blue().bold(),
        };
        println!(
            "{} [{}] {} ({})",
            label, diagnostic.rule, diagnostic.message, diagnostic.block_id
        );
        if let Some(suggestion) = &diagnostic.suggestion {
            println!("  {} {}", "hint:".dimmed(), suggestion);
        }
    }

    if errors > 0 {
        bail!("{} error(s) found", errors);
    }

    Ok(())
}
