mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{export, lint, normalize, ExportArgs, LintArgs, NormalizeArgs};

/// Mailcraft CLI - render and check email template block trees
#[derive(Parser, Debug)]
#[command(name = "mailcraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a campaign JSON file to standalone email HTML
    Export(ExportArgs),

    /// Check a campaign's block tree and print diagnostics
    Lint(LintArgs),

    /// Normalize rich-HTML block content into plain text + ranges
    Normalize(NormalizeArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Export(args) => export::run(args),
        Command::Lint(args) => lint::run(args),
        Command::Normalize(args) => normalize::run(args),
    };

    if let Err(error) = result {
        eprintln!("{} {:#}", "error:".red().bold(), error);
        std::process::exit(1);
    }
}
