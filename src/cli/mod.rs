use clap::{Parser, Subcommand};

use plugcheck::Family;

mod validate;

#[derive(Parser)]
#[command(
    name = "plugcheck",
    version,
    about = "Structural and schema validator for plugin marketplaces"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Every subcommand validates the repository in the current directory.
#[derive(Subcommand)]
#[command(next_display_order = None)]
enum Commands {
    /// Validate plugin manifests (.claude-plugin/plugin.json)
    Manifest,
    /// Validate agent frontmatter (agents/*.md)
    Agents,
    /// Validate command files are non-empty (commands/**/*.md)
    Commands,
    /// Validate rule files are non-empty (rules/**/*.md)
    Rules,
    /// Validate skill directories and SKILL.md frontmatter
    Skills,
    /// Validate hook configuration (hooks/hooks.json)
    Hooks,
    /// Report broken symlinks in component directories
    Symlinks,
    /// Validate the marketplace catalog (.claude-plugin/marketplace.json)
    Marketplace,
    /// Run every validator family in sequence
    All,
}

impl Commands {
    fn family(&self) -> Option<Family> {
        match self {
            Commands::Manifest => Some(Family::Manifest),
            Commands::Agents => Some(Family::Agents),
            Commands::Commands => Some(Family::Commands),
            Commands::Rules => Some(Family::Rules),
            Commands::Skills => Some(Family::Skills),
            Commands::Hooks => Some(Family::Hooks),
            Commands::Symlinks => Some(Family::Symlinks),
            Commands::Marketplace => Some(Family::Marketplace),
            Commands::All => None,
        }
    }
}

/// Dispatch the parsed command line and return the process exit code.
pub fn run(cli: Cli) -> i32 {
    match cli.command.family() {
        Some(family) => validate::run(family),
        None => validate::run_all(),
    }
}
