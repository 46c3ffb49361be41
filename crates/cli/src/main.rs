mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "mdw",
    version,
    about = "Batch edits for markdown frontmatter, tags and relationship lists"
)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print resolved values
    Doctor,

    /// List documents with the properties and tags found in them
    Inspect(InspectArgs),

    /// Apply property, tag and relationship edits to documents
    Apply(ApplyArgs),
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Folder or file inside the vault (default: whole vault)
    pub scope: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Folder or file inside the vault (default: whole vault)
    pub scope: Option<PathBuf>,

    /// TOML plan file with [options], [properties.*] and [tags.*] tables
    #[arg(long)]
    pub plan: Option<PathBuf>,

    /// Rename a property (repeatable)
    #[arg(long = "rename-property", value_name = "OLD=NEW", value_parser = parse_rename)]
    pub rename_property: Vec<(String, String)>,

    /// Delete a property (repeatable)
    #[arg(long = "delete-property", value_name = "KEY")]
    pub delete_property: Vec<String>,

    /// Move a property into an inline `key:: value` field (repeatable)
    #[arg(long = "inline-property", value_name = "KEY")]
    pub inline_property: Vec<String>,

    /// Move inline `key:: value` fields into frontmatter (repeatable)
    #[arg(long = "frontmatter-property", value_name = "KEY")]
    pub frontmatter_property: Vec<String>,

    /// Delete a tag everywhere it appears (repeatable)
    #[arg(long = "delete-tag", value_name = "TAG")]
    pub delete_tag: Vec<String>,

    /// Add a tag to the frontmatter tag list (repeatable)
    #[arg(long = "add-tag", value_name = "TAG")]
    pub add_tag: Vec<String>,

    /// Rewrite every frontmatter key in lowercase
    #[arg(long)]
    pub lowercase_keys: bool,

    /// Copy relationship lists from the trailing block into frontmatter
    #[arg(long)]
    pub sync_links: bool,

    /// Show what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

fn parse_rename(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((from, to)) if !from.trim().is_empty() && !to.trim().is_empty() => {
            Ok((from.trim().to_string(), to.trim().to_string()))
        }
        _ => Err(format!("expected OLD=NEW, got '{s}'")),
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Doctor => cmd::doctor::run(cli.config.as_deref(), cli.profile.as_deref()),
        Commands::Inspect(args) => {
            cmd::inspect::run(cli.config.as_deref(), cli.profile.as_deref(), args)
        }
        Commands::Apply(args) => {
            cmd::apply::run(cli.config.as_deref(), cli.profile.as_deref(), args)
        }
    }

    logging::shutdown();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rename_splits_on_first_equals() {
        assert_eq!(parse_rename("status=state"), Ok(("status".into(), "state".into())));
        assert_eq!(parse_rename(" a = b=c "), Ok(("a".into(), "b=c".into())));
        assert!(parse_rename("status").is_err());
        assert!(parse_rename("=state").is_err());
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
