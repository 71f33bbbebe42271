//! CLI command definitions and execution
//!
//! This module contains all CLI commands and their implementations.
//! Profile commands go through the ProfileStore trait; upload commands
//! additionally build an S3 client from the resolved profile.

use clap::{Parser, Subcommand};

use bup_core::FileProfileStore;

use crate::exit_code::ExitCode;
use crate::output::OutputConfig;

mod add;
mod completions;
mod config;
mod ls;
mod put;
mod putfolder;
mod remove;
mod show;
mod use_profile;

/// bup - bucket profile manager and uploader
///
/// Manage named bucket profiles and upload files or folders to
/// S3-compatible object storage services.
#[derive(Parser, Debug)]
#[command(name = "bup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: JSON instead of human-readable
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Disable the progress spinner
    #[arg(long, global = true, default_value = "false")]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all profiles
    Ls(ls::LsArgs),

    /// Show detail of a profile
    Show(show::ShowArgs),

    /// Edit fields of an existing profile
    Config(config::ConfigArgs),

    /// Add a profile interactively
    Add(add::AddArgs),

    /// Select the current profile
    Use(use_profile::UseArgs),

    /// Delete a profile
    Remove(remove::RemoveArgs),

    /// Upload a single file
    Put(put::PutArgs),

    /// Upload a folder recursively
    Putfolder(putfolder::PutfolderArgs),

    /// Generate shell completion scripts
    Completions(completions::CompletionsArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        no_progress: cli.no_progress,
        quiet: cli.quiet,
    };

    if let Commands::Completions(args) = cli.command {
        return completions::execute(args);
    }

    let store = match FileProfileStore::new() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::GeneralError;
        }
    };

    match cli.command {
        Commands::Ls(args) => ls::execute(args, &store, output_config),
        Commands::Show(args) => show::execute(args, &store, output_config),
        Commands::Config(args) => config::execute(args, &store, output_config),
        Commands::Add(args) => add::execute(args, &store, output_config),
        Commands::Use(args) => use_profile::execute(args, &store, output_config),
        Commands::Remove(args) => remove::execute(args, &store, output_config),
        Commands::Put(args) => put::execute(args, &store, output_config).await,
        Commands::Putfolder(args) => putfolder::execute(args, &store, output_config).await,
        Commands::Completions(_) => unreachable!("handled above"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_put_flags() {
        let cli = Cli::try_parse_from([
            "bup", "put", "a.png", "-b", "p1", "-p", "img", "-k", "exact.png", "--no-md5", "-o",
        ])
        .unwrap();
        match cli.command {
            Commands::Put(args) => {
                assert_eq!(args.bucket.as_deref(), Some("p1"));
                assert_eq!(args.prefix.as_deref(), Some("img"));
                assert_eq!(args.object_key.as_deref(), Some("exact.png"));
                assert!(args.no_md5);
                assert!(args.override_existing);
            }
            _ => panic!("expected put"),
        }
    }

    #[test]
    fn test_cli_putfolder_defaults() {
        let cli = Cli::try_parse_from(["bup", "putfolder", "dist"]).unwrap();
        match cli.command {
            Commands::Putfolder(args) => {
                assert_eq!(args.limit, 10);
                assert!(!args.flat);
                assert!(args.ext.is_none());
                assert!(!args.no_md5);
            }
            _ => panic!("expected putfolder"),
        }
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::try_parse_from(["bup", "--json", "--quiet", "ls"]).unwrap();
        assert!(cli.json);
        assert!(cli.quiet);
    }
}
