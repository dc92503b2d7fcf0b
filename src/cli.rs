//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Collecta content collection loader CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Export directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file name (default: collecta.toml)
    #[arg(short = 'C', long, default_value = "collecta.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Load and validate every collection, then report entry counts
    Check,

    /// Validate every collection and write the registry as JSON
    Build {
        /// Remove the export directory before writing
        #[arg(long)]
        clean: bool,
    },

    /// Build, then rebuild whenever a collection file changes
    Watch {
        /// Remove the export directory before the first build
        #[arg(long)]
        clean: bool,

        /// Debounce window for file events, in milliseconds
        #[arg(short, long)]
        debounce: Option<u64>,
    },
}

impl Cli {
    /// `--clean` flag of `build` / `watch`, if given.
    pub const fn clean(&self) -> Option<bool> {
        match self.command {
            Commands::Build { clean: true } | Commands::Watch { clean: true, .. } => Some(true),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from(["collecta", "check"]).unwrap();
        assert!(matches!(cli.command, Commands::Check));
        assert_eq!(cli.config, PathBuf::from("collecta.toml"));
        assert!(cli.root.is_none());
        assert_eq!(cli.clean(), None);
    }

    #[test]
    fn test_parse_build_with_overrides() {
        let cli = Cli::try_parse_from([
            "collecta", "--root", "site", "-o", "public", "-C", "custom.toml", "build", "--clean",
        ])
        .unwrap();

        assert_eq!(cli.root, Some(PathBuf::from("site")));
        assert_eq!(cli.output, Some(PathBuf::from("public")));
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        assert_eq!(cli.clean(), Some(true));
    }

    #[test]
    fn test_parse_watch_debounce() {
        let cli = Cli::try_parse_from(["collecta", "watch", "--debounce", "500"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Watch {
                clean: false,
                debounce: Some(500)
            }
        ));
        assert_eq!(cli.clean(), None);
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["collecta"]).is_err());
    }
}
