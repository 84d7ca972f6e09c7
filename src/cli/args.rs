// src/cli/args.rs

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Color output mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect based on terminal
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Declaration analysis for C++ enums and record hierarchies
#[derive(Parser)]
#[command(name = "enigma")]
#[command(version)]
#[command(about = "Declaration analysis over ctags output", long_about = None)]
pub struct Cli {
    /// Color output: auto, always, never
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ingest tags files and resolve every record
    #[command(visible_alias = "c")]
    Check {
        /// Paths to check (files, directories, or glob patterns)
        #[arg(value_name = "PATHS", required = true)]
        paths: Vec<String>,

        /// Fail when any warning is reported
        #[arg(long)]
        deny_warnings: bool,
    },
    /// Print enums, records, ancestor chains and resolution results
    #[command(visible_alias = "i")]
    Inspect {
        /// Tags file to inspect
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Only show this record
        #[arg(long, value_name = "NAME")]
        record: Option<String>,
    },
    /// List declarations matching an abbreviation (e.g. `PSL` or `ProjSp`)
    #[command(visible_alias = "f")]
    Find {
        /// Tags file to search
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Name prefix or CamelCase abbreviation
        #[arg(value_name = "QUERY")]
        query: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn check_accepts_flags_in_any_position() {
        let cli = Cli::try_parse_from([
            "enigma",
            "check",
            "a.tags",
            "--deny-warnings",
            "--color",
            "never",
        ])
        .unwrap();
        assert_eq!(cli.color, ColorMode::Never);
        match cli.command {
            Commands::Check {
                paths,
                deny_warnings,
            } => {
                assert_eq!(paths, vec!["a.tags"]);
                assert!(deny_warnings);
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn inspect_record_filter_is_optional() {
        let cli = Cli::try_parse_from(["enigma", "inspect", "Test.tags"]).unwrap();
        assert!(matches!(cli.command, Commands::Inspect { record: None, .. }));
    }
}
