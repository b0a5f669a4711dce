//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// loganalysis -- visualise lock lifecycle events from lager logs.
///
/// Runtime settings come from `LOCKVIZ_*` environment variables.
#[derive(Parser, Debug)]
#[command(name = "loganalysis", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Chart lock acquire/release/expire events as a PNG on stdout.
    Locket(LocketArgs),
}

// ---- locket ----

/// Render one band of lanes per input file.
#[derive(Args, Debug)]
pub struct LocketArgs {
    /// Lager log files, one chart band per file in the given order.
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parse_locket_single_file() {
        let cli = Cli::try_parse_from(["loganalysis", "locket", "locket.stdout.log"])
            .expect("should parse 'locket <FILE>'");
        match cli.command {
            Commands::Locket(args) => {
                assert_eq!(args.files, vec![PathBuf::from("locket.stdout.log")]);
            }
        }
    }

    #[test]
    fn test_cli_parse_locket_keeps_file_order() {
        let cli = Cli::try_parse_from(["loganalysis", "locket", "b.log", "a.log", "c.log"])
            .expect("should parse multiple files");
        let Commands::Locket(args) = cli.command;
        assert_eq!(
            args.files,
            vec![
                PathBuf::from("b.log"),
                PathBuf::from("a.log"),
                PathBuf::from("c.log")
            ],
            "file order defines source index"
        );
    }

    #[test]
    fn test_cli_parse_locket_requires_files() {
        let result = Cli::try_parse_from(["loganalysis", "locket"]);
        assert!(result.is_err(), "locket without files should fail");
    }

    #[test]
    fn test_cli_parse_requires_subcommand() {
        let result = Cli::try_parse_from(["loganalysis"]);
        assert!(result.is_err(), "missing subcommand should fail");
    }

    #[test]
    fn test_cli_parse_unknown_subcommand() {
        let result = Cli::try_parse_from(["loganalysis", "bbs", "x.log"]);
        assert!(result.is_err(), "unknown subcommand should fail");
    }

    #[test]
    fn test_cli_parse_rejects_unknown_flag() {
        let result = Cli::try_parse_from(["loganalysis", "locket", "--width", "10", "a.log"]);
        assert!(result.is_err(), "locket takes no flags");
    }
}
