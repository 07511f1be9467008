//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for filmo-batch using clap,
//! and the mapping from run results to process exit codes.

pub mod commands;

use crate::core::export::{FailureCause, RunState};
use crate::domain::FilmoError;
use clap::{Parser, Subcommand};

/// filmo-batch - Incremental film catalog exporter
#[derive(Parser, Debug)]
#[command(name = "filmo-batch")]
#[command(version, about, long_about = None)]
#[command(author = "Filmo Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "filmo.toml", env = "FILMO_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "FILMO_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Append unexported films to the export file and mark them exported
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Show export progress and marker totals per job
    Status(commands::status::StatusArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

/// Exit code for an error that aborted a run before or outside a chunk
pub fn exit_code_for_error(error: &FilmoError) -> i32 {
    match error {
        FilmoError::Configuration(_) | FilmoError::Validation(_) => 2,
        FilmoError::RunLocked(_) => 3,
        FilmoError::Database(_) => 4,
        _ => 5,
    }
}

/// Exit code for the terminal state of a run
pub fn exit_code_for_state(state: &RunState) -> i32 {
    match state {
        RunState::Completed => 0,
        RunState::Failed(FailureCause::Interrupted) => 130,
        RunState::Failed(FailureCause::ChunkFailed { .. })
        | RunState::Failed(FailureCause::DeadlineExceeded) => 1,
        // a run always ends in a terminal state
        RunState::Idle | RunState::Running => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use test_case::test_case;

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["filmo-batch", "export"]);
        assert_eq!(cli.config, "filmo.toml");
        assert!(matches!(cli.command, Commands::Export(_)));
    }

    #[test]
    fn test_cli_parse_export_overrides() {
        let cli = Cli::parse_from([
            "filmo-batch",
            "export",
            "--dry-run",
            "--chunk-size",
            "25",
            "--timeout-secs",
            "60",
        ]);
        match cli.command {
            Commands::Export(args) => {
                assert!(args.dry_run);
                assert_eq!(args.chunk_size, Some(25));
                assert_eq!(args.timeout_secs, Some(60));
                assert!(args.base_path.is_none());
            }
            other => panic!("expected export, got {other:?}"),
        }
    }

    #[test]
    fn test_dry_run_help_mentions_schema_creation() {
        let command = Cli::command();
        let export = command
            .get_subcommands()
            .find(|c| c.get_name() == "export")
            .unwrap();
        let dry_run = export
            .get_arguments()
            .find(|a| a.get_id() == "dry_run")
            .unwrap();
        let help = dry_run
            .get_long_help()
            .or_else(|| dry_run.get_help())
            .unwrap()
            .to_string();
        assert!(help.contains("no markers"));
        assert!(help.contains("tables are still created"));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["filmo-batch", "--config", "custom.toml", "export"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["filmo-batch", "--log-level", "debug", "export"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["filmo-batch", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_status() {
        let cli = Cli::parse_from(["filmo-batch", "status", "--jobs", "3"]);
        match cli.command {
            Commands::Status(args) => assert_eq!(args.jobs, 3),
            other => panic!("expected status, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["filmo-batch", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }

    #[test_case(RunState::Completed, 0 ; "completed")]
    #[test_case(RunState::Failed(FailureCause::ChunkFailed { chunk_index: 2 }), 1 ; "chunk failed")]
    #[test_case(RunState::Failed(FailureCause::DeadlineExceeded), 1 ; "deadline")]
    #[test_case(RunState::Failed(FailureCause::Interrupted), 130 ; "interrupted")]
    #[test_case(RunState::Running, 5 ; "not terminal")]
    fn test_exit_code_for_state(state: RunState, expected: i32) {
        assert_eq!(exit_code_for_state(&state), expected);
    }

    #[test_case(FilmoError::Configuration("bad".into()), 2 ; "configuration")]
    #[test_case(FilmoError::Validation("bad".into()), 2 ; "validation")]
    #[test_case(FilmoError::RunLocked("held".into()), 3 ; "run locked")]
    #[test_case(FilmoError::Database("down".into()), 4 ; "database")]
    #[test_case(FilmoError::SourceRead("gone".into()), 5 ; "source read")]
    #[test_case(FilmoError::DirectoryCreation { path: "/x".into(), message: "denied".into() }, 5 ; "directory")]
    fn test_exit_code_for_error(error: FilmoError, expected: i32) {
        assert_eq!(exit_code_for_error(&error), expected);
    }
}
