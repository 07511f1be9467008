//! CLI command implementations
//!
//! One module per subcommand: `export`, `status`, `validate-config` and
//! `init`. Each `execute` returns the process exit code.

pub mod export;
pub mod init;
pub mod status;
pub mod validate;
