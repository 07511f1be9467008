//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the filmo-batch configuration file.

use crate::config::{load_config, redact_connection_string};
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        if let Err(e) = config.validate() {
            println!("❌ Configuration validation failed");
            println!("   Error: {e}");
            println!();
            return Ok(2);
        }

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!(
            "  Export File: {}",
            config.export.export_file_path().display()
        );
        println!("  Chunk Size: {}", config.export.chunk_size);
        println!("  Fsync: {}", config.export.fsync);
        if config.export.run_timeout_secs > 0 {
            println!("  Run Timeout: {}s", config.export.run_timeout_secs);
        } else {
            println!("  Run Timeout: none");
        }
        println!(
            "  PostgreSQL Connection: {}",
            redact_connection_string(config.postgresql.connection_string.expose_secret().as_ref())
        );
        println!("  Max Connections: {}", config.postgresql.max_connections);
        println!("  SSL Mode: {}", config.postgresql.ssl_mode);
        if config.logging.local_enabled {
            println!(
                "  Log Files: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_valid_config_exits_zero() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[export]
base_path = "./data"

[postgresql]
connection_string = "postgresql://filmo:pw@localhost:5432/filmo"
"#
        )
        .unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_invalid_config_exits_two() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[export]
base_path = "./data"
chunk_size = 0

[postgresql]
connection_string = "postgresql://filmo:pw@localhost:5432/filmo"
"#
        )
        .unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_missing_file_exits_two() {
        let code = ValidateArgs {}
            .execute("/nonexistent/filmo.toml")
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
