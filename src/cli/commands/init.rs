//! Init command implementation
//!
//! This module implements the `init` command for generating a starter
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "filmo.toml")]
    pub output: String,

    /// Include every setting with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing filmo-batch configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Put FILMO_PG_URL in your environment or a .env file");
                println!("  3. Validate configuration: filmo-batch validate-config");
                println!("  4. Run export: filmo-batch export");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# filmo-batch configuration

[export]
base_path = "./data"
file_name = "films.csv"
chunk_size = 3

[postgresql]
connection_string = "${FILMO_PG_URL}"
"#
        .to_string()
    }

    /// Generate configuration with every setting documented
    fn generate_config_with_examples() -> String {
        r#"# filmo-batch configuration
#
# Values of the form ${VAR} are read from the environment (or .env).
# Any setting can be overridden with FILMO_<SECTION>_<KEY>,
# e.g. FILMO_EXPORT_CHUNK_SIZE=50.

[application]
# trace, debug, info, warn, error
log_level = "info"
# Read and format films, write no lines and no markers
dry_run = false

[export]
# Directory of the export file; created if missing
base_path = "./data"
# Lines are appended, never truncated
file_name = "films.csv"
# Films per chunk (1-10000)
chunk_size = 3
# sync_data() the export file at every chunk boundary
fsync = false
# Stop at the next chunk boundary after this many seconds (0 = never)
run_timeout_secs = 0

[postgresql]
connection_string = "${FILMO_PG_URL}"
max_connections = 4
connection_timeout_seconds = 30
statement_timeout_seconds = 60
# disable, prefer, require
ssl_mode = "disable"

[logging]
local_enabled = false
local_path = "./logs"
# daily, hourly, never
local_rotation = "daily"
# Emit console logs as JSON
json = false
"#
        .to_string()
    }
}
