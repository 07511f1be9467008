//! Configuration management for filmo-batch.
//!
//! filmo-batch uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `FILMO_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use filmo_batch::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("filmo.toml")?;
//!
//! println!("Export file: {}", config.export.export_file_path().display());
//! println!("Chunk size: {}", config.export.chunk_size);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [export]
//! base_path = "./data"
//! file_name = "films.csv"
//! chunk_size = 3
//!
//! [postgresql]
//! connection_string = "${FILMO_PG_URL}"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, ExportConfig, FilmoConfig, LoggingConfig,
    PostgreSQLConfig,
};
pub use secret::{redact_connection_string, secret_string, SecretString, SecretValue};
