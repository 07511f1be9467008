//! Storage factory
//!
//! Builds the catalog reader and marker store from configuration.

use crate::adapters::database::traits::{FilmSource, MarkerStore};
use crate::adapters::postgresql::adapter::PostgreSQLAdapter;
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::config::schema::FilmoConfig;
use crate::domain::Result;
use std::sync::Arc;

/// Catalog reader and marker store sharing one backend
#[derive(Clone)]
pub struct Storage {
    pub source: Arc<dyn FilmSource>,
    pub markers: Arc<dyn MarkerStore>,
}

impl Storage {
    /// Wrap an adapter that implements both traits
    ///
    /// # Examples
    ///
    /// ```
    /// use filmo_batch::adapters::database::Storage;
    /// use filmo_batch::adapters::memory::InMemoryStore;
    /// use std::sync::Arc;
    ///
    /// let storage = Storage::from_adapter(Arc::new(InMemoryStore::default()));
    /// ```
    pub fn from_adapter<A>(adapter: Arc<A>) -> Self
    where
        A: FilmSource + MarkerStore + 'static,
    {
        Self {
            source: adapter.clone(),
            markers: adapter,
        }
    }
}

/// Create the PostgreSQL-backed storage from configuration
///
/// Both traits share one client so they draw from the same connection pool.
/// The connection is tested before returning.
///
/// # Errors
///
/// Returns an error if the client cannot be created or the server is
/// unreachable.
pub async fn create_storage(config: &FilmoConfig) -> Result<Storage> {
    tracing::info!("Creating PostgreSQL catalog reader and marker store");

    let client = Arc::new(PostgreSQLClient::new(config.postgresql.clone()).await?);
    client.test_connection().await?;

    let adapter = Arc::new(PostgreSQLAdapter::new(client));
    Ok(Storage::from_adapter(adapter))
}
