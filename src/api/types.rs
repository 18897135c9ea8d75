//! Shared types for the API layer.

use std::sync::Arc;

use rusqlite::Connection;

use crate::config::ServiceConfig;
use crate::db::{self, DatabaseError};

/// Shared context for all API routes and middleware.
///
/// Holds configuration only. Each request opens its own SQLite connection,
/// so handlers never share mutable state. The database must already be
/// migrated with [`db::open_database`].
#[derive(Clone)]
pub struct ApiContext {
    pub config: Arc<ServiceConfig>,
}

impl ApiContext {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Open a connection to the record store for the current request.
    pub fn open_db(&self) -> Result<Connection, DatabaseError> {
        db::connect_database(&self.config.database_path)
    }
}
