//! Application state for the API server.

use std::sync::Arc;

use crate::db::Database;

/// Shared application state.
///
/// Generic over `D: Database` so handlers never name a storage backend.
pub struct AppState<D: Database> {
    db: Arc<D>,
    webhook_secret: Option<Arc<str>>,
}

// Manual Clone impl - only the Arcs are cloned, not D
impl<D: Database> Clone for AppState<D> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            webhook_secret: self.webhook_secret.clone(),
        }
    }
}

impl<D: Database> AppState<D> {
    pub fn new(db: D, webhook_secret: Option<String>) -> Self {
        Self {
            db: Arc::new(db),
            webhook_secret: webhook_secret.map(Arc::from),
        }
    }

    /// Get a reference to the database.
    pub fn db(&self) -> &D {
        &self.db
    }

    /// Shared secret for GitHub webhook signatures, if configured.
    pub fn webhook_secret(&self) -> Option<&str> {
        self.webhook_secret.as_deref()
    }
}
