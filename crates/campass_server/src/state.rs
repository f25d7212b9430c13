//! Shared request state.

use crate::error::ApiError;
use campass_core::ServiceError;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// Database handle shared by every handler.
///
/// One connection per process, opened at startup and dropped at shutdown.
/// Each operation holds the lock for its whole store call, so readers never
/// observe a half-applied write.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs `op` against the connection on the blocking thread pool.
    pub async fn with_conn<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Connection) -> Result<T, ServiceError> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let conn = db
                .lock()
                .map_err(|_| ApiError::internal("database lock poisoned"))?;
            op(&*conn).map_err(ApiError::from)
        })
        .await
        .map_err(|err| ApiError::internal(format!("store task failed: {err}")))?
    }
}
