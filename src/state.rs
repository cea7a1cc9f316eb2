use std::path::PathBuf;

use rusqlite::Connection;
use tracing::{info, warn};

use crate::db;
use crate::error::{RegistrarError, Result};

/// The single store handle threaded through every operation.
pub struct AppState {
    pub db_path: Option<PathBuf>,
    pub db: Option<Connection>,
}

impl AppState {
    pub fn new(db_path: Option<PathBuf>, conn: Connection) -> Self {
        Self {
            db_path,
            db: Some(conn),
        }
    }

    pub fn conn(&self) -> Result<&Connection> {
        self.db.as_ref().ok_or(RegistrarError::StoreClosed)
    }

    pub fn is_closed(&self) -> bool {
        self.db.is_none()
    }

    /// Commit and close the store. Closing twice is a no-op.
    pub fn close(&mut self) -> Result<()> {
        let Some(conn) = self.db.take() else {
            return Ok(());
        };
        db::commit_and_close(conn)?;
        info!(path = ?self.db_path, "store closed");
        Ok(())
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        if !self.is_closed() {
            if let Err(e) = self.close() {
                warn!(error = %e, "store did not close cleanly");
            }
        }
    }
}

#[cfg(test)]
pub fn test_state() -> AppState {
    AppState::new(None, db::open_in_memory().expect("in-memory store"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_is_idempotent_and_blocks_further_use() {
        let mut state = test_state();
        assert!(state.conn().is_ok());
        state.close().expect("close");
        assert!(state.is_closed());
        assert!(matches!(state.conn(), Err(RegistrarError::StoreClosed)));
        state.close().expect("second close");
    }
}
