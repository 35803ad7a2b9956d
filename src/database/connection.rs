//! Database connection management

use std::path::{Path, PathBuf};
use rusqlite::Connection;
use tracing::debug;
use crate::error::{ExamError, Result};
use super::schema::Store;

/// Database connection wrapper
pub struct Database {
    /// Path to the database file
    path: PathBuf,
    /// SQLite connection
    conn: Option<Connection>,
}

impl Database {
    /// Open an existing database at the specified path
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ExamError::DatabaseError(format!(
                "Database not found: {}",
                path.display()
            )));
        }

        let conn = Connection::open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            conn: Some(conn),
        })
    }

    /// Open or create a database and make sure the tables of `store` exist
    pub fn create(path: &Path, store: Store) -> Result<Self> {
        let conn = Connection::open(path)?;

        for sql in store.tables() {
            conn.execute(sql, [])?;
        }
        debug!("Initialized {:?} store at {}", store, path.display());

        Ok(Self {
            path: path.to_path_buf(),
            conn: Some(conn),
        })
    }

    /// Get a reference to the connection
    pub fn connection(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or_else(|| {
            ExamError::DatabaseError("Database not open".to_string())
        })
    }

    /// Get the database path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Close the database connection
    pub fn close(&mut self) {
        self.conn = None;
    }

    /// Check if database is open
    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        self.close();
    }
}
