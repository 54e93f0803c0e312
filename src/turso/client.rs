// Turso/libsql client - owns the embedded database and its connection
//
// All SQL in the crate goes through `execute` and `query`, which classify
// libsql failures into TursoError variants callers can match on.

use std::path::{Path, PathBuf};

use libsql::params::IntoParams;
use libsql::{Builder, Connection, Database, Rows};

/// File name of the embedded database inside the data directory
pub const DATABASE_FILE: &str = "yuedict.db";

/// Error types for database client operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TursoError {
    /// Database could not be opened or connected
    #[error("Database connection failed: {0}")]
    Connection(String),
    /// A statement failed for a reason other than the ones below
    #[error("Query failed: {0}")]
    Query(String),
    /// A UNIQUE/CHECK/NOT NULL constraint rejected the statement
    #[error("Constraint violation: {0}")]
    Constraint(String),
    /// The statement referenced a table that does not exist
    #[error("Missing table: {0}")]
    MissingTable(String),
}

impl TursoError {
    /// Classify a libsql error by its SQLite message
    pub(crate) fn from_libsql(error: libsql::Error) -> Self {
        let message = error.to_string();
        if message.contains("no such table") {
            TursoError::MissingTable(message)
        } else if message.contains("constraint failed") {
            TursoError::Constraint(message)
        } else {
            TursoError::Query(message)
        }
    }
}

/// Client for the embedded libsql database
pub struct TursoClient {
    /// Kept alive for the lifetime of the connection
    _db: Database,
    conn: Connection,
    db_path: PathBuf,
}

impl TursoClient {
    /// Open (or create) the database file inside `data_dir`
    ///
    /// The directory is created if it does not exist.
    pub async fn new(data_dir: PathBuf) -> Result<Self, TursoError> {
        std::fs::create_dir_all(&data_dir).map_err(|e| {
            TursoError::Connection(format!(
                "Failed to create data directory {:?}: {}",
                data_dir, e
            ))
        })?;

        let db_path = data_dir.join(DATABASE_FILE);
        crate::debug!("Opening database at {:?}", db_path);

        let db = Builder::new_local(&db_path)
            .build()
            .await
            .map_err(|e| TursoError::Connection(e.to_string()))?;
        let conn = db
            .connect()
            .map_err(|e| TursoError::Connection(e.to_string()))?;

        Ok(Self {
            _db: db,
            conn,
            db_path,
        })
    }

    /// Path of the database file
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Execute a statement that returns no rows
    ///
    /// # Returns
    /// Number of rows changed
    pub async fn execute(&self, sql: &str, params: impl IntoParams) -> Result<u64, TursoError> {
        self.conn
            .execute(sql, params)
            .await
            .map_err(TursoError::from_libsql)
    }

    /// Run a query and return its rows
    pub async fn query(&self, sql: &str, params: impl IntoParams) -> Result<Rows, TursoError> {
        self.conn
            .query(sql, params)
            .await
            .map_err(TursoError::from_libsql)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
