// Database schema definitions and migration system
//
// This module defines the SQLite schema for the translations table
// and provides a migration system for schema changes.

use super::client::{TursoClient, TursoError};

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// SQL statements to create all tables (each as a separate string)
const CREATE_TABLES: &[&str] = &[
    // Chinese -> Cantonese word pairs
    r#"CREATE TABLE IF NOT EXISTS translations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        chinese TEXT NOT NULL CHECK (length(trim(chinese)) > 0),
        cantonese TEXT NOT NULL CHECK (length(trim(cantonese)) > 0),
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )"#,
    // Forward exact lookups (case-sensitive)
    r#"CREATE INDEX IF NOT EXISTS idx_translations_chinese ON translations(chinese)"#,
    // Reverse exact lookups compare with NOCASE
    r#"CREATE INDEX IF NOT EXISTS idx_translations_cantonese_nocase ON translations(cantonese COLLATE NOCASE)"#,
];

/// Initialize the database schema.
///
/// Creates all tables if they don't exist and runs any pending migrations.
/// Called on server startup and by the provisioning endpoint; safe to repeat.
pub async fn initialize_schema(client: &TursoClient) -> Result<(), TursoError> {
    // First, ensure schema_version table exists (needed for version checking)
    client
        .execute(
            "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY)",
            (),
        )
        .await?;

    let current_version = get_schema_version(client).await?;

    if current_version == 0 {
        crate::info!("Initializing database schema (version {})", SCHEMA_VERSION);

        for statement in CREATE_TABLES {
            client.execute(statement, ()).await?;
        }

        set_schema_version(client, SCHEMA_VERSION).await?;

        crate::info!("Database schema initialized successfully");
    } else if current_version < SCHEMA_VERSION {
        crate::info!(
            "Migrating database from version {} to {}",
            current_version,
            SCHEMA_VERSION
        );
        run_migrations(client, current_version, SCHEMA_VERSION).await?;
        crate::info!("Database migration complete");
    } else {
        crate::debug!("Database schema is up to date (version {})", current_version);
    }

    Ok(())
}

/// Get the current schema version from the database.
/// Returns 0 if no version has been recorded yet.
pub async fn get_schema_version(client: &TursoClient) -> Result<i32, TursoError> {
    let mut rows = client
        .query(
            "SELECT name FROM sqlite_master WHERE type='table' AND name='schema_version'",
            (),
        )
        .await?;

    if rows.next().await.map_err(TursoError::from_libsql)?.is_none() {
        return Ok(0);
    }

    let mut rows = client
        .query("SELECT version FROM schema_version ORDER BY version DESC LIMIT 1", ())
        .await?;

    match rows.next().await.map_err(TursoError::from_libsql)? {
        Some(row) => {
            let version: i32 = row.get(0).map_err(TursoError::from_libsql)?;
            Ok(version)
        }
        None => Ok(0),
    }
}

/// Set the schema version in the database.
async fn set_schema_version(client: &TursoClient, version: i32) -> Result<(), TursoError> {
    client
        .execute(
            "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
            libsql::params![version],
        )
        .await?;
    Ok(())
}

/// Run migrations from one version to another.
async fn run_migrations(
    client: &TursoClient,
    from_version: i32,
    to_version: i32,
) -> Result<(), TursoError> {
    for version in (from_version + 1)..=to_version {
        // Per-version steps go here, e.g. `if version == 2 { migrate_v1_to_v2(client).await? }`
        crate::debug!("No migration needed for version {}", version);
        set_schema_version(client, version).await?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "schema_test.rs"]
mod tests;
