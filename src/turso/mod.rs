// Turso/libsql storage for translation entries

mod client;
mod schema;
mod translations;

pub use client::{TursoClient, TursoError, DATABASE_FILE};
pub use schema::{get_schema_version, initialize_schema, SCHEMA_VERSION};
