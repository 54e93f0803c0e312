// Translation entry operations using Turso/libsql
//
// Provides the paginated listing, insertion and exact/substring lookups
// behind EntryStoreBackend.

use async_trait::async_trait;
use libsql::params::IntoParams;
use libsql::{params, Row};

use super::client::{TursoClient, TursoError};
use crate::dictionary::{LookupField, TranslationEntry, TranslationError, TranslationPage};
use crate::storage::EntryStoreBackend;

const ENTRY_COLUMNS: &str = "id, chinese, cantonese, created_at, updated_at";

/// Escape LIKE wildcards so `value` matches literally, then wrap it in `%...%`
fn contains_pattern(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Number of pages needed for `total` rows at `page_size` rows per page
fn page_count(total: u64, page_size: u64) -> u64 {
    total.div_ceil(page_size)
}

fn entry_from_row(row: &Row) -> Result<TranslationEntry, libsql::Error> {
    Ok(TranslationEntry {
        id: row.get(0)?,
        chinese: row.get(1)?,
        cantonese: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

/// Map client errors for read paths
fn load_error(error: TursoError) -> TranslationError {
    match error {
        TursoError::MissingTable(msg) => TranslationError::TableMissing(msg),
        TursoError::Connection(msg) => TranslationError::StoreUnavailable(msg),
        other => TranslationError::Load(other.to_string()),
    }
}

/// Map client errors for write paths
fn persistence_error(error: TursoError) -> TranslationError {
    match error {
        TursoError::MissingTable(msg) => TranslationError::TableMissing(msg),
        TursoError::Connection(msg) => TranslationError::StoreUnavailable(msg),
        TursoError::Constraint(msg) => TranslationError::Constraint(msg),
        other => TranslationError::Persistence(other.to_string()),
    }
}

impl TursoClient {
    /// Add a new translation entry.
    ///
    /// Identity comes from the table's AUTOINCREMENT key; both timestamps are
    /// set to the insertion time.
    ///
    /// # Errors
    /// `TranslationError::Constraint` if either field is blank.
    pub async fn add_translation(
        &self,
        chinese: String,
        cantonese: String,
    ) -> Result<TranslationEntry, TranslationError> {
        if chinese.trim().is_empty() {
            return Err(TranslationError::Constraint(
                "chinese must not be empty".to_string(),
            ));
        }
        if cantonese.trim().is_empty() {
            return Err(TranslationError::Constraint(
                "cantonese must not be empty".to_string(),
            ));
        }

        let now = chrono::Utc::now().to_rfc3339();
        let sql = format!(
            "INSERT INTO translations (chinese, cantonese, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?3) RETURNING {}",
            ENTRY_COLUMNS
        );

        let mut rows = self
            .query(&sql, params![chinese, cantonese, now])
            .await
            .map_err(persistence_error)?;

        let row = rows
            .next()
            .await
            .map_err(|e| persistence_error(TursoError::from_libsql(e)))?
            .ok_or_else(|| {
                TranslationError::Persistence("Insert returned no row".to_string())
            })?;

        entry_from_row(&row).map_err(|e| TranslationError::Persistence(e.to_string()))
    }

    /// List one page of entries, optionally filtered by a substring of either field.
    ///
    /// Search is case-insensitive for ASCII letters. Pages are 1-based; a page
    /// of 0 is treated as the first page.
    pub async fn list_translations(
        &self,
        search: &str,
        page: u64,
        page_size: u64,
    ) -> Result<TranslationPage, TranslationError> {
        if page_size == 0 {
            return Err(TranslationError::Validation(
                "Page size must be greater than zero".to_string(),
            ));
        }
        let limit = i64::try_from(page_size).map_err(|_| {
            TranslationError::Validation(format!("Page size {} is too large", page_size))
        })?;
        // An offset past i64::MAX lies beyond any stored row
        let offset = (page.max(1) - 1)
            .checked_mul(page_size)
            .and_then(|offset| i64::try_from(offset).ok());
        let search = search.trim();

        let (total, translations) = if search.is_empty() {
            let total = self
                .count("SELECT COUNT(*) FROM translations", ())
                .await?;
            let entries = match offset {
                Some(offset) => {
                    let sql = format!(
                        "SELECT {} FROM translations ORDER BY id LIMIT ?1 OFFSET ?2",
                        ENTRY_COLUMNS
                    );
                    self.fetch_entries(&sql, params![limit, offset]).await?
                }
                None => Vec::new(),
            };
            (total, entries)
        } else {
            let pattern = contains_pattern(search);
            let filter = r"chinese LIKE ?1 ESCAPE '\' OR cantonese LIKE ?1 ESCAPE '\'";
            let total = self
                .count(
                    &format!("SELECT COUNT(*) FROM translations WHERE {}", filter),
                    params![pattern.clone()],
                )
                .await?;
            let entries = match offset {
                Some(offset) => {
                    let sql = format!(
                        "SELECT {} FROM translations WHERE {} ORDER BY id LIMIT ?2 OFFSET ?3",
                        ENTRY_COLUMNS, filter
                    );
                    self.fetch_entries(&sql, params![pattern, limit, offset])
                        .await?
                }
                None => Vec::new(),
            };
            (total, entries)
        };

        Ok(TranslationPage {
            translations,
            total,
            total_pages: page_count(total, page_size),
        })
    }

    /// Entries whose `field` equals `value`, in identity order.
    ///
    /// The Chinese column compares exactly; the Cantonese column compares
    /// with NOCASE.
    pub async fn find_translations_exact(
        &self,
        field: LookupField,
        value: &str,
        limit: usize,
    ) -> Result<Vec<TranslationEntry>, TranslationError> {
        let comparison = match field {
            LookupField::Chinese => "chinese = ?1",
            LookupField::Cantonese => "cantonese = ?1 COLLATE NOCASE",
        };
        let sql = format!(
            "SELECT {} FROM translations WHERE {} ORDER BY id LIMIT ?2",
            ENTRY_COLUMNS, comparison
        );
        self.fetch_entries(&sql, params![value.to_string(), limit as i64])
            .await
    }

    /// Entries whose `field` contains `pattern`, in identity order.
    pub async fn find_translations_containing(
        &self,
        field: LookupField,
        pattern: &str,
        limit: usize,
    ) -> Result<Vec<TranslationEntry>, TranslationError> {
        let sql = format!(
            r"SELECT {} FROM translations WHERE {} LIKE ?1 ESCAPE '\' ORDER BY id LIMIT ?2",
            ENTRY_COLUMNS,
            field.column()
        );
        self.fetch_entries(&sql, params![contains_pattern(pattern), limit as i64])
            .await
    }

    /// Total number of stored entries
    pub async fn count_translations(&self) -> Result<u64, TranslationError> {
        self.count("SELECT COUNT(*) FROM translations", ()).await
    }

    async fn count(
        &self,
        sql: &str,
        params: impl IntoParams,
    ) -> Result<u64, TranslationError> {
        let mut rows = self.query(sql, params).await.map_err(load_error)?;
        let total: i64 = match rows
            .next()
            .await
            .map_err(|e| load_error(TursoError::from_libsql(e)))?
        {
            Some(row) => row.get(0).map_err(|e| TranslationError::Load(e.to_string()))?,
            None => 0,
        };
        Ok(total.max(0) as u64)
    }

    async fn fetch_entries(
        &self,
        sql: &str,
        params: impl IntoParams,
    ) -> Result<Vec<TranslationEntry>, TranslationError> {
        let mut rows = self.query(sql, params).await.map_err(load_error)?;

        let mut entries = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| load_error(TursoError::from_libsql(e)))?
        {
            entries.push(entry_from_row(&row).map_err(|e| TranslationError::Load(e.to_string()))?);
        }

        Ok(entries)
    }
}

#[async_trait]
impl EntryStoreBackend for TursoClient {
    async fn find_exact(
        &self,
        field: LookupField,
        value: &str,
        limit: usize,
    ) -> Result<Vec<TranslationEntry>, TranslationError> {
        self.find_translations_exact(field, value, limit).await
    }

    async fn find_substring(
        &self,
        field: LookupField,
        pattern: &str,
        limit: usize,
    ) -> Result<Vec<TranslationEntry>, TranslationError> {
        self.find_translations_containing(field, pattern, limit).await
    }

    async fn create(
        &self,
        chinese: String,
        cantonese: String,
    ) -> Result<TranslationEntry, TranslationError> {
        self.add_translation(chinese, cantonese).await
    }

    async fn list(
        &self,
        search: &str,
        page: u64,
        page_size: u64,
    ) -> Result<TranslationPage, TranslationError> {
        self.list_translations(search, page, page_size).await
    }
}

#[cfg(test)]
#[path = "translations_test.rs"]
mod tests;
