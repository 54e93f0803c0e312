//! Storage backend trait for translation entries.
//!
//! The lookup engine and the command layer depend on this trait rather than on
//! a concrete database, so they can be exercised against in-memory backends.
//! The primary implementation is TursoClient.

use crate::dictionary::{LookupField, TranslationEntry, TranslationError, TranslationPage};
use async_trait::async_trait;

/// Backend trait for translation entry storage operations.
#[async_trait]
pub trait EntryStoreBackend: Send + Sync {
    /// Rows whose `field` equals `value`, ordered by identity, at most `limit`.
    ///
    /// Equality is case-sensitive on the Chinese column and case-insensitive
    /// on the Cantonese column.
    async fn find_exact(
        &self,
        field: LookupField,
        value: &str,
        limit: usize,
    ) -> Result<Vec<TranslationEntry>, TranslationError>;

    /// Rows whose `field` contains `pattern`, ordered by identity, at most `limit`.
    async fn find_substring(
        &self,
        field: LookupField,
        pattern: &str,
        limit: usize,
    ) -> Result<Vec<TranslationEntry>, TranslationError>;

    /// Insert a new entry. Identity and timestamps are assigned by the store.
    async fn create(
        &self,
        chinese: String,
        cantonese: String,
    ) -> Result<TranslationEntry, TranslationError>;

    /// One page of entries matching `search` against either field.
    /// An empty search term matches every entry.
    async fn list(
        &self,
        search: &str,
        page: u64,
        page_size: u64,
    ) -> Result<TranslationPage, TranslationError>;
}

#[cfg(test)]
#[path = "traits_test.rs"]
mod tests;
