// Command implementation logic - transport-independent handlers for the
// list, add, translate and provisioning operations

use serde::Deserialize;

use crate::config::DEFAULT_PAGE_SIZE;
use crate::dictionary::{
    Direction, LookupEngine, TranslationEntry, TranslationError, TranslationPage,
    TranslationSelection,
};
use crate::storage::EntryStoreBackend;
use crate::turso::{initialize_schema, TursoClient, TursoError};

/// Listing parameters after validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTranslationsRequest {
    pub search: String,
    pub page: u64,
    pub limit: u64,
}

impl Default for ListTranslationsRequest {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Raw listing parameters as they arrive in a query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTranslationsQuery {
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl TryFrom<ListTranslationsQuery> for ListTranslationsRequest {
    type Error = TranslationError;

    fn try_from(query: ListTranslationsQuery) -> Result<Self, Self::Error> {
        let defaults = Self::default();
        Ok(Self {
            search: query.search.unwrap_or_default(),
            page: parse_positive("page", query.page, defaults.page)?,
            limit: parse_positive("limit", query.limit, defaults.limit)?,
        })
    }
}

/// Body of an add request; both fields are required
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddTranslationRequest {
    pub chinese: Option<String>,
    pub cantonese: Option<String>,
}

/// Body of a translate request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    pub text: Option<String>,
    #[serde(default)]
    pub from_lang: Option<Direction>,
}

fn parse_positive(name: &str, value: Option<String>, default: u64) -> Result<u64, TranslationError> {
    let Some(raw) = value.filter(|v| !v.trim().is_empty()) else {
        return Ok(default);
    };
    match raw.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(TranslationError::Validation(format!(
            "Invalid {} '{}': expected a positive integer",
            name, raw
        ))),
    }
}

/// Map TranslationError to user-friendly error messages
pub fn to_user_error(error: &TranslationError) -> String {
    match error {
        TranslationError::Validation(msg) => msg.clone(),
        TranslationError::Constraint(msg) => format!("Invalid translation: {}", msg),
        TranslationError::TableMissing(msg) => format!(
            "Translations table does not exist, initialize the database first ({})",
            msg
        ),
        TranslationError::StoreUnavailable(msg) => {
            format!("Failed to connect to database: {}", msg)
        }
        TranslationError::Persistence(msg) => format!("Failed to add translation: {}", msg),
        TranslationError::Load(msg) => format!("Failed to fetch translations: {}", msg),
        TranslationError::Lookup { token, message } => {
            format!("Failed to translate '{}': {}", token, message)
        }
    }
}

/// Implementation of list_translations
///
/// # Errors
/// Returns an error if the page parameters are invalid or the store fails.
pub async fn list_translations_impl(
    store: &dyn EntryStoreBackend,
    request: ListTranslationsRequest,
) -> Result<TranslationPage, TranslationError> {
    if request.page == 0 || request.limit == 0 {
        return Err(TranslationError::Validation(
            "Page and limit must be positive".to_string(),
        ));
    }

    let page = store
        .list(&request.search, request.page, request.limit)
        .await?;
    crate::debug!(
        "Listed {} of {} translations (search='{}', page={})",
        page.translations.len(),
        page.total,
        request.search,
        request.page
    );
    Ok(page)
}

/// Implementation of add_translation
///
/// Both fields are trimmed; a missing or blank field is rejected before the
/// store is touched.
pub async fn add_translation_impl(
    store: &dyn EntryStoreBackend,
    request: AddTranslationRequest,
) -> Result<TranslationEntry, TranslationError> {
    let chinese = request.chinese.as_deref().map(str::trim).unwrap_or_default();
    let cantonese = request.cantonese.as_deref().map(str::trim).unwrap_or_default();

    if chinese.is_empty() || cantonese.is_empty() {
        return Err(TranslationError::Validation(
            "Chinese and Cantonese text are required".to_string(),
        ));
    }

    let entry = store
        .create(chinese.to_string(), cantonese.to_string())
        .await?;

    crate::info!(
        "Added translation {}: {} -> {}",
        entry.id,
        entry.chinese,
        entry.cantonese
    );
    Ok(entry)
}

/// Implementation of translate
///
/// Only a missing or blank text fails; per-token store failures degrade to
/// the untranslated token inside the returned selection.
pub async fn translate_impl(
    engine: &LookupEngine,
    request: TranslateRequest,
) -> Result<TranslationSelection, TranslationError> {
    let text = request.text.unwrap_or_default();
    if text.trim().is_empty() {
        return Err(TranslationError::Validation("Text is required".to_string()));
    }

    let direction = request.from_lang.unwrap_or_default();
    Ok(engine.translate(&text, direction).await)
}

/// Implementation of init_db: create or migrate the schema
pub async fn init_db_impl(client: &TursoClient) -> Result<(), TranslationError> {
    initialize_schema(client).await.map_err(|e| match e {
        TursoError::Connection(msg) => TranslationError::StoreUnavailable(msg),
        other => TranslationError::Persistence(other.to_string()),
    })?;
    crate::info!("Database initialized at {:?}", client.db_path());
    Ok(())
}

#[cfg(test)]
#[path = "logic_test.rs"]
mod tests;
