// Translation entry types shared by the store, the lookup engine and the command layer

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A persisted Chinese -> Cantonese word pair
///
/// Field names follow the table columns so rows serialize the same way the
/// listing endpoint has always returned them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranslationEntry {
    /// Store-assigned identity, monotonic and immutable
    pub id: i64,
    /// Source-language term (e.g., "我")
    pub chinese: String,
    /// Romanized Cantonese rendering (e.g., "ngo5")
    pub cantonese: String,
    /// RFC 3339 creation timestamp, set by the store
    pub created_at: String,
    /// RFC 3339 update timestamp, set by the store
    pub updated_at: String,
}

impl TranslationEntry {
    /// Value of the given field
    pub fn field(&self, field: LookupField) -> &str {
        match field {
            LookupField::Chinese => &self.chinese,
            LookupField::Cantonese => &self.cantonese,
        }
    }
}

/// One page of a (possibly filtered) entry listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TranslationPage {
    pub translations: Vec<TranslationEntry>,
    pub total: u64,
    pub total_pages: u64,
}

/// Column of the translations table a lookup runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupField {
    Chinese,
    Cantonese,
}

impl LookupField {
    /// SQL column name
    pub fn column(self) -> &'static str {
        match self {
            LookupField::Chinese => "chinese",
            LookupField::Cantonese => "cantonese",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            LookupField::Chinese => LookupField::Cantonese,
            LookupField::Cantonese => LookupField::Chinese,
        }
    }
}

/// Translation direction
///
/// `zh` looks tokens up by their Chinese term and offers Cantonese renderings;
/// `en` looks tokens up by their romanized rendering and offers Chinese terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "zh")]
    ChineseToCantonese,
    #[serde(rename = "en")]
    CantoneseToChinese,
}

impl Direction {
    /// Field the token is matched against
    pub fn lookup_field(self) -> LookupField {
        match self {
            Direction::ChineseToCantonese => LookupField::Chinese,
            Direction::CantoneseToChinese => LookupField::Cantonese,
        }
    }

    /// Field candidates are read from
    pub fn candidate_field(self) -> LookupField {
        self.lookup_field().opposite()
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::ChineseToCantonese => Direction::CantoneseToChinese,
            Direction::CantoneseToChinese => Direction::ChineseToCantonese,
        }
    }

    /// Wire code ("zh" or "en")
    pub fn code(self) -> &'static str {
        match self {
            Direction::ChineseToCantonese => "zh",
            Direction::CantoneseToChinese => "en",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zh" => Ok(Direction::ChineseToCantonese),
            "en" => Ok(Direction::CantoneseToChinese),
            other => Err(format!("Unknown language '{}', expected 'zh' or 'en'", other)),
        }
    }
}

/// Error types for translation store and lookup operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TranslationError {
    /// A required request field is missing or blank
    #[error("{0}")]
    Validation(String),
    /// The store rejected a row (e.g., an empty field)
    #[error("Constraint violated: {0}")]
    Constraint(String),
    /// The translations table has not been provisioned
    #[error("Translations table does not exist: {0}")]
    TableMissing(String),
    /// The database could not be reached or opened
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
    /// Failed to persist an entry
    #[error("Failed to persist entry: {0}")]
    Persistence(String),
    /// Failed to load entries
    #[error("Failed to load entries: {0}")]
    Load(String),
    /// A single token's lookup failed
    #[error("Lookup failed for '{token}': {message}")]
    Lookup { token: String, message: String },
}

#[cfg(test)]
#[path = "entry_test.rs"]
mod tests;
