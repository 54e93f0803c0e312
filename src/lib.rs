// yuedict: Chinese to Cantonese dictionary and word-by-word translator

// Enable coverage attribute on nightly for explicit exclusions
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod commands;
pub mod config;
pub mod dictionary;
pub mod server;
pub mod storage;
pub mod turso;

// Re-export log macros for use throughout the crate
pub use log::{debug, error, info, trace, warn};

pub use config::{AppConfig, ConfigError};
pub use dictionary::{
    CandidateSet, Direction, LookupEngine, LookupLimits, SelectionError, Tokenizer,
    TranslationEntry, TranslationError, TranslationPage, TranslationSelection,
};
pub use turso::{initialize_schema, TursoClient, TursoError};
