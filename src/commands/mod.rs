// Command layer - validation and orchestration shared by the HTTP server and the CLI
// The actual logic is in logic.rs which is fully tested.

pub mod logic;

pub use logic::{
    add_translation_impl, init_db_impl, list_translations_impl, to_user_error, translate_impl,
    AddTranslationRequest, ListTranslationsQuery, ListTranslationsRequest, TranslateRequest,
};
