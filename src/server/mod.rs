//! HTTP API for the dictionary.
//!
//! | Method | Path                | Body / query                       |
//! |--------|---------------------|------------------------------------|
//! | GET    | `/api/translations` | `search`, `page`, `limit`          |
//! | POST   | `/api/translations` | `{chinese, cantonese}`             |
//! | POST   | `/api/translate`    | `{text, fromLang}`                 |
//! | POST   | `/api/init-db`      | none                               |
//! | GET    | `/health`           | none                               |
//!
//! Every failure is answered with `{"error": "..."}`; a missing translations
//! table additionally carries `"code": "table_missing"`.

mod error;

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::commands::{
    add_translation_impl, init_db_impl, list_translations_impl, translate_impl,
    AddTranslationRequest, ListTranslationsQuery, ListTranslationsRequest, TranslateRequest,
};
use crate::dictionary::{CandidateSet, LookupEngine, TranslationEntry, TranslationPage};
use crate::turso::TursoClient;

pub use error::ApiError;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<TursoClient>,
    pub engine: LookupEngine,
}

impl AppState {
    pub fn new(client: Arc<TursoClient>, engine: LookupEngine) -> Self {
        Self { client, engine }
    }
}

type SharedState = Arc<AppState>;

/// Build the router with all API routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/translations",
            get(list_translations).post(add_translation),
        )
        .route("/api/translate", post(translate))
        .route("/api/init-db", post(init_db))
        .route("/health", get(health))
        .with_state(Arc::new(state))
}

/// Serve the router on `listener` until Ctrl-C
pub async fn serve(listener: TcpListener, router: Router) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        crate::info!("Serving dictionary API on http://{}", addr);
    }
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        crate::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    crate::info!("Shutdown signal received");
}

async fn list_translations(
    State(state): State<SharedState>,
    Query(query): Query<ListTranslationsQuery>,
) -> Result<Json<TranslationPage>, ApiError> {
    let request = ListTranslationsRequest::try_from(query)?;
    let page = list_translations_impl(state.client.as_ref(), request).await?;
    Ok(Json(page))
}

async fn add_translation(
    State(state): State<SharedState>,
    body: Result<Json<AddTranslationRequest>, JsonRejection>,
) -> Result<Json<TranslationEntry>, ApiError> {
    let Json(request) = body.map_err(ApiError::from_rejection)?;
    let entry = add_translation_impl(state.client.as_ref(), request).await?;
    Ok(Json(entry))
}

async fn translate(
    State(state): State<SharedState>,
    body: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<Vec<CandidateSet>>, ApiError> {
    let Json(request) = body.map_err(ApiError::from_rejection)?;
    let selection = translate_impl(&state.engine, request).await?;
    Ok(Json(selection.into_candidate_sets()))
}

async fn init_db(State(state): State<SharedState>) -> Result<Json<Value>, ApiError> {
    init_db_impl(&state.client).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Database initialized successfully",
    })))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
