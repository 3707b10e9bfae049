// Form HTTP routes
// Decision: GET / renders the form, POST /submit stores and redirects (303)

use axum::{
    extract::State,
    response::{Html, Redirect},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use userform_core::UserStore;

use crate::error::ApiError;
use crate::services::{SubmissionService, SubmitError, SubmitForm};
use crate::templates::{Templates, FORM_TEMPLATE};

/// App state for form routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SubmissionService>,
    pub templates: Arc<Templates>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, templates: Templates) -> Self {
        Self {
            service: Arc::new(SubmissionService::new(store)),
            templates: Arc::new(templates),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Create form routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(form))
        .route("/submit", post(submit))
        .route("/health", get(health))
        .with_state(state)
}

/// GET / - Render the name form
pub async fn form(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let html = state.templates.render(FORM_TEMPLATE).map_err(|e| {
        tracing::error!("Failed to render form: {}", e);
        e
    })?;

    Ok(Html(html))
}

/// POST /submit - Store the submitted name, then send the client back to the form
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<SubmitForm>,
) -> Result<Redirect, ApiError> {
    let user = state.service.submit(form).await.map_err(|e| {
        match &e {
            SubmitError::MissingField(field) => {
                tracing::warn!(field, "Rejected submission: missing field")
            }
            SubmitError::Store(_) => tracing::error!("Failed to store submission: {}", e),
        }
        e
    })?;

    tracing::info!(id = user.id, "Stored submission");
    Ok(Redirect::to("/"))
}
