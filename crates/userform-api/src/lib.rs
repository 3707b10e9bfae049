// Userform HTTP service
//
// Route layer, submission service, templates and error mapping. The binary
// in main.rs wires these to a Postgres-backed store.

pub mod config;
pub mod error;
pub mod forms;
pub mod services;
pub mod templates;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use error::ApiError;
pub use forms::AppState;
pub use templates::Templates;

/// Build the full application router with request tracing
pub fn app(state: AppState) -> Router {
    forms::routes(state).layer(TraceLayer::new_for_http())
}
