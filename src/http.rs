use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use crate::handlers::{admin, complete, ApiErr, Ctx};

/// Initialize HTTP routes.
pub fn init_handlers(ctx: Arc<Ctx>) -> Router {
    Router::new()
        .route("/api/complete", get(complete::complete))
        .route("/api/stats", get(admin::get_stats))
        .route("/api/config", get(admin::get_config))
        .fallback(not_found)
        .with_state(ctx)
}

/// JSON 404 for unknown routes.
async fn not_found() -> Response {
    ApiErr::new("not found", StatusCode::NOT_FOUND).into_response()
}
