//! HTTP route handlers — the MDM API surface ISE calls.

pub mod devices;
pub mod health;
pub mod mdminfo;

use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(mdminfo::routes())
        .merge(devices::routes())
        .merge(health::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Wrap a rendered document as `application/xml`, or a 500 if rendering failed.
pub(crate) fn xml_response(document: mockmdm_core::Result<String>) -> Response {
    match document {
        Ok(body) => ([(header::CONTENT_TYPE, "application/xml")], body).into_response(),
        Err(e) => {
            error!("Failed to render XML response: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render response: {}", e),
            )
                .into_response()
        }
    }
}
