//! Capability descriptor route.

use std::sync::Arc;

use axum::extract::RawQuery;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tracing::debug;

use super::xml_response;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ciscoise/mdminfo/", get(get_mdm_info))
        .route("/ciscoise/mdminfo", get(get_mdm_info))
}

/// GET /ciscoise/mdminfo/ — same document for every query string, including
/// whatever `ise_api_version` ISE asks for.
async fn get_mdm_info(RawQuery(query): RawQuery) -> Response {
    debug!("mdminfo requested (query={})", query.as_deref().unwrap_or("-"));
    xml_response(mockmdm_protocol::capability_document())
}
