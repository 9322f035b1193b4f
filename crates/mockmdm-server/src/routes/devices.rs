//! Device attribute query route.

use std::path::Path;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use mockmdm_core::{DeviceQuery, Error};
use mockmdm_store::{query_devices, DeviceStore};
use tracing::debug;

use super::xml_response;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ise/mdm/api/devices/", get(get_devices))
        .route("/ise/mdm/api/devices", get(get_devices))
}

/// Query string sent by ISE, kept as raw pairs so repeated or unexpected
/// parameters never reject the request. `paging` and `filter` have no effect.
#[derive(Debug, Default)]
struct DeviceParams {
    querycriteria: Option<String>,
    value: Option<String>,
}

impl DeviceParams {
    /// The last occurrence of a repeated parameter wins.
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, val) in pairs {
            match key.as_str() {
                "querycriteria" => params.querycriteria = Some(val),
                "value" => params.value = Some(val),
                _ => {}
            }
        }
        params
    }
}

/// GET /ise/mdm/api/devices/ — reload the dataset, filter, render.
async fn get_devices(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let params = DeviceParams::from_pairs(pairs);
    let device_file = state.config.device_file.clone();

    let document = tokio::task::spawn_blocking(move || render_devices(&device_file, &params))
        .await
        .unwrap_or_else(|e| Err(Error::Internal(format!("device query task failed: {}", e))));

    xml_response(document)
}

fn render_devices(device_file: &Path, params: &DeviceParams) -> mockmdm_core::Result<String> {
    let store = DeviceStore::load(device_file);
    let query = DeviceQuery::new(params.querycriteria.as_deref(), params.value.as_deref());
    let matched = query_devices(&store, &query);

    debug!(
        "Device query criteria={} matched {}/{} devices",
        query.criteria,
        matched.len(),
        store.len()
    );

    mockmdm_protocol::device_list_document(matched)
}
