//! Shared application state.

use mockmdm_core::MdmConfig;

/// State accessible from all route handlers. Read-only: the device dataset
/// is loaded per request, not held here.
pub struct AppState {
    pub config: MdmConfig,
}

impl AppState {
    pub fn new(config: MdmConfig) -> Self {
        Self { config }
    }
}
