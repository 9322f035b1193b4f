//! Mock MDM server — HTTP surface queried by Cisco ISE.

pub mod routes;
pub mod state;
pub mod validate;

pub use routes::build_router;
pub use state::AppState;
