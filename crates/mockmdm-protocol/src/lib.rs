//! Mock MDM Protocol — the XML documents exchanged with Cisco ISE.

pub mod capability;
pub mod devices;
mod writer;

pub use capability::{capability_document, API_PATH, CAPABILITY_API_VERSION, QUERY_MAX_SIZE};
pub use devices::{device_list_document, DEVICE_API_VERSION};
