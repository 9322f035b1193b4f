//! Mock MDM Store — YAML device dataset, reloaded per query.

pub mod query;
pub mod report;
pub mod store;

pub use query::query_devices;
pub use report::{DeviceSummary, StoreReport};
pub use store::DeviceStore;
