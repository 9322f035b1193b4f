//! Mock MDM Core — device model, identifier normalization, query criteria, configuration.

pub mod config;
pub mod device;
pub mod error;
pub mod mac;
pub mod query;

pub use config::MdmConfig;
pub use device::{audit_attributes, parse_flag, ComplianceRecord, DeviceRecord};
pub use error::{Error, Result};
pub use mac::normalize_mac;
pub use query::{DeviceQuery, QueryCriteria};
