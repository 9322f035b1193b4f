//! Dataset diagnostics for the `validate` command.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::store::DeviceStore;

/// One loaded device, reduced to the fields an operator checks first.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceSummary {
    pub macaddress: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliance: Option<String>,
}

/// Result of a strict dataset load.
#[derive(Debug, Clone, Serialize)]
pub struct StoreReport {
    pub path: PathBuf,
    pub devices: Vec<DeviceSummary>,
    pub problems: Vec<String>,
}

impl StoreReport {
    pub(crate) fn new(path: &Path, store: &DeviceStore, problems: Vec<String>) -> Self {
        let devices = store
            .iter()
            .map(|(id, record)| DeviceSummary {
                macaddress: id.to_string(),
                username: record.username.clone(),
                compliance: record.compliance_status().map(str::to_string),
            })
            .collect();

        Self {
            path: path.to_path_buf(),
            devices,
            problems,
        }
    }

    /// True when every entry in the dataset was loaded.
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }
}
