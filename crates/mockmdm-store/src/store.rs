//! The device store: an ordered, immutable map from normalized hardware
//! address to [`DeviceRecord`], rebuilt from the dataset file on demand.

use std::collections::HashMap;
use std::path::Path;

use mockmdm_core::{audit_attributes, normalize_mac, DeviceRecord, Error, Result};
use serde_yml::Value;
use tracing::{debug, warn};

use crate::report::StoreReport;

/// Devices keyed by normalized hardware address, in dataset order.
#[derive(Debug, Clone, Default)]
pub struct DeviceStore {
    entries: Vec<(String, DeviceRecord)>,
    index: HashMap<String, usize>,
}

impl DeviceStore {
    /// Load the dataset at `path`. Never fails: any problem yields what could
    /// be read, down to an empty store.
    pub fn load(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Device file {} not found, serving no devices", path.display());
                return Self::default();
            }
            Err(e) => {
                warn!("Failed to read device file {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::parse(&text) {
            Ok((store, problems)) => {
                for problem in &problems {
                    warn!("{}: {}", path.display(), problem);
                }
                debug!("Loaded {} devices from {}", store.len(), path.display());
                store
            }
            Err(e) => {
                warn!("Ignoring device file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse an in-memory dataset with the same forgiving rules as [`load`](Self::load).
    pub fn from_yaml_str(text: &str) -> Self {
        match Self::parse(text) {
            Ok((store, problems)) => {
                for problem in &problems {
                    warn!("{}", problem);
                }
                store
            }
            Err(e) => {
                warn!("Ignoring device dataset: {}", e);
                Self::default()
            }
        }
    }

    /// Strict load for diagnostics: I/O and parse errors are returned, and
    /// skipped entries are listed in the report.
    pub fn inspect(path: &Path) -> Result<StoreReport> {
        let text = std::fs::read_to_string(path)?;
        let (store, problems) = Self::parse(&text)?;
        Ok(StoreReport::new(path, &store, problems))
    }

    /// Parse a dataset, returning the store plus a description of every entry
    /// that was skipped or had attributes replaced by defaults.
    fn parse(text: &str) -> Result<(Self, Vec<String>)> {
        let mut store = Self::default();
        let mut problems = Vec::new();

        if text.trim().is_empty() {
            return Ok((store, problems));
        }

        let mapping = match serde_yml::from_str::<Value>(text)? {
            Value::Null => return Ok((store, problems)),
            Value::Mapping(mapping) => mapping,
            other => {
                return Err(Error::Dataset(format!(
                    "expected a mapping of hardware address to attributes, found {}",
                    kind_of(&other)
                )))
            }
        };

        for (key, value) in mapping {
            let Some(raw_id) = key_text(&key) else {
                problems.push(format!("skipping entry with non-scalar key ({})", kind_of(&key)));
                continue;
            };

            let record = match value {
                Value::Null => DeviceRecord::default(),
                Value::Mapping(attributes) => {
                    for problem in audit_attributes(&attributes) {
                        problems.push(format!("device {}: {}", raw_id, problem));
                    }
                    serde_yml::from_value::<DeviceRecord>(Value::Mapping(attributes))
                        .unwrap_or_else(|e| {
                            problems.push(format!("device {}: {}, using defaults", raw_id, e));
                            DeviceRecord::default()
                        })
                }
                other => {
                    problems.push(format!(
                        "device {}: attributes are a {}, not a mapping, using defaults",
                        raw_id,
                        kind_of(&other)
                    ));
                    DeviceRecord::default()
                }
            };

            store.insert(normalize_mac(&raw_id), record);
        }

        Ok((store, problems))
    }

    /// Insert under an already-normalized id. A repeated id replaces the
    /// record but keeps its original position.
    fn insert(&mut self, id: String, record: DeviceRecord) {
        match self.index.get(&id) {
            Some(&pos) => self.entries[pos].1 = record,
            None => {
                self.index.insert(id.clone(), self.entries.len());
                self.entries.push((id, record));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a device by hardware address in any separator/case style.
    pub fn get(&self, mac: &str) -> Option<&DeviceRecord> {
        self.index
            .get(&normalize_mac(mac))
            .map(|&pos| &self.entries[pos].1)
    }

    /// Devices in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DeviceRecord)> {
        self.entries.iter().map(|(id, record)| (id.as_str(), record))
    }
}

fn key_text(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
