//! Device records as they appear in the dataset.
//!
//! Every attribute is optional. Defaults ("false", empty string) belong to the
//! wire rendering, so nothing here fills them in.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_yml::{Mapping, Value};

/// Compliance sub-record of a device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceRecord {
    #[serde(default, deserialize_with = "scalar_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub failure_reason: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub remediation: Option<String>,
}

/// One managed endpoint. The hardware address is the store key, not a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    #[serde(default, deserialize_with = "lenient_flag")]
    pub register_status: Option<bool>,
    #[serde(default, deserialize_with = "lenient_compliance")]
    pub compliance: Option<ComplianceRecord>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub disk_encryption_on: Option<bool>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub pin_lock_on: Option<bool>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub jail_broken: Option<bool>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub manufacturer: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub imei: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub meid: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub udid: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub serial_number: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub os_version: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub username: Option<String>,
}

impl DeviceRecord {
    /// Compliance status as stored, if any.
    pub fn compliance_status(&self) -> Option<&str> {
        self.compliance.as_ref()?.status.as_deref()
    }
}

/// Any YAML value, keeping scalars. Identifiers like IMEIs and serials are
/// often left unquoted.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    /// Sequences, mappings: nothing usable.
    Other(de::IgnoredAny),
}

impl Scalar {
    fn into_text(self) -> Option<String> {
        let text = match self {
            Scalar::Bool(b) => b.to_string(),
            Scalar::Int(i) => i.to_string(),
            Scalar::UInt(u) => u.to_string(),
            // 17.0 stays "17.0", the way it was written
            Scalar::Float(f) if f.is_finite() && f.fract() == 0.0 => format!("{:.1}", f),
            Scalar::Float(f) => f.to_string(),
            Scalar::Text(s) => s,
            Scalar::Other(_) => return None,
        };
        Some(text)
    }

    fn into_flag(self) -> Option<bool> {
        match self {
            Scalar::Bool(b) => Some(b),
            Scalar::Int(i) => flag_from_int(i),
            Scalar::UInt(u) => i64::try_from(u).ok().and_then(flag_from_int),
            Scalar::Text(s) => parse_flag(&s),
            Scalar::Float(_) | Scalar::Other(_) => None,
        }
    }
}

/// Interpret a textual flag. `None` for anything outside the accepted spellings.
pub fn parse_flag(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn flag_from_int(i: i64) -> Option<bool> {
    match i {
        0 => Some(false),
        1 => Some(true),
        _ => None,
    }
}

/// Text form of any scalar; non-scalars become absent.
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.and_then(Scalar::into_text))
}

/// Boolean flag; unrecognized values become absent and render as `false`.
fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.and_then(Scalar::into_flag))
}

/// Compliance sub-record; anything but a mapping becomes absent.
fn lenient_compliance<'de, D>(deserializer: D) -> Result<Option<ComplianceRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Shape {
        Record(ComplianceRecord),
        Other(de::IgnoredAny),
    }

    Ok(match Option::<Shape>::deserialize(deserializer)? {
        Some(Shape::Record(record)) => Some(record),
        _ => None,
    })
}

const FLAG_FIELDS: &[&str] = &["register_status", "disk_encryption_on", "pin_lock_on", "jail_broken"];
const TEXT_FIELDS: &[&str] = &[
    "manufacturer",
    "model",
    "imei",
    "meid",
    "udid",
    "serial_number",
    "os_version",
    "phone_number",
    "username",
];
const COMPLIANCE_FIELDS: &[&str] = &["status", "failure_reason", "remediation"];

/// List the attributes of a raw dataset entry that deserialization will
/// replace with defaults. Empty when every present value is usable.
pub fn audit_attributes(attributes: &Mapping) -> Vec<String> {
    let mut problems = Vec::new();

    for field in FLAG_FIELDS {
        if let Some(value) = attributes.get(*field) {
            if !is_flag(value) {
                problems.push(format!("{} is not a boolean flag, rendered as false", field));
            }
        }
    }

    for field in TEXT_FIELDS {
        if let Some(value) = attributes.get(*field) {
            if !is_scalar(value) {
                problems.push(format!("{} is not a scalar, rendered empty", field));
            }
        }
    }

    match attributes.get("compliance") {
        None | Some(Value::Null) => {}
        Some(Value::Mapping(compliance)) => {
            for field in COMPLIANCE_FIELDS {
                if let Some(value) = compliance.get(*field) {
                    if !is_scalar(value) {
                        problems.push(format!("compliance.{} is not a scalar, ignored", field));
                    }
                }
            }
        }
        Some(_) => problems.push("compliance is not a mapping".to_string()),
    }

    problems
}

fn is_scalar(value: &Value) -> bool {
    matches!(
        value,
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)
    )
}

fn is_flag(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(_) => true,
        Value::Number(n) => n.as_i64().and_then(flag_from_int).is_some(),
        Value::String(s) => parse_flag(s).is_some(),
        _ => false,
    }
}
