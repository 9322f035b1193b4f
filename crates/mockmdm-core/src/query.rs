//! Device query criteria and the single-criterion match predicate.

use std::fmt;

use crate::device::DeviceRecord;
use crate::mac::normalize_mac;

/// Which attribute a device query selects on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryCriteria {
    MacAddress,
    Compliance,
    Username,
    /// No selection: every device matches.
    All,
}

impl QueryCriteria {
    /// Map the `querycriteria` parameter. Absent or unrecognized names select everything.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("macaddress") => Self::MacAddress,
            Some("compliance") => Self::Compliance,
            Some("username") => Self::Username,
            _ => Self::All,
        }
    }
}

impl fmt::Display for QueryCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MacAddress => write!(f, "macaddress"),
            Self::Compliance => write!(f, "compliance"),
            Self::Username => write!(f, "username"),
            Self::All => write!(f, "all"),
        }
    }
}

/// A parsed device query: one criterion plus the value it compares against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceQuery {
    pub criteria: QueryCriteria,
    /// Comparison form of the value: normalized for hardware addresses,
    /// lower-cased otherwise. `None` when absent or empty after that.
    needle: Option<String>,
}

impl DeviceQuery {
    pub fn new(criteria: Option<&str>, value: Option<&str>) -> Self {
        let criteria = QueryCriteria::parse(criteria);
        let needle = value
            .map(|v| match criteria {
                QueryCriteria::MacAddress => normalize_mac(v),
                _ => v.to_lowercase(),
            })
            .filter(|v| !v.is_empty());
        Self { criteria, needle }
    }

    /// A query with no criterion, matching every device.
    pub fn all() -> Self {
        Self {
            criteria: QueryCriteria::All,
            needle: None,
        }
    }

    /// Whether the device keyed by `id` (already normalized) is selected.
    ///
    /// A selecting criterion without a value matches nothing.
    pub fn matches(&self, id: &str, record: &DeviceRecord) -> bool {
        let needle = match (self.criteria, self.needle.as_deref()) {
            (QueryCriteria::All, _) => return true,
            (_, None) => return false,
            (_, Some(needle)) => needle,
        };

        match self.criteria {
            QueryCriteria::MacAddress => id == needle,
            QueryCriteria::Compliance => record
                .compliance_status()
                .is_some_and(|status| status.to_lowercase() == needle),
            QueryCriteria::Username => record
                .username
                .as_deref()
                .is_some_and(|user| user.to_lowercase() == needle),
            QueryCriteria::All => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::ComplianceRecord;

    fn alice() -> DeviceRecord {
        DeviceRecord {
            compliance: Some(ComplianceRecord {
                status: Some("Compliant".into()),
                ..Default::default()
            }),
            username: Some("alice".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_criteria() {
        assert_eq!(QueryCriteria::parse(Some("macaddress")), QueryCriteria::MacAddress);
        assert_eq!(QueryCriteria::parse(Some("compliance")), QueryCriteria::Compliance);
        assert_eq!(QueryCriteria::parse(Some("username")), QueryCriteria::Username);
        assert_eq!(QueryCriteria::parse(None), QueryCriteria::All);
        assert_eq!(QueryCriteria::parse(Some("serial")), QueryCriteria::All);
        assert_eq!(QueryCriteria::parse(Some("MACADDRESS")), QueryCriteria::All);
    }

    #[test]
    fn test_mac_match_normalizes_value() {
        let record = alice();
        let query = DeviceQuery::new(Some("macaddress"), Some("AA:BB:CC:DD:EE:FF"));
        assert!(query.matches("aabbccddeeff", &record));
        assert!(!query.matches("aabbccddee00", &record));
    }

    #[test]
    fn test_missing_value_matches_nothing() {
        let record = alice();
        for criteria in ["macaddress", "compliance", "username"] {
            assert!(!DeviceQuery::new(Some(criteria), None).matches("aabbccddeeff", &record));
            assert!(!DeviceQuery::new(Some(criteria), Some("")).matches("aabbccddeeff", &record));
        }
    }

    #[test]
    fn test_separator_only_mac_matches_nothing() {
        let record = DeviceRecord::default();
        for value in [":", "::-", " . "] {
            let query = DeviceQuery::new(Some("macaddress"), Some(value));
            assert!(!query.matches("", &record), "value {:?}", value);
        }
    }

    #[test]
    fn test_compliance_case_insensitive() {
        let record = alice();
        assert!(DeviceQuery::new(Some("compliance"), Some("compliant")).matches("x", &record));
        assert!(DeviceQuery::new(Some("compliance"), Some("COMPLIANT")).matches("x", &record));
        assert!(!DeviceQuery::new(Some("compliance"), Some("NonCompliant")).matches("x", &record));
    }

    #[test]
    fn test_compliance_without_status_never_matches() {
        let record = DeviceRecord::default();
        assert!(!DeviceQuery::new(Some("compliance"), Some("false")).matches("x", &record));
    }

    #[test]
    fn test_username_case_insensitive() {
        let record = alice();
        assert!(DeviceQuery::new(Some("username"), Some("ALICE")).matches("x", &record));
        assert!(!DeviceQuery::new(Some("username"), Some("bob")).matches("x", &record));
        assert!(!DeviceQuery::new(Some("username"), Some("bob")).matches("x", &DeviceRecord::default()));
    }

    #[test]
    fn test_unknown_or_absent_criteria_match_everything() {
        let record = DeviceRecord::default();
        assert!(DeviceQuery::new(None, None).matches("x", &record));
        assert!(DeviceQuery::new(Some("bogus"), Some("whatever")).matches("x", &record));
        assert!(DeviceQuery::all().matches("x", &record));
    }
}
