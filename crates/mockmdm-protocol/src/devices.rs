//! The device attribute list returned for `/ise/mdm/api/devices/`.
//!
//! Absent attributes are filled in here: flags and the compliance status
//! default to `false`, every other field to an empty element.

use mockmdm_core::{DeviceRecord, Result};

use crate::writer::XmlDocument;

pub const DEVICE_API_VERSION: u32 = 2;

/// Render the `<ise_api>` envelope around one `<device>` per entry.
///
/// Entries are `(normalized hardware address, record)` pairs and are written
/// in the order given.
pub fn device_list_document<'a, I>(devices: I) -> Result<String>
where
    I: IntoIterator<Item = (&'a str, &'a DeviceRecord)>,
{
    let mut doc = XmlDocument::new()?;
    doc.open("ise_api")?;
    doc.leaf("name", "attributes")?;
    doc.leaf("api_version", &DEVICE_API_VERSION.to_string())?;
    doc.leaf("paging_info", "0")?;
    doc.open("deviceList")?;
    for (mac, record) in devices {
        write_device(&mut doc, mac, record)?;
    }
    doc.close("deviceList")?;
    doc.close("ise_api")?;
    doc.finish()
}

fn write_device(doc: &mut XmlDocument, mac: &str, record: &DeviceRecord) -> Result<()> {
    doc.open("device")?;
    doc.leaf("macaddress", mac)?;
    doc.open("attributes")?;

    doc.leaf("register_status", flag(record.register_status))?;

    let compliance = record.compliance.clone().unwrap_or_default();
    doc.open("compliance")?;
    doc.leaf(
        "status",
        &compliance
            .status
            .map(|s| s.to_lowercase())
            .unwrap_or_else(|| "false".into()),
    )?;
    doc.leaf("failure_reason", text(&compliance.failure_reason))?;
    doc.leaf("remediation", text(&compliance.remediation))?;
    doc.close("compliance")?;

    doc.leaf("disk_encryption_on", flag(record.disk_encryption_on))?;
    doc.leaf("pin_lock_on", flag(record.pin_lock_on))?;
    doc.leaf("jail_broken", flag(record.jail_broken))?;
    doc.leaf("manufacturer", text(&record.manufacturer))?;
    doc.leaf("model", text(&record.model))?;
    doc.leaf("imei", text(&record.imei))?;
    doc.leaf("meid", text(&record.meid))?;
    doc.leaf("udid", text(&record.udid))?;
    doc.leaf("serial_number", text(&record.serial_number))?;
    doc.leaf("os_version", text(&record.os_version))?;
    doc.leaf("phone_number", text(&record.phone_number))?;
    doc.leaf("username", text(&record.username))?;

    doc.close("attributes")?;
    doc.close("device")
}

fn flag(value: Option<bool>) -> &'static str {
    if value.unwrap_or(false) {
        "true"
    } else {
        "false"
    }
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockmdm_store::DeviceStore;

    fn element<'a>(xml: &'a str, tag: &str) -> Option<&'a str> {
        let open = format!("<{}>", tag);
        let close = format!("</{}>", tag);
        let start = xml.find(&open)? + open.len();
        let end = start + xml[start..].find(&close)?;
        Some(&xml[start..end])
    }

    #[test]
    fn test_empty_list() {
        let xml = device_list_document(std::iter::empty()).unwrap();
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <ise_api>\n  \
             <name>attributes</name>\n  \
             <api_version>2</api_version>\n  \
             <paging_info>0</paging_info>\n  \
             <deviceList>\n  \
             </deviceList>\n\
             </ise_api>\n"
        );
    }

    #[test]
    fn test_absent_fields_use_defaults() {
        let record = DeviceRecord::default();
        let xml = device_list_document([("aabbccddeeff", &record)]).unwrap();

        assert_eq!(element(&xml, "macaddress"), Some("aabbccddeeff"));
        assert_eq!(element(&xml, "register_status"), Some("false"));
        assert_eq!(element(&xml, "status"), Some("false"));
        assert_eq!(element(&xml, "jail_broken"), Some("false"));
        assert!(xml.contains("<imei></imei>"));
        assert!(xml.contains("<failure_reason></failure_reason>"));
        assert!(xml.contains("<username></username>"));
        assert!(!xml.contains("/>"));
    }

    #[test]
    fn test_full_record_round_trip() {
        let store = DeviceStore::from_yaml_str(
            r#"
"AA:BB:CC:DD:EE:FF":
  register_status: true
  compliance:
    status: compliant
    failure_reason: none
    remediation: update OS
  disk_encryption_on: true
  pin_lock_on: true
  jail_broken: false
  manufacturer: Samsung
  model: Galaxy S24
  imei: 356938035643809
  meid: A0000000000001
  udid: 00008110-000A1C2E3E0B801E
  serial_number: R58N12ABCDE
  os_version: "14"
  phone_number: "+15551234567"
  username: alice
"#,
        );
        let xml = device_list_document(store.iter()).unwrap();

        for (tag, expected) in [
            ("macaddress", "aabbccddeeff"),
            ("register_status", "true"),
            ("status", "compliant"),
            ("failure_reason", "none"),
            ("remediation", "update OS"),
            ("disk_encryption_on", "true"),
            ("pin_lock_on", "true"),
            ("jail_broken", "false"),
            ("manufacturer", "Samsung"),
            ("model", "Galaxy S24"),
            ("imei", "356938035643809"),
            ("meid", "A0000000000001"),
            ("udid", "00008110-000A1C2E3E0B801E"),
            ("serial_number", "R58N12ABCDE"),
            ("os_version", "14"),
            ("phone_number", "+15551234567"),
            ("username", "alice"),
        ] {
            assert_eq!(element(&xml, tag), Some(expected), "field {}", tag);
        }
    }

    #[test]
    fn test_status_lowercased() {
        let store = DeviceStore::from_yaml_str("aa:\n  compliance:\n    status: NonCompliant\n");
        let xml = device_list_document(store.iter()).unwrap();
        assert_eq!(element(&xml, "status"), Some("noncompliant"));
    }

    #[test]
    fn test_field_order() {
        let record = DeviceRecord::default();
        let xml = device_list_document([("aa", &record)]).unwrap();
        let order = [
            "<macaddress>",
            "<attributes>",
            "<register_status>",
            "<compliance>",
            "<status>",
            "<failure_reason>",
            "<remediation>",
            "<disk_encryption_on>",
            "<pin_lock_on>",
            "<jail_broken>",
            "<manufacturer>",
            "<model>",
            "<imei>",
            "<meid>",
            "<udid>",
            "<serial_number>",
            "<os_version>",
            "<phone_number>",
            "<username>",
        ];
        let positions: Vec<usize> = order.iter().map(|tag| xml.find(tag).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_values_escaped() {
        let store = DeviceStore::from_yaml_str("aa:\n  manufacturer: \"AT&T <Labs>\"\n");
        let xml = device_list_document(store.iter()).unwrap();
        assert_eq!(element(&xml, "manufacturer"), Some("AT&amp;T &lt;Labs&gt;"));
    }

    #[test]
    fn test_devices_in_given_order() {
        let store = DeviceStore::from_yaml_str("cc: {}\naa: {}\nbb: {}\n");
        let xml = device_list_document(store.iter()).unwrap();
        let a = xml.find("<macaddress>aa<").unwrap();
        let b = xml.find("<macaddress>bb<").unwrap();
        let c = xml.find("<macaddress>cc<").unwrap();
        assert!(c < a && a < b);
        assert_eq!(xml.matches("<device>").count(), 3);
    }
}
