//! The `mdminfo` capability descriptor ISE fetches before any device query.

use mockmdm_core::Result;

use crate::writer::XmlDocument;

pub const CAPABILITY_API_VERSION: u32 = 3;
/// Where ISE will find the device query API.
pub const API_PATH: &str = "/ise/mdm/api";
pub const REDIRECT_URL: &str = "https://wintermute-alpha.cisco.com/redirect";
/// Largest result page ISE may ask for. Paging is not implemented.
pub const QUERY_MAX_SIZE: u32 = 3000;
pub const VENDOR: &str = "Mock_MDM";
pub const PRODUCT_NAME: &str = "Mock_MDM";
pub const PRODUCT_VERSION: &str = "1.0.0";

/// Render the fixed descriptor. The requested ISE API version does not change it.
pub fn capability_document() -> Result<String> {
    let mut doc = XmlDocument::new()?;
    doc.open("ise_api")?;
    doc.leaf("name", "mdminfo")?;
    doc.leaf("api_version", &CAPABILITY_API_VERSION.to_string())?;
    doc.leaf("api_path", API_PATH)?;
    doc.leaf("redirect_url", REDIRECT_URL)?;
    doc.leaf("query_max_size", &QUERY_MAX_SIZE.to_string())?;
    doc.leaf("messaging_support", "false")?;
    doc.leaf("vendor", VENDOR)?;
    doc.leaf("product_name", PRODUCT_NAME)?;
    doc.leaf("product_version", PRODUCT_VERSION)?;
    doc.close("ise_api")?;
    doc.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPECTED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ise_api>
  <name>mdminfo</name>
  <api_version>3</api_version>
  <api_path>/ise/mdm/api</api_path>
  <redirect_url>https://wintermute-alpha.cisco.com/redirect</redirect_url>
  <query_max_size>3000</query_max_size>
  <messaging_support>false</messaging_support>
  <vendor>Mock_MDM</vendor>
  <product_name>Mock_MDM</product_name>
  <product_version>1.0.0</product_version>
</ise_api>
"#;

    #[test]
    fn test_byte_identical_descriptor() {
        assert_eq!(capability_document().unwrap(), EXPECTED);
    }
}
