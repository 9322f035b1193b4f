//! `mockmdm validate` — strict check of the device dataset.

use std::path::Path;

use mockmdm_store::{DeviceStore, StoreReport};

/// Load the dataset strictly. Read and parse failures become a problem entry.
pub fn validate(path: &Path) -> StoreReport {
    DeviceStore::inspect(path).unwrap_or_else(|e| StoreReport {
        path: path.to_path_buf(),
        devices: Vec::new(),
        problems: vec![format!("Failed to load {}: {}", path.display(), e)],
    })
}

pub fn print_report(report: &StoreReport) {
    println!("=== Mock MDM Device Dataset ===");
    println!();
    println!("File:      {}", report.path.display());
    println!("Devices:   {}", report.devices.len());

    if !report.devices.is_empty() {
        println!();
        for device in &report.devices {
            println!(
                "  {}  user={}  compliance={}",
                device.macaddress,
                device.username.as_deref().unwrap_or("-"),
                device.compliance.as_deref().unwrap_or("-"),
            );
        }
    }

    if !report.problems.is_empty() {
        println!();
        println!("Problems:");
        for p in &report.problems {
            println!("  - {}", p);
        }
    }

    println!();
    if report.is_clean() {
        println!("Status: OK");
    } else {
        println!("Status: PROBLEMS FOUND");
    }
}

pub fn print_json(report: &StoreReport) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
