//! Mock MDM — answers Cisco ISE compliance queries from a YAML device file.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use mockmdm_core::MdmConfig;
use mockmdm_server::{build_router, validate, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = MdmConfig::from_env();
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--validate" | "validate" => {
                let json = args[2..].iter().any(|a| a == "--json");
                let path = args[2..]
                    .iter()
                    .find(|a| !a.starts_with("--"))
                    .map(PathBuf::from)
                    .unwrap_or_else(|| config.device_file.clone());

                let report = validate::validate(&path);
                if json {
                    validate::print_json(&report)?;
                } else {
                    validate::print_report(&report);
                }
                std::process::exit(if report.is_clean() { 0 } else { 1 });
            }
            "--help" | "-h" | "help" => {
                println!("Mock MDM — Cisco ISE MDM API mock server");
                println!();
                println!("Usage: mockmdm [command]");
                println!();
                println!("Commands:");
                println!("  (none)                       Start the server");
                println!("  validate [device-file] [--json]");
                println!("                               Check the device dataset");
                println!("  help                         Show this help message");
                println!();
                println!("Environment:");
                println!("  MOCKMDM_HOST          Bind address (default 0.0.0.0)");
                println!("  PORT                  Listen port (default 8000)");
                println!("  MOCKMDM_DEVICE_FILE   Device dataset (default devices.yaml)");
                println!("  RUST_LOG              Log filter (default info)");
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'mockmdm help' for usage.", args[1]);
                std::process::exit(1);
            }
        }
    }

    info!("Device file: {}", config.device_file.display());
    if !config.device_file.exists() {
        info!("Device file does not exist yet; device queries return an empty list");
    }

    let addr = config.bind_addr();
    let state = Arc::new(AppState::new(config));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Mock MDM server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
