//! SupremeHead — decision-routing orchestrator for ingested scrolls.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use supremehead_pipeline::SupremeHead;
use supremehead_server::{routes, stubs};

const DEFAULT_CONFIG_PATH: &str = "config.json";

fn resolve_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3002)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    // Handle CLI subcommands
    if args.len() > 1 {
        match args[1].as_str() {
            "serve" => {
                let config_path = args
                    .get(2)
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
                return run_server(&config_path).await;
            }
            "ingest" => {
                if args.len() < 3 {
                    eprintln!("Usage: supremehead ingest <file> [source] [config]");
                    std::process::exit(1);
                }
                let file = PathBuf::from(&args[2]);
                let source = args.get(3).cloned().unwrap_or_else(|| "cli".to_string());
                let config_path = args
                    .get(4)
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

                let raw = std::fs::read_to_string(&file)
                    .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", file.display(), e))?;
                let head = SupremeHead::from_config_path(&config_path);
                let report = head.ingest_scroll_async(&raw, &source).await;
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }
            "stubs" => {
                let analysis_port = args.get(2).and_then(|p| p.parse().ok()).unwrap_or(3001);
                let storage_port = args.get(3).and_then(|p| p.parse().ok()).unwrap_or(3000);
                return stubs::run(analysis_port, storage_port).await;
            }
            "--help" | "-h" | "help" => {
                println!("SupremeHead — decision-routing orchestrator for ingested scrolls");
                println!();
                println!("Usage: supremehead [command]");
                println!();
                println!("Commands:");
                println!("  (none)                            Start the API server");
                println!("  serve [config]                    Start the API server with a config file");
                println!("  ingest <file> [source] [config]   Ingest one scroll from a file, print the report");
                println!("  stubs [analysis-port] [storage-port]");
                println!("                                    Run the local stub backends");
                println!("  help                              Show this help message");
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'supremehead help' for usage.", args[1]);
                std::process::exit(1);
            }
        }
    }

    run_server(Path::new(DEFAULT_CONFIG_PATH)).await
}

async fn run_server(config_path: &Path) -> anyhow::Result<()> {
    let head = Arc::new(SupremeHead::from_config_path(config_path));
    let port = resolve_port();

    let app = routes::build_router(head);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("SupremeHead listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
