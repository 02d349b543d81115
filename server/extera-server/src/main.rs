use anyhow::Result;
use std::sync::Arc;

use extera_core::logging;
use extera_core::{AgentService, AgentStore, TranscriptAnalyzeService};
use extera_server::ExteraServer;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let level = std::env::var("EXTERA_LOG").unwrap_or_else(|_| "info".to_string());
    logging::init_logging(&level);

    let host = std::env::var("EXTERA_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(3000);

    let store = AgentStore::from_env();
    tracing::info!("Serving agent bundles from {}", store.root().display());

    let agent_service = AgentService::new(store);
    let analyze_service = Arc::new(TranscriptAnalyzeService::new(agent_service));

    ExteraServer::new(analyze_service).start(&host, port).await
}
