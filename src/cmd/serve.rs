//! API server command — `taskdeck serve`.

use std::sync::Arc;

use anyhow::Result;

use taskdeck::config::ProviderConfig;
use taskdeck::server::api::AppState;
use taskdeck::server::generate::{OpenAiBackend, TicketGenerator};
use taskdeck::server::store::TicketStore;
use taskdeck::server::{ServerConfig, start_server};

pub async fn cmd_serve(host: String, port: u16) -> Result<()> {
    let provider = ProviderConfig::from_env()?;

    let state = Arc::new(AppState {
        store: TicketStore::new(),
        generator: TicketGenerator::new(Arc::new(OpenAiBackend::new(&provider))),
    });

    start_server(ServerConfig { host, port }, state).await
}
