use std::path::PathBuf;

use clap::Parser;
use genai_relay::server::{RelayHttpState, router};
use genai_relay::{Dispatcher, RelayConfig};

#[derive(Debug, Parser)]
#[command(name = "genai-relay", version, about = "Relay chat and image prompts to generative AI providers")]
struct Cli {
    /// TOML config file; built-in defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides `listen` from the config file.
    #[arg(long, alias = "addr")]
    listen: Option<String>,
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    genai_relay::observability::init_tracing(cli.json_logs)?;

    let mut config = match cli.config.as_deref() {
        Some(path) => RelayConfig::load(path)?,
        None => RelayConfig::default(),
    };
    if let Some(listen) = cli.listen {
        config.listen = listen;
    }

    let listener = tokio::net::TcpListener::bind(config.listen.as_str()).await?;
    tracing::info!(
        listen = %listener.local_addr()?,
        openai = %config.openai.base_url,
        gemini = %config.gemini.base_url,
        "genai-relay listening"
    );

    let app = router(RelayHttpState::new(Dispatcher::new(config)));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
