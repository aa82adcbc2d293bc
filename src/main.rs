use clap::Parser;
use reddit_client::{RedditApiClient, RequestHeaders};
use saved_links_core::{CoreError, Credentials, ErrorExt, RelayConfig};
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use web_server::AppState;

/// Local HTTP relay for Reddit listings.
#[derive(Debug, Parser)]
#[command(name = "saved-links", version)]
struct Args {
    /// Relay settings (TOML)
    #[arg(long, env = "SAVED_LINKS_CONFIG")]
    config: Option<PathBuf>,

    /// Reddit app credentials (JSON)
    #[arg(long)]
    secrets: Option<PathBuf>,

    /// Address to listen on, overrides the config file
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), CoreError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("saved_links=info,web_server=info,reddit_client=info")
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting saved-links relay");

    start(Args::parse()).await.map_err(|e| {
        e.log_error();
        e
    })
}

async fn start(args: Args) -> Result<(), CoreError> {
    let config = RelayConfig::load_or_default(args.config.as_deref())?;
    let secrets_path = args
        .secrets
        .unwrap_or_else(|| config.secrets_path.clone());
    let credentials = Credentials::load(&secrets_path)?;

    let token = credentials.stored_token();
    if token.is_none() {
        tracing::warn!("No auth_token in credentials; requests will be unauthenticated");
    }
    let headers = RequestHeaders::new(config.user_agent_for(&credentials.username), token);
    let client = RedditApiClient::with_base_url(&config.api_base_url)?;
    let state = AppState::new(client, headers, &credentials.username);

    let bind_address = args.bind.unwrap_or(config.bind_address);
    let listener = TcpListener::bind(bind_address.as_str()).await?;
    web_server::serve(listener, state).await
}
