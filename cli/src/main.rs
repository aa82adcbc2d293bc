use clap::Parser;
use cli::{run, Args};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("saved_links_cli=info,cli=info,reddit_client=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    run(Args::parse()).await
}
