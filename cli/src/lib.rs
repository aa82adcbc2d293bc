//! Terminal front end: optionally refresh the bearer token, query one
//! endpoint, and print the result as a table.

use anyhow::Context;
use clap::Parser;
use dialoguer::Password;
use oauth2::ResourceOwnerPassword;
use reddit_client::{RedditApiClient, RequestHeaders, SecretProvider, TokenAcquirer};
use saved_links_core::{CoreError, Credentials, ErrorExt, RelayConfig};
use serde_json::Value;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "saved-links-cli", version, about = "Query the Reddit API from the terminal")]
pub struct Args {
    /// Request a new access token (prompts for the account password)
    #[arg(short = 't', long)]
    pub access_token: bool,

    /// Endpoint to query, e.g. `api/v1/me` or `r/rust/top`
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Send the endpoint query as a POST
    #[arg(long, requires = "endpoint")]
    pub post: bool,

    /// Treat the endpoint as a listing and print the reshaped posts
    #[arg(long, requires = "endpoint", conflicts_with = "post")]
    pub listing: bool,

    /// Without an endpoint, show the latest saved item instead of karma
    #[arg(long, conflicts_with = "endpoint")]
    pub saved: bool,

    /// Relay settings (TOML)
    #[arg(long, env = "SAVED_LINKS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Reddit app credentials (JSON)
    #[arg(long)]
    pub secrets: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Karma,
    Saved,
    Get(String),
    Post(String),
    Listing(String),
}

impl Args {
    pub fn query(&self) -> Query {
        match &self.endpoint {
            Some(endpoint) if self.post => Query::Post(endpoint.clone()),
            Some(endpoint) if self.listing => Query::Listing(endpoint.clone()),
            Some(endpoint) => Query::Get(endpoint.clone()),
            None if self.saved => Query::Saved,
            None => Query::Karma,
        }
    }
}

/// Reads the account password from the terminal without echoing it.
pub struct PromptPassword;

impl SecretProvider for PromptPassword {
    fn password(&self) -> Result<ResourceOwnerPassword, CoreError> {
        let password: String = Password::new().with_prompt("Enter password").interact()?;
        Ok(ResourceOwnerPassword::new(password))
    }
}

/// Runs `query` and returns the documents to print, one table each.
pub async fn fetch(
    client: &RedditApiClient,
    headers: &RequestHeaders,
    query: &Query,
    username: &str,
) -> Result<Vec<Value>, CoreError> {
    let documents = match query {
        Query::Karma => vec![client.get_karma(headers).await?],
        Query::Saved => {
            let endpoint = format!("user/{}/saved", username);
            vec![
                client
                    .get_json(&endpoint, headers, Some(&[("limit", "1")][..]))
                    .await?,
            ]
        }
        Query::Get(endpoint) => vec![client.get_json(endpoint, headers, None).await?],
        Query::Post(endpoint) => vec![client.post_json(endpoint, headers, None).await?],
        Query::Listing(endpoint) => client
            .get_listing(endpoint, headers, None)
            .await?
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?,
    };
    Ok(documents)
}

pub async fn run(args: Args) -> anyhow::Result<()> {
    let config = RelayConfig::load_or_default(args.config.as_deref())
        .context("failed to load relay config")?;
    let secrets_path = args
        .secrets
        .clone()
        .unwrap_or_else(|| config.secrets_path.clone());
    let credentials = Credentials::load(&secrets_path)
        .with_context(|| format!("failed to load credentials from {}", secrets_path.display()))?;

    let mut headers = RequestHeaders::new(
        config.user_agent_for(&credentials.username),
        credentials.stored_token(),
    );

    if args.access_token {
        let acquirer = TokenAcquirer::with_token_url(&config.token_url)?;
        if let Err(e) = acquirer
            .refresh_headers(&credentials, &mut headers, &PromptPassword)
            .await
        {
            e.log_warn();
            warn!(
                "{} Continuing with the stored token.",
                e.user_friendly_message()
            );
        }
    }

    let client = RedditApiClient::with_base_url(&config.api_base_url)?;
    let query = args.query();
    info!("Running {:?}", query);

    let documents = fetch(&client, &headers, &query, &credentials.username)
        .await
        .with_context(|| format!("{:?} query failed", query))?;

    for document in &documents {
        json_table::print_json(document);
    }
    Ok(())
}
