//! Password-grant token acquisition.
//!
//! The password itself comes from a [`SecretProvider`] so the HTTP exchange
//! can run without a terminal.

use crate::headers::RequestHeaders;
use oauth2::{AccessToken, ResourceOwnerPassword};
use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode};
use saved_links_core::{Credentials, CoreError, RedditApiError};
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info};
use url::Url;

pub trait SecretProvider {
    fn password(&self) -> Result<ResourceOwnerPassword, CoreError>;
}

/// Hands out a password known up front.
pub struct StaticPassword(String);

impl StaticPassword {
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }
}

impl SecretProvider for StaticPassword {
    fn password(&self) -> Result<ResourceOwnerPassword, CoreError> {
        Ok(ResourceOwnerPassword::new(self.0.clone()))
    }
}

/// Body of a successful `api/v1/access_token` call.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: AccessToken,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TokenAcquirer {
    http_client: Client,
    token_url: Url,
}

impl TokenAcquirer {
    pub fn with_token_url(token_url: &str) -> Result<Self, CoreError> {
        let token_url = Url::parse(token_url).map_err(|e| CoreError::InvalidInput {
            message: format!("invalid token URL '{}': {}", token_url, e),
        })?;
        let http_client = Client::builder().build()?;

        Ok(Self {
            http_client,
            token_url,
        })
    }

    /// POSTs the password grant with the client credentials as Basic auth.
    /// Only the User-Agent of `headers` is sent.
    pub async fn request_token(
        &self,
        credentials: &Credentials,
        headers: &RequestHeaders,
        password: &ResourceOwnerPassword,
    ) -> Result<TokenResponse, CoreError> {
        let form = [
            ("grant_type", "password"),
            ("username", credentials.username.as_str()),
            ("password", password.secret().as_str()),
        ];

        let response = self
            .http_client
            .post(self.token_url.clone())
            .header(USER_AGENT, headers.user_agent())
            .basic_auth(
                credentials.client_id.as_str(),
                Some(credentials.client_secret.secret()),
            )
            .form(&form)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(CoreError::RedditApi(RedditApiError::UnexpectedStatus {
                status_code: response.status().as_u16(),
                endpoint: self.token_url.path().trim_start_matches('/').to_string(),
            }));
        }

        let body: Value = response.json().await.map_err(|_| {
            CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: "token response is not valid JSON".to_string(),
            })
        })?;

        // Reddit answers bad credentials with 200 and an `error` field.
        if let Some(reason) = body.get("error") {
            let reason = reason
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| reason.to_string());
            return Err(CoreError::RedditApi(RedditApiError::AuthenticationFailed {
                reason,
            }));
        }

        serde_json::from_value(body).map_err(|e| {
            CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: format!("token response: {}", e),
            })
        })
    }

    /// Requests a new token and swaps it into `headers`. On any failure the
    /// error is logged and returned, and `headers` keeps its previous token.
    pub async fn refresh_headers(
        &self,
        credentials: &Credentials,
        headers: &mut RequestHeaders,
        secrets: &dyn SecretProvider,
    ) -> Result<(), CoreError> {
        let password = secrets.password()?;

        info!("Fetching new access token...");
        match self.request_token(credentials, headers, &password).await {
            Ok(token) => {
                info!(
                    "Received access token (type {}, expires in {}s)",
                    token.token_type.as_deref().unwrap_or("unknown"),
                    token.expires_in.unwrap_or_default()
                );
                *headers = headers.with_token(token.access_token.secret());
                Ok(())
            }
            Err(e) => {
                match e.upstream_status() {
                    Some(status) => error!("Error fetching access token: {}", status),
                    None => error!("Error fetching access token: {}", e),
                }
                Err(e)
            }
        }
    }
}
