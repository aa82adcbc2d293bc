use crate::headers::RequestHeaders;
use crate::listing::{listing_children, project_children};
use reqwest::{Client, Method, Response, StatusCode};
use saved_links_core::{CoreError, ListingItem, RedditApiError, DEFAULT_API_BASE_URL};
use serde_json::Value;
use tracing::{error, info};
use url::Url;

pub const KARMA_ENDPOINT: &str = "api/v1/me/karma";

#[derive(Debug, Clone)]
pub struct RedditApiClient {
    http_client: Client,
    base_url: Url,
}

impl RedditApiClient {
    pub fn new() -> Result<Self, CoreError> {
        Self::with_base_url(DEFAULT_API_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, CoreError> {
        let base_url = Url::parse(base_url).map_err(|e| CoreError::InvalidInput {
            message: format!("invalid API base URL '{}': {}", base_url, e),
        })?;
        let http_client = Client::builder().build()?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/{endpoint}`, tolerating a leading slash on the endpoint.
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url, CoreError> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|e| CoreError::InvalidInput {
            message: format!("invalid endpoint '{}': {}", endpoint, e),
        })
    }

    /// Sends the request and fails with the upstream status on anything but 200.
    pub async fn make_request(
        &self,
        method: Method,
        endpoint: &str,
        headers: &RequestHeaders,
        query_params: Option<&[(&str, &str)]>,
    ) -> Result<Response, CoreError> {
        let url = self.endpoint_url(endpoint)?;

        let mut request_builder = self
            .http_client
            .request(method.clone(), url)
            .headers(headers.to_header_map()?);

        if let Some(params) = query_params.filter(|params| !params.is_empty()) {
            request_builder = request_builder.query(params);
        }

        let response = request_builder.send().await.map_err(|e| {
            error!("Network error for {} {}: {}", method, endpoint, e);
            CoreError::Network(e)
        })?;

        info!("[{}] - {}", method, response.url());

        if response.status() != StatusCode::OK {
            error!(
                "Request failed with status: {} for {}",
                response.status(),
                endpoint
            );
            return Err(CoreError::RedditApi(RedditApiError::UnexpectedStatus {
                status_code: response.status().as_u16(),
                endpoint: endpoint.to_string(),
            }));
        }

        let status = response.status();
        info!(
            "{} {} - {} [{}]",
            method,
            response.url(),
            status.canonical_reason().unwrap_or(""),
            status.as_u16()
        );
        Ok(response)
    }

    /// GET a listing and return the projected, filtered posts.
    pub async fn get_listing(
        &self,
        endpoint: &str,
        headers: &RequestHeaders,
        query_params: Option<&[(&str, &str)]>,
    ) -> Result<Vec<ListingItem>, CoreError> {
        let children = self
            .get_listing_children(endpoint, headers, query_params)
            .await?;
        let payload = project_children(children)?;

        info!("Total Count: {}", payload.len());
        Ok(payload)
    }

    /// GET a listing and return its `data.children` array as received.
    pub async fn get_listing_children(
        &self,
        endpoint: &str,
        headers: &RequestHeaders,
        query_params: Option<&[(&str, &str)]>,
    ) -> Result<Vec<Value>, CoreError> {
        let body = self.get_json(endpoint, headers, query_params).await?;
        listing_children(body)
    }

    pub async fn get_json(
        &self,
        endpoint: &str,
        headers: &RequestHeaders,
        query_params: Option<&[(&str, &str)]>,
    ) -> Result<Value, CoreError> {
        let response = self
            .make_request(Method::GET, endpoint, headers, query_params)
            .await?;
        parse_json(response, endpoint).await
    }

    pub async fn post_json(
        &self,
        endpoint: &str,
        headers: &RequestHeaders,
        query_params: Option<&[(&str, &str)]>,
    ) -> Result<Value, CoreError> {
        let response = self
            .make_request(Method::POST, endpoint, headers, query_params)
            .await?;
        parse_json(response, endpoint).await
    }

    pub async fn get_karma(&self, headers: &RequestHeaders) -> Result<Value, CoreError> {
        self.get_json(KARMA_ENDPOINT, headers, None).await
    }
}

async fn parse_json(response: Response, endpoint: &str) -> Result<Value, CoreError> {
    response.json().await.map_err(|e| {
        error!("Failed to parse response from {}: {}", endpoint, e);
        CoreError::RedditApi(RedditApiError::InvalidResponse {
            details: format!("response from {} is not valid JSON", endpoint),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_client_creation() {
        let client = RedditApiClient::new().unwrap();
        assert_eq!(client.base_url().as_str(), "https://oauth.reddit.com/");
    }

    #[test]
    fn test_endpoint_url_joins_paths() {
        let client = RedditApiClient::new().unwrap();
        assert_eq!(
            client.endpoint_url("r/rust/hot").unwrap().as_str(),
            "https://oauth.reddit.com/r/rust/hot"
        );
        assert_eq!(
            client.endpoint_url("/best").unwrap().as_str(),
            "https://oauth.reddit.com/best"
        );
    }

    #[test]
    fn test_endpoint_url_keeps_base_path() {
        let client = RedditApiClient::with_base_url("http://localhost:9000/proxy/").unwrap();
        assert_eq!(
            client.endpoint_url("user/me/saved").unwrap().as_str(),
            "http://localhost:9000/proxy/user/me/saved"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            RedditApiClient::with_base_url("not a url"),
            Err(CoreError::InvalidInput { .. })
        ));
    }
}
