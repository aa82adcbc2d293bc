use reddit_client::{RedditApiClient, RequestHeaders};
use std::sync::Arc;

/// Everything a handler needs, built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct AppState {
    pub client: Arc<RedditApiClient>,
    pub headers: Arc<RequestHeaders>,
    pub username: Arc<str>,
}

impl AppState {
    pub fn new(client: RedditApiClient, headers: RequestHeaders, username: &str) -> Self {
        Self {
            client: Arc::new(client),
            headers: Arc::new(headers),
            username: Arc::from(username),
        }
    }

    pub fn saved_endpoint(&self) -> String {
        format!("user/{}/saved", self.username)
    }
}
