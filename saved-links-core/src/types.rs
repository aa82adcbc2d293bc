use serde::{Deserialize, Serialize};

/// Message carried by every envelope produced for a failed upstream call.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data";

/// A post as returned to callers of the relay: a fixed projection of the
/// upstream post object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingItem {
    pub author: String,
    pub author_fullname: String,
    pub created: f64,
    pub created_utc: f64,
    pub id: String,
    pub media: serde_json::Value,
    pub name: String,
    pub num_comments: u64,
    pub permalink: String,
    pub score: i64,
    pub subreddit: String,
    pub subreddit_id: String,
    pub subreddit_name_prefixed: String,
    pub thumbnail: String,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    pub status_code: u16,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.into(),
            status_code,
        }
    }

    pub fn fetch_failed(status_code: u16) -> Self {
        Self::new(FETCH_FAILED_MESSAGE, status_code)
    }
}
