//! Parsing of Reddit listing payloads and projection of posts into
//! [`ListingItem`]s.

use saved_links_core::{CoreError, ListingItem, RedditApiError};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Thumbnail value Reddit uses for adult posts.
pub const NSFW_THUMBNAIL: &str = "nsfw";

#[derive(Debug, Clone, Deserialize)]
pub struct RedditListing<T> {
    #[serde(default)]
    pub kind: Option<String>,
    pub data: RedditListingData<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedditListingData<T> {
    pub children: Vec<T>,
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub before: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedditListingChild<T> {
    #[serde(default)]
    pub kind: Option<String>,
    pub data: T,
}

/// The two fields the display filter looks at.
#[derive(Debug, Clone, Deserialize)]
struct ContentFlags {
    over_18: bool,
    thumbnail: String,
}

/// Kept when the post is not marked adult OR its thumbnail is not the nsfw
/// placeholder. Only adult posts with the nsfw thumbnail are dropped.
pub fn is_displayable(over_18: bool, thumbnail: &str) -> bool {
    !over_18 || thumbnail != NSFW_THUMBNAIL
}

/// Extracts `data.children` from a listing body, untouched.
pub fn listing_children(body: Value) -> Result<Vec<Value>, CoreError> {
    let listing: RedditListing<Value> = decode(body, "listing")?;
    Ok(listing.data.children)
}

/// Filters listing children and projects the survivors into [`ListingItem`]s.
///
/// Only `over_18` and `thumbnail` are read from children that get filtered
/// out; every projected field must be present on the children that are kept.
pub fn project_children(children: Vec<Value>) -> Result<Vec<ListingItem>, CoreError> {
    let mut payload = Vec::with_capacity(children.len());

    for child in children {
        let child: RedditListingChild<Value> = decode(child, "listing child")?;
        debug!("{}", child.data);

        let flags: ContentFlags = decode(child.data.clone(), "post")?;
        if is_displayable(flags.over_18, &flags.thumbnail) {
            payload.push(decode(child.data, "post")?);
        }
    }

    Ok(payload)
}

fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Result<T, CoreError> {
    serde_json::from_value(value).map_err(|e| {
        CoreError::RedditApi(RedditApiError::InvalidResponse {
            details: format!("{}: {}", what, e),
        })
    })
}
