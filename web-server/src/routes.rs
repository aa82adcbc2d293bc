use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use saved_links_core::ListingItem;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

pub const DEFAULT_SORT: &str = "hot";

const SAVED_PARAMS: &[(&str, &str)] = &[("limit", "10")];
const LISTING_PARAMS: &[(&str, &str)] = &[("count", "0"), ("limit", "10"), ("show", "all")];

#[derive(Debug, Serialize)]
struct HealthResponse {
    health: &'static str,
}

/// Query parameters for `r/{subreddit}/{sort}`; `top` is limited to the
/// past week.
pub fn subreddit_params(sort: &str) -> Vec<(&'static str, &'static str)> {
    let mut params = LISTING_PARAMS.to_vec();
    if sort == "top" {
        params.push(("t", "week"));
    }
    params
}

/// Subreddit and sort names are single `[A-Za-z0-9_]` segments.
pub fn is_name_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { health: "OK" })
}

async fn saved_links(State(state): State<AppState>) -> Result<Json<Vec<ListingItem>>, ApiError> {
    let items = state
        .client
        .get_listing(&state.saved_endpoint(), &state.headers, Some(SAVED_PARAMS))
        .await?;
    Ok(Json(items))
}

async fn all_links(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    let children = state
        .client
        .get_listing_children(&state.saved_endpoint(), &state.headers, Some(SAVED_PARAMS))
        .await?;

    for child in &children {
        json_table::print_json(child);
    }
    info!("Total Count: {}", children.len());

    Ok(Json(children))
}

async fn best_posts(State(state): State<AppState>) -> Result<Json<Vec<ListingItem>>, ApiError> {
    let items = state
        .client
        .get_listing("best", &state.headers, Some(LISTING_PARAMS))
        .await?;
    Ok(Json(items))
}

async fn subreddit_default(
    State(state): State<AppState>,
    Path(subreddit): Path<String>,
) -> Result<Json<Vec<ListingItem>>, ApiError> {
    fetch_subreddit(&state, &subreddit, DEFAULT_SORT).await
}

async fn subreddit_sorted(
    State(state): State<AppState>,
    Path((subreddit, sort)): Path<(String, String)>,
) -> Result<Json<Vec<ListingItem>>, ApiError> {
    fetch_subreddit(&state, &subreddit, &sort).await
}

async fn fetch_subreddit(
    state: &AppState,
    subreddit: &str,
    sort: &str,
) -> Result<Json<Vec<ListingItem>>, ApiError> {
    for segment in [subreddit, sort] {
        if !is_name_segment(segment) {
            return Err(ApiError::InvalidPath {
                segment: segment.to_string(),
            });
        }
    }

    let endpoint = format!("r/{}/{}", subreddit, sort);
    let params = subreddit_params(sort);
    let items = state
        .client
        .get_listing(&endpoint, &state.headers, Some(params.as_slice()))
        .await?;
    Ok(Json(items))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(saved_links))
        .route("/health_check", get(health_check))
        .route("/saved", get(saved_links))
        .route("/all_links", get(all_links))
        .route("/best", get(best_posts))
        .route("/r/:subreddit", get(subreddit_default))
        .route("/r/:subreddit/", get(subreddit_default))
        .route("/r/:subreddit/:sort", get(subreddit_sorted))
        .route("/:subreddit", get(subreddit_default))
        .route("/:subreddit/", get(subreddit_default))
        .route("/:subreddit/:sort", get(subreddit_sorted))
        .with_state(state)
}
