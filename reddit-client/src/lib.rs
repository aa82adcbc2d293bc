pub mod api;
pub mod auth;
pub mod headers;
pub mod listing;


pub use api::{RedditApiClient, KARMA_ENDPOINT};
pub use auth::{SecretProvider, StaticPassword, TokenAcquirer, TokenResponse};
pub use headers::RequestHeaders;
pub use listing::{is_displayable, listing_children, project_children};
