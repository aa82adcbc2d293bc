pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{build_router, is_name_segment, subreddit_params};
pub use state::AppState;

use saved_links_core::CoreError;
use tokio::net::TcpListener;
use tracing::info;

/// Serves the relay on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), CoreError> {
    let addr = listener.local_addr()?;
    info!("Saved-links relay listening on http://{}", addr);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;
    Ok(())
}
