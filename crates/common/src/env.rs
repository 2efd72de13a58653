//! Environment/runtime helpers
//!
//! Sanity checks on the directories the server expects at startup.

use std::path::Path;

use tracing::{info, warn};

/// Check the single-page shell is present; warn when it is not.
///
/// A missing frontend does not stop the API from serving, so this never fails.
pub async fn ensure_frontend(frontend_dir: &str) -> bool {
    let index = Path::new(frontend_dir).join("index.html");
    match tokio::fs::metadata(&index).await {
        Ok(meta) if meta.is_file() => {
            info!(%frontend_dir, "frontend shell found");
            true
        }
        _ => {
            warn!(%frontend_dir, "frontend index.html not found; fallback route will 404");
            false
        }
    }
}
