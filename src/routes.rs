use uuid::Uuid;

/// Base path of the API editor surface.
pub const API_EDITOR_URL: &str = "/editor/api";

pub fn api_editor_url() -> String {
    API_EDITOR_URL.to_string()
}

pub fn api_editor_id_url(id: Uuid) -> String {
    format!("{API_EDITOR_URL}/{id}")
}

/// Client-side navigation seam. `push` mirrors a browser history push.
pub trait History: Send + Sync {
    fn push(&self, path: &str);
}

pub struct TracingHistory;

impl History for TracingHistory {
    fn push(&self, path: &str) {
        tracing::info!(%path, "navigating");
    }
}
