pub mod http;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{ActionApiResponse, ActionDraft, ApiResponse, ExecuteActionRequest, RestAction};

/// Client seam for the external Action API. Every call returns the server's
/// `{ responseMeta, data }` envelope; transport failures surface as
/// `AppError::Transport`.
#[async_trait]
pub trait ActionApi: Send + Sync {
    async fn create_action(&self, draft: &ActionDraft) -> Result<ApiResponse<RestAction>, AppError>;

    async fn update_action(&self, action: &RestAction) -> Result<ApiResponse<RestAction>, AppError>;

    async fn delete_action(&self, id: Uuid) -> Result<ApiResponse<RestAction>, AppError>;

    async fn fetch_actions(&self) -> Result<ApiResponse<Vec<RestAction>>, AppError>;

    async fn execute(&self, request: &ExecuteActionRequest) -> Result<ActionApiResponse, AppError>;
}
