use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use super::ActionApi;
use crate::config::Config;
use crate::error::AppError;
use crate::models::{ActionApiResponse, ActionDraft, ApiResponse, ExecuteActionRequest, RestAction};
use crate::utils::text::trim_trailing_slash;

pub struct HttpActionApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpActionApi {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: trim_trailing_slash(&config.api_base_url),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl ActionApi for HttpActionApi {
    async fn create_action(&self, draft: &ActionDraft) -> Result<ApiResponse<RestAction>, AppError> {
        let response = self
            .client
            .post(self.url("/api/v1/actions"))
            .json(draft)
            .send()
            .await?;
        Ok(response.json().await?)
    }

    async fn update_action(
        &self,
        action: &RestAction,
    ) -> Result<ApiResponse<RestAction>, AppError> {
        let response = self
            .client
            .put(self.url(&format!("/api/v1/actions/{}", action.id)))
            .json(action)
            .send()
            .await?;
        Ok(response.json().await?)
    }

    async fn delete_action(&self, id: Uuid) -> Result<ApiResponse<RestAction>, AppError> {
        let response = self
            .client
            .delete(self.url(&format!("/api/v1/actions/{id}")))
            .send()
            .await?;
        Ok(response.json().await?)
    }

    async fn fetch_actions(&self) -> Result<ApiResponse<Vec<RestAction>>, AppError> {
        let response = self.client.get(self.url("/api/v1/actions")).send().await?;
        Ok(response.json().await?)
    }

    async fn execute(
        &self,
        request: &ExecuteActionRequest,
    ) -> Result<ActionApiResponse, AppError> {
        let response = self
            .client
            .post(self.url("/api/v1/actions/execute"))
            .json(request)
            .send()
            .await?;
        Ok(response.json().await?)
    }
}
