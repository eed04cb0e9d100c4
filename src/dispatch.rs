use std::sync::Arc;

use chrono::Utc;
use futures_util::FutureExt;
use futures_util::future::{BoxFuture, join_all};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::api::ActionApi;
use crate::bindings;
use crate::error::AppError;
use crate::models::{
    ActionApiResponse, ActionDraft, ActionPayload, ExecuteActionRequest, ExecutionResult, Property,
    RestAction,
};
use crate::notify::{Toast, Toaster};
use crate::routes::{self, History};
use crate::store::{Store, StoreEvent};
use crate::utils::naming;

/// Runs action payloads against the Action API and turns the outcomes into
/// store events, toasts, and navigation.
pub struct Dispatcher {
    api: Arc<dyn ActionApi>,
    store: Store,
    toaster: Arc<dyn Toaster>,
    history: Arc<dyn History>,
    max_depth: u32,
}

impl Dispatcher {
    pub fn new(
        api: Arc<dyn ActionApi>,
        store: Store,
        toaster: Arc<dyn Toaster>,
        history: Arc<dyn History>,
        max_depth: u32,
    ) -> Self {
        Self {
            api,
            store,
            toaster,
            history,
            max_depth,
        }
    }

    /// Execute a batch of payloads concurrently. Sibling payloads have no
    /// ordering guarantees and fail independently; each entry in the returned
    /// vec corresponds to the payload at the same index. An empty batch
    /// returns without touching any state.
    pub async fn execute_payloads(
        &self,
        payloads: &[ActionPayload],
    ) -> Vec<Result<ActionApiResponse, AppError>> {
        if payloads.is_empty() {
            return Vec::new();
        }
        let results = self.execute_at_depth(payloads, 0).await;
        self.store.barrier().await;
        results
    }

    /// Fan out one level of payloads. Follow-up chains re-enter here with an
    /// incremented depth, so a self-referencing chain terminates at the cap
    /// instead of recursing without bound.
    fn execute_at_depth<'a>(
        &'a self,
        payloads: &'a [ActionPayload],
        depth: u32,
    ) -> BoxFuture<'a, Vec<Result<ActionApiResponse, AppError>>> {
        async move {
            join_all(
                payloads
                    .iter()
                    .map(|payload| self.execute_one(payload, depth)),
            )
            .await
        }
        .boxed()
    }

    async fn execute_one(
        &self,
        payload: &ActionPayload,
        depth: u32,
    ) -> Result<ActionApiResponse, AppError> {
        if depth >= self.max_depth {
            let err = AppError::DepthExceeded {
                action_id: payload.action_id,
                depth,
            };
            tracing::warn!(
                action_id = %payload.action_id,
                depth,
                "follow-up chain hit the dispatch depth cap"
            );
            self.record_dispatch_failure(payload.action_id, &err);
            return Err(err);
        }

        let Some(action) = self.store.action(payload.action_id).await else {
            let err = AppError::ActionNotFound(payload.action_id);
            self.record_dispatch_failure(payload.action_id, &err);
            return Err(err);
        };

        let request = self.build_request(&action).await;
        let response = self.api.execute(&request).await?;

        if let Some(error) = &response.response_meta.error {
            if let Some(on_error) = &payload.on_error {
                self.execute_at_depth(on_error, depth + 1).await;
            }
            self.store.dispatch(StoreEvent::ExecuteError {
                action_id: payload.action_id,
                error: json!({
                    "code": error.code,
                    "message": error.message,
                    "body": response.body,
                    "statusCode": response.status_code,
                }),
            });
            self.toaster
                .show(Toast::danger(format!("{} failed to execute", action.name)));
        } else {
            if let Some(on_success) = &payload.on_success {
                self.execute_at_depth(on_success, depth + 1).await;
            }
            self.store.dispatch(StoreEvent::ExecuteSuccess {
                action_id: payload.action_id,
                result: ExecutionResult {
                    body: response.body.clone(),
                    status_code: response.status_code,
                    executed_at: Utc::now(),
                },
            });
        }

        Ok(response)
    }

    fn record_dispatch_failure(&self, action_id: Uuid, err: &AppError) {
        self.store.dispatch(StoreEvent::ExecuteError {
            action_id,
            error: json!({ "message": err.to_string() }),
        });
        self.toaster.show(Toast::danger(err.to_string()));
    }

    /// Resolve the action's binding keys concurrently and assemble the
    /// request. Each key gets its own tree snapshot, and the param list is
    /// reassembled in declared-key order no matter which resolution finishes
    /// first.
    async fn build_request(&self, action: &RestAction) -> ExecuteActionRequest {
        if action.json_path_keys.is_empty() {
            return ExecuteActionRequest {
                action_id: action.id,
                params: None,
            };
        }

        let values = join_all(
            action
                .json_path_keys
                .iter()
                .map(|key| self.evaluate_binding(key)),
        )
        .await;

        let params = action
            .json_path_keys
            .iter()
            .cloned()
            .zip(values)
            .map(|(key, value)| Property { key, value })
            .collect();

        ExecuteActionRequest {
            action_id: action.id,
            params: Some(params),
        }
    }

    async fn evaluate_binding(&self, key: &str) -> Value {
        let tree = self.store.data_tree().await;
        match bindings::resolve_path(&tree, key) {
            Some(value) => value,
            None => {
                tracing::debug!(%key, "binding path did not resolve");
                Value::Null
            }
        }
    }

    /// Create an action on the server. On success: confirmation toast, cache
    /// update, binding rebuild, and navigation to the new action's editor.
    /// On failure the cache is left untouched.
    pub async fn create_action(&self, draft: ActionDraft) -> Result<Option<RestAction>, AppError> {
        self.check_name(&draft.name, None).await?;

        let response = self.api.create_action(&draft).await?;
        if response.response_meta.success {
            if let Some(action) = response.data {
                self.toaster
                    .show(Toast::success(format!("{} Action created", action.name)));
                self.store.dispatch(StoreEvent::ActionCreated(action.clone()));
                self.store.dispatch(StoreEvent::RebuildBindings);
                self.store.barrier().await;
                self.history.push(&routes::api_editor_id_url(action.id));
                return Ok(Some(action));
            }
        }
        self.toaster
            .show(Toast::danger("Error occurred when creating action"));
        Ok(None)
    }

    pub async fn update_action(&self, action: RestAction) -> Result<Option<RestAction>, AppError> {
        self.check_name(&action.name, Some(action.id)).await?;

        let response = self.api.update_action(&action).await?;
        if response.response_meta.success {
            if let Some(updated) = response.data {
                self.toaster
                    .show(Toast::success(format!("{} Action updated", updated.name)));
                self.store
                    .dispatch(StoreEvent::ActionUpdated(updated.clone()));
                self.store.dispatch(StoreEvent::RebuildBindings);
                self.store.barrier().await;
                return Ok(Some(updated));
            }
        }
        self.toaster
            .show(Toast::danger("Error occurred when updating action"));
        Ok(None)
    }

    pub async fn delete_action(&self, id: Uuid) -> Result<bool, AppError> {
        let cached = self.store.action(id).await;

        let response = self.api.delete_action(id).await?;
        if response.response_meta.success {
            let name = response
                .data
                .map(|a| a.name)
                .or(cached.map(|a| a.name))
                .unwrap_or_else(|| id.to_string());
            self.toaster
                .show(Toast::success(format!("{name} Action deleted")));
            self.store.dispatch(StoreEvent::ActionDeleted { id });
            self.store.dispatch(StoreEvent::RebuildBindings);
            self.store.barrier().await;
            self.history.push(&routes::api_editor_url());
            return Ok(true);
        }
        self.toaster
            .show(Toast::danger("Error occurred when deleting action"));
        Ok(false)
    }

    /// Refresh the action cache from the server. Failures are recorded in the
    /// store (keyed by HTTP status) without a toast.
    pub async fn fetch_actions(&self) -> Result<Vec<RestAction>, AppError> {
        let response = self.api.fetch_actions().await?;
        if response.response_meta.success {
            let actions = response.data.unwrap_or_default();
            self.store
                .dispatch(StoreEvent::ActionsFetched(actions.clone()));
            self.store.barrier().await;
            Ok(actions)
        } else {
            self.store.dispatch(StoreEvent::FetchActionsError {
                status: response.response_meta.status,
            });
            self.store.barrier().await;
            Ok(Vec::new())
        }
    }

    /// Names may not shadow reserved words or live entities. For updates the
    /// action's current name is excluded from the collision set.
    async fn check_name(&self, name: &str, own_id: Option<Uuid>) -> Result<(), AppError> {
        let mut in_use = self
            .store
            .select(|s| s.data_tree.clone())
            .await;
        if let Some(id) = own_id {
            if let Some(current) = self.store.action(id).await {
                in_use.remove(&current.name);
            }
        }
        if !naming::is_name_valid(name, &in_use) {
            let err = AppError::InvalidName(name.to_string());
            self.toaster.show(Toast::danger(err.to_string()));
            return Err(err);
        }
        Ok(())
    }
}
