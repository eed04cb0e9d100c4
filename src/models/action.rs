use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionType {
    Api,
    Query,
}

/// A request to run one action, with optional follow-up chains. Built per
/// dispatch and discarded after completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPayload {
    pub action_id: Uuid,
    pub action_type: ActionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_success: Option<Vec<ActionPayload>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_error: Option<Vec<ActionPayload>>,
}

/// A persisted action definition as the Action API returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestAction {
    pub id: Uuid,
    pub name: String,
    pub action_type: ActionType,
    /// Binding paths resolved against the data tree at execution time,
    /// in declared order.
    #[serde(default)]
    pub json_path_keys: Vec<String>,
    #[serde(default)]
    pub config: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Client-side shape for creating an action; the server assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDraft {
    pub name: String,
    pub action_type: ActionType,
    #[serde(default)]
    pub json_path_keys: Vec<String>,
    #[serde(default)]
    pub config: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
}

/// One resolved dynamic binding, keyed by its declared path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub key: String,
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteActionRequest {
    pub action_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<Property>>,
}
