use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::Json;
use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use chrono::Utc;
use serde_json::{Value, json};
use uuid::Uuid;

use actionflow::api::http::HttpActionApi;
use actionflow::config::Config;
use actionflow::models::{ActionDraft, ActionPayload, ActionType, RestAction};
use actionflow::notify::{Toast, Toaster};
use actionflow::routes::History;

/// Server-side state of the mock Action API. Tests script failure modes and
/// inspect the recorded traffic through this handle.
#[derive(Default)]
pub struct MockApi {
    pub actions: Mutex<Vec<RestAction>>,
    /// Scripted `executeAction` envelopes keyed by action id; anything not
    /// scripted gets a success envelope echoing the request params.
    pub execute_responses: Mutex<HashMap<Uuid, Value>>,
    /// Raw `ExecuteActionRequest` bodies in arrival order.
    pub execute_requests: Mutex<Vec<Value>>,
    pub fail_create: AtomicBool,
    pub fail_update: AtomicBool,
    pub fail_delete: AtomicBool,
    pub fail_fetch: AtomicBool,
}

impl MockApi {
    /// Recorded execute requests for one action id.
    pub fn requests_for(&self, id: Uuid) -> Vec<Value> {
        self.execute_requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r["actionId"].as_str() == Some(id.to_string().as_str()))
            .cloned()
            .collect()
    }

    pub fn execute_count(&self) -> usize {
        self.execute_requests.lock().unwrap().len()
    }

    pub fn script_error(&self, id: Uuid, code: u16, message: &str) {
        self.execute_responses.lock().unwrap().insert(
            id,
            json!({
                "responseMeta": {
                    "success": false,
                    "error": { "code": code, "message": message },
                    "status": code,
                },
                "body": { "error": message },
                "statusCode": code,
            }),
        );
    }
}

fn failure_envelope(message: &str) -> Json<Value> {
    Json(json!({
        "responseMeta": {
            "success": false,
            "error": { "code": 500, "message": message },
            "status": 500,
        }
    }))
}

async fn fetch_actions(State(mock): State<Arc<MockApi>>) -> Json<Value> {
    if mock.fail_fetch.load(Ordering::SeqCst) {
        return failure_envelope("fetch failed");
    }
    let actions = mock.actions.lock().unwrap().clone();
    Json(json!({
        "responseMeta": { "success": true },
        "data": actions,
    }))
}

async fn create_action(
    State(mock): State<Arc<MockApi>>,
    Json(draft): Json<ActionDraft>,
) -> Json<Value> {
    if mock.fail_create.load(Ordering::SeqCst) {
        return failure_envelope("create failed");
    }
    let action = RestAction {
        id: Uuid::now_v7(),
        name: draft.name,
        action_type: draft.action_type,
        json_path_keys: draft.json_path_keys,
        config: draft.config,
        page_id: draft.page_id,
        created_at: Utc::now(),
    };
    mock.actions.lock().unwrap().push(action.clone());
    Json(json!({
        "responseMeta": { "success": true },
        "data": action,
    }))
}

async fn update_action(
    State(mock): State<Arc<MockApi>>,
    Path(id): Path<Uuid>,
    Json(action): Json<RestAction>,
) -> Json<Value> {
    if mock.fail_update.load(Ordering::SeqCst) {
        return failure_envelope("update failed");
    }
    let mut actions = mock.actions.lock().unwrap();
    match actions.iter_mut().find(|a| a.id == id) {
        Some(slot) => {
            *slot = action.clone();
            Json(json!({
                "responseMeta": { "success": true },
                "data": action,
            }))
        }
        None => failure_envelope("no such action"),
    }
}

async fn delete_action(State(mock): State<Arc<MockApi>>, Path(id): Path<Uuid>) -> Json<Value> {
    if mock.fail_delete.load(Ordering::SeqCst) {
        return failure_envelope("delete failed");
    }
    let mut actions = mock.actions.lock().unwrap();
    match actions.iter().position(|a| a.id == id) {
        Some(idx) => {
            let removed = actions.remove(idx);
            Json(json!({
                "responseMeta": { "success": true },
                "data": removed,
            }))
        }
        None => failure_envelope("no such action"),
    }
}

async fn execute_action(State(mock): State<Arc<MockApi>>, Json(request): Json<Value>) -> Json<Value> {
    mock.execute_requests.lock().unwrap().push(request.clone());

    let scripted = request["actionId"]
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .and_then(|id| mock.execute_responses.lock().unwrap().get(&id).cloned());
    if let Some(response) = scripted {
        return Json(response);
    }

    Json(json!({
        "responseMeta": { "success": true },
        "body": { "echo": request["params"] },
        "statusCode": 200,
    }))
}

fn mock_router(mock: Arc<MockApi>) -> axum::Router {
    axum::Router::new()
        .route("/api/v1/actions", get(fetch_actions).post(create_action))
        .route(
            "/api/v1/actions/{id}",
            put(update_action).delete(delete_action),
        )
        .route("/api/v1/actions/execute", post(execute_action))
        .with_state(mock)
}

#[derive(Default)]
pub struct RecordingToaster {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingToaster {
    pub fn shown(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap().clone()
    }
}

impl Toaster for RecordingToaster {
    fn show(&self, toast: Toast) {
        self.toasts.lock().unwrap().push(toast);
    }
}

#[derive(Default)]
pub struct RecordingHistory {
    paths: Mutex<Vec<String>>,
}

impl RecordingHistory {
    pub fn pushed(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

impl History for RecordingHistory {
    fn push(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}

/// An engine wired to a freshly spawned mock Action API, with recording
/// toast/navigation surfaces.
pub struct TestEngine {
    pub engine: actionflow::Engine,
    pub mock: Arc<MockApi>,
    pub toasts: Arc<RecordingToaster>,
    pub history: Arc<RecordingHistory>,
}

impl TestEngine {
    /// Register an action on the mock server and refresh the engine's cache.
    pub async fn seed_action(&self, name: &str, json_path_keys: &[&str]) -> RestAction {
        let action = RestAction {
            id: Uuid::now_v7(),
            name: name.to_string(),
            action_type: ActionType::Api,
            json_path_keys: json_path_keys.iter().map(|k| k.to_string()).collect(),
            config: json!({}),
            page_id: None,
            created_at: Utc::now(),
        };
        self.mock.actions.lock().unwrap().push(action.clone());
        self.engine
            .dispatcher
            .fetch_actions()
            .await
            .expect("fetch after seed failed");
        action
    }

    pub fn payload(&self, id: Uuid) -> ActionPayload {
        ActionPayload {
            action_id: id,
            action_type: ActionType::Api,
            on_success: None,
            on_error: None,
        }
    }

    pub fn danger_toasts(&self) -> Vec<Toast> {
        self.toasts
            .shown()
            .into_iter()
            .filter(|t| t.intent == actionflow::notify::Intent::Danger)
            .collect()
    }
}

pub async fn spawn_engine() -> TestEngine {
    spawn_engine_with_depth(8).await
}

pub async fn spawn_engine_with_depth(max_dispatch_depth: u32) -> TestEngine {
    let mock = Arc::new(MockApi::default());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind mock server");
    let addr = listener.local_addr().unwrap();
    let router = mock_router(mock.clone());
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    // Trailing slash on purpose; the client normalizes it away.
    let config = Config {
        api_base_url: format!("http://{addr}/"),
        request_timeout_secs: 5,
        max_dispatch_depth,
        log_level: "info".to_string(),
    };

    let toasts = Arc::new(RecordingToaster::default());
    let history = Arc::new(RecordingHistory::default());
    let api = Arc::new(HttpActionApi::new(&config).expect("failed to build client"));
    let engine = actionflow::build_engine_with(&config, api, toasts.clone(), history.clone());

    TestEngine {
        engine,
        mock,
        toasts,
        history,
    }
}
