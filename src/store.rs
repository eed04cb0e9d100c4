use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use dashmap::DashMap;
use serde_json::{Value, json};
use tokio::sync::{RwLock, mpsc, oneshot};
use uuid::Uuid;

use crate::models::{ExecutionResult, RestAction};

/// Typed state-mutation events. Only the store's owner task applies them,
/// strictly in arrival order.
#[derive(Debug)]
pub enum StoreEvent {
    ActionsFetched(Vec<RestAction>),
    FetchActionsError { status: Option<u16> },
    ActionCreated(RestAction),
    ActionUpdated(RestAction),
    ActionDeleted { id: Uuid },
    ExecuteSuccess { action_id: Uuid, result: ExecutionResult },
    ExecuteError { action_id: Uuid, error: Value },
    /// Seed or replace a named entity (widget, global) in the data tree.
    SetEntity { name: String, value: Value },
    /// Recompute the action-owned entries of the data tree.
    RebuildBindings,
    /// Acknowledged once every earlier event has been applied.
    Barrier(oneshot::Sender<()>),
}

#[derive(Debug, Clone, Copy)]
pub struct FetchFailure {
    pub status: Option<u16>,
}

#[derive(Debug, Default)]
pub struct StoreState {
    pub actions: HashMap<Uuid, RestAction>,
    pub data_tree: serde_json::Map<String, Value>,
    pub fetch_error: Option<FetchFailure>,
    /// Data-tree keys owned by actions, so rebuilds can prune stale entries
    /// without touching host-seeded entities.
    bound_action_names: HashSet<String>,
}

/// Handle to the global state store. Cheap to clone; all clones feed the same
/// owner task. Dropping every handle stops the task.
#[derive(Clone)]
pub struct Store {
    tx: mpsc::UnboundedSender<StoreEvent>,
    state: Arc<RwLock<StoreState>>,
    results: Arc<DashMap<Uuid, ExecutionResult>>,
    errors: Arc<DashMap<Uuid, Value>>,
}

impl Store {
    /// Spawn the owner task. Must be called from within a Tokio runtime.
    pub fn spawn() -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let state = Arc::new(RwLock::new(StoreState::default()));
        let results: Arc<DashMap<Uuid, ExecutionResult>> = Arc::new(DashMap::new());
        let errors: Arc<DashMap<Uuid, Value>> = Arc::new(DashMap::new());

        {
            let state = state.clone();
            let results = results.clone();
            let errors = errors.clone();
            tokio::spawn(async move {
                while let Some(event) = rx.recv().await {
                    apply(&state, &results, &errors, event).await;
                }
                tracing::debug!("store owner task stopped");
            });
        }

        Self {
            tx,
            state,
            results,
            errors,
        }
    }

    /// Enqueue an event. Fire and forget; ordering against other dispatches
    /// from the same handle is preserved.
    pub fn dispatch(&self, event: StoreEvent) {
        let _ = self.tx.send(event);
    }

    /// Wait until every event dispatched so far has been applied.
    pub async fn barrier(&self) {
        let (tx, rx) = oneshot::channel();
        if self.tx.send(StoreEvent::Barrier(tx)).is_ok() {
            let _ = rx.await;
        }
    }

    /// Keyed read over a consistent snapshot of the core state.
    pub async fn select<T>(&self, f: impl FnOnce(&StoreState) -> T) -> T {
        f(&*self.state.read().await)
    }

    pub async fn action(&self, id: Uuid) -> Option<RestAction> {
        self.select(|s| s.actions.get(&id).cloned()).await
    }

    pub async fn actions(&self) -> Vec<RestAction> {
        self.select(|s| s.actions.values().cloned().collect()).await
    }

    /// Cloned snapshot of the data tree as a JSON object.
    pub async fn data_tree(&self) -> Value {
        self.select(|s| Value::Object(s.data_tree.clone())).await
    }

    pub async fn fetch_error(&self) -> Option<FetchFailure> {
        self.select(|s| s.fetch_error).await
    }

    /// Latest successful execution result for an action, if any.
    pub fn result(&self, action_id: Uuid) -> Option<ExecutionResult> {
        self.results.get(&action_id).map(|r| r.value().clone())
    }

    /// Latest execution error record for an action, if any.
    pub fn error(&self, action_id: Uuid) -> Option<Value> {
        self.errors.get(&action_id).map(|e| e.value().clone())
    }
}

async fn apply(
    state: &RwLock<StoreState>,
    results: &DashMap<Uuid, ExecutionResult>,
    errors: &DashMap<Uuid, Value>,
    event: StoreEvent,
) {
    match event {
        StoreEvent::ActionsFetched(list) => {
            let mut s = state.write().await;
            s.fetch_error = None;
            s.actions = list.into_iter().map(|a| (a.id, a)).collect();
        }
        StoreEvent::FetchActionsError { status } => {
            state.write().await.fetch_error = Some(FetchFailure { status });
        }
        StoreEvent::ActionCreated(action) | StoreEvent::ActionUpdated(action) => {
            state.write().await.actions.insert(action.id, action);
        }
        StoreEvent::ActionDeleted { id } => {
            state.write().await.actions.remove(&id);
            results.remove(&id);
            errors.remove(&id);
        }
        StoreEvent::ExecuteSuccess { action_id, result } => {
            errors.remove(&action_id);
            results.insert(action_id, result);
        }
        StoreEvent::ExecuteError { action_id, error } => {
            errors.insert(action_id, error);
        }
        StoreEvent::SetEntity { name, value } => {
            state.write().await.data_tree.insert(name, value);
        }
        StoreEvent::RebuildBindings => {
            let mut s = state.write().await;
            rebuild_bindings(&mut s, results, errors);
        }
        StoreEvent::Barrier(ack) => {
            let _ = ack.send(());
        }
    }
}

/// Replace every action-owned data tree entry with one computed from the
/// current action cache and execution tables.
fn rebuild_bindings(
    state: &mut StoreState,
    results: &DashMap<Uuid, ExecutionResult>,
    errors: &DashMap<Uuid, Value>,
) {
    let stale: Vec<String> = state.bound_action_names.drain().collect();
    for name in stale {
        state.data_tree.remove(&name);
    }

    for action in state.actions.values() {
        let data = results
            .get(&action.id)
            .map(|r| r.body.clone())
            .unwrap_or(Value::Null);
        let entry = json!({
            "id": action.id,
            "actionType": action.action_type,
            "data": data,
            "hasErrors": errors.contains_key(&action.id),
        });
        state.data_tree.insert(action.name.clone(), entry);
        state.bound_action_names.insert(action.name.clone());
    }
}
