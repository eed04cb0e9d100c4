pub mod api;
pub mod bindings;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod notify;
pub mod routes;
pub mod store;
pub mod utils;

use std::sync::Arc;

use crate::api::ActionApi;
use crate::api::http::HttpActionApi;
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::error::AppError;
use crate::notify::{Toaster, TracingToaster};
use crate::routes::{History, TracingHistory};
use crate::store::Store;

/// A wired engine: the global store plus a dispatcher bound to it.
pub struct Engine {
    pub store: Store,
    pub dispatcher: Dispatcher,
}

/// Build an engine against the configured Action API, with logging defaults
/// for the toast and navigation surfaces.
pub fn build_engine(config: &Config) -> Result<Engine, AppError> {
    let api = Arc::new(HttpActionApi::new(config)?);
    Ok(build_engine_with(
        config,
        api,
        Arc::new(TracingToaster),
        Arc::new(TracingHistory),
    ))
}

/// Build an engine with caller-supplied collaborators. Must be called from
/// within a Tokio runtime; the store's owner task is spawned here.
pub fn build_engine_with(
    config: &Config,
    api: Arc<dyn ActionApi>,
    toaster: Arc<dyn Toaster>,
    history: Arc<dyn History>,
) -> Engine {
    let store = Store::spawn();
    let dispatcher = Dispatcher::new(
        api,
        store.clone(),
        toaster,
        history,
        config.max_dispatch_depth,
    );
    Engine { store, dispatcher }
}
