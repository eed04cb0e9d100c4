use tracing_subscriber::EnvFilter;

use actionflow::config::Config;
use actionflow::models::ActionPayload;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let config = Config::from_env().expect("Failed to load configuration");

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    tracing::info!("Starting actionflow");

    let engine = actionflow::build_engine(&config)?;

    let actions = engine.dispatcher.fetch_actions().await?;
    if let Some(failure) = engine.store.fetch_error().await {
        tracing::error!(status = ?failure.status, "failed to fetch actions");
        return Ok(());
    }
    tracing::info!("Fetched {} actions", actions.len());

    // Dispatch every action named on the command line.
    let payloads: Vec<ActionPayload> = std::env::args()
        .skip(1)
        .filter_map(|name| {
            let action = actions.iter().find(|a| a.name == name);
            if action.is_none() {
                tracing::warn!(%name, "no action with this name");
            }
            action.map(|a| ActionPayload {
                action_id: a.id,
                action_type: a.action_type,
                on_success: None,
                on_error: None,
            })
        })
        .collect();

    let results = engine.dispatcher.execute_payloads(&payloads).await;

    for (payload, result) in payloads.iter().zip(&results) {
        match result {
            Ok(response) if response.response_meta.error.is_none() => {
                tracing::info!(
                    action_id = %payload.action_id,
                    status = ?response.status_code,
                    "action succeeded"
                );
            }
            Ok(response) => {
                tracing::warn!(
                    action_id = %payload.action_id,
                    error = ?response.response_meta.error,
                    "action returned an error"
                );
            }
            Err(e) => {
                tracing::error!(action_id = %payload.action_id, "dispatch failed: {e}");
            }
        }
    }

    Ok(())
}
