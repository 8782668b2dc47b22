use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::config::ExplicitSettings;
use crate::db::diagnostics::StoreProbe;
use crate::state::AppState;

/// Maximum number of collection names included in a report.
const MAX_REPORTED_COLLECTIONS: usize = 10;
const MAX_ERROR_CHARS: usize = 50;

/// Result of `GET /test`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsReport {
    pub backend: String,
    pub database: String,
    /// Whether `DATABASE_URL` was explicitly configured.
    pub database_url: String,
    pub database_name: String,
    /// Whether `DATABASE_NAME` was explicitly configured.
    pub database_name_env: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

/// Probe the store. Never fails: an unreachable store is reported inline.
pub async fn process_diagnostics(
    probe: &dyn StoreProbe,
    explicit: ExplicitSettings,
) -> DiagnosticsReport {
    let (database, connection_status, collections) = match probe.list_collections().await {
        Ok(mut names) => {
            names.truncate(MAX_REPORTED_COLLECTIONS);
            ("connected".to_string(), "Connected".to_string(), names)
        }
        Err(e) => {
            tracing::warn!("Store diagnostics probe failed: {}", e);
            let message: String = e.to_string().chars().take(MAX_ERROR_CHARS).collect();
            (
                format!("error: {}", message),
                "Not Connected".to_string(),
                Vec::new(),
            )
        }
    };

    DiagnosticsReport {
        backend: "running".to_string(),
        database,
        database_url: set_or_not(explicit.database_url),
        database_name: probe.database_name(),
        database_name_env: set_or_not(explicit.database_name),
        connection_status,
        collections,
    }
}

fn set_or_not(explicit: bool) -> String {
    if explicit { "set" } else { "not set" }.to_string()
}

/// Axum handler for `GET /test`.
pub async fn diagnostics_handler(State(state): State<AppState>) -> Json<DiagnosticsReport> {
    Json(process_diagnostics(state.store_probe.as_ref(), state.explicit_settings).await)
}
