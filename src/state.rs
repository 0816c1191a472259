//! Application state: the verb table, feedback texts and worksheet limits.
//!
//! Built once at startup and shared read-only; requests never mutate it.

use tracing::{error, info, instrument};

use worksheet_backend::{VerbTable, WorksheetError};

use crate::config::{load_app_config_from_env, AppConfig, Messages};

#[derive(Clone, Debug)]
pub struct AppState {
    pub verbs: VerbTable,
    pub messages: Messages,
    pub default_count: i64,
    pub max_count: i64,
}

impl AppState {
    /// Build state from env: load config, then the verb table it points at.
    #[instrument(level = "info", skip_all)]
    pub fn from_env() -> Result<Self, WorksheetError> {
        let cfg = load_app_config_from_env().unwrap_or_default();
        Self::from_config(cfg)
    }

    /// A custom verb table that fails to load falls back to the built-in one.
    /// A broken built-in table is fatal.
    pub fn from_config(cfg: AppConfig) -> Result<Self, WorksheetError> {
        let verbs = match &cfg.verbs_path {
            Some(path) => match VerbTable::from_path(path) {
                Ok(t) => {
                    info!(target: "worksheet_backend", %path, verbs = t.verbs.len(), "Custom verb table loaded");
                    t
                }
                Err(e) => {
                    error!(target: "worksheet_backend", %path, error = %e, "Custom verb table rejected; using built-in table");
                    VerbTable::builtin()?
                }
            },
            None => VerbTable::builtin()?,
        };

        info!(
            target: "worksheet_backend",
            verbs = verbs.verbs.len(),
            default_count = cfg.default_count,
            max_count = cfg.max_count,
            "Worksheet engine ready"
        );

        Ok(Self {
            verbs,
            messages: cfg.messages,
            default_count: cfg.default_count,
            max_count: cfg.max_count,
        })
    }
}
