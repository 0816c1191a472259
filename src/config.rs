//! Loading server configuration (worksheet limits, feedback texts, verb table
//! location) from TOML.
//!
//! See `AppConfig` and `Messages` for expected schema.

use serde::Deserialize;
use tracing::{error, info};

use worksheet_backend::worksheet::DEFAULT_MAX_COUNT;
use worksheet_backend::{BandMessages, Family};

/// Problems per worksheet when the request does not say.
pub const DEFAULT_COUNT: i64 = 30;

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
  #[serde(default = "default_count")]
  pub default_count: i64,
  #[serde(default = "default_max_count")]
  pub max_count: i64,
  /// Alternative verb table (same schema as the built-in `data/verbs.toml`).
  #[serde(default)]
  pub verbs_path: Option<String>,
  #[serde(default)]
  pub messages: Messages,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      default_count: DEFAULT_COUNT,
      max_count: DEFAULT_MAX_COUNT,
      verbs_path: None,
      messages: Messages::default(),
    }
  }
}

fn default_count() -> i64 { DEFAULT_COUNT }
fn default_max_count() -> i64 { DEFAULT_MAX_COUNT }

/// Result-screen texts per exercise family. Each table may be overridden
/// as a whole in TOML.
#[derive(Clone, Debug, Deserialize)]
pub struct Messages {
  #[serde(default = "BandMessages::arithmetic")]
  pub arithmetic: BandMessages,
  #[serde(default = "BandMessages::conjugation")]
  pub conjugation: BandMessages,
}

impl Default for Messages {
  fn default() -> Self {
    Self { arithmetic: BandMessages::arithmetic(), conjugation: BandMessages::conjugation() }
  }
}

impl Messages {
  pub fn for_family(&self, family: Family) -> &BandMessages {
    match family {
      Family::Arithmetic => &self.arithmetic,
      Family::Conjugation => &self.conjugation,
    }
  }
}

pub fn parse_app_config(raw: &str) -> Result<AppConfig, toml::de::Error> {
  toml::from_str::<AppConfig>(raw)
}

/// Attempt to load `AppConfig` from WORKSHEET_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_app_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("WORKSHEET_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_app_config(&s) {
      Ok(cfg) => {
        info!(target: "worksheet_backend", %path, "Loaded worksheet config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "worksheet_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "worksheet_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
