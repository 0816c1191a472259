//! Telemetry initialization (tracing/tracing-subscriber).
//!
//! Behavior:
//! - LOG_LEVEL controls the filter (e.g. "debug" or detailed directives like
//!   "info,worksheet=debug,worksheet_backend=debug,tower_http=info").
//! - LOG_FORMAT selects "pretty" (default) or "json" structured logs.
//!
//! Generation/scoring events log under `worksheet`, server lifecycle under
//! `worksheet_backend`; tower-http adds per-request spans on top.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,worksheet=debug,worksheet_backend=debug,tower_http=info,axum=info";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LogFormat {
    Pretty,
    Json,
}

fn log_format(raw: Option<&str>) -> LogFormat {
    match raw.map(str::trim) {
        Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
        _ => LogFormat::Pretty,
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init_tracing() {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    match log_format(std::env::var("LOG_FORMAT").ok().as_deref()) {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}
