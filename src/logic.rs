//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Turning a worksheet request into problems (thread-local RNG)
//!   - Scoring a submitted worksheet and attaching the feedback band/message

use tracing::{info, instrument, warn};

use worksheet_backend::{evaluate, generate_with_limit, RandomSource, WorksheetError};

use crate::protocol::{to_evaluate_out, EvaluateIn, EvaluateOut, WorksheetIn, WorksheetOut};
use crate::state::AppState;

#[instrument(level = "info", skip(state, req, rng), fields(level = %req.level, count = ?req.count))]
pub fn build_worksheet(
  state: &AppState,
  req: &WorksheetIn,
  rng: &mut dyn RandomSource,
) -> Result<WorksheetOut, WorksheetError> {
  let config = req.to_config(state.default_count).map_err(|e| {
    warn!(target: "worksheet", error = %e, "Rejected worksheet request");
    e
  })?;
  let problems = generate_with_limit(&config, state.max_count, &state.verbs, rng)?;
  info!(target: "worksheet", family = ?config.exercise.family(), count = problems.len(), "Worksheet generated");
  Ok(WorksheetOut { problems, duration_seconds: config.duration_seconds })
}

#[instrument(level = "info", skip(state, req), fields(total = req.problems.len(), time_used = req.time_used))]
pub fn score_worksheet(state: &AppState, req: &EvaluateIn) -> EvaluateOut {
  let evaluation = evaluate(&req.problems, req.time_used);
  let out = to_evaluate_out(&req.problems, evaluation, &state.messages);
  info!(
    target: "worksheet",
    correct = out.result.correct,
    total = out.result.total,
    percentage = out.percentage,
    band = ?out.band,
    "Worksheet scored"
  );
  out
}
