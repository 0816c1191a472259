//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use worksheet_backend::{
    Band, Evaluation, Exercise, GameResult, Level, Problem, ProblemVerdict, WorksheetConfig, WorksheetError,
};

use crate::config::Messages;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    NewWorksheet(WorksheetIn),
    Evaluate(EvaluateIn),
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Worksheet(WorksheetOut),
    Evaluation(EvaluateOut),
    Error { message: String },
}

//
// Worksheet generation
//

/// Exercise selector as sent by the setup screen. Kept as plain strings so an
/// unknown selector is reported as a configuration error, not a JSON error.
#[derive(Clone, Debug, Deserialize)]
pub struct ExerciseIn {
    pub family: String,
    #[serde(default)]
    pub operation: Option<String>,
    #[serde(default)]
    pub exercise: Option<String>,
}

impl ExerciseIn {
    pub fn resolve(&self) -> Result<Exercise, WorksheetError> {
        let missing = |field: &str| WorksheetError::InvalidConfiguration(format!("'{field}' is required for family '{}'", self.family));
        match self.family.trim().to_ascii_lowercase().as_str() {
            "arithmetic" => {
                let op = self.operation.as_deref().ok_or_else(|| missing("operation"))?;
                Ok(Exercise::Arithmetic { operation: op.parse()? })
            }
            "conjugation" => {
                let ex = self.exercise.as_deref().ok_or_else(|| missing("exercise"))?;
                Ok(Exercise::Conjugation { exercise: ex.parse()? })
            }
            other => Err(WorksheetError::InvalidConfiguration(format!("unknown exercise family '{other}'"))),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetIn {
    pub exercise: ExerciseIn,
    pub level: String,
    #[serde(default)]
    pub count: Option<i64>,
    #[serde(default)]
    pub duration_seconds: Option<u32>,
}

impl WorksheetIn {
    pub fn to_config(&self, default_count: i64) -> Result<WorksheetConfig, WorksheetError> {
        Ok(WorksheetConfig {
            exercise: self.exercise.resolve()?,
            level: self.level.parse::<Level>()?,
            count: self.count.unwrap_or(default_count),
            duration_seconds: self.duration_seconds.unwrap_or(0),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetOut {
    pub problems: Vec<Problem>,
    pub duration_seconds: u32,
}

//
// Evaluation
//

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateIn {
    pub problems: Vec<Problem>,
    #[serde(default)]
    pub time_used: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateOut {
    #[serde(flatten)]
    pub result: GameResult,
    pub percentage: u32,
    pub band: Band,
    pub message: String,
    pub verdicts: Vec<ProblemVerdict>,
}

/// Build the result DTO. Feedback text follows the family of the first
/// problem; an empty worksheet uses the arithmetic texts.
pub fn to_evaluate_out(problems: &[Problem], evaluation: Evaluation, messages: &Messages) -> EvaluateOut {
    let family = problems.first().map(Problem::family).unwrap_or(worksheet_backend::Family::Arithmetic);
    let percentage = evaluation.result.percentage();
    let band = Band::for_result(&evaluation.result);
    EvaluateOut {
        result: evaluation.result,
        percentage,
        band,
        message: messages.for_family(family).message(band).to_string(),
        verdicts: evaluation.verdicts,
    }
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub error: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use worksheet_backend::{ConjugationExercise, Operation};

    #[test]
    fn worksheet_request_resolves_to_config() {
        let body: WorksheetIn = serde_json::from_str(
            r#"{"exercise":{"family":"arithmetic","operation":"SUBSTITUTION"},"level":"GRADE_1","durationSeconds":300}"#,
        )
        .unwrap();
        let cfg = body.to_config(30).unwrap();
        assert_eq!(cfg.exercise, Exercise::Arithmetic { operation: Operation::Substitution });
        assert_eq!(cfg.level, Level::Grade1);
        assert_eq!(cfg.count, 30);
        assert_eq!(cfg.duration_seconds, 300);
    }

    #[test]
    fn conjugation_request_needs_exercise() {
        let mut ex = ExerciseIn { family: "conjugation".into(), operation: None, exercise: None };
        assert!(matches!(ex.resolve(), Err(WorksheetError::InvalidConfiguration(_))));
        ex.exercise = Some("regular_past".into());
        assert_eq!(ex.resolve().unwrap(), Exercise::Conjugation { exercise: ConjugationExercise::RegularPast });
    }

    #[test]
    fn unknown_family_is_invalid_configuration() {
        let ex = ExerciseIn { family: "geometry".into(), operation: Some("ADD".into()), exercise: None };
        assert!(matches!(ex.resolve(), Err(WorksheetError::InvalidConfiguration(m)) if m.contains("geometry")));
    }

    #[test]
    fn ws_messages_are_type_tagged() {
        let msg: ClientWsMessage = serde_json::from_str(
            r#"{"type":"new_worksheet","exercise":{"family":"arithmetic","operation":"ADD"},"level":"GRADE_2","count":3}"#,
        )
        .unwrap();
        assert!(matches!(msg, ClientWsMessage::NewWorksheet(ref w) if w.count == Some(3)));

        let out = serde_json::to_value(ServerWsMessage::Error { message: "x".into() }).unwrap();
        assert_eq!(out["type"], "error");
    }
}
