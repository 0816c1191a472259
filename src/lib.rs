//! Worksheet engine: randomized arithmetic and German-conjugation worksheets,
//! and scoring of the learner's answers.
//!
//! - `generate` builds a worksheet (`p-0 .. p-(n-1)`) from a `WorksheetConfig`
//! - `evaluate` scores a worksheet once `user_answer` is filled in
//!
//! Every random draw goes through a caller-supplied `RandomSource`; any
//! `rand::Rng` qualifies.

pub mod arithmetic;
pub mod conjugation;
pub mod domain;
pub mod error;
pub mod random;
pub mod scoring;
pub mod verbs;
pub mod worksheet;

pub use domain::{
  ArithmeticProblem, ConjugationExercise, ConjugationProblem, Exercise, Family, GameResult, Level,
  MissingPosition, Operation, Operator, Problem, ProblemKind, WorksheetConfig,
};
pub use error::WorksheetError;
pub use random::RandomSource;
pub use scoring::{classify, evaluate, Band, BandMessages, Evaluation, ProblemVerdict, Verdict};
pub use verbs::VerbTable;
pub use worksheet::{generate, generate_with_limit, ProblemGenerator};
