//! Worksheet assembly: one generator per exercise family behind a common
//! trait, driven `count` times to produce `p-0 .. p-(count-1)`.

use tracing::{debug, instrument};

use crate::arithmetic::generate_arithmetic;
use crate::conjugation::generate_conjugation;
use crate::domain::{ConjugationExercise, Exercise, Level, Operation, Problem, ProblemKind, WorksheetConfig};
use crate::error::WorksheetError;
use crate::random::RandomSource;
use crate::verbs::VerbTable;

/// Upper bound on problems per worksheet unless the caller sets another.
pub const DEFAULT_MAX_COUNT: i64 = 500;

/// Something that can build one problem body at a difficulty level.
pub trait ProblemGenerator {
  fn generate(&self, level: Level, rng: &mut dyn RandomSource) -> Result<ProblemKind, WorksheetError>;
}

pub struct ArithmeticGenerator {
  pub operation: Operation,
}

impl ProblemGenerator for ArithmeticGenerator {
  fn generate(&self, level: Level, rng: &mut dyn RandomSource) -> Result<ProblemKind, WorksheetError> {
    generate_arithmetic(self.operation, level, rng)
  }
}

pub struct ConjugationGenerator<'t> {
  pub table: &'t VerbTable,
  pub exercise: ConjugationExercise,
}

impl ProblemGenerator for ConjugationGenerator<'_> {
  fn generate(&self, level: Level, rng: &mut dyn RandomSource) -> Result<ProblemKind, WorksheetError> {
    generate_conjugation(self.table, self.exercise, level, rng)
  }
}

/// Generator for the config's family.
pub fn generator_for<'t>(exercise: Exercise, table: &'t VerbTable) -> Box<dyn ProblemGenerator + 't> {
  match exercise {
    Exercise::Arithmetic { operation } => Box::new(ArithmeticGenerator { operation }),
    Exercise::Conjugation { exercise } => Box::new(ConjugationGenerator { table, exercise }),
  }
}

/// Problem id for position `index`.
pub fn problem_id(index: usize) -> String {
  format!("p-{index}")
}

fn checked_count(count: i64, max_count: i64) -> Result<usize, WorksheetError> {
  if count < 0 {
    return Err(WorksheetError::config(format!("problem count must not be negative (got {count})")));
  }
  if count > max_count {
    return Err(WorksheetError::config(format!("problem count {count} exceeds the limit of {max_count}")));
  }
  usize::try_from(count).map_err(|_| WorksheetError::config(format!("problem count {count} is too large")))
}

/// Runs `generator` `count` times. Nothing is returned unless every problem
/// was built.
pub fn assemble(
  count: i64,
  max_count: i64,
  level: Level,
  generator: &dyn ProblemGenerator,
  rng: &mut dyn RandomSource,
) -> Result<Vec<Problem>, WorksheetError> {
  let n = checked_count(count, max_count)?;
  (0..n)
    .map(|i| generator.generate(level, &mut *rng).map(|kind| Problem::new(problem_id(i), kind)))
    .collect()
}

/// Builds the worksheet described by `config` with the default count limit.
pub fn generate(
  config: &WorksheetConfig,
  table: &VerbTable,
  rng: &mut dyn RandomSource,
) -> Result<Vec<Problem>, WorksheetError> {
  generate_with_limit(config, DEFAULT_MAX_COUNT, table, rng)
}

#[instrument(level = "debug", skip(table, rng), fields(family = ?config.exercise.family()))]
pub fn generate_with_limit(
  config: &WorksheetConfig,
  max_count: i64,
  table: &VerbTable,
  rng: &mut dyn RandomSource,
) -> Result<Vec<Problem>, WorksheetError> {
  let generator = generator_for(config.exercise, table);
  let problems = assemble(config.count, max_count, config.level, generator.as_ref(), rng)?;
  debug!(target: "worksheet", count = problems.len(), level = ?config.level, "Worksheet assembled");
  Ok(problems)
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use rand::{rngs::StdRng, SeedableRng};

  use super::*;
  use crate::domain::{MissingPosition, Operator};

  fn config(exercise: Exercise, level: Level, count: i64) -> WorksheetConfig {
    WorksheetConfig { exercise, level, count, duration_seconds: 300 }
  }

  #[test]
  fn thirty_problems_get_sequential_ids() {
    let t = VerbTable::builtin().unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let cfg = config(Exercise::Arithmetic { operation: Operation::Mixed }, Level::Grade2, 30);
    let ps = generate(&cfg, &t, &mut rng).unwrap();
    assert_eq!(ps.len(), 30);
    let ids: Vec<_> = ps.iter().map(|p| p.id.as_str()).collect();
    let expected: Vec<_> = (0..30).map(problem_id).collect();
    assert_eq!(ids, expected);
    assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 30);
    assert!(ps.iter().all(|p| p.user_answer.is_empty()));
  }

  #[test]
  fn zero_count_is_empty_and_negative_is_rejected() {
    let t = VerbTable::builtin().unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let ex = Exercise::Arithmetic { operation: Operation::Add };
    assert!(generate(&config(ex, Level::Grade1, 0), &t, &mut rng).unwrap().is_empty());
    let err = generate(&config(ex, Level::Grade1, -1), &t, &mut rng).unwrap_err();
    assert!(matches!(err, WorksheetError::InvalidConfiguration(_)));
    let err = generate(&config(ex, Level::Grade1, DEFAULT_MAX_COUNT + 1), &t, &mut rng).unwrap_err();
    assert!(matches!(err, WorksheetError::InvalidConfiguration(_)));
  }

  #[test]
  fn family_picks_the_generator() {
    let t = VerbTable::builtin().unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    let cfg = config(
      Exercise::Conjugation { exercise: ConjugationExercise::IrregularPast },
      Level::Grade1,
      12,
    );
    let ps = generate(&cfg, &t, &mut rng).unwrap();
    assert!(ps.iter().all(|p| matches!(p.kind, ProblemKind::Conjugation(_))));
  }

  #[test]
  fn every_arithmetic_problem_has_exactly_one_consistent_slot() {
    let t = VerbTable::builtin().unwrap();
    let mut rng = StdRng::seed_from_u64(77);
    for op in [Operation::Add, Operation::Sub, Operation::Mul, Operation::Div, Operation::Substitution, Operation::Mixed] {
      let cfg = config(Exercise::Arithmetic { operation: op }, Level::Grade2, 200);
      for p in generate(&cfg, &t, &mut rng).unwrap() {
        let ProblemKind::Arithmetic(a) = p.kind else { panic!("expected arithmetic") };
        assert_eq!(Some(a.result), a.operator.apply(a.num1, a.num2));
        let expected = match a.missing_position {
          MissingPosition::Num1 => a.num1,
          MissingPosition::Num2 => a.num2,
          MissingPosition::Result => a.result,
        };
        assert_eq!(a.correct_value, expected);
        if a.operator == Operator::Divide {
          assert_eq!(a.num1 % a.num2, 0);
        }
      }
    }
  }

  #[test]
  fn boxed_random_source_drives_generation() {
    let t = VerbTable::builtin().unwrap();
    let cfg = config(Exercise::Arithmetic { operation: Operation::Sub }, Level::Grade1, 6);
    let mut boxed: Box<dyn RandomSource> = Box::new(StdRng::seed_from_u64(12));
    let from_box = generate(&cfg, &t, boxed.as_mut()).unwrap();
    let direct = generate(&cfg, &t, &mut StdRng::seed_from_u64(12)).unwrap();
    assert_eq!(from_box, direct);
  }

  #[test]
  fn same_seed_same_worksheet() {
    let t = VerbTable::builtin().unwrap();
    let cfg = config(Exercise::Conjugation { exercise: ConjugationExercise::AuxiliaryChoice }, Level::Grade2, 25);
    let a = generate(&cfg, &t, &mut StdRng::seed_from_u64(9)).unwrap();
    let b = generate(&cfg, &t, &mut StdRng::seed_from_u64(9)).unwrap();
    assert_eq!(a, b);
  }
}
