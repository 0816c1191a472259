//! Arithmetic problem generation.
//!
//! Every operand and result stays in `[0, max]` for the level. The bounds hold
//! by construction: each draw is limited by the draws before it, so nothing is
//! ever generated and thrown away.

use crate::domain::{ArithmeticProblem, Level, MissingPosition, Operation, Operator, ProblemKind};
use crate::error::WorksheetError;
use crate::random::{chance, pick, RandomSource};

/// Numeric bounds of one difficulty level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Range {
  /// Largest value any operand or result may take.
  pub max: u32,
  /// Upper bound of the first multiplication factor (and of the quotient).
  pub factor_a: u32,
  /// Upper bound of the second factor (and of the divisor).
  pub factor_b: u32,
}

const GRADE_1: Range = Range { max: 20, factor_a: 5, factor_b: 4 };
const GRADE_2: Range = Range { max: 100, factor_a: 10, factor_b: 10 };

/// Chance that MIXED at GRADE_2 hides an operand instead of the result.
pub const MIXED_OPERAND_CHANCE: f64 = 0.1;

impl Range {
  pub fn for_level(level: Level) -> Range {
    match level {
      Level::Grade1 => GRADE_1,
      Level::Grade2 => GRADE_2,
    }
  }
}

/// Operators a meta-operation (MIXED, SUBSTITUTION) may resolve to.
pub fn allowed_operators(level: Level) -> &'static [Operator] {
  match level {
    Level::Grade1 => &[Operator::Plus, Operator::Minus],
    Level::Grade2 => &[Operator::Plus, Operator::Minus, Operator::Times, Operator::Divide],
  }
}

fn resolve_operator(op: Operation, level: Level, rng: &mut dyn RandomSource) -> Operator {
  match op {
    Operation::Add => Operator::Plus,
    Operation::Sub => Operator::Minus,
    Operation::Mul => Operator::Times,
    Operation::Div => Operator::Divide,
    Operation::Substitution | Operation::Mixed => {
      pick(rng, allowed_operators(level)).copied().unwrap_or(Operator::Plus)
    }
  }
}

/// Division built from a multiplication fact: `(quotient * divisor) : divisor = quotient`.
pub fn division_from_fact(quotient: u32, divisor: u32) -> (u32, u32, u32) {
  (quotient * divisor, divisor, quotient)
}

/// Draws `(num1, num2)` for one operator within the level's range.
fn draw_operands(operator: Operator, range: Range, rng: &mut dyn RandomSource) -> (u32, u32) {
  match operator {
    Operator::Plus => {
      let num1 = rng.int_in(1, range.max - 1);
      let num2 = rng.int_in(1, range.max - num1);
      (num1, num2)
    }
    Operator::Minus => {
      let num1 = rng.int_in(1, range.max);
      let num2 = rng.int_in(1, num1);
      (num1, num2)
    }
    Operator::Times => {
      let a = rng.int_in(1, range.factor_a);
      let b = rng.int_in(1, range.factor_b);
      (a, b)
    }
    Operator::Divide => {
      let quotient = rng.int_in(1, range.factor_a);
      let divisor = rng.int_in(1, range.factor_b);
      let (dividend, divisor, _) = division_from_fact(quotient, divisor);
      (dividend, divisor)
    }
  }
}

fn hidden_operand(rng: &mut dyn RandomSource) -> MissingPosition {
  if chance(rng, 0.5) { MissingPosition::Num1 } else { MissingPosition::Num2 }
}

fn missing_slot(op: Operation, level: Level, rng: &mut dyn RandomSource) -> MissingPosition {
  match op {
    Operation::Substitution => hidden_operand(rng),
    Operation::Mixed if level == Level::Grade2 && chance(rng, MIXED_OPERAND_CHANCE) => hidden_operand(rng),
    _ => MissingPosition::Result,
  }
}

/// Builds one arithmetic problem for `op` at `level`.
pub fn generate_arithmetic(op: Operation, level: Level, rng: &mut dyn RandomSource) -> Result<ProblemKind, WorksheetError> {
  let operator = resolve_operator(op, level, rng);
  let (num1, num2) = draw_operands(operator, Range::for_level(level), rng);
  let missing = missing_slot(op, level, rng);
  ArithmeticProblem::new(num1, num2, operator, missing)
    .map(ProblemKind::Arithmetic)
    .ok_or_else(|| WorksheetError::config(format!("no whole result for {num1} {operator} {num2}")))
}
