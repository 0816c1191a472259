//! Domain models: selectors (level, operation, exercise type), the tagged
//! `Problem`, the worksheet configuration and the aggregate result.
//!
//! Field names serialize in camelCase because the presentation layer binds to
//! them directly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WorksheetError;

/// Difficulty tier. Controls numeric ranges for arithmetic and verb pool
/// breadth for conjugation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
  /// First grade: numbers up to 20, base verb pools.
  #[serde(rename = "GRADE_1")]
  Grade1,
  /// Second grade: numbers up to 100, multiplication/division, extended verb pools.
  #[serde(rename = "GRADE_2")]
  Grade2,
}

impl FromStr for Level {
  type Err = WorksheetError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_uppercase().as_str() {
      "GRADE_1" | "1" => Ok(Level::Grade1),
      "GRADE_2" | "2" => Ok(Level::Grade2),
      other => Err(WorksheetError::config(format!("unknown difficulty level '{other}'"))),
    }
  }
}

/// Arithmetic request as chosen on the setup screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
  Add,
  Sub,
  Mul,
  Div,
  /// Random operator, an operand is hidden instead of the result.
  Substitution,
  /// Random operator, usually the result is hidden.
  Mixed,
}

impl FromStr for Operation {
  type Err = WorksheetError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_uppercase().as_str() {
      "ADD" => Ok(Operation::Add),
      "SUB" => Ok(Operation::Sub),
      "MUL" => Ok(Operation::Mul),
      "DIV" => Ok(Operation::Div),
      "SUBSTITUTION" => Ok(Operation::Substitution),
      "MIXED" => Ok(Operation::Mixed),
      other => Err(WorksheetError::config(format!("unknown operation '{other}'"))),
    }
  }
}

/// Concrete operator of a generated problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
  #[serde(rename = "+")]
  Plus,
  #[serde(rename = "-")]
  Minus,
  #[serde(rename = "·")]
  Times,
  #[serde(rename = ":")]
  Divide,
}

impl Operator {
  pub fn symbol(self) -> &'static str {
    match self {
      Operator::Plus => "+",
      Operator::Minus => "-",
      Operator::Times => "·",
      Operator::Divide => ":",
    }
  }

  /// Value of `a op b`, or `None` when it is not a whole number >= 0.
  pub fn apply(self, a: u32, b: u32) -> Option<u32> {
    match self {
      Operator::Plus => a.checked_add(b),
      Operator::Minus => a.checked_sub(b),
      Operator::Times => a.checked_mul(b),
      Operator::Divide => {
        if b == 0 || a % b != 0 { None } else { Some(a / b) }
      }
    }
  }
}

impl fmt::Display for Operator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.symbol())
  }
}

/// Conjugation exercise types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConjugationExercise {
  RegularPresent,
  StemChangingPresent,
  ModalPresent,
  RegularPast,
  IrregularPast,
  /// Participle is shown, learner supplies the haben/sein form.
  AuxiliaryChoice,
}

impl ConjugationExercise {
  pub const ALL: [ConjugationExercise; 6] = [
    ConjugationExercise::RegularPresent,
    ConjugationExercise::StemChangingPresent,
    ConjugationExercise::ModalPresent,
    ConjugationExercise::RegularPast,
    ConjugationExercise::IrregularPast,
    ConjugationExercise::AuxiliaryChoice,
  ];

  /// Key of this exercise's verb pool in the data table.
  pub fn key(self) -> &'static str {
    match self {
      ConjugationExercise::RegularPresent => "regular_present",
      ConjugationExercise::StemChangingPresent => "stem_changing_present",
      ConjugationExercise::ModalPresent => "modal_present",
      ConjugationExercise::RegularPast => "regular_past",
      ConjugationExercise::IrregularPast => "irregular_past",
      ConjugationExercise::AuxiliaryChoice => "auxiliary_choice",
    }
  }
}

impl FromStr for ConjugationExercise {
  type Err = WorksheetError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let wanted = s.trim().to_ascii_lowercase();
    ConjugationExercise::ALL
      .into_iter()
      .find(|e| e.key() == wanted)
      .ok_or_else(|| WorksheetError::config(format!("unknown conjugation exercise '{}'", s.trim())))
  }
}

/// Top-level exercise selector: which family, and which request inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum Exercise {
  Arithmetic { operation: Operation },
  Conjugation { exercise: ConjugationExercise },
}

impl Exercise {
  pub fn family(&self) -> Family {
    match self {
      Exercise::Arithmetic { .. } => Family::Arithmetic,
      Exercise::Conjugation { .. } => Family::Conjugation,
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
  Arithmetic,
  Conjugation,
}

/// Which value of `num1 op num2 = result` the learner fills in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MissingPosition {
  Num1,
  Num2,
  Result,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArithmeticProblem {
  pub num1: u32,
  pub num2: u32,
  pub operator: Operator,
  /// Value of `num1 operator num2`, fixed when the problem is built.
  pub result: u32,
  pub missing_position: MissingPosition,
  pub correct_value: u32,
}

impl ArithmeticProblem {
  /// Builds a consistent problem. `None` when `num1 op num2` has no whole
  /// non-negative value.
  pub fn new(num1: u32, num2: u32, operator: Operator, missing_position: MissingPosition) -> Option<Self> {
    let result = operator.apply(num1, num2)?;
    let mut p = Self { num1, num2, operator, result, missing_position, correct_value: 0 };
    p.correct_value = p.value_at(missing_position);
    Some(p)
  }

  pub fn value_at(&self, slot: MissingPosition) -> u32 {
    match slot {
      MissingPosition::Num1 => self.num1,
      MissingPosition::Num2 => self.num2,
      MissingPosition::Result => self.result,
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConjugationProblem {
  pub prefix: String,
  pub suffix: String,
  pub hint: String,
  pub correct_value: String,
}

/// Body of a problem: one of the two exercise families.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProblemKind {
  Arithmetic(ArithmeticProblem),
  Conjugation(ConjugationProblem),
}

/// One worksheet item. Only `user_answer` changes after generation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
  pub id: String,
  #[serde(flatten)]
  pub kind: ProblemKind,
  #[serde(default)]
  pub user_answer: String,
}

impl Problem {
  pub fn new(id: impl Into<String>, kind: ProblemKind) -> Self {
    Self { id: id.into(), kind, user_answer: String::new() }
  }

  pub fn family(&self) -> Family {
    match self.kind {
      ProblemKind::Arithmetic(_) => Family::Arithmetic,
      ProblemKind::Conjugation(_) => Family::Conjugation,
    }
  }

  /// Expected answer rendered as text (for result screens and logs).
  pub fn correct_value_text(&self) -> String {
    match &self.kind {
      ProblemKind::Arithmetic(a) => a.correct_value.to_string(),
      ProblemKind::Conjugation(c) => c.correct_value.clone(),
    }
  }
}

/// Input to the worksheet assembler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetConfig {
  pub exercise: Exercise,
  pub level: Level,
  /// Signed so a negative request can be reported instead of wrapping.
  pub count: i64,
  /// Only the external timer reads this.
  #[serde(default)]
  pub duration_seconds: u32,
}

/// Aggregate outcome of one evaluated worksheet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
  pub total: usize,
  pub correct: usize,
  pub incorrect: usize,
  pub unanswered: usize,
  /// Opaque, passed through from the external timer.
  pub time_used: u32,
}

impl GameResult {
  /// `round(100 * correct / total)`, 0 for an empty worksheet.
  pub fn percentage(&self) -> u32 {
    if self.total == 0 {
      return 0;
    }
    let (c, t) = (self.correct as u64, self.total as u64);
    ((200 * c + t) / (2 * t)) as u32
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn selectors_parse_case_insensitively() {
    assert_eq!("grade_2".parse::<Level>().unwrap(), Level::Grade2);
    assert_eq!(" mixed ".parse::<Operation>().unwrap(), Operation::Mixed);
    assert_eq!(
      "AUXILIARY_CHOICE".parse::<ConjugationExercise>().unwrap(),
      ConjugationExercise::AuxiliaryChoice
    );
  }

  #[test]
  fn unknown_selectors_are_invalid_configuration() {
    for err in [
      "GRADE_3".parse::<Level>().unwrap_err(),
      "POW".parse::<Operation>().unwrap_err(),
      "future_tense".parse::<ConjugationExercise>().unwrap_err(),
    ] {
      assert!(matches!(err, WorksheetError::InvalidConfiguration(_)), "{err}");
    }
  }

  #[test]
  fn arithmetic_problem_derives_correct_value_from_slot() {
    let p = ArithmeticProblem::new(9, 4, Operator::Minus, MissingPosition::Num2).unwrap();
    assert_eq!(p.result, 5);
    assert_eq!(p.correct_value, 4);
    assert!(ArithmeticProblem::new(7, 2, Operator::Divide, MissingPosition::Result).is_none());
    assert!(ArithmeticProblem::new(3, 5, Operator::Minus, MissingPosition::Result).is_none());
  }

  #[test]
  fn problem_serializes_with_stable_field_names() {
    let p = Problem::new(
      "p-0",
      ProblemKind::Arithmetic(ArithmeticProblem::new(7, 5, Operator::Plus, MissingPosition::Result).unwrap()),
    );
    let v = serde_json::to_value(&p).unwrap();
    assert_eq!(v["id"], "p-0");
    assert_eq!(v["kind"], "arithmetic");
    assert_eq!(v["num1"], 7);
    assert_eq!(v["operator"], "+");
    assert_eq!(v["missingPosition"], "result");
    assert_eq!(v["correctValue"], 12);
    assert_eq!(v["userAnswer"], "");

    let back: Problem = serde_json::from_value(v).unwrap();
    assert_eq!(back, p);
  }

  #[test]
  fn conjugation_problem_accepts_missing_user_answer() {
    let raw = r#"{"id":"p-3","kind":"conjugation","prefix":"Er","suffix":"gestern.","hint":"csinálni (múlt idő)","correctValue":"hat gemacht"}"#;
    let p: Problem = serde_json::from_str(raw).unwrap();
    assert_eq!(p.family(), Family::Conjugation);
    assert_eq!(p.user_answer, "");
    assert_eq!(p.correct_value_text(), "hat gemacht");
  }

  #[test]
  fn exercise_selector_is_family_tagged() {
    let e: Exercise = serde_json::from_str(r#"{"family":"arithmetic","operation":"DIV"}"#).unwrap();
    assert_eq!(e, Exercise::Arithmetic { operation: Operation::Div });
    let e: Exercise = serde_json::from_str(r#"{"family":"conjugation","exercise":"MODAL_PRESENT"}"#).unwrap();
    assert_eq!(e.family(), Family::Conjugation);
  }

  #[test]
  fn percentage_rounds_half_up_and_guards_empty() {
    let r = |correct, total| GameResult { total, correct, ..Default::default() }.percentage();
    assert_eq!(r(0, 0), 0);
    assert_eq!(r(1, 8), 13);
    assert_eq!(r(2, 3), 67);
    assert_eq!(r(1, 3), 33);
    assert_eq!(r(30, 30), 100);
  }
}
