//! Answer evaluation: per-item verdicts, the aggregate `GameResult`, and the
//! four-tier message band.
//!
//! Normalization differs by family:
//!   - arithmetic: trimmed answer parsed as an integer, exact equality
//!   - conjugation: trimmed + lowercased text equality
//! An answer that is empty after trimming is always unanswered.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::{Family, GameResult, Problem, ProblemKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
  Correct,
  Incorrect,
  Unanswered,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemVerdict {
  pub id: String,
  pub verdict: Verdict,
  /// Expected answer as text, shown next to wrong or missing answers.
  pub expected: String,
}

/// Aggregate result plus the verdict of every item, in worksheet order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
  pub result: GameResult,
  pub verdicts: Vec<ProblemVerdict>,
}

fn normalize_text(s: &str) -> String {
  s.trim().to_lowercase()
}

/// Classifies one problem's `user_answer`.
pub fn classify(problem: &Problem) -> Verdict {
  let answer = problem.user_answer.trim();
  if answer.is_empty() {
    return Verdict::Unanswered;
  }
  let ok = match &problem.kind {
    ProblemKind::Arithmetic(a) => answer.parse::<i64>().is_ok_and(|n| n == i64::from(a.correct_value)),
    ProblemKind::Conjugation(c) => normalize_text(answer) == normalize_text(&c.correct_value),
  };
  if ok { Verdict::Correct } else { Verdict::Incorrect }
}

/// Scores a worksheet. Pure: the same input always yields the same output.
#[instrument(level = "debug", skip(problems), fields(total = problems.len()))]
pub fn evaluate(problems: &[Problem], time_used: u32) -> Evaluation {
  let mut result = GameResult { total: problems.len(), time_used, ..Default::default() };
  let verdicts = problems
    .iter()
    .map(|p| {
      let verdict = classify(p);
      match verdict {
        Verdict::Correct => result.correct += 1,
        Verdict::Incorrect => result.incorrect += 1,
        Verdict::Unanswered => result.unanswered += 1,
      }
      ProblemVerdict { id: p.id.clone(), verdict, expected: p.correct_value_text() }
    })
    .collect();
  debug!(
    target: "worksheet",
    correct = result.correct,
    incorrect = result.incorrect,
    unanswered = result.unanswered,
    percentage = result.percentage(),
    "Worksheet evaluated"
  );
  Evaluation { result, verdicts }
}

/// Four-tier feedback band over the percentage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
  /// 100%
  Top,
  /// 80% and above
  High,
  /// 50% and above
  Mid,
  Low,
}

impl Band {
  pub fn for_percentage(percentage: u32) -> Band {
    match percentage {
      p if p >= 100 => Band::Top,
      p if p >= 80 => Band::High,
      p if p >= 50 => Band::Mid,
      _ => Band::Low,
    }
  }

  pub fn for_result(result: &GameResult) -> Band {
    Band::for_percentage(result.percentage())
  }
}

/// Feedback texts for each band of one exercise family.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandMessages {
  pub top: String,
  pub high: String,
  pub mid: String,
  pub low: String,
}

impl BandMessages {
  pub fn arithmetic() -> Self {
    Self {
      top: "Hibátlan! Szuper vagy!".into(),
      high: "Nagyon ügyes vagy!".into(),
      mid: "Jó, de gyakorolj még!".into(),
      low: "Gyakorolj még, menni fog!".into(),
    }
  }

  pub fn conjugation() -> Self {
    Self {
      top: "Wunderbar! Hibátlan!".into(),
      high: "Sehr gut! Nagyon ügyes vagy!".into(),
      mid: "Gut! De gyakorolj még!".into(),
      low: "Gyakorolj még, menni fog!".into(),
    }
  }

  pub fn for_family(family: Family) -> Self {
    match family {
      Family::Arithmetic => Self::arithmetic(),
      Family::Conjugation => Self::conjugation(),
    }
  }

  pub fn message(&self, band: Band) -> &str {
    match band {
      Band::Top => &self.top,
      Band::High => &self.high,
      Band::Mid => &self.mid,
      Band::Low => &self.low,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{ArithmeticProblem, ConjugationProblem, MissingPosition, Operator};

  fn arith(num1: u32, num2: u32, op: Operator, missing: MissingPosition, answer: &str) -> Problem {
    let mut p = Problem::new("p-0", ProblemKind::Arithmetic(ArithmeticProblem::new(num1, num2, op, missing).unwrap()));
    p.user_answer = answer.into();
    p
  }

  fn conj(correct: &str, answer: &str) -> Problem {
    let mut p = Problem::new(
      "p-1",
      ProblemKind::Conjugation(ConjugationProblem {
        prefix: "Er".into(),
        suffix: "gestern.".into(),
        hint: "csinálni (múlt idő)".into(),
        correct_value: correct.into(),
      }),
    );
    p.user_answer = answer.into();
    p
  }

  #[test]
  fn sum_with_right_answer_is_correct() {
    assert_eq!(classify(&arith(7, 5, Operator::Plus, MissingPosition::Result, "12")), Verdict::Correct);
    assert_eq!(classify(&arith(7, 5, Operator::Plus, MissingPosition::Result, " 12 ")), Verdict::Correct);
    assert_eq!(classify(&arith(7, 5, Operator::Plus, MissingPosition::Result, "13")), Verdict::Incorrect);
  }

  #[test]
  fn empty_answer_is_unanswered() {
    let p = arith(9, 4, Operator::Minus, MissingPosition::Num2, "");
    assert_eq!(classify(&p), Verdict::Unanswered);
    assert_eq!(classify(&arith(9, 4, Operator::Minus, MissingPosition::Num2, "   ")), Verdict::Unanswered);
  }

  #[test]
  fn empty_answer_stays_unanswered_even_for_zero_like_values() {
    assert_eq!(classify(&arith(5, 5, Operator::Minus, MissingPosition::Result, "")), Verdict::Unanswered);
    assert_eq!(classify(&conj("", "  ")), Verdict::Unanswered);
  }

  #[test]
  fn non_numeric_input_is_incorrect_not_an_error() {
    for junk in ["zwölf", "12a", "1 2", "12.0"] {
      assert_eq!(classify(&arith(7, 5, Operator::Plus, MissingPosition::Result, junk)), Verdict::Incorrect, "{junk}");
    }
  }

  #[test]
  fn conjugation_ignores_case_and_outer_whitespace_only() {
    assert_eq!(classify(&conj("hat gemacht", " Hat Gemacht ")), Verdict::Correct);
    assert_eq!(classify(&conj("hat gemacht", "hat  gemacht")), Verdict::Incorrect);
    assert_eq!(classify(&conj("fährt", "fahrt")), Verdict::Incorrect);
    assert_eq!(classify(&conj("fährt", "FÄHRT")), Verdict::Correct);
    assert_eq!(classify(&conj("isst", "isst.")), Verdict::Incorrect);
  }

  #[test]
  fn evaluation_counts_are_total_and_idempotent() {
    let ps = vec![
      arith(7, 5, Operator::Plus, MissingPosition::Result, "12"),
      arith(9, 4, Operator::Minus, MissingPosition::Num2, ""),
      arith(56, 8, Operator::Divide, MissingPosition::Result, "8"),
      conj("hat gemacht", " Hat Gemacht "),
    ];
    let first = evaluate(&ps, 95);
    let r = first.result;
    assert_eq!((r.total, r.correct, r.incorrect, r.unanswered, r.time_used), (4, 2, 1, 1, 95));
    assert_eq!(r.correct + r.incorrect + r.unanswered, r.total);
    assert_eq!(r.percentage(), 50);
    assert_eq!(
      first.verdicts[1],
      ProblemVerdict { id: "p-0".into(), verdict: Verdict::Unanswered, expected: "4".into() }
    );
    assert_eq!(first.verdicts[3].expected, "hat gemacht");
    assert_eq!(evaluate(&ps, 95), first);
  }

  #[test]
  fn empty_worksheet_scores_zero() {
    let e = evaluate(&[], 0);
    assert_eq!(e.result.total, 0);
    assert_eq!(e.result.percentage(), 0);
    assert_eq!(Band::for_result(&e.result), Band::Low);
  }

  #[test]
  fn bands_follow_thresholds() {
    assert_eq!(Band::for_percentage(100), Band::Top);
    assert_eq!(Band::for_percentage(99), Band::High);
    assert_eq!(Band::for_percentage(80), Band::High);
    assert_eq!(Band::for_percentage(79), Band::Mid);
    assert_eq!(Band::for_percentage(50), Band::Mid);
    assert_eq!(Band::for_percentage(49), Band::Low);
    assert_eq!(Band::for_percentage(0), Band::Low);
  }

  #[test]
  fn messages_come_from_the_family_table() {
    let m = BandMessages::for_family(Family::Conjugation);
    assert_eq!(m.message(Band::Top), "Wunderbar! Hibátlan!");
    assert_ne!(BandMessages::arithmetic().message(Band::Top), m.message(Band::Top));
  }
}
