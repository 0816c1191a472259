//! German conjugation problem generation.
//!
//! Flow:
//! 1) Pick a verb from the exercise's pool (wider pool at GRADE_2).
//! 2) Pick a person.
//! 3) Present: look the form up in the verb's table.
//!    Past: auxiliary form from the 4-bucket rule table + participle.
//! 4) Build the sentence fragments around the blank. The participle closes
//!    the clause, so time adverbials go in front of it.

use crate::domain::{ConjugationExercise, ConjugationProblem, Level, ProblemKind};
use crate::error::WorksheetError;
use crate::random::{pick, RandomSource};
use crate::verbs::{Person, Verb, VerbTable};

const PAST_TENSE_HINT: &str = "múlt idő";
const AUXILIARY_HINT: &str = "haben vagy sein?";

/// Auxiliary + participle, e.g. "hat gemacht".
pub fn compound_past(table: &VerbTable, verb: &Verb, person: Person) -> String {
  format!("{} {}", auxiliary_form(table, verb, person), verb.participle)
}

pub fn auxiliary_form<'t>(table: &'t VerbTable, verb: &Verb, person: Person) -> &'t str {
  table.auxiliaries.forms(verb.auxiliary).form(person.aux_bucket())
}

fn filler<'t>(rng: &mut dyn RandomSource, list: &'t [String]) -> Result<&'t str, WorksheetError> {
  pick(rng, list)
    .map(String::as_str)
    .ok_or_else(|| WorksheetError::table("empty filler list"))
}

/// Builds one conjugation problem for `exercise` at `level`.
pub fn generate_conjugation(
  table: &VerbTable,
  exercise: ConjugationExercise,
  level: Level,
  rng: &mut dyn RandomSource,
) -> Result<ProblemKind, WorksheetError> {
  let candidates = table.candidates(exercise, level)?;
  let verb = *pick(rng, &candidates)
    .ok_or_else(|| WorksheetError::table(format!("empty verb pool for '{}'", exercise.key())))?;
  let person = *pick(rng, &Person::ALL).unwrap_or(&Person::Ich);
  let prefix = person.sentence_start();

  let problem = match exercise {
    ConjugationExercise::RegularPresent | ConjugationExercise::StemChangingPresent => ConjugationProblem {
      prefix,
      suffix: filler(rng, &table.fillers.present)?.to_string(),
      hint: format!("({})", verb.infinitive),
      correct_value: verb.present.form(person).to_string(),
    },
    ConjugationExercise::ModalPresent => ConjugationProblem {
      prefix,
      suffix: filler(rng, &table.fillers.modal)?.to_string(),
      hint: format!("({})", verb.infinitive),
      correct_value: verb.present.form(person).to_string(),
    },
    ConjugationExercise::RegularPast | ConjugationExercise::IrregularPast => ConjugationProblem {
      prefix,
      suffix: filler(rng, &table.fillers.past_clause)?.to_string(),
      hint: format!("{} ({PAST_TENSE_HINT})", verb.meaning),
      correct_value: compound_past(table, verb, person),
    },
    ConjugationExercise::AuxiliaryChoice => ConjugationProblem {
      prefix,
      suffix: format!("{} {}.", filler(rng, &table.fillers.past)?, verb.participle),
      hint: AUXILIARY_HINT.to_string(),
      correct_value: auxiliary_form(table, verb, person).to_string(),
    },
  };
  Ok(ProblemKind::Conjugation(problem))
}
