//! Verb table: present forms, participles, auxiliary class, the auxiliary
//! rule table and the per-exercise verb pools.
//!
//! The data is declarative TOML (`data/verbs.toml`, embedded at build time).
//! A different table can be loaded from disk without touching generation code.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::domain::{ConjugationExercise, Level};
use crate::error::WorksheetError;

/// Built-in table shipped with the crate.
pub const BUILTIN_VERBS_TOML: &str = include_str!("../data/verbs.toml");

/// Grammatical person as drawn by the generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Person {
  Ich,
  Du,
  Er,
  Sie,
  Es,
  Wir,
  /// Third-person plural "sie" (they).
  SiePlural,
}

impl Person {
  pub const ALL: [Person; 7] = [
    Person::Ich,
    Person::Du,
    Person::Er,
    Person::Sie,
    Person::Es,
    Person::Wir,
    Person::SiePlural,
  ];

  /// Pronoun as it appears in text. Both "sie" persons display the same.
  pub fn pronoun(self) -> &'static str {
    match self {
      Person::Ich => "ich",
      Person::Du => "du",
      Person::Er => "er",
      Person::Sie | Person::SiePlural => "sie",
      Person::Es => "es",
      Person::Wir => "wir",
    }
  }

  /// Pronoun capitalized for the start of a sentence.
  pub fn sentence_start(self) -> String {
    capitalize(self.pronoun())
  }

  /// Key into `PresentForms`. Differs from the pronoun for er/sie/es and
  /// plural sie.
  pub fn table_key(self) -> &'static str {
    match self {
      Person::Ich => "ich",
      Person::Du => "du",
      Person::Er | Person::Sie | Person::Es => "er",
      Person::Wir => "wir",
      Person::SiePlural => "sie",
    }
  }

  pub fn aux_bucket(self) -> AuxBucket {
    match self {
      Person::Ich => AuxBucket::FirstSingular,
      Person::Du => AuxBucket::SecondSingular,
      Person::Er | Person::Sie | Person::Es => AuxBucket::OtherSingular,
      Person::Wir | Person::SiePlural => AuxBucket::Plural,
    }
  }
}

/// The four person groups of the auxiliary rule table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuxBucket {
  FirstSingular,
  SecondSingular,
  OtherSingular,
  Plural,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Auxiliary {
  Haben,
  Sein,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AuxiliaryForms {
  pub first_singular: String,
  pub second_singular: String,
  pub other_singular: String,
  pub plural: String,
}

impl AuxiliaryForms {
  pub fn form(&self, bucket: AuxBucket) -> &str {
    match bucket {
      AuxBucket::FirstSingular => &self.first_singular,
      AuxBucket::SecondSingular => &self.second_singular,
      AuxBucket::OtherSingular => &self.other_singular,
      AuxBucket::Plural => &self.plural,
    }
  }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Auxiliaries {
  pub haben: AuxiliaryForms,
  pub sein: AuxiliaryForms,
}

impl Auxiliaries {
  pub fn forms(&self, aux: Auxiliary) -> &AuxiliaryForms {
    match aux {
      Auxiliary::Haben => &self.haben,
      Auxiliary::Sein => &self.sein,
    }
  }
}

#[derive(Clone, Debug, Deserialize)]
pub struct PresentForms {
  pub ich: String,
  pub du: String,
  pub er: String,
  pub wir: String,
  pub sie: String,
}

impl PresentForms {
  pub fn form(&self, person: Person) -> &str {
    match person.table_key() {
      "ich" => &self.ich,
      "du" => &self.du,
      "er" => &self.er,
      "wir" => &self.wir,
      _ => &self.sie,
    }
  }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Verb {
  pub infinitive: String,
  /// Hungarian meaning, shown as the hint of past-tense items.
  pub meaning: String,
  pub participle: String,
  pub auxiliary: Auxiliary,
  pub present: PresentForms,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Pool {
  pub base: Vec<String>,
  #[serde(default)]
  pub extended: Vec<String>,
}

/// Sentence endings, drawn at random to vary the worksheets.
#[derive(Clone, Debug, Deserialize)]
pub struct Fillers {
  pub present: Vec<String>,
  pub modal: Vec<String>,
  /// Time adverbials without punctuation, placed before a participle.
  pub past: Vec<String>,
  /// Sentence endings that may follow a complete compound past.
  pub past_clause: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct VerbTable {
  pub auxiliaries: Auxiliaries,
  pub fillers: Fillers,
  pub pools: HashMap<String, Pool>,
  pub verbs: Vec<Verb>,
}

impl VerbTable {
  /// Parse the table embedded in the crate.
  pub fn builtin() -> Result<Self, WorksheetError> {
    Self::from_toml_str(BUILTIN_VERBS_TOML)
  }

  #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self, WorksheetError> {
    let raw = std::fs::read_to_string(path.as_ref())
      .map_err(|e| WorksheetError::table(format!("cannot read {}: {e}", path.as_ref().display())))?;
    Self::from_toml_str(&raw)
  }

  /// Parse and validate a TOML verb table.
  pub fn from_toml_str(raw: &str) -> Result<Self, WorksheetError> {
    let table: VerbTable = toml::from_str(raw).map_err(|e| WorksheetError::table(e.to_string()))?;
    table.validate()?;
    debug!(target: "worksheet", verbs = table.verbs.len(), pools = table.pools.len(), "Verb table loaded");
    Ok(table)
  }

  pub fn verb(&self, infinitive: &str) -> Option<&Verb> {
    self.verbs.iter().find(|v| v.infinitive == infinitive)
  }

  /// Candidate verbs for an exercise type. GRADE_2 appends the extended list.
  pub fn candidates(&self, exercise: ConjugationExercise, level: Level) -> Result<Vec<&Verb>, WorksheetError> {
    let pool = self
      .pools
      .get(exercise.key())
      .ok_or_else(|| WorksheetError::table(format!("no verb pool for '{}'", exercise.key())))?;
    let extended: &[String] = match level {
      Level::Grade1 => &[],
      Level::Grade2 => &pool.extended,
    };
    pool
      .base
      .iter()
      .chain(extended)
      .map(|name| {
        self
          .verb(name)
          .ok_or_else(|| WorksheetError::table(format!("pool '{}' names unknown verb '{name}'", exercise.key())))
      })
      .collect()
  }

  fn validate(&self) -> Result<(), WorksheetError> {
    for exercise in ConjugationExercise::ALL {
      let pool = self
        .pools
        .get(exercise.key())
        .ok_or_else(|| WorksheetError::table(format!("missing pool '{}'", exercise.key())))?;
      if pool.base.is_empty() {
        return Err(WorksheetError::table(format!("pool '{}' has no base verbs", exercise.key())));
      }
      for name in pool.base.iter().chain(&pool.extended) {
        if self.verb(name).is_none() {
          return Err(WorksheetError::table(format!(
            "pool '{}' names unknown verb '{name}'",
            exercise.key()
          )));
        }
      }
    }
    for (kind, list) in [
      ("present", &self.fillers.present),
      ("modal", &self.fillers.modal),
      ("past", &self.fillers.past),
      ("past_clause", &self.fillers.past_clause),
    ] {
      if list.is_empty() {
        return Err(WorksheetError::table(format!("no {kind} fillers")));
      }
    }
    Ok(())
  }
}

fn capitalize(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}
