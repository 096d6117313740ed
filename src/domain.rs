//! Domain models: problems, curriculum standards, mastery snapshots and answer types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Notation family a canonical/student answer is expected to follow.
/// Fixed when a problem is authored; never inferred from the student's input.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AnswerType {
  Number,
  Integer,
  Decimal,
  Fraction,
  Percent,
  Mixed,
  Multi,
  /// Any label outside the closed set. Verified with the expression fallback.
  Unrecognized(String),
}

impl AnswerType {
  pub fn as_str(&self) -> &str {
    match self {
      AnswerType::Number => "number",
      AnswerType::Integer => "integer",
      AnswerType::Decimal => "decimal",
      AnswerType::Fraction => "fraction",
      AnswerType::Percent => "percent",
      AnswerType::Mixed => "mixed",
      AnswerType::Multi => "multi",
      AnswerType::Unrecognized(label) => label,
    }
  }

  pub fn parse(label: &str) -> Self {
    match label.trim().to_ascii_lowercase().as_str() {
      "number" => AnswerType::Number,
      "integer" => AnswerType::Integer,
      "decimal" => AnswerType::Decimal,
      "fraction" => AnswerType::Fraction,
      "percent" => AnswerType::Percent,
      "mixed" => AnswerType::Mixed,
      "multi" => AnswerType::Multi,
      _ => AnswerType::Unrecognized(label.to_string()),
    }
  }
}

impl fmt::Display for AnswerType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl Serialize for AnswerType {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.as_str())
  }
}

impl<'de> Deserialize<'de> for AnswerType {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let label = String::deserialize(deserializer)?;
    Ok(AnswerType::parse(&label))
  }
}

/// Authored practice problem. Read-only to the core.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
  pub id: String,
  pub grade: u8,
  pub standard_id: String,
  pub difficulty: u8, // 1..=5
  pub prompt: String,
  pub canonical_answer: String,
  #[serde(default)] pub canonical_equation: Option<String>,
  pub answer_type: AnswerType,
}

impl Problem {
  pub fn pool_entry(&self) -> PoolEntry {
    PoolEntry {
      id: self.id.clone(),
      standard_id: self.standard_id.clone(),
      difficulty: self.difficulty,
    }
  }
}

/// The slice of a problem the session builder needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolEntry {
  pub id: String,
  pub standard_id: String,
  pub difficulty: u8,
}

/// Rolling per-(learner, standard) performance snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasteryRecord {
  pub standard_id: String,
  pub accuracy_rolling: f64, // 0..=100
  pub attempts_count: u32,
}

/// Curriculum unit problems are tagged with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standard {
  pub id: String,
  pub code: String,
  pub grade: u8,
  pub domain: String,
  pub description: String,
}

/// Subscription tier; decides how many problems a session holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlanTier {
  #[default]
  Free,
  Pro,
  ProPlus,
}
