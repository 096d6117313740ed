//! Loading service configuration (plan overrides + optional standards/problem bank) from TOML.
//!
//! Example:
//! ```toml
//! [plans.pro]
//! problems_per_session = 10
//!
//! [[standards]]
//! code = "6.SP.A.1"
//! grade = 6
//! domain = "SP"
//! description = "Recognize a statistical question"
//!
//! [[problems]]
//! grade = 6
//! standard = "6.SP.A.1"
//! difficulty = 2
//! prompt = "..."
//! answer_type = "integer"
//! canonical_answer = "12"
//! ```

use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::{AnswerType, Problem, Standard};
use crate::plans::PlanOverrides;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct CoachConfig {
  #[serde(default)]
  pub plans: PlanOverrides,
  #[serde(default)]
  pub standards: Vec<StandardCfg>,
  #[serde(default)]
  pub problems: Vec<ProblemCfg>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StandardCfg {
  #[serde(default)] pub id: Option<String>,
  pub code: String,
  pub grade: u8,
  pub domain: String,
  #[serde(default)] pub description: String,
}

impl StandardCfg {
  pub fn into_standard(self) -> Standard {
    Standard {
      id: self.id.unwrap_or_else(|| self.code.clone()),
      code: self.code,
      grade: self.grade,
      domain: self.domain,
      description: self.description,
    }
  }
}

/// Problem entry accepted in TOML configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct ProblemCfg {
  #[serde(default)] pub id: Option<String>,
  pub grade: u8,
  pub standard: String,
  pub difficulty: u8,
  pub prompt: String,
  pub answer_type: AnswerType,
  pub canonical_answer: String,
  #[serde(default)] pub canonical_equation: Option<String>,
}

impl ProblemCfg {
  /// `None` when the entry can't be served (difficulty outside 1..=5 or empty answer).
  pub fn into_problem(self) -> Option<Problem> {
    let id = self.id.unwrap_or_else(|| Uuid::new_v4().to_string());
    if !(1..=5).contains(&self.difficulty) {
      error!(target: "coach_backend", %id, difficulty = self.difficulty, "Skipping bank problem: difficulty must be 1..=5.");
      return None;
    }
    if self.canonical_answer.trim().is_empty() {
      error!(target: "coach_backend", %id, "Skipping bank problem: missing canonical answer.");
      return None;
    }
    Some(Problem {
      id,
      grade: self.grade,
      standard_id: self.standard,
      difficulty: self.difficulty,
      prompt: self.prompt,
      canonical_answer: self.canonical_answer,
      canonical_equation: self.canonical_equation.filter(|e| !e.trim().is_empty()),
      answer_type: self.answer_type,
    })
  }
}

pub fn parse_config(s: &str) -> Result<CoachConfig, toml::de::Error> {
  toml::from_str::<CoachConfig>(s)
}

/// Attempt to load `CoachConfig` from COACH_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_coach_config_from_env() -> Option<CoachConfig> {
  let path = std::env::var("COACH_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_config(&s) {
      Ok(cfg) => {
        info!(target: "coach_backend", %path, standards = cfg.standards.len(), problems = cfg.problems.len(), "Loaded coach config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "coach_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "coach_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
