//! Public request/response structs for the HTTP endpoints (serde ready, camelCase on the wire).

use serde::{Deserialize, Serialize};

use crate::domain::{MasteryRecord, PlanTier, Standard};
use crate::mastery::StandardProgress;
use crate::session::SessionSlot;
use crate::verify::{ComparisonMethod, ParsedAnswer, SubmissionResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionIn {
  pub grade: u8,
  #[serde(default)] pub plan: PlanTier,
  #[serde(default)] pub mastery: Vec<MasteryRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOut {
  pub session_id: String,
  pub problems: Vec<SessionSlot>,
  pub target_problem_count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyIn {
  pub problem_id: String,
  pub final_answer: String,
  #[serde(default)] pub final_equation: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyDetailsOut {
  pub method: ComparisonMethod,
  pub canonical_answer: String,
  pub parsed_student_answer: Option<ParsedAnswer>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
  pub equation_correct: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOut {
  pub is_correct: bool,
  pub details: VerifyDetailsOut,
}

impl From<SubmissionResult> for VerifyOut {
  fn from(r: SubmissionResult) -> Self {
    let d = r.verification.details;
    VerifyOut {
      is_correct: r.verification.is_correct,
      details: VerifyDetailsOut {
        method: d.method,
        canonical_answer: d.canonical_answer,
        parsed_student_answer: d.parsed_student_answer,
        message: d.message,
        equation_correct: r.equation_correct,
      },
    }
  }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownIn {
  pub grade: u8,
  #[serde(default)] pub mastery: Vec<MasteryRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownOut {
  pub grade: u8,
  pub mastered: Vec<StandardProgress>,
  pub progressing: Vec<StandardProgress>,
  pub needs_work: Vec<StandardProgress>,
  pub not_started: Vec<Standard>,
}

#[derive(Serialize)]
pub struct HealthOut {
  pub ok: bool,
}
