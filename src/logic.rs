//! Request-level behaviors behind the HTTP handlers:
//!   - Starting a session (pool lookup by grade, plan sizing, adaptive selection)
//!   - Checking a submitted answer against the problem bank
//!   - Building the standards breakdown for a grade

use rand::Rng;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::mastery::standards_breakdown;
use crate::protocol::{BreakdownIn, BreakdownOut, SessionIn, SessionOut, VerifyIn, VerifyOut};
use crate::session::{build_session, number_slots};
use crate::state::AppState;
use crate::verify::verify_submission;

#[instrument(level = "info", skip(state, req, rng), fields(grade = req.grade, plan = ?req.plan, mastery_len = req.mastery.len()))]
pub fn start_session<R: Rng + ?Sized>(state: &AppState, req: &SessionIn, rng: &mut R) -> Result<SessionOut, ApiError> {
  let target = state.plans.problems_per_session(req.plan);
  let pool = state.pool_for_grade(req.grade);
  let selection = build_session(&pool, &req.mastery, target, rng)?;
  let problems = number_slots(&selection);
  let session_id = Uuid::new_v4().to_string();

  info!(target: "session", %session_id, grade = req.grade, target, selected = problems.len(), "Session built");
  Ok(SessionOut { session_id, target_problem_count: target, problems })
}

#[instrument(level = "info", skip(state, req), fields(problem_id = %req.problem_id, answer_len = req.final_answer.len()))]
pub fn check_answer(state: &AppState, req: &VerifyIn) -> Result<VerifyOut, ApiError> {
  if req.final_answer.trim().is_empty() {
    return Err(ApiError::validation("finalAnswer must not be empty"));
  }
  let problem = state
    .get_problem(&req.problem_id)
    .ok_or_else(|| ApiError::not_found("Problem not found"))?;

  let result = verify_submission(
    &req.final_answer,
    req.final_equation.as_deref(),
    &problem.canonical_answer,
    problem.canonical_equation.as_deref(),
    &problem.answer_type,
  );
  info!(
    target: "verify",
    problem_id = %problem.id,
    is_correct = result.verification.is_correct,
    equation_correct = result.equation_correct,
    "Answer checked"
  );
  Ok(result.into())
}

#[instrument(level = "info", skip(state, req), fields(grade = req.grade))]
pub fn breakdown(state: &AppState, req: &BreakdownIn) -> BreakdownOut {
  let standards = state.standards_for_grade(req.grade);
  let b = standards_breakdown(&standards, &req.mastery);
  BreakdownOut {
    grade: req.grade,
    mastered: b.mastered,
    progressing: b.progressing,
    needs_work: b.needs_work,
    not_started: b.not_started,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{MasteryRecord, PlanTier};
  use axum::http::StatusCode;
  use rand::SeedableRng;
  use rand_chacha::ChaCha8Rng;

  fn state() -> AppState {
    AppState::from_config(None)
  }

  #[test]
  fn session_size_follows_plan() {
    let s = state();
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let free = start_session(&s, &SessionIn { grade: 6, plan: PlanTier::Free, mastery: vec![] }, &mut rng).expect("free");
    assert_eq!(free.problems.len(), 3);
    let pro = start_session(&s, &SessionIn { grade: 6, plan: PlanTier::Pro, mastery: vec![] }, &mut rng).expect("pro");
    assert_eq!(pro.problems.len(), 8);
    assert_eq!(pro.target_problem_count, 8);
    assert!(pro.problems.iter().enumerate().all(|(i, slot)| slot.position == i));
  }

  #[test]
  fn target_count_reports_plan_size_when_pool_is_smaller() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let out = start_session(&state(), &SessionIn { grade: 8, plan: PlanTier::ProPlus, mastery: vec![] }, &mut rng)
      .expect("pro plus");
    assert_eq!(out.problems.len(), 6);
    assert_eq!(out.target_problem_count, 15);
  }

  #[test]
  fn grade_without_problems_is_not_found() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let err = start_session(&state(), &SessionIn { grade: 3, plan: PlanTier::Free, mastery: vec![] }, &mut rng)
      .expect_err("empty pool");
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
  }

  #[test]
  fn check_answer_reports_equation_separately() {
    let out = check_answer(&state(), &VerifyIn {
      problem_id: "g6-ee-1".into(),
      final_answer: "15".into(),
      final_equation: Some("20 = x + 5".into()),
    })
    .expect("verify");
    assert!(out.is_correct);
    assert!(out.details.equation_correct);

    let out = check_answer(&state(), &VerifyIn {
      problem_id: "g6-ee-1".into(),
      final_answer: "15".into(),
      final_equation: Some("x - 5 = 20".into()),
    })
    .expect("verify");
    assert!(out.is_correct);
    assert!(!out.details.equation_correct);
  }

  #[test]
  fn unknown_problem_and_blank_answer_are_rejected() {
    let err = check_answer(&state(), &VerifyIn { problem_id: "nope".into(), final_answer: "1".into(), final_equation: None })
      .expect_err("unknown");
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
    let err = check_answer(&state(), &VerifyIn { problem_id: "g6-ee-1".into(), final_answer: "  ".into(), final_equation: None })
      .expect_err("blank");
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
  }

  #[test]
  fn breakdown_covers_grade_standards() {
    let out = breakdown(&state(), &BreakdownIn {
      grade: 8,
      mastery: vec![MasteryRecord { standard_id: "8.EE.C.7".into(), accuracy_rolling: 92.0, attempts_count: 7 }],
    });
    assert_eq!(out.mastered.len(), 1);
    assert_eq!(out.not_started.len(), 3);
  }
}
