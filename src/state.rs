//! Application state: the problem bank indexed by id and grade, standards, and plan table.
//!
//! Built once at startup from config + built-in seeds and read-only afterwards,
//! so handlers share it through an `Arc` without locking.

use std::collections::HashMap;

use tracing::{info, instrument, warn};

use crate::config::{load_coach_config_from_env, CoachConfig};
use crate::domain::{PoolEntry, Problem, Standard};
use crate::plans::PlanTable;
use crate::seeds::{seed_problems, seed_standards};

#[derive(Clone, Debug, Default)]
pub struct AppState {
  pub by_id: HashMap<String, Problem>,
  pub by_grade: HashMap<u8, Vec<String>>,
  pub standards: Vec<Standard>,
  pub plans: PlanTable,
}

impl AppState {
  /// Build state from env: load config, merge with seeds, build indices.
  #[instrument(level = "info", skip_all)]
  pub fn new() -> Self {
    Self::from_config(load_coach_config_from_env())
  }

  pub fn from_config(cfg: Option<CoachConfig>) -> Self {
    let mut state = Self::default();

    if let Some(cfg) = cfg {
      state.plans = PlanTable::default().with_overrides(&cfg.plans);
      for s in cfg.standards {
        state.insert_standard(s.into_standard());
      }
      for p in cfg.problems.into_iter().filter_map(|p| p.into_problem()) {
        state.insert_problem(p);
      }
    }

    // Always add built-in seeds, but don't overwrite configured ids.
    for s in seed_standards() {
      if !state.standards.iter().any(|x| x.id == s.id) {
        state.standards.push(s);
      }
    }
    for p in seed_problems() {
      if !state.by_id.contains_key(&p.id) {
        state.insert_problem(p);
      }
    }

    let mut grades: Vec<_> = state.by_grade.iter().map(|(g, ids)| (*g, ids.len())).collect();
    grades.sort_unstable();
    for (grade, problems) in grades {
      info!(target: "coach_backend", grade, problems, "Startup problem inventory");
    }
    state
  }

  fn insert_standard(&mut self, s: Standard) {
    match self.standards.iter_mut().find(|x| x.id == s.id) {
      Some(existing) => *existing = s,
      None => self.standards.push(s),
    }
  }

  /// Insert a problem into both indices; a repeated id replaces the earlier entry.
  pub fn insert_problem(&mut self, p: Problem) {
    if let Some(old) = self.by_id.remove(&p.id) {
      warn!(target: "coach_backend", id = %p.id, "Replacing problem with duplicate id");
      if let Some(ids) = self.by_grade.get_mut(&old.grade) {
        ids.retain(|id| id != &old.id);
      }
    }
    self.by_grade.entry(p.grade).or_default().push(p.id.clone());
    self.by_id.insert(p.id.clone(), p);
  }

  pub fn get_problem(&self, id: &str) -> Option<&Problem> {
    self.by_id.get(id)
  }

  /// Candidate pool for a grade, in insertion order.
  pub fn pool_for_grade(&self, grade: u8) -> Vec<PoolEntry> {
    self.by_grade
      .get(&grade)
      .map(|ids| ids.iter().filter_map(|id| self.by_id.get(id)).map(Problem::pool_entry).collect())
      .unwrap_or_default()
  }

  pub fn standards_for_grade(&self, grade: u8) -> Vec<Standard> {
    self.standards.iter().filter(|s| s.grade == grade).cloned().collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::parse_config;
  use crate::domain::PlanTier;

  #[test]
  fn seeds_populate_every_grade() {
    let state = AppState::from_config(None);
    for grade in [6, 7, 8] {
      assert!(!state.pool_for_grade(grade).is_empty());
      assert!(!state.standards_for_grade(grade).is_empty());
    }
    assert!(state.pool_for_grade(5).is_empty());
  }

  #[test]
  fn config_entries_win_over_seeds() {
    let cfg = parse_config(
      r#"
[plans.free]
problems_per_session = 4

[[problems]]
id = "g6-ee-1"
grade = 7
standard = "7.EE.B.4"
difficulty = 1
prompt = "Moved"
answer_type = "integer"
canonical_answer = "1"
"#,
    )
    .expect("config");
    let state = AppState::from_config(Some(cfg));
    assert_eq!(state.get_problem("g6-ee-1").map(|p| p.grade), Some(7));
    assert!(state.pool_for_grade(6).iter().all(|e| e.id != "g6-ee-1"));
    assert_eq!(state.plans.problems_per_session(PlanTier::Free), 4);
  }
}
