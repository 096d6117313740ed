//! Adaptive practice-session builder.
//!
//! Flow:
//! 1) Every candidate gets a priority from the learner's mastery of its standard
//!    (weak or under-practiced standards rank higher, unattempted ones highest),
//!    plus a small random jitter so identical snapshots don't produce identical sessions.
//! 2) A first pass over the ranked list takes one problem per unseen standard.
//! 3) A second pass fills any remaining slots, allowing standard repeats.
//! 4) The selection is returned easiest-first.
//!
//! The builder is pure apart from the injected `Rng`.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::{MasteryRecord, PoolEntry};

/// Score given to a standard the learner has never attempted.
pub const NOVELTY_SCORE: f64 = 100.0;
/// Upper bound (exclusive) of the random jitter added to every score.
pub const JITTER_MAX: f64 = 20.0;
/// Attempts after which under-practice stops contributing to the score.
const PRACTICE_SATURATION: u32 = 20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
  #[error("no problems available to build a session from")]
  EmptyPool,
}

/// One numbered slot of a built session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSlot {
  pub problem_id: String,
  pub position: usize,
}

/// Deterministic part of a candidate's priority.
pub fn priority_score(mastery: Option<&MasteryRecord>) -> f64 {
  match mastery {
    None => NOVELTY_SCORE,
    Some(m) => {
      let weakness = (100.0 - m.accuracy_rolling) * 0.5;
      let under_practice = PRACTICE_SATURATION.saturating_sub(m.attempts_count) as f64 * 2.0;
      weakness + under_practice
    }
  }
}

/// Choose up to `target_count` distinct problems from `pool`, sorted ascending by difficulty.
///
/// Returns fewer than `target_count` problems when the pool is smaller; never pads with duplicates.
#[instrument(level = "info", skip(pool, mastery, rng), fields(pool_len = pool.len(), mastery_len = mastery.len()))]
pub fn build_session<R: Rng + ?Sized>(
  pool: &[PoolEntry],
  mastery: &[MasteryRecord],
  target_count: usize,
  rng: &mut R,
) -> Result<Vec<PoolEntry>, SessionError> {
  if pool.is_empty() {
    return Err(SessionError::EmptyPool);
  }

  // Later records for the same standard win.
  let by_standard: HashMap<&str, &MasteryRecord> =
    mastery.iter().map(|m| (m.standard_id.as_str(), m)).collect();

  let mut scored: Vec<(f64, &PoolEntry)> = pool
    .iter()
    .map(|entry| {
      let base = priority_score(by_standard.get(entry.standard_id.as_str()).copied());
      (base + rng.gen_range(0.0..JITTER_MAX), entry)
    })
    .collect();
  scored.sort_by(|a, b| b.0.total_cmp(&a.0));

  let mut selected: Vec<&PoolEntry> = Vec::with_capacity(target_count.min(pool.len()));
  let mut used_ids: HashSet<&str> = HashSet::new();
  let mut used_standards: HashSet<&str> = HashSet::new();

  for (_, entry) in &scored {
    if selected.len() >= target_count { break; }
    if used_standards.contains(entry.standard_id.as_str()) || used_ids.contains(entry.id.as_str()) {
      continue;
    }
    used_standards.insert(&entry.standard_id);
    used_ids.insert(&entry.id);
    selected.push(*entry);
  }
  let diverse = selected.len();

  for (_, entry) in &scored {
    if selected.len() >= target_count { break; }
    if used_ids.insert(&entry.id) {
      selected.push(*entry);
    }
  }

  debug!(
    target: "session",
    selected = selected.len(),
    distinct_standards = used_standards.len(),
    first_pass = diverse,
    "Session selection done"
  );

  let mut out: Vec<PoolEntry> = selected.into_iter().cloned().collect();
  out.sort_by_key(|e| e.difficulty);
  Ok(out)
}

/// Number a selection for storage, preserving its order.
pub fn number_slots(selection: &[PoolEntry]) -> Vec<SessionSlot> {
  selection
    .iter()
    .enumerate()
    .map(|(position, e)| SessionSlot { problem_id: e.id.clone(), position })
    .collect()
}
