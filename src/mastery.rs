//! Progress summaries derived from mastery snapshots: per-standard trend and the
//! mastered / progressing / needs-work / not-started breakdown shown to parents.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{MasteryRecord, Standard};

const MASTERED_ACCURACY: f64 = 80.0;
const MASTERED_ATTEMPTS: u32 = 5;
const PROGRESSING_ACCURACY: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
  Improving,
  Stable,
  Struggling,
}

/// Too few attempts always reads as stable.
pub fn trend(accuracy: f64, attempts: u32) -> Trend {
  if attempts < 3 {
    Trend::Stable
  } else if accuracy >= 80.0 {
    Trend::Improving
  } else if accuracy <= 40.0 {
    Trend::Struggling
  } else {
    Trend::Stable
  }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardProgress {
  pub standard_id: String,
  pub code: String,
  pub domain: String,
  pub description: String,
  pub attempts_count: u32,
  pub accuracy: f64,
  pub trend: Trend,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardsBreakdown {
  pub mastered: Vec<StandardProgress>,
  pub progressing: Vec<StandardProgress>,
  pub needs_work: Vec<StandardProgress>,
  pub not_started: Vec<Standard>,
}

/// Bucket every standard by the learner's mastery of it, in `standards` order.
pub fn standards_breakdown(standards: &[Standard], mastery: &[MasteryRecord]) -> StandardsBreakdown {
  let by_standard: HashMap<&str, &MasteryRecord> =
    mastery.iter().map(|m| (m.standard_id.as_str(), m)).collect();

  let mut out = StandardsBreakdown::default();
  for standard in standards {
    let Some(m) = by_standard.get(standard.id.as_str()) else {
      out.not_started.push(standard.clone());
      continue;
    };

    let progress = StandardProgress {
      standard_id: standard.id.clone(),
      code: standard.code.clone(),
      domain: standard.domain.clone(),
      description: standard.description.clone(),
      attempts_count: m.attempts_count,
      accuracy: m.accuracy_rolling,
      trend: trend(m.accuracy_rolling, m.attempts_count),
    };

    if m.accuracy_rolling >= MASTERED_ACCURACY && m.attempts_count >= MASTERED_ATTEMPTS {
      out.mastered.push(progress);
    } else if m.accuracy_rolling >= PROGRESSING_ACCURACY || m.attempts_count < MASTERED_ATTEMPTS {
      out.progressing.push(progress);
    } else {
      out.needs_work.push(progress);
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  fn standard(id: &str) -> Standard {
    Standard { id: id.into(), code: id.into(), grade: 6, domain: "RP".into(), description: String::new() }
  }

  fn record(id: &str, accuracy: f64, attempts: u32) -> MasteryRecord {
    MasteryRecord { standard_id: id.into(), accuracy_rolling: accuracy, attempts_count: attempts }
  }

  #[test]
  fn trend_needs_three_attempts() {
    assert_eq!(trend(10.0, 2), Trend::Stable);
    assert_eq!(trend(85.0, 3), Trend::Improving);
    assert_eq!(trend(40.0, 9), Trend::Struggling);
    assert_eq!(trend(60.0, 9), Trend::Stable);
  }

  #[test]
  fn breakdown_buckets_each_standard_once() {
    let standards = vec![standard("a"), standard("b"), standard("c"), standard("d"), standard("e")];
    let mastery = vec![
      record("a", 90.0, 6),  // mastered
      record("b", 90.0, 4),  // too few attempts to be mastered
      record("c", 30.0, 2),  // low but still early
      record("d", 30.0, 10), // needs work
    ];
    let b = standards_breakdown(&standards, &mastery);
    assert_eq!(b.mastered.iter().map(|p| p.standard_id.as_str()).collect::<Vec<_>>(), vec!["a"]);
    assert_eq!(b.progressing.iter().map(|p| p.standard_id.as_str()).collect::<Vec<_>>(), vec!["b", "c"]);
    assert_eq!(b.needs_work[0].trend, Trend::Struggling);
    assert_eq!(b.not_started, vec![standard("e")]);
  }
}
