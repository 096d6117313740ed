//! Plan tiers and the session size each one gets.

use serde::{Deserialize, Serialize};

use crate::domain::PlanTier;

/// Limits attached to one tier. `None` daily sessions means unlimited.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanLimits {
  pub name: String,
  pub problems_per_session: usize,
  pub max_child_profiles: u32,
  #[serde(default)] pub daily_sessions: Option<u32>,
}

/// Partial override read from configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PlanOverride {
  #[serde(default)] pub problems_per_session: Option<usize>,
  #[serde(default)] pub max_child_profiles: Option<u32>,
  #[serde(default)] pub daily_sessions: Option<u32>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PlanOverrides {
  #[serde(default)] pub free: Option<PlanOverride>,
  #[serde(default)] pub pro: Option<PlanOverride>,
  #[serde(default)] pub pro_plus: Option<PlanOverride>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanTable {
  pub free: PlanLimits,
  pub pro: PlanLimits,
  pub pro_plus: PlanLimits,
}

impl Default for PlanTable {
  fn default() -> Self {
    Self {
      free: PlanLimits { name: "Free".into(), problems_per_session: 3, max_child_profiles: 1, daily_sessions: Some(1) },
      pro: PlanLimits { name: "Pro".into(), problems_per_session: 8, max_child_profiles: 3, daily_sessions: None },
      pro_plus: PlanLimits { name: "Pro+".into(), problems_per_session: 15, max_child_profiles: 10, daily_sessions: None },
    }
  }
}

impl PlanTable {
  pub fn limits(&self, tier: PlanTier) -> &PlanLimits {
    match tier {
      PlanTier::Free => &self.free,
      PlanTier::Pro => &self.pro,
      PlanTier::ProPlus => &self.pro_plus,
    }
  }

  /// Target size of a session for `tier`.
  pub fn problems_per_session(&self, tier: PlanTier) -> usize {
    self.limits(tier).problems_per_session
  }

  /// Apply configured overrides. A zero session size is ignored.
  pub fn with_overrides(mut self, o: &PlanOverrides) -> Self {
    for (limits, ov) in [(&mut self.free, &o.free), (&mut self.pro, &o.pro), (&mut self.pro_plus, &o.pro_plus)] {
      let Some(ov) = ov else { continue };
      if let Some(n) = ov.problems_per_session.filter(|n| *n > 0) { limits.problems_per_session = n; }
      if let Some(n) = ov.max_child_profiles { limits.max_child_profiles = n; }
      if ov.daily_sessions.is_some() { limits.daily_sessions = ov.daily_sessions; }
    }
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_session_sizes_per_tier() {
    let t = PlanTable::default();
    assert_eq!(t.problems_per_session(PlanTier::Free), 3);
    assert_eq!(t.problems_per_session(PlanTier::Pro), 8);
    assert_eq!(t.problems_per_session(PlanTier::ProPlus), 15);
  }

  #[test]
  fn overrides_replace_only_given_fields() {
    let o: PlanOverrides = toml::from_str("[pro]\nproblems_per_session = 10\n[free]\nproblems_per_session = 0\n").expect("toml");
    let t = PlanTable::default().with_overrides(&o);
    assert_eq!(t.problems_per_session(PlanTier::Pro), 10);
    assert_eq!(t.limits(PlanTier::Pro).max_child_profiles, 3);
    assert_eq!(t.problems_per_session(PlanTier::Free), 3);
  }
}
