use crate::store::CounterStore;
use crate::PanelError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Count at which an action's badge unlocks.
pub const BADGE_THRESHOLD: u64 = 5;

/// Recorded by the dashboard on every page load.
pub const PAGE_LOAD_ACTION: &str = "pageLoad";
pub const SAVE_JUSTIFICATION_ACTION: &str = "saveJustification";
pub const EXPORT_REPORT_ACTION: &str = "exportReport";

/// When `record_action` reports a badge.
#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
pub enum BadgePolicy {
    /// Only on the transition to exactly `BADGE_THRESHOLD`.
    #[default]
    #[serde(rename = "once")]
    OnceAtThreshold,
    /// On every record whose new count is at or above `BADGE_THRESHOLD`.
    #[serde(rename = "every")]
    EveryTimeAtOrAbove,
}

impl BadgePolicy {
    pub fn unlocks(self, new_count: u64) -> bool {
        match self {
            BadgePolicy::OnceAtThreshold => new_count == BADGE_THRESHOLD,
            BadgePolicy::EveryTimeAtOrAbove => new_count >= BADGE_THRESHOLD,
        }
    }
}

/// Action name to trigger count. Entries are never removed.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissionCounters(BTreeMap<String, u64>);

impl MissionCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for `action`; absent keys read as zero.
    pub fn get(&self, action: &str) -> u64 {
        self.0.get(action).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json(&self) -> Result<String, PanelError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse persisted counters. Anything that is not an object of
    /// non-negative integers comes back as an empty mapping.
    pub fn from_json_lossy(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(counters) => counters,
            Err(e) => {
                log::warn!("discarding malformed mission counters: {e}");
                Self::default()
            }
        }
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for MissionCounters {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Increment `action` by one and report whether its badge unlocked.
pub fn record_action(
    action: &str,
    mut counters: MissionCounters,
    policy: BadgePolicy,
) -> (MissionCounters, bool) {
    let count = counters.0.entry(action.to_string()).or_insert(0);
    *count = count.saturating_add(1);
    let unlocked = policy.unlocks(*count);
    (counters, unlocked)
}

/// The two counters the mission panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissionSummary {
    pub justification_saves: u64,
    pub report_exports: u64,
}

impl MissionSummary {
    pub fn from_counters(counters: &MissionCounters) -> Self {
        Self {
            justification_saves: counters.get(SAVE_JUSTIFICATION_ACTION),
            report_exports: counters.get(EXPORT_REPORT_ACTION),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    pub action: String,
    pub count: u64,
    pub badge_unlocked: bool,
}

/// Counters bound to a store entry; every record is written back in full.
pub struct MissionTracker<S: CounterStore> {
    store: S,
    key: String,
    policy: BadgePolicy,
    counters: MissionCounters,
}

impl<S: CounterStore> MissionTracker<S> {
    /// Load counters from `key`. Unreadable or malformed state starts empty.
    pub fn load(store: S, key: impl Into<String>, policy: BadgePolicy) -> Self {
        let key = key.into();
        let counters = match store.read(&key) {
            Ok(Some(raw)) => MissionCounters::from_json_lossy(&raw),
            Ok(None) => MissionCounters::default(),
            Err(e) => {
                log::warn!("could not read {key}: {e}");
                MissionCounters::default()
            }
        };
        log::debug!("loaded {} mission counters from {key}", counters.len());
        Self {
            store,
            key,
            policy,
            counters,
        }
    }

    pub fn record(&mut self, action: &str) -> Result<RecordOutcome, PanelError> {
        let (counters, badge_unlocked) =
            record_action(action, std::mem::take(&mut self.counters), self.policy);
        self.counters = counters;
        self.store.write(&self.key, &self.counters.to_json()?)?;

        let count = self.counters.get(action);
        if badge_unlocked {
            log::info!("badge unlocked for {action} at {count}");
        }
        Ok(RecordOutcome {
            action: action.to_string(),
            count,
            badge_unlocked,
        })
    }

    pub fn page_load(&mut self) -> Result<RecordOutcome, PanelError> {
        self.record(PAGE_LOAD_ACTION)
    }

    pub fn counters(&self) -> &MissionCounters {
        &self.counters
    }

    pub fn summary(&self) -> MissionSummary {
        MissionSummary::from_counters(&self.counters)
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
