// goal.rs — Goal: a user-defined task with a fixed reward.
//
// A goal has two states, Incomplete and Completed, and moves between them
// only through `GoalStore::toggle_goal`. Deletion removes the goal from the
// store rather than marking it.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Reward (in minutes) used when the caller does not supply one.
pub const DEFAULT_REWARD: u32 = 15;

/// Opaque goal identifier.
///
/// Persisted as a plain JSON string, so ids written by older sessions load
/// unchanged whatever their shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalId(String);

impl GoalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GoalId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The completion state of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalStatus {
    Incomplete,
    Completed,
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalStatus::Incomplete => write!(f, "incomplete"),
            GoalStatus::Completed => write!(f, "completed"),
        }
    }
}

/// A goal record.
///
/// The serialized shape is `{id, title, completed, playTimeReward}`, which is
/// what the `"goals"` persistence key holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,

    /// Display text, non-empty after trimming.
    pub title: String,

    pub completed: bool,

    /// Minutes of play time earned when the goal is completed.
    #[serde(rename = "playTimeReward")]
    pub reward: u32,
}

impl Goal {
    /// Create an incomplete goal.
    pub fn new(id: GoalId, title: impl Into<String>, reward: u32) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
            reward,
        }
    }

    pub fn status(&self) -> GoalStatus {
        if self.completed {
            GoalStatus::Completed
        } else {
            GoalStatus::Incomplete
        }
    }
}

/// Issues goal ids as decimal epoch-millisecond strings.
///
/// Two ids requested within the same millisecond would collide if taken
/// straight from the clock, so each id is at least one greater than the
/// last one issued. Once the numeric range is used up (a loaded id of
/// `i64::MAX`), ids become `<now>-<n>` with a counter that never repeats.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last_issued: i64,
    exhausted: bool,
    suffix: u64,
}

impl IdGenerator {
    /// Seed the generator past every numeric id already in use.
    pub fn seeded_from<'a>(existing: impl IntoIterator<Item = &'a GoalId>) -> Self {
        let last_issued = existing
            .into_iter()
            .filter_map(|id| id.as_str().parse::<i64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            last_issued,
            ..Self::default()
        }
    }

    /// Issue the next id using the current wall clock.
    pub fn next_id(&mut self) -> GoalId {
        self.next_id_at(Utc::now().timestamp_millis())
    }

    /// Issue the next id as if the clock read `now_millis`.
    pub fn next_id_at(&mut self, now_millis: i64) -> GoalId {
        if !self.exhausted {
            if let Some(next) = self.last_issued.checked_add(1) {
                let candidate = now_millis.max(next);
                self.last_issued = candidate;
                return GoalId(candidate.to_string());
            }
            self.exhausted = true;
        }
        self.suffix += 1;
        GoalId(format!("{}-{}", now_millis, self.suffix))
    }
}
