// events.rs — Change events and observer dispatch.
//
// Every applied mutation of a GoalStore emits one GoalEvent. Observers
// subscribe to the store's dispatcher; a failing observer is logged and
// skipped so it can never block or undo a mutation.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GoalError;
use crate::goal::{Goal, GoalId};

/// Events emitted by the goal store after a mutation is applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum GoalEvent {
    /// A goal was appended.
    GoalAdded {
        goal_id: GoalId,
        title: String,
        reward: u32,
        timestamp: DateTime<Utc>,
    },

    /// A goal's completed flag flipped.
    GoalToggled {
        goal_id: GoalId,
        completed: bool,
        balance: u64,
        timestamp: DateTime<Utc>,
    },

    /// A goal was removed.
    GoalDeleted {
        goal_id: GoalId,
        was_completed: bool,
        balance: u64,
        timestamp: DateTime<Utc>,
    },

    /// The balance was reset to zero.
    BalanceReset {
        previous_balance: u64,
        timestamp: DateTime<Utc>,
    },
}

impl GoalEvent {
    /// Get the event type name as a string.
    pub fn event_type(&self) -> &str {
        match self {
            GoalEvent::GoalAdded { .. } => "goal_added",
            GoalEvent::GoalToggled { .. } => "goal_toggled",
            GoalEvent::GoalDeleted { .. } => "goal_deleted",
            GoalEvent::BalanceReset { .. } => "balance_reset",
        }
    }

    pub fn goal_added(goal: &Goal) -> Self {
        GoalEvent::GoalAdded {
            goal_id: goal.id.clone(),
            title: goal.title.clone(),
            reward: goal.reward,
            timestamp: Utc::now(),
        }
    }

    pub fn goal_toggled(goal: &Goal, balance: u64) -> Self {
        GoalEvent::GoalToggled {
            goal_id: goal.id.clone(),
            completed: goal.completed,
            balance,
            timestamp: Utc::now(),
        }
    }

    pub fn goal_deleted(goal: &Goal, balance: u64) -> Self {
        GoalEvent::GoalDeleted {
            goal_id: goal.id.clone(),
            was_completed: goal.completed,
            balance,
            timestamp: Utc::now(),
        }
    }

    pub fn balance_reset(previous_balance: u64) -> Self {
        GoalEvent::BalanceReset {
            previous_balance,
            timestamp: Utc::now(),
        }
    }
}

/// Receives events from a goal store.
pub trait GoalObserver {
    /// Handle an event. Errors are logged but don't affect the store.
    fn notify(&self, event: &GoalEvent) -> Result<(), GoalError>;
}

/// Appends events as JSON lines to an activity log.
pub struct JsonlObserver {
    path: PathBuf,
}

impl JsonlObserver {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl GoalObserver for JsonlObserver {
    fn notify(&self, event: &GoalEvent) -> Result<(), GoalError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| GoalError::IoError {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| GoalError::IoError {
                path: self.path.display().to_string(),
                source,
            })?;

        let json = serde_json::to_string(event)?;
        writeln!(file, "{}", json).map_err(|source| GoalError::IoError {
            path: self.path.display().to_string(),
            source,
        })?;

        Ok(())
    }
}

/// Fans events out to every subscribed observer.
#[derive(Default)]
pub struct EventDispatcher {
    observers: Vec<Box<dyn GoalObserver>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Box<dyn GoalObserver>) {
        self.observers.push(observer);
    }

    /// Dispatch an event to all observers.
    pub fn dispatch(&self, event: &GoalEvent) {
        for observer in &self.observers {
            if let Err(e) = observer.notify(event) {
                tracing::warn!("goal observer error on {}: {}", event.event_type(), e);
            }
        }
    }
}
