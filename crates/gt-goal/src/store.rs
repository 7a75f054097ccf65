// store.rs — GoalStore: goal lifecycle and reward-balance bookkeeping.
//
// The store owns the goal list and the earned balance. It is loaded once
// from an injected PersistenceAdapter and writes both keys back after every
// applied mutation. Operations never fail: they either apply or no-op, and
// a failed save comes back as a warning on the returned Change.
//
// Balance rules:
//   complete a goal      → balance += reward
//   un-complete a goal   → balance = max(0, balance - reward)
//   delete a completed   → balance = max(0, balance - reward)
//   reset                → balance = 0, goal flags untouched
//
// The balance is accrued currency, not a derived sum, so it is restored
// verbatim on load and never recomputed from the goals.

use std::fmt;

use crate::events::{EventDispatcher, GoalEvent, GoalObserver};
use crate::goal::{Goal, GoalId, IdGenerator, DEFAULT_REWARD};
use crate::persistence::{self, PersistedState, PersistenceAdapter};

/// The store's state at a point in time, for the renderer to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub goals: Vec<Goal>,
    pub balance: u64,
}

/// A save after a mutation failed. The in-memory state is still updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistWarning {
    pub message: String,
}

impl fmt::Display for PersistWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "changes were not saved: {}", self.message)
    }
}

/// Result of a mutating operation.
#[derive(Debug, Clone)]
pub struct Change {
    /// False when the operation was a no-op (empty title, unknown id).
    pub applied: bool,
    pub snapshot: Snapshot,
    pub warning: Option<PersistWarning>,
}

/// Goal list plus earned balance, backed by a persistence adapter.
pub struct GoalStore<A: PersistenceAdapter> {
    adapter: A,
    goals: Vec<Goal>,
    balance: u64,
    ids: IdGenerator,
    dispatcher: EventDispatcher,
}

impl<A: PersistenceAdapter> GoalStore<A> {
    /// Load persisted state from the adapter, or start empty.
    pub fn load(adapter: A) -> Self {
        let PersistedState { goals, balance } = PersistedState::load(&adapter);
        tracing::debug!(goals = goals.len(), balance, "goal store loaded");
        let ids = IdGenerator::seeded_from(goals.iter().map(|g| &g.id));
        Self {
            adapter,
            goals,
            balance,
            ids,
            dispatcher: EventDispatcher::new(),
        }
    }

    /// Register an observer for applied mutations.
    pub fn subscribe(&mut self, observer: Box<dyn GoalObserver>) {
        self.dispatcher.subscribe(observer);
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Goals in insertion order.
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// Earned balance in minutes.
    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn get(&self, id: &GoalId) -> Option<&Goal> {
        self.goals.iter().find(|g| &g.id == id)
    }

    /// Sum of rewards over completed goals.
    ///
    /// Differs from `balance()` after a reset or a clamped decrement.
    pub fn completed_reward_total(&self) -> u64 {
        self.goals
            .iter()
            .filter(|g| g.completed)
            .map(|g| u64::from(g.reward))
            .sum()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            goals: self.goals.clone(),
            balance: self.balance,
        }
    }

    /// Append a new incomplete goal.
    ///
    /// A title that is empty after trimming, or a reward of zero, is a no-op.
    /// `None` uses [`DEFAULT_REWARD`]. The title is stored as given.
    pub fn add_goal(&mut self, title: &str, reward: Option<u32>) -> Change {
        let reward = reward.unwrap_or(DEFAULT_REWARD);
        if title.trim().is_empty() || reward == 0 {
            return self.unchanged();
        }

        let mut id = self.ids.next_id();
        while self.get(&id).is_some() {
            id = self.ids.next_id();
        }

        let goal = Goal::new(id, title, reward);
        tracing::debug!(goal_id = %goal.id, reward, "goal added");
        let event = GoalEvent::goal_added(&goal);
        self.goals.push(goal);
        self.commit(event)
    }

    /// Flip a goal's completed flag and adjust the balance.
    ///
    /// Un-completing clamps at zero, so after a reset toggling a goal on and
    /// off again does not restore the earlier balance.
    pub fn toggle_goal(&mut self, id: &GoalId) -> Change {
        let Some(goal) = self.goals.iter_mut().find(|g| &g.id == id) else {
            return self.unchanged();
        };

        goal.completed = !goal.completed;
        let reward = u64::from(goal.reward);
        self.balance = if goal.completed {
            self.balance.saturating_add(reward)
        } else {
            self.balance.saturating_sub(reward)
        };

        tracing::debug!(goal_id = %id, status = %goal.status(), balance = self.balance, "goal toggled");
        let event = GoalEvent::goal_toggled(goal, self.balance);
        self.commit(event)
    }

    /// Remove a goal. Deleting a completed goal takes its reward back out of
    /// the balance, clamped at zero.
    pub fn delete_goal(&mut self, id: &GoalId) -> Change {
        let Some(index) = self.goals.iter().position(|g| &g.id == id) else {
            return self.unchanged();
        };

        let goal = self.goals.remove(index);
        if goal.completed {
            self.balance = self.balance.saturating_sub(u64::from(goal.reward));
        }

        tracing::debug!(goal_id = %id, balance = self.balance, "goal deleted");
        let event = GoalEvent::goal_deleted(&goal, self.balance);
        self.commit(event)
    }

    /// Set the balance to zero without touching any goal.
    pub fn reset_balance(&mut self) -> Change {
        let previous = self.balance;
        self.balance = 0;
        tracing::debug!(previous, "balance reset");
        self.commit(GoalEvent::balance_reset(previous))
    }

    /// Persist, notify observers, and report the new state.
    fn commit(&mut self, event: GoalEvent) -> Change {
        let warning = match persistence::write_state(&mut self.adapter, &self.goals, self.balance)
        {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!("failed to save goal state: {}", e);
                Some(PersistWarning {
                    message: e.to_string(),
                })
            }
        };

        self.dispatcher.dispatch(&event);

        Change {
            applied: true,
            snapshot: self.snapshot(),
            warning,
        }
    }

    fn unchanged(&self) -> Change {
        Change {
            applied: false,
            snapshot: self.snapshot(),
            warning: None,
        }
    }
}
