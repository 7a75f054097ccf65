//! # gt-goal
//!
//! Goal lifecycle and reward-balance bookkeeping for the goal tracker.
//!
//! Users add goals with a reward in minutes, complete them to earn that
//! reward into a balance ("earned play time"), and delete them. The balance
//! is accrued currency: every decrement is clamped at zero and it can be
//! reset independently of the goals.
//!
//! ## Key components
//!
//! - [`GoalStore`] — owns the goal list and balance, applies add / toggle /
//!   delete / reset, and saves after every applied mutation
//! - [`Goal`] — a goal record, persisted as `{id, title, completed, playTimeReward}`
//! - [`PersistenceAdapter`] — key-value blob storage ([`MemoryAdapter`], [`FileAdapter`])
//! - [`GoalEvent`] / [`GoalObserver`] — change notifications for subscribers
//! - [`TrackerConfig`] — data directory and form defaults

pub mod config;
pub mod error;
pub mod events;
pub mod goal;
pub mod persistence;
pub mod store;

pub use config::TrackerConfig;
pub use error::GoalError;
pub use events::{EventDispatcher, GoalEvent, GoalObserver, JsonlObserver};
pub use goal::{Goal, GoalId, GoalStatus, IdGenerator, DEFAULT_REWARD};
pub use persistence::{
    FileAdapter, MemoryAdapter, PersistedState, PersistenceAdapter, BALANCE_KEY, GOALS_KEY,
};
pub use store::{Change, GoalStore, PersistWarning, Snapshot};
