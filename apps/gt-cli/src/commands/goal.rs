// goal.rs — Goal subcommands: list, add, toggle, delete, reset, balance.
//
// Each mutating command invokes one store operation and redraws from the
// snapshot it returns. Unknown ids and blank titles are reported, not
// treated as failures.

use std::io::Write;

use clap::Subcommand;
use gt_goal::{Change, GoalId, GoalStore, PersistenceAdapter, TrackerConfig};

use super::render;

#[derive(Subcommand)]
pub enum GoalCommands {
    /// Show earned play time and all goals.
    List,
    /// Add a goal.
    Add {
        /// Goal title (e.g., "Finish homework").
        title: String,
        /// Minutes of play time earned on completion (defaults to the configured reward).
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        reward: Option<u32>,
    },
    /// Mark a goal done, or not done if it already is.
    Toggle {
        /// Goal ID.
        id: String,
    },
    /// Delete a goal.
    Delete {
        /// Goal ID.
        id: String,
    },
    /// Reset earned play time to zero.
    Reset,
    /// Show earned play time.
    Balance,
}

pub fn execute<A: PersistenceAdapter>(
    cmd: &GoalCommands,
    store: &mut GoalStore<A>,
    config: &TrackerConfig,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match cmd {
        GoalCommands::List => render::snapshot(out, &store.snapshot()),
        GoalCommands::Add { title, reward } => {
            // The form offers the configured reward when none is typed in.
            let change = store.add_goal(title, Some(reward.unwrap_or(config.default_reward)));
            if change.applied {
                if let Some(goal) = change.snapshot.goals.last() {
                    writeln!(out, "Added: {}", render::goal_line(goal))?;
                }
            } else {
                writeln!(out, "Goal title is empty; nothing added.")?;
            }
            finish(out, change)
        }
        GoalCommands::Toggle { id } => {
            let change = store.toggle_goal(&GoalId::new(id.as_str()));
            report_unknown(out, &change, id)?;
            finish(out, change)
        }
        GoalCommands::Delete { id } => {
            let change = store.delete_goal(&GoalId::new(id.as_str()));
            report_unknown(out, &change, id)?;
            finish(out, change)
        }
        GoalCommands::Reset => {
            let change = store.reset_balance();
            finish(out, change)
        }
        GoalCommands::Balance => {
            writeln!(out, "{}", render::balance_line(store.balance()))?;
            Ok(())
        }
    }
}

fn report_unknown(out: &mut impl Write, change: &Change, id: &str) -> anyhow::Result<()> {
    if !change.applied {
        writeln!(out, "No goal with id {}; nothing changed.", id)?;
    }
    Ok(())
}

/// Surface a save failure and redraw.
fn finish(out: &mut impl Write, change: Change) -> anyhow::Result<()> {
    if let Some(warning) = &change.warning {
        eprintln!("warning: {}", warning);
    }
    writeln!(out)?;
    render::snapshot(out, &change.snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gt_goal::{FileAdapter, MemoryAdapter};
    use tempfile::TempDir;

    fn run<A: PersistenceAdapter>(
        cmd: GoalCommands,
        store: &mut GoalStore<A>,
        config: &TrackerConfig,
    ) -> String {
        let mut out = Vec::new();
        execute(&cmd, store, config, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn add_uses_configured_default_reward() {
        let mut config = TrackerConfig::for_dir("unused");
        config.default_reward = 25;
        let mut store = GoalStore::load(MemoryAdapter::new());

        let text = run(
            GoalCommands::Add {
                title: "Practice".to_string(),
                reward: None,
            },
            &mut store,
            &config,
        );

        assert_eq!(store.goals()[0].reward, 25);
        assert!(text.contains("Added: [ ] Practice (+25min)"));
    }

    #[test]
    fn blank_title_is_reported() {
        let config = TrackerConfig::for_dir("unused");
        let mut store = GoalStore::load(MemoryAdapter::new());

        let text = run(
            GoalCommands::Add {
                title: "   ".to_string(),
                reward: Some(5),
            },
            &mut store,
            &config,
        );

        assert!(text.contains("nothing added"));
        assert!(store.goals().is_empty());
    }

    #[test]
    fn toggle_and_delete_flow_through_file_storage() {
        let dir = TempDir::new().unwrap();
        let config = TrackerConfig::for_dir(dir.path());
        let mut store = GoalStore::load(FileAdapter::new(dir.path()));

        run(
            GoalCommands::Add {
                title: "Read".to_string(),
                reward: Some(20),
            },
            &mut store,
            &config,
        );
        let id = store.goals()[0].id.to_string();

        let text = run(GoalCommands::Toggle { id: id.clone() }, &mut store, &config);
        assert!(text.contains("Earned play time: 20 minutes"));
        assert!(text.contains("[x] Read"));

        let text = run(GoalCommands::Delete { id }, &mut store, &config);
        assert!(text.contains("Earned play time: 0 minutes"));
        assert!(text.contains("No goals yet."));

        let reopened = GoalStore::load(FileAdapter::new(dir.path()));
        assert!(reopened.goals().is_empty());
    }

    #[test]
    fn unknown_id_is_not_an_error() {
        let config = TrackerConfig::for_dir("unused");
        let mut store = GoalStore::load(MemoryAdapter::new());

        let text = run(
            GoalCommands::Toggle {
                id: "nope".to_string(),
            },
            &mut store,
            &config,
        );
        assert!(text.contains("No goal with id nope"));
    }

    #[test]
    fn reset_and_balance() {
        let config = TrackerConfig::for_dir("unused");
        let mut store = GoalStore::load(MemoryAdapter::new());
        let id = store.add_goal("A", Some(10)).snapshot.goals[0].id.clone();
        store.toggle_goal(&id);

        assert_eq!(
            run(GoalCommands::Balance, &mut store, &config),
            "Earned play time: 10 minutes\n"
        );
        run(GoalCommands::Reset, &mut store, &config);
        assert_eq!(
            run(GoalCommands::Balance, &mut store, &config),
            "Earned play time: 0 minutes\n"
        );
        assert!(store.get(&id).unwrap().completed);
    }
}
