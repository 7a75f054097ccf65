// render.rs — Text rendering of a store snapshot.

use std::io::Write;

use gt_goal::{Goal, Snapshot};

pub fn balance_line(balance: u64) -> String {
    format!("Earned play time: {} minutes", balance)
}

pub fn goal_line(goal: &Goal) -> String {
    let mark = if goal.completed { "x" } else { " " };
    format!(
        "[{}] {} (+{}min)  {}",
        mark,
        truncate(&goal.title, 40),
        goal.reward,
        goal.id
    )
}

pub fn snapshot(out: &mut impl Write, snapshot: &Snapshot) -> anyhow::Result<()> {
    writeln!(out, "{}", balance_line(snapshot.balance))?;
    writeln!(out)?;

    if snapshot.goals.is_empty() {
        writeln!(out, "No goals yet. Add your first goal with `gt add`.")?;
        return Ok(());
    }

    for goal in &snapshot.goals {
        writeln!(out, "  {}", goal_line(goal))?;
    }

    let completed = snapshot.goals.iter().filter(|g| g.completed).count();
    writeln!(
        out,
        "\n{} goal(s), {} completed.",
        snapshot.goals.len(),
        completed
    )?;
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}
