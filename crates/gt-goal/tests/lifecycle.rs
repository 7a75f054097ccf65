// lifecycle.rs — End-to-end goal store sessions against file storage.
//
// Each test opens a store on a temp data directory, mutates it, and where
// relevant reopens it to check what a later session would see.

use std::fs;

use gt_goal::{
    FileAdapter, GoalStore, JsonlObserver, PersistenceAdapter, TrackerConfig, BALANCE_KEY,
    GOALS_KEY,
};
use tempfile::TempDir;

#[test]
fn read_goal_from_add_to_delete() {
    let dir = TempDir::new().unwrap();
    let mut store = GoalStore::load(FileAdapter::new(dir.path()));

    let change = store.add_goal("Read", Some(20));
    assert_eq!(change.snapshot.balance, 0);
    assert_eq!(change.snapshot.goals.len(), 1);
    let goal = change.snapshot.goals[0].clone();
    assert_eq!(goal.title, "Read");
    assert_eq!(goal.reward, 20);
    assert!(!goal.completed);

    let change = store.toggle_goal(&goal.id);
    assert!(change.snapshot.goals[0].completed);
    assert_eq!(change.snapshot.balance, 20);

    let change = store.delete_goal(&goal.id);
    assert!(change.snapshot.goals.is_empty());
    assert_eq!(change.snapshot.balance, 0);
}

#[test]
fn reset_makes_toggle_non_reversible() {
    let dir = TempDir::new().unwrap();
    let mut store = GoalStore::load(FileAdapter::new(dir.path()));

    let id = store.add_goal("A", Some(10)).snapshot.goals[0].id.clone();
    assert_eq!(store.toggle_goal(&id).snapshot.balance, 10);
    assert_eq!(store.reset_balance().snapshot.balance, 0);

    let change = store.toggle_goal(&id);
    assert_eq!(change.snapshot.balance, 0);
    assert!(!change.snapshot.goals[0].completed);
}

#[test]
fn state_survives_reopen() {
    let dir = TempDir::new().unwrap();

    let kept_id = {
        let mut store = GoalStore::load(FileAdapter::new(dir.path()));
        let a = store.add_goal("Run 5k", Some(30)).snapshot.goals[0].id.clone();
        store.add_goal("Read", None);
        store.toggle_goal(&a);
        a
    };

    let mut store = GoalStore::load(FileAdapter::new(dir.path()));
    assert_eq!(store.balance(), 30);
    assert_eq!(store.goals().len(), 2);
    assert!(store.get(&kept_id).unwrap().completed);
    assert_eq!(store.goals()[1].reward, 15);

    // New ids keep counting past the loaded ones.
    let added = store.add_goal("Stretch", Some(5));
    let ids: Vec<_> = added.snapshot.goals.iter().map(|g| g.id.clone()).collect();
    assert_eq!(ids.len(), 3);
    assert_ne!(ids[2], ids[0]);
    assert_ne!(ids[2], ids[1]);
}

#[test]
fn files_use_the_persisted_key_layout() {
    let dir = TempDir::new().unwrap();
    let mut store = GoalStore::load(FileAdapter::new(dir.path()));
    let id = store.add_goal("Read", Some(20)).snapshot.goals[0].id.clone();
    store.toggle_goal(&id);

    assert_eq!(fs::read_to_string(dir.path().join("playTime")).unwrap(), "20");
    let goals: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("goals")).unwrap()).unwrap();
    assert_eq!(goals[0]["title"], "Read");
    assert_eq!(goals[0]["completed"], true);
    assert_eq!(goals[0]["playTimeReward"], 20);
    assert!(goals[0]["id"].is_string());
}

#[test]
fn corrupt_files_load_as_empty() {
    let dir = TempDir::new().unwrap();
    let mut adapter = FileAdapter::new(dir.path());
    adapter.set(GOALS_KEY, "[{\"id\": 1}]").unwrap();
    adapter.set(BALANCE_KEY, "NaN").unwrap();

    let store = GoalStore::load(adapter);
    assert!(store.goals().is_empty());
    assert_eq!(store.balance(), 0);
}

#[test]
fn activity_log_records_each_applied_mutation() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "default_reward = 25\nactivity_log = \"activity.jsonl\"\n",
    )
    .unwrap();
    let config = TrackerConfig::load(dir.path()).unwrap();

    let mut store = GoalStore::load(FileAdapter::new(&config.data_dir));
    if let Some(log) = &config.activity_log {
        store.subscribe(Box::new(JsonlObserver::new(log)));
    }

    let id = store
        .add_goal("Practice piano", Some(config.default_reward))
        .snapshot
        .goals[0]
        .id
        .clone();
    store.toggle_goal(&id);
    store.add_goal("", None);
    store.reset_balance();

    let log = fs::read_to_string(dir.path().join("activity.jsonl")).unwrap();
    let types: Vec<String> = log
        .lines()
        .map(|line| {
            let event: serde_json::Value = serde_json::from_str(line).unwrap();
            event["event_type"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(types, ["goal_added", "goal_toggled", "balance_reset"]);
    assert_eq!(store.goals()[0].reward, 25);
}
