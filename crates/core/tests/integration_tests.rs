//! Integration tests for command-saver-core
//!
//! These tests verify that the core functionality works together correctly
//! by testing complete workflows end-to-end against a store on disk.

use command_saver_core::{
    config::{get_export_path, get_log_path, get_store_path},
    error::Error,
    menu::MenuAction,
    store::{Store, DEFAULT_POPULAR_LIMIT, DEFAULT_RECENT_LIMIT},
};
use std::fs;
use tempfile::TempDir;

fn create_store(temp_dir: &TempDir) -> Store {
    let path = temp_dir.path().join("nested/store.yml");
    Store::open_or_create(path.to_str().unwrap()).unwrap()
}

/// Fresh store, add one, delete the first: the documented lifecycle
#[test]
fn test_add_then_delete_first_workflow() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_store(&temp_dir);
    assert_eq!(store.list_all().unwrap().len(), 4);

    let added = store.add("desc", "cmd").unwrap();
    assert_eq!(store.list_all().unwrap().len(), 5);
    assert_eq!(added.times_called, 0);
    assert_eq!(added.author, "admin");

    let first = store.list_all().unwrap()[0].clone();
    assert_eq!(first.command_text, "git status");
    store.delete(first.id).unwrap();

    let remaining = store.list_all().unwrap();
    assert_eq!(remaining.len(), 4);
    assert!(remaining.iter().all(|c| c.command_text != "git status"));
    let positions: Vec<usize> = remaining.iter().map(|c| c.position).collect();
    assert_eq!(positions, vec![1, 2, 3, 4]);
}

/// Deleting position k shifts every later record down by one
#[test]
fn test_delete_shifts_later_positions() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_store(&temp_dir);
    store.add("five", "echo 5").unwrap();
    store.add("six", "echo 6").unwrap();

    let before = store.list_all().unwrap();
    let k = 3;
    let target = before.iter().find(|c| c.position == k).unwrap().id;

    store.delete(target).unwrap();
    let after = store.list_all().unwrap();

    assert_eq!(after.len(), before.len() - 1);
    for old in before.iter().filter(|c| c.position > k) {
        let new = after.iter().find(|c| c.id == old.id).unwrap();
        assert_eq!(new.position, old.position - 1);
    }
    for old in before.iter().filter(|c| c.position < k) {
        let new = after.iter().find(|c| c.id == old.id).unwrap();
        assert_eq!(new.position, old.position);
    }
    let former_next = before.iter().find(|c| c.position == k + 1).unwrap();
    assert_eq!(
        after.iter().find(|c| c.position == k).unwrap().id,
        former_next.id
    );
}

/// Each execution is visible to a fresh read straight away
#[test]
fn test_execute_counts_are_persisted() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_store(&temp_dir);
    let added = store.add("noop", "true").unwrap();

    for expected in 1..=3 {
        store.execute(added.id, "sh").unwrap();
        let reopened = Store::open_or_create(store.path()).unwrap();
        assert_eq!(
            reopened.find(added.id).unwrap().unwrap().times_called,
            expected
        );
    }
}

/// Not found stays distinguishable from other failures
#[test]
fn test_not_found_is_distinguishable() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_store(&temp_dir);

    assert!(store.find(1234).unwrap().is_none());
    assert!(matches!(store.delete(1234), Err(Error::CommandNotFound(1234))));
    assert!(matches!(
        store.update_text(1234, "x"),
        Err(Error::CommandNotFound(1234))
    ));
    assert!(matches!(
        store.execute(1234, "sh"),
        Err(Error::CommandNotFound(1234))
    ));
}

/// The summary list never repeats an ID and does not change between reads
#[test]
fn test_summary_list_workflow() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_store(&temp_dir);
    for i in 0..10 {
        let added = store.add(&format!("cmd {i}"), "true").unwrap();
        for _ in 0..i {
            store.execute(added.id, "sh").unwrap();
        }
    }

    let first = store
        .top_recent_and_popular(DEFAULT_RECENT_LIMIT, DEFAULT_POPULAR_LIMIT)
        .unwrap();
    let second = store
        .top_recent_and_popular(DEFAULT_RECENT_LIMIT, DEFAULT_POPULAR_LIMIT)
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), DEFAULT_POPULAR_LIMIT);
    let mut ids: Vec<u64> = first.iter().map(|c| c.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), first.len());
}

/// Export writes one line per command and replaces older exports
#[test]
fn test_export_workflow() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_store(&temp_dir);
    let export_path = temp_dir.path().join("exports/all.txt");
    let export_path = export_path.to_str().unwrap();

    store.export_snapshot(export_path).unwrap();
    store.delete(1).unwrap();
    store.export_snapshot(export_path).unwrap();

    let contents = fs::read_to_string(export_path).unwrap();
    assert_eq!(contents.lines().count(), 3);
    assert!(contents.lines().all(|line| line.split(", ").count() >= 8));
}

/// The menu catalog is persisted in catalog order
#[test]
fn test_menu_catalog_persisted() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_store(&temp_dir);

    let keys: Vec<String> = store
        .menu_options()
        .unwrap()
        .into_iter()
        .map(|o| o.key)
        .collect();
    let expected: Vec<String> = MenuAction::ALL
        .iter()
        .map(|a| a.key().to_string())
        .collect();
    assert_eq!(keys, expected);
}

/// Configuration path resolution
#[test]
fn test_configuration_path_workflow() {
    assert!(get_store_path(&None).ends_with("store.yml"));
    assert!(get_log_path(&None).ends_with("cs.log"));
    assert!(!get_export_path(&None).starts_with('~'));

    let custom = get_store_path(&Some("/custom/store.yml".to_string()));
    assert_eq!(custom, "/custom/store.yml");
}
