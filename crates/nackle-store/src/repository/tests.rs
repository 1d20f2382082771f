//! Repository Integration Tests
//!
//! Exercises the repositories against in-memory SQLite databases.

use crate::domain::{
    ClearScope, Collection, DomainError, SortUpdate, Task, DEFAULT_SETTINGS, INBOX_ID, KEY_THEME,
};
use crate::repository::{ArchivableRepository, Repositories, Repository, StoreConfig};

async fn setup_test_db() -> Repositories {
    Repositories::open(&StoreConfig::in_memory())
        .await
        .expect("Failed to init test DB")
}

async fn add_collection(repos: &Repositories, id: &str, name: &str) -> Collection {
    repos
        .collections
        .create(&Collection::new(id, name))
        .await
        .expect("Failed to create collection")
}

async fn add_task_at(repos: &Repositories, id: &str, collection_id: &str, created_at: i64) -> Task {
    repos
        .tasks
        .create_at(&Task::new(id, format!("task {}", id), collection_id), created_at)
        .await
        .expect("Failed to create task")
}

fn ids<T: crate::domain::Entity>(rows: &[T]) -> Vec<&str> {
    rows.iter().map(|r| r.id()).collect()
}

#[tokio::test]
async fn test_fresh_db_is_seeded() {
    let repos = setup_test_db().await;

    let collections = repos.collections.list().await.unwrap();
    assert_eq!(collections, vec![Collection::inbox()]);

    let settings = repos.settings.get_all().await.unwrap();
    for (key, value) in DEFAULT_SETTINGS {
        assert_eq!(settings.get(*key).map(String::as_str), Some(*value));
    }
}

#[tokio::test]
async fn test_collection_appends_and_tasks_order_newest_first() {
    let repos = setup_test_db().await;

    let work = add_collection(&repos, "work", "Work").await;
    assert_eq!(work.sort_order, 1);
    let home = add_collection(&repos, "home", "Home").await;
    assert_eq!(home.sort_order, 2);

    let first = add_task_at(&repos, "a", "work", 1_000).await;
    let second = add_task_at(&repos, "b", "work", 2_000).await;
    assert_eq!(first.sort_order, 0);
    assert_eq!(second.sort_order, 0);

    let tasks = repos.tasks.list().await.unwrap();
    assert_eq!(ids(&tasks), vec!["b", "a"]);

    // Done sinks below undone regardless of sort order
    assert_eq!(repos.tasks.toggle("b").await.unwrap(), Some(true));
    let tasks = repos.tasks.list().await.unwrap();
    assert_eq!(ids(&tasks), vec!["a", "b"]);
    assert!(tasks[1].done);
    assert_eq!(tasks[1].sort_order, 0);

    let collections = repos.collections.list().await.unwrap();
    assert_eq!(ids(&collections), vec![INBOX_ID, "work", "home"]);
}

#[tokio::test]
async fn test_create_fills_defaults() {
    let repos = setup_test_db().await;

    let collection = repos
        .collections
        .create(&Collection::new("", "  Reading  ").with_style("", ""))
        .await
        .unwrap();
    assert!(!collection.id.is_empty());
    assert_eq!(collection.name, "Reading");
    assert_eq!(collection.icon, "◆");
    assert_eq!(collection.color, "#8B8B8B");

    let task = repos.tasks.create(&Task::new("", "buy milk", "")).await.unwrap();
    assert!(!task.id.is_empty());
    assert_eq!(task.collection_id, INBOX_ID);
    assert_eq!(task.priority, -1);
    assert!(task.created_at > 0);

    let stored = repos.tasks.find_by_id(&task.id).await.unwrap();
    assert_eq!(stored, Some(task));
}

#[tokio::test]
async fn test_blank_names_are_rejected() {
    let repos = setup_test_db().await;

    let result = repos.collections.create(&Collection::new("x", "   ")).await;
    assert!(matches!(result, Err(DomainError::InvalidInput(_))));

    let result = repos.tasks.create(&Task::in_inbox("t", "")).await;
    assert!(matches!(result, Err(DomainError::InvalidInput(_))));
}

#[tokio::test]
async fn test_reorder_moves_last_to_front() {
    let repos = setup_test_db().await;
    add_collection(&repos, "work", "Work").await;
    for (i, id) in ["A", "B", "C"].iter().enumerate() {
        add_task_at(&repos, id, "work", 1_000 - i as i64).await;
    }
    let initial = vec![SortUpdate::new("A", 0), SortUpdate::new("B", 1), SortUpdate::new("C", 2)];
    repos.tasks.reorder(&initial).await.unwrap();
    assert_eq!(ids(&repos.tasks.list().await.unwrap()), vec!["A", "B", "C"]);

    let moved = vec![SortUpdate::new("C", 0), SortUpdate::new("A", 1), SortUpdate::new("B", 2)];
    repos.tasks.reorder(&moved).await.unwrap();
    assert_eq!(ids(&repos.tasks.list().await.unwrap()), vec!["C", "A", "B"]);
}

#[tokio::test]
async fn test_identity_reorder_is_noop() {
    let repos = setup_test_db().await;
    add_collection(&repos, "work", "Work").await;
    add_task_at(&repos, "A", "work", 1).await;
    add_task_at(&repos, "B", "work", 2).await;
    repos
        .tasks
        .reorder(&[SortUpdate::new("A", 3), SortUpdate::new("B", 7)])
        .await
        .unwrap();
    let before = repos.tasks.list().await.unwrap();

    let identity: Vec<SortUpdate> = before.iter().map(|t| SortUpdate::new(t.id.clone(), t.sort_order)).collect();
    repos.tasks.reorder(&identity).await.unwrap();

    assert_eq!(repos.tasks.list().await.unwrap(), before);
}

#[tokio::test]
async fn test_archive_collection_cascades_and_restores_exactly() {
    let repos = setup_test_db().await;
    add_collection(&repos, "work", "Work").await;
    add_task_at(&repos, "t1", "work", 1).await;
    add_task_at(&repos, "t2", "work", 2).await;
    add_task_at(&repos, "t3", "work", 3).await;
    add_task_at(&repos, "keep", INBOX_ID, 4).await;

    // Archived on its own before the collection
    repos.tasks.archive_at("t3", 500).await.unwrap();
    repos.collections.archive_at("work", 1_000).await.unwrap();

    assert_eq!(ids(&repos.collections.list().await.unwrap()), vec![INBOX_ID]);
    assert_eq!(ids(&repos.tasks.list().await.unwrap()), vec!["keep"]);
    for id in ["t1", "t2"] {
        let task = repos.tasks.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(task.archived_at, Some(1_000));
    }
    let t3 = repos.tasks.find_by_id("t3").await.unwrap().unwrap();
    assert_eq!(t3.archived_at, Some(500));

    repos.collections.restore("work").await.unwrap();

    assert_eq!(ids(&repos.collections.list().await.unwrap()), vec![INBOX_ID, "work"]);
    assert_eq!(ids(&repos.tasks.list().await.unwrap()), vec!["keep", "t2", "t1"]);
    let archived = repos.tasks.list_archived().await.unwrap();
    assert_eq!(ids(&archived), vec!["t3"]);
}

#[tokio::test]
async fn test_active_tasks_exclude_archived_collections() {
    let repos = setup_test_db().await;
    add_collection(&repos, "work", "Work").await;
    add_task_at(&repos, "t1", "work", 1).await;
    repos.collections.archive_at("work", 1_000).await.unwrap();

    // Task itself becomes active, its collection stays archived
    repos.tasks.restore("t1").await.unwrap();
    let task = repos.tasks.find_by_id("t1").await.unwrap().unwrap();
    assert_eq!(task.archived_at, None);
    assert!(repos.tasks.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_archived_lists_newest_first() {
    let repos = setup_test_db().await;
    add_collection(&repos, "a", "A").await;
    add_collection(&repos, "b", "B").await;
    repos.collections.archive_at("a", 100).await.unwrap();
    repos.collections.archive_at("b", 200).await.unwrap();
    assert_eq!(ids(&repos.collections.list_archived().await.unwrap()), vec!["b", "a"]);

    add_task_at(&repos, "x", INBOX_ID, 1).await;
    add_task_at(&repos, "y", INBOX_ID, 2).await;
    repos.tasks.archive_at("y", 300).await.unwrap();
    repos.tasks.archive_at("x", 400).await.unwrap();
    assert_eq!(ids(&repos.tasks.list_archived().await.unwrap()), vec!["x", "y"]);
}

#[tokio::test]
async fn test_inbox_cannot_be_archived_or_deleted() {
    let repos = setup_test_db().await;
    add_task_at(&repos, "t1", INBOX_ID, 1).await;

    repos.collections.archive(INBOX_ID).await.unwrap();
    repos.collections.delete(INBOX_ID).await.unwrap();

    assert_eq!(ids(&repos.collections.list().await.unwrap()), vec![INBOX_ID]);
    assert_eq!(ids(&repos.tasks.list().await.unwrap()), vec!["t1"]);

    // Renaming is allowed
    repos.collections.rename(INBOX_ID, "Later").await.unwrap();
    let inbox = repos.collections.find_by_id(INBOX_ID).await.unwrap().unwrap();
    assert_eq!(inbox.name, "Later");
}

#[tokio::test]
async fn test_delete_collection_removes_its_tasks() {
    let repos = setup_test_db().await;
    add_collection(&repos, "work", "Work").await;
    add_task_at(&repos, "t1", "work", 1).await;
    add_task_at(&repos, "t2", "work", 2).await;
    repos.tasks.archive("t2").await.unwrap();

    repos.collections.delete("work").await.unwrap();

    assert_eq!(repos.collections.find_by_id("work").await.unwrap(), None);
    assert_eq!(repos.tasks.find_by_id("t1").await.unwrap(), None);
    assert_eq!(repos.tasks.find_by_id("t2").await.unwrap(), None);
}

#[tokio::test]
async fn test_task_requires_existing_collection() {
    let repos = setup_test_db().await;

    let result = repos.tasks.create(&Task::new("t1", "orphan", "missing")).await;
    assert!(matches!(result, Err(DomainError::Constraint(_))));

    add_task_at(&repos, "t2", INBOX_ID, 1).await;
    let result = repos.tasks.move_to_collection("t2", "missing").await;
    assert!(matches!(result, Err(DomainError::Constraint(_))));
}

#[tokio::test]
async fn test_move_task_between_collections() {
    let repos = setup_test_db().await;
    add_collection(&repos, "work", "Work").await;
    add_task_at(&repos, "t1", INBOX_ID, 1).await;

    repos.tasks.move_to_collection("t1", "work").await.unwrap();

    let task = repos.tasks.find_by_id("t1").await.unwrap().unwrap();
    assert_eq!(task.collection_id, "work");
}

#[tokio::test]
async fn test_task_field_updates() {
    let repos = setup_test_db().await;
    add_task_at(&repos, "t1", INBOX_ID, 1).await;

    repos.tasks.update_text("t1", "renamed").await.unwrap();
    repos.tasks.set_priority("t1", 2).await.unwrap();
    assert_eq!(repos.tasks.toggle("t1").await.unwrap(), Some(true));
    assert_eq!(repos.tasks.toggle("t1").await.unwrap(), Some(false));

    let task = repos.tasks.find_by_id("t1").await.unwrap().unwrap();
    assert_eq!(task.text, "renamed");
    assert_eq!(task.priority, 2);
    assert!(!task.done);

    // Missing rows are not errors
    assert_eq!(repos.tasks.toggle("nope").await.unwrap(), None);
    repos.tasks.update_text("nope", "x").await.unwrap();
    repos.tasks.delete("nope").await.unwrap();
}

#[tokio::test]
async fn test_clear_completed_by_scope() {
    let repos = setup_test_db().await;
    add_collection(&repos, "work", "Work").await;
    for (id, collection) in [("w1", "work"), ("w2", "work"), ("i1", INBOX_ID), ("i2", INBOX_ID)] {
        add_task_at(&repos, id, collection, 1).await;
    }
    for id in ["w1", "i1"] {
        repos.tasks.toggle(id).await.unwrap();
    }

    let cleared = repos
        .tasks
        .clear_completed(&ClearScope::Collection("work".into()))
        .await
        .unwrap();
    assert_eq!(cleared, 1);
    assert_eq!(ids(&repos.tasks.list_archived().await.unwrap()), vec!["w1"]);

    let cleared = repos.tasks.clear_completed(&ClearScope::All).await.unwrap();
    assert_eq!(cleared, 1);

    let mut active = ids(&repos.tasks.list().await.unwrap()).into_iter().map(String::from).collect::<Vec<_>>();
    active.sort();
    assert_eq!(active, vec!["i2", "w2"]);
}

#[tokio::test]
async fn test_empty_archive_purges_everything_archived() {
    let repos = setup_test_db().await;
    add_collection(&repos, "old", "Old").await;
    add_task_at(&repos, "o1", "old", 1).await;
    add_task_at(&repos, "loose", INBOX_ID, 2).await;
    add_task_at(&repos, "live", INBOX_ID, 3).await;
    repos.collections.archive("old").await.unwrap();
    repos.tasks.archive("loose").await.unwrap();
    // Active task left inside an archived collection goes too
    repos.tasks.restore("o1").await.unwrap();

    let report = repos.maintenance.empty_archive().await.unwrap();
    assert_eq!(report.tasks, 2);
    assert_eq!(report.collections, 1);

    assert!(repos.tasks.list_archived().await.unwrap().is_empty());
    assert!(repos.collections.list_archived().await.unwrap().is_empty());
    assert_eq!(repos.tasks.find_by_id("o1").await.unwrap(), None);
    assert_eq!(ids(&repos.tasks.list().await.unwrap()), vec!["live"]);
}

#[tokio::test]
async fn test_wipe_keeps_only_default_inbox_and_settings() {
    let repos = setup_test_db().await;
    add_collection(&repos, "work", "Work").await;
    add_task_at(&repos, "t1", "work", 1).await;
    add_task_at(&repos, "t2", INBOX_ID, 2).await;
    repos.collections.rename(INBOX_ID, "Renamed").await.unwrap();
    repos.settings.save(KEY_THEME, "nord").await.unwrap();

    repos.maintenance.wipe_all().await.unwrap();

    assert_eq!(repos.collections.list().await.unwrap(), vec![Collection::inbox()]);
    assert!(repos.collections.list_archived().await.unwrap().is_empty());
    assert!(repos.tasks.list().await.unwrap().is_empty());
    assert!(repos.tasks.list_archived().await.unwrap().is_empty());
    assert_eq!(repos.settings.get(KEY_THEME).await.unwrap().as_deref(), Some("nord"));
}

#[tokio::test]
async fn test_settings_upsert() {
    let repos = setup_test_db().await;

    assert_eq!(repos.settings.get("custom").await.unwrap(), None);
    repos.settings.save("custom", "1").await.unwrap();
    repos.settings.save("custom", "2").await.unwrap();
    assert_eq!(repos.settings.get("custom").await.unwrap().as_deref(), Some("2"));

    let all = repos.settings.get_all().await.unwrap();
    assert_eq!(all.len(), DEFAULT_SETTINGS.len() + 1);

    // Seeding again leaves user values alone
    repos.settings.save(KEY_THEME, "dracula").await.unwrap();
    assert_eq!(repos.settings.seed_defaults().await.unwrap(), 0);
    assert_eq!(repos.settings.get(KEY_THEME).await.unwrap().as_deref(), Some("dracula"));

    assert!(matches!(repos.settings.save("", "x").await, Err(DomainError::InvalidInput(_))));
}

#[tokio::test]
async fn test_reopening_file_db_is_lossless() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(dir.path().join("nested").join("nackle.db"));

    {
        let repos = Repositories::open(&config).await.unwrap();
        add_collection(&repos, "work", "Work").await;
        add_task_at(&repos, "t1", "work", 42).await;
        repos.settings.save(KEY_THEME, "gruvbox").await.unwrap();
    }

    for _ in 0..2 {
        let repos = Repositories::open(&config).await.unwrap();
        assert_eq!(ids(&repos.collections.list().await.unwrap()), vec![INBOX_ID, "work"]);
        let tasks = repos.tasks.list().await.unwrap();
        assert_eq!(ids(&tasks), vec!["t1"]);
        assert_eq!(tasks[0].created_at, 42);
        assert_eq!(repos.settings.get(KEY_THEME).await.unwrap().as_deref(), Some("gruvbox"));
        assert_eq!(repos.settings.get_all().await.unwrap().len(), DEFAULT_SETTINGS.len());
    }
}
