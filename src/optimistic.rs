//! Optimistic Mirror
//!
//! The UI keeps an in-memory copy of every collection, task and setting.
//! Each user action is a `Mutation`: it is applied to the mirror at once
//! and then sent to the backend. Applying returns a `Compensation` holding
//! the previous state of every record it touched; if the backend rejects
//! the call, the compensation puts exactly those records back and leaves
//! everything else alone.

use crate::models::{Collection, SettingsMap, SortUpdate, Task, INBOX_ID};

/// A user-initiated change to collections, tasks or settings
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    AddCollection(Collection),
    RenameCollection { id: String, name: String },
    ArchiveCollection { id: String, at: i64 },
    RestoreCollection { id: String },
    DeleteCollection { id: String },
    AddTask(Task),
    ToggleTask { id: String },
    UpdateTaskText { id: String, text: String },
    MoveTask { id: String, collection_id: String },
    ArchiveTask { id: String, at: i64 },
    RestoreTask { id: String },
    DeleteTask { id: String },
    DeleteTaskForever { id: String },
    ReorderTasks(Vec<SortUpdate>),
    /// `collection_id: None` clears every collection
    ClearCompleted { collection_id: Option<String>, at: i64 },
    EmptyArchive,
    SaveSetting { key: String, value: String },
}

impl Mutation {
    /// Bridge command carrying this mutation
    pub fn command_name(&self) -> &'static str {
        match self {
            Mutation::AddCollection(_) => "add_collection",
            Mutation::RenameCollection { .. } => "rename_collection",
            Mutation::ArchiveCollection { .. } => "archive_collection",
            Mutation::RestoreCollection { .. } => "restore_collection",
            Mutation::DeleteCollection { .. } => "delete_collection",
            Mutation::AddTask(_) => "add_task",
            Mutation::ToggleTask { .. } => "toggle_task",
            Mutation::UpdateTaskText { .. } => "update_task_text",
            Mutation::MoveTask { .. } => "move_task",
            Mutation::ArchiveTask { .. } => "archive_task",
            Mutation::RestoreTask { .. } => "restore_task",
            Mutation::DeleteTask { .. } => "delete_task",
            Mutation::DeleteTaskForever { .. } => "delete_task_forever",
            Mutation::ReorderTasks(_) => "reorder_tasks",
            Mutation::ClearCompleted { .. } => "clear_completed",
            Mutation::EmptyArchive => "empty_archive",
            Mutation::SaveSetting { .. } => "save_setting",
        }
    }
}

/// Records addressable by id
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Collection {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Task {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Where a record sat before a mutation
#[derive(Debug, Clone, PartialEq)]
enum Slot<T> {
    Active(usize, T),
    Archived(usize, T),
    Absent,
}

impl<T> Slot<T> {
    fn position(&self) -> usize {
        match self {
            Slot::Active(i, _) | Slot::Archived(i, _) => *i,
            Slot::Absent => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Snapshot<T> {
    id: String,
    slot: Slot<T>,
}

/// Prior state of everything a mutation touched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compensation {
    collections: Vec<Snapshot<Collection>>,
    tasks: Vec<Snapshot<Task>>,
    settings: Vec<(String, Option<String>)>,
}

impl Compensation {
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty() && self.tasks.is_empty() && self.settings.is_empty()
    }
}

/// In-memory copy of the backend state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mirror {
    pub collections: Vec<Collection>,
    pub archived_collections: Vec<Collection>,
    pub tasks: Vec<Task>,
    pub archived_tasks: Vec<Task>,
    pub settings: SettingsMap,
}

impl Mirror {
    /// Collection by id, active or archived
    pub fn collection(&self, id: &str) -> Option<&Collection> {
        self.collections
            .iter()
            .chain(self.archived_collections.iter())
            .find(|c| c.id == id)
    }

    pub fn setting(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }

    /// Apply `mutation` and return what is needed to undo it
    pub fn apply(&mut self, mutation: &Mutation) -> Compensation {
        let mut comp = Compensation::default();
        match mutation {
            Mutation::AddCollection(collection) => {
                if self.collection(&collection.id).is_some() {
                    return comp;
                }
                self.capture_collection(&mut comp, &collection.id);
                let mut collection = collection.clone();
                collection.archived_at = None;
                self.collections.push(collection);
            }
            Mutation::RenameCollection { id, name } => {
                self.capture_collection(&mut comp, id);
                if let Some(c) = find_mut(&mut self.collections, &mut self.archived_collections, id) {
                    c.name = name.clone();
                }
            }
            Mutation::ArchiveCollection { id, at } => {
                if id == INBOX_ID {
                    return comp;
                }
                let Some(pos) = self.collections.iter().position(|c| &c.id == id) else {
                    return comp;
                };
                self.capture_collection(&mut comp, id);
                let moving = self.matching_ids(&self.tasks, |t| &t.collection_id == id);
                self.capture_tasks(&mut comp, &moving);

                let mut collection = self.collections.remove(pos);
                collection.archived_at = Some(*at);
                self.archived_collections.insert(0, collection);
                move_tasks(&mut self.tasks, &mut self.archived_tasks, &moving, Some(*at));
            }
            Mutation::RestoreCollection { id } => {
                let Some(pos) = self.archived_collections.iter().position(|c| &c.id == id) else {
                    return comp;
                };
                let since = self.archived_collections[pos].archived_at.unwrap_or(i64::MIN);
                self.capture_collection(&mut comp, id);
                let returning = self.matching_ids(&self.archived_tasks, |t| {
                    &t.collection_id == id && t.archived_at.is_some_and(|at| at >= since)
                });
                self.capture_tasks(&mut comp, &returning);

                let mut collection = self.archived_collections.remove(pos);
                collection.archived_at = None;
                self.collections.push(collection);
                move_tasks(&mut self.archived_tasks, &mut self.tasks, &returning, None);
            }
            Mutation::DeleteCollection { id } => {
                if id == INBOX_ID {
                    return comp;
                }
                self.capture_collection(&mut comp, id);
                let mut doomed = self.matching_ids(&self.tasks, |t| &t.collection_id == id);
                doomed.extend(self.matching_ids(&self.archived_tasks, |t| &t.collection_id == id));
                self.capture_tasks(&mut comp, &doomed);

                self.collections.retain(|c| &c.id != id);
                self.archived_collections.retain(|c| &c.id != id);
                self.tasks.retain(|t| &t.collection_id != id);
                self.archived_tasks.retain(|t| &t.collection_id != id);
            }
            Mutation::AddTask(task) => {
                if locate(&self.tasks, &self.archived_tasks, &task.id) != Slot::Absent {
                    return comp;
                }
                self.capture_task(&mut comp, &task.id);
                let mut task = task.clone();
                task.archived_at = None;
                self.tasks.insert(0, task);
            }
            Mutation::ToggleTask { id } => {
                self.capture_task(&mut comp, id);
                if let Some(t) = self.tasks.iter_mut().find(|t| &t.id == id) {
                    t.done = !t.done;
                }
            }
            Mutation::UpdateTaskText { id, text } => {
                self.capture_task(&mut comp, id);
                if let Some(t) = find_mut(&mut self.tasks, &mut self.archived_tasks, id) {
                    t.text = text.clone();
                }
            }
            Mutation::MoveTask { id, collection_id } => {
                self.capture_task(&mut comp, id);
                if let Some(t) = find_mut(&mut self.tasks, &mut self.archived_tasks, id) {
                    t.collection_id = collection_id.clone();
                }
            }
            Mutation::ArchiveTask { id, at } => {
                if !self.tasks.iter().any(|t| &t.id == id) {
                    return comp;
                }
                self.capture_task(&mut comp, id);
                move_tasks(&mut self.tasks, &mut self.archived_tasks, &[id.clone()], Some(*at));
            }
            Mutation::RestoreTask { id } => {
                if !self.archived_tasks.iter().any(|t| &t.id == id) {
                    return comp;
                }
                self.capture_task(&mut comp, id);
                move_tasks(&mut self.archived_tasks, &mut self.tasks, &[id.clone()], None);
            }
            Mutation::DeleteTask { id } | Mutation::DeleteTaskForever { id } => {
                self.capture_task(&mut comp, id);
                self.tasks.retain(|t| &t.id != id);
                self.archived_tasks.retain(|t| &t.id != id);
            }
            Mutation::ReorderTasks(updates) => {
                for update in updates {
                    self.capture_task(&mut comp, &update.id);
                    if let Some(t) = self.tasks.iter_mut().find(|t| t.id == update.id) {
                        t.sort_order = update.sort_order;
                    }
                }
            }
            Mutation::ClearCompleted { collection_id, at } => {
                let clearing = self.matching_ids(&self.tasks, |t| {
                    t.done && collection_id.as_ref().map_or(true, |c| &t.collection_id == c)
                });
                self.capture_tasks(&mut comp, &clearing);
                move_tasks(&mut self.tasks, &mut self.archived_tasks, &clearing, Some(*at));
            }
            Mutation::EmptyArchive => {
                let archived_ids: Vec<String> = self.archived_collections.iter().map(|c| c.id.clone()).collect();
                for id in &archived_ids {
                    self.capture_collection(&mut comp, id);
                }
                let mut doomed = self.matching_ids(&self.archived_tasks, |_| true);
                doomed.extend(self.matching_ids(&self.tasks, |t| archived_ids.contains(&t.collection_id)));
                self.capture_tasks(&mut comp, &doomed);

                self.archived_collections.clear();
                self.archived_tasks.clear();
                self.tasks.retain(|t| !archived_ids.contains(&t.collection_id));
            }
            Mutation::SaveSetting { key, value } => {
                comp.settings.push((key.clone(), self.settings.get(key).cloned()));
                self.settings.insert(key.clone(), value.clone());
            }
        }
        comp
    }

    /// Undo a failed mutation, restoring only the records it touched
    pub fn compensate(&mut self, comp: Compensation) {
        put_back(&mut self.collections, &mut self.archived_collections, comp.collections);
        put_back(&mut self.tasks, &mut self.archived_tasks, comp.tasks);
        for (key, previous) in comp.settings.into_iter().rev() {
            match previous {
                Some(value) => self.settings.insert(key, value),
                None => self.settings.remove(&key),
            };
        }
    }

    /// Take the sort order the backend assigned to a new collection.
    /// Everything else stays as later optimistic edits left it.
    pub fn merge_stored_collection(&mut self, stored: &Collection) {
        if let Some(c) = find_mut(&mut self.collections, &mut self.archived_collections, &stored.id) {
            c.sort_order = stored.sort_order;
        }
    }

    /// Take the creation time the backend stamped on a new task
    pub fn merge_stored_task(&mut self, stored: &Task) {
        if let Some(t) = find_mut(&mut self.tasks, &mut self.archived_tasks, &stored.id) {
            t.created_at = stored.created_at;
        }
    }

    fn matching_ids(&self, list: &[Task], pred: impl Fn(&Task) -> bool) -> Vec<String> {
        list.iter().filter(|t| pred(t)).map(|t| t.id.clone()).collect()
    }

    fn capture_collection(&self, comp: &mut Compensation, id: &str) {
        if !comp.collections.iter().any(|s| s.id == id) {
            comp.collections.push(Snapshot {
                id: id.to_string(),
                slot: locate(&self.collections, &self.archived_collections, id),
            });
        }
    }

    fn capture_task(&self, comp: &mut Compensation, id: &str) {
        if !comp.tasks.iter().any(|s| s.id == id) {
            comp.tasks.push(Snapshot {
                id: id.to_string(),
                slot: locate(&self.tasks, &self.archived_tasks, id),
            });
        }
    }

    fn capture_tasks(&self, comp: &mut Compensation, ids: &[String]) {
        for id in ids {
            self.capture_task(comp, id);
        }
    }
}

fn locate<T: Keyed + Clone>(active: &[T], archived: &[T], id: &str) -> Slot<T> {
    if let Some(i) = active.iter().position(|r| r.key() == id) {
        return Slot::Active(i, active[i].clone());
    }
    if let Some(i) = archived.iter().position(|r| r.key() == id) {
        return Slot::Archived(i, archived[i].clone());
    }
    Slot::Absent
}

fn find_mut<'a, T: Keyed>(active: &'a mut [T], archived: &'a mut [T], id: &str) -> Option<&'a mut T> {
    active
        .iter_mut()
        .chain(archived.iter_mut())
        .find(|r| r.key() == id)
}

/// Move the tasks named in `ids` from `from` to the front of `to`,
/// keeping their relative order and stamping `archived_at`
fn move_tasks(from: &mut Vec<Task>, to: &mut Vec<Task>, ids: &[String], archived_at: Option<i64>) {
    if ids.is_empty() {
        return;
    }
    let (mut moving, staying): (Vec<Task>, Vec<Task>) = from.drain(..).partition(|t| ids.contains(&t.id));
    *from = staying;
    for task in &mut moving {
        task.archived_at = archived_at;
    }
    moving.append(to);
    *to = moving;
}

/// Overwrite records still in their old list; move back or drop the rest.
/// Rows added since the snapshot keep their positions.
fn put_back<T: Keyed>(active: &mut Vec<T>, archived: &mut Vec<T>, snapshots: Vec<Snapshot<T>>) {
    let mut displaced: Vec<Slot<T>> = Vec::new();
    for Snapshot { id, slot } in snapshots {
        let id = id.as_str();
        match slot {
            Slot::Active(i, record) => match active.iter_mut().find(|r| r.key() == id) {
                Some(current) => *current = record,
                None => {
                    archived.retain(|r| r.key() != id);
                    displaced.push(Slot::Active(i, record));
                }
            },
            Slot::Archived(i, record) => match archived.iter_mut().find(|r| r.key() == id) {
                Some(current) => *current = record,
                None => {
                    active.retain(|r| r.key() != id);
                    displaced.push(Slot::Archived(i, record));
                }
            },
            Slot::Absent => {
                active.retain(|r| r.key() != id);
                archived.retain(|r| r.key() != id);
            }
        }
    }
    displaced.sort_by_key(Slot::position);
    for slot in displaced {
        match slot {
            Slot::Active(i, record) => active.insert(i.min(active.len()), record),
            Slot::Archived(i, record) => archived.insert(i.min(archived.len()), record),
            Slot::Absent => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(id: &str) -> Collection {
        Collection::new(id, id.to_uppercase(), "#85B8CB")
    }

    fn task(id: &str, collection_id: &str, created_at: i64) -> Task {
        Task::new(id, format!("task {}", id), collection_id, created_at)
    }

    fn sample() -> Mirror {
        let mut mirror = Mirror {
            collections: vec![collection(INBOX_ID), collection("work"), collection("home")],
            tasks: vec![
                task("w1", "work", 3),
                task("i1", INBOX_ID, 2),
                task("w2", "work", 1),
                task("h1", "home", 0),
            ],
            ..Default::default()
        };
        mirror.tasks[2].done = true;
        let mut old = task("w0", "work", 0);
        old.archived_at = Some(10);
        mirror.archived_tasks.push(old);
        mirror.settings.insert("theme".into(), "aura".into());
        mirror
    }

    fn ids<T: Keyed>(list: &[T]) -> Vec<&str> {
        list.iter().map(Keyed::key).collect()
    }

    #[test]
    fn test_add_task_prepends_and_rolls_back() {
        let mut mirror = sample();
        let before = mirror.clone();

        let comp = mirror.apply(&Mutation::AddTask(task("new", "work", 99)));
        assert_eq!(mirror.tasks[0].id, "new");
        assert_eq!(mirror.tasks[0].sort_order, 0);

        mirror.compensate(comp);
        assert_eq!(mirror, before);
    }

    #[test]
    fn test_toggle_rolls_back() {
        let mut mirror = sample();
        let before = mirror.clone();

        let comp = mirror.apply(&Mutation::ToggleTask { id: "w1".into() });
        assert!(mirror.tasks[0].done);

        mirror.compensate(comp);
        assert_eq!(mirror, before);
    }

    #[test]
    fn test_archive_collection_moves_tasks_with_one_timestamp() {
        let mut mirror = sample();
        let before = mirror.clone();

        let comp = mirror.apply(&Mutation::ArchiveCollection { id: "work".into(), at: 500 });

        assert_eq!(ids(&mirror.collections), vec![INBOX_ID, "home"]);
        assert_eq!(ids(&mirror.archived_collections), vec!["work"]);
        assert_eq!(mirror.archived_collections[0].archived_at, Some(500));
        assert_eq!(ids(&mirror.tasks), vec!["i1", "h1"]);
        assert_eq!(ids(&mirror.archived_tasks), vec!["w1", "w2", "w0"]);
        assert_eq!(mirror.archived_tasks[0].archived_at, Some(500));
        assert_eq!(mirror.archived_tasks[1].archived_at, Some(500));
        assert_eq!(mirror.archived_tasks[2].archived_at, Some(10));

        mirror.compensate(comp);
        assert_eq!(mirror, before);
    }

    #[test]
    fn test_inbox_is_protected() {
        let mut mirror = sample();
        let before = mirror.clone();

        assert!(mirror.apply(&Mutation::ArchiveCollection { id: INBOX_ID.into(), at: 1 }).is_empty());
        assert!(mirror.apply(&Mutation::DeleteCollection { id: INBOX_ID.into() }).is_empty());
        assert_eq!(mirror, before);
    }

    #[test]
    fn test_restore_collection_keeps_earlier_archives() {
        let mut mirror = sample();
        mirror.apply(&Mutation::ArchiveCollection { id: "work".into(), at: 500 });

        let comp = mirror.apply(&Mutation::RestoreCollection { id: "work".into() });
        assert_eq!(ids(&mirror.collections), vec![INBOX_ID, "home", "work"]);
        assert_eq!(ids(&mirror.archived_tasks), vec!["w0"]);
        assert!(mirror.tasks.iter().any(|t| t.id == "w1" && t.archived_at.is_none()));

        let restored = mirror.clone();
        mirror.compensate(comp);
        assert_ne!(mirror, restored);
        assert_eq!(ids(&mirror.archived_collections), vec!["work"]);
        assert_eq!(ids(&mirror.archived_tasks), vec!["w1", "w2", "w0"]);
    }

    #[test]
    fn test_delete_collection_drops_tasks_everywhere() {
        let mut mirror = sample();
        let before = mirror.clone();

        let comp = mirror.apply(&Mutation::DeleteCollection { id: "work".into() });
        assert_eq!(ids(&mirror.collections), vec![INBOX_ID, "home"]);
        assert_eq!(ids(&mirror.tasks), vec!["i1", "h1"]);
        assert!(mirror.archived_tasks.is_empty());

        mirror.compensate(comp);
        assert_eq!(mirror, before);
    }

    #[test]
    fn test_reorder_rolls_back_sort_orders() {
        let mut mirror = sample();
        let before = mirror.clone();
        let updates = vec![
            SortUpdate { id: "w2".into(), sort_order: 0 },
            SortUpdate { id: "w1".into(), sort_order: 1 },
        ];

        let comp = mirror.apply(&Mutation::ReorderTasks(updates));
        assert_eq!(mirror.tasks[0].sort_order, 1);
        assert_eq!(mirror.tasks[2].sort_order, 0);

        mirror.compensate(comp);
        assert_eq!(mirror, before);
    }

    #[test]
    fn test_clear_completed_respects_scope() {
        let mut mirror = sample();
        mirror.tasks[3].done = true; // h1

        mirror.apply(&Mutation::ClearCompleted { collection_id: Some("work".into()), at: 7 });
        assert_eq!(ids(&mirror.archived_tasks), vec!["w2", "w0"]);
        assert_eq!(ids(&mirror.tasks), vec!["w1", "i1", "h1"]);

        mirror.apply(&Mutation::ClearCompleted { collection_id: None, at: 8 });
        assert_eq!(ids(&mirror.archived_tasks), vec!["h1", "w2", "w0"]);
        assert_eq!(mirror.archived_tasks[0].archived_at, Some(8));
    }

    #[test]
    fn test_empty_archive_rolls_back() {
        let mut mirror = sample();
        mirror.apply(&Mutation::ArchiveCollection { id: "home".into(), at: 20 });
        // Active task left inside an archived collection
        mirror.apply(&Mutation::RestoreTask { id: "h1".into() });
        let before = mirror.clone();

        let comp = mirror.apply(&Mutation::EmptyArchive);
        assert!(mirror.archived_collections.is_empty());
        assert!(mirror.archived_tasks.is_empty());
        assert_eq!(ids(&mirror.tasks), vec!["w1", "i1", "w2"]);

        mirror.compensate(comp);
        assert_eq!(mirror, before);
    }

    #[test]
    fn test_archive_and_restore_task() {
        let mut mirror = sample();

        mirror.apply(&Mutation::ArchiveTask { id: "i1".into(), at: 3 });
        assert_eq!(ids(&mirror.archived_tasks), vec!["i1", "w0"]);

        mirror.apply(&Mutation::RestoreTask { id: "w0".into() });
        assert_eq!(mirror.tasks[0].id, "w0");
        assert_eq!(mirror.tasks[0].archived_at, None);

        // Unknown ids change nothing
        assert!(mirror.apply(&Mutation::ArchiveTask { id: "zzz".into(), at: 1 }).is_empty());
    }

    #[test]
    fn test_setting_rollback() {
        let mut mirror = sample();
        let before = mirror.clone();

        let c1 = mirror.apply(&Mutation::SaveSetting { key: "theme".into(), value: "nord".into() });
        let c2 = mirror.apply(&Mutation::SaveSetting { key: "frameless".into(), value: "true".into() });
        assert_eq!(mirror.setting("theme"), Some("nord"));

        mirror.compensate(c2);
        mirror.compensate(c1);
        assert_eq!(mirror, before);
    }

    #[test]
    fn test_rollback_preserves_unrelated_changes() {
        let mut mirror = sample();

        let toggle = mirror.apply(&Mutation::ToggleTask { id: "w1".into() });
        mirror.apply(&Mutation::AddTask(task("fresh", INBOX_ID, 50)));
        mirror.apply(&Mutation::RenameCollection { id: "home".into(), name: "House".into() });

        mirror.compensate(toggle);

        assert!(!mirror.tasks.iter().find(|t| t.id == "w1").unwrap().done);
        assert_eq!(mirror.tasks[0].id, "fresh");
        assert_eq!(mirror.collection("home").unwrap().name, "House");
    }

    #[test]
    fn test_stored_collection_only_brings_sort_order() {
        let mut mirror = sample();
        mirror.apply(&Mutation::AddCollection(collection("new")));
        mirror.apply(&Mutation::RenameCollection { id: "new".into(), name: "Renamed".into() });

        let mut stored = collection("new");
        stored.sort_order = 42;
        mirror.merge_stored_collection(&stored);

        let merged = mirror.collection("new").unwrap();
        assert_eq!(merged.sort_order, 42);
        assert_eq!(merged.name, "Renamed");
    }

    #[test]
    fn test_stored_task_keeps_later_edits() {
        let mut mirror = sample();
        mirror.apply(&Mutation::AddTask(task("n", INBOX_ID, 10)));
        mirror.apply(&Mutation::ToggleTask { id: "n".into() });
        mirror.apply(&Mutation::UpdateTaskText { id: "n".into(), text: "final".into() });

        let mut stored = task("n", INBOX_ID, 777);
        stored.text = "draft".into();
        mirror.merge_stored_task(&stored);

        let merged = mirror.tasks.iter().find(|t| t.id == "n").unwrap();
        assert!(merged.done);
        assert_eq!(merged.text, "final");
        assert_eq!(merged.created_at, 777);
    }

    #[test]
    fn test_stored_task_follows_archive() {
        let mut mirror = sample();
        mirror.apply(&Mutation::AddTask(task("n", INBOX_ID, 10)));
        mirror.apply(&Mutation::ArchiveTask { id: "n".into(), at: 99 });

        mirror.merge_stored_task(&task("n", INBOX_ID, 777));

        assert!(mirror.tasks.iter().all(|t| t.id != "n"));
        let archived = mirror.archived_tasks.iter().find(|t| t.id == "n").unwrap();
        assert_eq!(archived.archived_at, Some(99));
        assert_eq!(archived.created_at, 777);
    }

    #[test]
    fn test_rollback_returns_archived_row_beside_later_adds() {
        let mut mirror = sample();

        let archive = mirror.apply(&Mutation::ArchiveTask { id: "i1".into(), at: 5 });
        mirror.apply(&Mutation::AddTask(task("late", INBOX_ID, 60)));
        mirror.compensate(archive);

        assert_eq!(mirror.tasks.len(), 5);
        assert_eq!(mirror.tasks[0].id, "late");
        let restored = mirror.tasks.iter().find(|t| t.id == "i1").unwrap();
        assert_eq!(restored.archived_at, None);
        assert_eq!(ids(&mirror.archived_tasks), vec!["w0"]);
    }
}
