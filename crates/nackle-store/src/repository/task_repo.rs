//! Task Repository Implementation
//!
//! SQLite-backed implementation of Repository<Task> and
//! ArchivableRepository<Task>, plus the task-specific mutations
//! (toggle, reorder, clear completed, move).

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Params, Row};

use crate::domain::{
    new_id, now_millis, ClearScope, DomainError, DomainResult, SortUpdate, Task, INBOX_ID,
};
use super::db::DbState;
use super::traits::{ArchivableRepository, Repository};

const COLUMNS: &str = "t.id, t.text, t.done, t.collection_id, t.created_at, t.sort_order, t.archived_at, t.priority";

/// SQLite implementation of Task repository
#[derive(Clone)]
pub struct TaskRepository {
    db: DbState,
}

impl TaskRepository {
    pub fn new(db: DbState) -> Self {
        Self { db }
    }

    /// Insert at the top of its collection with an explicit creation time
    pub async fn create_at(&self, entity: &Task, created_at: i64) -> DomainResult<Task> {
        let mut task = entity.clone();
        task.text = validate_text(&entity.text)?.to_string();
        if task.id.is_empty() {
            task.id = new_id();
        }
        if task.collection_id.is_empty() {
            task.collection_id = INBOX_ID.to_string();
        }
        task.done = false;
        task.created_at = created_at;
        task.sort_order = 0;
        task.archived_at = None;

        self.db
            .read(move |conn| {
                conn.execute(
                    "INSERT INTO todos (id, text, done, collection_id, created_at, sort_order, priority)
                     VALUES (?, ?, 0, ?, ?, 0, ?)",
                    params![task.id, task.text, task.collection_id, task.created_at, task.priority],
                )?;
                Ok(task)
            })
            .await
    }

    /// Flip `done`. Returns the new value, or `None` if the task is missing.
    pub async fn toggle(&self, id: &str) -> DomainResult<Option<bool>> {
        self.db
            .unit_of_work(|tx| {
                tx.execute("UPDATE todos SET done = CASE WHEN done = 0 THEN 1 ELSE 0 END WHERE id = ?", [id])?;
                Ok(tx.query_row("SELECT done FROM todos WHERE id = ?", [id], |r| r.get(0)).optional()?)
            })
            .await
    }

    pub async fn update_text(&self, id: &str, text: &str) -> DomainResult<()> {
        let text = validate_text(text)?;
        self.db
            .read(|conn| {
                conn.execute("UPDATE todos SET text = ? WHERE id = ?", params![text, id])?;
                Ok(())
            })
            .await
    }

    pub async fn set_priority(&self, id: &str, priority: i64) -> DomainResult<()> {
        self.db
            .read(|conn| {
                conn.execute("UPDATE todos SET priority = ? WHERE id = ?", params![priority, id])?;
                Ok(())
            })
            .await
    }

    /// Fails with `Constraint` when the target collection does not exist
    pub async fn move_to_collection(&self, id: &str, collection_id: &str) -> DomainResult<()> {
        self.db
            .read(|conn| {
                conn.execute("UPDATE todos SET collection_id = ? WHERE id = ?", params![collection_id, id])?;
                Ok(())
            })
            .await
    }

    pub async fn archive_at(&self, id: &str, archived_at: i64) -> DomainResult<()> {
        self.db
            .read(|conn| {
                conn.execute("UPDATE todos SET archived_at = ? WHERE id = ?", params![archived_at, id])?;
                Ok(())
            })
            .await
    }

    /// Apply every sort order in one transaction
    pub async fn reorder(&self, updates: &[SortUpdate]) -> DomainResult<()> {
        if updates.is_empty() {
            return Ok(());
        }
        self.db
            .unit_of_work(|tx| {
                let mut stmt = tx.prepare("UPDATE todos SET sort_order = ? WHERE id = ?")?;
                for update in updates {
                    stmt.execute(params![update.sort_order, update.id])?;
                }
                Ok(())
            })
            .await
    }

    /// Archive every done, active task in scope. Returns the number archived.
    pub async fn clear_completed(&self, scope: &ClearScope) -> DomainResult<usize> {
        let now = now_millis();
        self.db
            .read(|conn| {
                let cleared = match scope {
                    ClearScope::All => conn.execute(
                        "UPDATE todos SET archived_at = ? WHERE done = 1 AND archived_at IS NULL",
                        [now],
                    )?,
                    ClearScope::Collection(collection_id) => conn.execute(
                        "UPDATE todos SET archived_at = ? WHERE done = 1 AND collection_id = ? AND archived_at IS NULL",
                        params![now, collection_id],
                    )?,
                };
                log::info!("Cleared {} completed task(s)", cleared);
                Ok(cleared)
            })
            .await
    }
}

#[async_trait]
impl Repository<Task> for TaskRepository {
    async fn create(&self, entity: &Task) -> DomainResult<Task> {
        self.create_at(entity, now_millis()).await
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Task>> {
        self.db
            .read(|conn| {
                let sql = format!("SELECT {} FROM todos t WHERE t.id = ?", COLUMNS);
                Ok(conn.query_row(&sql, [id], row_to_task).optional()?)
            })
            .await
    }

    /// Active tasks of active collections: undone first, then sort order,
    /// newest first on ties
    async fn list(&self) -> DomainResult<Vec<Task>> {
        self.db
            .read(|conn| {
                query_tasks(
                    conn,
                    &format!(
                        "SELECT {} FROM todos t
                         JOIN collections c ON t.collection_id = c.id
                         WHERE t.archived_at IS NULL AND c.archived_at IS NULL
                         ORDER BY t.done ASC, t.sort_order ASC, t.created_at DESC",
                        COLUMNS
                    ),
                    [],
                )
            })
            .await
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.db
            .read(|conn| {
                conn.execute("DELETE FROM todos WHERE id = ?", [id])?;
                Ok(())
            })
            .await
    }
}

#[async_trait]
impl ArchivableRepository<Task> for TaskRepository {
    async fn list_archived(&self) -> DomainResult<Vec<Task>> {
        self.db
            .read(|conn| {
                query_tasks(
                    conn,
                    &format!(
                        "SELECT {} FROM todos t WHERE t.archived_at IS NOT NULL ORDER BY t.archived_at DESC",
                        COLUMNS
                    ),
                    [],
                )
            })
            .await
    }

    async fn archive(&self, id: &str) -> DomainResult<()> {
        self.archive_at(id, now_millis()).await
    }

    async fn restore(&self, id: &str) -> DomainResult<()> {
        self.db
            .read(|conn| {
                conn.execute("UPDATE todos SET archived_at = NULL WHERE id = ?", [id])?;
                Ok(())
            })
            .await
    }
}

fn validate_text(text: &str) -> DomainResult<&str> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DomainError::InvalidInput("Task text cannot be empty".to_string()));
    }
    Ok(text)
}

fn query_tasks(conn: &Connection, sql: &str, params: impl Params) -> DomainResult<Vec<Task>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, row_to_task)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

fn row_to_task(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        text: row.get(1)?,
        done: row.get(2)?,
        collection_id: row.get(3)?,
        created_at: row.get(4)?,
        sort_order: row.get(5)?,
        archived_at: row.get(6)?,
        priority: row.get(7)?,
    })
}
