//! Collection Repository Implementation
//!
//! SQLite-backed implementation of Repository<Collection> and
//! ArchivableRepository<Collection>. Archive, restore and delete cascade
//! to the collection's tasks inside one transaction.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Params, Row};

use crate::domain::{
    is_inbox, new_id, now_millis, Collection, DomainError, DomainResult, DEFAULT_COLOR, DEFAULT_ICON,
};
use super::db::DbState;
use super::traits::{ArchivableRepository, Repository};

const COLUMNS: &str = "id, name, icon, color, sort_order, archived_at";

/// SQLite implementation of Collection repository
#[derive(Clone)]
pub struct CollectionRepository {
    db: DbState,
}

impl CollectionRepository {
    pub fn new(db: DbState) -> Self {
        Self { db }
    }

    pub async fn rename(&self, id: &str, name: &str) -> DomainResult<()> {
        let name = validate_name(name)?;
        self.db
            .read(|conn| {
                conn.execute("UPDATE collections SET name = ? WHERE id = ?", params![name, id])?;
                Ok(())
            })
            .await
    }

    /// Archive the collection and its active tasks with one timestamp
    pub async fn archive_at(&self, id: &str, archived_at: i64) -> DomainResult<()> {
        if is_inbox(id) {
            log::debug!("Ignoring archive of the inbox");
            return Ok(());
        }
        self.db
            .unit_of_work(|tx| {
                let marked = tx.execute(
                    "UPDATE collections SET archived_at = ? WHERE id = ? AND archived_at IS NULL",
                    params![archived_at, id],
                )?;
                if marked == 0 {
                    return Ok(());
                }
                let tasks = tx.execute(
                    "UPDATE todos SET archived_at = ? WHERE collection_id = ? AND archived_at IS NULL",
                    params![archived_at, id],
                )?;
                log::info!("Archived collection {} with {} task(s)", id, tasks);
                Ok(())
            })
            .await
    }
}

#[async_trait]
impl Repository<Collection> for CollectionRepository {
    /// Appends after the current last collection
    async fn create(&self, entity: &Collection) -> DomainResult<Collection> {
        let mut collection = entity.clone();
        collection.name = validate_name(&entity.name)?.to_string();
        if collection.id.is_empty() {
            collection.id = new_id();
        }
        if collection.icon.is_empty() {
            collection.icon = DEFAULT_ICON.to_string();
        }
        if collection.color.is_empty() {
            collection.color = DEFAULT_COLOR.to_string();
        }
        collection.archived_at = None;

        self.db
            .unit_of_work(move |tx| {
                let max: i64 =
                    tx.query_row("SELECT COALESCE(MAX(sort_order), 0) FROM collections", [], |r| r.get(0))?;
                collection.sort_order = max + 1;
                tx.execute(
                    "INSERT INTO collections (id, name, icon, color, sort_order) VALUES (?, ?, ?, ?, ?)",
                    params![collection.id, collection.name, collection.icon, collection.color, collection.sort_order],
                )?;
                Ok(collection)
            })
            .await
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Collection>> {
        self.db
            .read(|conn| {
                let sql = format!("SELECT {} FROM collections WHERE id = ?", COLUMNS);
                Ok(conn.query_row(&sql, [id], row_to_collection).optional()?)
            })
            .await
    }

    async fn list(&self) -> DomainResult<Vec<Collection>> {
        self.db
            .read(|conn| {
                query_collections(
                    conn,
                    &format!("SELECT {} FROM collections WHERE archived_at IS NULL ORDER BY sort_order, rowid", COLUMNS),
                    [],
                )
            })
            .await
    }

    /// Removes the collection and every task in it
    async fn delete(&self, id: &str) -> DomainResult<()> {
        if is_inbox(id) {
            log::debug!("Ignoring delete of the inbox");
            return Ok(());
        }
        self.db
            .unit_of_work(|tx| {
                let tasks = tx.execute("DELETE FROM todos WHERE collection_id = ?", [id])?;
                tx.execute("DELETE FROM collections WHERE id = ?", [id])?;
                log::info!("Deleted collection {} with {} task(s)", id, tasks);
                Ok(())
            })
            .await
    }
}

#[async_trait]
impl ArchivableRepository<Collection> for CollectionRepository {
    async fn list_archived(&self) -> DomainResult<Vec<Collection>> {
        self.db
            .read(|conn| {
                query_collections(
                    conn,
                    &format!(
                        "SELECT {} FROM collections WHERE archived_at IS NOT NULL ORDER BY archived_at DESC",
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

    /// Restores the collection and the tasks archived with it. Tasks that
    /// were archived on their own before the collection stay archived.
    async fn restore(&self, id: &str) -> DomainResult<()> {
        self.db
            .unit_of_work(|tx| {
                let archived_at: Option<i64> = tx
                    .query_row("SELECT archived_at FROM collections WHERE id = ?", [id], |r| r.get(0))
                    .optional()?
                    .flatten();
                let Some(archived_at) = archived_at else {
                    return Ok(());
                };
                let tasks = tx.execute(
                    "UPDATE todos SET archived_at = NULL WHERE collection_id = ? AND archived_at >= ?",
                    params![id, archived_at],
                )?;
                tx.execute("UPDATE collections SET archived_at = NULL WHERE id = ?", [id])?;
                log::info!("Restored collection {} with {} task(s)", id, tasks);
                Ok(())
            })
            .await
    }
}

fn validate_name(name: &str) -> DomainResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::InvalidInput("Collection name cannot be empty".to_string()));
    }
    Ok(name)
}

fn query_collections(conn: &Connection, sql: &str, params: impl Params) -> DomainResult<Vec<Collection>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, row_to_collection)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

fn row_to_collection(row: &Row<'_>) -> rusqlite::Result<Collection> {
    Ok(Collection {
        id: row.get(0)?,
        name: row.get(1)?,
        icon: row.get(2)?,
        color: row.get(3)?,
        sort_order: row.get(4)?,
        archived_at: row.get(5)?,
    })
}
