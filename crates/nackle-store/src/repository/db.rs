//! Database Connection and Setup
//!
//! Manages the SQLite connection, schema creation, additive migrations,
//! first-run seeding and the unit-of-work transaction scope.

use rusqlite::{params, Connection, Transaction};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{Collection, DomainError, DomainResult, DEFAULT_SETTINGS};

/// Path value selecting a private in-memory database
pub const IN_MEMORY: &str = ":memory:";

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: PathBuf,
}

impl StoreConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self { db_path: db_path.into() }
    }

    pub fn in_memory() -> Self {
        Self::new(IN_MEMORY)
    }

    fn is_in_memory(&self) -> bool {
        self.db_path == Path::new(IN_MEMORY)
    }
}

/// Database state wrapper shared by every repository
#[derive(Clone, Default)]
pub struct DbState {
    pub conn: Arc<Mutex<Option<Connection>>>,
}

impl DbState {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(Some(conn))),
        }
    }

    /// Run a read (or single-statement write) against the connection
    pub async fn read<F, R>(&self, f: F) -> DomainResult<R>
    where
        F: FnOnce(&Connection) -> DomainResult<R> + Send,
        R: Send,
    {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::NotInitialized)?;
        f(conn)
    }

    /// Run `f` inside a single transaction.
    ///
    /// Commits only when `f` returns `Ok`; on error the transaction is
    /// dropped, which rolls every statement back.
    pub async fn unit_of_work<F, R>(&self, f: F) -> DomainResult<R>
    where
        F: FnOnce(&Transaction<'_>) -> DomainResult<R> + Send,
        R: Send,
    {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or(DomainError::NotInitialized)?;
        let tx = conn.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }

    /// Drop the connection; later calls fail with `NotInitialized`
    pub async fn close(&self) {
        self.conn.lock().await.take();
    }
}

/// Open (or create) the database, migrate and seed it
pub async fn init_db(config: &StoreConfig) -> DomainResult<DbState> {
    let conn = if config.is_in_memory() {
        Connection::open_in_memory()?
    } else {
        if let Some(dir) = config.db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .map_err(|e| DomainError::Internal(format!("Failed to create {}: {}", dir.display(), e)))?;
        }
        Connection::open(&config.db_path)?
    };

    configure(&conn)?;
    run_migrations(&conn)?;
    seed(&conn)?;

    log::info!("Database ready at {}", config.db_path.display());
    Ok(DbState::with_connection(conn))
}

fn configure(conn: &Connection) -> DomainResult<()> {
    // In-memory databases answer "memory" here; both are fine
    let mode: String = conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
    log::debug!("journal_mode = {}", mode);
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.pragma_update(None, "foreign_keys", true)?;
    Ok(())
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> DomainResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
    for name in names {
        if name? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Columns added after the first release: (table, column, definition)
const ADDED_COLUMNS: &[(&str, &str, &str)] = &[
    ("todos", "archived_at", "INTEGER DEFAULT NULL"),
    ("todos", "priority", "INTEGER NOT NULL DEFAULT -1"),
    ("collections", "archived_at", "INTEGER DEFAULT NULL"),
];

/// Create tables and apply additive migrations. Safe to run on every start.
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS collections (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            icon TEXT NOT NULL DEFAULT '◆',
            color TEXT NOT NULL DEFAULT '#8B8B8B',
            sort_order INTEGER NOT NULL DEFAULT 0,
            archived_at INTEGER DEFAULT NULL
        );

        CREATE TABLE IF NOT EXISTS todos (
            id TEXT PRIMARY KEY,
            text TEXT NOT NULL,
            done INTEGER NOT NULL DEFAULT 0,
            collection_id TEXT NOT NULL DEFAULT 'inbox' REFERENCES collections(id),
            created_at INTEGER NOT NULL,
            sort_order INTEGER NOT NULL DEFAULT 0,
            archived_at INTEGER DEFAULT NULL,
            priority INTEGER NOT NULL DEFAULT -1
        );

        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_todos_collection ON todos(collection_id);
        CREATE INDEX IF NOT EXISTS idx_todos_done ON todos(done);",
    )?;

    for (table, column, definition) in ADDED_COLUMNS {
        if !column_exists(conn, table, column)? {
            log::info!("Migrating: adding {}.{}", table, column);
            conn.execute(&format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, definition), [])?;
        }
    }

    // Indexes on migrated columns
    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_todos_archived ON todos(archived_at);
        CREATE INDEX IF NOT EXISTS idx_todos_priority ON todos(priority);
        CREATE INDEX IF NOT EXISTS idx_collections_archived ON collections(archived_at);",
    )?;

    Ok(())
}

/// Ensure the inbox and the default settings exist
fn seed(conn: &Connection) -> DomainResult<()> {
    insert_inbox(conn)?;
    let mut stmt = conn.prepare("INSERT OR IGNORE INTO settings (key, value) VALUES (?, ?)")?;
    for (key, value) in DEFAULT_SETTINGS {
        stmt.execute(params![key, value])?;
    }
    Ok(())
}

/// Insert the default inbox unless it is already present
pub(crate) fn insert_inbox(conn: &Connection) -> DomainResult<()> {
    let inbox = Collection::inbox();
    conn.execute(
        "INSERT OR IGNORE INTO collections (id, name, icon, color, sort_order) VALUES (?, ?, ?, ?, 0)",
        params![inbox.id, inbox.name, inbox.icon, inbox.color],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_uninitialized_state_reports_error() {
        let state = DbState::new();
        let result = state.read(|_| Ok(())).await;
        assert_eq!(result, Err(DomainError::NotInitialized));
    }

    #[tokio::test]
    async fn test_unit_of_work_rolls_back_on_error() {
        let state = init_db(&StoreConfig::in_memory()).await.unwrap();

        let result: DomainResult<()> = state
            .unit_of_work(|tx| {
                tx.execute("INSERT INTO settings (key, value) VALUES ('a', '1')", [])?;
                Err(DomainError::Internal("boom".into()))
            })
            .await;
        assert!(result.is_err());

        let count: i64 = state
            .read(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM settings WHERE key = 'a'", [], |r| r.get(0))?))
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_close_releases_connection() {
        let state = init_db(&StoreConfig::in_memory()).await.unwrap();
        state.close().await;
        assert_eq!(state.read(|_| Ok(())).await, Err(DomainError::NotInitialized));
    }

    #[test]
    fn test_legacy_schema_is_migrated() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE collections (id TEXT PRIMARY KEY, name TEXT NOT NULL, icon TEXT NOT NULL DEFAULT '◆',
                color TEXT NOT NULL DEFAULT '#8B8B8B', sort_order INTEGER NOT NULL DEFAULT 0);
             CREATE TABLE todos (id TEXT PRIMARY KEY, text TEXT NOT NULL, done INTEGER NOT NULL DEFAULT 0,
                collection_id TEXT NOT NULL DEFAULT 'inbox', created_at INTEGER NOT NULL,
                sort_order INTEGER NOT NULL DEFAULT 0);
             INSERT INTO collections (id, name) VALUES ('inbox', 'Inbox');
             INSERT INTO todos (id, text, created_at) VALUES ('t1', 'old task', 1);",
        )
        .unwrap();

        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        assert!(column_exists(&conn, "todos", "archived_at").unwrap());
        assert!(column_exists(&conn, "todos", "priority").unwrap());
        assert!(column_exists(&conn, "collections", "archived_at").unwrap());

        let (text, priority): (String, i64) = conn
            .query_row("SELECT text, priority FROM todos WHERE id = 't1'", [], |r| Ok((r.get(0)?, r.get(1)?)))
            .unwrap();
        assert_eq!(text, "old task");
        assert_eq!(priority, -1);
    }
}
