//! Settings Repository
//!
//! Key/value preferences stored in the `settings` table.

use rusqlite::{params, OptionalExtension};

use crate::domain::{DomainError, DomainResult, SettingsMap, DEFAULT_SETTINGS};
use super::db::DbState;

#[derive(Clone)]
pub struct SettingsRepository {
    db: DbState,
}

impl SettingsRepository {
    pub fn new(db: DbState) -> Self {
        Self { db }
    }

    pub async fn get_all(&self) -> DomainResult<SettingsMap> {
        self.db
            .read(|conn| {
                let mut stmt = conn.prepare("SELECT key, value FROM settings")?;
                let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?;
                Ok(rows.collect::<Result<SettingsMap, _>>()?)
            })
            .await
    }

    pub async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        self.db
            .read(|conn| {
                Ok(conn
                    .query_row("SELECT value FROM settings WHERE key = ?", [key], |r| r.get(0))
                    .optional()?)
            })
            .await
    }

    /// Insert or replace a single key
    pub async fn save(&self, key: &str, value: &str) -> DomainResult<()> {
        if key.is_empty() {
            return Err(DomainError::InvalidInput("Setting key cannot be empty".to_string()));
        }
        self.db
            .read(|conn| {
                conn.execute(
                    "INSERT INTO settings (key, value) VALUES (?, ?)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                    params![key, value],
                )?;
                Ok(())
            })
            .await
    }

    /// Insert defaults for missing keys; existing values are kept
    pub async fn seed_defaults(&self) -> DomainResult<usize> {
        self.db
            .unit_of_work(|tx| {
                let mut stmt = tx.prepare("INSERT OR IGNORE INTO settings (key, value) VALUES (?, ?)")?;
                let mut inserted = 0;
                for (key, value) in DEFAULT_SETTINGS {
                    inserted += stmt.execute(params![key, value])?;
                }
                Ok(inserted)
            })
            .await
    }
}
