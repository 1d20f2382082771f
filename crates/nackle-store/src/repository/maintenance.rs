//! Maintenance Operations
//!
//! Bulk purges that span both tables. Each runs as one transaction.

use serde::{Deserialize, Serialize};

use crate::domain::DomainResult;
use super::db::{insert_inbox, DbState};

/// Rows removed by `empty_archive`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeReport {
    pub tasks: usize,
    pub collections: usize,
}

#[derive(Clone)]
pub struct Maintenance {
    db: DbState,
}

impl Maintenance {
    pub fn new(db: DbState) -> Self {
        Self { db }
    }

    /// Hard-delete archived tasks, every task of an archived collection,
    /// and the archived collections themselves
    pub async fn empty_archive(&self) -> DomainResult<PurgeReport> {
        self.db
            .unit_of_work(|tx| {
                let mut tasks = tx.execute("DELETE FROM todos WHERE archived_at IS NOT NULL", [])?;
                tasks += tx.execute(
                    "DELETE FROM todos WHERE collection_id IN
                        (SELECT id FROM collections WHERE archived_at IS NOT NULL)",
                    [],
                )?;
                let collections = tx.execute("DELETE FROM collections WHERE archived_at IS NOT NULL", [])?;
                log::info!("Emptied archive: {} task(s), {} collection(s)", tasks, collections);
                Ok(PurgeReport { tasks, collections })
            })
            .await
    }

    /// Delete every task and collection, then recreate the default inbox.
    /// Settings are untouched.
    pub async fn wipe_all(&self) -> DomainResult<()> {
        self.db
            .unit_of_work(|tx| {
                let tasks = tx.execute("DELETE FROM todos", [])?;
                let collections = tx.execute("DELETE FROM collections", [])?;
                insert_inbox(tx)?;
                log::warn!("Wiped all data: {} task(s), {} collection(s)", tasks, collections);
                Ok(())
            })
            .await
    }
}
