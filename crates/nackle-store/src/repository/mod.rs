//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod db;
mod collection_repo;
mod task_repo;
mod settings_repo;
mod maintenance;

#[cfg(test)]
mod tests;

use crate::domain::DomainResult;

pub use traits::{ArchivableRepository, Repository};
pub use db::{init_db, DbState, StoreConfig, IN_MEMORY};
pub use collection_repo::CollectionRepository;
pub use task_repo::TaskRepository;
pub use settings_repo::SettingsRepository;
pub use maintenance::{Maintenance, PurgeReport};

/// Every repository, sharing one connection
#[derive(Clone)]
pub struct Repositories {
    pub collections: CollectionRepository,
    pub tasks: TaskRepository,
    pub settings: SettingsRepository,
    pub maintenance: Maintenance,
}

impl Repositories {
    pub fn new(db: DbState) -> Self {
        Self {
            collections: CollectionRepository::new(db.clone()),
            tasks: TaskRepository::new(db.clone()),
            settings: SettingsRepository::new(db.clone()),
            maintenance: Maintenance::new(db),
        }
    }

    /// Initialize the database and build the repositories around it
    pub async fn open(config: &StoreConfig) -> DomainResult<Self> {
        let db = init_db(config).await?;
        Ok(Self::new(db))
    }
}
