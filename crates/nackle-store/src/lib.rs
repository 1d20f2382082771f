//! Nackle persistent store
//!
//! Domain types and the SQLite-backed repositories for collections,
//! tasks and settings.

pub mod domain;
pub mod repository;

pub use domain::*;
pub use repository::{
    init_db, ArchivableRepository, CollectionRepository, DbState, Maintenance, PurgeReport, Repositories,
    Repository, SettingsRepository, StoreConfig, TaskRepository,
};
