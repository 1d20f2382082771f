//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.

use async_trait::async_trait;
use crate::domain::{DomainResult, Entity};

/// Core repository trait for CRUD operations
///
/// Generic over any Entity type.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Create a new entity, returning the stored row
    async fn create(&self, entity: &T) -> DomainResult<T>;

    /// Find entity by ID (archived rows included)
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<T>>;

    /// List active entities in display order
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Hard delete
    async fn delete(&self, id: &str) -> DomainResult<()>;
}

/// Extension for entities with a soft-delete state
#[async_trait]
pub trait ArchivableRepository<T: Entity>: Repository<T> {
    /// Archived entities, most recently archived first
    async fn list_archived(&self) -> DomainResult<Vec<T>>;

    async fn archive(&self, id: &str) -> DomainResult<()>;

    async fn restore(&self, id: &str) -> DomainResult<()>;
}
