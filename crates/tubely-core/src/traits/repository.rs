//! Generic repository trait for metadata store access.

use async_trait::async_trait;

use crate::result::AppResult;

/// Repository trait implemented by every metadata store backend.
///
/// Generic over the entity and its key so this crate does not depend on
/// the entity definitions. Records are never deleted through this trait.
#[async_trait]
pub trait Repository<Entity, Id>: Send + Sync + 'static
where
    Entity: Send + Sync + 'static + serde::Serialize,
    Id: Send + Sync + 'static,
{
    /// Find an entity by its primary key.
    async fn find_by_id(&self, id: &Id) -> AppResult<Option<Entity>>;

    /// Insert a new entity and return the stored version.
    async fn create(&self, entity: &Entity) -> AppResult<Entity>;

    /// Update an existing entity and return the stored version.
    async fn update(&self, entity: &Entity) -> AppResult<Entity>;
}
