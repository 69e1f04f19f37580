use async_trait::async_trait;
use models::role;

use super::domain::{RoleDraft, RoleFilter};
use crate::errors::ServiceError;
use crate::pagination::PageRequest;

/// Persistence abstraction for roles.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn find(&self, id: i32) -> Result<Option<role::Model>, ServiceError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<role::Model>, ServiceError>;
    async fn find_page(&self, filter: &RoleFilter, page: PageRequest) -> Result<(Vec<role::Model>, u64), ServiceError>;
    async fn count(&self, filter: &RoleFilter) -> Result<u64, ServiceError>;
    async fn insert(&self, draft: RoleDraft) -> Result<role::Model, ServiceError>;
    /// Conflict when the stored version is no longer `existing.version`.
    async fn update(&self, existing: role::Model, draft: RoleDraft) -> Result<role::Model, ServiceError>;
    /// Remove the role and every user assignment of it. `false` if absent.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}
