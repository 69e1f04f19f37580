use std::collections::HashMap;

use async_trait::async_trait;
use models::{role, user};

use super::domain::{UserDraft, UserFilter};
use crate::errors::ServiceError;
use crate::pagination::PageRequest;

/// Persistence abstraction for users and their role links.
///
/// Writes that touch the user row and its links run atomically.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find(&self, id: i32) -> Result<Option<user::Model>, ServiceError>;
    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<user::Model>, ServiceError>;
    async fn find_page(&self, filter: &UserFilter, page: PageRequest) -> Result<(Vec<user::Model>, u64), ServiceError>;
    async fn count(&self, filter: &UserFilter) -> Result<u64, ServiceError>;
    /// Roles of each user, ordered by role id.
    async fn roles_of(&self, user_ids: &[i32]) -> Result<HashMap<i32, Vec<role::Model>>, ServiceError>;
    async fn find_roles(&self, ids: &[i32]) -> Result<Vec<role::Model>, ServiceError>;
    async fn find_role_by_code(&self, code: &str) -> Result<Option<role::Model>, ServiceError>;
    /// `draft.password_hash` must be set.
    async fn insert(&self, draft: UserDraft) -> Result<user::Model, ServiceError>;
    /// Conflict when the stored version is no longer `existing.version`.
    async fn update(&self, existing: user::Model, draft: UserDraft) -> Result<user::Model, ServiceError>;
    /// Remove the user and its role links. `false` if absent.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}
