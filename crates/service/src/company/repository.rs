use async_trait::async_trait;
use models::company;

use super::domain::{CompanyDraft, CompanyFilter};
use crate::errors::ServiceError;
use crate::pagination::PageRequest;

/// Persistence abstraction for companies.
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Active row by id; `include_deleted` also returns logically deleted rows.
    async fn find(&self, id: i32, include_deleted: bool) -> Result<Option<company::Model>, ServiceError>;
    /// Rows by id regardless of the delete flag, used to render parents.
    async fn find_many(&self, ids: &[i32]) -> Result<Vec<company::Model>, ServiceError>;
    /// One page of matches ordered by id, plus the total match count.
    async fn find_page(&self, filter: &CompanyFilter, page: PageRequest) -> Result<(Vec<company::Model>, u64), ServiceError>;
    async fn count(&self, filter: &CompanyFilter) -> Result<u64, ServiceError>;
    async fn insert(&self, draft: CompanyDraft) -> Result<company::Model, ServiceError>;
    /// Write `draft` over `existing`, bumping its version. Conflict when the
    /// stored version is no longer `existing.version`.
    async fn update(&self, existing: company::Model, draft: CompanyDraft) -> Result<company::Model, ServiceError>;
    /// `false` when no active row has this id.
    async fn soft_delete(&self, id: i32) -> Result<bool, ServiceError>;
    async fn restore(&self, id: i32) -> Result<Option<company::Model>, ServiceError>;
    /// Whether making `parent_id` the parent of `id` closes a cycle.
    async fn would_cycle(&self, id: i32, parent_id: i32) -> Result<bool, ServiceError>;
}
