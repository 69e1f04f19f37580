//! Generic CRUD contract shared by every entity service.
//!
//! The HTTP layer is written once against these traits; each entity service
//! plugs in its own model, id type, validation and select projection.

use std::fmt::Display;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::errors::ServiceError;
use crate::pagination::{Page, PageRequest};

/// Lightweight `{id, text}` projection used by UI pickers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectItem<Id> {
    pub id: Id,
    pub text: String,
}

#[async_trait]
pub trait CrudService: Send + Sync + 'static {
    /// Wire shape; doubles as the filter-by-example shape, so every field
    /// must tolerate being absent.
    type Model: Serialize + DeserializeOwned + Default + Send + Sync + 'static;
    type Id: DeserializeOwned + Serialize + Copy + Display + Send + Sync + 'static;

    /// Entity name used in messages and logs.
    fn entity_name(&self) -> &'static str;

    async fn find_by_id(&self, id: Self::Id) -> Result<Self::Model, ServiceError>;

    async fn find_all(&self, filter: Self::Model, page: PageRequest) -> Result<Page<Self::Model>, ServiceError>;

    async fn count_all(&self, filter: Self::Model) -> Result<u64, ServiceError>;

    /// Insert when `id` is absent, update otherwise.
    async fn save(&self, model: Self::Model) -> Result<Self::Model, ServiceError>;

    async fn delete_by_id(&self, id: Self::Id) -> Result<(), ServiceError>;

    async fn find_all_select(&self, filter: Self::Model, page: PageRequest) -> Result<Page<SelectItem<Self::Id>>, ServiceError>;
}

/// Entities removed by flag rather than by row deletion.
#[async_trait]
pub trait LogicalDeleteService: CrudService {
    /// Clear the delete flag of a logically deleted row.
    async fn restore_by_id(&self, id: Self::Id) -> Result<Self::Model, ServiceError>;
}

/// Optimistic-lock check: an omitted version skips the comparison.
pub fn check_version(entity: &str, id: impl Display, sent: Option<i32>, stored: i32) -> Result<(), ServiceError> {
    match sent {
        Some(v) if v != stored => Err(ServiceError::stale_version(entity, id)),
        _ => Ok(()),
    }
}
