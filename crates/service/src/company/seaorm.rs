use async_trait::async_trait;
use chrono::Utc;
use models::company;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select, Set,
};

use super::domain::{CompanyDraft, CompanyFilter};
use super::repository::CompanyRepository;
use crate::errors::ServiceError;
use crate::pagination::PageRequest;
use crate::query::{contains_ci, fetch_page, non_blank};

/// SeaORM-backed company repository.
#[derive(Clone)]
pub struct SeaOrmCompanyRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCompanyRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

/// Translate a company filter into a query ordered by id.
pub fn filtered(filter: &CompanyFilter) -> Select<company::Entity> {
    let mut select = company::Entity::find().filter(company::Column::Deleted.eq(filter.deleted));
    if let Some(id) = filter.id {
        select = select.filter(company::Column::Id.eq(id));
    }
    if let Some(name) = non_blank(filter.name.as_deref()) {
        select = select.filter(contains_ci(company::Column::Name, name));
    }
    if let Some(parent_id) = filter.parent_id {
        select = select.filter(company::Column::ParentId.eq(parent_id));
    }
    select.order_by_asc(company::Column::Id)
}

#[async_trait]
impl CompanyRepository for SeaOrmCompanyRepository {
    async fn find(&self, id: i32, include_deleted: bool) -> Result<Option<company::Model>, ServiceError> {
        let found = if include_deleted {
            company::Entity::find_by_id(id).one(&self.db).await?
        } else {
            company::find_active(&self.db, id).await?
        };
        Ok(found)
    }

    async fn find_many(&self, ids: &[i32]) -> Result<Vec<company::Model>, ServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = company::Entity::find()
            .filter(company::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn find_page(&self, filter: &CompanyFilter, page: PageRequest) -> Result<(Vec<company::Model>, u64), ServiceError> {
        Ok(fetch_page(&self.db, filtered(filter), page).await?)
    }

    async fn count(&self, filter: &CompanyFilter) -> Result<u64, ServiceError> {
        Ok(filtered(filter).count(&self.db).await?)
    }

    async fn insert(&self, draft: CompanyDraft) -> Result<company::Model, ServiceError> {
        let now = Utc::now().into();
        let am = company::ActiveModel {
            name: Set(draft.name),
            parent_id: Set(draft.parent_id),
            version: Set(0),
            deleted: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        Ok(am.insert(&self.db).await?)
    }

    async fn update(&self, existing: company::Model, draft: CompanyDraft) -> Result<company::Model, ServiceError> {
        // zero rows when another writer bumped `version` after `existing` was read
        let res = company::Entity::update_many()
            .col_expr(company::Column::Name, Expr::value(draft.name))
            .col_expr(company::Column::ParentId, Expr::value(draft.parent_id))
            .col_expr(company::Column::Version, Expr::value(existing.version + 1))
            .col_expr(company::Column::UpdatedAt, Expr::value(DateTimeWithTimeZone::from(Utc::now())))
            .filter(company::Column::Id.eq(existing.id))
            .filter(company::Column::Version.eq(existing.version))
            .filter(company::Column::Deleted.eq(false))
            .exec(&self.db)
            .await?;
        if res.rows_affected == 0 {
            return Err(ServiceError::stale_version("company", existing.id));
        }
        company::Entity::find_by_id(existing.id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("company", existing.id))
    }

    async fn soft_delete(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(company::soft_delete(&self.db, id).await?)
    }

    async fn restore(&self, id: i32) -> Result<Option<company::Model>, ServiceError> {
        Ok(company::restore(&self.db, id).await?)
    }

    async fn would_cycle(&self, id: i32, parent_id: i32) -> Result<bool, ServiceError> {
        Ok(company::would_cycle(&self.db, id, parent_id).await?)
    }
}
