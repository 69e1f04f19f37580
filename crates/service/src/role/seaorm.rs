use async_trait::async_trait;
use chrono::Utc;
use models::{role, user_role};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select, Set,
    TransactionTrait,
};

use super::domain::{RoleDraft, RoleFilter};
use super::repository::RoleRepository;
use crate::errors::ServiceError;
use crate::pagination::PageRequest;
use crate::query::{contains_ci, fetch_page, non_blank};

/// SeaORM-backed role repository.
#[derive(Clone)]
pub struct SeaOrmRoleRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmRoleRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

pub fn filtered(filter: &RoleFilter) -> Select<role::Entity> {
    let mut select = role::Entity::find();
    if let Some(id) = filter.id {
        select = select.filter(role::Column::Id.eq(id));
    }
    if let Some(code) = non_blank(filter.role.as_deref()) {
        select = select.filter(contains_ci(role::Column::Role, code));
    }
    if let Some(title) = non_blank(filter.title.as_deref()) {
        select = select.filter(contains_ci(role::Column::Title, title));
    }
    select.order_by_asc(role::Column::Id)
}

#[async_trait]
impl RoleRepository for SeaOrmRoleRepository {
    async fn find(&self, id: i32) -> Result<Option<role::Model>, ServiceError> {
        Ok(role::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<role::Model>, ServiceError> {
        Ok(role::find_by_code(&self.db, code).await?)
    }

    async fn find_page(&self, filter: &RoleFilter, page: PageRequest) -> Result<(Vec<role::Model>, u64), ServiceError> {
        Ok(fetch_page(&self.db, filtered(filter), page).await?)
    }

    async fn count(&self, filter: &RoleFilter) -> Result<u64, ServiceError> {
        Ok(filtered(filter).count(&self.db).await?)
    }

    async fn insert(&self, draft: RoleDraft) -> Result<role::Model, ServiceError> {
        let now = Utc::now().into();
        let am = role::ActiveModel {
            role: Set(draft.role),
            title: Set(draft.title),
            version: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        Ok(am.insert(&self.db).await?)
    }

    async fn update(&self, existing: role::Model, draft: RoleDraft) -> Result<role::Model, ServiceError> {
        let res = role::Entity::update_many()
            .col_expr(role::Column::Role, Expr::value(draft.role))
            .col_expr(role::Column::Title, Expr::value(draft.title))
            .col_expr(role::Column::Version, Expr::value(existing.version + 1))
            .col_expr(role::Column::UpdatedAt, Expr::value(DateTimeWithTimeZone::from(Utc::now())))
            .filter(role::Column::Id.eq(existing.id))
            .filter(role::Column::Version.eq(existing.version))
            .exec(&self.db)
            .await?;
        if res.rows_affected == 0 {
            return Err(ServiceError::stale_version("role", existing.id));
        }
        role::Entity::find_by_id(existing.id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("role", existing.id))
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let txn = self.db.begin().await?;
        user_role::delete_for_role(&txn, id).await?;
        let res = role::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(res.rows_affected > 0)
    }
}
