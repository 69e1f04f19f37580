use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use models::{role, user, user_role};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::{Condition, Expr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select, Set,
    TransactionTrait,
};

use super::domain::{UserDraft, UserFilter};
use super::repository::UserRepository;
use crate::errors::ServiceError;
use crate::pagination::PageRequest;
use crate::query::{contains_ci, fetch_page, non_blank};

/// SeaORM-backed user repository.
#[derive(Clone)]
pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

pub fn filtered(filter: &UserFilter) -> Select<user::Entity> {
    let mut select = user::Entity::find();
    if let Some(id) = filter.id {
        select = select.filter(user::Column::Id.eq(id));
    }
    if let Some(v) = non_blank(filter.user_name.as_deref()) {
        select = select.filter(contains_ci(user::Column::UserName, v));
    }
    if let Some(v) = non_blank(filter.first_name.as_deref()) {
        select = select.filter(contains_ci(user::Column::FirstName, v));
    }
    if let Some(v) = non_blank(filter.last_name.as_deref()) {
        select = select.filter(contains_ci(user::Column::LastName, v));
    }
    if !filter.role_ids.is_empty() || !filter.role_codes.is_empty() {
        let mut any_role = Condition::any();
        if !filter.role_ids.is_empty() {
            any_role = any_role.add(user_role::Column::RoleId.is_in(filter.role_ids.iter().copied()));
        }
        if !filter.role_codes.is_empty() {
            let by_code = Query::select()
                .column(role::Column::Id)
                .from(role::Entity)
                .and_where(role::Column::Role.is_in(filter.role_codes.iter().cloned()))
                .to_owned();
            any_role = any_role.add(user_role::Column::RoleId.in_subquery(by_code));
        }
        let holders = Query::select()
            .column(user_role::Column::UserId)
            .from(user_role::Entity)
            .cond_where(any_role)
            .to_owned();
        select = select.filter(user::Column::Id.in_subquery(holders));
    }
    select.order_by_asc(user::Column::Id)
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find(&self, id: i32) -> Result<Option<user::Model>, ServiceError> {
        Ok(user::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<user::Model>, ServiceError> {
        Ok(user::find_by_user_name(&self.db, user_name).await?)
    }

    async fn find_page(&self, filter: &UserFilter, page: PageRequest) -> Result<(Vec<user::Model>, u64), ServiceError> {
        Ok(fetch_page(&self.db, filtered(filter), page).await?)
    }

    async fn count(&self, filter: &UserFilter) -> Result<u64, ServiceError> {
        Ok(filtered(filter).count(&self.db).await?)
    }

    async fn roles_of(&self, user_ids: &[i32]) -> Result<HashMap<i32, Vec<role::Model>>, ServiceError> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let links = user_role::Entity::find()
            .filter(user_role::Column::UserId.is_in(user_ids.iter().copied()))
            .all(&self.db)
            .await?;
        let role_ids: Vec<i32> = links.iter().map(|l| l.role_id).collect();
        let roles: HashMap<i32, role::Model> = self.find_roles(&role_ids).await?.into_iter().map(|r| (r.id, r)).collect();

        let mut out: HashMap<i32, Vec<role::Model>> = HashMap::new();
        for link in links {
            if let Some(r) = roles.get(&link.role_id) {
                out.entry(link.user_id).or_default().push(r.clone());
            }
        }
        for assigned in out.values_mut() {
            assigned.sort_by_key(|r| r.id);
        }
        Ok(out)
    }

    async fn find_roles(&self, ids: &[i32]) -> Result<Vec<role::Model>, ServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = role::Entity::find()
            .filter(role::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(role::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn find_role_by_code(&self, code: &str) -> Result<Option<role::Model>, ServiceError> {
        Ok(role::find_by_code(&self.db, code).await?)
    }

    async fn insert(&self, draft: UserDraft) -> Result<user::Model, ServiceError> {
        let password = draft.password_hash.ok_or_else(|| ServiceError::invalid("password", "must not be null"))?;
        let now = Utc::now().into();
        let am = user::ActiveModel {
            user_name: Set(draft.user_name),
            password: Set(password),
            first_name: Set(draft.first_name),
            last_name: Set(draft.last_name),
            version: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let txn = self.db.begin().await?;
        let saved = am.insert(&txn).await?;
        if let Some(role_ids) = &draft.role_ids {
            user_role::replace_for_user(&txn, saved.id, role_ids).await?;
        }
        txn.commit().await?;
        Ok(saved)
    }

    async fn update(&self, existing: user::Model, draft: UserDraft) -> Result<user::Model, ServiceError> {
        let mut stmt = user::Entity::update_many()
            .col_expr(user::Column::UserName, Expr::value(draft.user_name))
            .col_expr(user::Column::FirstName, Expr::value(draft.first_name))
            .col_expr(user::Column::LastName, Expr::value(draft.last_name))
            .col_expr(user::Column::Version, Expr::value(existing.version + 1))
            .col_expr(user::Column::UpdatedAt, Expr::value(DateTimeWithTimeZone::from(Utc::now())));
        if let Some(hash) = draft.password_hash {
            stmt = stmt.col_expr(user::Column::Password, Expr::value(hash));
        }

        let txn = self.db.begin().await?;
        let res = stmt
            .filter(user::Column::Id.eq(existing.id))
            .filter(user::Column::Version.eq(existing.version))
            .exec(&txn)
            .await?;
        if res.rows_affected == 0 {
            txn.rollback().await?;
            return Err(ServiceError::stale_version("user", existing.id));
        }
        if let Some(role_ids) = &draft.role_ids {
            user_role::replace_for_user(&txn, existing.id, role_ids).await?;
        }
        let saved = user::Entity::find_by_id(existing.id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("user", existing.id))?;
        txn.commit().await?;
        Ok(saved)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let txn = self.db.begin().await?;
        user_role::delete_for_user(&txn, id).await?;
        let res = user::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(res.rows_affected > 0)
    }
}
