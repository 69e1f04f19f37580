use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{role, user};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_role")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub role_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User, Role }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity).from(Column::UserId).to(user::Column::Id).into(),
            Relation::Role => Entity::belongs_to(role::Entity).from(Column::RoleId).to(role::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Replace every role link of a user with `role_ids`.
pub async fn replace_for_user<C: ConnectionTrait>(db: &C, user_id: i32, role_ids: &[i32]) -> Result<(), ModelError> {
    Entity::delete_many().filter(Column::UserId.eq(user_id)).exec(db).await?;
    if role_ids.is_empty() {
        return Ok(());
    }
    let links = role_ids.iter().map(|&role_id| ActiveModel { user_id: Set(user_id), role_id: Set(role_id) });
    Entity::insert_many(links).exec_without_returning(db).await?;
    Ok(())
}

pub async fn delete_for_user<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<(), ModelError> {
    Entity::delete_many().filter(Column::UserId.eq(user_id)).exec(db).await?;
    Ok(())
}

pub async fn delete_for_role<C: ConnectionTrait>(db: &C, role_id: i32) -> Result<(), ModelError> {
    Entity::delete_many().filter(Column::RoleId.eq(role_id)).exec(db).await?;
    Ok(())
}
