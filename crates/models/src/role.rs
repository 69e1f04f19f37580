use sea_orm::{entity::prelude::*, ConnectionTrait};
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};
use crate::{user, user_role};

pub const ROLE_MAX: usize = 64;
pub const TITLE_MAX: usize = 128;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "role")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub version: i32,
    #[sea_orm(unique)]
    pub role: String,
    pub title: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { user_role::Relation::User.def() }
    fn via() -> Option<RelationDef> { Some(user_role::Relation::Role.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

/// Code of the role `register` assigns; seeded by migrations next to `ADMIN`.
pub const DEFAULT_ROLE: &str = "USER";

pub fn validate_role(role: Option<&str>) -> Result<&str, ModelError> {
    errors::require_text("role", role, ROLE_MAX)
}

pub fn validate_title(title: Option<&str>) -> Result<(), ModelError> {
    errors::optional_text("title", title, TITLE_MAX)
}

pub async fn find_by_code<C: ConnectionTrait>(db: &C, code: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Role.eq(code)).one(db).await?)
}
