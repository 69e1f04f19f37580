use sea_orm::{entity::prelude::*, ConnectionTrait};
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};
use crate::{role, user_role};

pub const USER_NAME_MAX: usize = 64;
pub const PERSON_NAME_MAX: usize = 128;
pub const PASSWORD_MIN: usize = 8;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub version: i32,
    #[sea_orm(unique)]
    pub user_name: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl Related<role::Entity> for Entity {
    fn to() -> RelationDef { user_role::Relation::Role.def() }
    fn via() -> Option<RelationDef> { Some(user_role::Relation::User.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_user_name(user_name: Option<&str>) -> Result<&str, ModelError> {
    errors::require_text("userName", user_name, USER_NAME_MAX)
}

/// Plain-text password rule, applied before hashing.
pub fn validate_password(password: Option<&str>) -> Result<&str, ModelError> {
    let p = errors::require_text("password", password, 128)?;
    if p.chars().count() < PASSWORD_MIN {
        return Err(ModelError::invalid("password", format!("length must be at least {PASSWORD_MIN}")));
    }
    Ok(p)
}

pub fn validate_person_names(first_name: Option<&str>, last_name: Option<&str>) -> Result<(), ModelError> {
    errors::optional_text("firstName", first_name, PERSON_NAME_MAX)?;
    errors::optional_text("lastName", last_name, PERSON_NAME_MAX)
}

pub async fn find_by_user_name<C: ConnectionTrait>(db: &C, user_name: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::UserName.eq(user_name)).one(db).await?)
}
