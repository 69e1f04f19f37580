use sea_orm::{entity::prelude::*, sea_query::Expr, ConnectionTrait};
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};

pub const NAME_MAX: usize = 255;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "company")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub version: i32,
    pub name: String,
    pub parent_id: Option<i32>,
    pub deleted: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Parent,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Parent => Entity::belongs_to(Entity).from(Column::ParentId).to(Column::Id).into() }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: Option<&str>) -> Result<&str, ModelError> {
    errors::require_text("name", name, NAME_MAX)
}

/// Rows not marked as logically deleted.
pub fn active() -> Select<Entity> {
    Entity::find().filter(Column::Deleted.eq(false))
}

pub async fn find_active<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Model>, ModelError> {
    Ok(active().filter(Column::Id.eq(id)).one(db).await?)
}

/// Mark a company deleted. Returns `false` when no active row has this id.
pub async fn soft_delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ModelError> {
    let res = Entity::update_many()
        .col_expr(Column::Deleted, Expr::value(true))
        .filter(Column::Id.eq(id))
        .filter(Column::Deleted.eq(false))
        .exec(db)
        .await?;
    Ok(res.rows_affected > 0)
}

/// Clear the delete flag. `None` when no deleted row has this id.
///
/// Neither delete nor restore touches `version` or `updated_at`, so a restored
/// row reads back exactly as it did before deletion.
pub async fn restore<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Model>, ModelError> {
    let res = Entity::update_many()
        .col_expr(Column::Deleted, Expr::value(false))
        .filter(Column::Id.eq(id))
        .filter(Column::Deleted.eq(true))
        .exec(db)
        .await?;
    if res.rows_affected == 0 {
        return Ok(None);
    }
    Ok(Entity::find_by_id(id).one(db).await?)
}

/// True when `candidate` is `id` itself or one of its ancestors would be `id`,
/// i.e. making `candidate` the parent of `id` would close a cycle.
pub async fn would_cycle<C: ConnectionTrait>(db: &C, id: i32, candidate: i32) -> Result<bool, ModelError> {
    let mut cursor = Some(candidate);
    let mut hops = 0usize;
    while let Some(current) = cursor {
        if current == id {
            return Ok(true);
        }
        hops += 1;
        if hops > 10_000 {
            // corrupt data already holds a loop that does not pass through `id`
            return Ok(true);
        }
        cursor = Entity::find_by_id(current).one(db).await?.and_then(|c| c.parent_id);
    }
    Ok(false)
}
