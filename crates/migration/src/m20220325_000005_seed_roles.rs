//! Seed the two well-known role codes. `USER` is what registration assigns.
use chrono::Utc;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const SEED: [(&str, &str); 2] = [("ADMIN", "Administrator"), ("USER", "User")];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let now = Utc::now().fixed_offset();
        let mut insert = Query::insert();
        insert
            .into_table(Role::Table)
            .columns([Role::Role, Role::Title, Role::Version, Role::CreatedAt, Role::UpdatedAt]);
        for (code, title) in SEED {
            insert.values_panic([code.into(), title.into(), 0i32.into(), now.into(), now.into()]);
        }
        manager.exec_stmt(insert.to_owned()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let codes = SEED.iter().map(|(code, _)| *code);
        let delete = Query::delete()
            .from_table(Role::Table)
            .and_where(Expr::col(Role::Role).is_in(codes))
            .to_owned();
        manager.exec_stmt(delete).await
    }
}

#[derive(DeriveIden)]
enum Role { Table, Role, Title, Version, CreatedAt, UpdatedAt }
