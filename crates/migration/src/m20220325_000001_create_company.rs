//! Create `company` table with a nullable self reference to its parent.
//!
//! Companies are never physically removed by the API; `deleted` marks them.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Company::Table)
                    .if_not_exists()
                    .col(pk_auto(Company::Id))
                    .col(integer(Company::Version).default(0))
                    .col(string_len(Company::Name, 255))
                    .col(integer_null(Company::ParentId))
                    .col(boolean(Company::Deleted).default(false))
                    .col(timestamp_with_time_zone(Company::CreatedAt))
                    .col(timestamp_with_time_zone(Company::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_company_parent")
                            .from(Company::Table, Company::ParentId)
                            .to(Company::Table, Company::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Company::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Company { Table, Id, Version, Name, ParentId, Deleted, CreatedAt, UpdatedAt }
