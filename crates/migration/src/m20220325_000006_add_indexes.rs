use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Company: children lookup
        manager
            .create_index(
                Index::create()
                    .name("idx_company_parent")
                    .table(Company::Table)
                    .col(Company::ParentId)
                    .to_owned(),
            )
            .await?;

        // Company: default reads filter on the delete flag
        manager
            .create_index(
                Index::create()
                    .name("idx_company_deleted")
                    .table(Company::Table)
                    .col(Company::Deleted)
                    .to_owned(),
            )
            .await?;

        // UserRole: reverse lookup by role
        manager
            .create_index(
                Index::create()
                    .name("idx_user_role_role")
                    .table(UserRole::Table)
                    .col(UserRole::RoleId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_company_parent").table(Company::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_company_deleted").table(Company::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_user_role_role").table(UserRole::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Company { Table, ParentId, Deleted }

#[derive(DeriveIden)]
enum UserRole { Table, RoleId }
