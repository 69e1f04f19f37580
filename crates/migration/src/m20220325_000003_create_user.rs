//! Create `user` table.
//!
//! `password` holds an argon2 PHC string, never the plain text.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(integer(User::Version).default(0))
                    .col(string_len(User::UserName, 64).unique_key())
                    .col(string_len(User::Password, 255))
                    .col(string_len_null(User::FirstName, 128))
                    .col(string_len_null(User::LastName, 128))
                    .col(timestamp_with_time_zone(User::CreatedAt))
                    .col(timestamp_with_time_zone(User::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(User::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum User { Table, Id, Version, UserName, Password, FirstName, LastName, CreatedAt, UpdatedAt }
