//! Migrator registering entity-specific migrations in dependency order.
//! Seed rows and indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20220325_000001_create_company;
mod m20220325_000002_create_role;
mod m20220325_000003_create_user;
mod m20220325_000004_create_user_role;
mod m20220325_000005_seed_roles;
mod m20220325_000006_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20220325_000001_create_company::Migration),
            Box::new(m20220325_000002_create_role::Migration),
            Box::new(m20220325_000003_create_user::Migration),
            Box::new(m20220325_000004_create_user_role::Migration),
            Box::new(m20220325_000005_seed_roles::Migration),
            // Indexes should always be applied last
            Box::new(m20220325_000006_add_indexes::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm_migration::sea_orm::{ConnectionTrait, Database, Statement};

    #[tokio::test]
    async fn up_and_down_on_sqlite() -> Result<(), DbErr> {
        let db = Database::connect("sqlite::memory:").await?;
        Migrator::up(&db, None).await?;

        let backend = db.get_database_backend();
        let row = db
            .query_one(Statement::from_string(backend, "SELECT COUNT(*) AS n FROM role".to_owned()))
            .await?
            .expect("count row");
        let seeded: i64 = row.try_get("", "n")?;
        assert_eq!(seeded, 2);

        Migrator::down(&db, None).await?;
        assert!(db
            .query_one(Statement::from_string(backend, "SELECT COUNT(*) AS n FROM role".to_owned()))
            .await
            .is_err());
        Ok(())
    }
}
