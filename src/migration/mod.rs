//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_cases;
mod m20250601_000002_create_documents;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_cases::Migration),
            Box::new(m20250601_000002_create_documents::Migration),
        ]
    }
}
