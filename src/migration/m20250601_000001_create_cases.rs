//! Create cases table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Case::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Case::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Case::Number).string().not_null())
                    .col(ColumnDef::new(Case::Title).string().not_null())
                    .col(ColumnDef::new(Case::Description).text())
                    .col(
                        ColumnDef::new(Case::Status)
                            .string()
                            .not_null()
                            .default("Em Andamento"),
                    )
                    .col(
                        ColumnDef::new(Case::Priority)
                            .string()
                            .not_null()
                            .default("Média"),
                    )
                    .col(ColumnDef::new(Case::Organ).string())
                    .col(ColumnDef::new(Case::Modality).string())
                    .col(ColumnDef::new(Case::ObjectDescription).text())
                    .col(ColumnDef::new(Case::EstimatedValue).double())
                    .col(ColumnDef::new(Case::Deadline).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Case::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Case::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Case::UserId).big_integer())
                    .to_owned(),
            )
            .await?;

        // Business number is the unique key clients create cases under.
        manager
            .create_index(
                Index::create()
                    .name("idx_cases_number_unique")
                    .table(Case::Table)
                    .col(Case::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cases_created_at")
                    .table(Case::Table)
                    .col(Case::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cases_status")
                    .table(Case::Table)
                    .col(Case::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Case::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Case {
    #[sea_orm(iden = "cases")]
    Table,
    Id,
    Number,
    Title,
    Description,
    Status,
    Priority,
    Organ,
    Modality,
    ObjectDescription,
    EstimatedValue,
    Deadline,
    CreatedAt,
    UpdatedAt,
    UserId,
}
