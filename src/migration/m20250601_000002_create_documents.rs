//! Create documents table.

use sea_orm_migration::prelude::*;

use super::m20250601_000001_create_cases::Case;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Document::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Document::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Document::Title).string().not_null())
                    .col(ColumnDef::new(Document::Content).text())
                    .col(ColumnDef::new(Document::DocumentType).string().not_null())
                    .col(
                        ColumnDef::new(Document::Status)
                            .string()
                            .not_null()
                            .default("Rascunho"),
                    )
                    .col(ColumnDef::new(Document::ExternalDocId).string())
                    .col(ColumnDef::new(Document::ExternalDocUrl).string())
                    .col(ColumnDef::new(Document::CaseId).integer().not_null())
                    .col(ColumnDef::new(Document::UserId).big_integer())
                    .col(
                        ColumnDef::new(Document::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Document::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_documents_case_id")
                            .from(Document::Table, Document::CaseId)
                            .to(Case::Table, Case::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_documents_case_id")
                    .table(Document::Table)
                    .col(Document::CaseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_documents_created_at")
                    .table(Document::Table)
                    .col(Document::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Document::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Document {
    #[sea_orm(iden = "documents")]
    Table,
    Id,
    Title,
    Content,
    DocumentType,
    Status,
    ExternalDocId,
    ExternalDocUrl,
    CaseId,
    UserId,
    CreatedAt,
    UpdatedAt,
}
