//! Case entity for procurement cases.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cases")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Business number of the case, e.g. "001/2024". Unique.
    #[sea_orm(unique)]
    pub number: String,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    /// Issuing authority ("órgão responsável").
    pub organ: Option<String>,
    /// Procurement modality ("modalidade da licitação").
    pub modality: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub object_description: Option<String>,
    pub estimated_value: Option<f64>,
    pub deadline: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    /// Caller identity; nullable while there is no auth system.
    pub user_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::document::Entity")]
    Documents,
}

impl Related<super::document::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Documents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
