//! Database queries for documents.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::entity::document::{self, ActiveModel, Entity as Document};
use crate::error::{AppError, AppResult};
use crate::models::{DocumentStatus, DocumentType, ListDocumentsQuery, UpdateDocumentRequest};

use super::DbPool;

impl DbPool {
    /// Insert a new document attached to a case.
    pub async fn insert_document(
        &self,
        title: &str,
        content: Option<&str>,
        document_type: DocumentType,
        status: DocumentStatus,
        case_id: i32,
        user_id: Option<i64>,
    ) -> AppResult<document::Model> {
        let now = Utc::now();

        let model = ActiveModel {
            title: Set(title.to_string()),
            content: Set(content.map(|c| c.to_string())),
            document_type: Set(document_type.as_str().to_string()),
            status: Set(status.as_str().to_string()),
            external_doc_id: Set(None),
            external_doc_url: Set(None),
            case_id: Set(case_id),
            user_id: Set(user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert document: {}", e)))?;

        Ok(result)
    }

    /// Get a document by ID.
    pub async fn get_document_by_id(&self, id: i32) -> AppResult<Option<document::Model>> {
        let result = Document::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get document: {}", e)))?;

        Ok(result)
    }

    /// Apply a partial update limited to title, content and status.
    pub async fn update_document(
        &self,
        id: i32,
        req: &UpdateDocumentRequest,
    ) -> AppResult<document::Model> {
        let existing = self
            .get_document_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Documento".to_string()))?;

        let mut active: ActiveModel = existing.into();

        if let Some(ref title) = req.title {
            active.title = Set(title.clone());
        }
        if let Some(ref content) = req.content {
            active.content = Set(Some(content.clone()));
        }
        if let Some(status) = req.status {
            active.status = Set(status.as_str().to_string());
        }
        active.updated_at = Set(Utc::now());

        let result = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update document: {}", e)))?;

        Ok(result)
    }

    /// Record the external (Google Docs) reference of an exported document.
    pub async fn set_document_external_ref(
        &self,
        id: i32,
        external_doc_id: &str,
        external_doc_url: &str,
    ) -> AppResult<document::Model> {
        let existing = self
            .get_document_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Documento".to_string()))?;

        let mut active: ActiveModel = existing.into();
        active.external_doc_id = Set(Some(external_doc_id.to_string()));
        active.external_doc_url = Set(Some(external_doc_url.to_string()));
        active.updated_at = Set(Utc::now());

        let result = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update document: {}", e)))?;

        Ok(result)
    }

    /// Delete a document.
    pub async fn delete_document(&self, id: i32) -> AppResult<()> {
        let existing = self
            .get_document_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Documento".to_string()))?;

        existing
            .delete(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete document: {}", e)))?;

        Ok(())
    }

    /// List documents with optional filtering, newest first.
    pub async fn list_documents(
        &self,
        query: &ListDocumentsQuery,
    ) -> AppResult<(Vec<document::Model>, u64)> {
        let mut select = Document::find();

        if let Some(case_id) = query.case_id {
            select = select.filter(document::Column::CaseId.eq(case_id));
        }

        if let Some(document_type) = query.document_type {
            select = select.filter(document::Column::DocumentType.eq(document_type.as_str()));
        }

        if let Some(status) = query.status {
            select = select.filter(document::Column::Status.eq(status.as_str()));
        }

        // Count total before pagination
        let total = select
            .clone()
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count documents: {}", e)))?;

        let per_page = query.per_page();
        let offset = (query.page() - 1) * per_page;

        let documents = select
            .order_by_desc(document::Column::CreatedAt)
            .order_by_desc(document::Column::Id)
            .offset(offset)
            .limit(per_page)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list documents: {}", e)))?;

        Ok((documents, total))
    }

    /// All documents of one case, oldest first (report order).
    pub async fn list_documents_by_case(&self, case_id: i32) -> AppResult<Vec<document::Model>> {
        let documents = Document::find()
            .filter(document::Column::CaseId.eq(case_id))
            .order_by_asc(document::Column::CreatedAt)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list case documents: {}", e)))?;

        Ok(documents)
    }
}
