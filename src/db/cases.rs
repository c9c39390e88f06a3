//! Database queries for cases.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entity::case::{self, ActiveModel, Entity as Case};
use crate::entity::document::{self, Entity as Document};
use crate::error::{AppError, AppResult};
use crate::models::{
    CasePriority, CaseStatsResponse, CaseStatus, CreateCaseRequest, ListCasesQuery,
    UpdateCaseRequest,
};

use super::DbPool;

/// Substring filter over title, number, organ and description.
fn search_condition(term: &str) -> Condition {
    Condition::any()
        .add(case::Column::Title.contains(term))
        .add(case::Column::Number.contains(term))
        .add(case::Column::Organ.contains(term))
        .add(case::Column::Description.contains(term))
}

impl DbPool {
    /// Insert a new case. Fails with `Conflict` when the business number is taken.
    pub async fn insert_case(
        &self,
        req: &CreateCaseRequest,
        deadline: Option<chrono::DateTime<Utc>>,
        user_id: Option<i64>,
    ) -> AppResult<case::Model> {
        if self.find_case_by_number(&req.number).await?.is_some() {
            return Err(AppError::Conflict("número do caso já existe".to_string()));
        }

        let now = Utc::now();

        let model = ActiveModel {
            number: Set(req.number.clone()),
            title: Set(req.title.clone()),
            description: Set(req.description.clone()),
            status: Set(req
                .status
                .unwrap_or(CaseStatus::InProgress)
                .as_str()
                .to_string()),
            priority: Set(req
                .priority
                .unwrap_or(CasePriority::Medium)
                .as_str()
                .to_string()),
            organ: Set(req.organ.clone()),
            modality: Set(req.modality.clone()),
            object_description: Set(req.object_description.clone()),
            estimated_value: Set(req.estimated_value),
            deadline: Set(deadline),
            created_at: Set(now),
            updated_at: Set(now),
            user_id: Set(user_id),
            ..Default::default()
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert case: {}", e)))?;

        Ok(result)
    }

    /// Get a case by ID.
    pub async fn get_case_by_id(&self, id: i32) -> AppResult<Option<case::Model>> {
        let result = Case::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get case: {}", e)))?;

        Ok(result)
    }

    /// Find a case by its business number.
    pub async fn find_case_by_number(&self, number: &str) -> AppResult<Option<case::Model>> {
        let result = Case::find()
            .filter(case::Column::Number.eq(number))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to find case by number: {}", e)))?;

        Ok(result)
    }

    /// Apply a partial update to a case. Absent fields are left unchanged.
    pub async fn update_case(
        &self,
        id: i32,
        req: &UpdateCaseRequest,
        deadline: Option<chrono::DateTime<Utc>>,
    ) -> AppResult<case::Model> {
        let existing = self
            .get_case_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Caso".to_string()))?;

        let mut active: ActiveModel = existing.into();

        if let Some(ref title) = req.title {
            active.title = Set(title.clone());
        }
        if let Some(ref description) = req.description {
            active.description = Set(Some(description.clone()));
        }
        if let Some(status) = req.status {
            active.status = Set(status.as_str().to_string());
        }
        if let Some(priority) = req.priority {
            active.priority = Set(priority.as_str().to_string());
        }
        if let Some(ref organ) = req.organ {
            active.organ = Set(Some(organ.clone()));
        }
        if let Some(ref modality) = req.modality {
            active.modality = Set(Some(modality.clone()));
        }
        if let Some(ref object_description) = req.object_description {
            active.object_description = Set(Some(object_description.clone()));
        }
        if let Some(estimated_value) = req.estimated_value {
            active.estimated_value = Set(Some(estimated_value));
        }
        if let Some(deadline) = deadline {
            active.deadline = Set(Some(deadline));
        }
        active.updated_at = Set(Utc::now());

        let result = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update case: {}", e)))?;

        Ok(result)
    }

    /// Delete a case. Owned documents are removed by the cascading foreign key.
    pub async fn delete_case(&self, id: i32) -> AppResult<()> {
        let existing = self
            .get_case_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Caso".to_string()))?;

        existing
            .delete(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete case: {}", e)))?;

        Ok(())
    }

    /// List cases with optional filtering, newest first.
    pub async fn list_cases(&self, query: &ListCasesQuery) -> AppResult<(Vec<case::Model>, u64)> {
        let mut select = Case::find();

        if let Some(status) = query.status {
            select = select.filter(case::Column::Status.eq(status.as_str()));
        }

        if let Some(priority) = query.priority {
            select = select.filter(case::Column::Priority.eq(priority.as_str()));
        }

        if let Some(ref search) = query.search {
            if !search.is_empty() {
                select = select.filter(search_condition(search));
            }
        }

        // Count total before pagination
        let total = select
            .clone()
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count cases: {}", e)))?;

        let per_page = query.per_page();
        let offset = (query.page() - 1) * per_page;

        let cases = select
            .order_by_desc(case::Column::CreatedAt)
            .order_by_desc(case::Column::Id)
            .offset(offset)
            .limit(per_page)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list cases: {}", e)))?;

        Ok((cases, total))
    }

    /// Search cases by term, newest first.
    pub async fn search_cases(&self, term: &str, limit: u64) -> AppResult<Vec<case::Model>> {
        let cases = Case::find()
            .filter(search_condition(term))
            .order_by_desc(case::Column::CreatedAt)
            .order_by_desc(case::Column::Id)
            .limit(limit)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to search cases: {}", e)))?;

        Ok(cases)
    }

    /// Count owned documents for a batch of cases.
    pub async fn count_documents_batch(&self, case_ids: &[i32]) -> AppResult<HashMap<i32, u64>> {
        if case_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i32, i64)> = Document::find()
            .select_only()
            .column(document::Column::CaseId)
            .column_as(Expr::col(document::Column::Id).count(), "count")
            .filter(document::Column::CaseId.is_in(case_ids.to_vec()))
            .group_by(document::Column::CaseId)
            .into_tuple()
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count documents: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|(case_id, count)| (case_id, count as u64))
            .collect())
    }

    /// Aggregate case statistics for the dashboard.
    pub async fn case_stats(&self) -> AppResult<CaseStatsResponse> {
        let conn = self.connection();

        let total_cases = count_all(conn).await?;
        let active_cases = count_by_status(conn, CaseStatus::InProgress).await?;
        let completed_cases = count_by_status(conn, CaseStatus::Completed).await?;
        let analysis_cases = count_by_status(conn, CaseStatus::UnderAnalysis).await?;

        let high_priority = count_by_priority(conn, CasePriority::High).await?;
        let medium_priority = count_by_priority(conn, CasePriority::Medium).await?;
        let low_priority = count_by_priority(conn, CasePriority::Low).await?;

        let thirty_days_ago = Utc::now() - Duration::days(30);
        let recent_cases = Case::find()
            .filter(case::Column::CreatedAt.gte(thirty_days_ago))
            .count(conn)
            .await
            .map_err(|e| AppError::Database(format!("Failed to count recent cases: {}", e)))?;

        Ok(CaseStatsResponse {
            total_cases,
            active_cases,
            completed_cases,
            analysis_cases,
            high_priority,
            medium_priority,
            low_priority,
            recent_cases,
            completion_rate: CaseStatsResponse::completion_rate(completed_cases, total_cases),
        })
    }
}

async fn count_all(conn: &DatabaseConnection) -> AppResult<u64> {
    Case::find()
        .count(conn)
        .await
        .map_err(|e| AppError::Database(format!("Failed to count cases: {}", e)))
}

async fn count_by_status(conn: &DatabaseConnection, status: CaseStatus) -> AppResult<u64> {
    Case::find()
        .filter(case::Column::Status.eq(status.as_str()))
        .count(conn)
        .await
        .map_err(|e| AppError::Database(format!("Failed to count cases by status: {}", e)))
}

async fn count_by_priority(conn: &DatabaseConnection, priority: CasePriority) -> AppResult<u64> {
    Case::find()
        .filter(case::Column::Priority.eq(priority.as_str()))
        .count(conn)
        .await
        .map_err(|e| AppError::Database(format!("Failed to count cases by priority: {}", e)))
}
