//! Case domain models and DTOs.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::case;
use crate::error::{AppError, AppResult};

/// Fixed list of Brazilian bidding modalities offered to forms.
pub const MODALITY_OPTIONS: [&str; 10] = [
    "Concorrência",
    "Tomada de Preços",
    "Convite",
    "Concurso",
    "Leilão",
    "Pregão",
    "Manifestação de Interesse",
    "Credenciamento",
    "Pré-qualificação",
    "Procedimento de Manifestação de Interesse",
];

/// Case status enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum CaseStatus {
    #[serde(rename = "Em Andamento")]
    InProgress,
    #[serde(rename = "Em Análise")]
    UnderAnalysis,
    #[serde(rename = "Concluído")]
    Completed,
    #[serde(rename = "Suspenso")]
    Suspended,
    #[serde(rename = "Cancelado")]
    Cancelled,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "Em Andamento",
            Self::UnderAnalysis => "Em Análise",
            Self::Completed => "Concluído",
            Self::Suspended => "Suspenso",
            Self::Cancelled => "Cancelado",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Em Andamento" => Some(Self::InProgress),
            "Em Análise" => Some(Self::UnderAnalysis),
            "Concluído" => Some(Self::Completed),
            "Suspenso" => Some(Self::Suspended),
            "Cancelado" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn options() -> Vec<&'static str> {
        vec![
            Self::InProgress.as_str(),
            Self::UnderAnalysis.as_str(),
            Self::Completed.as_str(),
            Self::Suspended.as_str(),
            Self::Cancelled.as_str(),
        ]
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Case priority enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum CasePriority {
    #[serde(rename = "Alta")]
    High,
    #[serde(rename = "Média")]
    Medium,
    #[serde(rename = "Baixa")]
    Low,
}

impl CasePriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "Alta",
            Self::Medium => "Média",
            Self::Low => "Baixa",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Alta" => Some(Self::High),
            "Média" => Some(Self::Medium),
            "Baixa" => Some(Self::Low),
            _ => None,
        }
    }

    pub fn options() -> Vec<&'static str> {
        vec![
            Self::High.as_str(),
            Self::Medium.as_str(),
            Self::Low.as_str(),
        ]
    }
}

impl std::fmt::Display for CasePriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse a caller-supplied deadline string.
///
/// Accepts RFC 3339 ("2024-08-01T12:00:00Z"), a naive datetime without
/// offset ("2024-08-01T12:00:00", taken as UTC) or a bare date.
pub fn parse_deadline(s: &str) -> AppResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).expect("valid midnight").and_utc());
    }
    Err(AppError::InvalidInput(format!(
        "data inválida '{}', esperado formato ISO-8601",
        s
    )))
}

/// Request to create a new case.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateCaseRequest {
    /// Business number, e.g. "001/2024". Required, unique.
    pub number: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<CaseStatus>,
    #[serde(default)]
    pub priority: Option<CasePriority>,
    #[serde(default)]
    pub organ: Option<String>,
    #[serde(default)]
    pub modality: Option<String>,
    #[serde(default)]
    pub object_description: Option<String>,
    #[serde(default)]
    pub estimated_value: Option<f64>,
    /// ISO-8601 datetime string.
    #[serde(default)]
    pub deadline: Option<String>,
}

/// Partial update for a case. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateCaseRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<CaseStatus>,
    #[serde(default)]
    pub priority: Option<CasePriority>,
    #[serde(default)]
    pub organ: Option<String>,
    #[serde(default)]
    pub modality: Option<String>,
    #[serde(default)]
    pub object_description: Option<String>,
    #[serde(default)]
    pub estimated_value: Option<f64>,
    /// ISO-8601 datetime string.
    #[serde(default)]
    pub deadline: Option<String>,
}

/// Query parameters for listing cases.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ListCasesQuery {
    /// Filter by status.
    #[serde(default)]
    pub status: Option<CaseStatus>,
    /// Filter by priority.
    #[serde(default)]
    pub priority: Option<CasePriority>,
    /// Substring match against title, number, organ and description.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default = "super::default_page")]
    pub page: u64,
    #[serde(default = "super::default_per_page")]
    pub per_page: u64,
}

impl ListCasesQuery {
    pub fn page(&self) -> u64 {
        self.page.max(1)
    }

    pub fn per_page(&self) -> u64 {
        super::clamp_per_page(self.per_page)
    }
}

/// Query parameters for the search endpoint.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SearchCasesQuery {
    /// Search term.
    #[serde(default)]
    pub q: Option<String>,
    /// Maximum number of results.
    #[serde(default = "default_search_limit")]
    pub limit: u64,
}

fn default_search_limit() -> u64 {
    20
}

/// Case representation returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CaseResponse {
    pub id: i32,
    pub number: String,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub organ: Option<String>,
    pub modality: Option<String>,
    pub object_description: Option<String>,
    pub estimated_value: Option<f64>,
    pub deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: Option<i64>,
    /// Number of documents owned by this case.
    pub documents_count: u64,
}

impl CaseResponse {
    /// Build the API representation from the stored row.
    pub fn from_model(model: case::Model, documents_count: u64) -> Self {
        CaseResponse {
            id: model.id,
            number: model.number,
            title: model.title,
            description: model.description,
            status: model.status,
            priority: model.priority,
            organ: model.organ,
            modality: model.modality,
            object_description: model.object_description,
            estimated_value: model.estimated_value,
            deadline: model.deadline,
            created_at: model.created_at,
            updated_at: model.updated_at,
            user_id: model.user_id,
            documents_count,
        }
    }
}

/// Case list response with pagination.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CaseListResponse {
    pub cases: Vec<CaseResponse>,
    pub pagination: super::Pagination,
}

/// Search response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SearchCasesResponse {
    pub cases: Vec<CaseResponse>,
    pub count: usize,
}

/// Aggregated case statistics.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct CaseStatsResponse {
    pub total_cases: u64,
    pub active_cases: u64,
    pub completed_cases: u64,
    pub analysis_cases: u64,
    pub high_priority: u64,
    pub medium_priority: u64,
    pub low_priority: u64,
    /// Cases created within the last 30 days.
    pub recent_cases: u64,
    /// completed/total as a percentage, rounded to one decimal place.
    pub completion_rate: f64,
}

impl CaseStatsResponse {
    /// Percentage of completed cases, one decimal place, 0.0 on an empty store.
    pub fn completion_rate(completed: u64, total: u64) -> f64 {
        if total == 0 {
            return 0.0;
        }
        let rate = completed as f64 / total as f64 * 100.0;
        (rate * 10.0).round() / 10.0
    }
}

/// Static options for case forms.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CaseOptionsResponse {
    pub status_options: Vec<&'static str>,
    pub priority_options: Vec<&'static str>,
    pub modality_options: Vec<&'static str>,
}

impl CaseOptionsResponse {
    pub fn current() -> Self {
        CaseOptionsResponse {
            status_options: CaseStatus::options(),
            priority_options: CasePriority::options(),
            modality_options: MODALITY_OPTIONS.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for s in CaseStatus::options() {
            let parsed = CaseStatus::parse(s).expect("known status");
            assert_eq!(parsed.as_str(), s);
        }
        assert_eq!(CaseStatus::parse("Arquivado"), None);
    }

    #[test]
    fn test_priority_round_trip() {
        for p in CasePriority::options() {
            let parsed = CasePriority::parse(p).expect("known priority");
            assert_eq!(parsed.as_str(), p);
        }
        assert_eq!(CasePriority::parse("Urgente"), None);
    }

    #[test]
    fn test_status_serde_uses_portuguese_labels() {
        let json = serde_json::to_string(&CaseStatus::InProgress).unwrap();
        assert_eq!(json, "\"Em Andamento\"");
        let back: CaseStatus = serde_json::from_str("\"Concluído\"").unwrap();
        assert_eq!(back, CaseStatus::Completed);
    }

    #[test]
    fn test_parse_deadline_formats() {
        assert!(parse_deadline("2024-08-01T12:00:00Z").is_ok());
        assert!(parse_deadline("2024-08-01T12:00:00-03:00").is_ok());
        assert!(parse_deadline("2024-08-01T12:00:00").is_ok());
        assert!(parse_deadline("2024-08-01").is_ok());
        assert!(parse_deadline("01/08/2024").is_err());
        assert!(parse_deadline("amanhã").is_err());
    }

    #[test]
    fn test_completion_rate() {
        assert_eq!(CaseStatsResponse::completion_rate(0, 0), 0.0);
        assert_eq!(CaseStatsResponse::completion_rate(1, 3), 33.3);
        assert_eq!(CaseStatsResponse::completion_rate(2, 2), 100.0);
    }

    #[test]
    fn test_modality_options_count() {
        assert_eq!(MODALITY_OPTIONS.len(), 10);
    }

    #[test]
    fn test_update_request_ignores_unknown_fields() {
        let req: UpdateCaseRequest =
            serde_json::from_str(r#"{"title": "Novo título", "unknown_field": 42}"#).unwrap();
        assert_eq!(req.title.as_deref(), Some("Novo título"));
        assert!(req.status.is_none());
    }
}
