//! Document domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::document;

/// Document type enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Recurso,
    Contrarrazao,
    Analise,
    Relatorio,
    Edital,
    Proposta,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recurso => "recurso",
            Self::Contrarrazao => "contrarrazao",
            Self::Analise => "analise",
            Self::Relatorio => "relatorio",
            Self::Edital => "edital",
            Self::Proposta => "proposta",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "recurso" => Some(Self::Recurso),
            "contrarrazao" => Some(Self::Contrarrazao),
            "analise" => Some(Self::Analise),
            "relatorio" => Some(Self::Relatorio),
            "edital" => Some(Self::Edital),
            "proposta" => Some(Self::Proposta),
            _ => None,
        }
    }

    pub fn options() -> Vec<&'static str> {
        vec![
            Self::Recurso.as_str(),
            Self::Contrarrazao.as_str(),
            Self::Analise.as_str(),
            Self::Relatorio.as_str(),
            Self::Edital.as_str(),
            Self::Proposta.as_str(),
        ]
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Document status enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum DocumentStatus {
    #[serde(rename = "Rascunho")]
    Draft,
    #[serde(rename = "Em Revisão")]
    UnderReview,
    #[serde(rename = "Finalizado")]
    Finalized,
    #[serde(rename = "Enviado")]
    Sent,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Rascunho",
            Self::UnderReview => "Em Revisão",
            Self::Finalized => "Finalizado",
            Self::Sent => "Enviado",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Rascunho" => Some(Self::Draft),
            "Em Revisão" => Some(Self::UnderReview),
            "Finalizado" => Some(Self::Finalized),
            "Enviado" => Some(Self::Sent),
            _ => None,
        }
    }

    pub fn options() -> Vec<&'static str> {
        vec![
            Self::Draft.as_str(),
            Self::UnderReview.as_str(),
            Self::Finalized.as_str(),
            Self::Sent.as_str(),
        ]
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request to create a new document.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateDocumentRequest {
    pub title: String,
    pub document_type: DocumentType,
    /// Owning case; must reference an existing case.
    pub case_id: i32,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub status: Option<DocumentStatus>,
}

/// Partial update for a document, limited to title/content/status.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateDocumentRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub status: Option<DocumentStatus>,
}

/// Query parameters for listing documents.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ListDocumentsQuery {
    /// Filter by owning case.
    #[serde(default)]
    pub case_id: Option<i32>,
    /// Filter by document type.
    #[serde(rename = "type", default)]
    pub document_type: Option<DocumentType>,
    /// Filter by status.
    #[serde(default)]
    pub status: Option<DocumentStatus>,
    #[serde(default = "super::default_page")]
    pub page: u64,
    #[serde(default = "super::default_per_page")]
    pub per_page: u64,
}

impl ListDocumentsQuery {
    pub fn page(&self) -> u64 {
        self.page.max(1)
    }

    pub fn per_page(&self) -> u64 {
        super::clamp_per_page(self.per_page)
    }
}

/// Document representation returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DocumentResponse {
    pub id: i32,
    pub title: String,
    pub content: Option<String>,
    pub document_type: String,
    pub status: String,
    pub external_doc_id: Option<String>,
    pub external_doc_url: Option<String>,
    pub case_id: i32,
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<document::Model> for DocumentResponse {
    fn from(model: document::Model) -> Self {
        DocumentResponse {
            id: model.id,
            title: model.title,
            content: model.content,
            document_type: model.document_type,
            status: model.status,
            external_doc_id: model.external_doc_id,
            external_doc_url: model.external_doc_url,
            case_id: model.case_id,
            user_id: model.user_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Document list response with pagination.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentResponse>,
    pub pagination: super::Pagination,
}

/// Static options for document forms.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DocumentOptionsResponse {
    pub document_types: Vec<&'static str>,
    pub status_options: Vec<&'static str>,
}

impl DocumentOptionsResponse {
    pub fn current() -> Self {
        DocumentOptionsResponse {
            document_types: DocumentType::options(),
            status_options: DocumentStatus::options(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_type_round_trip() {
        for t in DocumentType::options() {
            let parsed = DocumentType::parse(t).expect("known type");
            assert_eq!(parsed.as_str(), t);
        }
        assert_eq!(DocumentType::parse("peticao"), None);
    }

    #[test]
    fn test_document_status_round_trip() {
        for s in DocumentStatus::options() {
            let parsed = DocumentStatus::parse(s).expect("known status");
            assert_eq!(parsed.as_str(), s);
        }
        assert_eq!(DocumentStatus::parse("Arquivado"), None);
    }

    #[test]
    fn test_document_type_serde_is_lowercase() {
        let json = serde_json::to_string(&DocumentType::Contrarrazao).unwrap();
        assert_eq!(json, "\"contrarrazao\"");
    }

    #[test]
    fn test_update_request_is_limited_to_three_fields() {
        // document_type is not updatable; it is silently ignored.
        let req: UpdateDocumentRequest =
            serde_json::from_str(r#"{"content": "novo texto", "document_type": "edital"}"#)
                .unwrap();
        assert_eq!(req.content.as_deref(), Some("novo texto"));
        assert!(req.title.is_none());
        assert!(req.status.is_none());
    }
}
