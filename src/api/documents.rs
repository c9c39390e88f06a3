//! Document API handlers, including Google Docs export and report generation.

use actix_web::{web, HttpResponse};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::auth::CallerIdentity;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateDocumentRequest, DocumentListResponse, DocumentOptionsResponse, DocumentResponse,
    DocumentStatus, DocumentType, ListDocumentsQuery, Pagination, UpdateDocumentRequest,
};
use crate::services::{prompts, GoogleDocsClient};

/// Response wrapping a single document.
#[derive(Debug, Serialize, ToSchema)]
pub struct DocumentDetailResponse {
    pub document: DocumentResponse,
}

/// Response for create/update operations.
#[derive(Debug, Serialize, ToSchema)]
pub struct DocumentMessageResponse {
    pub message: String,
    pub document: DocumentResponse,
}

/// Request to export content to Google Docs.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GoogleDocsCreateRequest {
    pub title: String,
    pub content: String,
    /// Stored document to link the exported copy to.
    #[serde(default)]
    pub document_id: Option<i32>,
    /// Per-request OAuth access token; overrides the configured one.
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub access_token: Option<SecretString>,
}

/// Response after exporting to Google Docs.
#[derive(Debug, Serialize, ToSchema)]
pub struct GoogleDocsCreateResponse {
    pub message: String,
    pub document_id: String,
    pub document_url: String,
}

/// Request to validate service-account credentials.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TestCredentialsRequest {
    #[serde(default)]
    pub credentials: Option<String>,
}

/// Credential validation verdict.
#[derive(Debug, Serialize, ToSchema)]
pub struct CredentialsValidationResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Request to generate a case report.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateReportRequest {
    #[serde(default)]
    pub case_id: Option<i32>,
}

/// Response carrying the generated report document.
#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateReportResponse {
    pub message: String,
    pub report: DocumentResponse,
}

/// List documents with pagination and filtering.
#[utoipa::path(
    get,
    path = "/api/documents",
    tag = "Documents",
    params(
        ("case_id" = Option<i32>, Query, description = "Filter by owning case"),
        ("type" = Option<String>, Query, description = "Filter by document type"),
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("page" = Option<u64>, Query, description = "Page number (default 1)"),
        ("per_page" = Option<u64>, Query, description = "Results per page (default 10, max 100)")
    ),
    responses(
        (status = 200, description = "List of documents", body = DocumentListResponse),
    )
)]
pub async fn list_documents(
    pool: web::Data<DbPool>,
    query: web::Query<ListDocumentsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let (documents, total) = pool.list_documents(&query).await?;

    let response = DocumentListResponse {
        documents: documents.into_iter().map(DocumentResponse::from).collect(),
        pagination: Pagination::new(query.page(), query.per_page(), total),
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Create a new document.
#[utoipa::path(
    post,
    path = "/api/documents",
    tag = "Documents",
    request_body = CreateDocumentRequest,
    responses(
        (status = 201, description = "Document created", body = DocumentMessageResponse),
        (status = 400, description = "Missing fields", body = crate::error::ErrorResponse),
        (status = 404, description = "Owning case not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_document(
    pool: web::Data<DbPool>,
    caller: CallerIdentity,
    body: web::Json<CreateDocumentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.title.trim().is_empty() {
        return Err(AppError::InvalidInput("campo title é obrigatório".to_string()));
    }

    // The owning case must exist
    pool.get_case_by_id(req.case_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Caso".to_string()))?;

    let document = pool
        .insert_document(
            &req.title,
            req.content.as_deref(),
            req.document_type,
            req.status.unwrap_or(DocumentStatus::Draft),
            req.case_id,
            caller.user_id,
        )
        .await?;

    info!(
        "Document created: id={}, type={}, case_id={}",
        document.id, document.document_type, document.case_id
    );

    Ok(HttpResponse::Created().json(DocumentMessageResponse {
        message: "Documento criado com sucesso".to_string(),
        document: DocumentResponse::from(document),
    }))
}

/// Get a single document.
#[utoipa::path(
    get,
    path = "/api/documents/{document_id}",
    tag = "Documents",
    params(("document_id" = i32, Path, description = "Document id")),
    responses(
        (status = 200, description = "Document details", body = DocumentDetailResponse),
        (status = 404, description = "Document not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_document(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let document_id = path.into_inner();

    let document = pool
        .get_document_by_id(document_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Documento".to_string()))?;

    Ok(HttpResponse::Ok().json(DocumentDetailResponse {
        document: DocumentResponse::from(document),
    }))
}

/// Partially update a document (title, content, status).
#[utoipa::path(
    put,
    path = "/api/documents/{document_id}",
    tag = "Documents",
    params(("document_id" = i32, Path, description = "Document id")),
    request_body = UpdateDocumentRequest,
    responses(
        (status = 200, description = "Document updated", body = DocumentMessageResponse),
        (status = 404, description = "Document not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_document(
    pool: web::Data<DbPool>,
    _caller: CallerIdentity,
    path: web::Path<i32>,
    body: web::Json<UpdateDocumentRequest>,
) -> AppResult<HttpResponse> {
    let document_id = path.into_inner();
    let req = body.into_inner();

    let document = pool.update_document(document_id, &req).await?;

    info!("Document updated: id={}", document.id);

    Ok(HttpResponse::Ok().json(DocumentMessageResponse {
        message: "Documento atualizado com sucesso".to_string(),
        document: DocumentResponse::from(document),
    }))
}

/// Delete a document.
#[utoipa::path(
    delete,
    path = "/api/documents/{document_id}",
    tag = "Documents",
    params(("document_id" = i32, Path, description = "Document id")),
    responses(
        (status = 200, description = "Document deleted", body = crate::api::cases::AckResponse),
        (status = 404, description = "Document not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_document(
    pool: web::Data<DbPool>,
    _caller: CallerIdentity,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let document_id = path.into_inner();

    pool.delete_document(document_id).await?;

    info!("Document deleted: id={}", document_id);

    Ok(HttpResponse::Ok().json(crate::api::cases::AckResponse {
        message: "Documento deletado com sucesso".to_string(),
    }))
}

/// Static options for document forms.
#[utoipa::path(
    get,
    path = "/api/documents/options",
    tag = "Documents",
    responses(
        (status = 200, description = "Document type and status options", body = DocumentOptionsResponse),
    )
)]
pub async fn document_options() -> HttpResponse {
    HttpResponse::Ok().json(DocumentOptionsResponse::current())
}

/// Export content to Google Docs.
///
/// When `document_id` references a stored document its external reference is
/// updated with the created id and URL.
#[utoipa::path(
    post,
    path = "/api/documents/google-docs/create",
    tag = "Documents",
    request_body = GoogleDocsCreateRequest,
    responses(
        (status = 200, description = "Exported to Google Docs", body = GoogleDocsCreateResponse),
        (status = 400, description = "Missing fields", body = crate::error::ErrorResponse),
        (status = 401, description = "Credentials rejected", body = crate::error::ErrorResponse),
        (status = 500, description = "Adapter not configured or unavailable", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_google_doc(
    pool: web::Data<DbPool>,
    docs: web::Data<GoogleDocsClient>,
    body: web::Json<GoogleDocsCreateRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.title.trim().is_empty() {
        return Err(AppError::InvalidInput("campo title é obrigatório".to_string()));
    }
    if req.content.trim().is_empty() {
        return Err(AppError::InvalidInput("campo content é obrigatório".to_string()));
    }

    let token = req.access_token.as_ref();

    let external = docs.create_document(token, &req.title).await?;
    docs.append_text(token, &external.id, &req.content).await?;

    info!("Exported document to Google Docs: id={}", external.id);

    // Link the exported copy to the stored document, when one was named.
    if let Some(document_id) = req.document_id {
        if pool.get_document_by_id(document_id).await?.is_some() {
            pool.set_document_external_ref(document_id, &external.id, &external.url)
                .await?;
        }
    }

    Ok(HttpResponse::Ok().json(GoogleDocsCreateResponse {
        message: "Documento criado no Google Docs com sucesso".to_string(),
        document_id: external.id,
        document_url: external.url,
    }))
}

/// Request to pull the externally edited copy back into the stored document.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GoogleDocsSyncRequest {
    /// Per-request OAuth access token; overrides the configured one.
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub access_token: Option<SecretString>,
}

/// Pull the content of the exported Google Docs copy back into the document.
#[utoipa::path(
    post,
    path = "/api/documents/{document_id}/google-docs/sync",
    tag = "Documents",
    params(("document_id" = i32, Path, description = "Document id")),
    request_body = GoogleDocsSyncRequest,
    responses(
        (status = 200, description = "Document content refreshed", body = DocumentMessageResponse),
        (status = 400, description = "Document was never exported", body = crate::error::ErrorResponse),
        (status = 404, description = "Document not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Adapter not configured or unavailable", body = crate::error::ErrorResponse),
    )
)]
pub async fn sync_google_doc(
    pool: web::Data<DbPool>,
    docs: web::Data<GoogleDocsClient>,
    _caller: CallerIdentity,
    path: web::Path<i32>,
    body: web::Json<GoogleDocsSyncRequest>,
) -> AppResult<HttpResponse> {
    let document_id = path.into_inner();
    let req = body.into_inner();

    let document = pool
        .get_document_by_id(document_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Documento".to_string()))?;

    let external_id = document.external_doc_id.as_deref().ok_or_else(|| {
        AppError::InvalidInput("documento não foi exportado para o Google Docs".to_string())
    })?;

    let content = docs
        .fetch_document(req.access_token.as_ref(), external_id)
        .await?;

    let updated = pool
        .update_document(
            document_id,
            &UpdateDocumentRequest {
                content: Some(content),
                ..Default::default()
            },
        )
        .await?;

    info!("Document synced from Google Docs: id={}", document_id);

    Ok(HttpResponse::Ok().json(DocumentMessageResponse {
        message: "Documento sincronizado com sucesso".to_string(),
        document: DocumentResponse::from(updated),
    }))
}

/// Structurally validate Google service-account credentials.
#[utoipa::path(
    post,
    path = "/api/documents/google-docs/test-credentials",
    tag = "Documents",
    request_body = TestCredentialsRequest,
    responses(
        (status = 200, description = "Credentials are structurally valid", body = CredentialsValidationResponse),
        (status = 400, description = "Missing or malformed credentials", body = CredentialsValidationResponse),
    )
)]
pub async fn test_google_credentials(
    body: web::Json<TestCredentialsRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let credentials = match req.credentials.as_deref() {
        Some(c) if !c.is_empty() => c,
        _ => {
            return Ok(
                HttpResponse::BadRequest().json(CredentialsValidationResponse {
                    valid: false,
                    message: None,
                    error: Some("credenciais não fornecidas".to_string()),
                }),
            )
        }
    };

    match crate::services::google_docs::validate_credentials(credentials) {
        Ok(()) => Ok(HttpResponse::Ok().json(CredentialsValidationResponse {
            valid: true,
            message: Some("Credenciais válidas".to_string()),
            error: None,
        })),
        Err(e) => Ok(
            HttpResponse::BadRequest().json(CredentialsValidationResponse {
                valid: false,
                message: None,
                error: Some(e.to_string()),
            }),
        ),
    }
}

/// Generate a markdown report over a case and persist it as a document.
#[utoipa::path(
    post,
    path = "/api/documents/generate-report",
    tag = "Documents",
    request_body = GenerateReportRequest,
    responses(
        (status = 200, description = "Report generated", body = GenerateReportResponse),
        (status = 400, description = "Missing case_id", body = crate::error::ErrorResponse),
        (status = 404, description = "Case not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn generate_report(
    pool: web::Data<DbPool>,
    caller: CallerIdentity,
    body: web::Json<GenerateReportRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let case_id = req
        .case_id
        .ok_or_else(|| AppError::InvalidInput("campo case_id é obrigatório".to_string()))?;

    let case = pool
        .get_case_by_id(case_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Caso".to_string()))?;

    let documents = pool.list_documents_by_case(case_id).await?;
    let content = prompts::case_report(&case, &documents);

    let report = pool
        .insert_document(
            &format!("Relatório - {}", case.title),
            Some(&content),
            DocumentType::Relatorio,
            DocumentStatus::Finalized,
            case_id,
            caller.user_id,
        )
        .await?;

    info!("Report generated: case_id={}, document_id={}", case_id, report.id);

    Ok(HttpResponse::Ok().json(GenerateReportResponse {
        message: "Relatório gerado com sucesso".to_string(),
        report: DocumentResponse::from(report),
    }))
}

/// Configure document routes. Literal paths are registered before the
/// parameterized one.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/documents")
            .route(web::get().to(list_documents))
            .route(web::post().to(create_document)),
    )
    .service(web::resource("/documents/options").route(web::get().to(document_options)))
    .service(
        web::resource("/documents/google-docs/create").route(web::post().to(create_google_doc)),
    )
    .service(
        web::resource("/documents/google-docs/test-credentials")
            .route(web::post().to(test_google_credentials)),
    )
    .service(web::resource("/documents/generate-report").route(web::post().to(generate_report)))
    .service(
        web::resource("/documents/{document_id}/google-docs/sync")
            .route(web::post().to(sync_google_doc)),
    )
    .service(
        web::resource("/documents/{document_id}")
            .route(web::get().to(get_document))
            .route(web::put().to(update_document))
            .route(web::delete().to(delete_document)),
    );
}
