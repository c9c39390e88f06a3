//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Harvey Server",
        version = "0.3.0",
        description = "API server for managing public procurement cases, their documents and AI-assisted legal drafting"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Case endpoints
        api::cases::list_cases,
        api::cases::create_case,
        api::cases::get_case,
        api::cases::update_case,
        api::cases::delete_case,
        api::cases::case_stats,
        api::cases::search_cases,
        api::cases::case_options,
        // Document endpoints
        api::documents::list_documents,
        api::documents::create_document,
        api::documents::get_document,
        api::documents::update_document,
        api::documents::delete_document,
        api::documents::document_options,
        api::documents::create_google_doc,
        api::documents::sync_google_doc,
        api::documents::test_google_credentials,
        api::documents::generate_report,
        // Analysis endpoints
        api::analysis::analyze_edital,
        api::analysis::generate_recurso,
        api::analysis::generate_contrarrazao,
        // Chat endpoints
        api::chat::chat,
        api::chat::chat_models,
        api::chat::validate_key,
        api::chat::get_prompt,
        api::chat::update_prompt,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            models::Pagination,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Cases
            models::CaseStatus,
            models::CasePriority,
            models::CreateCaseRequest,
            models::UpdateCaseRequest,
            models::CaseResponse,
            models::CaseListResponse,
            models::CaseStatsResponse,
            models::CaseOptionsResponse,
            models::SearchCasesResponse,
            api::cases::CaseDetailResponse,
            api::cases::CaseMessageResponse,
            api::cases::AckResponse,
            // Documents
            models::DocumentType,
            models::DocumentStatus,
            models::CreateDocumentRequest,
            models::UpdateDocumentRequest,
            models::DocumentResponse,
            models::DocumentListResponse,
            models::DocumentOptionsResponse,
            api::documents::DocumentDetailResponse,
            api::documents::DocumentMessageResponse,
            api::documents::GoogleDocsCreateRequest,
            api::documents::GoogleDocsCreateResponse,
            api::documents::GoogleDocsSyncRequest,
            api::documents::TestCredentialsRequest,
            api::documents::CredentialsValidationResponse,
            api::documents::GenerateReportRequest,
            api::documents::GenerateReportResponse,
            // Analysis
            api::analysis::AnalyzeEditalRequest,
            api::analysis::AnalysisResponse,
            api::analysis::AnalysisFallbackResponse,
            api::analysis::RecursoRequest,
            api::analysis::RecursoResponse,
            api::analysis::ContrarrazaoRequest,
            api::analysis::ContrarrazaoResponse,
            // Chat
            api::chat::ChatRequest,
            api::chat::ChatResponse,
            api::chat::ChatFallbackResponse,
            api::chat::ModelInfo,
            api::chat::ModelsResponse,
            api::chat::ValidateKeyRequest,
            api::chat::KeyValidationResponse,
            api::chat::PromptResponse,
            api::chat::UpdatePromptRequest,
            api::chat::UpdatePromptResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Cases", description = "Procurement case management"),
        (name = "Documents", description = "Case document management and export"),
        (name = "Analysis", description = "AI-assisted edital analysis and drafting"),
        (name = "Chat", description = "Legal assistant chat")
    )
)]
pub struct ApiDoc;
