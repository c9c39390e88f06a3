//! AI-assisted analysis and drafting handlers.
//!
//! Every path that produces a document body persists it against the named
//! case: best-effort for edital analysis, mandatory for recurso and
//! contrarrazão. Completion-adapter failures degrade to the offline
//! templates; the caller always receives usable text.

use actix_web::{web, HttpResponse, ResponseError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::auth::CallerIdentity;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{DocumentResponse, DocumentStatus, DocumentType};
use crate::services::openai::ANALYSIS_MODEL;
use crate::services::{prompts, OpenAiClient};

/// Max tokens for analysis and drafting completions.
const ANALYSIS_MAX_TOKENS: u32 = 2000;
/// Low temperature keeps legal drafting conservative.
const ANALYSIS_TEMPERATURE: f32 = 0.3;

/// Request to analyze an edital.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeEditalRequest {
    #[serde(default)]
    pub edital_content: Option<String>,
    #[serde(default)]
    pub company_data: Option<String>,
    /// Case to attach the analysis document to (optional).
    #[serde(default)]
    pub case_id: Option<i32>,
}

/// Successful analysis response.
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalysisResponse {
    pub analysis: String,
    pub timestamp: DateTime<Utc>,
    pub tokens_used: u32,
    pub saved_to_case: bool,
}

/// Degraded analysis response carrying the offline fallback.
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalysisFallbackResponse {
    pub error: String,
    pub fallback_analysis: String,
}

/// Request to draft an administrative appeal.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RecursoRequest {
    #[serde(default)]
    pub motivo: Option<String>,
    #[serde(default)]
    pub fundamentacao: Option<String>,
    #[serde(default)]
    pub case_id: Option<i32>,
}

/// Response carrying the drafted appeal.
#[derive(Debug, Serialize, ToSchema)]
pub struct RecursoResponse {
    pub message: String,
    pub recurso: DocumentResponse,
    pub content: String,
}

/// Request to draft counter-arguments.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ContrarrazaoRequest {
    #[serde(default)]
    pub recurso_adverso: Option<String>,
    #[serde(default)]
    pub argumentos_defesa: Option<String>,
    #[serde(default)]
    pub case_id: Option<i32>,
}

/// Response carrying the drafted counter-arguments.
#[derive(Debug, Serialize, ToSchema)]
pub struct ContrarrazaoResponse {
    pub message: String,
    pub contrarrazao: DocumentResponse,
    pub content: String,
}

/// Reject empty or missing required text fields.
fn required(value: Option<String>, field: &str) -> AppResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::InvalidInput(format!(
            "campo {} é obrigatório",
            field
        ))),
    }
}

/// Analyze an edital with the completion adapter.
///
/// Adapter failures return the mapped status plus an offline fallback
/// analysis so the caller always has something to show.
#[utoipa::path(
    post,
    path = "/api/analysis/edital",
    tag = "Analysis",
    request_body = AnalyzeEditalRequest,
    responses(
        (status = 200, description = "Analysis produced", body = AnalysisResponse),
        (status = 400, description = "Missing fields", body = crate::error::ErrorResponse),
        (status = 401, description = "Adapter rejected credentials; fallback included", body = AnalysisFallbackResponse),
        (status = 429, description = "Adapter rate limited; fallback included", body = AnalysisFallbackResponse),
        (status = 500, description = "Adapter unavailable; fallback included", body = AnalysisFallbackResponse),
    )
)]
pub async fn analyze_edital(
    pool: web::Data<DbPool>,
    openai: web::Data<OpenAiClient>,
    caller: CallerIdentity,
    body: web::Json<AnalyzeEditalRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let edital_content = required(req.edital_content, "edital_content")?;
    let company_data = required(req.company_data, "company_data")?;

    let completion = openai
        .complete(
            None,
            Some(prompts::EDITAL_ANALYSIS_PROMPT),
            &prompts::edital_user_prompt(&company_data, &edital_content),
            ANALYSIS_MODEL,
            ANALYSIS_MAX_TOKENS,
            ANALYSIS_TEMPERATURE,
        )
        .await;

    match completion {
        Ok(completion) => {
            // Best-effort save: skipped silently when no case id was given or
            // the case does not exist.
            let mut saved_to_case = false;
            if let Some(case_id) = req.case_id {
                if let Some(case) = pool.get_case_by_id(case_id).await? {
                    pool.insert_document(
                        &format!("Análise de Edital - {}", case.title),
                        Some(&completion.text),
                        DocumentType::Analise,
                        DocumentStatus::Finalized,
                        case_id,
                        caller.user_id,
                    )
                    .await?;
                    saved_to_case = true;
                }
            }

            info!(
                "Edital analyzed: tokens_used={}, saved_to_case={}",
                completion.tokens_used, saved_to_case
            );

            Ok(HttpResponse::Ok().json(AnalysisResponse {
                analysis: completion.text,
                timestamp: Utc::now(),
                tokens_used: completion.tokens_used,
                saved_to_case,
            }))
        }
        Err(err) => {
            warn!("Edital analysis degraded to fallback: {}", err);
            Ok(HttpResponse::build(err.status_code()).json(AnalysisFallbackResponse {
                error: err.to_string(),
                fallback_analysis: prompts::fallback_analysis(&edital_content, &company_data),
            }))
        }
    }
}

/// Draft an administrative appeal ("recurso") for a case.
///
/// Uses the completion adapter when configured, the offline legal skeleton
/// otherwise. Persisting the resulting document is mandatory.
#[utoipa::path(
    post,
    path = "/api/analysis/recurso",
    tag = "Analysis",
    request_body = RecursoRequest,
    responses(
        (status = 200, description = "Appeal drafted and saved", body = RecursoResponse),
        (status = 400, description = "Missing fields", body = crate::error::ErrorResponse),
        (status = 404, description = "Case not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn generate_recurso(
    pool: web::Data<DbPool>,
    openai: web::Data<OpenAiClient>,
    caller: CallerIdentity,
    body: web::Json<RecursoRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let motivo = required(req.motivo, "motivo")?;
    let fundamentacao = required(req.fundamentacao, "fundamentacao")?;
    let case_id = req
        .case_id
        .ok_or_else(|| AppError::InvalidInput("campo case_id é obrigatório".to_string()))?;

    let case = pool
        .get_case_by_id(case_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Caso".to_string()))?;

    let content = if openai.is_configured() {
        match openai
            .complete(
                None,
                None,
                &prompts::recurso_prompt(&case, &motivo, &fundamentacao),
                ANALYSIS_MODEL,
                ANALYSIS_MAX_TOKENS,
                ANALYSIS_TEMPERATURE,
            )
            .await
        {
            Ok(completion) => completion.text,
            Err(err) => {
                warn!("Recurso drafting degraded to template: {}", err);
                prompts::fallback_recurso(&case, &motivo, &fundamentacao)
            }
        }
    } else {
        prompts::fallback_recurso(&case, &motivo, &fundamentacao)
    };

    // Mandatory save: a persistence failure fails the whole request.
    let document = pool
        .insert_document(
            &format!("Recurso Administrativo - {}", case.title),
            Some(&content),
            DocumentType::Recurso,
            DocumentStatus::Draft,
            case_id,
            caller.user_id,
        )
        .await?;

    info!("Recurso drafted: case_id={}, document_id={}", case_id, document.id);

    Ok(HttpResponse::Ok().json(RecursoResponse {
        message: "Recurso gerado com sucesso".to_string(),
        recurso: DocumentResponse::from(document),
        content,
    }))
}

/// Draft counter-arguments ("contrarrazões") for a case.
///
/// Deterministic template; persisting the resulting document is mandatory.
#[utoipa::path(
    post,
    path = "/api/analysis/contrarrazao",
    tag = "Analysis",
    request_body = ContrarrazaoRequest,
    responses(
        (status = 200, description = "Counter-arguments drafted and saved", body = ContrarrazaoResponse),
        (status = 400, description = "Missing fields", body = crate::error::ErrorResponse),
        (status = 404, description = "Case not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn generate_contrarrazao(
    pool: web::Data<DbPool>,
    caller: CallerIdentity,
    body: web::Json<ContrarrazaoRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let recurso_adverso = required(req.recurso_adverso, "recurso_adverso")?;
    let argumentos_defesa = required(req.argumentos_defesa, "argumentos_defesa")?;
    let case_id = req
        .case_id
        .ok_or_else(|| AppError::InvalidInput("campo case_id é obrigatório".to_string()))?;

    let case = pool
        .get_case_by_id(case_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Caso".to_string()))?;

    let content = prompts::contrarrazao_text(&case, &recurso_adverso, &argumentos_defesa);

    let document = pool
        .insert_document(
            &format!("Contrarrazões - {}", case.title),
            Some(&content),
            DocumentType::Contrarrazao,
            DocumentStatus::Draft,
            case_id,
            caller.user_id,
        )
        .await?;

    info!(
        "Contrarrazão drafted: case_id={}, document_id={}",
        case_id, document.id
    );

    Ok(HttpResponse::Ok().json(ContrarrazaoResponse {
        message: "Contrarrazões geradas com sucesso".to_string(),
        contrarrazao: DocumentResponse::from(document),
        content,
    }))
}

/// Configure analysis routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/analysis/edital").route(web::post().to(analyze_edital)))
        .service(web::resource("/analysis/recurso").route(web::post().to(generate_recurso)))
        .service(
            web::resource("/analysis/contrarrazao").route(web::post().to(generate_contrarrazao)),
        );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_missing_and_blank() {
        assert!(required(None, "motivo").is_err());
        assert!(required(Some("".to_string()), "motivo").is_err());
        assert!(required(Some("   ".to_string()), "motivo").is_err());
    }

    #[test]
    fn test_required_keeps_value() {
        let v = required(Some("texto".to_string()), "motivo").unwrap();
        assert_eq!(v, "texto");
    }

    #[test]
    fn test_required_error_names_the_field() {
        let err = required(None, "fundamentacao").unwrap_err();
        assert!(err.to_string().contains("fundamentacao"));
    }
}
