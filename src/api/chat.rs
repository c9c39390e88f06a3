//! Legal-assistant chat handlers.

use actix_web::{web, HttpResponse, ResponseError};
use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::services::openai::DEFAULT_CHAT_MODEL;
use crate::services::{prompts, OpenAiClient};

/// Max tokens for chat completions.
const CHAT_MAX_TOKENS: u32 = 1500;
/// Chat runs warmer than document drafting.
const CHAT_TEMPERATURE: f32 = 0.7;

/// Chat request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    /// Completion model id; defaults to the chat model.
    #[serde(default)]
    pub model: Option<String>,
    /// Replacement system prompt; defaults to the Harvey persona.
    #[serde(default)]
    pub custom_prompt: Option<String>,
    /// Per-request API key; overrides the configured one.
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub api_key: Option<SecretString>,
}

/// Successful chat response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
    pub model_used: String,
    pub timestamp: DateTime<Utc>,
    pub tokens_used: u32,
}

/// Degraded chat response carrying canned fallback text.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChatFallbackResponse {
    pub error: String,
    pub fallback_response: String,
}

/// Entry in the static model list.
#[derive(Debug, Serialize, ToSchema)]
pub struct ModelInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Static model list response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ModelsResponse {
    pub models: Vec<ModelInfo>,
}

/// Request to validate an API key.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ValidateKeyRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub api_key: Option<SecretString>,
}

/// API key validation verdict.
#[derive(Debug, Serialize, ToSchema)]
pub struct KeyValidationResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Default-prompt response.
#[derive(Debug, Serialize, ToSchema)]
pub struct PromptResponse {
    pub prompt: String,
}

/// Request to set a custom prompt.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePromptRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

/// Acknowledgement for an accepted prompt.
#[derive(Debug, Serialize, ToSchema)]
pub struct UpdatePromptResponse {
    pub message: String,
    pub prompt: String,
}

/// Canned fallback text for a failed chat call.
fn chat_fallback_text(err: &AppError) -> &'static str {
    match err {
        AppError::Unauthenticated(_) => "Verifique se sua API key está correta e ativa.",
        AppError::RateLimited(_) => "Muitas requisições. Tente novamente em alguns minutos.",
        AppError::Unavailable(_) => {
            "Desculpe, não consigo processar sua solicitação no momento. \
             Configure a API key do serviço de IA."
        }
        _ => "Ocorreu um erro inesperado. Tente novamente mais tarde.",
    }
}

/// Chat with the legal assistant.
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "Chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse),
        (status = 400, description = "Empty message", body = crate::error::ErrorResponse),
        (status = 401, description = "Credentials rejected; fallback included", body = ChatFallbackResponse),
        (status = 429, description = "Rate limited; fallback included", body = ChatFallbackResponse),
        (status = 500, description = "Adapter unavailable; fallback included", body = ChatFallbackResponse),
    )
)]
pub async fn chat(
    openai: web::Data<OpenAiClient>,
    body: web::Json<ChatRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let message = match req.message.as_deref() {
        Some(m) if !m.trim().is_empty() => m.to_string(),
        _ => {
            return Err(AppError::InvalidInput(
                "mensagem é obrigatória".to_string(),
            ))
        }
    };

    let model = req
        .model
        .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string());
    let system_prompt = req
        .custom_prompt
        .unwrap_or_else(|| prompts::DEFAULT_ASSISTANT_PROMPT.to_string());

    let completion = openai
        .complete(
            req.api_key.as_ref(),
            Some(&system_prompt),
            &message,
            &model,
            CHAT_MAX_TOKENS,
            CHAT_TEMPERATURE,
        )
        .await;

    match completion {
        Ok(completion) => Ok(HttpResponse::Ok().json(ChatResponse {
            response: completion.text,
            model_used: model,
            timestamp: Utc::now(),
            tokens_used: completion.tokens_used,
        })),
        Err(err) => {
            warn!("Chat degraded to fallback: {}", err);
            Ok(HttpResponse::build(err.status_code()).json(ChatFallbackResponse {
                error: err.to_string(),
                fallback_response: chat_fallback_text(&err).to_string(),
            }))
        }
    }
}

/// List the models offered to the frontend.
#[utoipa::path(
    get,
    path = "/api/chat/models",
    tag = "Chat",
    responses(
        (status = 200, description = "Available models", body = ModelsResponse),
    )
)]
pub async fn chat_models() -> HttpResponse {
    HttpResponse::Ok().json(ModelsResponse {
        models: vec![
            ModelInfo {
                id: "gpt-4",
                name: "GPT-4",
                description: "Modelo mais avançado, melhor para análises complexas",
            },
            ModelInfo {
                id: "gpt-4-turbo",
                name: "GPT-4 Turbo",
                description: "Versão otimizada do GPT-4, mais rápida",
            },
            ModelInfo {
                id: "gpt-3.5-turbo",
                name: "GPT-3.5 Turbo",
                description: "Modelo rápido e eficiente para uso geral",
            },
        ],
    })
}

/// Validate an API key with a minimal completion call.
#[utoipa::path(
    post,
    path = "/api/chat/validate-key",
    tag = "Chat",
    request_body = ValidateKeyRequest,
    responses(
        (status = 200, description = "Key is valid", body = KeyValidationResponse),
        (status = 400, description = "Key missing", body = KeyValidationResponse),
        (status = 401, description = "Key rejected", body = KeyValidationResponse),
    )
)]
pub async fn validate_key(
    openai: web::Data<OpenAiClient>,
    body: web::Json<ValidateKeyRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let api_key = match req.api_key {
        Some(key) => key,
        None => {
            return Ok(HttpResponse::BadRequest().json(KeyValidationResponse {
                valid: false,
                message: None,
                error: Some("API key não fornecida".to_string()),
            }))
        }
    };

    match openai.validate_key(&api_key).await {
        Ok(()) => Ok(HttpResponse::Ok().json(KeyValidationResponse {
            valid: true,
            message: Some("API key válida".to_string()),
            error: None,
        })),
        Err(err @ AppError::Unauthenticated(_)) => {
            Ok(HttpResponse::Unauthorized().json(KeyValidationResponse {
                valid: false,
                message: None,
                error: Some(err.to_string()),
            }))
        }
        Err(err) => Ok(
            HttpResponse::build(err.status_code()).json(KeyValidationResponse {
                valid: false,
                message: None,
                error: Some(err.to_string()),
            }),
        ),
    }
}

/// Return the default assistant prompt.
#[utoipa::path(
    get,
    path = "/api/chat/prompt",
    tag = "Chat",
    responses(
        (status = 200, description = "Current prompt", body = PromptResponse),
    )
)]
pub async fn get_prompt() -> HttpResponse {
    HttpResponse::Ok().json(PromptResponse {
        prompt: prompts::DEFAULT_ASSISTANT_PROMPT.to_string(),
    })
}

/// Validate a custom assistant prompt.
///
/// TODO: persist per-user prompts once accounts exist; until then the
/// endpoint only validates and echoes.
#[utoipa::path(
    post,
    path = "/api/chat/prompt",
    tag = "Chat",
    request_body = UpdatePromptRequest,
    responses(
        (status = 200, description = "Prompt accepted", body = UpdatePromptResponse),
        (status = 400, description = "Empty prompt", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_prompt(body: web::Json<UpdatePromptRequest>) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let prompt = match req.prompt {
        Some(p) if !p.trim().is_empty() => p,
        _ => {
            return Err(AppError::InvalidInput(
                "prompt não pode estar vazio".to_string(),
            ))
        }
    };

    Ok(HttpResponse::Ok().json(UpdatePromptResponse {
        message: "Prompt atualizado com sucesso".to_string(),
        prompt,
    }))
}

/// Configure chat routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/chat").route(web::post().to(chat)))
        .service(web::resource("/chat/models").route(web::get().to(chat_models)))
        .service(web::resource("/chat/validate-key").route(web::post().to(validate_key)))
        .service(
            web::resource("/chat/prompt")
                .route(web::get().to(get_prompt))
                .route(web::post().to(update_prompt)),
        );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_fallback_text_by_error_kind() {
        assert!(
            chat_fallback_text(&AppError::Unauthenticated("x".into())).contains("API key")
        );
        assert!(
            chat_fallback_text(&AppError::RateLimited("x".into())).contains("Muitas requisições")
        );
        assert!(
            chat_fallback_text(&AppError::Unavailable("x".into())).contains("Configure a API key")
        );
    }
}
