//! Chat-completion adapter for the OpenAI-compatible API.
//!
//! Thin call-and-map wrapper: one request, no retries. Failures are mapped to
//! the application error taxonomy so handlers can degrade to the offline
//! fallback templates.

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::OpenAiSettings;
use crate::error::{AppError, AppResult};

/// HTTP connect timeout for completion calls.
const HTTP_CONNECT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);
/// HTTP total timeout for completion calls.
const HTTP_REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Model used for analysis and document generation.
pub const ANALYSIS_MODEL: &str = "gpt-4";
/// Default model for the chat endpoint.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";

/// Result of a completion call.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub tokens_used: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    total_tokens: u32,
}

/// Map a non-success completion API status to the error taxonomy.
fn error_for_status(status: StatusCode) -> AppError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            AppError::Unauthenticated("API key inválida ou expirada".to_string())
        }
        StatusCode::TOO_MANY_REQUESTS => {
            AppError::RateLimited("muitas requisições, tente novamente em alguns minutos".to_string())
        }
        other => AppError::Unavailable(format!(
            "serviço de completions respondeu com status {}",
            other.as_u16()
        )),
    }
}

/// Adapter client for the chat-completion API.
#[derive(Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl OpenAiClient {
    /// Create a new client from settings.
    pub fn new(settings: &OpenAiSettings) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(HTTP_CONNECT_TIMEOUT)
            .timeout(HTTP_REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client for completions");

        Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        }
    }

    /// Whether an API key is configured process-wide.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Resolve the key for one call: request-supplied key wins over config.
    ///
    /// A missing key is `Unavailable` (the adapter is not configured), not
    /// `Unauthenticated` (the remote service rejected a key).
    fn resolve_key<'a>(
        &'a self,
        override_key: Option<&'a SecretString>,
    ) -> AppResult<&'a SecretString> {
        override_key
            .or(self.api_key.as_ref())
            .ok_or_else(|| AppError::Unavailable("API key não configurada".to_string()))
    }

    /// Run one chat completion.
    pub async fn complete(
        &self,
        api_key: Option<&SecretString>,
        system_prompt: Option<&str>,
        user_prompt: &str,
        model: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> AppResult<Completion> {
        let key = self.resolve_key(api_key)?;

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system_prompt {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: user_prompt,
        });

        let request = ChatCompletionRequest {
            model,
            messages,
            max_tokens,
            temperature,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Completion request failed: {}", e);
                AppError::Unavailable("falha ao contactar o serviço de completions".to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Completion API returned status {}", status);
            return Err(error_for_status(status));
        }

        let body: ChatCompletionResponse = response.json().await.map_err(|e| {
            warn!("Completion response decode failed: {}", e);
            AppError::Unavailable("resposta inválida do serviço de completions".to_string())
        })?;

        let text = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| {
                AppError::Unavailable("resposta vazia do serviço de completions".to_string())
            })?;

        Ok(Completion {
            text,
            tokens_used: body.usage.map(|u| u.total_tokens).unwrap_or(0),
        })
    }

    /// Validate an API key with a minimal completion call.
    pub async fn validate_key(&self, api_key: &SecretString) -> AppResult<()> {
        self.complete(
            Some(api_key),
            None,
            "Teste",
            DEFAULT_CHAT_MODEL,
            5,
            0.0,
        )
        .await
        .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_mapping_unauthenticated() {
        assert!(matches!(
            error_for_status(StatusCode::UNAUTHORIZED),
            AppError::Unauthenticated(_)
        ));
        assert!(matches!(
            error_for_status(StatusCode::FORBIDDEN),
            AppError::Unauthenticated(_)
        ));
    }

    #[test]
    fn test_error_mapping_rate_limited() {
        assert!(matches!(
            error_for_status(StatusCode::TOO_MANY_REQUESTS),
            AppError::RateLimited(_)
        ));
    }

    #[test]
    fn test_error_mapping_other_statuses_are_unavailable() {
        for status in [
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::BAD_GATEWAY,
            StatusCode::SERVICE_UNAVAILABLE,
            StatusCode::BAD_REQUEST,
        ] {
            assert!(matches!(error_for_status(status), AppError::Unavailable(_)));
        }
    }

    #[test]
    fn test_resolve_key_prefers_request_key() {
        let client = OpenAiClient::new(&crate::config::OpenAiSettings {
            api_key: Some(SecretString::from("config-key")),
            base_url: "https://api.openai.com/v1".to_string(),
        });
        let request_key = SecretString::from("request-key");
        let resolved = client.resolve_key(Some(&request_key)).unwrap();
        assert_eq!(resolved.expose_secret(), "request-key");
    }

    #[test]
    fn test_resolve_key_without_any_key_is_unavailable() {
        let client = OpenAiClient::new(&crate::config::OpenAiSettings {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
        });
        assert!(matches!(
            client.resolve_key(None),
            Err(AppError::Unavailable(_))
        ));
    }
}
