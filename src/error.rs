//! Domain error types for the Harvey server.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.
//! User-visible messages are in Portuguese; internal detail is logged server-side.

use actix_web::{HttpResponse, ResponseError};
use std::fmt;

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed
    #[error("Erro de banco de dados: {0}")]
    Database(String),

    /// Resource not found
    #[error("{0} não encontrado")]
    NotFound(String),

    /// Invalid input data
    #[error("Dados inválidos: {0}")]
    InvalidInput(String),

    /// Duplicate business key
    #[error("Conflito: {0}")]
    Conflict(String),

    /// External service rejected the credentials (or none were supplied)
    #[error("Falha de autenticação: {0}")]
    Unauthenticated(String),

    /// External service rate limit exceeded
    #[error("Limite de requisições excedido: {0}")]
    RateLimited(String),

    /// External service unavailable or not configured
    #[error("Serviço indisponível: {0}")]
    Unavailable(String),
}

impl AppError {
    /// Stable error code used in response bodies.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Unauthenticated(_) => "UNAUTHENTICATED",
            AppError::RateLimited(_) => "RATE_LIMITED",
            AppError::Unavailable(_) => "UNAVAILABLE",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;
        match self {
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Database(err_str) => {
                tracing::error!("Database error: {}", err_str);
                "Ocorreu um erro interno no banco de dados".to_string()
            }
            _ => self.to_string(),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.code().to_string(),
            message,
        })
    }
}

/// Error response body matching OpenAPI schema.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

// Conversion implementations for common error types

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("erro ao interpretar JSON: {}", err))
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_status_code_mapping() {
        let cases = [
            (AppError::NotFound("Caso".into()), StatusCode::NOT_FOUND),
            (
                AppError::InvalidInput("campo title é obrigatório".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Conflict("número do caso já existe".into()),
                StatusCode::CONFLICT,
            ),
            (
                AppError::Unauthenticated("API key inválida".into()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                AppError::RateLimited("tente novamente".into()),
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (
                AppError::Unavailable("serviço não configurado".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::Database("connection reset".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.error_response().status(), expected);
        }
    }

    #[test]
    fn test_database_detail_is_not_exposed() {
        let err = AppError::Database("password authentication failed for user".into());
        let resp = err.error_response();
        // The body is built from ErrorResponse; the generic message replaces the detail.
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!format!("{}", err).is_empty());
    }
}
