//! Caller identity extraction.
//!
//! There is no authentication system yet. Callers may identify themselves
//! through the `X-User-Id` header and every mutating operation threads that
//! identity into the persisted row, so a real auth layer can replace this
//! extractor without touching the handlers.

use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError};
use std::future::{ready, Ready};

use crate::config::USER_ID_HEADER;
use crate::error::ErrorResponse;

/// Identity of the caller issuing a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerIdentity {
    /// Numeric user id, when the caller supplied one.
    pub user_id: Option<i64>,
}

/// Identity extraction error (malformed header).
#[derive(Debug)]
pub struct IdentityError {
    message: String,
}

impl std::fmt::Display for IdentityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for IdentityError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::BAD_REQUEST).json(ErrorResponse {
            error: "INVALID_INPUT".to_string(),
            message: self.message.clone(),
        })
    }
}

impl FromRequest for CallerIdentity {
    type Error = IdentityError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let header = req
            .headers()
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok());

        let user_id = match header {
            None => None,
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    return ready(Err(IdentityError {
                        message: format!("cabeçalho {} inválido", USER_ID_HEADER),
                    }));
                }
            },
        };

        ready(Ok(CallerIdentity { user_id }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_missing_header_is_anonymous() {
        let req = TestRequest::default().to_http_request();
        let identity = CallerIdentity::extract(&req).await.unwrap();
        assert_eq!(identity.user_id, None);
    }

    #[actix_web::test]
    async fn test_numeric_header_is_parsed() {
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, "42"))
            .to_http_request();
        let identity = CallerIdentity::extract(&req).await.unwrap();
        assert_eq!(identity.user_id, Some(42));
    }

    #[actix_web::test]
    async fn test_malformed_header_is_rejected() {
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, "abc"))
            .to_http_request();
        assert!(CallerIdentity::extract(&req).await.is_err());
    }
}
