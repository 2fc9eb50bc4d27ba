use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::errors::ErrorResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    MissingToken,
    MalformedToken,
    InvalidSignature,
    Expired,
    IncorrectClaims,
    Forbidden,
}

impl AuthErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            AuthErrorKind::MissingToken => "authorization_header_missing",
            AuthErrorKind::MalformedToken => "invalid_header",
            AuthErrorKind::InvalidSignature => "invalid_signature",
            AuthErrorKind::Expired => "token_expired",
            AuthErrorKind::IncorrectClaims => "invalid_claims",
            AuthErrorKind::Forbidden => "unauthorized",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthErrorKind::Forbidden => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

/// Rejection produced while checking a bearer token against a permission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {}", .kind.code(), .message)]
pub struct AuthError {
    kind: AuthErrorKind,
    message: String,
}

impl AuthError {
    pub fn new(kind: AuthErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> AuthErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn missing_token() -> Self {
        Self::new(
            AuthErrorKind::MissingToken,
            "Authorization header is expected.",
        )
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::new(AuthErrorKind::MalformedToken, message)
    }

    pub(crate) fn forbidden() -> Self {
        Self::new(AuthErrorKind::Forbidden, "Permission not found.")
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        self.kind.status_code()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorResponse::new(status, self.message.clone()))
    }
}
