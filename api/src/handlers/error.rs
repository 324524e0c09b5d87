//! Convert domain errors into HTTP responses.
//!
//! Status mapping: validation 400, authentication 401, locked 423,
//! not-found 404, duplicate account 409, upstream 502, storage/internal
//! 500. Failure bodies are `{ "msg": ... }`, except on the password-reset
//! endpoints which speak `{ "message": ... }` throughout; internal details
//! never leave the process.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;

use komik_core::errors::{AuthError, DomainError};

use crate::dto::{MessageResponse, MsgResponse};

fn error_parts(error: DomainError) -> (StatusCode, String) {
    match error {
        DomainError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),

        DomainError::Auth(auth_error) => match auth_error {
            AuthError::AccountNotFound => (StatusCode::NOT_FOUND, auth_error.to_string()),
            AuthError::AccountLocked { unlock_at } => (
                StatusCode::LOCKED,
                format!(
                    "Account locked. Try again after {}",
                    unlock_at.format("%Y-%m-%d %H:%M:%S UTC")
                ),
            ),
            AuthError::UserAlreadyExists => (StatusCode::CONFLICT, auth_error.to_string()),
            AuthError::InvalidOrExpiredLink => (
                StatusCode::UNAUTHORIZED,
                "Invalid or expired token".to_string(),
            ),
            // InvalidCredentials, CaptchaRejected, InvalidOtp, PasswordExpired
            _ => (StatusCode::UNAUTHORIZED, auth_error.to_string()),
        },

        DomainError::Token(_) => (
            StatusCode::UNAUTHORIZED,
            "Invalid or expired token".to_string(),
        ),

        DomainError::Password(e) => (StatusCode::BAD_REQUEST, e.to_string()),

        DomainError::Upstream { service, message } => {
            log::error!("upstream failure ({service}): {message}");
            (
                StatusCode::BAD_GATEWAY,
                "A required service is unavailable. Please try again later.".to_string(),
            )
        }

        DomainError::Storage { message } => {
            log::error!("storage failure: {message}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred".to_string(),
            )
        }

        DomainError::Internal { message } => {
            log::error!("internal failure: {message}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred".to_string(),
            )
        }
    }
}

/// Map a domain error to its HTTP response.
pub fn domain_error_response(error: DomainError) -> HttpResponse {
    let (status, msg) = error_parts(error);
    HttpResponse::build(status).json(MsgResponse::new(msg))
}

/// Same status mapping, `{ "message": ... }` body for the reset endpoints.
pub fn reset_error_response(error: DomainError) -> HttpResponse {
    let (status, message) = error_parts(error);
    HttpResponse::build(status).json(MessageResponse::new(message))
}

fn first_validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|v| v.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| "Invalid request".to_string())
}

/// Map `validator` derive failures to a 400 with the first message.
pub fn validation_failure(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(MsgResponse::new(first_validation_message(&errors)))
}

/// Reset-endpoint variant of [`validation_failure`].
pub fn reset_validation_failure(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(MessageResponse::new(first_validation_message(&errors)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use komik_core::errors::ValidationError;

    #[test]
    fn statuses_follow_the_mapping() {
        let cases = [
            (
                DomainError::Validation(ValidationError::InvalidEmail),
                400u16,
            ),
            (DomainError::Auth(AuthError::InvalidCredentials), 401),
            (
                DomainError::Auth(AuthError::AccountLocked {
                    unlock_at: Utc::now(),
                }),
                423,
            ),
            (DomainError::Auth(AuthError::AccountNotFound), 404),
            (DomainError::Auth(AuthError::UserAlreadyExists), 409),
            (DomainError::upstream("mail", "down"), 502),
            (DomainError::storage("lost"), 500),
        ];
        for (error, status) in cases {
            assert_eq!(domain_error_response(error).status().as_u16(), status);
        }
    }

    #[test]
    fn reset_variant_keeps_the_statuses() {
        let response = reset_error_response(DomainError::Auth(AuthError::AccountNotFound));
        assert_eq!(response.status().as_u16(), 404);
        let response = reset_error_response(DomainError::Auth(AuthError::InvalidOrExpiredLink));
        assert_eq!(response.status().as_u16(), 401);
    }
}
