use actix_web::{web, HttpResponse};
use serde::Deserialize;

use komik_core::repositories::AccountRepository;
use komik_core::services::account::VerificationOutcome;
use komik_core::services::captcha::CaptchaVerifier;
use komik_core::services::mail::MailDispatcher;

use crate::app::AppState;
use crate::dto::MsgResponse;
use crate::handlers::domain_error_response;

#[derive(Debug, Deserialize)]
pub struct VerifyEmailQuery {
    pub token: String,
}

/// Handler for GET /api/auth/verify-email?token=...
///
/// Redeeming the same link twice is an idempotent success with a
/// different message.
pub async fn verify_email<R, C, M>(
    state: web::Data<AppState<R, C, M>>,
    query: web::Query<VerifyEmailQuery>,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    C: CaptchaVerifier + 'static,
    M: MailDispatcher + 'static,
{
    match state.account_service.verify_email(&query.token).await {
        Ok(VerificationOutcome::Verified) => HttpResponse::Ok().json(MsgResponse::new(
            "Email verified successfully. You can now log in.",
        )),
        Ok(VerificationOutcome::AlreadyVerified) => {
            HttpResponse::Ok().json(MsgResponse::new("Email already verified."))
        }
        Err(error) => domain_error_response(error),
    }
}
