use actix_web::{web, HttpResponse};
use validator::Validate;

use komik_core::repositories::AccountRepository;
use komik_core::services::captcha::CaptchaVerifier;
use komik_core::services::mail::MailDispatcher;

use crate::app::AppState;
use crate::dto::{ForgotPasswordRequest, MessageResponse};
use crate::handlers::{reset_error_response, reset_validation_failure};

/// Handler for POST /api/auth/forgot-password
pub async fn forgot_password<R, C, M>(
    state: web::Data<AppState<R, C, M>>,
    request: web::Json<ForgotPasswordRequest>,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    C: CaptchaVerifier + 'static,
    M: MailDispatcher + 'static,
{
    if let Err(errors) = request.validate() {
        return reset_validation_failure(errors);
    }

    match state.account_service.forgot_password(&request.email).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new(
            "Password reset link sent to your email",
        )),
        Err(error) => reset_error_response(error),
    }
}
