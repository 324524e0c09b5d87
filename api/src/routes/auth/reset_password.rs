use actix_web::{web, HttpResponse};
use validator::Validate;

use komik_core::repositories::AccountRepository;
use komik_core::services::captcha::CaptchaVerifier;
use komik_core::services::mail::MailDispatcher;

use crate::app::AppState;
use crate::dto::{MessageResponse, ResetPasswordRequest};
use crate::handlers::{reset_error_response, reset_validation_failure};

/// Handler for POST /api/auth/reset-password/{token}
///
/// The path segment is the raw capability token from the reset mail; the
/// service matches it against the stored digest.
pub async fn reset_password<R, C, M>(
    state: web::Data<AppState<R, C, M>>,
    path: web::Path<String>,
    request: web::Json<ResetPasswordRequest>,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    C: CaptchaVerifier + 'static,
    M: MailDispatcher + 'static,
{
    if let Err(errors) = request.validate() {
        return reset_validation_failure(errors);
    }
    let token = path.into_inner();

    match state
        .account_service
        .reset_password(&token, &request.new_password)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new(
            "Password has been reset successfully",
        )),
        Err(error) => reset_error_response(error),
    }
}
