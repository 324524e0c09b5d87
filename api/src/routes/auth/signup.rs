use actix_web::{web, HttpResponse};
use validator::Validate;

use komik_core::repositories::AccountRepository;
use komik_core::services::account;
use komik_core::services::captcha::CaptchaVerifier;
use komik_core::services::mail::MailDispatcher;

use crate::app::AppState;
use crate::dto::{MsgResponse, SignupRequest};
use crate::handlers::{domain_error_response, validation_failure};

/// Handler for POST /api/auth/signup
///
/// Creates an unverified account and dispatches the verification mail.
/// Never returns a session token.
pub async fn signup<R, C, M>(
    state: web::Data<AppState<R, C, M>>,
    request: web::Json<SignupRequest>,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    C: CaptchaVerifier + 'static,
    M: MailDispatcher + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_failure(errors);
    }
    let request = request.into_inner();

    let result = state
        .account_service
        .signup(account::SignupRequest {
            name: request.name,
            email: request.email,
            password: request.password,
        })
        .await;

    match result {
        Ok(()) => HttpResponse::Created().json(MsgResponse::new(
            "Account created. Please check your email to verify your address.",
        )),
        Err(error) => domain_error_response(error),
    }
}
