use actix_web::{web, HttpResponse};
use validator::Validate;

use komik_core::domain::value_objects::LoginOutcome;
use komik_core::repositories::AccountRepository;
use komik_core::services::auth;
use komik_core::services::captcha::CaptchaVerifier;
use komik_core::services::mail::MailDispatcher;

use crate::app::AppState;
use crate::dto::{LoginRequest, LoginResponse};
use crate::handlers::{domain_error_response, validation_failure};

/// Handler for POST /api/auth/login
///
/// Serves both legs of the login flow. Without `otp` the request is the
/// CAPTCHA-gated credential leg and a successful response carries
/// `requireOtp: true`; with `otp` it is the code leg and a successful
/// response carries the session token and the public user.
pub async fn login<R, C, M>(
    state: web::Data<AppState<R, C, M>>,
    request: web::Json<LoginRequest>,
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

    let outcome = state
        .auth_service
        .login(auth::LoginRequest {
            email: request.email,
            password: request.password,
            otp: request.otp,
            captcha_token: request.captcha_token,
        })
        .await;

    match outcome {
        Ok(LoginOutcome::OtpRequired) => HttpResponse::Ok().json(LoginResponse {
            token: None,
            user: None,
            require_otp: Some(true),
            msg: "OTP sent to your email".to_string(),
        }),
        Ok(LoginOutcome::Authenticated { token, user }) => HttpResponse::Ok().json(LoginResponse {
            token: Some(token),
            user: Some(user.into()),
            require_otp: None,
            msg: "Login successful".to_string(),
        }),
        Err(error) => domain_error_response(error),
    }
}
