//! Application state and factory
//!
//! Initializes shared service state and assembles the Actix-web
//! application with middleware and the route table.

use std::sync::Arc;

use actix_web::{middleware::Logger, web, HttpResponse};

use komik_core::repositories::AccountRepository;
use komik_core::services::account::AccountService;
use komik_core::services::auth::AuthService;
use komik_core::services::captcha::CaptchaVerifier;
use komik_core::services::mail::MailDispatcher;
use komik_core::services::token::TokenService;

use crate::dto::MsgResponse;
use crate::routes;

/// Application state that holds shared services
pub struct AppState<R, C, M>
where
    R: AccountRepository,
    C: CaptchaVerifier,
    M: MailDispatcher,
{
    pub auth_service: Arc<AuthService<R, C, M>>,
    pub account_service: Arc<AccountService<R, M>>,
    pub token_service: Arc<TokenService>,
}

/// Create and configure the application with all dependencies
pub fn create_app<R, C, M>(
    app_state: web::Data<AppState<R, C, M>>,
) -> actix_web::App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    R: AccountRepository + 'static,
    C: CaptchaVerifier + 'static,
    M: MailDispatcher + 'static,
{
    let cors = crate::middleware::cors::create_cors();

    actix_web::App::new()
        .app_data(app_state)
        .wrap(Logger::default())
        .wrap(cors)
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/auth")
                .route("/login", web::post().to(routes::auth::login::login::<R, C, M>))
                .route("/signup", web::post().to(routes::auth::signup::signup::<R, C, M>))
                .route(
                    "/verify-email",
                    web::get().to(routes::auth::verify_email::verify_email::<R, C, M>),
                )
                .route(
                    "/forgot-password",
                    web::post().to(routes::auth::forgot_password::forgot_password::<R, C, M>),
                )
                .route(
                    "/reset-password/{token}",
                    web::post().to(routes::auth::reset_password::reset_password::<R, C, M>),
                )
                .route(
                    "/users/{id}",
                    web::get().to(routes::users::profile::get_profile::<R, C, M>),
                )
                .route(
                    "/users/{id}",
                    web::patch().to(routes::users::profile::update_profile::<R, C, M>),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "komik-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(MsgResponse::new("The requested resource was not found"))
}
