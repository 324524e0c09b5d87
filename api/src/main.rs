use std::sync::Arc;

use actix_web::{web, HttpServer};
use dotenvy::dotenv;
use log::info;

use komik_api::app::{create_app, AppState};
use komik_core::services::account::AccountService;
use komik_core::services::auth::{AuthService, AuthServiceConfig};
use komik_core::services::hasher::SecretHasher;
use komik_core::services::password::PasswordPolicy;
use komik_core::services::token::{TokenService, TokenServiceConfig};
use komik_infra::captcha::RecaptchaVerifier;
use komik_infra::database::{DatabasePool, MySqlAccountRepository};
use komik_infra::mail::HttpMailDispatcher;
use komik_shared::config::{AuthConfig, DatabaseConfig, ServerConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting Komik API Server");

    // Fatal on missing JWT_SECRET or incomplete mail/captcha settings;
    // there are no insecure fallbacks.
    let auth_config = AuthConfig::from_env().map_err(fatal)?;
    let server_config = ServerConfig::from_env();
    let database_config = DatabaseConfig::from_env().map_err(fatal)?;

    let pool = DatabasePool::new(database_config)
        .await
        .map_err(fatal)?;
    let repository = Arc::new(MySqlAccountRepository::new(pool.get_pool().clone()));
    let captcha = Arc::new(RecaptchaVerifier::new(auth_config.captcha.clone()).map_err(fatal)?);
    let mail = Arc::new(HttpMailDispatcher::new(auth_config.mail.clone()).map_err(fatal)?);

    let token_service = Arc::new(TokenService::new(TokenServiceConfig::from_jwt(
        &auth_config.jwt,
    )));
    let hasher = SecretHasher::new();

    let auth_service = Arc::new(AuthService::new(
        repository.clone(),
        captcha,
        mail.clone(),
        token_service.clone(),
        hasher.clone(),
        AuthServiceConfig::default(),
    ));
    let account_service = Arc::new(AccountService::new(
        repository,
        mail,
        token_service.clone(),
        hasher,
        PasswordPolicy::default(),
        auth_config.mail.client_url.clone(),
    ));

    let app_state = web::Data::new(AppState {
        auth_service,
        account_service,
        token_service,
    });

    let bind_address = server_config.bind_address();
    info!("Server will bind to: {bind_address}");

    HttpServer::new(move || create_app(app_state.clone()))
        .bind(&bind_address)?
        .run()
        .await
}

fn fatal(error: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, error.to_string())
}
