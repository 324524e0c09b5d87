use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;

use komik_core::domain::value_objects::ProfileUpdate;
use komik_core::repositories::AccountRepository;
use komik_core::services::captcha::CaptchaVerifier;
use komik_core::services::mail::MailDispatcher;
use komik_core::services::token::SessionClaims;

use crate::app::AppState;
use crate::dto::{MsgResponse, ProfileUpdateRequest, UserDto};
use crate::handlers::domain_error_response;
use crate::middleware::auth::authenticate;

/// A caller may read or modify their own profile; admins may touch any.
fn authorize(claims: &SessionClaims, target: Uuid) -> Result<(), HttpResponse> {
    let is_self = claims
        .account_id()
        .map(|id| id == target)
        .unwrap_or(false);
    if is_self || claims.role == "admin" {
        Ok(())
    } else {
        Err(HttpResponse::Forbidden().json(MsgResponse::new("Forbidden")))
    }
}

/// Handler for GET /api/auth/users/{id}
pub async fn get_profile<R, C, M>(
    req: HttpRequest,
    state: web::Data<AppState<R, C, M>>,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    C: CaptchaVerifier + 'static,
    M: MailDispatcher + 'static,
{
    let claims = match authenticate(&req, &state.token_service) {
        Ok(claims) => claims,
        Err(response) => return response,
    };
    let id = path.into_inner();
    if let Err(response) = authorize(&claims, id) {
        return response;
    }

    match state.account_service.get_profile(id).await {
        Ok(user) => HttpResponse::Ok().json(UserDto::from(user)),
        Err(error) => domain_error_response(error),
    }
}

/// Handler for PATCH /api/auth/users/{id}
pub async fn update_profile<R, C, M>(
    req: HttpRequest,
    state: web::Data<AppState<R, C, M>>,
    path: web::Path<Uuid>,
    request: web::Json<ProfileUpdateRequest>,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    C: CaptchaVerifier + 'static,
    M: MailDispatcher + 'static,
{
    let claims = match authenticate(&req, &state.token_service) {
        Ok(claims) => claims,
        Err(response) => return response,
    };
    let id = path.into_inner();
    if let Err(response) = authorize(&claims, id) {
        return response;
    }
    let request = request.into_inner();

    let update = ProfileUpdate {
        name: request.name,
        email: request.email,
        avatar: request.avatar,
    };

    match state.account_service.update_profile(id, update).await {
        Ok(user) => HttpResponse::Ok().json(UserDto::from(user)),
        Err(error) => domain_error_response(error),
    }
}
