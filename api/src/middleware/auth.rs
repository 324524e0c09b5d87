//! Bearer-token guard for authenticated endpoints.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse};

use komik_core::services::token::{SessionClaims, TokenService};

use crate::dto::MsgResponse;

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(MsgResponse::new("Invalid or expired token"))
}

/// Verify the `Authorization: Bearer` header and return the session
/// claims, or the 401 response to send back.
pub fn authenticate(
    req: &HttpRequest,
    token_service: &TokenService,
) -> Result<SessionClaims, HttpResponse> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(unauthorized)?;

    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or_else(unauthorized)?;

    token_service
        .verify_session_token(token)
        .map_err(|_| unauthorized())
}
