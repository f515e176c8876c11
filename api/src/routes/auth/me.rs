use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use std::collections::HashMap;

use crate::app::AppState;
use crate::dto::error::ErrorResponse;
use crate::resolver::Principal;

use super::{auth_request, request_id, strategy_error_response};

/// Handler for GET /auth/me
///
/// # Response
///
/// - 200 OK: the principal stored in the session
/// - 401 Unauthorized: no authenticated session
pub async fn me(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let auth_request = auth_request(&req, HashMap::new());

    match state.strategy.current_principal::<Principal>(&auth_request).await {
        Ok(Some(principal)) => HttpResponse::Ok().json(principal),
        Ok(None) => ErrorResponse::new("UNAUTHENTICATED", "Sign in with your phone number")
            .to_response(StatusCode::UNAUTHORIZED),
        Err(e) => {
            log::warn!("[{}] Could not read principal: {}", request_id(&req), e);
            strategy_error_response(&e)
        }
    }
}
