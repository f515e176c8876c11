use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use std::collections::HashMap;

use crate::app::AppState;
use crate::dto::auth::LogoutResponse;

use super::{auth_request, request_id, strategy_error_response};

/// Handler for POST /auth/logout
///
/// Destroys the session and clears the cookie. Succeeds without a session.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Logged out successfully"
/// }
/// ```
pub async fn logout(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let auth_request = auth_request(&req, HashMap::new());

    match state.strategy.logout(&auth_request).await {
        Ok(cookie) => HttpResponse::Ok()
            .insert_header((header::SET_COOKIE, cookie))
            .json(LogoutResponse {
                message: "Logged out successfully".to_string(),
            }),
        Err(e) => {
            log::error!("[{}] Logout failed: {}", request_id(&req), e);
            strategy_error_response(&e)
        }
    }
}
