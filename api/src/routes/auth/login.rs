use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use std::collections::HashMap;
use validator::Validate;

use pa_shared::phone::mask_phone_number;

use crate::app::AppState;
use crate::dto::auth::{LoginForm, LoginStateResponse};
use crate::resolver::Principal;

use super::{auth_request, outcome_response, request_id, strategy_error_response};

/// Handler for GET /auth/login
///
/// Returns the flashed pending phone and error for rendering the login page.
/// Reading consumes both, so the refreshed cookie is always sent back.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "pending_phone": "+15551234567",
///     "error": null
/// }
/// ```
pub async fn login_page(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let auth_request = auth_request(&req, HashMap::new());

    match state.strategy.login_state(&auth_request).await {
        Ok(login_state) => HttpResponse::Ok()
            .insert_header((header::SET_COOKIE, login_state.cookie.clone()))
            .json(LoginStateResponse {
                pending_phone: login_state.pending_phone,
                error: login_state.error,
            }),
        Err(e) => {
            log::error!("[{}] Failed to read login state: {}", request_id(&req), e);
            strategy_error_response(&e)
        }
    }
}

/// Handler for POST /auth/login
///
/// Runs one verification transition for the submitted form.
///
/// # Request Body (form encoded)
///
/// - `phone`: phone number, national or international
/// - `code`: optional code received by the user
///
/// # Response
///
/// - 303 See Other: code sent, code accepted, or failure with a failure redirect
/// - 200 OK: the session was already authenticated, body is the principal
/// - 400 Bad Request: missing or invalid phone, wrong code, rejected user
/// - 502 Bad Gateway: the verification service failed
/// - 500 Internal Server Error: misconfiguration or session failure
pub async fn login(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Form<HashMap<String, String>>,
) -> HttpResponse {
    let request_id = request_id(&req);
    let fields = form.into_inner();

    let login_form = LoginForm::from_fields(&fields);
    if let Err(errors) = login_form.validate() {
        log::warn!("[{}] Login form rejected: {}", request_id, errors);
        let auth_request = auth_request(&req, fields);
        return match state
            .strategy
            .reject::<Principal>(&auth_request, LoginForm::rejection(&errors))
            .await
        {
            Ok(outcome) => outcome_response(outcome),
            Err(e) => {
                log::error!("[{}] Login transition aborted: {}", request_id, e);
                strategy_error_response(&e)
            }
        };
    }

    log::info!(
        "[{}] Processing login for phone: {}, with_code: {}",
        request_id,
        login_form
            .phone
            .as_deref()
            .map(mask_phone_number)
            .unwrap_or_else(|| "<none>".to_string()),
        login_form.code.is_some()
    );

    let auth_request = auth_request(&req, fields);
    match state
        .strategy
        .authenticate::<Principal, _>(&auth_request, &*state.resolver)
        .await
    {
        Ok(outcome) => outcome_response(outcome),
        Err(e) => {
            log::error!("[{}] Login transition aborted: {}", request_id, e);
            strategy_error_response(&e)
        }
    }
}
