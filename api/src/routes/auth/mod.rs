//! Authentication route handlers
//!
//! - `GET /auth/login`: flashed pending phone and error for the login page
//! - `POST /auth/login`: submit a phone, or a phone and code
//! - `POST /auth/logout`: end the session
//! - `GET /auth/me`: principal held by the session

pub mod login;
pub mod logout;
pub mod me;

use actix_web::http::{header, StatusCode};
use actix_web::{HttpRequest, HttpResponse};
use std::collections::HashMap;
use uuid::Uuid;

use pa_core::domain::{AuthRequest, FormData};
use pa_core::errors::{FailureKind, StrategyError};
use pa_core::services::AuthOutcome;

use crate::dto::error::ErrorResponse;
use crate::resolver::Principal;

/// Build the strategy's view of an HTTP request
pub(crate) fn auth_request(req: &HttpRequest, fields: HashMap<String, String>) -> AuthRequest {
    let request = AuthRequest::new(FormData::from(fields));
    match req
        .headers()
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
    {
        Some(cookie) => request.with_cookie_header(cookie),
        None => request,
    }
}

/// Request id for log correlation
pub(crate) fn request_id(req: &HttpRequest) -> String {
    req.headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// HTTP status for a recoverable failure
pub(crate) fn failure_status(kind: FailureKind) -> StatusCode {
    match kind {
        FailureKind::DeliveryFailed | FailureKind::ProviderRejected => StatusCode::BAD_GATEWAY,
        FailureKind::MissingPhoneNumber
        | FailureKind::InvalidPhoneNumber
        | FailureKind::InvalidCode
        | FailureKind::UserResolution => StatusCode::BAD_REQUEST,
    }
}

/// Turn a transition outcome into a response
pub(crate) fn outcome_response(outcome: AuthOutcome<Principal>) -> HttpResponse {
    match outcome {
        AuthOutcome::Redirect { target, cookie } => HttpResponse::SeeOther()
            .insert_header((header::LOCATION, target))
            .insert_header((header::SET_COOKIE, cookie))
            .finish(),
        AuthOutcome::Authenticated { principal } => HttpResponse::Ok().json(principal),
        AuthOutcome::Failed { error, cookie } => {
            let Some(kind) = error.kind() else {
                return strategy_error_response(&error);
            };
            HttpResponse::build(failure_status(kind))
                .insert_header((header::SET_COOKIE, cookie))
                .json(ErrorResponse::new(kind.as_code(), error.to_string()))
        }
    }
}

/// Response for errors that escaped the failure transition
pub(crate) fn strategy_error_response(error: &StrategyError) -> HttpResponse {
    if let Some(kind) = error.kind() {
        return ErrorResponse::new(kind.as_code(), error.to_string())
            .to_response(failure_status(kind));
    }

    let code = match error {
        StrategyError::Session(_) => "SESSION_ERROR",
        _ => "MISCONFIGURED",
    };
    ErrorResponse::new(code, "The login service is not available")
        .to_response(StatusCode::INTERNAL_SERVER_ERROR)
}
