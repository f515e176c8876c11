mod cookie_store_tests;

use pa_core::domain::{AuthRequest, FormData};

/// `name=value` part of a `Set-Cookie` header
pub(crate) fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap_or_default().to_string()
}

/// Request carrying the cookie from a previous response
pub(crate) fn request_with(set_cookie: &str) -> AuthRequest {
    AuthRequest::new(FormData::new()).with_cookie_header(cookie_pair(set_cookie))
}
