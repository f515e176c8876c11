//! Application state and factory
//!
//! This module handles the application state and provides the factory for
//! creating the Actix-web application.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{middleware::Logger, web, App, HttpResponse};
use std::sync::Arc;

use pa_core::services::{
    PhoneFormatter, PhoneStrategy, SessionStore, UserResolver, VerificationProvider,
};

use crate::middleware::cors::create_cors;
use crate::resolver::Principal;
use crate::routes::auth::{login, logout, me};

/// Strategy over trait objects chosen at startup
pub type ApiStrategy = PhoneStrategy<dyn VerificationProvider, dyn SessionStore, dyn PhoneFormatter>;

/// Application state shared by all workers
pub struct AppState {
    pub strategy: Arc<ApiStrategy>,
    pub resolver: Arc<dyn UserResolver<Principal>>,
}

impl AppState {
    pub fn new(strategy: Arc<ApiStrategy>, resolver: Arc<dyn UserResolver<Principal>>) -> Self {
        Self { strategy, resolver }
    }
}

/// Create and configure the application
pub fn create_app(
    app_state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(app_state)
        .wrap(create_cors())
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/auth")
                .route("/login", web::get().to(login::login_page))
                .route("/login", web::post().to(login::login))
                .route("/logout", web::post().to(logout::logout))
                .route("/me", web::get().to(me::me)),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "phone-auth-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
