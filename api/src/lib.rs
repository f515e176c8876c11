// Library exports for testing and external use

pub mod app;
pub mod dto;
pub mod middleware;
pub mod resolver;
pub mod routes;

pub use app::{create_app, ApiStrategy, AppState};
pub use resolver::{PhonePrincipalResolver, Principal};
