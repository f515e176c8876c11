//! Domain entities carried through a single transition.

pub mod auth_request;
pub mod session;


// Re-export commonly used types
pub use auth_request::{AuthRequest, FormData, CODE_FIELD, PHONE_FIELD};
pub use session::{Session, SessionData};
