//! Session store capability and cookie helpers.

mod cookie;
mod keys;
mod traits;

pub use cookie::{CookieOptions, SameSite};
pub use keys::SessionKeys;
pub use traits::SessionStore;
