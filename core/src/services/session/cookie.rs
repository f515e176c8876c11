//! `Set-Cookie` rendering shared by every session store

use pa_shared::SessionConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// SameSite cookie attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    /// Parse a configured value, defaulting to `Lax`
    pub fn from_config(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "strict" => SameSite::Strict,
            "none" => SameSite::None,
            _ => SameSite::Lax,
        }
    }
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SameSite::Strict => f.write_str("Strict"),
            SameSite::Lax => f.write_str("Lax"),
            SameSite::None => f.write_str("None"),
        }
    }
}

/// Attributes of the session cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieOptions {
    pub name: String,
    pub path: String,
    pub domain: Option<String>,
    /// Lifetime in seconds; `None` makes a browser-session cookie
    pub max_age: Option<u64>,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self::from_config(&SessionConfig::default())
    }
}

impl CookieOptions {
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            name: config.cookie_name.clone(),
            path: config.path.clone(),
            domain: None,
            max_age: Some(config.max_age_secs()),
            secure: config.secure,
            http_only: config.http_only,
            same_site: SameSite::from_config(&config.same_site),
        }
    }

    /// `Set-Cookie` value carrying `value`
    pub fn to_header(&self, value: &str) -> String {
        self.render(value, self.max_age)
    }

    /// `Set-Cookie` value that makes the browser drop the cookie
    pub fn expired_header(&self) -> String {
        self.render("", Some(0))
    }

    fn render(&self, value: &str, max_age: Option<u64>) -> String {
        let mut header = format!("{}={}; Path={}", self.name, value, self.path);
        if let Some(domain) = &self.domain {
            header.push_str(&format!("; Domain={}", domain));
        }
        if let Some(max_age) = max_age {
            header.push_str(&format!("; Max-Age={}", max_age));
        }
        if self.http_only {
            header.push_str("; HttpOnly");
        }
        // Browsers reject SameSite=None without Secure
        if self.secure || self.same_site == SameSite::None {
            header.push_str("; Secure");
        }
        header.push_str(&format!("; SameSite={}", self.same_site));
        header
    }
}
