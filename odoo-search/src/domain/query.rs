use reqwest::Url;

use super::Domain;

pub const DEFAULT_URL: &str = "http://localhost:8069";
pub const DEFAULT_DATABASE: &str = "odoo";

/// Everything one invocation needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct QueryConfig {
    pub url: Url,
    pub database: String,
    pub username: String,
    pub password: Option<String>,
    pub object: String,
    pub domain: Domain,
    pub fields: Option<Vec<String>>,
}

impl QueryConfig {
    /// An absent password goes over the wire as an empty string.
    pub fn password(&self) -> &str {
        self.password.as_deref().unwrap_or_default()
    }
}
