use reqwest::Url;

use crate::error::{OdooSearchError, Result};

/// The two XML-RPC services the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Common,
    Object,
}

impl Service {
    pub const fn path(self) -> &'static str {
        match self {
            Self::Common => "xmlrpc/2/common",
            Self::Object => "xmlrpc/2/object",
        }
    }

    /// Resolves the service path relative to the base URL.
    pub fn endpoint(self, base: &Url) -> Result<Url> {
        base.join(self.path())
            .map_err(|e| OdooSearchError::InvalidUrl(format!("{base}: {e}")))
    }
}
