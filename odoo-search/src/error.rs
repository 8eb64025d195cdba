use thiserror::Error;

#[derive(Error, Debug)]
pub enum OdooSearchError {
    #[error("No {0} specified.")]
    MissingArgument(&'static str),

    #[error("Error parsing argument `query': {0}")]
    InvalidQuery(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication failed for user {username} on database {database}")]
    AuthenticationFailed { username: String, database: String },

    #[error("XML-RPC fault {code}: {message}")]
    Fault { code: String, message: String },

    #[error("Malformed XML-RPC response: {0}")]
    Xml(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl OdooSearchError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::MissingArgument(_) | Self::InvalidQuery(_) => 2,
            Self::InvalidUrl(_) | Self::Config(_) => 3,
            Self::AuthenticationFailed { .. } | Self::Fault { .. } => 4,
            Self::Xml(_)
            | Self::UnexpectedResponse(_)
            | Self::Io(_)
            | Self::Serialization(_)
            | Self::Http(_) => 10,
        }
    }

    /// Usage errors are reported with the command's help text.
    pub const fn is_usage(&self) -> bool {
        matches!(self, Self::MissingArgument(_) | Self::InvalidQuery(_))
    }
}

impl From<quick_xml::Error> for OdooSearchError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Xml(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OdooSearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_errors_share_clap_exit_code() {
        assert_eq!(OdooSearchError::MissingArgument("username").exit_code(), 2);
        assert_eq!(
            OdooSearchError::InvalidQuery("expected value".into()).exit_code(),
            2
        );
        assert!(OdooSearchError::MissingArgument("object").is_usage());
    }

    #[test]
    fn test_remote_errors_are_not_usage() {
        let err = OdooSearchError::Fault {
            code: "1".into(),
            message: "Access Denied".into(),
        };
        assert_eq!(err.exit_code(), 4);
        assert!(!err.is_usage());
        assert_eq!(err.to_string(), "XML-RPC fault 1: Access Denied");
    }
}
