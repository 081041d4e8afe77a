//! Error types for the Gofile client.

use thiserror::Error;

/// Non-"ok" statuses carried by a response envelope.
///
/// The known statuses map to dedicated variants; anything else the server
/// sends is kept verbatim in [`StatusError::UnknownStatus`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatusError {
    /// `error-token`: the operation needs an authentication token
    #[error("Authentication token missing")]
    TokenMissing,

    /// `error-wrongToken`
    #[error("Invalid authentication token")]
    InvalidToken,

    /// `error-notPremium`
    #[error("Premium account required")]
    PremiumRequired,

    /// `error-notFound`
    #[error("Content not found")]
    NotFound,

    /// `error-contentsId`
    #[error("Invalid content ids")]
    InvalidContentIds,

    /// `error-type`, also raised locally for an unusable content type tag
    #[error("Invalid content type")]
    InvalidType,

    /// `error-account`
    #[error("Account error")]
    AccountError,

    /// Content exists but is not visible to the caller (client-side only)
    #[error("Content is private")]
    PrivateContent,

    /// The envelope carried an empty status (client-side only)
    #[error("Response status is empty")]
    EmptyStatus,

    /// Any other status string
    #[error("Unexpected response status: {0}")]
    UnknownStatus(String),
}

impl StatusError {
    /// Map an envelope status to its error. Returns `None` for `"ok"`.
    pub fn from_status(status: &str) -> Option<Self> {
        let error = match status {
            "ok" => return None,
            "error-token" => Self::TokenMissing,
            "error-wrongToken" => Self::InvalidToken,
            "error-notPremium" => Self::PremiumRequired,
            "error-notFound" => Self::NotFound,
            "error-contentsId" => Self::InvalidContentIds,
            "error-type" => Self::InvalidType,
            "error-account" => Self::AccountError,
            "error-privateContent" => Self::PrivateContent,
            "" => Self::EmptyStatus,
            other => Self::UnknownStatus(other.to_string()),
        };
        Some(error)
    }

    /// The status string this error corresponds to.
    pub fn as_status(&self) -> &str {
        match self {
            Self::TokenMissing => "error-token",
            Self::InvalidToken => "error-wrongToken",
            Self::PremiumRequired => "error-notPremium",
            Self::NotFound => "error-notFound",
            Self::InvalidContentIds => "error-contentsId",
            Self::InvalidType => "error-type",
            Self::AccountError => "error-account",
            Self::PrivateContent => "error-privateContent",
            Self::EmptyStatus => "",
            Self::UnknownStatus(status) => status,
        }
    }
}

/// Errors that can occur when talking to the Gofile API.
#[derive(Error, Debug)]
pub enum GofileError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Non-2xx reply whose body is not a response envelope
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// The envelope reported a non-"ok" status
    #[error(transparent)]
    Status(#[from] StatusError),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// IO error while reading an upload source
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid API or upload URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required parameter was missing or empty
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A content update was requested without an attribute
    #[error("No attribute provided")]
    NoAttributeProvided,

    /// No upload server to choose from
    #[error("No server available")]
    NoServerAvailable,

    /// The operation was cancelled by the caller
    #[error("Operation cancelled")]
    Cancelled,
}

impl GofileError {
    /// The envelope status behind this error, if any.
    pub fn status(&self) -> Option<&StatusError> {
        match self {
            Self::Status(status) => Some(status),
            _ => None,
        }
    }

    /// Whether the server rejected the call because the account is not premium.
    pub fn is_premium_required(&self) -> bool {
        matches!(self, Self::Status(StatusError::PremiumRequired))
    }
}

impl From<config::ConfigError> for GofileError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for Gofile client operations.
pub type Result<T> = std::result::Result<T, GofileError>;
