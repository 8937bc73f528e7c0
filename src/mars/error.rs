use thiserror::Error;

/// Why the photo list could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server could not be reached, or the transfer broke off.
    #[error("Connection error: {0}")]
    Connectivity(String),

    #[error("HTTP error {code}: {reason}")]
    HttpStatus { code: u16, reason: String },

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl FetchError {
    /// Message shown in place of the photo grid.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Connectivity(_) => {
                "Network error: check your internet connection.".to_string()
            }
            FetchError::HttpStatus { code, reason } => format!("HTTP error {code}: {reason}"),
            FetchError::Unknown(detail) => format!("Unexpected error: {detail}"),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            FetchError::HttpStatus {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            }
        } else if e.is_connect() || e.is_timeout() || e.is_request() || e.is_body() {
            FetchError::Connectivity(e.to_string())
        } else {
            FetchError::Unknown(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Unknown(e.to_string())
    }
}
