use thiserror::Error;

#[derive(Error, Debug)]
pub enum CorreiosError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Authentication failed{}: {message}", status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Auth { status: Option<u16>, message: String },

    #[error("No {resource} endpoint found")]
    EndpointNotFound { resource: &'static str },

    #[error("Correios API error ({status}): {message}")]
    RemoteApi { status: u16, message: String },

    #[error("Connection error with the Correios API: {message}")]
    Connectivity { message: String },
}

impl CorreiosError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Classify a reqwest transport failure: anything that never produced an
    /// HTTP response (DNS, refused connection, timeout) is a connectivity error.
    pub fn from_transport(err: reqwest::Error) -> Self {
        Self::Connectivity {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CorreiosError>;
