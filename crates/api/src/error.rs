use storefront_core::{
    errors::{ApplicationError, DomainError, InterfaceError},
    notice::Notice,
    validation::FieldErrors,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request `{correlation_id}` failed to reach the API: {source}")]
    Transport {
        correlation_id: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request `{correlation_id}` returned {status}: {message}")]
    Status { status: u16, message: String, correlation_id: String },
    #[error("request `{correlation_id}` returned an unreadable body: {source}")]
    Decode {
        correlation_id: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    InvalidInput(#[from] FieldErrors),
    #[error("http client could not be built: {0}")]
    Client(#[source] reqwest::Error),
    #[error("invalid api base url `{0}`")]
    InvalidBaseUrl(String),
}

impl ApiError {
    pub fn correlation_id(&self) -> Option<&str> {
        match self {
            Self::Transport { correlation_id, .. }
            | Self::Status { correlation_id, .. }
            | Self::Decode { correlation_id, .. } => Some(correlation_id),
            Self::InvalidInput(_) | Self::Client(_) | Self::InvalidBaseUrl(_) => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::InvalidInput(errors) => Some(errors),
            _ => None,
        }
    }

    pub fn into_interface(self) -> InterfaceError {
        let correlation_id = self.correlation_id().unwrap_or("local").to_owned();
        ApplicationError::from(self).into_interface(correlation_id)
    }

    /// Transient notice for the user; the detailed cause stays in the logs.
    pub fn notice(self) -> Notice {
        Notice::from_failure(&self.into_interface())
    }
}

impl From<ApiError> for ApplicationError {
    fn from(value: ApiError) -> Self {
        match value {
            ApiError::InvalidInput(errors) => Self::Domain(DomainError::InvalidInput(errors)),
            ApiError::Status { status: 401 | 403, message, .. } => Self::Unauthorized(message),
            ApiError::Status { status: 404, message, .. } => Self::NotFound(message),
            ApiError::Status { status, message, .. } if (400..500).contains(&status) => {
                Self::Rejected(message)
            }
            ApiError::Status { status, message, .. } => {
                Self::Integration(format!("api returned {status}: {message}"))
            }
            ApiError::Transport { source, .. } => Self::Integration(source.to_string()),
            ApiError::Decode { source, .. } => {
                Self::Integration(format!("unexpected response body: {source}"))
            }
            ApiError::Client(source) => Self::Configuration(source.to_string()),
            ApiError::InvalidBaseUrl(url) => {
                Self::Configuration(format!("invalid api base url `{url}`"))
            }
        }
    }
}
