use serde::{Deserialize, Serialize};

use crate::errors::InterfaceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// Transient message shown to the user after an action completes or fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into(), correlation_id: None }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into(), correlation_id: None }
    }

    pub fn from_failure(error: &InterfaceError) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: error.user_message().to_owned(),
            correlation_id: Some(error.correlation_id().to_owned()),
        }
    }
}
