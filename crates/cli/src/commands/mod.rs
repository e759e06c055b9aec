pub mod cart;
pub mod catalog;
pub mod config;
pub mod coupons;
pub mod doctor;
pub mod favorites;
pub mod inventory;
pub mod orders;
pub mod pages;
pub mod team;

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use serde_json::Value;
use storefront_api::{ApiError, HttpApiClient};
use storefront_core::config::{AppConfig, LoadOptions};
use storefront_core::errors::InterfaceError;
use tokio::runtime::Runtime;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_CONFIG: u8 = 2;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        Self::ok(command, message.into(), None)
    }

    pub fn success_with<T: Serialize>(command: &str, message: impl Into<String>, data: &T) -> Self {
        match serde_json::to_value(data) {
            Ok(data) => Self::ok(command, message.into(), Some(data)),
            Err(error) => Self::failure(command, "serialization", error.to_string(), EXIT_FAILURE),
        }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            correlation_id: None,
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    pub fn config_failure(command: &str, error: impl std::fmt::Display) -> Self {
        Self::failure(command, "config_validation", error.to_string(), EXIT_CONFIG)
    }

    /// Maps an API failure to the error envelope. Field errors from local
    /// validation travel in `data` so callers can point at the bad flag.
    pub fn api_failure(command: &str, error: ApiError) -> Self {
        let data = error.field_errors().and_then(|errors| serde_json::to_value(errors).ok());
        let interface = error.into_interface();
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class(&interface).to_string()),
            message: interface.to_string(),
            correlation_id: Some(interface.correlation_id().to_string()),
            data,
        };
        Self { exit_code: EXIT_FAILURE, output: serialize_payload(payload) }
    }

    fn ok(command: &str, message: String, data: Option<Value>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message,
            correlation_id: None,
            data,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }
}

fn error_class(error: &InterfaceError) -> &'static str {
    match error {
        InterfaceError::BadRequest { .. } => "bad_request",
        InterfaceError::NotFound { .. } => "not_found",
        InterfaceError::Unauthorized { .. } => "unauthorized",
        InterfaceError::ServiceUnavailable { .. } => "service_unavailable",
        InterfaceError::Internal { .. } => "internal",
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// Loaded config plus an API client and a single-threaded runtime to drive it.
pub struct Session {
    pub config: AppConfig,
    pub api: Arc<HttpApiClient>,
    runtime: Runtime,
}

impl Session {
    pub fn open(command: &str, options: LoadOptions) -> Result<Self, CommandResult> {
        let config = AppConfig::load(options)
            .map_err(|error| CommandResult::config_failure(command, error))?;
        let api = HttpApiClient::from_config(&config.api)
            .map_err(|error| CommandResult::config_failure(command, error))?;
        let runtime = build_runtime().map_err(|error| {
            CommandResult::failure(command, "runtime", format!("{error:#}"), EXIT_FAILURE)
        })?;
        Ok(Self { config, api: Arc::new(api), runtime })
    }

    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

pub(crate) fn build_runtime() -> anyhow::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to initialize async runtime")
}

pub(crate) fn with_session(
    command: &str,
    options: LoadOptions,
    body: impl FnOnce(&Session) -> CommandResult,
) -> CommandResult {
    match Session::open(command, options) {
        Ok(session) => body(&session),
        Err(result) => result,
    }
}

pub(crate) fn respond<T: Serialize>(
    command: &str,
    result: Result<T, ApiError>,
    message: impl FnOnce(&T) -> String,
) -> CommandResult {
    match result {
        Ok(data) => CommandResult::success_with(command, message(&data), &data),
        Err(error) => CommandResult::api_failure(command, error),
    }
}
