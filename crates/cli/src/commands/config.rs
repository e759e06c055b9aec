use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use storefront_core::config::{resolve_config_path, AppConfig, LoadOptions};
use toml::Value;

use super::CommandResult;

struct ConfigSources {
    path: Option<PathBuf>,
    doc: Option<Value>,
}

impl ConfigSources {
    fn detect(explicit_path: Option<&Path>) -> Self {
        let path = resolve_config_path(explicit_path);
        let doc = path.as_deref().and_then(load_config_file_doc);
        Self { path, doc }
    }

    fn source(&self, key_path: &str, env_keys: &[&str]) -> String {
        if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
            return format!("env ({env_key})");
        }

        if let Some(doc) = &self.doc {
            if contains_path(doc, key_path) {
                let file_path = self
                    .path
                    .as_ref()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "config file".to_string());
                return format!("file ({file_path})");
            }
        }

        "default".to_string()
    }
}

pub fn run(options: LoadOptions) -> CommandResult {
    let explicit_path = options.config_path.clone();
    let overrides = options.overrides.clone();
    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => return CommandResult::config_failure("config", error),
    };

    let sources = ConfigSources::detect(explicit_path.as_deref());
    let source = |key_path: &str, env_keys: &[&str], overridden: bool| {
        if overridden {
            "flag".to_string()
        } else {
            sources.source(key_path, env_keys)
        }
    };

    let mut lines =
        vec!["effective config (source precedence: flag > env > file > default):".to_string()];

    lines.push(render_line(
        "api.base_url",
        &config.api.base_url,
        source("api.base_url", &["STOREFRONT_API_BASE_URL"], overrides.api_base_url.is_some()),
    ));
    lines.push(render_line(
        "api.token",
        &redact_token(config.api.token.as_ref()),
        source("api.token", &["STOREFRONT_API_TOKEN"], overrides.api_token.is_some()),
    ));
    lines.push(render_line(
        "api.timeout_secs",
        &config.api.timeout_secs.to_string(),
        source("api.timeout_secs", &["STOREFRONT_API_TIMEOUT_SECS"], false),
    ));
    lines.push(render_line(
        "catalog.page_size",
        &config.catalog.page_size.to_string(),
        source(
            "catalog.page_size",
            &["STOREFRONT_CATALOG_PAGE_SIZE"],
            overrides.page_size.is_some(),
        ),
    ));
    lines.push(render_line(
        "catalog.customer_id",
        config.catalog.customer_id.as_deref().unwrap_or("<unset>"),
        source(
            "catalog.customer_id",
            &["STOREFRONT_CATALOG_CUSTOMER_ID"],
            overrides.customer_id.is_some(),
        ),
    ));
    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        source(
            "logging.level",
            &["STOREFRONT_LOGGING_LEVEL", "STOREFRONT_LOG_LEVEL"],
            overrides.log_level.is_some(),
        ),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format),
        source("logging.format", &["STOREFRONT_LOGGING_FORMAT", "STOREFRONT_LOG_FORMAT"], false),
    ));

    CommandResult { exit_code: 0, output: lines.join("\n") }
}

fn load_config_file_doc(path: &Path) -> Option<Value> {
    let raw = fs::read_to_string(path).ok()?;
    toml::from_str::<toml::Table>(&raw).ok().map(Value::Table)
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

fn redact_token(token: Option<&SecretString>) -> String {
    let Some(token) = token else {
        return "<unset>".to_string();
    };
    let trimmed = token.expose_secret().trim();
    if trimmed.is_empty() {
        return "<empty>".to_string();
    }

    if let Some((prefix, _)) = trimmed.split_once('_') {
        if prefix.len() <= 8 {
            return format!("{prefix}_***");
        }
    }

    "<redacted>".to_string()
}
