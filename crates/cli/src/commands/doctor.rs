use serde::Serialize;
use storefront_api::{HttpApiClient, PageRequest, StorefrontApi};
use storefront_core::config::{AppConfig, LoadOptions};

use super::{build_runtime, CommandResult, EXIT_CONFIG, EXIT_FAILURE};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

impl DoctorCheck {
    fn pass(name: &'static str, details: impl Into<String>) -> Self {
        Self { name, status: CheckStatus::Pass, details: details.into() }
    }

    fn fail(name: &'static str, details: impl Into<String>) -> Self {
        Self { name, status: CheckStatus::Fail, details: details.into() }
    }

    fn skipped(name: &'static str, details: impl Into<String>) -> Self {
        Self { name, status: CheckStatus::Skipped, details: details.into() }
    }
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(options: LoadOptions, json_output: bool) -> CommandResult {
    let report = build_report(options);
    let exit_code = exit_code(&report);

    let output = if json_output {
        serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        })
    } else {
        render_human(&report)
    };

    CommandResult { exit_code, output }
}

fn build_report(options: LoadOptions) -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(options) {
        Ok(config) => {
            checks.push(DoctorCheck::pass(
                "config_validation",
                "configuration loaded and validated",
            ));
            match HttpApiClient::from_config(&config.api) {
                Ok(client) => {
                    checks.push(DoctorCheck::pass(
                        "api_client",
                        format!("client ready for `{}`", client.base_url()),
                    ));
                    checks.extend(check_api(&client, config.api.token.is_some()));
                }
                Err(error) => {
                    checks.push(DoctorCheck::fail("api_client", error.to_string()));
                    checks.push(DoctorCheck::skipped(
                        "api_reachability",
                        "skipped because the api client could not be built",
                    ));
                    checks.push(DoctorCheck::skipped(
                        "api_auth",
                        "skipped because the api client could not be built",
                    ));
                }
            }
        }
        Err(error) => {
            checks.push(DoctorCheck::fail("config_validation", error.to_string()));
            for name in ["api_client", "api_reachability", "api_auth"] {
                checks.push(DoctorCheck::skipped(
                    name,
                    "skipped because configuration did not load",
                ));
            }
        }
    }

    let any_failed = checks.iter().any(|check| check.status == CheckStatus::Fail);
    let overall_status = if any_failed { CheckStatus::Fail } else { CheckStatus::Pass };
    let summary = if any_failed {
        "doctor: one or more readiness checks failed".to_string()
    } else {
        "doctor: all readiness checks passed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_api(client: &HttpApiClient, has_token: bool) -> Vec<DoctorCheck> {
    let runtime = match build_runtime() {
        Ok(runtime) => runtime,
        Err(error) => {
            return vec![
                DoctorCheck::fail("api_reachability", format!("{error:#}")),
                DoctorCheck::skipped("api_auth", "skipped because the runtime did not start"),
            ];
        }
    };

    let reachability = runtime.block_on(client.list_products(PageRequest::new(1, 1)));
    let reachability = match reachability {
        Ok(page) => DoctorCheck::pass(
            "api_reachability",
            format!("catalog answered with {} product(s) in total", page.pagination.total),
        ),
        Err(error) => {
            let correlation = error.correlation_id().unwrap_or("none").to_string();
            return vec![
                DoctorCheck::fail(
                    "api_reachability",
                    format!("{error} (correlation_id: {correlation})"),
                ),
                DoctorCheck::skipped("api_auth", "skipped because the api is unreachable"),
            ];
        }
    };

    if !has_token {
        return vec![
            reachability,
            DoctorCheck::skipped(
                "api_auth",
                "no api token configured; account commands will be rejected",
            ),
        ];
    }

    let auth = match runtime.block_on(client.get_cart()) {
        Ok(_) => DoctorCheck::pass("api_auth", "api token accepted"),
        Err(error) if matches!(error.status(), Some(401 | 403)) => {
            DoctorCheck::fail("api_auth", "api token was rejected")
        }
        Err(error) => DoctorCheck::fail("api_auth", error.to_string()),
    };
    vec![reachability, auth]
}

fn exit_code(report: &DoctorReport) -> u8 {
    let config_failed = report
        .checks
        .iter()
        .any(|check| check.name == "config_validation" && check.status == CheckStatus::Fail);
    if config_failed {
        EXIT_CONFIG
    } else if report.overall_status == CheckStatus::Fail {
        EXIT_FAILURE
    } else {
        0
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
