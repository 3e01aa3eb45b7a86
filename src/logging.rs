//! Logging and tracing setup for the provider.
//!
//! All logs go to **stderr**; stdout carries the plugin handshake and must
//! stay clean.
//!
//! # Environment Variables
//!
//! The first variable that is set wins:
//!
//! - `TF_LOG_PROVIDER_LEASEWEB`: Terraform log level for this provider only
//! - `TF_LOG_PROVIDER`: Terraform log level for all providers
//! - `TF_LOG`: Terraform's global log level (`TRACE`, `DEBUG`, `INFO`, `WARN`,
//!   `ERROR`, `JSON`, `OFF`)
//! - `RUST_LOG`: a regular `tracing` filter, e.g. `terraform_provider_leaseweb=debug`
//!
//! Without any of them the level is `info`.
//!
//! ```bash
//! TF_LOG_PROVIDER_LEASEWEB=DEBUG terraform apply
//! RUST_LOG=terraform_provider_leaseweb::sdk=trace terraform plan
//! ```

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Terraform's log-level variables, most specific first.
const TERRAFORM_LOG_VARS: [&str; 3] = ["TF_LOG_PROVIDER_LEASEWEB", "TF_LOG_PROVIDER", "TF_LOG"];

/// Map a Terraform log level to a `tracing` filter directive.
///
/// Returns `None` for values Terraform itself would ignore.
fn terraform_level(value: &str) -> Option<&'static str> {
    match value.trim().to_ascii_uppercase().as_str() {
        "TRACE" | "JSON" => Some("trace"),
        "DEBUG" => Some("debug"),
        "INFO" => Some("info"),
        "WARN" => Some("warn"),
        "ERROR" => Some("error"),
        "OFF" => Some("off"),
        _ => None,
    }
}

/// Resolve the filter directive from an environment lookup.
///
/// Takes the lookup as a closure so the precedence rules can be tested
/// without touching the process environment.
fn resolve_directive<F>(lookup: F, default_level: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    for var in TERRAFORM_LOG_VARS {
        if let Some(level) = lookup(var).as_deref().and_then(terraform_level) {
            return level.to_string();
        }
    }

    match lookup(EnvFilter::DEFAULT_ENV) {
        Some(directive) if !directive.trim().is_empty() => directive,
        _ => default_level.to_string(),
    }
}

fn build_filter(default_level: &str) -> EnvFilter {
    let directive = resolve_directive(|name| std::env::var(name).ok(), default_level);
    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn subscriber(
    filter: EnvFilter,
) -> impl tracing::Subscriber + Send + Sync + for<'a> tracing_subscriber::registry::LookupSpan<'a> {
    tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false),
    )
}

/// Initialize the default logging subscriber.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_logging() {
    init_logging_with_default("info");
}

/// Initialize logging with a custom default level.
///
/// The default only applies when none of the log variables are set.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_logging_with_default(default_level: &str) {
    subscriber(build_filter(default_level)).init();
}

/// Try to initialize logging, returning false if already initialized.
pub fn try_init_logging() -> bool {
    subscriber(build_filter("info")).try_init().is_ok()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_level() {
        assert_eq!(resolve_directive(lookup(&[]), "info"), "info");
        assert_eq!(resolve_directive(lookup(&[]), "warn"), "warn");
    }

    #[test]
    fn test_provider_specific_level_wins() {
        let env = lookup(&[
            ("TF_LOG_PROVIDER_LEASEWEB", "DEBUG"),
            ("TF_LOG_PROVIDER", "ERROR"),
            ("TF_LOG", "TRACE"),
            ("RUST_LOG", "warn"),
        ]);
        assert_eq!(resolve_directive(env, "info"), "debug");
    }

    #[test]
    fn test_terraform_levels() {
        assert_eq!(resolve_directive(lookup(&[("TF_LOG", "JSON")]), "info"), "trace");
        assert_eq!(resolve_directive(lookup(&[("TF_LOG", "off")]), "info"), "off");
        assert_eq!(
            resolve_directive(lookup(&[("TF_LOG_PROVIDER", "warn")]), "info"),
            "warn"
        );
    }

    #[test]
    fn test_unknown_terraform_level_falls_through() {
        let env = lookup(&[("TF_LOG", "LOUD"), ("RUST_LOG", "terraform_provider_leaseweb=debug")]);
        assert_eq!(
            resolve_directive(env, "info"),
            "terraform_provider_leaseweb=debug"
        );
    }

    #[test]
    fn test_env_filter_parsing() {
        assert!(EnvFilter::try_new("info").is_ok());
        assert!(EnvFilter::try_new("off").is_ok());
        assert!(EnvFilter::try_new("terraform_provider_leaseweb=debug").is_ok());
        assert!(EnvFilter::try_new("warn,terraform_provider_leaseweb::sdk=trace").is_ok());
    }
}
