//! Provider configuration.
//!
//! Values come from the `provider "leaseweb"` block and fall back to the
//! `LEASEWEB_*` environment variables.

use serde::Deserialize;

use crate::error::ProviderError;
use crate::schema::{Attribute, Diagnostic, Schema, Validator};

/// Default API host.
pub const DEFAULT_HOST: &str = "api.leaseweb.com";

/// Default URL scheme.
pub const DEFAULT_SCHEME: &str = "https";

/// Environment variable overriding the API host.
pub const HOST_ENV: &str = "LEASEWEB_HOST";

/// Environment variable overriding the URL scheme.
pub const SCHEME_ENV: &str = "LEASEWEB_SCHEME";

/// Environment variable carrying the API token.
pub const TOKEN_ENV: &str = "LEASEWEB_TOKEN";

const SCHEMES: [&str; 2] = ["http", "https"];

/// The provider block as Terraform sends it.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    host: Option<String>,
    #[serde(default)]
    scheme: Option<String>,
    #[serde(default)]
    token: Option<String>,
}

/// Resolved provider configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// API host, without scheme.
    pub host: String,
    /// `http` or `https`.
    pub scheme: String,
    /// API token sent as `X-LSW-Auth`.
    pub token: String,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("host", &self.host)
            .field("scheme", &self.scheme)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl ProviderConfig {
    /// Schema of the provider block.
    pub fn schema() -> Schema {
        Schema::v0()
            .with_description("The Leaseweb provider manages Leaseweb public cloud and dedicated server resources.")
            .with_attribute(
                "host",
                Attribute::optional_string().with_description(format!(
                    "The API host, defaults to `{DEFAULT_HOST}`. Can also be set with `{HOST_ENV}`."
                )),
            )
            .with_attribute(
                "scheme",
                Attribute::optional_string()
                    .with_description(format!(
                        "The URL scheme, defaults to `{DEFAULT_SCHEME}`. Can also be set with `{SCHEME_ENV}`."
                    ))
                    .with_validator(Validator::one_of(&SCHEMES)),
            )
            .with_attribute(
                "token",
                Attribute::optional_string()
                    .sensitive()
                    .with_description(format!(
                        "The API token. Can also be set with `{TOKEN_ENV}`."
                    )),
            )
    }

    /// Resolve the configuration from the provider block and the process environment.
    pub fn resolve(config: &serde_json::Value) -> Result<Self, ProviderError> {
        Self::resolve_with(config, |name| std::env::var(name).ok())
    }

    /// Resolve the configuration with an injectable environment lookup.
    pub fn resolve_with<F>(config: &serde_json::Value, env: F) -> Result<Self, ProviderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw: RawConfig = if config.is_null() {
            RawConfig::default()
        } else {
            serde_json::from_value(config.clone())?
        };

        let pick = |value: Option<String>, var: &str| {
            value
                .filter(|v| !v.is_empty())
                .or_else(|| env(var).filter(|v| !v.is_empty()))
        };

        let host = pick(raw.host, HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let scheme = pick(raw.scheme, SCHEME_ENV).unwrap_or_else(|| DEFAULT_SCHEME.to_string());
        let token = pick(raw.token, TOKEN_ENV);

        let mut diagnostics = Vec::new();

        if !SCHEMES.contains(&scheme.as_str()) {
            diagnostics.push(
                Diagnostic::error("Invalid Leaseweb API Scheme")
                    .with_detail(format!(
                        "The scheme must be one of {SCHEMES:?}, got: {scheme:?}. Set the scheme value in the configuration or use the {SCHEME_ENV} environment variable."
                    ))
                    .with_attribute("scheme"),
            );
        }

        if token.is_none() {
            diagnostics.push(
                Diagnostic::error("Missing Leaseweb API Token")
                    .with_detail(format!(
                        "The provider cannot create the Leaseweb API client as there is a missing or empty value for the Leaseweb API token. Set the token value in the configuration or use the {TOKEN_ENV} environment variable. If either is already set, ensure the value is not empty."
                    ))
                    .with_attribute("token"),
            );
        }

        match token {
            Some(token) if diagnostics.is_empty() => Ok(Self {
                host,
                scheme,
                token,
            }),
            _ => Err(ProviderError::Diagnostics(diagnostics)),
        }
    }

    /// `scheme://host`, without a trailing slash.
    pub fn base_url(&self) -> String {
        format!(
            "{}://{}",
            self.scheme,
            self.host.trim_end_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::validation::validate;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let config = ProviderConfig::resolve_with(&json!({"token": "secret"}), no_env).unwrap();
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.scheme, DEFAULT_SCHEME);
        assert_eq!(config.base_url(), "https://api.leaseweb.com");
    }

    #[test]
    fn test_env_fallback() {
        let env = |name: &str| match name {
            HOST_ENV => Some("localhost:8080".to_string()),
            SCHEME_ENV => Some("http".to_string()),
            TOKEN_ENV => Some("env-token".to_string()),
            _ => None,
        };
        let config = ProviderConfig::resolve_with(&json!({}), env).unwrap();
        assert_eq!(config.base_url(), "http://localhost:8080");
        assert_eq!(config.token, "env-token");
    }

    #[test]
    fn test_config_wins_over_env() {
        let env = |name: &str| (name == TOKEN_ENV).then(|| "env-token".to_string());
        let config =
            ProviderConfig::resolve_with(&json!({"token": "config-token"}), env).unwrap();
        assert_eq!(config.token, "config-token");
    }

    #[test]
    fn test_missing_token() {
        let err = ProviderConfig::resolve_with(&json!({"token": ""}), no_env).unwrap_err();
        let diagnostics = err.into_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].summary, "Missing Leaseweb API Token");
        assert_eq!(diagnostics[0].attribute.as_deref(), Some("token"));
    }

    #[test]
    fn test_invalid_scheme() {
        let err = ProviderConfig::resolve_with(&json!({"token": "t", "scheme": "ftp"}), no_env)
            .unwrap_err();
        let diagnostics = err.into_diagnostics();
        assert_eq!(diagnostics[0].attribute.as_deref(), Some("scheme"));
    }

    #[test]
    fn test_null_config_uses_env() {
        let env = |name: &str| (name == TOKEN_ENV).then(|| "env-token".to_string());
        let config = ProviderConfig::resolve_with(&serde_json::Value::Null, env).unwrap();
        assert_eq!(config.token, "env-token");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ProviderConfig::resolve_with(&json!({"token": "super-secret"}), no_env)
            .unwrap();
        let debug = format!("{:?}", config);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_schema_validates_scheme() {
        let schema = ProviderConfig::schema();
        assert!(validate(&schema, &json!({"scheme": "https"})).is_empty());
        assert!(!validate(&schema, &json!({"scheme": "gopher"})).is_empty());
        assert!(schema.block.attributes["token"].flags.sensitive);
    }
}
