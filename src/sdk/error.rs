use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

/// Error body returned by the Leaseweb API on non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ErrorBody {
    pub correlation_id: String,
    pub error_code: String,
    pub error_message: String,
    /// Field errors keyed by the API field path, e.g. `contract.billingFrequency`.
    pub error_details: BTreeMap<String, Vec<String>>,
}

/// Leaseweb API errors.
///
/// SECURITY: never format request headers into these; they carry the API token.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level error (connection refused, TLS, timeout, bad JSON)
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The token cannot be sent as a header value
    #[error("invalid API token: {0}")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),

    /// The API answered with a non-success status
    #[error("{method} {url} returned HTTP {status}{}", message_suffix(.body))]
    Response {
        status: u16,
        method: String,
        url: String,
        body: Option<ErrorBody>,
    },
}

fn message_suffix(body: &Option<ErrorBody>) -> String {
    match body {
        Some(body) if !body.error_message.is_empty() => format!(": {}", body.error_message),
        _ => String::new(),
    }
}

impl ApiError {
    /// HTTP status of a failed response, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request(err) => err.status().map(|s| s.as_u16()),
            Self::InvalidToken(_) => None,
            Self::Response { status, .. } => Some(*status),
        }
    }

    /// Multi-line detail used in diagnostics.
    pub fn detail(&self) -> String {
        match self {
            Self::Request(err) => format!("An error occurred while calling the Leaseweb API: {err}"),
            Self::InvalidToken(_) => {
                "The API token contains characters that cannot be sent in an HTTP header.".to_string()
            },
            Self::Response {
                status,
                method,
                url,
                body,
            } => {
                let mut detail = format!("{method} {url} returned HTTP {status}");
                if let Some(body) = body {
                    if !body.error_message.is_empty() {
                        detail.push_str(&format!("\nerror: {}", body.error_message));
                    }
                    if !body.error_code.is_empty() {
                        detail.push_str(&format!("\nerror code: {}", body.error_code));
                    }
                    if !body.correlation_id.is_empty() {
                        detail.push_str(&format!("\ncorrelation id: {}", body.correlation_id));
                    }
                }
                detail
            },
        }
    }
}
