//! Error types for the Leaseweb provider.
//!
//! Every operation the host calls returns [`ProviderError`]; the server turns
//! it into diagnostics with [`ProviderError::into_diagnostics`] so Terraform
//! always gets a response it can render.

use thiserror::Error;

use crate::domain::DomainError;
use crate::schema::Diagnostic;
use crate::sdk::ApiError;

/// Errors that can occur while serving provider operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The requested resource was not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A validation error occurred.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An internal error occurred.
    #[error("SDK error: {0}")]
    Sdk(String),

    /// A configuration error occurred.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The requested resource type is unknown.
    #[error("Unknown resource type: {0}")]
    UnknownResource(String),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A gRPC transport error occurred.
    #[error("Transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    /// The Leaseweb API rejected a request or could not be reached.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Operation timed out.
    #[error("Deadline exceeded: {0}")]
    DeadlineExceeded(String),

    /// Operation not implemented.
    #[error("Unimplemented: {0}")]
    Unimplemented(String),

    /// Diagnostics that were already built by the caller.
    #[error("{}", summarize(.0))]
    Diagnostics(Vec<Diagnostic>),

    /// An error wrapped with a human readable summary of what was attempted.
    #[error("{summary}: {source}")]
    Context {
        /// What the provider was doing, e.g. `Reading public_cloud_credential ...`.
        summary: String,
        /// The underlying failure.
        #[source]
        source: Box<ProviderError>,
    },
}

fn summarize(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| d.summary.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ProviderError {
    /// Get the error message as a string.
    pub fn message(&self) -> String {
        match self {
            Self::NotFound(msg)
            | Self::Validation(msg)
            | Self::Sdk(msg)
            | Self::Configuration(msg)
            | Self::UnknownResource(msg)
            | Self::DeadlineExceeded(msg)
            | Self::Unimplemented(msg) => msg.clone(),
            Self::Serialization(err) => err.to_string(),
            Self::Transport(err) => err.to_string(),
            Self::Api(err) => err.to_string(),
            Self::Diagnostics(diagnostics) => summarize(diagnostics),
            Self::Context { source, .. } => source.message(),
        }
    }

    /// Wrap this error with a summary describing the failed operation.
    pub fn context(self, summary: impl Into<String>) -> Self {
        Self::Context {
            summary: summary.into(),
            source: Box::new(self),
        }
    }

    /// Whether this error means the remote object no longer exists.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Api(err) => err.status() == Some(404),
            Self::Context { source, .. } => source.is_not_found(),
            _ => false,
        }
    }

    /// Convert the error into diagnostics for the host.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        match self {
            Self::Diagnostics(diagnostics) => diagnostics,
            Self::Api(err) => api_error_diagnostics(&err),
            Self::Context { summary, source } => {
                let detail = source.message();
                // Only attribute-level diagnostics survive from the inner error.
                let mut diagnostics = vec![Diagnostic::error(summary).with_detail(detail)];
                diagnostics.extend(
                    source
                        .into_diagnostics()
                        .into_iter()
                        .filter(|d| d.attribute.is_some()),
                );
                diagnostics
            },
            Self::NotFound(msg) => vec![Diagnostic::error("Resource Not Found").with_detail(msg)],
            Self::Validation(msg) => vec![Diagnostic::error("Validation Error").with_detail(msg)],
            Self::Configuration(msg) => {
                vec![Diagnostic::error("Provider Configuration Error").with_detail(msg)]
            },
            Self::UnknownResource(msg) => {
                vec![Diagnostic::error("Unknown Resource Type").with_detail(msg)]
            },
            Self::DeadlineExceeded(msg) => {
                vec![Diagnostic::error("Operation Timed Out").with_detail(msg)]
            },
            Self::Unimplemented(msg) => {
                vec![Diagnostic::error("Operation Not Supported").with_detail(msg)]
            },
            other => vec![Diagnostic::error("Unexpected Provider Error").with_detail(other.message())],
        }
    }
}

/// Values that fail domain parsing are user input problems.
impl From<DomainError> for ProviderError {
    fn from(err: DomainError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Build diagnostics for a failed API call.
///
/// Field errors reported by the API are attached to the matching attribute.
fn api_error_diagnostics(err: &ApiError) -> Vec<Diagnostic> {
    let mut diagnostics = vec![Diagnostic::error("Unexpected API Error").with_detail(err.detail())];

    if let ApiError::Response {
        body: Some(body), ..
    } = err
    {
        for (field, messages) in &body.error_details {
            diagnostics.push(
                Diagnostic::error("Invalid Attribute Value")
                    .with_detail(messages.join(", "))
                    .with_attribute(attribute_path(field)),
            );
        }
    }

    diagnostics
}

/// Map an API field path like `contract.billingFrequency` to `contract.billing_frequency`.
pub(crate) fn attribute_path(field: &str) -> String {
    field
        .split('.')
        .map(to_snake_case)
        .collect::<Vec<_>>()
        .join(".")
}

fn to_snake_case(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len() + 4);
    for (i, c) in segment.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
