//! SDK-backed implementations of the repository ports.

mod convert;
mod dedicated_server;
mod public_cloud;

pub use dedicated_server::DedicatedServerSdkRepository;
pub use public_cloud::PublicCloudSdkRepository;

use thiserror::Error;

use crate::domain::DomainError;
use crate::error::ProviderError;
use crate::sdk::ApiError;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A wire value could not be turned into a domain value.
    #[error("{context}: {source}")]
    Conversion {
        context: String,
        #[source]
        source: DomainError,
    },

    #[error(
        "required loadBalancer {load_balancer_id:?} linked to autoScalingGroup {auto_scaling_group_id:?} has not been passed"
    )]
    MissingLoadBalancer {
        load_balancer_id: String,
        auto_scaling_group_id: String,
    },
}

impl RepositoryError {
    pub(crate) fn conversion(converter: &str, source: DomainError) -> Self {
        Self::Conversion {
            context: converter.to_string(),
            source,
        }
    }

    /// Prefix a conversion error with the calling converter.
    pub(crate) fn context(self, converter: &str) -> Self {
        match self {
            Self::Conversion { context, source } => Self::Conversion {
                context: format!("{converter}: {context}"),
                source,
            },
            other => other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api(err) if err.status() == Some(404))
    }
}

impl From<RepositoryError> for ProviderError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Api(err) => ProviderError::Api(err),
            other => ProviderError::Sdk(other.to_string()),
        }
    }
}
