//! Services orchestrating repository calls.

mod public_cloud;

pub use public_cloud::{InstanceProperty, PollSettings, PublicCloudService};

use std::time::Duration;

use thiserror::Error;

use crate::domain::DomainError;
use crate::error::ProviderError;
use crate::repositories::RepositoryError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("timed out waiting for property to change after {}", format_duration(*.0))]
    WaitTimeout(Duration),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Repository(err) if err.is_not_found())
    }
}

impl From<ServiceError> for ProviderError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Repository(err) => err.into(),
            ServiceError::Domain(err) => err.into(),
            timeout @ ServiceError::WaitTimeout(_) => {
                ProviderError::DeadlineExceeded(timeout.to_string())
            },
            ServiceError::Task(err) => ProviderError::Sdk(err.to_string()),
        }
    }
}

fn format_duration(duration: Duration) -> String {
    let seconds = duration.as_secs();
    match seconds {
        60 => "1 minute".to_string(),
        s if s > 0 && s % 60 == 0 => format!("{} minutes", s / 60),
        1 => "1 second".to_string(),
        s => format!("{s} seconds"),
    }
}
