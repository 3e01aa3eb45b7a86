//! Managed resources.
//!
//! Each resource owns its schema and the CRUD calls behind it. The provider
//! runs the generic schema validation and plan computation and hands the
//! result to the resource for anything that needs the Leaseweb API.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::domain::Uuid;
use crate::error::ProviderError;
use crate::ports::DedicatedServerRepository;
use crate::repositories::{DedicatedServerSdkRepository, PublicCloudSdkRepository};
use crate::schema::{Diagnostic, Schema};
use crate::sdk::LeasewebClient;
use crate::services::{PollSettings, PublicCloudService};
use crate::types::PlanResult;

pub mod dedicated_server;
pub mod public_cloud;

/// Everything a resource needs once the provider is configured.
#[derive(Clone)]
pub struct ProviderData {
    pub public_cloud: PublicCloudService,
    pub dedicated_server: Arc<dyn DedicatedServerRepository>,
}

impl std::fmt::Debug for ProviderData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderData")
            .field("public_cloud", &self.public_cloud)
            .finish_non_exhaustive()
    }
}

impl ProviderData {
    pub fn new(client: &LeasewebClient, poll: PollSettings) -> Self {
        let public_cloud = PublicCloudService::new(Arc::new(PublicCloudSdkRepository::new(
            client.public_cloud(),
        )))
        .with_poll_settings(poll);

        Self {
            public_cloud,
            dedicated_server: Arc::new(DedicatedServerSdkRepository::new(
                client.dedicated_server(),
            )),
        }
    }
}

/// A Terraform managed resource.
///
/// States are passed around as JSON objects keyed by attribute name. A
/// `null` value is an unset or not yet known attribute.
#[async_trait::async_trait]
pub trait Resource: Send + Sync {
    /// Full type name, e.g. `leaseweb_public_cloud_instance`.
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    /// Checks spanning several attributes. Runs after schema validation.
    fn validate_config(&self, config: &Value) -> Vec<Diagnostic> {
        let _ = config;
        Vec::new()
    }

    /// Refine the generic plan. Not called when the resource is destroyed.
    async fn modify_plan(
        &self,
        data: &ProviderData,
        prior_state: Option<&Value>,
        plan: PlanResult,
    ) -> Result<PlanResult, ProviderError> {
        let _ = (data, prior_state);
        Ok(plan)
    }

    async fn create(&self, data: &ProviderData, planned_state: Value)
        -> Result<Value, ProviderError>;

    /// Refresh the state. A not-found error makes the provider drop the resource.
    async fn read(&self, data: &ProviderData, current_state: Value)
        -> Result<Value, ProviderError>;

    async fn update(
        &self,
        data: &ProviderData,
        prior_state: Value,
        planned_state: Value,
    ) -> Result<Value, ProviderError>;

    async fn delete(&self, data: &ProviderData, current_state: Value)
        -> Result<(), ProviderError>;

    /// Build the state of an existing object from its id.
    async fn import(&self, data: &ProviderData, id: &str) -> Result<Value, ProviderError> {
        let _ = (data, id);
        Err(ProviderError::Unimplemented(format!(
            "Import not supported for resource type: {}",
            self.type_name()
        )))
    }
}

/// Every resource the provider serves.
pub fn all() -> Vec<Arc<dyn Resource>> {
    vec![
        Arc::new(public_cloud::InstanceResource),
        Arc::new(public_cloud::LoadBalancerResource),
        Arc::new(public_cloud::TargetGroupResource),
        Arc::new(public_cloud::CredentialResource),
        Arc::new(dedicated_server::CredentialResource),
        Arc::new(dedicated_server::NotificationSettingBandwidthResource),
    ]
}

// =============================================================================
// Helpers
// =============================================================================

pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ProviderError> {
    Ok(serde_json::from_value(value)?)
}

pub(crate) fn encode<T: Serialize>(model: &T) -> Result<Value, ProviderError> {
    Ok(serde_json::to_value(model)?)
}

/// Parse the `id` attribute of a state.
pub(crate) fn parse_id(id: Option<&str>) -> Result<Uuid, ProviderError> {
    let id = id.ok_or_else(|| ProviderError::Validation("id is not set".to_string()))?;
    Ok(Uuid::new(id)?)
}

/// `map_err` adapter that wraps any error with a summary.
pub(crate) fn context<E>(summary: impl Into<String>) -> impl FnOnce(E) -> ProviderError
where
    E: Into<ProviderError>,
{
    let summary = summary.into();
    move |err| err.into().context(summary)
}

/// Empty strings in a plan mean "not set".
pub(crate) fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_type_names_are_unique() {
        let resources = all();
        let mut names: Vec<_> = resources.iter().map(|r| r.type_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), resources.len());
        assert!(names.iter().all(|n| n.starts_with("leaseweb_")));
    }

    #[test]
    fn test_parse_id() {
        assert!(parse_id(Some("ace712e9-a166-47f1-9065-4af0f7e7fce1")).is_ok());
        assert!(matches!(parse_id(None), Err(ProviderError::Validation(_))));
        assert!(matches!(
            parse_id(Some("tralala")),
            Err(ProviderError::Validation(_))
        ));
    }

    #[test]
    fn test_context_wraps_error() {
        let err = context("Reading thing")(ProviderError::NotFound("gone".to_string()));
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Reading thing: Resource not found: gone");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(""), None);
        assert_eq!(non_empty("x"), Some("x"));
    }
}
