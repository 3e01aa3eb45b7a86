//! The Leaseweb provider.
//!
//! [`LeasewebProvider`] implements [`ProviderService`] on top of the resource
//! and data source registries. Generic work (schema validation, plan diffing,
//! dropping resources that disappeared) happens here; everything that talks
//! to the API is delegated by type name.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::config::ProviderConfig;
use crate::data_sources::{self, DataSource};
use crate::error::ProviderError;
use crate::plan::plan_resource;
use crate::resources::{self, ProviderData, Resource};
use crate::schema::{has_errors, Diagnostic, ProviderSchema};
use crate::sdk::LeasewebClient;
use crate::server::ProviderService;
use crate::services::PollSettings;
use crate::types::{ImportedResource, PlanResult};
use crate::validation::validate;

/// Provider type name; every resource is prefixed with it.
pub const PROVIDER_NAME: &str = "leaseweb";

pub struct LeasewebProvider {
    version: String,
    resources: BTreeMap<&'static str, Arc<dyn Resource>>,
    data_sources: BTreeMap<&'static str, Arc<dyn DataSource>>,
    poll: PollSettings,
    data: RwLock<Option<Arc<ProviderData>>>,
}

impl std::fmt::Debug for LeasewebProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeasewebProvider")
            .field("version", &self.version)
            .field("resources", &self.resources.keys().collect::<Vec<_>>())
            .field("data_sources", &self.data_sources.keys().collect::<Vec<_>>())
            .field("poll", &self.poll)
            .finish_non_exhaustive()
    }
}

impl LeasewebProvider {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            resources: resources::all()
                .into_iter()
                .map(|r| (r.type_name(), r))
                .collect(),
            data_sources: data_sources::all()
                .into_iter()
                .map(|d| (d.type_name(), d))
                .collect(),
            poll: PollSettings::default(),
            data: RwLock::new(None),
        }
    }

    /// Override how instance state changes are polled.
    pub fn with_poll_settings(mut self, poll: PollSettings) -> Self {
        self.poll = poll;
        self
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    fn resource(&self, resource_type: &str) -> Result<&Arc<dyn Resource>, ProviderError> {
        self.resources
            .get(resource_type)
            .ok_or_else(|| ProviderError::UnknownResource(resource_type.to_string()))
    }

    fn data_source(&self, data_source_type: &str) -> Result<&Arc<dyn DataSource>, ProviderError> {
        self.data_sources
            .get(data_source_type)
            .ok_or_else(|| ProviderError::UnknownResource(data_source_type.to_string()))
    }

    async fn data(&self) -> Result<Arc<ProviderData>, ProviderError> {
        self.data.read().await.clone().ok_or_else(|| {
            ProviderError::Configuration(
                "The provider has not been configured. Configure must be called before any resource operation.".to_string(),
            )
        })
    }
}

#[async_trait::async_trait]
impl ProviderService for LeasewebProvider {
    fn schema(&self) -> ProviderSchema {
        let schema = ProviderSchema::new().with_provider_config(ProviderConfig::schema());

        let schema = self
            .resources
            .iter()
            .fold(schema, |schema, (name, resource)| {
                schema.with_resource(*name, resource.schema())
            });

        self.data_sources
            .iter()
            .fold(schema, |schema, (name, data_source)| {
                schema.with_data_source(*name, data_source.schema())
            })
    }

    // =========================================================================
    // Provider Lifecycle
    // =========================================================================

    async fn validate_provider_config(&self, config: Value) -> Result<Vec<Diagnostic>, ProviderError> {
        Ok(validate(&ProviderConfig::schema(), &config))
    }

    async fn configure(&self, config: Value) -> Result<Vec<Diagnostic>, ProviderError> {
        let diagnostics = validate(&ProviderConfig::schema(), &config);
        if has_errors(&diagnostics) {
            return Ok(diagnostics);
        }

        let config = match ProviderConfig::resolve(&config) {
            Ok(config) => config,
            Err(ProviderError::Diagnostics(diagnostics)) => return Ok(diagnostics),
            Err(err) => return Err(err),
        };

        let client = LeasewebClient::with_base_url(&config.token, config.base_url())
            .map_err(|err| ProviderError::from(err).context("Unable to Create Leaseweb API Client"))?;

        info!(
            version = %self.version,
            base_url = %client.base_url(),
            "Configured Leaseweb client"
        );

        *self.data.write().await = Some(Arc::new(ProviderData::new(&client, self.poll)));
        Ok(diagnostics)
    }

    async fn stop(&self) -> Result<(), ProviderError> {
        debug!("Releasing Leaseweb client");
        self.data.write().await.take();
        Ok(())
    }

    // =========================================================================
    // Resource Operations
    // =========================================================================

    async fn validate_resource_config(
        &self,
        resource_type: &str,
        config: Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        let resource = self.resource(resource_type)?;

        let mut diagnostics = validate(&resource.schema(), &config);
        diagnostics.extend(resource.validate_config(&config));
        Ok(diagnostics)
    }

    async fn plan(
        &self,
        resource_type: &str,
        prior_state: Option<Value>,
        _proposed_state: Value,
        config: Value,
    ) -> Result<PlanResult, ProviderError> {
        let resource = self.resource(resource_type)?;

        let plan = plan_resource(&resource.schema(), prior_state.as_ref(), &config);
        if config.is_null() {
            return Ok(plan);
        }

        let data = self.data().await?;
        resource
            .modify_plan(&data, prior_state.as_ref(), plan)
            .await
    }

    async fn create(&self, resource_type: &str, planned_state: Value) -> Result<Value, ProviderError> {
        let resource = self.resource(resource_type)?;
        let data = self.data().await?;
        resource.create(&data, planned_state).await
    }

    async fn read(&self, resource_type: &str, current_state: Value) -> Result<Value, ProviderError> {
        let resource = self.resource(resource_type)?;
        let data = self.data().await?;

        match resource.read(&data, current_state).await {
            Err(err) if err.is_not_found() => {
                warn!(resource_type, error = %err, "Resource no longer exists, removing it from state");
                Ok(Value::Null)
            },
            other => other,
        }
    }

    async fn update(
        &self,
        resource_type: &str,
        prior_state: Value,
        planned_state: Value,
    ) -> Result<Value, ProviderError> {
        let resource = self.resource(resource_type)?;
        let data = self.data().await?;
        resource.update(&data, prior_state, planned_state).await
    }

    async fn delete(&self, resource_type: &str, current_state: Value) -> Result<(), ProviderError> {
        let resource = self.resource(resource_type)?;
        let data = self.data().await?;
        resource.delete(&data, current_state).await
    }

    async fn import_resource(
        &self,
        resource_type: &str,
        id: &str,
    ) -> Result<Vec<ImportedResource>, ProviderError> {
        let resource = self.resource(resource_type)?;
        let data = self.data().await?;

        let state = resource.import(&data, id).await?;
        Ok(vec![ImportedResource::new(resource_type, state)])
    }

    // =========================================================================
    // Data Source Operations
    // =========================================================================

    async fn validate_data_source_config(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        let data_source = self.data_source(data_source_type)?;
        Ok(validate(&data_source.schema(), &config))
    }

    async fn read_data_source(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<Value, ProviderError> {
        let data_source = self.data_source(data_source_type)?;
        let data = self.data().await?;
        data_source.read(&data, config).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_schema_registers_everything() {
        let provider = LeasewebProvider::new("test");
        let schema = provider.schema();

        assert_eq!(provider.version(), "test");
        assert_eq!(schema.resources.len(), 6);
        assert_eq!(schema.data_sources.len(), 2);
        assert!(schema.resources.contains_key("leaseweb_public_cloud_instance"));
        assert!(schema
            .data_sources
            .contains_key("leaseweb_public_cloud_load_balancers"));
        assert!(schema
            .resources
            .keys()
            .chain(schema.data_sources.keys())
            .all(|name| name.starts_with(PROVIDER_NAME)));
    }

    #[tokio::test]
    async fn test_unknown_resource_type() {
        let provider = LeasewebProvider::new("test");
        let err = provider
            .validate_resource_config("leaseweb_nope", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::UnknownResource(name) if name == "leaseweb_nope"));
    }

    #[tokio::test]
    async fn test_operations_require_configure() {
        let provider = LeasewebProvider::new("test");
        let err = provider
            .read(
                "leaseweb_public_cloud_instance",
                json!({"id": "ace712e9-a166-47f1-9065-4af0f7e7fce1"}),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_configure_without_token() {
        std::env::remove_var(crate::config::TOKEN_ENV);
        let provider = LeasewebProvider::new("test");

        let diagnostics = provider.configure(json!({})).await.unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].summary, "Missing Leaseweb API Token");
        assert!(provider.data().await.is_err());
    }

    #[tokio::test]
    async fn test_configure_and_stop() {
        let provider = LeasewebProvider::new("test");

        let diagnostics = provider
            .configure(json!({"token": "tralala", "host": "localhost:8080", "scheme": "http"}))
            .await
            .unwrap();
        assert!(diagnostics.is_empty());
        assert!(provider.data().await.is_ok());

        provider.stop().await.unwrap();
        assert!(provider.data().await.is_err());
    }

    #[tokio::test]
    async fn test_destroy_plan_skips_configure() {
        let provider = LeasewebProvider::new("test");
        let plan = provider
            .plan(
                "leaseweb_public_cloud_target_group",
                Some(json!({"id": "ace712e9-a166-47f1-9065-4af0f7e7fce1", "name": "web"})),
                Value::Null,
                Value::Null,
            )
            .await
            .unwrap();
        assert!(plan.planned_state.is_null());
    }
}
