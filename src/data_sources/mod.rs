//! Read-only data sources.

use std::sync::Arc;

use serde_json::Value;

use crate::error::ProviderError;
use crate::resources::ProviderData;
use crate::schema::Schema;

pub mod public_cloud;

/// A Terraform data source.
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    /// Full type name, e.g. `leaseweb_public_cloud_instances`.
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    /// Fetch the data. The returned object becomes the data source state.
    async fn read(&self, data: &ProviderData, config: Value) -> Result<Value, ProviderError>;
}

/// Every data source the provider serves.
pub fn all() -> Vec<Arc<dyn DataSource>> {
    vec![
        Arc::new(public_cloud::InstancesDataSource),
        Arc::new(public_cloud::LoadBalancersDataSource),
    ]
}
