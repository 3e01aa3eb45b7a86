use serde_json::Value;

use super::contract_block;
use crate::data_sources::DataSource;
use crate::error::ProviderError;
use crate::models::LoadBalancersDataSourceModel;
use crate::resources::ProviderData;
use crate::schema::{Attribute, Block, NestedBlock, Schema};

/// `leaseweb_public_cloud_load_balancers`
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadBalancersDataSource;

#[async_trait::async_trait]
impl DataSource for LoadBalancersDataSource {
    fn type_name(&self) -> &'static str {
        "leaseweb_public_cloud_load_balancers"
    }

    fn schema(&self) -> Schema {
        let load_balancer = Block::new()
            .with_attribute(
                "id",
                Attribute::computed_string().with_description("The load balancer unique identifier"),
            )
            .with_block(
                "ips",
                NestedBlock::list(Block::new().with_attribute("ip", Attribute::computed_string()))
                    .computed(),
            )
            .with_attribute("reference", Attribute::computed_string())
            .with_block("contract", contract_block())
            .with_attribute("state", Attribute::computed_string())
            .with_attribute("region", Attribute::computed_string())
            .with_attribute("type", Attribute::computed_string());

        Schema::v0()
            .with_description("Lists every public cloud load balancer of the account.")
            .with_block("load_balancers", NestedBlock::list(load_balancer).computed())
    }

    async fn read(&self, data: &ProviderData, _config: Value) -> Result<Value, ProviderError> {
        let load_balancers = data
            .public_cloud
            .get_load_balancers()
            .await
            .map_err(|err| ProviderError::from(err).context("Unable to read load balancers"))?;

        tracing::debug!(count = load_balancers.len(), "Read load balancers");
        Ok(serde_json::to_value(LoadBalancersDataSourceModel::new(
            &load_balancers,
        ))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema() {
        let schema = LoadBalancersDataSource.schema();
        let load_balancers = &schema.block.blocks["load_balancers"];
        assert!(load_balancers.computed);
        assert!(load_balancers.block.blocks["ips"].computed);
        assert!(load_balancers.block.attributes["type"].flags.computed);
        assert!(load_balancers.block.blocks["contract"].block.attributes["term"]
            .flags
            .computed);
    }
}
