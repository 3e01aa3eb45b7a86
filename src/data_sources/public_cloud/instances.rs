use serde_json::Value;

use crate::data_sources::DataSource;
use crate::error::ProviderError;
use crate::models::InstancesDataSourceModel;
use crate::resources::ProviderData;
use crate::schema::{Attribute, Block, NestedBlock, Schema};

/// `leaseweb_public_cloud_instances`
#[derive(Debug, Clone, Copy, Default)]
pub struct InstancesDataSource;

fn value_unit(value: Attribute) -> NestedBlock {
    NestedBlock::single(
        Block::new()
            .with_attribute("value", value)
            .with_attribute("unit", Attribute::computed_string()),
    )
    .computed()
}

fn resources_block() -> NestedBlock {
    NestedBlock::single(
        Block::new()
            .with_description("Available resources")
            .with_block("cpu", value_unit(Attribute::computed_int64()))
            .with_block("memory", value_unit(Attribute::computed_float64()))
            .with_block("public_network_speed", value_unit(Attribute::computed_int64()))
            .with_block("private_network_speed", value_unit(Attribute::computed_int64())),
    )
    .computed()
}

fn image_block() -> NestedBlock {
    NestedBlock::single(
        Block::new()
            .with_attribute("id", Attribute::computed_string())
            .with_attribute("name", Attribute::computed_string())
            .with_attribute("version", Attribute::computed_string())
            .with_attribute("family", Attribute::computed_string())
            .with_attribute("flavour", Attribute::computed_string())
            .with_attribute("architecture", Attribute::computed_string())
            .with_attribute("custom", Attribute::computed_bool())
            .with_attribute("state", Attribute::computed_string())
            .with_attribute("region", Attribute::computed_string())
            .with_attribute("market_apps", Attribute::computed_string_list())
            .with_attribute("storage_types", Attribute::computed_string_list()),
    )
    .computed()
}

fn ips_block() -> NestedBlock {
    NestedBlock::list(
        Block::new()
            .with_attribute("ip", Attribute::computed_string())
            .with_attribute("prefix_length", Attribute::computed_string())
            .with_attribute("version", Attribute::computed_int64())
            .with_attribute("null_routed", Attribute::computed_bool())
            .with_attribute("main_ip", Attribute::computed_bool())
            .with_attribute("network_type", Attribute::computed_string())
            .with_attribute("reverse_lookup", Attribute::computed_string())
            .with_block(
                "ddos",
                NestedBlock::single(
                    Block::new()
                        .with_attribute("detection_profile", Attribute::computed_string())
                        .with_attribute("protection_type", Attribute::computed_string()),
                )
                .computed(),
            ),
    )
    .computed()
}

fn contract_block() -> NestedBlock {
    NestedBlock::single(
        Block::new()
            .with_attribute(
                "billing_frequency",
                Attribute::computed_int64().with_description("The billing frequency (in months)"),
            )
            .with_attribute(
                "term",
                Attribute::computed_int64().with_description("Contract term (in months)"),
            )
            .with_attribute("type", Attribute::computed_string())
            .with_attribute("ends_at", Attribute::computed_string())
            .with_attribute("renewals_at", Attribute::computed_string())
            .with_attribute("created_at", Attribute::computed_string())
            .with_attribute("state", Attribute::computed_string()),
    )
    .computed()
}

fn private_network_block() -> NestedBlock {
    NestedBlock::single(
        Block::new()
            .with_attribute("id", Attribute::computed_string())
            .with_attribute("status", Attribute::computed_string())
            .with_attribute("subnet", Attribute::computed_string()),
    )
    .computed()
}

fn load_balancer_configuration_block() -> NestedBlock {
    let health_check = NestedBlock::single(
        Block::new()
            .with_attribute("method", Attribute::computed_string())
            .with_attribute("uri", Attribute::computed_string())
            .with_attribute("host", Attribute::computed_string())
            .with_attribute("port", Attribute::computed_int64()),
    )
    .computed();

    let sticky_session = NestedBlock::single(
        Block::new()
            .with_attribute("enabled", Attribute::computed_bool())
            .with_attribute("max_life_time", Attribute::computed_int64()),
    )
    .computed();

    NestedBlock::single(
        Block::new()
            .with_attribute("balance", Attribute::computed_string())
            .with_block("health_check", health_check)
            .with_block("sticky_session", sticky_session)
            .with_attribute("x_forwarded_for", Attribute::computed_bool())
            .with_attribute("idle_timeout", Attribute::computed_int64())
            .with_attribute("target_port", Attribute::computed_int64()),
    )
    .computed()
}

fn load_balancer_block() -> NestedBlock {
    NestedBlock::single(
        Block::new()
            .with_attribute("id", Attribute::computed_string())
            .with_attribute("type", Attribute::computed_string())
            .with_block("resources", resources_block())
            .with_attribute("region", Attribute::computed_string())
            .with_attribute("reference", Attribute::computed_string())
            .with_attribute("state", Attribute::computed_string())
            .with_block("contract", contract_block())
            .with_attribute("started_at", Attribute::computed_string())
            .with_block("ips", ips_block())
            .with_block(
                "load_balancer_configuration",
                load_balancer_configuration_block(),
            )
            .with_block("private_network", private_network_block()),
    )
    .computed()
}

fn auto_scaling_group_block() -> NestedBlock {
    NestedBlock::single(
        Block::new()
            .with_attribute("id", Attribute::computed_string())
            .with_attribute("type", Attribute::computed_string())
            .with_attribute("state", Attribute::computed_string())
            .with_attribute("desired_amount", Attribute::computed_int64())
            .with_attribute("region", Attribute::computed_string())
            .with_attribute("reference", Attribute::computed_string())
            .with_attribute("created_at", Attribute::computed_string())
            .with_attribute("updated_at", Attribute::computed_string())
            .with_attribute("starts_at", Attribute::computed_string())
            .with_attribute("ends_at", Attribute::computed_string())
            .with_attribute("minimum_amount", Attribute::computed_int64())
            .with_attribute("maximum_amount", Attribute::computed_int64())
            .with_attribute("cpu_threshold", Attribute::computed_int64())
            .with_attribute("warmup_time", Attribute::computed_int64())
            .with_attribute("cooldown_time", Attribute::computed_int64())
            .with_block("load_balancer", load_balancer_block()),
    )
    .computed()
}

#[async_trait::async_trait]
impl DataSource for InstancesDataSource {
    fn type_name(&self) -> &'static str {
        "leaseweb_public_cloud_instances"
    }

    fn schema(&self) -> Schema {
        let instance = Block::new()
            .with_attribute(
                "id",
                Attribute::computed_string().with_description("The instance unique identifier"),
            )
            .with_attribute("region", Attribute::computed_string())
            .with_attribute(
                "reference",
                Attribute::computed_string()
                    .with_description("The identifying name set to the instance"),
            )
            .with_block("resources", resources_block())
            .with_block("image", image_block())
            .with_attribute(
                "state",
                Attribute::computed_string().with_description("The instance's current state"),
            )
            .with_attribute("product_type", Attribute::computed_string())
            .with_attribute("has_public_ipv4", Attribute::computed_bool())
            .with_attribute("has_private_network", Attribute::computed_bool())
            .with_attribute("type", Attribute::computed_string())
            .with_attribute(
                "root_disk_size",
                Attribute::computed_int64().with_description("The root disk's size in GB"),
            )
            .with_attribute("root_disk_storage_type", Attribute::computed_string())
            .with_block("ips", ips_block())
            .with_attribute(
                "started_at",
                Attribute::computed_string().with_description("Date and time when the instance was started for the first time, right after launching it"),
            )
            .with_block("contract", contract_block())
            .with_block(
                "iso",
                NestedBlock::single(
                    Block::new()
                        .with_attribute("id", Attribute::computed_string())
                        .with_attribute("name", Attribute::computed_string()),
                )
                .computed(),
            )
            .with_attribute(
                "market_app_id",
                Attribute::computed_string()
                    .with_description("Market App ID that must be installed into the instance"),
            )
            .with_block("private_network", private_network_block())
            .with_block("auto_scaling_group", auto_scaling_group_block());

        Schema::v0()
            .with_description("Lists every public cloud instance of the account.")
            .with_block("instances", NestedBlock::list(instance).computed())
    }

    async fn read(&self, data: &ProviderData, _config: Value) -> Result<Value, ProviderError> {
        let instances = data
            .public_cloud
            .get_all_instances()
            .await
            .map_err(|err| ProviderError::from(err).context("Unable to read instances"))?;

        tracing::debug!(count = instances.len(), "Read instances");
        Ok(serde_json::to_value(InstancesDataSourceModel::new(
            &instances,
        ))?)
    }
}
