use serde_json::Value;

use super::markdown_list;
use crate::domain::{HttpMethod, Protocol, TargetGroup, TargetGroupHealthCheck, Uuid, REGIONS};
use crate::error::ProviderError;
use crate::models::{TargetGroupHealthCheckModel, TargetGroupResourceModel};
use crate::resources::{context, decode, encode, parse_id, ProviderData, Resource};
use crate::schema::{Attribute, Block, NestedBlock, PlanModifier, Schema, Validator};

const REPLACE_WARNING: &str = "**WARNING!** Changing this value once running will cause this target group to be destroyed and a new one to be created.";

/// `leaseweb_public_cloud_target_group`
#[derive(Debug, Clone, Copy, Default)]
pub struct TargetGroupResource;

impl TargetGroupResource {
    fn health_check_block() -> NestedBlock {
        NestedBlock::single(
            Block::new()
                .with_attribute(
                    "protocol",
                    Attribute::required_string()
                        .with_description(format!(
                            "Valid options are {}",
                            markdown_list(Protocol::values())
                        ))
                        .with_validator(Validator::one_of(Protocol::values())),
                )
                .with_attribute(
                    "method",
                    Attribute::optional_string()
                        .with_description(format!(
                            "Required if `protocol` is `HTTP` or `HTTPS`. Valid options are {}",
                            markdown_list(HttpMethod::values())
                        ))
                        .with_validator(Validator::one_of(HttpMethod::values())),
                )
                .with_attribute(
                    "uri",
                    Attribute::required_string()
                        .with_description("URI to check in the target instances"),
                )
                .with_attribute(
                    "host",
                    Attribute::optional_string().with_description("Host for the health check if any"),
                )
                .with_attribute(
                    "port",
                    Attribute::required_int64()
                        .with_description("Port number")
                        .with_validator(Validator::between(1, 65535)),
                ),
        )
        .with_plan_modifier(PlanModifier::RequiresReplaceIfRemoved)
    }

    fn health_check_from_model(
        model: &TargetGroupHealthCheckModel,
    ) -> Result<TargetGroupHealthCheck, ProviderError> {
        Ok(TargetGroupHealthCheck {
            protocol: model.protocol.parse()?,
            method: model
                .method
                .as_deref()
                .map(str::parse::<HttpMethod>)
                .transpose()?,
            uri: model.uri.clone(),
            host: model.host.clone(),
            port: model.port,
        })
    }

    fn target_group_from_plan(
        plan: &TargetGroupResourceModel,
        id: Uuid,
    ) -> Result<TargetGroup, ProviderError> {
        Ok(TargetGroup {
            id,
            name: plan.name.clone(),
            protocol: plan.protocol.parse()?,
            port: plan.port,
            region: plan.region.clone(),
            health_check: plan
                .health_check
                .as_ref()
                .map(Self::health_check_from_model)
                .transpose()?,
        })
    }
}

#[async_trait::async_trait]
impl Resource for TargetGroupResource {
    fn type_name(&self) -> &'static str {
        "leaseweb_public_cloud_target_group"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_description("Manages a Leaseweb public cloud target group.")
            .with_attribute(
                "id",
                Attribute::computed_string()
                    .with_description("The target group unique identifier")
                    .use_state_for_unknown(),
            )
            .with_attribute(
                "name",
                Attribute::required_string().with_description("The Name of the target group"),
            )
            .with_attribute(
                "protocol",
                Attribute::required_string()
                    .with_description(format!(
                        "Valid options are {}\n{}",
                        markdown_list(Protocol::values()),
                        REPLACE_WARNING
                    ))
                    .with_validator(Validator::one_of(Protocol::values()))
                    .with_plan_modifier(PlanModifier::RequiresReplaceIfConfigured),
            )
            .with_attribute(
                "port",
                Attribute::required_int64()
                    .with_description("The port of the target group")
                    .with_validator(Validator::between(1, 65535)),
            )
            .with_attribute(
                "region",
                Attribute::required_string()
                    .with_description(format!(
                        "Valid options are {}\n{}",
                        markdown_list(REGIONS),
                        REPLACE_WARNING
                    ))
                    .with_validator(Validator::one_of(REGIONS))
                    .with_plan_modifier(PlanModifier::RequiresReplaceIfConfigured),
            )
            .with_block("health_check", Self::health_check_block())
    }

    async fn create(
        &self,
        data: &ProviderData,
        planned_state: Value,
    ) -> Result<Value, ProviderError> {
        let plan: TargetGroupResourceModel = decode(planned_state)?;
        let summary = "Error creating public cloud target group";

        let target_group =
            Self::target_group_from_plan(&plan, Uuid::default()).map_err(context(summary))?;
        let created = data
            .public_cloud
            .create_target_group(&target_group)
            .await
            .map_err(context(summary))?;

        encode(&TargetGroupResourceModel::from(&created))
    }

    async fn read(&self, data: &ProviderData, current_state: Value) -> Result<Value, ProviderError> {
        let state: TargetGroupResourceModel = decode(current_state)?;
        let id = parse_id(state.id.as_deref())?;

        let target_group = data
            .public_cloud
            .get_target_group(id)
            .await
            .map_err(context(format!(
                "Error reading public cloud target group {}",
                id
            )))?;

        encode(&TargetGroupResourceModel::from(&target_group))
    }

    async fn update(
        &self,
        data: &ProviderData,
        prior_state: Value,
        planned_state: Value,
    ) -> Result<Value, ProviderError> {
        let prior: TargetGroupResourceModel = decode(prior_state)?;
        let plan: TargetGroupResourceModel = decode(planned_state)?;
        let id = parse_id(plan.id.as_deref().or(prior.id.as_deref()))?;
        let summary = format!("Error updating public cloud target group {}", id);

        let target_group =
            Self::target_group_from_plan(&plan, id).map_err(context(summary.as_str()))?;
        let updated = data
            .public_cloud
            .update_target_group(&target_group)
            .await
            .map_err(context(summary.as_str()))?;

        encode(&TargetGroupResourceModel::from(&updated))
    }

    async fn delete(&self, data: &ProviderData, current_state: Value) -> Result<(), ProviderError> {
        let state: TargetGroupResourceModel = decode(current_state)?;
        let id = parse_id(state.id.as_deref())?;

        data.public_cloud
            .delete_target_group(id)
            .await
            .map_err(context(format!(
                "Error deleting public cloud target group {}",
                id
            )))
    }

    async fn import(&self, data: &ProviderData, id: &str) -> Result<Value, ProviderError> {
        let id = Uuid::new(id)?;
        let target_group = data
            .public_cloud
            .get_target_group(id)
            .await
            .map_err(context(format!(
                "Error importing public cloud target group {}",
                id
            )))?;

        encode(&TargetGroupResourceModel::from(&target_group))
    }
}
