use serde_json::Value;
use tracing::debug;

use super::{contract_block, contract_values, markdown_list, validate_contract};
use crate::domain::{
    BillingFrequency, ContractTerm, ContractType, Instance, OptionalCreateInstanceValues,
    OptionalUpdateInstanceValues, RootDiskSize, State, StorageType, Uuid, INSTANCE_TYPES, REGIONS,
};
use crate::error::ProviderError;
use crate::models::InstanceResourceModel;
use crate::resources::{context, decode, encode, non_empty, parse_id, ProviderData, Resource};
use crate::schema::{Attribute, Block, Diagnostic, NestedBlock, PlanModifier, Schema, Validator};
use crate::services::InstanceProperty;
use crate::types::PlanResult;

const REPLACE_WARNING: &str = "**WARNING!** Changing this value once running will cause this instance to be destroyed and a new one to be created.";

/// `leaseweb_public_cloud_instance`
#[derive(Debug, Clone, Copy, Default)]
pub struct InstanceResource;

impl InstanceResource {
    fn image_block() -> NestedBlock {
        NestedBlock::required(
            Block::new()
                .with_attribute(
                    "id",
                    Attribute::required_string()
                        .with_description(format!(
                            "Can be either an Operating System or a UUID in case of a Custom Image ID. {}",
                            REPLACE_WARNING
                        ))
                        .requires_replace(),
                )
                .with_attribute("name", Attribute::computed_string())
                .with_attribute(
                    "custom",
                    Attribute::computed_bool().with_description("Standard or Custom image"),
                )
                .with_attribute("state", Attribute::computed_string())
                .with_attribute("market_apps", Attribute::computed_string_list())
                .with_attribute(
                    "storage_types",
                    Attribute::computed_string_list()
                        .with_description("The supported storage types for the instance type"),
                )
                .with_attribute("flavour", Attribute::computed_string())
                .with_attribute("region", Attribute::computed_string()),
        )
    }

    fn ips_block() -> NestedBlock {
        NestedBlock::list(
            Block::new()
                .with_attribute("ip", Attribute::computed_string())
                .with_attribute("reverse_lookup", Attribute::computed_string()),
        )
        .computed()
    }

    fn iso_block() -> NestedBlock {
        NestedBlock::single(
            Block::new()
                .with_attribute(
                    "id",
                    Attribute::computed_string().with_description("The ISO ID."),
                )
                .with_attribute("name", Attribute::computed_string()),
        )
        .computed()
    }

    /// Launch values taken from the plan; enum values fail closed.
    fn instance_from_plan(plan: &InstanceResourceModel) -> Result<Instance, ProviderError> {
        let (contract_type, term, billing_frequency) = contract_values(&plan.contract)?;
        let root_disk_storage_type: StorageType = plan.root_disk_storage_type.parse()?;
        let root_disk_size = plan.root_disk_size.map(RootDiskSize::new).transpose()?;

        Ok(Instance::new_create(
            plan.region.clone(),
            &plan.instance_type,
            root_disk_storage_type,
            plan.image.id.clone(),
            contract_type,
            term,
            billing_frequency,
            OptionalCreateInstanceValues {
                market_app_id: plan.market_app_id.clone(),
                reference: plan.reference.clone(),
                root_disk_size,
            },
            INSTANCE_TYPES,
        )?)
    }

    /// Only values that are set in the plan are sent.
    fn update_values(
        plan: &InstanceResourceModel,
    ) -> Result<OptionalUpdateInstanceValues, ProviderError> {
        let contract = &plan.contract;

        Ok(OptionalUpdateInstanceValues {
            instance_type: non_empty(&plan.instance_type).map(str::to_string),
            reference: plan.reference.clone(),
            contract_type: non_empty(&contract.contract_type)
                .map(str::parse::<ContractType>)
                .transpose()?,
            term: (contract.term != 0)
                .then(|| ContractTerm::try_from(contract.term))
                .transpose()?,
            billing_frequency: (contract.billing_frequency != 0)
                .then(|| BillingFrequency::try_from(contract.billing_frequency))
                .transpose()?,
            root_disk_size: plan.root_disk_size.map(RootDiskSize::new).transpose()?,
        })
    }

    async fn check_instance_type(
        data: &ProviderData,
        prior_state: Option<&Value>,
        planned_state: &Value,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<(), ProviderError> {
        let Some(prior) = prior_state else {
            return Ok(());
        };
        let (Some(id), Some(current_type)) = (
            prior.get("id").and_then(Value::as_str),
            prior.get("type").and_then(Value::as_str),
        ) else {
            return Ok(());
        };
        let Some(planned_type) = planned_state.get("type").and_then(Value::as_str) else {
            return Ok(());
        };
        if planned_type == current_type {
            return Ok(());
        }

        let id = Uuid::new(id)?;
        let allowed = data
            .public_cloud
            .get_available_instance_types_for_update(id)
            .await
            .map_err(context("validateInstanceType"))?;

        if !allowed.iter().any(|t| t == planned_type) {
            diagnostics.push(
                Diagnostic::error("Invalid Instance Type")
                    .with_detail(format!("Allowed types are [{}]", allowed.join(" ")))
                    .with_attribute("type"),
            );
        }
        Ok(())
    }

    async fn check_region(
        data: &ProviderData,
        planned_state: &Value,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<(), ProviderError> {
        let Some(region) = planned_state
            .get("region")
            .and_then(Value::as_str)
            .and_then(non_empty)
        else {
            return Ok(());
        };

        let regions = data
            .public_cloud
            .get_regions()
            .await
            .map_err(context("validateRegion"))?;

        if !regions.iter().any(|r| r == region) {
            diagnostics.push(
                Diagnostic::error("Invalid Region")
                    .with_detail(format!("Allowed regions are [{}]", regions.join(" ")))
                    .with_attribute("region"),
            );
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl Resource for InstanceResource {
    fn type_name(&self) -> &'static str {
        "leaseweb_public_cloud_instance"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_description("Manages a Leaseweb public cloud instance.")
            .with_attribute(
                "id",
                Attribute::computed_string()
                    .with_description("The instance unique identifier")
                    .use_state_for_unknown(),
            )
            .with_attribute(
                "region",
                Attribute::required_string()
                    .with_description(format!(
                        "{} Valid options are {}",
                        REPLACE_WARNING,
                        markdown_list(REGIONS)
                    ))
                    .with_validator(Validator::one_of(REGIONS))
                    .requires_replace(),
            )
            .with_attribute(
                "reference",
                Attribute::optional_computed_string()
                    .with_description("The identifying name set to the instance"),
            )
            .with_block("image", Self::image_block())
            .with_block("iso", Self::iso_block())
            .with_attribute(
                "state",
                Attribute::computed_string().with_description("The instance's current state"),
            )
            .with_attribute(
                "type",
                Attribute::required_string()
                    .with_description(format!(
                        "{} Valid options are {}",
                        REPLACE_WARNING,
                        markdown_list(INSTANCE_TYPES)
                    ))
                    .with_validator(Validator::also_requires(&["region"]))
                    .with_validator(Validator::one_of(INSTANCE_TYPES)),
            )
            .with_attribute(
                "root_disk_size",
                Attribute::optional_computed_int64()
                    .with_description("The root disk's size in GB. Must be at least 5 GB for Linux and FreeBSD instances and 50 GB for Windows instances. The maximum size is 1000 GB")
                    .with_validator(Validator::between(RootDiskSize::MIN, RootDiskSize::MAX)),
            )
            .with_attribute(
                "root_disk_storage_type",
                Attribute::required_string()
                    .with_description(format!(
                        "The root disk's storage type. Can be *LOCAL* or *CENTRAL*. {}",
                        REPLACE_WARNING
                    ))
                    .with_validator(Validator::one_of(StorageType::values()))
                    .requires_replace(),
            )
            .with_block("ips", Self::ips_block())
            .with_block("contract", contract_block())
            .with_attribute(
                "market_app_id",
                Attribute::optional_computed_string()
                    .with_description(format!(
                        "Market App ID that must be installed into the instance. {}",
                        REPLACE_WARNING
                    ))
                    .with_plan_modifier(PlanModifier::RequiresReplaceIfConfigured),
            )
            .with_attribute(
                "has_private_network",
                Attribute::optional_computed_bool().with_description(
                    "Indicates whether the instance is connected to a private network",
                ),
            )
    }

    fn validate_config(&self, config: &Value) -> Vec<Diagnostic> {
        validate_contract(config)
    }

    async fn modify_plan(
        &self,
        data: &ProviderData,
        prior_state: Option<&Value>,
        plan: PlanResult,
    ) -> Result<PlanResult, ProviderError> {
        let mut diagnostics = Vec::new();
        Self::check_instance_type(data, prior_state, &plan.planned_state, &mut diagnostics).await?;
        Self::check_region(data, &plan.planned_state, &mut diagnostics).await?;

        if diagnostics.is_empty() {
            Ok(plan)
        } else {
            Err(ProviderError::Diagnostics(diagnostics))
        }
    }

    async fn create(
        &self,
        data: &ProviderData,
        planned_state: Value,
    ) -> Result<Value, ProviderError> {
        let plan: InstanceResourceModel = decode(planned_state)?;
        let summary = "Error launching public cloud instance";

        let instance = Self::instance_from_plan(&plan).map_err(context(summary))?;
        let created = data
            .public_cloud
            .create_instance(&instance)
            .await
            .map_err(context(summary))?;
        debug!(id = %created.id, "Launched public cloud instance");

        let instance = if plan.has_private_network == Some(true) {
            data.public_cloud
                .wait_for_instance(created.id, InstanceProperty::State(State::Running))
                .await
                .map_err(context(summary))?;
            data.public_cloud
                .toggle_private_network(created.id, true)
                .await
                .map_err(context(summary))?
        } else {
            data.public_cloud
                .get_instance(created.id)
                .await
                .map_err(context(format!(
                    "Error reading public cloud instance {}",
                    created.id
                )))?
        };

        encode(&InstanceResourceModel::from(&instance))
    }

    async fn read(&self, data: &ProviderData, current_state: Value) -> Result<Value, ProviderError> {
        let state: InstanceResourceModel = decode(current_state)?;
        let id = parse_id(state.id.as_deref())?;

        let instance = data
            .public_cloud
            .get_instance(id)
            .await
            .map_err(context(format!("Error reading public cloud instance {}", id)))?;

        encode(&InstanceResourceModel::from(&instance))
    }

    async fn update(
        &self,
        data: &ProviderData,
        prior_state: Value,
        planned_state: Value,
    ) -> Result<Value, ProviderError> {
        let prior: InstanceResourceModel = decode(prior_state)?;
        let plan: InstanceResourceModel = decode(planned_state)?;
        let id = parse_id(plan.id.as_deref().or(prior.id.as_deref()))?;
        let summary = format!("Error updating public cloud instance {}", id);

        let values = Self::update_values(&plan).map_err(context(summary.as_str()))?;
        let allowed = if plan.instance_type != prior.instance_type {
            data.public_cloud
                .get_available_instance_types_for_update(id)
                .await
                .map_err(context(summary.as_str()))?
        } else {
            Vec::new()
        };
        let update = Instance::new_update(id, values, &allowed, &prior.instance_type)
            .map_err(context(summary.as_str()))?;

        let mut instance = data
            .public_cloud
            .update_instance(&update)
            .await
            .map_err(context(summary.as_str()))?;

        if let Some(wanted) = plan.has_private_network {
            if instance.has_private_network != wanted {
                instance = data
                    .public_cloud
                    .toggle_private_network(id, wanted)
                    .await
                    .map_err(context(summary.as_str()))?;
            }
        }

        encode(&InstanceResourceModel::from(&instance))
    }

    async fn delete(&self, data: &ProviderData, current_state: Value) -> Result<(), ProviderError> {
        let state: InstanceResourceModel = decode(current_state)?;
        let id = parse_id(state.id.as_deref())?;

        data.public_cloud
            .delete_instance(id)
            .await
            .map_err(context(format!("Error terminating public cloud instance {}", id)))
    }

    async fn import(&self, data: &ProviderData, id: &str) -> Result<Value, ProviderError> {
        let id = Uuid::new(id)?;
        let instance = data
            .public_cloud
            .get_instance(id)
            .await
            .map_err(context(format!("Error importing public cloud instance {}", id)))?;

        encode(&InstanceResourceModel::from(&instance))
    }
}
