use serde_json::Value;

use super::{contract_block, contract_values, markdown_list, validate_contract};
use crate::domain::{LoadBalancer, Uuid, INSTANCE_TYPES, REGIONS};
use crate::error::ProviderError;
use crate::models::LoadBalancerResourceModel;
use crate::resources::{context, decode, encode, non_empty, parse_id, ProviderData, Resource};
use crate::schema::{Attribute, Diagnostic, Schema, Validator};

/// `leaseweb_public_cloud_load_balancer`
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadBalancerResource;

impl LoadBalancerResource {
    fn load_balancer_from_plan(
        plan: &LoadBalancerResourceModel,
    ) -> Result<LoadBalancer, ProviderError> {
        let (contract_type, term, billing_frequency) = contract_values(&plan.contract)?;
        if !REGIONS.contains(&plan.region.as_str()) {
            return Err(ProviderError::Validation(format!(
                "invalid region {:?}, expected one of [{}]",
                plan.region,
                REGIONS.join(", ")
            )));
        }

        Ok(LoadBalancer::new_create(
            plan.region.clone(),
            &plan.load_balancer_type,
            contract_type,
            term,
            billing_frequency,
            plan.reference.clone(),
            INSTANCE_TYPES,
        )?)
    }
}

#[async_trait::async_trait]
impl Resource for LoadBalancerResource {
    fn type_name(&self) -> &'static str {
        "leaseweb_public_cloud_load_balancer"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_description("Manages a Leaseweb public cloud load balancer.")
            .with_attribute(
                "id",
                Attribute::computed_string()
                    .with_description("The load balancer unique identifier")
                    .use_state_for_unknown(),
            )
            .with_attribute(
                "reference",
                Attribute::optional_computed_string()
                    .with_description("An identifying name you can refer to the load balancer"),
            )
            .with_block("contract", contract_block())
            .with_attribute(
                "region",
                Attribute::required_string()
                    .with_description(format!(
                        "**WARNING!** Changing this value once running will cause this load balancer to be destroyed and a new one to be created. Valid options are {}",
                        markdown_list(REGIONS)
                    ))
                    .with_validator(Validator::one_of(REGIONS))
                    .requires_replace(),
            )
            .with_attribute(
                "type",
                Attribute::required_string()
                    .with_description(format!(
                        "The load balancer type. Valid options are {}",
                        markdown_list(INSTANCE_TYPES)
                    ))
                    .with_validator(Validator::also_requires(&["region"]))
                    .with_validator(Validator::one_of(INSTANCE_TYPES)),
            )
    }

    fn validate_config(&self, config: &Value) -> Vec<Diagnostic> {
        validate_contract(config)
    }

    async fn create(
        &self,
        data: &ProviderData,
        planned_state: Value,
    ) -> Result<Value, ProviderError> {
        let plan: LoadBalancerResourceModel = decode(planned_state)?;
        let summary = "Error launching public cloud load balancer";

        let load_balancer = Self::load_balancer_from_plan(&plan).map_err(context(summary))?;
        let created = data
            .public_cloud
            .create_load_balancer(&load_balancer)
            .await
            .map_err(context(summary))?;

        encode(&LoadBalancerResourceModel::from(&created))
    }

    async fn read(&self, data: &ProviderData, current_state: Value) -> Result<Value, ProviderError> {
        let state: LoadBalancerResourceModel = decode(current_state)?;
        let id = parse_id(state.id.as_deref())?;

        let load_balancer = data
            .public_cloud
            .get_load_balancer(id)
            .await
            .map_err(context(format!(
                "Error reading public cloud load balancer {}",
                id
            )))?;

        encode(&LoadBalancerResourceModel::from(&load_balancer))
    }

    async fn update(
        &self,
        data: &ProviderData,
        prior_state: Value,
        planned_state: Value,
    ) -> Result<Value, ProviderError> {
        let prior: LoadBalancerResourceModel = decode(prior_state)?;
        let plan: LoadBalancerResourceModel = decode(planned_state)?;
        let id = parse_id(plan.id.as_deref().or(prior.id.as_deref()))?;
        let summary = format!("Error updating public cloud load balancer {}", id);

        let load_balancer_type = non_empty(&plan.load_balancer_type).map(str::to_string);
        if let Some(load_balancer_type) = &load_balancer_type {
            if !INSTANCE_TYPES.contains(&load_balancer_type.as_str()) {
                return Err(ProviderError::Validation(format!(
                    "load balancer type {:?} is not allowed",
                    load_balancer_type
                ))
                .context(summary));
            }
        }

        let load_balancer = data
            .public_cloud
            .update_load_balancer(id, load_balancer_type, plan.reference.clone())
            .await
            .map_err(context(summary))?;

        encode(&LoadBalancerResourceModel::from(&load_balancer))
    }

    async fn delete(&self, data: &ProviderData, current_state: Value) -> Result<(), ProviderError> {
        let state: LoadBalancerResourceModel = decode(current_state)?;
        let id = parse_id(state.id.as_deref())?;

        data.public_cloud
            .delete_load_balancer(id)
            .await
            .map_err(context(format!(
                "Error terminating public cloud load balancer {}",
                id
            )))
    }

    async fn import(&self, data: &ProviderData, id: &str) -> Result<Value, ProviderError> {
        let id = Uuid::new(id)?;
        let load_balancer = data
            .public_cloud
            .get_load_balancer(id)
            .await
            .map_err(context(format!(
                "Error importing public cloud load balancer {}",
                id
            )))?;

        encode(&LoadBalancerResourceModel::from(&load_balancer))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{BillingFrequency, ContractType};
    use crate::models::ContractModel;
    use crate::validation::validate;

    fn plan() -> LoadBalancerResourceModel {
        LoadBalancerResourceModel {
            region: "eu-west-3".to_string(),
            load_balancer_type: "lsw.m3.large".to_string(),
            reference: Some("my loadbalancer".to_string()),
            contract: ContractModel {
                billing_frequency: 1,
                term: 0,
                contract_type: "HOURLY".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_schema() {
        let schema = LoadBalancerResource.schema();
        assert!(schema.block.attributes["region"].forces_replacement());
        assert!(!schema.block.attributes["type"].forces_replacement());

        let diagnostics = validate(
            &schema,
            &json!({
                "type": "lsw.m3.large",
                "contract": {"billing_frequency": 1, "term": 0, "type": "HOURLY"}
            }),
        );
        let details: Vec<_> = diagnostics
            .iter()
            .filter_map(|d| d.detail.as_deref())
            .collect();
        assert!(details.contains(&"Attribute \"region\" must be specified when \"type\" is specified"));
    }

    #[test]
    fn test_load_balancer_from_plan() {
        let load_balancer = LoadBalancerResource::load_balancer_from_plan(&plan()).unwrap();
        assert_eq!(load_balancer.region, "eu-west-3");
        assert_eq!(load_balancer.reference.as_deref(), Some("my loadbalancer"));
        assert_eq!(load_balancer.contract.contract_type, ContractType::Hourly);
        assert_eq!(load_balancer.contract.billing_frequency, BillingFrequency::One);
    }

    #[test]
    fn test_load_balancer_from_plan_rejects_region() {
        let mut plan = plan();
        plan.region = "mars-1".to_string();
        assert!(matches!(
            LoadBalancerResource::load_balancer_from_plan(&plan),
            Err(ProviderError::Validation(_))
        ));
    }

    #[test]
    fn test_load_balancer_from_plan_rejects_contract() {
        let mut plan = plan();
        plan.contract.billing_frequency = 2;
        assert!(LoadBalancerResource::load_balancer_from_plan(&plan).is_err());
    }
}
