use serde_json::Value;

use super::markdown_list;
use crate::domain::{Credential, CredentialType, Uuid};
use crate::error::ProviderError;
use crate::models::CredentialResourceModel;
use crate::resources::{context, decode, encode, ProviderData, Resource};
use crate::schema::{Attribute, Schema, Validator};

const NAME: &str = "public_cloud_credential";

/// `leaseweb_public_cloud_credential`
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialResource;

impl CredentialResource {
    fn summary(action: &str, model: &CredentialResourceModel) -> String {
        format!(
            "{} {} for username: {:?} and instance_id: {:?}",
            action, NAME, model.username, model.instance_id
        )
    }

    fn parse(
        model: &CredentialResourceModel,
    ) -> Result<(Uuid, Credential<CredentialType>), ProviderError> {
        Ok((
            Uuid::new(&model.instance_id)?,
            Credential {
                credential_type: model.credential_type.parse()?,
                username: model.username.clone(),
                password: model.password.clone(),
            },
        ))
    }
}

#[async_trait::async_trait]
impl Resource for CredentialResource {
    fn type_name(&self) -> &'static str {
        "leaseweb_public_cloud_credential"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_description("Manages credentials stored on a Leaseweb public cloud instance.")
            .with_attribute(
                "instance_id",
                Attribute::required_string()
                    .with_description("The ID of the instance.")
                    .requires_replace(),
            )
            .with_attribute(
                "type",
                Attribute::required_string()
                    .with_description(format!(
                        "The type of the credential. Valid options are {}",
                        markdown_list(CredentialType::values())
                    ))
                    .with_validator(Validator::one_of(CredentialType::values()))
                    .requires_replace(),
            )
            .with_attribute(
                "username",
                Attribute::required_string()
                    .with_description("Can contain only alphanumeric values and characters `@`, `.`, `-` and `_`")
                    .with_validator(Validator::StringLengthAtLeast(1))
                    .requires_replace(),
            )
            .with_attribute(
                "password",
                Attribute::required_string()
                    .with_description("The password you'd like to store")
                    .with_validator(Validator::StringLengthAtLeast(1))
                    .sensitive(),
            )
    }

    async fn create(
        &self,
        data: &ProviderData,
        planned_state: Value,
    ) -> Result<Value, ProviderError> {
        let plan: CredentialResourceModel = decode(planned_state)?;
        let summary = Self::summary("Creating", &plan);

        let (instance_id, credential) = Self::parse(&plan).map_err(context(summary.as_str()))?;
        let created = data
            .public_cloud
            .create_credential(instance_id, &credential)
            .await
            .map_err(context(summary.as_str()))?;

        encode(&CredentialResourceModel::new(plan.instance_id, &created))
    }

    async fn read(&self, data: &ProviderData, current_state: Value) -> Result<Value, ProviderError> {
        let state: CredentialResourceModel = decode(current_state)?;
        let summary = Self::summary("Reading", &state);

        let (instance_id, credential) = Self::parse(&state).map_err(context(summary.as_str()))?;
        let current = data
            .public_cloud
            .get_credential(instance_id, credential.credential_type, &credential.username)
            .await
            .map_err(context(summary.as_str()))?;

        encode(&CredentialResourceModel::new(state.instance_id, &current))
    }

    async fn update(
        &self,
        data: &ProviderData,
        _prior_state: Value,
        planned_state: Value,
    ) -> Result<Value, ProviderError> {
        let plan: CredentialResourceModel = decode(planned_state)?;
        let summary = Self::summary("Updating", &plan);

        let (instance_id, credential) = Self::parse(&plan).map_err(context(summary.as_str()))?;
        let updated = data
            .public_cloud
            .update_credential(instance_id, &credential)
            .await
            .map_err(context(summary.as_str()))?;

        encode(&CredentialResourceModel::new(plan.instance_id, &updated))
    }

    async fn delete(&self, data: &ProviderData, current_state: Value) -> Result<(), ProviderError> {
        let state: CredentialResourceModel = decode(current_state)?;
        let summary = Self::summary("Deleting", &state);

        let (instance_id, credential) = Self::parse(&state).map_err(context(summary.as_str()))?;
        data.public_cloud
            .delete_credential(instance_id, credential.credential_type, &credential.username)
            .await
            .map_err(context(summary.as_str()))
    }
}
