use serde_json::Value;

use crate::domain::{Credential, DedicatedServerCredentialType};
use crate::error::ProviderError;
use crate::models::DedicatedServerCredentialResourceModel;
use crate::resources::{decode, encode, ProviderData, Resource};
use crate::schema::{Attribute, Schema, Validator};

/// `leaseweb_dedicated_server_credential`
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialResource;

fn credential_from_model(
    model: &DedicatedServerCredentialResourceModel,
) -> Result<Credential<DedicatedServerCredentialType>, ProviderError> {
    Ok(Credential {
        credential_type: model.credential_type.parse()?,
        username: model.username.clone(),
        password: model.password.clone(),
    })
}

#[async_trait::async_trait]
impl Resource for CredentialResource {
    fn type_name(&self) -> &'static str {
        "leaseweb_dedicated_server_credential"
    }

    fn schema(&self) -> Schema {
        let types = DedicatedServerCredentialType::values();
        let quoted: Vec<String> = types.iter().map(|t| format!("{:?}", t)).collect();

        Schema::v0()
            .with_attribute(
                "dedicated_server_id",
                Attribute::required_string()
                    .with_description("The ID of the dedicated server.")
                    .requires_replace(),
            )
            .with_attribute(
                "username",
                Attribute::required_string()
                    .with_description("The username for the credentials")
                    .requires_replace(),
            )
            .with_attribute(
                "type",
                Attribute::required_string()
                    .with_description(format!(
                        "The type of the credential. Valid options are: {}",
                        quoted.join(", ")
                    ))
                    .with_validator(Validator::one_of(types))
                    .requires_replace(),
            )
            .with_attribute(
                "password",
                Attribute::required_string()
                    .with_description("The password for the credentials")
                    .sensitive(),
            )
    }

    async fn create(
        &self,
        data: &ProviderData,
        planned_state: Value,
    ) -> Result<Value, ProviderError> {
        let plan: DedicatedServerCredentialResourceModel = decode(planned_state)?;
        let credential = credential_from_model(&plan)?;

        let created = data
            .dedicated_server
            .create_credential(&plan.dedicated_server_id, &credential)
            .await?;

        encode(&DedicatedServerCredentialResourceModel::new(
            plan.dedicated_server_id,
            &created,
        ))
    }

    async fn read(&self, data: &ProviderData, current_state: Value) -> Result<Value, ProviderError> {
        let state: DedicatedServerCredentialResourceModel = decode(current_state)?;
        let credential_type: DedicatedServerCredentialType = state.credential_type.parse()?;

        let current = data
            .dedicated_server
            .get_credential(&state.dedicated_server_id, credential_type, &state.username)
            .await?;

        encode(&DedicatedServerCredentialResourceModel::new(
            state.dedicated_server_id,
            &current,
        ))
    }

    async fn update(
        &self,
        data: &ProviderData,
        _prior_state: Value,
        planned_state: Value,
    ) -> Result<Value, ProviderError> {
        let plan: DedicatedServerCredentialResourceModel = decode(planned_state)?;
        let credential = credential_from_model(&plan)?;

        let updated = data
            .dedicated_server
            .update_credential(&plan.dedicated_server_id, &credential)
            .await?;

        encode(&DedicatedServerCredentialResourceModel::new(
            plan.dedicated_server_id,
            &updated,
        ))
    }

    async fn delete(&self, data: &ProviderData, current_state: Value) -> Result<(), ProviderError> {
        let state: DedicatedServerCredentialResourceModel = decode(current_state)?;
        let credential_type: DedicatedServerCredentialType = state.credential_type.parse()?;

        Ok(data
            .dedicated_server
            .delete_credential(&state.dedicated_server_id, credential_type, &state.username)
            .await?)
    }
}
