use serde_json::Value;

use crate::domain::{BandwidthNotificationSetting, NotificationFrequency, NotificationUnit};
use crate::error::ProviderError;
use crate::models::NotificationSettingBandwidthResourceModel;
use crate::resources::{decode, encode, ProviderData, Resource};
use crate::schema::{Attribute, Schema, Validator};

/// `leaseweb_dedicated_server_notification_setting_bandwidth`
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationSettingBandwidthResource;

impl NotificationSettingBandwidthResource {
    fn setting_from_model(
        model: &NotificationSettingBandwidthResourceModel,
    ) -> Result<BandwidthNotificationSetting, ProviderError> {
        Ok(BandwidthNotificationSetting {
            id: model.id.clone().unwrap_or_default(),
            frequency: model.frequency.parse()?,
            threshold: model.threshold.clone(),
            unit: model.unit.parse()?,
        })
    }

    fn setting_id(model: &NotificationSettingBandwidthResourceModel) -> Result<&str, ProviderError> {
        model
            .id
            .as_deref()
            .ok_or_else(|| ProviderError::Validation("id is not set".to_string()))
    }
}

#[async_trait::async_trait]
impl Resource for NotificationSettingBandwidthResource {
    fn type_name(&self) -> &'static str {
        "leaseweb_dedicated_server_notification_setting_bandwidth"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_attribute(
                "id",
                Attribute::computed_string()
                    .with_description("The notification setting bandwidth unique identifier")
                    .use_state_for_unknown(),
            )
            .with_attribute(
                "dedicated_server_id",
                Attribute::required_string()
                    .with_description("The server unique identifier")
                    .requires_replace(),
            )
            .with_attribute(
                "frequency",
                Attribute::required_string()
                    .with_description(
                        "The notification frequency. Valid options can be *DAILY* or *WEEKLY* or *MONTHLY*.",
                    )
                    .with_validator(Validator::one_of(NotificationFrequency::values())),
            )
            .with_attribute(
                "threshold",
                Attribute::required_string()
                    .with_description("Threshold Value. Value can be a number greater than 0.")
                    .with_validator(Validator::GreaterThanZero),
            )
            .with_attribute(
                "unit",
                Attribute::required_string()
                    .with_description("The notification unit. Valid options can be *Mbps* or *Gbps*.")
                    .with_validator(Validator::one_of(NotificationUnit::values())),
            )
    }

    async fn create(
        &self,
        data: &ProviderData,
        planned_state: Value,
    ) -> Result<Value, ProviderError> {
        let plan: NotificationSettingBandwidthResourceModel = decode(planned_state)?;
        let setting = Self::setting_from_model(&plan)?;

        let created = data
            .dedicated_server
            .create_bandwidth_notification_setting(&plan.dedicated_server_id, &setting)
            .await?;

        encode(&NotificationSettingBandwidthResourceModel::new(
            plan.dedicated_server_id,
            &created,
        ))
    }

    async fn read(&self, data: &ProviderData, current_state: Value) -> Result<Value, ProviderError> {
        let state: NotificationSettingBandwidthResourceModel = decode(current_state)?;
        let id = Self::setting_id(&state)?;

        let setting = data
            .dedicated_server
            .get_bandwidth_notification_setting(&state.dedicated_server_id, id)
            .await?;

        encode(&NotificationSettingBandwidthResourceModel::new(
            state.dedicated_server_id.clone(),
            &setting,
        ))
    }

    async fn update(
        &self,
        data: &ProviderData,
        prior_state: Value,
        planned_state: Value,
    ) -> Result<Value, ProviderError> {
        let prior: NotificationSettingBandwidthResourceModel = decode(prior_state)?;
        let mut plan: NotificationSettingBandwidthResourceModel = decode(planned_state)?;
        if plan.id.is_none() {
            plan.id = prior.id;
        }
        let id = Self::setting_id(&plan)?.to_string();
        let setting = Self::setting_from_model(&plan)?;

        let updated = data
            .dedicated_server
            .update_bandwidth_notification_setting(&plan.dedicated_server_id, &setting)
            .await?;

        // The id of the setting never changes.
        let mut state =
            NotificationSettingBandwidthResourceModel::new(plan.dedicated_server_id, &updated);
        state.id = Some(id);
        encode(&state)
    }

    async fn delete(&self, data: &ProviderData, current_state: Value) -> Result<(), ProviderError> {
        let state: NotificationSettingBandwidthResourceModel = decode(current_state)?;
        let id = Self::setting_id(&state)?;

        Ok(data
            .dedicated_server
            .delete_bandwidth_notification_setting(&state.dedicated_server_id, id)
            .await?)
    }
}
