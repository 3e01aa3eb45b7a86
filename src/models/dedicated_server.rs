use serde::{Deserialize, Serialize};

use crate::domain::{BandwidthNotificationSetting, Credential, DedicatedServerCredentialType};

/// State of `leaseweb_dedicated_server_credential`.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DedicatedServerCredentialResourceModel {
    pub dedicated_server_id: String,
    pub username: String,
    #[serde(rename = "type")]
    pub credential_type: String,
    pub password: String,
}

impl std::fmt::Debug for DedicatedServerCredentialResourceModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DedicatedServerCredentialResourceModel")
            .field("dedicated_server_id", &self.dedicated_server_id)
            .field("username", &self.username)
            .field("credential_type", &self.credential_type)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl DedicatedServerCredentialResourceModel {
    pub fn new(
        dedicated_server_id: impl Into<String>,
        credential: &Credential<DedicatedServerCredentialType>,
    ) -> Self {
        Self {
            dedicated_server_id: dedicated_server_id.into(),
            username: credential.username.clone(),
            credential_type: credential.credential_type.to_string(),
            password: credential.password.clone(),
        }
    }
}

/// State of `leaseweb_dedicated_server_notification_setting_bandwidth`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationSettingBandwidthResourceModel {
    #[serde(default)]
    pub id: Option<String>,
    pub dedicated_server_id: String,
    pub frequency: String,
    pub threshold: String,
    pub unit: String,
}

impl NotificationSettingBandwidthResourceModel {
    pub fn new(
        dedicated_server_id: impl Into<String>,
        setting: &BandwidthNotificationSetting,
    ) -> Self {
        Self {
            id: Some(setting.id.clone()),
            dedicated_server_id: dedicated_server_id.into(),
            frequency: setting.frequency.to_string(),
            threshold: setting.threshold.clone(),
            unit: setting.unit.to_string(),
        }
    }
}
