use super::models::{
    BandwidthNotificationSetting, BandwidthNotificationSettingOpts, Credential, CredentialOpts,
    UpdateCredentialOpts,
};
use super::{ApiError, LeasewebClient};

/// Base path of the dedicated server API.
pub const DEDICATED_SERVER_PATH: &str = "/bareMetals/v2";

/// Dedicated server endpoints.
#[derive(Debug, Clone)]
pub struct DedicatedServerApi {
    client: LeasewebClient,
}

impl DedicatedServerApi {
    pub fn new(client: LeasewebClient) -> Self {
        Self { client }
    }

    fn credentials_path(server_id: &str) -> String {
        format!("{DEDICATED_SERVER_PATH}/servers/{server_id}/credentials")
    }

    fn bandwidth_path(server_id: &str) -> String {
        format!("{DEDICATED_SERVER_PATH}/servers/{server_id}/notificationSettings/bandwidth")
    }

    pub async fn create_credential(
        &self,
        server_id: &str,
        opts: &CredentialOpts,
    ) -> Result<Credential, ApiError> {
        self.client
            .post(&Self::credentials_path(server_id), opts)
            .await
    }

    pub async fn get_credential(
        &self,
        server_id: &str,
        credential_type: &str,
        username: &str,
    ) -> Result<Credential, ApiError> {
        self.client
            .get(&format!(
                "{}/{credential_type}/{username}",
                Self::credentials_path(server_id)
            ))
            .await
    }

    pub async fn update_credential(
        &self,
        server_id: &str,
        credential_type: &str,
        username: &str,
        opts: &UpdateCredentialOpts,
    ) -> Result<Credential, ApiError> {
        self.client
            .put(
                &format!(
                    "{}/{credential_type}/{username}",
                    Self::credentials_path(server_id)
                ),
                opts,
            )
            .await
    }

    pub async fn delete_credential(
        &self,
        server_id: &str,
        credential_type: &str,
        username: &str,
    ) -> Result<(), ApiError> {
        self.client
            .delete(&format!(
                "{}/{credential_type}/{username}",
                Self::credentials_path(server_id)
            ))
            .await
    }

    pub async fn create_bandwidth_notification_setting(
        &self,
        server_id: &str,
        opts: &BandwidthNotificationSettingOpts,
    ) -> Result<BandwidthNotificationSetting, ApiError> {
        self.client
            .post(&Self::bandwidth_path(server_id), opts)
            .await
    }

    pub async fn get_bandwidth_notification_setting(
        &self,
        server_id: &str,
        notification_id: &str,
    ) -> Result<BandwidthNotificationSetting, ApiError> {
        self.client
            .get(&format!(
                "{}/{notification_id}",
                Self::bandwidth_path(server_id)
            ))
            .await
    }

    pub async fn update_bandwidth_notification_setting(
        &self,
        server_id: &str,
        notification_id: &str,
        opts: &BandwidthNotificationSettingOpts,
    ) -> Result<BandwidthNotificationSetting, ApiError> {
        self.client
            .put(
                &format!("{}/{notification_id}", Self::bandwidth_path(server_id)),
                opts,
            )
            .await
    }

    pub async fn delete_bandwidth_notification_setting(
        &self,
        server_id: &str,
        notification_id: &str,
    ) -> Result<(), ApiError> {
        self.client
            .delete(&format!(
                "{}/{notification_id}",
                Self::bandwidth_path(server_id)
            ))
            .await
    }
}
