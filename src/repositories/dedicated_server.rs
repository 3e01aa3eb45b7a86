use super::convert::{
    convert_bandwidth_notification_setting, convert_credential,
    to_bandwidth_notification_setting_opts, to_credential_opts,
};
use crate::domain::{BandwidthNotificationSetting, Credential, DedicatedServerCredentialType};
use crate::ports::{DedicatedServerRepository, RepositoryResult};
use crate::sdk::models::UpdateCredentialOpts;
use crate::sdk::DedicatedServerApi;

/// [`DedicatedServerRepository`] backed by the Leaseweb bare metal API.
#[derive(Debug, Clone)]
pub struct DedicatedServerSdkRepository {
    api: DedicatedServerApi,
}

impl DedicatedServerSdkRepository {
    pub fn new(api: DedicatedServerApi) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl DedicatedServerRepository for DedicatedServerSdkRepository {
    async fn create_credential(
        &self,
        server_id: &str,
        credential: &Credential<DedicatedServerCredentialType>,
    ) -> RepositoryResult<Credential<DedicatedServerCredentialType>> {
        let opts = to_credential_opts(credential);
        convert_credential(self.api.create_credential(server_id, &opts).await?)
    }

    async fn get_credential(
        &self,
        server_id: &str,
        credential_type: DedicatedServerCredentialType,
        username: &str,
    ) -> RepositoryResult<Credential<DedicatedServerCredentialType>> {
        convert_credential(
            self.api
                .get_credential(server_id, credential_type.as_str(), username)
                .await?,
        )
    }

    async fn update_credential(
        &self,
        server_id: &str,
        credential: &Credential<DedicatedServerCredentialType>,
    ) -> RepositoryResult<Credential<DedicatedServerCredentialType>> {
        let opts = UpdateCredentialOpts {
            password: credential.password.clone(),
        };
        convert_credential(
            self.api
                .update_credential(
                    server_id,
                    credential.credential_type.as_str(),
                    &credential.username,
                    &opts,
                )
                .await?,
        )
    }

    async fn delete_credential(
        &self,
        server_id: &str,
        credential_type: DedicatedServerCredentialType,
        username: &str,
    ) -> RepositoryResult<()> {
        Ok(self
            .api
            .delete_credential(server_id, credential_type.as_str(), username)
            .await?)
    }

    async fn create_bandwidth_notification_setting(
        &self,
        server_id: &str,
        setting: &BandwidthNotificationSetting,
    ) -> RepositoryResult<BandwidthNotificationSetting> {
        let opts = to_bandwidth_notification_setting_opts(setting);
        convert_bandwidth_notification_setting(
            self.api
                .create_bandwidth_notification_setting(server_id, &opts)
                .await?,
        )
    }

    async fn get_bandwidth_notification_setting(
        &self,
        server_id: &str,
        id: &str,
    ) -> RepositoryResult<BandwidthNotificationSetting> {
        convert_bandwidth_notification_setting(
            self.api
                .get_bandwidth_notification_setting(server_id, id)
                .await?,
        )
    }

    async fn update_bandwidth_notification_setting(
        &self,
        server_id: &str,
        setting: &BandwidthNotificationSetting,
    ) -> RepositoryResult<BandwidthNotificationSetting> {
        let opts = to_bandwidth_notification_setting_opts(setting);
        convert_bandwidth_notification_setting(
            self.api
                .update_bandwidth_notification_setting(server_id, &setting.id, &opts)
                .await?,
        )
    }

    async fn delete_bandwidth_notification_setting(
        &self,
        server_id: &str,
        id: &str,
    ) -> RepositoryResult<()> {
        Ok(self
            .api
            .delete_bandwidth_notification_setting(server_id, id)
            .await?)
    }
}
