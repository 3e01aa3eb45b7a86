//! Repository traits the services depend on.
//!
//! The SDK-backed implementations live in [`crate::repositories`]; tests use
//! in-memory spies.

use crate::domain::{
    AutoScalingGroup, BandwidthNotificationSetting, Credential, CredentialType,
    DedicatedServerCredentialType, Instance, InstanceType, InstanceUpdate, LoadBalancer, Region,
    TargetGroup, Uuid,
};
use crate::repositories::RepositoryError;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[async_trait::async_trait]
pub trait PublicCloudRepository: Send + Sync {
    // =========================================================================
    // Instances
    // =========================================================================

    /// Every instance, without auto scaling group details.
    async fn get_all_instances(&self) -> RepositoryResult<Vec<Instance>>;

    async fn get_instance(&self, id: Uuid) -> RepositoryResult<Instance>;

    async fn create_instance(&self, instance: &Instance) -> RepositoryResult<Instance>;

    async fn update_instance(&self, update: &InstanceUpdate) -> RepositoryResult<Instance>;

    async fn delete_instance(&self, id: Uuid) -> RepositoryResult<()>;

    async fn get_available_instance_types_for_update(
        &self,
        id: Uuid,
    ) -> RepositoryResult<Vec<InstanceType>>;

    async fn get_regions(&self) -> RepositoryResult<Vec<Region>>;

    async fn add_to_private_network(&self, id: Uuid) -> RepositoryResult<()>;

    async fn remove_from_private_network(&self, id: Uuid) -> RepositoryResult<()>;

    /// Auto scaling group details, including its load balancer.
    async fn get_auto_scaling_group(&self, id: Uuid) -> RepositoryResult<AutoScalingGroup>;

    // =========================================================================
    // Load balancers
    // =========================================================================

    /// The load balancer index; items may lack configuration details.
    async fn get_all_load_balancers(&self) -> RepositoryResult<Vec<LoadBalancer>>;

    async fn get_load_balancer(&self, id: Uuid) -> RepositoryResult<LoadBalancer>;

    async fn create_load_balancer(
        &self,
        load_balancer: &LoadBalancer,
    ) -> RepositoryResult<LoadBalancer>;

    async fn update_load_balancer(
        &self,
        id: Uuid,
        load_balancer_type: Option<String>,
        reference: Option<String>,
    ) -> RepositoryResult<LoadBalancer>;

    async fn delete_load_balancer(&self, id: Uuid) -> RepositoryResult<()>;

    // =========================================================================
    // Target groups
    // =========================================================================

    async fn create_target_group(&self, target_group: &TargetGroup)
        -> RepositoryResult<TargetGroup>;

    async fn get_target_group(&self, id: Uuid) -> RepositoryResult<TargetGroup>;

    /// Sends name, port and health check; protocol and region are immutable.
    async fn update_target_group(&self, target_group: &TargetGroup)
        -> RepositoryResult<TargetGroup>;

    async fn delete_target_group(&self, id: Uuid) -> RepositoryResult<()>;

    // =========================================================================
    // Credentials
    // =========================================================================

    async fn create_credential(
        &self,
        instance_id: Uuid,
        credential: &Credential<CredentialType>,
    ) -> RepositoryResult<Credential<CredentialType>>;

    async fn get_credential(
        &self,
        instance_id: Uuid,
        credential_type: CredentialType,
        username: &str,
    ) -> RepositoryResult<Credential<CredentialType>>;

    async fn update_credential(
        &self,
        instance_id: Uuid,
        credential: &Credential<CredentialType>,
    ) -> RepositoryResult<Credential<CredentialType>>;

    async fn delete_credential(
        &self,
        instance_id: Uuid,
        credential_type: CredentialType,
        username: &str,
    ) -> RepositoryResult<()>;
}

#[async_trait::async_trait]
pub trait DedicatedServerRepository: Send + Sync {
    async fn create_credential(
        &self,
        server_id: &str,
        credential: &Credential<DedicatedServerCredentialType>,
    ) -> RepositoryResult<Credential<DedicatedServerCredentialType>>;

    async fn get_credential(
        &self,
        server_id: &str,
        credential_type: DedicatedServerCredentialType,
        username: &str,
    ) -> RepositoryResult<Credential<DedicatedServerCredentialType>>;

    async fn update_credential(
        &self,
        server_id: &str,
        credential: &Credential<DedicatedServerCredentialType>,
    ) -> RepositoryResult<Credential<DedicatedServerCredentialType>>;

    async fn delete_credential(
        &self,
        server_id: &str,
        credential_type: DedicatedServerCredentialType,
        username: &str,
    ) -> RepositoryResult<()>;

    async fn create_bandwidth_notification_setting(
        &self,
        server_id: &str,
        setting: &BandwidthNotificationSetting,
    ) -> RepositoryResult<BandwidthNotificationSetting>;

    async fn get_bandwidth_notification_setting(
        &self,
        server_id: &str,
        id: &str,
    ) -> RepositoryResult<BandwidthNotificationSetting>;

    async fn update_bandwidth_notification_setting(
        &self,
        server_id: &str,
        setting: &BandwidthNotificationSetting,
    ) -> RepositoryResult<BandwidthNotificationSetting>;

    async fn delete_bandwidth_notification_setting(
        &self,
        server_id: &str,
        id: &str,
    ) -> RepositoryResult<()>;
}
