use super::models::{
    AutoScalingGroup, CreateTargetGroupOpts, Credential, CredentialOpts, Instance, InstanceList,
    InstanceType, InstanceTypeList, LaunchInstanceOpts, LaunchLoadBalancerOpts, LoadBalancer,
    LoadBalancerList, Region, RegionList, TargetGroup, TerminateOpts, UpdateCredentialOpts,
    UpdateInstanceOpts, UpdateLoadBalancerOpts, UpdateTargetGroupOpts,
};
use super::{ApiError, LeasewebClient};

/// Base path of the public cloud API.
pub const PUBLIC_CLOUD_PATH: &str = "/publicCloud/v1";

/// Public cloud endpoints.
#[derive(Debug, Clone)]
pub struct PublicCloudApi {
    client: LeasewebClient,
}

impl PublicCloudApi {
    pub fn new(client: LeasewebClient) -> Self {
        Self { client }
    }

    fn path(suffix: &str) -> String {
        format!("{PUBLIC_CLOUD_PATH}{suffix}")
    }

    // =========================================================================
    // Instances
    // =========================================================================

    pub async fn get_instances(&self) -> Result<Vec<Instance>, ApiError> {
        self.client
            .list_all::<InstanceList>(&Self::path("/instances"))
            .await
    }

    pub async fn get_instance(&self, id: &str) -> Result<Instance, ApiError> {
        self.client
            .get(&Self::path(&format!("/instances/{id}")))
            .await
    }

    pub async fn launch_instance(&self, opts: &LaunchInstanceOpts) -> Result<Instance, ApiError> {
        self.client.post(&Self::path("/instances"), opts).await
    }

    pub async fn update_instance(
        &self,
        id: &str,
        opts: &UpdateInstanceOpts,
    ) -> Result<Instance, ApiError> {
        self.client
            .put(&Self::path(&format!("/instances/{id}")), opts)
            .await
    }

    pub async fn terminate_instance(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .delete_with_body(
                &Self::path(&format!("/instances/{id}")),
                &TerminateOpts::default(),
            )
            .await
    }

    /// Instance types the instance can be resized to.
    pub async fn get_instance_types_for_update(
        &self,
        id: &str,
    ) -> Result<Vec<InstanceType>, ApiError> {
        let list: InstanceTypeList = self
            .client
            .get(&Self::path(&format!("/instances/{id}/instanceTypesUpdate")))
            .await?;
        Ok(list.instance_types)
    }

    pub async fn get_regions(&self) -> Result<Vec<Region>, ApiError> {
        self.client
            .list_all::<RegionList>(&Self::path("/regions"))
            .await
    }

    pub async fn add_to_private_network(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .put_empty(&Self::path(&format!("/instances/{id}/addToPrivateNetwork")))
            .await
    }

    pub async fn remove_from_private_network(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .delete(&Self::path(&format!(
                "/instances/{id}/removeFromPrivateNetwork"
            )))
            .await
    }

    pub async fn get_auto_scaling_group(&self, id: &str) -> Result<AutoScalingGroup, ApiError> {
        self.client
            .get(&Self::path(&format!("/autoScalingGroups/{id}")))
            .await
    }

    // =========================================================================
    // Load balancers
    // =========================================================================

    pub async fn get_load_balancers(&self) -> Result<Vec<LoadBalancer>, ApiError> {
        self.client
            .list_all::<LoadBalancerList>(&Self::path("/loadBalancers"))
            .await
    }

    pub async fn get_load_balancer(&self, id: &str) -> Result<LoadBalancer, ApiError> {
        self.client
            .get(&Self::path(&format!("/loadBalancers/{id}")))
            .await
    }

    pub async fn launch_load_balancer(
        &self,
        opts: &LaunchLoadBalancerOpts,
    ) -> Result<LoadBalancer, ApiError> {
        self.client.post(&Self::path("/loadBalancers"), opts).await
    }

    pub async fn update_load_balancer(
        &self,
        id: &str,
        opts: &UpdateLoadBalancerOpts,
    ) -> Result<LoadBalancer, ApiError> {
        self.client
            .put(&Self::path(&format!("/loadBalancers/{id}")), opts)
            .await
    }

    pub async fn terminate_load_balancer(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .delete(&Self::path(&format!("/loadBalancers/{id}")))
            .await
    }

    // =========================================================================
    // Target groups
    // =========================================================================

    pub async fn create_target_group(
        &self,
        opts: &CreateTargetGroupOpts,
    ) -> Result<TargetGroup, ApiError> {
        self.client.post(&Self::path("/targetGroups"), opts).await
    }

    pub async fn get_target_group(&self, id: &str) -> Result<TargetGroup, ApiError> {
        self.client
            .get(&Self::path(&format!("/targetGroups/{id}")))
            .await
    }

    pub async fn update_target_group(
        &self,
        id: &str,
        opts: &UpdateTargetGroupOpts,
    ) -> Result<TargetGroup, ApiError> {
        self.client
            .put(&Self::path(&format!("/targetGroups/{id}")), opts)
            .await
    }

    pub async fn delete_target_group(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .delete(&Self::path(&format!("/targetGroups/{id}")))
            .await
    }

    // =========================================================================
    // Credentials
    // =========================================================================

    pub async fn store_credential(
        &self,
        instance_id: &str,
        opts: &CredentialOpts,
    ) -> Result<Credential, ApiError> {
        self.client
            .post(
                &Self::path(&format!("/instances/{instance_id}/credentials")),
                opts,
            )
            .await
    }

    pub async fn get_credential(
        &self,
        instance_id: &str,
        credential_type: &str,
        username: &str,
    ) -> Result<Credential, ApiError> {
        self.client
            .get(&Self::credential_path(instance_id, credential_type, username))
            .await
    }

    pub async fn update_credential(
        &self,
        instance_id: &str,
        credential_type: &str,
        username: &str,
        opts: &UpdateCredentialOpts,
    ) -> Result<Credential, ApiError> {
        self.client
            .put(
                &Self::credential_path(instance_id, credential_type, username),
                opts,
            )
            .await
    }

    pub async fn delete_credential(
        &self,
        instance_id: &str,
        credential_type: &str,
        username: &str,
    ) -> Result<(), ApiError> {
        self.client
            .delete(&Self::credential_path(instance_id, credential_type, username))
            .await
    }

    fn credential_path(instance_id: &str, credential_type: &str, username: &str) -> String {
        Self::path(&format!(
            "/instances/{instance_id}/credentials/{credential_type}/{username}"
        ))
    }
}
