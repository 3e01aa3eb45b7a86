use tracing::debug;

use super::convert::{
    convert_auto_scaling_group, convert_credential, convert_instance, convert_instance_type,
    convert_load_balancer, convert_region, convert_target_group, to_create_target_group_opts,
    to_credential_opts, to_launch_instance_opts, to_launch_load_balancer_opts,
    to_update_instance_opts, to_update_target_group_opts,
};
use crate::domain::{
    AutoScalingGroup, Credential, CredentialType, Instance, InstanceType, InstanceUpdate,
    LoadBalancer, Region, TargetGroup, Uuid,
};
use crate::ports::{PublicCloudRepository, RepositoryResult};
use crate::sdk::models::{UpdateCredentialOpts, UpdateLoadBalancerOpts};
use crate::sdk::PublicCloudApi;

/// [`PublicCloudRepository`] backed by the Leaseweb public cloud API.
#[derive(Debug, Clone)]
pub struct PublicCloudSdkRepository {
    api: PublicCloudApi,
}

impl PublicCloudSdkRepository {
    pub fn new(api: PublicCloudApi) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl PublicCloudRepository for PublicCloudSdkRepository {
    async fn get_all_instances(&self) -> RepositoryResult<Vec<Instance>> {
        self.api
            .get_instances()
            .await?
            .into_iter()
            .map(|instance| convert_instance(instance, None))
            .collect()
    }

    async fn get_instance(&self, id: Uuid) -> RepositoryResult<Instance> {
        let instance = self.api.get_instance(&id.to_string()).await?;
        convert_instance(instance, None)
    }

    async fn create_instance(&self, instance: &Instance) -> RepositoryResult<Instance> {
        let opts = to_launch_instance_opts(instance);
        let launched = self.api.launch_instance(&opts).await?;
        debug!(id = %launched.id, "launched instance");
        convert_instance(launched, None)
    }

    async fn update_instance(&self, update: &InstanceUpdate) -> RepositoryResult<Instance> {
        let opts = to_update_instance_opts(update);
        let updated = self
            .api
            .update_instance(&update.id.to_string(), &opts)
            .await?;
        convert_instance(updated, None)
    }

    async fn delete_instance(&self, id: Uuid) -> RepositoryResult<()> {
        Ok(self.api.terminate_instance(&id.to_string()).await?)
    }

    async fn get_available_instance_types_for_update(
        &self,
        id: Uuid,
    ) -> RepositoryResult<Vec<InstanceType>> {
        Ok(self
            .api
            .get_instance_types_for_update(&id.to_string())
            .await?
            .into_iter()
            .map(convert_instance_type)
            .collect())
    }

    async fn get_regions(&self) -> RepositoryResult<Vec<Region>> {
        Ok(self
            .api
            .get_regions()
            .await?
            .into_iter()
            .map(convert_region)
            .collect())
    }

    async fn add_to_private_network(&self, id: Uuid) -> RepositoryResult<()> {
        Ok(self.api.add_to_private_network(&id.to_string()).await?)
    }

    async fn remove_from_private_network(&self, id: Uuid) -> RepositoryResult<()> {
        Ok(self
            .api
            .remove_from_private_network(&id.to_string())
            .await?)
    }

    async fn get_auto_scaling_group(&self, id: Uuid) -> RepositoryResult<AutoScalingGroup> {
        let group = self.api.get_auto_scaling_group(&id.to_string()).await?;

        let load_balancer = match &group.load_balancer {
            Some(linked) => Some(
                convert_load_balancer(self.api.get_load_balancer(&linked.id).await?)
                    .map_err(|e| e.context("get_auto_scaling_group"))?,
            ),
            None => None,
        };

        convert_auto_scaling_group(group, load_balancer)
    }

    async fn get_all_load_balancers(&self) -> RepositoryResult<Vec<LoadBalancer>> {
        self.api
            .get_load_balancers()
            .await?
            .into_iter()
            .map(convert_load_balancer)
            .collect()
    }

    async fn get_load_balancer(&self, id: Uuid) -> RepositoryResult<LoadBalancer> {
        convert_load_balancer(self.api.get_load_balancer(&id.to_string()).await?)
    }

    async fn create_load_balancer(
        &self,
        load_balancer: &LoadBalancer,
    ) -> RepositoryResult<LoadBalancer> {
        let opts = to_launch_load_balancer_opts(load_balancer);
        convert_load_balancer(self.api.launch_load_balancer(&opts).await?)
    }

    async fn update_load_balancer(
        &self,
        id: Uuid,
        load_balancer_type: Option<String>,
        reference: Option<String>,
    ) -> RepositoryResult<LoadBalancer> {
        let opts = UpdateLoadBalancerOpts {
            r#type: load_balancer_type,
            reference,
        };
        convert_load_balancer(
            self.api
                .update_load_balancer(&id.to_string(), &opts)
                .await?,
        )
    }

    async fn delete_load_balancer(&self, id: Uuid) -> RepositoryResult<()> {
        Ok(self.api.terminate_load_balancer(&id.to_string()).await?)
    }

    async fn create_target_group(
        &self,
        target_group: &TargetGroup,
    ) -> RepositoryResult<TargetGroup> {
        let opts = to_create_target_group_opts(target_group);
        convert_target_group(self.api.create_target_group(&opts).await?)
    }

    async fn get_target_group(&self, id: Uuid) -> RepositoryResult<TargetGroup> {
        convert_target_group(self.api.get_target_group(&id.to_string()).await?)
    }

    async fn update_target_group(
        &self,
        target_group: &TargetGroup,
    ) -> RepositoryResult<TargetGroup> {
        let opts = to_update_target_group_opts(target_group);
        convert_target_group(
            self.api
                .update_target_group(&target_group.id.to_string(), &opts)
                .await?,
        )
    }

    async fn delete_target_group(&self, id: Uuid) -> RepositoryResult<()> {
        Ok(self.api.delete_target_group(&id.to_string()).await?)
    }

    async fn create_credential(
        &self,
        instance_id: Uuid,
        credential: &Credential<CredentialType>,
    ) -> RepositoryResult<Credential<CredentialType>> {
        let opts = to_credential_opts(credential);
        convert_credential(
            self.api
                .store_credential(&instance_id.to_string(), &opts)
                .await?,
        )
    }

    async fn get_credential(
        &self,
        instance_id: Uuid,
        credential_type: CredentialType,
        username: &str,
    ) -> RepositoryResult<Credential<CredentialType>> {
        convert_credential(
            self.api
                .get_credential(&instance_id.to_string(), credential_type.as_str(), username)
                .await?,
        )
    }

    async fn update_credential(
        &self,
        instance_id: Uuid,
        credential: &Credential<CredentialType>,
    ) -> RepositoryResult<Credential<CredentialType>> {
        let opts = UpdateCredentialOpts {
            password: credential.password.clone(),
        };
        convert_credential(
            self.api
                .update_credential(
                    &instance_id.to_string(),
                    credential.credential_type.as_str(),
                    &credential.username,
                    &opts,
                )
                .await?,
        )
    }

    async fn delete_credential(
        &self,
        instance_id: Uuid,
        credential_type: CredentialType,
        username: &str,
    ) -> RepositoryResult<()> {
        Ok(self
            .api
            .delete_credential(&instance_id.to_string(), credential_type.as_str(), username)
            .await?)
    }
}
