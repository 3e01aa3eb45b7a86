use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};

use super::ServiceError;
use crate::domain::{
    AutoScalingGroup, Credential, CredentialType, Instance, InstanceUpdate, LoadBalancer, State,
    TargetGroup, Uuid,
};
use crate::ports::PublicCloudRepository;

type Result<T> = std::result::Result<T, ServiceError>;

/// How often and how long to poll while waiting on an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    pub attempts: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            attempts: 30,
        }
    }
}

impl PollSettings {
    /// Upper bound of a wait.
    pub fn total(&self) -> Duration {
        self.interval * self.attempts
    }
}

/// Instance property a wait resolves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceProperty {
    State(State),
    HasPrivateNetwork(bool),
}

impl InstanceProperty {
    fn matches(&self, instance: &Instance) -> bool {
        match self {
            Self::State(state) => instance.state == *state,
            Self::HasPrivateNetwork(enabled) => instance.has_private_network == *enabled,
        }
    }
}

/// Public cloud operations used by resources and data sources.
#[derive(Clone)]
pub struct PublicCloudService {
    repository: Arc<dyn PublicCloudRepository>,
    poll: PollSettings,
}

impl std::fmt::Debug for PublicCloudService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicCloudService")
            .field("poll", &self.poll)
            .finish_non_exhaustive()
    }
}

impl PublicCloudService {
    pub fn new(repository: Arc<dyn PublicCloudRepository>) -> Self {
        Self {
            repository,
            poll: PollSettings::default(),
        }
    }

    pub fn with_poll_settings(mut self, poll: PollSettings) -> Self {
        self.poll = poll;
        self
    }

    // =========================================================================
    // Instances
    // =========================================================================

    /// Every instance, with auto scaling group details filled in.
    pub async fn get_all_instances(&self) -> Result<Vec<Instance>> {
        let mut instances = self.repository.get_all_instances().await?;
        let mut groups: HashMap<Uuid, AutoScalingGroup> = HashMap::new();

        for instance in &mut instances {
            let Some(group_id) = instance.auto_scaling_group_id else {
                continue;
            };

            if !groups.contains_key(&group_id) {
                let group = self.repository.get_auto_scaling_group(group_id).await?;
                groups.insert(group_id, group);
            }
            instance.auto_scaling_group = groups.get(&group_id).cloned();
        }

        Ok(instances)
    }

    pub async fn get_instance(&self, id: Uuid) -> Result<Instance> {
        let mut instance = self.repository.get_instance(id).await?;

        if let Some(group_id) = instance.auto_scaling_group_id {
            instance.auto_scaling_group =
                Some(self.repository.get_auto_scaling_group(group_id).await?);
        }

        Ok(instance)
    }

    pub async fn create_instance(&self, instance: &Instance) -> Result<Instance> {
        Ok(self.repository.create_instance(instance).await?)
    }

    pub async fn update_instance(&self, update: &InstanceUpdate) -> Result<Instance> {
        Ok(self.repository.update_instance(update).await?)
    }

    pub async fn delete_instance(&self, id: Uuid) -> Result<()> {
        Ok(self.repository.delete_instance(id).await?)
    }

    /// Names of the types the instance can be resized to.
    pub async fn get_available_instance_types_for_update(&self, id: Uuid) -> Result<Vec<String>> {
        Ok(self
            .repository
            .get_available_instance_types_for_update(id)
            .await?
            .into_iter()
            .map(|instance_type| instance_type.name)
            .collect())
    }

    /// Names of the regions the API serves.
    pub async fn get_regions(&self) -> Result<Vec<String>> {
        Ok(self
            .repository
            .get_regions()
            .await?
            .into_iter()
            .map(|region| region.name)
            .collect())
    }

    /// Poll until `property` holds, the first error, or the poll budget runs out.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn wait_for_instance(&self, id: Uuid, property: InstanceProperty) -> Result<Instance> {
        for attempt in 1..=self.poll.attempts {
            let instance = self.repository.get_instance(id).await?;
            if property.matches(&instance) {
                debug!(attempt, "instance reached expected value");
                return Ok(instance);
            }

            debug!(attempt, state = %instance.state, "instance not ready yet");
            if attempt < self.poll.attempts {
                tokio::time::sleep(self.poll.interval).await;
            }
        }

        warn!(attempts = self.poll.attempts, "gave up waiting for instance");
        Err(ServiceError::WaitTimeout(self.poll.total()))
    }

    /// Attach or detach the private network, then wait for the flag to follow.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn toggle_private_network(&self, id: Uuid, enabled: bool) -> Result<Instance> {
        if enabled {
            self.repository.add_to_private_network(id).await?;
        } else {
            self.repository.remove_from_private_network(id).await?;
        }
        info!("private network change requested");

        self.wait_for_instance(id, InstanceProperty::HasPrivateNetwork(enabled))
            .await
    }

    // =========================================================================
    // Load balancers
    // =========================================================================

    /// Details of every load balancer, sorted by id.
    ///
    /// Details are fetched concurrently; the first failure aborts the rest.
    pub async fn get_load_balancers(&self) -> Result<Vec<LoadBalancer>> {
        let index = self.repository.get_all_load_balancers().await?;

        let mut tasks = JoinSet::new();
        for item in index {
            let repository = Arc::clone(&self.repository);
            tasks.spawn(async move { repository.get_load_balancer(item.id).await });
        }

        let mut load_balancers = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(load_balancer)) => load_balancers.push(load_balancer),
                Ok(Err(err)) => {
                    tasks.abort_all();
                    return Err(err.into());
                },
                Err(err) => {
                    tasks.abort_all();
                    return Err(err.into());
                },
            }
        }

        load_balancers.sort_by_key(|load_balancer| load_balancer.id);
        Ok(load_balancers)
    }

    pub async fn get_load_balancer(&self, id: Uuid) -> Result<LoadBalancer> {
        Ok(self.repository.get_load_balancer(id).await?)
    }

    pub async fn create_load_balancer(&self, load_balancer: &LoadBalancer) -> Result<LoadBalancer> {
        Ok(self.repository.create_load_balancer(load_balancer).await?)
    }

    pub async fn update_load_balancer(
        &self,
        id: Uuid,
        load_balancer_type: Option<String>,
        reference: Option<String>,
    ) -> Result<LoadBalancer> {
        Ok(self
            .repository
            .update_load_balancer(id, load_balancer_type, reference)
            .await?)
    }

    pub async fn delete_load_balancer(&self, id: Uuid) -> Result<()> {
        Ok(self.repository.delete_load_balancer(id).await?)
    }

    // =========================================================================
    // Target groups
    // =========================================================================

    pub async fn create_target_group(&self, target_group: &TargetGroup) -> Result<TargetGroup> {
        Ok(self.repository.create_target_group(target_group).await?)
    }

    pub async fn get_target_group(&self, id: Uuid) -> Result<TargetGroup> {
        Ok(self.repository.get_target_group(id).await?)
    }

    pub async fn update_target_group(&self, target_group: &TargetGroup) -> Result<TargetGroup> {
        Ok(self.repository.update_target_group(target_group).await?)
    }

    pub async fn delete_target_group(&self, id: Uuid) -> Result<()> {
        Ok(self.repository.delete_target_group(id).await?)
    }

    // =========================================================================
    // Credentials
    // =========================================================================

    pub async fn create_credential(
        &self,
        instance_id: Uuid,
        credential: &Credential<CredentialType>,
    ) -> Result<Credential<CredentialType>> {
        Ok(self
            .repository
            .create_credential(instance_id, credential)
            .await?)
    }

    pub async fn get_credential(
        &self,
        instance_id: Uuid,
        credential_type: CredentialType,
        username: &str,
    ) -> Result<Credential<CredentialType>> {
        Ok(self
            .repository
            .get_credential(instance_id, credential_type, username)
            .await?)
    }

    pub async fn update_credential(
        &self,
        instance_id: Uuid,
        credential: &Credential<CredentialType>,
    ) -> Result<Credential<CredentialType>> {
        Ok(self
            .repository
            .update_credential(instance_id, credential)
            .await?)
    }

    pub async fn delete_credential(
        &self,
        instance_id: Uuid,
        credential_type: CredentialType,
        username: &str,
    ) -> Result<()> {
        Ok(self
            .repository
            .delete_credential(instance_id, credential_type, username)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;
    use crate::domain::{InstanceType, Region};
    use crate::ports::RepositoryResult;
    use crate::repositories::RepositoryError;
    use crate::sdk::ApiError;

    const INSTANCE_ID: &str = "ace712e9-a166-47f1-9065-4af0f7e7fce1";
    const GROUP_ID: &str = "90b9f2cc-c655-40ea-b01a-58c00e175c96";

    fn uuid(value: &str) -> Uuid {
        Uuid::new(value).unwrap()
    }

    fn server_error() -> RepositoryError {
        RepositoryError::Api(ApiError::Response {
            status: 500,
            method: "GET".to_string(),
            url: "http://localhost".to_string(),
            body: None,
        })
    }

    fn instance(state: State, has_private_network: bool) -> Instance {
        Instance {
            id: uuid(INSTANCE_ID),
            state,
            has_private_network,
            ..Default::default()
        }
    }

    /// In-memory repository recording the calls it receives.
    #[derive(Default)]
    struct RepositorySpy {
        get_instance_responses: Mutex<VecDeque<RepositoryResult<Instance>>>,
        all_instances: Vec<Instance>,
        auto_scaling_group_calls: Mutex<u32>,
        load_balancers: Vec<LoadBalancer>,
        failing_load_balancer: Option<Uuid>,
        load_balancer_delay: Option<Duration>,
        completed_load_balancers: AtomicUsize,
        calls: Mutex<Vec<String>>,
    }

    impl RepositorySpy {
        fn with_instances(responses: Vec<RepositoryResult<Instance>>) -> Self {
            Self {
                get_instance_responses: Mutex::new(responses.into()),
                ..Default::default()
            }
        }

        fn record(&self, call: &str) {
            self.calls.lock().unwrap().push(call.to_string());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl PublicCloudRepository for RepositorySpy {
        async fn get_all_instances(&self) -> RepositoryResult<Vec<Instance>> {
            Ok(self.all_instances.clone())
        }

        async fn get_instance(&self, _id: Uuid) -> RepositoryResult<Instance> {
            self.record("get_instance");
            self.get_instance_responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(instance(State::Creating, false)))
        }

        async fn create_instance(&self, instance: &Instance) -> RepositoryResult<Instance> {
            Ok(instance.clone())
        }

        async fn update_instance(&self, _update: &InstanceUpdate) -> RepositoryResult<Instance> {
            Ok(instance(State::Running, false))
        }

        async fn delete_instance(&self, _id: Uuid) -> RepositoryResult<()> {
            self.record("delete_instance");
            Ok(())
        }

        async fn get_available_instance_types_for_update(
            &self,
            _id: Uuid,
        ) -> RepositoryResult<Vec<InstanceType>> {
            Ok(vec![InstanceType {
                name: "lsw.m4.large".to_string(),
            }])
        }

        async fn get_regions(&self) -> RepositoryResult<Vec<Region>> {
            Ok(vec![Region {
                name: "eu-west-3".to_string(),
                location: "Amsterdam".to_string(),
            }])
        }

        async fn add_to_private_network(&self, _id: Uuid) -> RepositoryResult<()> {
            self.record("add_to_private_network");
            Ok(())
        }

        async fn remove_from_private_network(&self, _id: Uuid) -> RepositoryResult<()> {
            self.record("remove_from_private_network");
            Ok(())
        }

        async fn get_auto_scaling_group(&self, id: Uuid) -> RepositoryResult<AutoScalingGroup> {
            *self.auto_scaling_group_calls.lock().unwrap() += 1;
            Ok(AutoScalingGroup {
                id,
                region: "eu-west-3".to_string(),
                ..Default::default()
            })
        }

        async fn get_all_load_balancers(&self) -> RepositoryResult<Vec<LoadBalancer>> {
            Ok(self.load_balancers.clone())
        }

        async fn get_load_balancer(&self, id: Uuid) -> RepositoryResult<LoadBalancer> {
            if Some(id) == self.failing_load_balancer {
                return Err(server_error());
            }
            if let Some(delay) = self.load_balancer_delay {
                tokio::time::sleep(delay).await;
            }
            self.completed_load_balancers.fetch_add(1, Ordering::SeqCst);
            Ok(LoadBalancer {
                id,
                reference: Some("detailed".to_string()),
                ..Default::default()
            })
        }

        async fn create_load_balancer(
            &self,
            load_balancer: &LoadBalancer,
        ) -> RepositoryResult<LoadBalancer> {
            Ok(load_balancer.clone())
        }

        async fn update_load_balancer(
            &self,
            id: Uuid,
            _load_balancer_type: Option<String>,
            reference: Option<String>,
        ) -> RepositoryResult<LoadBalancer> {
            Ok(LoadBalancer {
                id,
                reference,
                ..Default::default()
            })
        }

        async fn delete_load_balancer(&self, _id: Uuid) -> RepositoryResult<()> {
            Ok(())
        }

        async fn create_target_group(
            &self,
            target_group: &TargetGroup,
        ) -> RepositoryResult<TargetGroup> {
            Ok(target_group.clone())
        }

        async fn get_target_group(&self, id: Uuid) -> RepositoryResult<TargetGroup> {
            Ok(TargetGroup {
                id,
                ..Default::default()
            })
        }

        async fn update_target_group(
            &self,
            target_group: &TargetGroup,
        ) -> RepositoryResult<TargetGroup> {
            Ok(target_group.clone())
        }

        async fn delete_target_group(&self, _id: Uuid) -> RepositoryResult<()> {
            Ok(())
        }

        async fn create_credential(
            &self,
            _instance_id: Uuid,
            credential: &Credential<CredentialType>,
        ) -> RepositoryResult<Credential<CredentialType>> {
            Ok(credential.clone())
        }

        async fn get_credential(
            &self,
            _instance_id: Uuid,
            credential_type: CredentialType,
            username: &str,
        ) -> RepositoryResult<Credential<CredentialType>> {
            Ok(Credential {
                credential_type,
                username: username.to_string(),
                password: "secret".to_string(),
            })
        }

        async fn update_credential(
            &self,
            _instance_id: Uuid,
            credential: &Credential<CredentialType>,
        ) -> RepositoryResult<Credential<CredentialType>> {
            Ok(credential.clone())
        }

        async fn delete_credential(
            &self,
            _instance_id: Uuid,
            _credential_type: CredentialType,
            _username: &str,
        ) -> RepositoryResult<()> {
            Ok(())
        }
    }

    fn service(spy: Arc<RepositorySpy>) -> PublicCloudService {
        PublicCloudService::new(spy).with_poll_settings(PollSettings {
            interval: Duration::ZERO,
            attempts: 3,
        })
    }

    #[test]
    fn test_default_poll_settings() {
        let poll = PollSettings::default();
        assert_eq!(poll.interval, Duration::from_secs(10));
        assert_eq!(poll.attempts, 30);
        assert_eq!(poll.total(), Duration::from_secs(300));
    }

    #[tokio::test]
    async fn test_wait_for_instance_returns_matching_instance() {
        let spy = Arc::new(RepositorySpy::with_instances(vec![
            Ok(instance(State::Creating, false)),
            Ok(instance(State::Running, false)),
        ]));

        let instance = service(spy.clone())
            .wait_for_instance(uuid(INSTANCE_ID), InstanceProperty::State(State::Running))
            .await
            .unwrap();

        assert_eq!(instance.state, State::Running);
        assert_eq!(spy.calls(), vec!["get_instance", "get_instance"]);
    }

    #[tokio::test]
    async fn test_wait_for_instance_times_out() {
        let spy = Arc::new(RepositorySpy::default());

        let err = tokio_test::assert_err!(
            service(spy.clone())
                .wait_for_instance(uuid(INSTANCE_ID), InstanceProperty::State(State::Running))
                .await
        );

        assert!(matches!(err, ServiceError::WaitTimeout(_)));
        assert_eq!(spy.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_wait_for_instance_returns_first_error() {
        let spy = Arc::new(RepositorySpy::with_instances(vec![
            Ok(instance(State::Creating, false)),
            Err(server_error()),
        ]));

        let err = service(spy.clone())
            .wait_for_instance(uuid(INSTANCE_ID), InstanceProperty::State(State::Running))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Repository(_)));
        assert_eq!(spy.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_toggle_private_network_on() {
        let spy = Arc::new(RepositorySpy::with_instances(vec![
            Ok(instance(State::Running, false)),
            Ok(instance(State::Running, true)),
        ]));

        let instance = service(spy.clone())
            .toggle_private_network(uuid(INSTANCE_ID), true)
            .await
            .unwrap();

        assert!(instance.has_private_network);
        assert_eq!(
            spy.calls(),
            vec!["add_to_private_network", "get_instance", "get_instance"]
        );
    }

    #[tokio::test]
    async fn test_toggle_private_network_off() {
        let spy = Arc::new(RepositorySpy::with_instances(vec![Ok(instance(
            State::Running,
            false,
        ))]));

        tokio_test::assert_ok!(
            service(spy.clone())
                .toggle_private_network(uuid(INSTANCE_ID), false)
                .await
        );

        assert_eq!(spy.calls()[0], "remove_from_private_network");
    }

    #[tokio::test]
    async fn test_get_all_instances_enriches_auto_scaling_groups() {
        let grouped = Instance {
            auto_scaling_group_id: Some(uuid(GROUP_ID)),
            ..instance(State::Running, false)
        };
        let spy = Arc::new(RepositorySpy {
            all_instances: vec![
                grouped.clone(),
                grouped,
                instance(State::Running, false),
            ],
            ..Default::default()
        });

        let instances = service(spy.clone()).get_all_instances().await.unwrap();

        assert_eq!(instances[0].auto_scaling_group.as_ref().unwrap().id, uuid(GROUP_ID));
        assert!(instances[1].auto_scaling_group.is_some());
        assert!(instances[2].auto_scaling_group.is_none());
        assert_eq!(*spy.auto_scaling_group_calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_get_instance_enriches_auto_scaling_group() {
        let spy = Arc::new(RepositorySpy::with_instances(vec![Ok(Instance {
            auto_scaling_group_id: Some(uuid(GROUP_ID)),
            ..instance(State::Running, false)
        })]));

        let instance = service(spy).get_instance(uuid(INSTANCE_ID)).await.unwrap();
        assert_eq!(instance.auto_scaling_group.unwrap().region, "eu-west-3");
    }

    #[tokio::test]
    async fn test_get_load_balancers_sorted_by_id() {
        let ids = [
            "f3b1e5a6-0000-4000-8000-000000000003",
            "0a1b2c3d-0000-4000-8000-000000000001",
            "7c8d9e0f-0000-4000-8000-000000000002",
        ];
        let spy = Arc::new(RepositorySpy {
            load_balancers: ids
                .iter()
                .map(|id| LoadBalancer {
                    id: uuid(id),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        });

        let load_balancers = service(spy).get_load_balancers().await.unwrap();

        let sorted: Vec<String> = load_balancers.iter().map(|lb| lb.id.to_string()).collect();
        assert_eq!(sorted, vec![ids[1], ids[2], ids[0]]);
        assert!(load_balancers
            .iter()
            .all(|lb| lb.reference.as_deref() == Some("detailed")));
    }

    #[tokio::test]
    async fn test_get_load_balancers_fails_on_first_error() {
        let failing = uuid("0a1b2c3d-0000-4000-8000-000000000001");
        let spy = Arc::new(RepositorySpy {
            load_balancers: vec![
                LoadBalancer {
                    id: failing,
                    ..Default::default()
                },
                LoadBalancer {
                    id: uuid("7c8d9e0f-0000-4000-8000-000000000002"),
                    ..Default::default()
                },
            ],
            failing_load_balancer: Some(failing),
            ..Default::default()
        });

        let err = service(spy).get_load_balancers().await.unwrap_err();
        assert!(matches!(err, ServiceError::Repository(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_load_balancers_aborts_outstanding_fetches() {
        let failing = uuid("0a1b2c3d-0000-4000-8000-000000000001");
        let mut load_balancers: Vec<LoadBalancer> = [
            "7c8d9e0f-0000-4000-8000-000000000002",
            "f3b1e5a6-0000-4000-8000-000000000003",
            "5e6f7a8b-0000-4000-8000-000000000004",
        ]
        .iter()
        .map(|id| LoadBalancer {
            id: uuid(id),
            ..Default::default()
        })
        .collect();
        load_balancers.push(LoadBalancer {
            id: failing,
            ..Default::default()
        });

        let spy = Arc::new(RepositorySpy {
            load_balancers,
            failing_load_balancer: Some(failing),
            load_balancer_delay: Some(Duration::from_secs(60)),
            ..Default::default()
        });

        let err = tokio_test::assert_err!(service(spy.clone()).get_load_balancers().await);
        assert!(matches!(err, ServiceError::Repository(_)));

        // Long enough for every slow fetch to finish had it not been aborted.
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(spy.completed_load_balancers.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_lookup_lists() {
        let spy = Arc::new(RepositorySpy::default());
        let service = service(spy);

        assert_eq!(service.get_regions().await.unwrap(), vec!["eu-west-3"]);
        assert_eq!(
            service
                .get_available_instance_types_for_update(uuid(INSTANCE_ID))
                .await
                .unwrap(),
            vec!["lsw.m4.large"]
        );
    }
}
