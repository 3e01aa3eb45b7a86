use serde::{Deserialize, Serialize};

use super::format_time;
use crate::domain::{
    Contract, Credential, CredentialType, Image, Instance, Ip, Iso, LoadBalancer, TargetGroup,
    TargetGroupHealthCheck,
};

/// Contract as configured on instances and load balancers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractModel {
    pub billing_frequency: i64,
    pub term: i64,
    #[serde(rename = "type")]
    pub contract_type: String,
    #[serde(default)]
    pub ends_at: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

impl From<&Contract> for ContractModel {
    fn from(contract: &Contract) -> Self {
        Self {
            billing_frequency: contract.billing_frequency.value(),
            term: contract.term.value(),
            contract_type: contract.contract_type.to_string(),
            ends_at: format_time(contract.ends_at),
            state: Some(contract.state.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageResourceModel {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub custom: Option<bool>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub market_apps: Option<Vec<String>>,
    #[serde(default)]
    pub storage_types: Option<Vec<String>>,
    #[serde(default)]
    pub flavour: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

impl From<&Image> for ImageResourceModel {
    fn from(image: &Image) -> Self {
        Self {
            id: image.id.clone(),
            name: Some(image.name.clone()),
            custom: Some(image.custom),
            state: image.state.clone(),
            market_apps: Some(image.market_apps.clone()),
            storage_types: Some(image.storage_types.clone()),
            flavour: Some(image.flavour.clone()),
            region: image.region.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IsoModel {
    pub id: String,
    pub name: String,
}

impl From<&Iso> for IsoModel {
    fn from(iso: &Iso) -> Self {
        Self {
            id: iso.id.clone(),
            name: iso.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IpResourceModel {
    pub ip: String,
    #[serde(default)]
    pub reverse_lookup: Option<String>,
}

impl From<&Ip> for IpResourceModel {
    fn from(ip: &Ip) -> Self {
        Self {
            ip: ip.ip.clone(),
            reverse_lookup: ip.reverse_lookup.clone(),
        }
    }
}

/// State of `leaseweb_public_cloud_instance`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstanceResourceModel {
    #[serde(default)]
    pub id: Option<String>,
    pub region: String,
    #[serde(default)]
    pub reference: Option<String>,
    pub image: ImageResourceModel,
    #[serde(default)]
    pub iso: Option<IsoModel>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(rename = "type")]
    pub instance_type: String,
    #[serde(default)]
    pub root_disk_size: Option<i64>,
    pub root_disk_storage_type: String,
    #[serde(default)]
    pub ips: Option<Vec<IpResourceModel>>,
    pub contract: ContractModel,
    #[serde(default)]
    pub market_app_id: Option<String>,
    #[serde(default)]
    pub has_private_network: Option<bool>,
}

impl From<&Instance> for InstanceResourceModel {
    fn from(instance: &Instance) -> Self {
        Self {
            id: Some(instance.id.to_string()),
            region: instance.region.clone(),
            reference: instance.reference.clone(),
            image: ImageResourceModel::from(&instance.image),
            iso: instance.iso.as_ref().map(IsoModel::from),
            state: Some(instance.state.to_string()),
            instance_type: instance.instance_type.clone(),
            root_disk_size: instance.root_disk_size.map(|size| size.value()),
            root_disk_storage_type: instance.root_disk_storage_type.to_string(),
            ips: Some(instance.ips.iter().map(IpResourceModel::from).collect()),
            contract: ContractModel::from(&instance.contract),
            market_app_id: instance.market_app_id.clone(),
            has_private_network: Some(instance.has_private_network),
        }
    }
}

/// State of `leaseweb_public_cloud_load_balancer`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerResourceModel {
    #[serde(default)]
    pub id: Option<String>,
    pub region: String,
    #[serde(rename = "type")]
    pub load_balancer_type: String,
    #[serde(default)]
    pub reference: Option<String>,
    pub contract: ContractModel,
}

impl From<&LoadBalancer> for LoadBalancerResourceModel {
    fn from(load_balancer: &LoadBalancer) -> Self {
        Self {
            id: Some(load_balancer.id.to_string()),
            region: load_balancer.region.clone(),
            load_balancer_type: load_balancer.load_balancer_type.clone(),
            reference: load_balancer.reference.clone(),
            contract: ContractModel::from(&load_balancer.contract),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetGroupHealthCheckModel {
    pub protocol: String,
    #[serde(default)]
    pub method: Option<String>,
    pub uri: String,
    #[serde(default)]
    pub host: Option<String>,
    pub port: i64,
}

impl From<&TargetGroupHealthCheck> for TargetGroupHealthCheckModel {
    fn from(health_check: &TargetGroupHealthCheck) -> Self {
        Self {
            protocol: health_check.protocol.to_string(),
            method: health_check.method.map(|m| m.to_string()),
            uri: health_check.uri.clone(),
            host: health_check.host.clone(),
            port: health_check.port,
        }
    }
}

/// State of `leaseweb_public_cloud_target_group`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetGroupResourceModel {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub protocol: String,
    pub port: i64,
    pub region: String,
    #[serde(default)]
    pub health_check: Option<TargetGroupHealthCheckModel>,
}

impl From<&TargetGroup> for TargetGroupResourceModel {
    fn from(target_group: &TargetGroup) -> Self {
        Self {
            id: Some(target_group.id.to_string()),
            name: target_group.name.clone(),
            protocol: target_group.protocol.to_string(),
            port: target_group.port,
            region: target_group.region.clone(),
            health_check: target_group
                .health_check
                .as_ref()
                .map(TargetGroupHealthCheckModel::from),
        }
    }
}

/// State of `leaseweb_public_cloud_credential`.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CredentialResourceModel {
    pub instance_id: String,
    pub username: String,
    #[serde(rename = "type")]
    pub credential_type: String,
    pub password: String,
}

impl std::fmt::Debug for CredentialResourceModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialResourceModel")
            .field("instance_id", &self.instance_id)
            .field("username", &self.username)
            .field("credential_type", &self.credential_type)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl CredentialResourceModel {
    /// The API does not echo the instance id, so it is carried over.
    pub fn new(instance_id: impl Into<String>, credential: &Credential<CredentialType>) -> Self {
        Self {
            instance_id: instance_id.into(),
            username: credential.username.clone(),
            credential_type: credential.credential_type.to_string(),
            password: credential.password.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::*;
    use crate::domain::{
        BillingFrequency, ContractState, ContractTerm, ContractType, HttpMethod, Protocol,
        RootDiskSize, State, StorageType, Uuid,
    };

    const INSTANCE_ID: &str = "ace712e9-a166-47f1-9065-4af0f7e7fce1";

    fn contract() -> Contract {
        Contract {
            billing_frequency: BillingFrequency::One,
            term: ContractTerm::Three,
            contract_type: ContractType::Monthly,
            ends_at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()),
            state: ContractState::Active,
            ..Default::default()
        }
    }

    #[test]
    fn test_contract_model() {
        let model = ContractModel::from(&contract());
        assert_eq!(model.billing_frequency, 1);
        assert_eq!(model.term, 3);
        assert_eq!(model.contract_type, "MONTHLY");
        assert_eq!(model.ends_at.as_deref(), Some("2024-03-01T00:00:00Z"));
        assert_eq!(model.state.as_deref(), Some("ACTIVE"));
    }

    #[test]
    fn test_instance_model() {
        let instance = Instance {
            id: Uuid::new(INSTANCE_ID).unwrap(),
            region: "eu-west-3".to_string(),
            reference: Some("my webserver".to_string()),
            image: Image {
                id: "UBUNTU_20_04_64BIT".to_string(),
                name: "Ubuntu 20.04 LTS (x86_64)".to_string(),
                flavour: "ubuntu".to_string(),
                ..Default::default()
            },
            state: State::Running,
            instance_type: "lsw.m3.large".to_string(),
            root_disk_size: Some(RootDiskSize::new(55).unwrap()),
            root_disk_storage_type: StorageType::Central,
            ips: vec![Ip {
                ip: "10.32.60.12".to_string(),
                reverse_lookup: Some("example.com".to_string()),
                ..Default::default()
            }],
            contract: contract(),
            has_private_network: true,
            ..Default::default()
        };

        let model = InstanceResourceModel::from(&instance);

        assert_eq!(model.id.as_deref(), Some(INSTANCE_ID));
        assert_eq!(model.image.id, "UBUNTU_20_04_64BIT");
        assert_eq!(model.image.flavour.as_deref(), Some("ubuntu"));
        assert_eq!(model.state.as_deref(), Some("RUNNING"));
        assert_eq!(model.root_disk_size, Some(55));
        assert_eq!(model.root_disk_storage_type, "CENTRAL");
        assert_eq!(model.ips.as_ref().unwrap()[0].ip, "10.32.60.12");
        assert_eq!(model.has_private_network, Some(true));
        assert!(model.iso.is_none());
    }

    #[test]
    fn test_instance_model_from_plan() {
        let plan = json!({
            "id": null,
            "region": "eu-west-3",
            "type": "lsw.m3.large",
            "reference": "my webserver",
            "image": {"id": "UBUNTU_20_04_64BIT", "name": null},
            "root_disk_storage_type": "CENTRAL",
            "contract": {"billing_frequency": 1, "term": 0, "type": "HOURLY", "ends_at": null, "state": null},
            "has_private_network": null
        });

        let model: InstanceResourceModel = serde_json::from_value(plan).unwrap();
        assert_eq!(model.instance_type, "lsw.m3.large");
        assert_eq!(model.contract.contract_type, "HOURLY");
        assert!(model.id.is_none());
        assert!(model.has_private_network.is_none());

        let state = serde_json::to_value(&model).unwrap();
        assert_eq!(state["type"], "lsw.m3.large");
        assert_eq!(state["contract"]["type"], "HOURLY");
    }

    #[test]
    fn test_target_group_model() {
        let target_group = TargetGroup {
            id: Uuid::new(INSTANCE_ID).unwrap(),
            name: "name".to_string(),
            protocol: Protocol::Http,
            port: 80,
            region: "eu-west-3".to_string(),
            health_check: Some(TargetGroupHealthCheck {
                protocol: Protocol::Http,
                method: Some(HttpMethod::Get),
                uri: "/".to_string(),
                host: None,
                port: 80,
            }),
        };

        let model = TargetGroupResourceModel::from(&target_group);
        let health_check = model.health_check.unwrap();
        assert_eq!(model.protocol, "HTTP");
        assert_eq!(health_check.method.as_deref(), Some("GET"));
        assert!(health_check.host.is_none());
    }

    #[test]
    fn test_credential_model_keeps_instance_id() {
        let credential = Credential {
            credential_type: CredentialType::OperatingSystem,
            username: "root".to_string(),
            password: "hunter2".to_string(),
        };

        let model = CredentialResourceModel::new(INSTANCE_ID, &credential);
        assert_eq!(model.instance_id, INSTANCE_ID);
        assert_eq!(model.credential_type, "OPERATING_SYSTEM");
        assert!(!format!("{:?}", model).contains("hunter2"));
    }
}
