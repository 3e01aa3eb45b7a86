use serde::{Deserialize, Serialize};

use super::{format_time, IsoModel};
use crate::domain::{
    AutoScalingGroup, Contract, Cpu, Ddos, HealthCheck, Image, Instance, Ip, LoadBalancer,
    LoadBalancerConfiguration, Memory, NetworkSpeed, PrivateNetwork, Resources, StickySession,
};

/// State of the `leaseweb_public_cloud_instances` data source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstancesDataSourceModel {
    pub instances: Vec<InstanceModel>,
}

impl InstancesDataSourceModel {
    pub fn new(instances: &[Instance]) -> Self {
        Self {
            instances: instances.iter().map(InstanceModel::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstanceModel {
    pub id: String,
    pub region: String,
    pub reference: Option<String>,
    pub resources: ResourcesModel,
    pub image: ImageModel,
    pub state: String,
    pub product_type: String,
    pub has_public_ipv4: bool,
    pub has_private_network: bool,
    #[serde(rename = "type")]
    pub instance_type: String,
    pub root_disk_size: Option<i64>,
    pub root_disk_storage_type: String,
    pub ips: Vec<IpModel>,
    pub started_at: Option<String>,
    pub contract: ContractDetailsModel,
    pub iso: Option<IsoModel>,
    pub market_app_id: Option<String>,
    pub private_network: Option<PrivateNetworkModel>,
    pub auto_scaling_group: Option<AutoScalingGroupModel>,
}

impl From<&Instance> for InstanceModel {
    fn from(instance: &Instance) -> Self {
        Self {
            id: instance.id.to_string(),
            region: instance.region.clone(),
            reference: instance.reference.clone(),
            resources: ResourcesModel::from(&instance.resources),
            image: ImageModel::from(&instance.image),
            state: instance.state.to_string(),
            product_type: instance.product_type.clone(),
            has_public_ipv4: instance.has_public_ipv4,
            has_private_network: instance.has_private_network,
            instance_type: instance.instance_type.clone(),
            root_disk_size: instance.root_disk_size.map(|size| size.value()),
            root_disk_storage_type: instance.root_disk_storage_type.to_string(),
            ips: instance.ips.iter().map(IpModel::from).collect(),
            started_at: format_time(instance.started_at),
            contract: ContractDetailsModel::from(&instance.contract),
            iso: instance.iso.as_ref().map(IsoModel::from),
            market_app_id: instance.market_app_id.clone(),
            private_network: instance
                .private_network
                .as_ref()
                .map(PrivateNetworkModel::from),
            auto_scaling_group: instance
                .auto_scaling_group
                .as_ref()
                .map(AutoScalingGroupModel::from),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuModel {
    pub value: i64,
    pub unit: String,
}

impl From<&Cpu> for CpuModel {
    fn from(cpu: &Cpu) -> Self {
        Self {
            value: cpu.value,
            unit: cpu.unit.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryModel {
    pub value: f64,
    pub unit: String,
}

impl From<&Memory> for MemoryModel {
    fn from(memory: &Memory) -> Self {
        Self {
            value: memory.value,
            unit: memory.unit.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpeedModel {
    pub value: i64,
    pub unit: String,
}

impl From<&NetworkSpeed> for NetworkSpeedModel {
    fn from(speed: &NetworkSpeed) -> Self {
        Self {
            value: speed.value,
            unit: speed.unit.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourcesModel {
    pub cpu: CpuModel,
    pub memory: MemoryModel,
    pub public_network_speed: NetworkSpeedModel,
    pub private_network_speed: NetworkSpeedModel,
}

impl From<&Resources> for ResourcesModel {
    fn from(resources: &Resources) -> Self {
        Self {
            cpu: CpuModel::from(&resources.cpu),
            memory: MemoryModel::from(&resources.memory),
            public_network_speed: NetworkSpeedModel::from(&resources.public_network_speed),
            private_network_speed: NetworkSpeedModel::from(&resources.private_network_speed),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageModel {
    pub id: String,
    pub name: String,
    pub version: Option<String>,
    pub family: String,
    pub flavour: String,
    pub architecture: Option<String>,
    pub custom: bool,
    pub state: Option<String>,
    pub region: Option<String>,
    pub market_apps: Vec<String>,
    pub storage_types: Vec<String>,
}

impl From<&Image> for ImageModel {
    fn from(image: &Image) -> Self {
        Self {
            id: image.id.clone(),
            name: image.name.clone(),
            version: image.version.clone(),
            family: image.family.clone(),
            flavour: image.flavour.clone(),
            architecture: image.architecture.clone(),
            custom: image.custom,
            state: image.state.clone(),
            region: image.region.clone(),
            market_apps: image.market_apps.clone(),
            storage_types: image.storage_types.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DdosModel {
    pub detection_profile: String,
    pub protection_type: String,
}

impl From<&Ddos> for DdosModel {
    fn from(ddos: &Ddos) -> Self {
        Self {
            detection_profile: ddos.detection_profile.clone(),
            protection_type: ddos.protection_type.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IpModel {
    pub ip: String,
    pub prefix_length: String,
    pub version: i64,
    pub null_routed: bool,
    pub main_ip: bool,
    pub network_type: String,
    pub reverse_lookup: Option<String>,
    pub ddos: Option<DdosModel>,
}

impl From<&Ip> for IpModel {
    fn from(ip: &Ip) -> Self {
        Self {
            ip: ip.ip.clone(),
            prefix_length: ip.prefix_length.clone(),
            version: ip.version,
            null_routed: ip.null_routed,
            main_ip: ip.main_ip,
            network_type: ip.network_type.to_string(),
            reverse_lookup: ip.reverse_lookup.clone(),
            ddos: ip.ddos.as_ref().map(DdosModel::from),
        }
    }
}

/// Contract with every date the API reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractDetailsModel {
    pub billing_frequency: i64,
    pub term: i64,
    #[serde(rename = "type")]
    pub contract_type: String,
    pub ends_at: Option<String>,
    pub renewals_at: Option<String>,
    pub created_at: Option<String>,
    pub state: String,
}

impl From<&Contract> for ContractDetailsModel {
    fn from(contract: &Contract) -> Self {
        Self {
            billing_frequency: contract.billing_frequency.value(),
            term: contract.term.value(),
            contract_type: contract.contract_type.to_string(),
            ends_at: format_time(contract.ends_at),
            renewals_at: format_time(contract.renewals_at),
            created_at: format_time(contract.created_at),
            state: contract.state.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrivateNetworkModel {
    pub id: String,
    pub status: String,
    pub subnet: String,
}

impl From<&PrivateNetwork> for PrivateNetworkModel {
    fn from(network: &PrivateNetwork) -> Self {
        Self {
            id: network.id.clone(),
            status: network.status.clone(),
            subnet: network.subnet.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StickySessionModel {
    pub enabled: bool,
    pub max_life_time: i64,
}

impl From<&StickySession> for StickySessionModel {
    fn from(session: &StickySession) -> Self {
        Self {
            enabled: session.enabled,
            max_life_time: session.max_life_time,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthCheckModel {
    pub method: Option<String>,
    pub uri: String,
    pub host: Option<String>,
    pub port: i64,
}

impl From<&HealthCheck> for HealthCheckModel {
    fn from(health_check: &HealthCheck) -> Self {
        Self {
            method: health_check.method.map(|m| m.to_string()),
            uri: health_check.uri.clone(),
            host: health_check.host.clone(),
            port: health_check.port,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerConfigurationModel {
    pub balance: String,
    pub health_check: Option<HealthCheckModel>,
    pub sticky_session: Option<StickySessionModel>,
    pub x_forwarded_for: bool,
    pub idle_timeout: i64,
    pub target_port: i64,
}

impl From<&LoadBalancerConfiguration> for LoadBalancerConfigurationModel {
    fn from(configuration: &LoadBalancerConfiguration) -> Self {
        Self {
            balance: configuration.balance.to_string(),
            health_check: configuration
                .health_check
                .as_ref()
                .map(HealthCheckModel::from),
            sticky_session: configuration
                .sticky_session
                .as_ref()
                .map(StickySessionModel::from),
            x_forwarded_for: configuration.x_forwarded_for,
            idle_timeout: configuration.idle_timeout,
            target_port: configuration.target_port,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerModel {
    pub id: String,
    #[serde(rename = "type")]
    pub load_balancer_type: String,
    pub resources: ResourcesModel,
    pub region: String,
    pub reference: Option<String>,
    pub state: String,
    pub contract: ContractDetailsModel,
    pub started_at: Option<String>,
    pub ips: Vec<IpModel>,
    pub load_balancer_configuration: Option<LoadBalancerConfigurationModel>,
    pub private_network: Option<PrivateNetworkModel>,
}

impl From<&LoadBalancer> for LoadBalancerModel {
    fn from(load_balancer: &LoadBalancer) -> Self {
        Self {
            id: load_balancer.id.to_string(),
            load_balancer_type: load_balancer.load_balancer_type.clone(),
            resources: ResourcesModel::from(&load_balancer.resources),
            region: load_balancer.region.clone(),
            reference: load_balancer.reference.clone(),
            state: load_balancer.state.to_string(),
            contract: ContractDetailsModel::from(&load_balancer.contract),
            started_at: format_time(load_balancer.started_at),
            ips: load_balancer.ips.iter().map(IpModel::from).collect(),
            load_balancer_configuration: load_balancer
                .configuration
                .as_ref()
                .map(LoadBalancerConfigurationModel::from),
            private_network: load_balancer
                .private_network
                .as_ref()
                .map(PrivateNetworkModel::from),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoScalingGroupModel {
    pub id: String,
    #[serde(rename = "type")]
    pub group_type: String,
    pub state: String,
    pub desired_amount: Option<i64>,
    pub region: String,
    pub reference: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub starts_at: Option<String>,
    pub ends_at: Option<String>,
    pub minimum_amount: Option<i64>,
    pub maximum_amount: Option<i64>,
    pub cpu_threshold: Option<i64>,
    pub warmup_time: Option<i64>,
    pub cooldown_time: Option<i64>,
    pub load_balancer: Option<LoadBalancerModel>,
}

impl From<&AutoScalingGroup> for AutoScalingGroupModel {
    fn from(group: &AutoScalingGroup) -> Self {
        Self {
            id: group.id.to_string(),
            group_type: group.group_type.to_string(),
            state: group.state.to_string(),
            desired_amount: group.desired_amount,
            region: group.region.clone(),
            reference: group.reference.to_string(),
            created_at: format_time(group.created_at),
            updated_at: format_time(group.updated_at),
            starts_at: format_time(group.starts_at),
            ends_at: format_time(group.ends_at),
            minimum_amount: group.minimum_amount,
            maximum_amount: group.maximum_amount,
            cpu_threshold: group.cpu_threshold,
            warmup_time: group.warmup_time,
            cooldown_time: group.cooldown_time,
            load_balancer: group.load_balancer.as_ref().map(LoadBalancerModel::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        AutoScalingGroupReference, AutoScalingGroupType, Balance, HttpMethod, NetworkType, Uuid,
    };

    #[test]
    fn test_ip_model_with_ddos() {
        let ip = Ip {
            ip: "1.2.3.4".to_string(),
            prefix_length: "32".to_string(),
            version: 4,
            main_ip: true,
            network_type: NetworkType::Public,
            ddos: Some(Ddos {
                detection_profile: "ADVANCED_DEFAULT".to_string(),
                protection_type: "ADVANCED".to_string(),
            }),
            ..Default::default()
        };

        let model = IpModel::from(&ip);
        assert_eq!(model.network_type, "PUBLIC");
        assert_eq!(model.ddos.unwrap().protection_type, "ADVANCED");
    }

    #[test]
    fn test_resources_model() {
        let resources = Resources {
            cpu: Cpu {
                value: 1,
                unit: "vCPU".to_string(),
            },
            memory: Memory {
                value: 2.5,
                unit: "GiB".to_string(),
            },
            ..Default::default()
        };

        let model = ResourcesModel::from(&resources);
        assert_eq!(model.cpu.unit, "vCPU");
        assert_eq!(model.memory.value, 2.5);
    }

    #[test]
    fn test_auto_scaling_group_with_load_balancer() {
        let group = AutoScalingGroup {
            id: Uuid::new("90b9f2cc-c655-40ea-b01a-58c00e175c96").unwrap(),
            group_type: AutoScalingGroupType::CpuBased,
            reference: AutoScalingGroupReference::new("web").unwrap(),
            load_balancer: Some(LoadBalancer {
                configuration: Some(LoadBalancerConfiguration {
                    balance: Balance::Source,
                    idle_timeout: 5,
                    health_check: Some(HealthCheck {
                        method: Some(HttpMethod::Get),
                        uri: "uri".to_string(),
                        host: Some("host".to_string()),
                        port: 22,
                    }),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        };

        let model = AutoScalingGroupModel::from(&group);
        assert_eq!(model.group_type, "CPU_BASED");
        assert_eq!(model.reference, "web");

        let configuration = model
            .load_balancer
            .unwrap()
            .load_balancer_configuration
            .unwrap();
        assert_eq!(configuration.balance, "source");
        assert_eq!(configuration.idle_timeout, 5);
        assert_eq!(configuration.health_check.unwrap().port, 22);
    }

    #[test]
    fn test_instances_data_source_model_serializes_type() {
        let model = InstancesDataSourceModel::new(&[Instance {
            instance_type: "lsw.m3.large".to_string(),
            ..Default::default()
        }]);

        let value = serde_json::to_value(&model).unwrap();
        assert_eq!(value["instances"][0]["type"], "lsw.m3.large");
        assert!(value["instances"][0]["auto_scaling_group"].is_null());
    }
}
