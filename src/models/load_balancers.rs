use serde::{Deserialize, Serialize};

use super::ContractModel;
use crate::domain::LoadBalancer;

/// State of the `leaseweb_public_cloud_load_balancers` data source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancersDataSourceModel {
    pub load_balancers: Vec<LoadBalancerListItemModel>,
}

impl LoadBalancersDataSourceModel {
    pub fn new(load_balancers: &[LoadBalancer]) -> Self {
        Self {
            load_balancers: load_balancers
                .iter()
                .map(LoadBalancerListItemModel::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerIpModel {
    pub ip: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerListItemModel {
    pub id: String,
    pub ips: Vec<LoadBalancerIpModel>,
    pub reference: Option<String>,
    pub contract: ContractModel,
    pub state: String,
    pub region: String,
    #[serde(rename = "type")]
    pub load_balancer_type: String,
}

impl From<&LoadBalancer> for LoadBalancerListItemModel {
    fn from(load_balancer: &LoadBalancer) -> Self {
        Self {
            id: load_balancer.id.to_string(),
            ips: load_balancer
                .ips
                .iter()
                .map(|ip| LoadBalancerIpModel { ip: ip.ip.clone() })
                .collect(),
            reference: load_balancer.reference.clone(),
            contract: ContractModel::from(&load_balancer.contract),
            state: load_balancer.state.to_string(),
            region: load_balancer.region.clone(),
            load_balancer_type: load_balancer.load_balancer_type.clone(),
        }
    }
}
