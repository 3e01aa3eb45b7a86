//! Wire DTOs for the Leaseweb API.
//!
//! Response types default every missing field so partial list items and
//! detail responses share one struct. Enum-like values stay plain strings;
//! the domain layer parses them.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Pagination metadata (`_metadata`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metadata {
    pub total_count: i64,
    pub limit: i64,
    pub offset: i64,
}

/// A paginated list response.
pub trait Page: DeserializeOwned {
    type Item;

    fn into_parts(self) -> (Vec<Self::Item>, Metadata);
}

macro_rules! page {
    ($name:ident, $field:ident, $rename:literal, $item:ty) => {
        #[derive(Debug, Clone, Default, Deserialize)]
        #[serde(default)]
        pub struct $name {
            #[serde(rename = $rename)]
            pub $field: Vec<$item>,
            #[serde(rename = "_metadata")]
            pub metadata: Metadata,
        }

        impl Page for $name {
            type Item = $item;

            fn into_parts(self) -> (Vec<$item>, Metadata) {
                (self.$field, self.metadata)
            }
        }
    };
}

page!(InstanceList, instances, "instances", Instance);
page!(LoadBalancerList, load_balancers, "loadBalancers", LoadBalancer);
page!(InstanceTypeList, instance_types, "instanceTypes", InstanceType);
page!(RegionList, regions, "regions", Region);

// =============================================================================
// Public cloud responses
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Instance {
    pub id: String,
    pub r#type: String,
    pub resources: Resources,
    pub region: String,
    pub reference: Option<String>,
    pub image: Image,
    pub state: String,
    pub product_type: String,
    pub has_public_ip_v4: bool,
    pub includes_private_network: bool,
    pub has_private_network: bool,
    pub root_disk_size: i64,
    pub root_disk_storage_type: String,
    pub started_at: Option<DateTime<Utc>>,
    pub contract: Contract,
    pub ips: Vec<Ip>,
    pub iso: Option<Iso>,
    pub market_app_id: Option<String>,
    pub private_network: Option<PrivateNetwork>,
    pub auto_scaling_group: Option<AutoScalingGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Resources {
    pub cpu: Cpu,
    pub memory: Memory,
    pub public_network_speed: NetworkSpeed,
    pub private_network_speed: NetworkSpeed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Cpu {
    pub value: i64,
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Memory {
    pub value: f64,
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NetworkSpeed {
    pub value: i64,
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Image {
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

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contract {
    pub billing_frequency: i64,
    pub term: i64,
    pub r#type: String,
    pub ends_at: Option<DateTime<Utc>>,
    pub renewals_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub state: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ip {
    pub ip: String,
    pub prefix_length: String,
    pub version: i64,
    pub null_routed: bool,
    pub main_ip: bool,
    pub network_type: String,
    pub reverse_lookup: Option<String>,
    pub ddos: Option<Ddos>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ddos {
    pub detection_profile: String,
    pub protection_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Iso {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrivateNetwork {
    pub private_network_id: String,
    pub status: String,
    pub subnet: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutoScalingGroup {
    pub id: String,
    pub r#type: String,
    pub state: String,
    pub desired_amount: Option<i64>,
    pub region: String,
    pub reference: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub minimum_amount: Option<i64>,
    pub maximum_amount: Option<i64>,
    pub cpu_threshold: Option<i64>,
    pub warmup_time: Option<i64>,
    pub cooldown_time: Option<i64>,
    pub load_balancer: Option<LoadBalancer>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoadBalancer {
    pub id: String,
    pub r#type: String,
    pub resources: Resources,
    pub region: String,
    pub reference: Option<String>,
    pub state: String,
    pub contract: Contract,
    pub started_at: Option<DateTime<Utc>>,
    pub ips: Vec<Ip>,
    pub configuration: Option<LoadBalancerConfiguration>,
    pub private_network: Option<PrivateNetwork>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoadBalancerConfiguration {
    pub sticky_session: Option<StickySession>,
    pub balance: String,
    pub health_check: Option<HealthCheck>,
    pub x_forwarded_for: bool,
    pub idle_time_out: i64,
    pub target_port: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StickySession {
    pub enabled: bool,
    pub max_life_time: i64,
}

/// Health check as returned for load balancer configurations and target groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HealthCheck {
    pub protocol: Option<String>,
    pub method: Option<String>,
    pub uri: String,
    pub host: Option<String>,
    pub port: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TargetGroup {
    pub id: String,
    pub name: String,
    pub protocol: String,
    pub port: i64,
    pub region: String,
    pub health_check: Option<HealthCheck>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InstanceType {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Region {
    pub name: String,
    pub location: String,
}

/// Credential of a public cloud instance or a dedicated server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Credential {
    pub r#type: String,
    pub username: String,
    pub password: String,
}

// =============================================================================
// Dedicated server responses
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BandwidthNotificationSetting {
    pub id: String,
    pub frequency: String,
    pub threshold: String,
    pub unit: String,
    pub last_checked_at: Option<DateTime<Utc>>,
    pub threshold_exceeded_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Request bodies
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchInstanceOpts {
    pub region: String,
    pub r#type: String,
    pub image_id: String,
    pub contract_type: String,
    pub contract_term: i64,
    pub billing_frequency: i64,
    pub root_disk_storage_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_app_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_disk_size: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInstanceOpts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_term: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_frequency: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_disk_size: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminateOpts {
    pub reason_code: String,
    pub reason: String,
}

impl Default for TerminateOpts {
    fn default() -> Self {
        Self {
            reason_code: "CANCEL_OTHER".to_string(),
            reason: "Terraform".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchLoadBalancerOpts {
    pub region: String,
    pub r#type: String,
    pub contract_type: String,
    pub contract_term: i64,
    pub billing_frequency: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLoadBalancerOpts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckOpts {
    pub protocol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    pub port: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTargetGroupOpts {
    pub name: String,
    pub protocol: String,
    pub port: i64,
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check: Option<HealthCheckOpts>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTargetGroupOpts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check: Option<HealthCheckOpts>,
}

/// Body for storing a credential on an instance or a dedicated server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CredentialOpts {
    pub r#type: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateCredentialOpts {
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BandwidthNotificationSettingOpts {
    pub frequency: String,
    pub threshold: String,
    pub unit: String,
}
