//! Terraform models.
//!
//! A model is the JSON object Terraform stores for a resource or data source:
//! attribute names as keys, `null` for values that are unset or not yet
//! known. Resources deserialize plans and state into these structs and
//! serialize them back after talking to the API. The `From` impls adapt
//! domain entities into models.

use chrono::{DateTime, SecondsFormat, Utc};

mod dedicated_server;
mod instances;
mod load_balancers;
mod public_cloud;

pub use dedicated_server::{
    DedicatedServerCredentialResourceModel, NotificationSettingBandwidthResourceModel,
};
pub use instances::{
    AutoScalingGroupModel, ContractDetailsModel, CpuModel, DdosModel, HealthCheckModel,
    ImageModel, InstanceModel, InstancesDataSourceModel, IpModel, LoadBalancerConfigurationModel,
    LoadBalancerModel, MemoryModel, NetworkSpeedModel, PrivateNetworkModel, ResourcesModel,
    StickySessionModel,
};
pub use load_balancers::{LoadBalancerIpModel, LoadBalancerListItemModel, LoadBalancersDataSourceModel};
pub use public_cloud::{
    ContractModel, CredentialResourceModel, ImageResourceModel, InstanceResourceModel,
    IpResourceModel, IsoModel, LoadBalancerResourceModel, TargetGroupHealthCheckModel,
    TargetGroupResourceModel,
};

/// Timestamps are stored as RFC 3339 strings in UTC.
pub(crate) fn format_time(time: Option<DateTime<Utc>>) -> Option<String> {
    time.map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
}
