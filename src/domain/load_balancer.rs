use chrono::{DateTime, Utc};

use super::{
    Balance, BillingFrequency, Contract, ContractTerm, ContractType, DomainError, HttpMethod, Ip,
    PrivateNetwork, Protocol, Resources, State, Uuid,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StickySession {
    pub enabled: bool,
    pub max_life_time: i64,
}

/// Health check of a load balancer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HealthCheck {
    pub method: Option<HttpMethod>,
    pub uri: String,
    pub host: Option<String>,
    pub port: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadBalancerConfiguration {
    pub balance: Balance,
    pub x_forwarded_for: bool,
    pub idle_timeout: i64,
    pub target_port: i64,
    pub sticky_session: Option<StickySession>,
    pub health_check: Option<HealthCheck>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadBalancer {
    pub id: Uuid,
    pub load_balancer_type: String,
    pub resources: Resources,
    pub region: String,
    pub reference: Option<String>,
    pub state: State,
    pub contract: Contract,
    pub started_at: Option<DateTime<Utc>>,
    pub ips: Vec<Ip>,
    pub configuration: Option<LoadBalancerConfiguration>,
    pub private_network: Option<PrivateNetwork>,
}

#[derive(Debug, Clone, Default)]
pub struct OptionalLoadBalancerValues {
    pub reference: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub configuration: Option<LoadBalancerConfiguration>,
    pub private_network: Option<PrivateNetwork>,
}

impl LoadBalancer {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Uuid,
        load_balancer_type: impl Into<String>,
        resources: Resources,
        region: impl Into<String>,
        state: State,
        contract: Contract,
        ips: Vec<Ip>,
        optional: OptionalLoadBalancerValues,
    ) -> Self {
        Self {
            id,
            load_balancer_type: load_balancer_type.into(),
            resources,
            region: region.into(),
            reference: optional.reference,
            state,
            contract,
            started_at: optional.started_at,
            ips,
            configuration: optional.configuration,
            private_network: optional.private_network,
        }
    }

    /// A load balancer holding only the fields accepted by the launch call.
    pub fn new_create(
        region: impl Into<String>,
        load_balancer_type: &str,
        contract_type: ContractType,
        contract_term: ContractTerm,
        billing_frequency: BillingFrequency,
        reference: Option<String>,
        allowed_types: &[&str],
    ) -> Result<Self, DomainError> {
        if !allowed_types.contains(&load_balancer_type) {
            return Err(DomainError::InstanceTypeNotAllowed(
                load_balancer_type.to_string(),
            ));
        }

        Ok(Self {
            region: region.into(),
            load_balancer_type: load_balancer_type.to_string(),
            reference,
            contract: Contract {
                contract_type,
                term: contract_term,
                billing_frequency,
                ..Default::default()
            },
            ..Default::default()
        })
    }
}

/// Health check of a target group; the method only applies to HTTP(S).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TargetGroupHealthCheck {
    pub protocol: Protocol,
    pub method: Option<HttpMethod>,
    pub uri: String,
    pub host: Option<String>,
    pub port: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TargetGroup {
    pub id: Uuid,
    pub name: String,
    pub protocol: Protocol,
    pub port: i64,
    pub region: String,
    pub health_check: Option<TargetGroupHealthCheck>,
}
