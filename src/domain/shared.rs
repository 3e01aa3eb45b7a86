//! Values shared by instances and load balancers.

use chrono::{DateTime, Utc};

use super::{BillingFrequency, ContractState, ContractTerm, ContractType, DomainError, NetworkType};

/// Regions the public cloud API accepts.
pub const REGIONS: &[&str] = &[
    "eu-west-3",
    "eu-central-1",
    "eu-west-2",
    "us-east-1",
    "us-west-1",
    "ca-central-1",
    "ap-southeast-1",
    "ap-northeast-1",
];

/// Instance and load balancer types the public cloud API accepts.
pub const INSTANCE_TYPES: &[&str] = &[
    "lsw.m3.large",
    "lsw.m3.xlarge",
    "lsw.m3.2xlarge",
    "lsw.m4.large",
    "lsw.m4.xlarge",
    "lsw.m4.2xlarge",
    "lsw.m4.4xlarge",
    "lsw.m5.large",
    "lsw.m5.xlarge",
    "lsw.m5.2xlarge",
    "lsw.m5a.large",
    "lsw.m5a.xlarge",
    "lsw.m5a.2xlarge",
    "lsw.m5a.4xlarge",
    "lsw.m5a.8xlarge",
    "lsw.m5a.12xlarge",
    "lsw.m6a.large",
    "lsw.m6a.xlarge",
    "lsw.m6a.2xlarge",
    "lsw.m6a.4xlarge",
    "lsw.m6a.8xlarge",
    "lsw.m6a.12xlarge",
    "lsw.m6a.16xlarge",
    "lsw.m6a.24xlarge",
    "lsw.c3.large",
    "lsw.c3.xlarge",
    "lsw.c3.2xlarge",
    "lsw.c3.4xlarge",
    "lsw.c4.large",
    "lsw.c4.xlarge",
    "lsw.c4.2xlarge",
    "lsw.c4.4xlarge",
    "lsw.c5a.large",
    "lsw.c5a.xlarge",
    "lsw.c5a.2xlarge",
    "lsw.c5a.4xlarge",
    "lsw.c5a.9xlarge",
    "lsw.c5a.12xlarge",
    "lsw.c6a.large",
    "lsw.c6a.xlarge",
    "lsw.c6a.2xlarge",
    "lsw.c6a.4xlarge",
    "lsw.c6a.8xlarge",
    "lsw.c6a.12xlarge",
    "lsw.c6a.16xlarge",
    "lsw.c6a.24xlarge",
    "lsw.r3.large",
    "lsw.r3.xlarge",
    "lsw.r3.2xlarge",
    "lsw.r4.large",
    "lsw.r4.xlarge",
    "lsw.r4.2xlarge",
    "lsw.r5a.large",
    "lsw.r5a.xlarge",
    "lsw.r5a.2xlarge",
    "lsw.r5a.4xlarge",
    "lsw.r5a.8xlarge",
    "lsw.r5a.12xlarge",
    "lsw.r6a.large",
    "lsw.r6a.xlarge",
    "lsw.r6a.2xlarge",
    "lsw.r6a.4xlarge",
    "lsw.r6a.8xlarge",
    "lsw.r6a.12xlarge",
    "lsw.r6a.16xlarge",
    "lsw.r6a.24xlarge",
];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cpu {
    pub value: i64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Memory {
    pub value: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NetworkSpeed {
    pub value: i64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Resources {
    pub cpu: Cpu,
    pub memory: Memory,
    pub public_network_speed: NetworkSpeed,
    pub private_network_speed: NetworkSpeed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Contract {
    pub billing_frequency: BillingFrequency,
    pub term: ContractTerm,
    pub contract_type: ContractType,
    pub ends_at: Option<DateTime<Utc>>,
    pub renewals_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub state: ContractState,
}

impl Contract {
    /// Build a contract, rejecting monthly contracts without a term.
    pub fn new(
        billing_frequency: BillingFrequency,
        term: ContractTerm,
        contract_type: ContractType,
        renewals_at: Option<DateTime<Utc>>,
        created_at: Option<DateTime<Utc>>,
        state: ContractState,
        ends_at: Option<DateTime<Utc>>,
    ) -> Result<Self, DomainError> {
        if contract_type == ContractType::Monthly && term == ContractTerm::Zero {
            return Err(DomainError::MonthlyContractWithoutTerm);
        }

        Ok(Self {
            billing_frequency,
            term,
            contract_type,
            ends_at,
            renewals_at,
            created_at,
            state,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ddos {
    pub detection_profile: String,
    pub protection_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ip {
    pub ip: String,
    pub prefix_length: String,
    pub version: i64,
    pub null_routed: bool,
    pub main_ip: bool,
    pub network_type: NetworkType,
    pub reverse_lookup: Option<String>,
    pub ddos: Option<Ddos>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrivateNetwork {
    pub id: String,
    pub status: String,
    pub subnet: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct InstanceType {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Region {
    pub name: String,
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_contract_requires_term() {
        let err = Contract::new(
            BillingFrequency::One,
            ContractTerm::Zero,
            ContractType::Monthly,
            None,
            None,
            ContractState::Active,
            None,
        )
        .unwrap_err();
        assert_eq!(err, DomainError::MonthlyContractWithoutTerm);
    }

    #[test]
    fn test_contract() {
        let contract = Contract::new(
            BillingFrequency::One,
            ContractTerm::Three,
            ContractType::Monthly,
            None,
            None,
            ContractState::Active,
            None,
        )
        .unwrap();
        assert_eq!(contract.term.value(), 3);

        let hourly = Contract::new(
            BillingFrequency::Zero,
            ContractTerm::Zero,
            ContractType::Hourly,
            None,
            None,
            ContractState::Active,
            None,
        );
        assert!(hourly.is_ok());
    }

    #[test]
    fn test_allowed_lists() {
        assert!(REGIONS.contains(&"eu-west-3"));
        assert!(INSTANCE_TYPES.contains(&"lsw.m3.large"));
    }
}
