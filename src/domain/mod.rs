//! Domain entities shared by the repositories, services and resources.
//!
//! Entities are plain data. Everything that comes from the wire is parsed
//! here and rejected when it falls outside what the Leaseweb API documents.

use thiserror::Error;

/// Declares a string-backed wire enum with fail-closed parsing.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident($kind:literal) {
            $($(#[$vmeta:meta])* $variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            const VALUES: &'static [&'static str] = &[$($value),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }

            /// Every wire value, in declaration order.
            pub fn values() -> &'static [&'static str] {
                Self::VALUES
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = DomainError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($value => Ok(Self::$variant),)+
                    _ => Err(DomainError::invalid_value($kind, value, Self::VALUES)),
                }
            }
        }
    };
}

/// Declares an integer-backed wire enum with fail-closed parsing.
macro_rules! int_enum {
    (
        $(#[$meta:meta])*
        $name:ident($kind:literal) {
            $($(#[$vmeta:meta])* $variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            const VALUES: &'static [i64] = &[$($value),+];

            pub fn value(&self) -> i64 {
                match self {
                    $(Self::$variant => $value),+
                }
            }

            pub fn values() -> &'static [i64] {
                Self::VALUES
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.value())
            }
        }

        impl TryFrom<i64> for $name {
            type Error = DomainError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok(Self::$variant),)+
                    _ => Err(DomainError::invalid_value($kind, value, Self::VALUES)),
                }
            }
        }
    };
}

mod auto_scaling_group;
mod credential;
mod enums;
mod instance;
mod load_balancer;
mod shared;
mod value_objects;

pub use auto_scaling_group::{AutoScalingGroup, OptionalAutoScalingGroupValues};
pub use credential::{BandwidthNotificationSetting, Credential};
pub use enums::{
    AutoScalingGroupState, AutoScalingGroupType, Balance, BillingFrequency, ContractState,
    ContractTerm, ContractType, CredentialType, DedicatedServerCredentialType, HttpMethod,
    NetworkType, NotificationFrequency, NotificationUnit, Protocol, State, StorageType,
};
pub use instance::{
    Image, Instance, InstanceUpdate, Iso, OptionalCreateInstanceValues, OptionalInstanceValues,
    OptionalUpdateInstanceValues,
};
pub use load_balancer::{
    HealthCheck, LoadBalancer, LoadBalancerConfiguration, OptionalLoadBalancerValues,
    StickySession, TargetGroup, TargetGroupHealthCheck,
};
pub use shared::{
    Contract, Cpu, Ddos, InstanceType, Ip, Memory, NetworkSpeed, PrivateNetwork, Region,
    Resources, INSTANCE_TYPES, REGIONS,
};
pub use value_objects::{AutoScalingGroupReference, RootDiskSize, Uuid};

/// Errors raised while building domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("invalid {kind} {value:?}, expected one of [{expected}]")]
    InvalidValue {
        kind: &'static str,
        value: String,
        expected: String,
    },

    #[error("invalid UUID {0:?}")]
    InvalidUuid(String),

    #[error("root disk size {value} is out of range, it must be between {min} and {max}")]
    RootDiskSizeOutOfRange { value: i64, min: i64, max: i64 },

    #[error("auto scaling group reference cannot be longer than {max} characters, got {length}")]
    ReferenceTooLong { length: usize, max: usize },

    #[error("instance type {0:?} is not allowed")]
    InstanceTypeNotAllowed(String),

    #[error("contract term cannot be 0 when contract type is \"MONTHLY\"")]
    MonthlyContractWithoutTerm,
}

impl DomainError {
    fn invalid_value<V, E>(kind: &'static str, value: V, expected: &[E]) -> Self
    where
        V: std::fmt::Display,
        E: std::fmt::Display,
    {
        Self::InvalidValue {
            kind,
            value: value.to_string(),
            expected: expected
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}
