use chrono::{DateTime, Utc};

use super::{
    AutoScalingGroup, BillingFrequency, Contract, ContractTerm, ContractType, DomainError, Ip,
    PrivateNetwork, Resources, RootDiskSize, State, StorageType, Uuid,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
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

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Iso {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Instance {
    pub id: Uuid,
    pub region: String,
    pub reference: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub resources: Resources,
    pub image: Image,
    pub state: State,
    pub product_type: String,
    pub has_public_ipv4: bool,
    pub has_private_network: bool,
    pub instance_type: String,
    pub root_disk_storage_type: StorageType,
    pub root_disk_size: Option<RootDiskSize>,
    pub ips: Vec<Ip>,
    pub contract: Contract,
    pub iso: Option<Iso>,
    pub market_app_id: Option<String>,
    pub private_network: Option<PrivateNetwork>,
    /// Set when the instance belongs to an auto scaling group.
    pub auto_scaling_group_id: Option<Uuid>,
    /// Group details; only filled in by the services.
    pub auto_scaling_group: Option<AutoScalingGroup>,
}

/// Optional fields of an instance read from the API.
#[derive(Debug, Clone, Default)]
pub struct OptionalInstanceValues {
    pub reference: Option<String>,
    pub iso: Option<Iso>,
    pub market_app_id: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub private_network: Option<PrivateNetwork>,
    pub auto_scaling_group_id: Option<Uuid>,
    pub auto_scaling_group: Option<AutoScalingGroup>,
}

/// Optional fields accepted when launching an instance.
#[derive(Debug, Clone, Default)]
pub struct OptionalCreateInstanceValues {
    pub market_app_id: Option<String>,
    pub reference: Option<String>,
    pub root_disk_size: Option<RootDiskSize>,
}

/// Fields accepted when updating an instance. `None` leaves a field untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OptionalUpdateInstanceValues {
    pub instance_type: Option<String>,
    pub reference: Option<String>,
    pub contract_type: Option<ContractType>,
    pub term: Option<ContractTerm>,
    pub billing_frequency: Option<BillingFrequency>,
    pub root_disk_size: Option<RootDiskSize>,
}

/// A validated instance update.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceUpdate {
    pub id: Uuid,
    pub values: OptionalUpdateInstanceValues,
}

impl Instance {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Uuid,
        region: impl Into<String>,
        resources: Resources,
        image: Image,
        state: State,
        product_type: impl Into<String>,
        has_public_ipv4: bool,
        has_private_network: bool,
        root_disk_size: RootDiskSize,
        instance_type: impl Into<String>,
        root_disk_storage_type: StorageType,
        ips: Vec<Ip>,
        contract: Contract,
        optional: OptionalInstanceValues,
    ) -> Self {
        Self {
            id,
            region: region.into(),
            reference: optional.reference,
            started_at: optional.started_at,
            resources,
            image,
            state,
            product_type: product_type.into(),
            has_public_ipv4,
            has_private_network,
            instance_type: instance_type.into(),
            root_disk_storage_type,
            root_disk_size: Some(root_disk_size),
            ips,
            contract,
            iso: optional.iso,
            market_app_id: optional.market_app_id,
            private_network: optional.private_network,
            auto_scaling_group_id: optional.auto_scaling_group_id,
            auto_scaling_group: optional.auto_scaling_group,
        }
    }

    /// An instance holding only the fields accepted by the launch call.
    #[allow(clippy::too_many_arguments)]
    pub fn new_create(
        region: impl Into<String>,
        instance_type: &str,
        root_disk_storage_type: StorageType,
        image_id: impl Into<String>,
        contract_type: ContractType,
        contract_term: ContractTerm,
        billing_frequency: BillingFrequency,
        optional: OptionalCreateInstanceValues,
        allowed_instance_types: &[&str],
    ) -> Result<Self, DomainError> {
        if !allowed_instance_types.contains(&instance_type) {
            return Err(DomainError::InstanceTypeNotAllowed(instance_type.to_string()));
        }

        Ok(Self {
            region: region.into(),
            instance_type: instance_type.to_string(),
            root_disk_storage_type,
            image: Image {
                id: image_id.into(),
                ..Default::default()
            },
            contract: Contract {
                contract_type,
                term: contract_term,
                billing_frequency,
                ..Default::default()
            },
            market_app_id: optional.market_app_id,
            reference: optional.reference,
            root_disk_size: optional.root_disk_size,
            ..Default::default()
        })
    }

    /// Validate an update. The current type is always accepted.
    pub fn new_update(
        id: Uuid,
        options: OptionalUpdateInstanceValues,
        allowed_instance_types: &[String],
        current_instance_type: &str,
    ) -> Result<InstanceUpdate, DomainError> {
        if let Some(instance_type) = &options.instance_type {
            let allowed = instance_type == current_instance_type
                || allowed_instance_types.iter().any(|t| t == instance_type);
            if !allowed {
                return Err(DomainError::InstanceTypeNotAllowed(instance_type.clone()));
            }
        }

        Ok(InstanceUpdate {
            id,
            values: options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::INSTANCE_TYPES;

    #[test]
    fn test_new_create() {
        let instance = Instance::new_create(
            "eu-west-3",
            "lsw.m3.large",
            StorageType::Central,
            "UBUNTU_20_04_64BIT",
            ContractType::Monthly,
            ContractTerm::Three,
            BillingFrequency::One,
            OptionalCreateInstanceValues {
                reference: Some("reference".to_string()),
                root_disk_size: Some(RootDiskSize::new(50).unwrap()),
                ..Default::default()
            },
            INSTANCE_TYPES,
        )
        .unwrap();

        assert_eq!(instance.region, "eu-west-3");
        assert_eq!(instance.image.id, "UBUNTU_20_04_64BIT");
        assert_eq!(instance.contract.term, ContractTerm::Three);
        assert_eq!(instance.root_disk_size.unwrap().value(), 50);
        assert_eq!(instance.reference.as_deref(), Some("reference"));
        assert_eq!(instance.id, Uuid::default());
    }

    #[test]
    fn test_new_create_rejects_unknown_type() {
        let err = Instance::new_create(
            "eu-west-3",
            "tralala",
            StorageType::Central,
            "UBUNTU_20_04_64BIT",
            ContractType::Hourly,
            ContractTerm::Zero,
            BillingFrequency::Zero,
            OptionalCreateInstanceValues::default(),
            &["lsw.m3.large"],
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "instance type \"tralala\" is not allowed");
    }

    #[test]
    fn test_new_update_accepts_current_type() {
        let id = Uuid::new("ace712e9-a166-47f1-9065-4af0f7e7fce1").unwrap();
        let options = OptionalUpdateInstanceValues {
            instance_type: Some("lsw.m3.large".to_string()),
            ..Default::default()
        };

        let update = Instance::new_update(id, options, &[], "lsw.m3.large").unwrap();
        assert_eq!(update.id, id);
        assert_eq!(update.values.instance_type.as_deref(), Some("lsw.m3.large"));
    }

    #[test]
    fn test_new_update_checks_allowed_types() {
        let id = Uuid::new("ace712e9-a166-47f1-9065-4af0f7e7fce1").unwrap();
        let options = OptionalUpdateInstanceValues {
            instance_type: Some("lsw.m4.large".to_string()),
            ..Default::default()
        };

        assert!(Instance::new_update(
            id,
            options.clone(),
            &["lsw.m4.large".to_string()],
            "lsw.m3.large"
        )
        .is_ok());

        let err = Instance::new_update(id, options, &[], "lsw.m3.large").unwrap_err();
        assert_eq!(
            err,
            DomainError::InstanceTypeNotAllowed("lsw.m4.large".to_string())
        );
    }
}
