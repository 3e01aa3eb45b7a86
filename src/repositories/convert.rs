//! Converters between SDK DTOs and domain entities.
//!
//! Errors carry the chain of converters that failed, e.g.
//! `convert_instance: convert_contract: invalid contract term "2", ...`.

use std::str::FromStr;

use super::RepositoryError;
use crate::domain::{
    AutoScalingGroup, AutoScalingGroupReference, BandwidthNotificationSetting, BillingFrequency,
    Contract, ContractTerm, Cpu, Credential, Ddos, DomainError, HealthCheck, Image, Instance,
    InstanceType, InstanceUpdate, Ip, Iso, LoadBalancer, LoadBalancerConfiguration, Memory,
    NetworkSpeed, OptionalAutoScalingGroupValues, OptionalInstanceValues,
    OptionalLoadBalancerValues, PrivateNetwork, Region, Resources, RootDiskSize, StickySession,
    TargetGroup, TargetGroupHealthCheck, Uuid,
};
use crate::sdk::models;

type Result<T> = std::result::Result<T, RepositoryError>;

fn parse<T>(converter: &str, value: &str) -> Result<T>
where
    T: FromStr<Err = DomainError>,
{
    value
        .parse()
        .map_err(|err| RepositoryError::conversion(converter, err))
}

fn domain<T>(converter: &str, result: std::result::Result<T, DomainError>) -> Result<T> {
    result.map_err(|err| RepositoryError::conversion(converter, err))
}

// =============================================================================
// SDK -> domain
// =============================================================================

pub(crate) fn convert_instance(
    sdk: models::Instance,
    auto_scaling_group: Option<AutoScalingGroup>,
) -> Result<Instance> {
    const NAME: &str = "convert_instance";

    let id = parse::<Uuid>(NAME, &sdk.id)?;
    let state = parse(NAME, &sdk.state)?;
    let root_disk_size = domain(NAME, RootDiskSize::new(sdk.root_disk_size))?;
    let root_disk_storage_type = parse(NAME, &sdk.root_disk_storage_type)?;
    let ips = convert_ips(sdk.ips).map_err(|e| e.context(NAME))?;
    let contract = convert_contract(&sdk.contract).map_err(|e| e.context(NAME))?;
    let auto_scaling_group_id = sdk
        .auto_scaling_group
        .as_ref()
        .map(|group| parse::<Uuid>(NAME, &group.id))
        .transpose()?;

    let optional = OptionalInstanceValues {
        reference: sdk.reference,
        iso: sdk.iso.map(convert_iso),
        market_app_id: sdk.market_app_id,
        started_at: sdk.started_at,
        private_network: sdk.private_network.map(convert_private_network),
        auto_scaling_group_id,
        auto_scaling_group,
    };

    Ok(Instance::new(
        id,
        sdk.region,
        convert_resources(sdk.resources),
        convert_image(sdk.image),
        state,
        sdk.product_type,
        sdk.has_public_ip_v4,
        sdk.has_private_network,
        root_disk_size,
        sdk.r#type,
        root_disk_storage_type,
        ips,
        contract,
        optional,
    ))
}

pub(crate) fn convert_resources(sdk: models::Resources) -> Resources {
    Resources {
        cpu: Cpu {
            value: sdk.cpu.value,
            unit: sdk.cpu.unit,
        },
        memory: Memory {
            value: sdk.memory.value,
            unit: sdk.memory.unit,
        },
        public_network_speed: convert_network_speed(sdk.public_network_speed),
        private_network_speed: convert_network_speed(sdk.private_network_speed),
    }
}

fn convert_network_speed(sdk: models::NetworkSpeed) -> NetworkSpeed {
    NetworkSpeed {
        value: sdk.value,
        unit: sdk.unit,
    }
}

pub(crate) fn convert_image(sdk: models::Image) -> Image {
    Image {
        id: sdk.id,
        name: sdk.name,
        version: sdk.version,
        family: sdk.family,
        flavour: sdk.flavour,
        architecture: sdk.architecture,
        custom: sdk.custom,
        state: sdk.state,
        region: sdk.region,
        market_apps: sdk.market_apps,
        storage_types: sdk.storage_types,
    }
}

pub(crate) fn convert_ips(sdk: Vec<models::Ip>) -> Result<Vec<Ip>> {
    sdk.into_iter()
        .map(|ip| convert_ip(ip).map_err(|e| e.context("convert_ips")))
        .collect()
}

fn convert_ip(sdk: models::Ip) -> Result<Ip> {
    Ok(Ip {
        network_type: parse("convert_ip", &sdk.network_type)?,
        ip: sdk.ip,
        prefix_length: sdk.prefix_length,
        version: sdk.version,
        null_routed: sdk.null_routed,
        main_ip: sdk.main_ip,
        reverse_lookup: sdk.reverse_lookup,
        ddos: sdk.ddos.map(|ddos| Ddos {
            detection_profile: ddos.detection_profile,
            protection_type: ddos.protection_type,
        }),
    })
}

pub(crate) fn convert_contract(sdk: &models::Contract) -> Result<Contract> {
    const NAME: &str = "convert_contract";

    let billing_frequency = domain(NAME, BillingFrequency::try_from(sdk.billing_frequency))?;
    let term = domain(NAME, ContractTerm::try_from(sdk.term))?;
    let contract_type = parse(NAME, &sdk.r#type)?;
    let state = parse(NAME, &sdk.state)?;

    domain(
        NAME,
        Contract::new(
            billing_frequency,
            term,
            contract_type,
            sdk.renewals_at,
            sdk.created_at,
            state,
            sdk.ends_at,
        ),
    )
}

fn convert_iso(sdk: models::Iso) -> Iso {
    Iso {
        id: sdk.id,
        name: sdk.name,
    }
}

fn convert_private_network(sdk: models::PrivateNetwork) -> PrivateNetwork {
    PrivateNetwork {
        id: sdk.private_network_id,
        status: sdk.status,
        subnet: sdk.subnet,
    }
}

/// The group's load balancer must be passed in when the group references one.
pub(crate) fn convert_auto_scaling_group(
    sdk: models::AutoScalingGroup,
    load_balancer: Option<LoadBalancer>,
) -> Result<AutoScalingGroup> {
    const NAME: &str = "convert_auto_scaling_group";

    if let (Some(linked), None) = (&sdk.load_balancer, &load_balancer) {
        return Err(RepositoryError::MissingLoadBalancer {
            load_balancer_id: linked.id.clone(),
            auto_scaling_group_id: sdk.id,
        });
    }

    let id = parse::<Uuid>(NAME, &sdk.id)?;
    let group_type = parse(NAME, &sdk.r#type)?;
    let state = parse(NAME, &sdk.state)?;
    let reference = domain(NAME, AutoScalingGroupReference::new(sdk.reference))?;

    let optional = OptionalAutoScalingGroupValues {
        desired_amount: sdk.desired_amount,
        starts_at: sdk.starts_at,
        ends_at: sdk.ends_at,
        minimum_amount: sdk.minimum_amount,
        maximum_amount: sdk.maximum_amount,
        cpu_threshold: sdk.cpu_threshold,
        warmup_time: sdk.warmup_time,
        cooldown_time: sdk.cooldown_time,
        load_balancer,
    };

    Ok(AutoScalingGroup::new(
        id,
        group_type,
        state,
        sdk.region,
        reference,
        sdk.created_at,
        sdk.updated_at,
        optional,
    ))
}

pub(crate) fn convert_load_balancer(sdk: models::LoadBalancer) -> Result<LoadBalancer> {
    const NAME: &str = "convert_load_balancer";

    let id = parse::<Uuid>(NAME, &sdk.id)?;
    let state = parse(NAME, &sdk.state)?;
    let contract = convert_contract(&sdk.contract).map_err(|e| e.context(NAME))?;
    let ips = convert_ips(sdk.ips).map_err(|e| e.context(NAME))?;
    let configuration = sdk
        .configuration
        .map(convert_load_balancer_configuration)
        .transpose()
        .map_err(|e| e.context(NAME))?;

    let optional = OptionalLoadBalancerValues {
        reference: sdk.reference,
        started_at: sdk.started_at,
        configuration,
        private_network: sdk.private_network.map(convert_private_network),
    };

    Ok(LoadBalancer::new(
        id,
        sdk.r#type,
        convert_resources(sdk.resources),
        sdk.region,
        state,
        contract,
        ips,
        optional,
    ))
}

fn convert_load_balancer_configuration(
    sdk: models::LoadBalancerConfiguration,
) -> Result<LoadBalancerConfiguration> {
    const NAME: &str = "convert_load_balancer_configuration";

    Ok(LoadBalancerConfiguration {
        balance: parse(NAME, &sdk.balance)?,
        x_forwarded_for: sdk.x_forwarded_for,
        idle_timeout: sdk.idle_time_out,
        target_port: sdk.target_port,
        sticky_session: sdk.sticky_session.map(|session| StickySession {
            enabled: session.enabled,
            max_life_time: session.max_life_time,
        }),
        health_check: sdk
            .health_check
            .map(convert_health_check)
            .transpose()
            .map_err(|e| e.context(NAME))?,
    })
}

fn convert_health_check(sdk: models::HealthCheck) -> Result<HealthCheck> {
    Ok(HealthCheck {
        method: sdk
            .method
            .as_deref()
            .map(|method| parse("convert_health_check", method))
            .transpose()?,
        uri: sdk.uri,
        host: sdk.host,
        port: sdk.port,
    })
}

pub(crate) fn convert_target_group(sdk: models::TargetGroup) -> Result<TargetGroup> {
    const NAME: &str = "convert_target_group";

    Ok(TargetGroup {
        id: parse(NAME, &sdk.id)?,
        protocol: parse(NAME, &sdk.protocol)?,
        health_check: sdk
            .health_check
            .map(convert_target_group_health_check)
            .transpose()
            .map_err(|e| e.context(NAME))?,
        name: sdk.name,
        port: sdk.port,
        region: sdk.region,
    })
}

fn convert_target_group_health_check(sdk: models::HealthCheck) -> Result<TargetGroupHealthCheck> {
    const NAME: &str = "convert_target_group_health_check";

    Ok(TargetGroupHealthCheck {
        protocol: parse(NAME, sdk.protocol.as_deref().unwrap_or_default())?,
        method: sdk
            .method
            .as_deref()
            .map(|method| parse(NAME, method))
            .transpose()?,
        uri: sdk.uri,
        host: sdk.host,
        port: sdk.port,
    })
}

pub(crate) fn convert_instance_type(sdk: models::InstanceType) -> InstanceType {
    InstanceType { name: sdk.name }
}

pub(crate) fn convert_region(sdk: models::Region) -> Region {
    Region {
        name: sdk.name,
        location: sdk.location,
    }
}

pub(crate) fn convert_credential<T>(sdk: models::Credential) -> Result<Credential<T>>
where
    T: FromStr<Err = DomainError>,
{
    Ok(Credential {
        credential_type: parse("convert_credential", &sdk.r#type)?,
        username: sdk.username,
        password: sdk.password,
    })
}

pub(crate) fn convert_bandwidth_notification_setting(
    sdk: models::BandwidthNotificationSetting,
) -> Result<BandwidthNotificationSetting> {
    const NAME: &str = "convert_bandwidth_notification_setting";

    Ok(BandwidthNotificationSetting {
        frequency: parse(NAME, &sdk.frequency)?,
        unit: parse(NAME, &sdk.unit)?,
        id: sdk.id,
        threshold: sdk.threshold,
    })
}

// =============================================================================
// domain -> SDK
// =============================================================================

pub(crate) fn to_launch_instance_opts(instance: &Instance) -> models::LaunchInstanceOpts {
    models::LaunchInstanceOpts {
        region: instance.region.clone(),
        r#type: instance.instance_type.clone(),
        image_id: instance.image.id.clone(),
        contract_type: instance.contract.contract_type.to_string(),
        contract_term: instance.contract.term.value(),
        billing_frequency: instance.contract.billing_frequency.value(),
        root_disk_storage_type: instance.root_disk_storage_type.to_string(),
        market_app_id: instance.market_app_id.clone(),
        reference: instance.reference.clone(),
        root_disk_size: instance.root_disk_size.map(|size| size.value()),
    }
}

pub(crate) fn to_update_instance_opts(update: &InstanceUpdate) -> models::UpdateInstanceOpts {
    let values = &update.values;
    models::UpdateInstanceOpts {
        r#type: values.instance_type.clone(),
        reference: values.reference.clone(),
        contract_type: values.contract_type.map(|t| t.to_string()),
        contract_term: values.term.map(|t| t.value()),
        billing_frequency: values.billing_frequency.map(|f| f.value()),
        root_disk_size: values.root_disk_size.map(|size| size.value()),
    }
}

pub(crate) fn to_launch_load_balancer_opts(
    load_balancer: &LoadBalancer,
) -> models::LaunchLoadBalancerOpts {
    models::LaunchLoadBalancerOpts {
        region: load_balancer.region.clone(),
        r#type: load_balancer.load_balancer_type.clone(),
        contract_type: load_balancer.contract.contract_type.to_string(),
        contract_term: load_balancer.contract.term.value(),
        billing_frequency: load_balancer.contract.billing_frequency.value(),
        reference: load_balancer.reference.clone(),
    }
}

fn to_health_check_opts(health_check: &TargetGroupHealthCheck) -> models::HealthCheckOpts {
    models::HealthCheckOpts {
        protocol: health_check.protocol.to_string(),
        method: health_check.method.map(|m| m.to_string()),
        uri: health_check.uri.clone(),
        host: health_check.host.clone(),
        port: health_check.port,
    }
}

pub(crate) fn to_create_target_group_opts(
    target_group: &TargetGroup,
) -> models::CreateTargetGroupOpts {
    models::CreateTargetGroupOpts {
        name: target_group.name.clone(),
        protocol: target_group.protocol.to_string(),
        port: target_group.port,
        region: target_group.region.clone(),
        health_check: target_group.health_check.as_ref().map(to_health_check_opts),
    }
}

pub(crate) fn to_update_target_group_opts(
    target_group: &TargetGroup,
) -> models::UpdateTargetGroupOpts {
    models::UpdateTargetGroupOpts {
        name: Some(target_group.name.clone()),
        port: Some(target_group.port),
        health_check: target_group.health_check.as_ref().map(to_health_check_opts),
    }
}

pub(crate) fn to_credential_opts<T: std::fmt::Display>(
    credential: &Credential<T>,
) -> models::CredentialOpts {
    models::CredentialOpts {
        r#type: credential.credential_type.to_string(),
        username: credential.username.clone(),
        password: credential.password.clone(),
    }
}

pub(crate) fn to_bandwidth_notification_setting_opts(
    setting: &BandwidthNotificationSetting,
) -> models::BandwidthNotificationSettingOpts {
    models::BandwidthNotificationSettingOpts {
        frequency: setting.frequency.to_string(),
        threshold: setting.threshold.clone(),
        unit: setting.unit.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{
        AutoScalingGroupType, Balance, ContractType, CredentialType, HttpMethod, NetworkType,
        Protocol, State, StorageType,
    };

    fn sdk_instance() -> models::Instance {
        serde_json::from_value(json!({
            "id": "ace712e9-a166-47f1-9065-4af0f7e7fce1",
            "type": "lsw.m3.large",
            "region": "eu-west-3",
            "reference": "my webserver",
            "state": "RUNNING",
            "productType": "INSTANCE",
            "hasPublicIpV4": true,
            "hasPrivateNetwork": true,
            "rootDiskSize": 50,
            "rootDiskStorageType": "CENTRAL",
            "resources": {
                "cpu": {"value": 2, "unit": "vCPU"},
                "memory": {"value": 0.5, "unit": "GiB"},
                "publicNetworkSpeed": {"value": 1, "unit": "Gbps"},
                "privateNetworkSpeed": {"value": 2, "unit": "Gbps"}
            },
            "image": {"id": "UBUNTU_20_04_64BIT", "name": "Ubuntu 20.04 LTS (x86_64)", "flavour": "ubuntu"},
            "contract": {"billingFrequency": 1, "term": 3, "type": "MONTHLY", "state": "ACTIVE"},
            "ips": [{
                "ip": "1.2.3.4",
                "prefixLength": "32",
                "version": 4,
                "mainIp": true,
                "networkType": "PUBLIC",
                "reverseLookup": "example.com",
                "ddos": {"detectionProfile": "ADVANCED_DEFAULT", "protectionType": "ADVANCED"}
            }],
            "iso": {"id": "GRML", "name": "Grml"},
            "privateNetwork": {"privateNetworkId": "pn-1", "status": "CONNECTED", "subnet": "10.0.0.0/24"}
        }))
        .unwrap()
    }

    fn sdk_load_balancer() -> models::LoadBalancer {
        serde_json::from_value(json!({
            "id": "32082a1d-9d52-4d8b-a1b2-3ae0a0e58c9c",
            "type": "lsw.m3.large",
            "region": "eu-west-3",
            "state": "RUNNING",
            "contract": {"billingFrequency": 0, "term": 0, "type": "HOURLY", "state": "ACTIVE"},
            "configuration": {
                "balance": "source",
                "xForwardedFor": true,
                "idleTimeOut": 5,
                "targetPort": 80,
                "healthCheck": {"method": "HEAD", "uri": "/health", "port": 80}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_convert_instance() {
        let instance = convert_instance(sdk_instance(), None).unwrap();

        assert_eq!(instance.id.to_string(), "ace712e9-a166-47f1-9065-4af0f7e7fce1");
        assert_eq!(instance.state, State::Running);
        assert_eq!(instance.instance_type, "lsw.m3.large");
        assert_eq!(instance.root_disk_size.unwrap().value(), 50);
        assert_eq!(instance.root_disk_storage_type, StorageType::Central);
        assert_eq!(instance.resources.memory.value, 0.5);
        assert_eq!(instance.resources.private_network_speed.value, 2);
        assert_eq!(instance.image.flavour, "ubuntu");
        assert_eq!(instance.contract.contract_type, ContractType::Monthly);
        assert_eq!(instance.contract.term, ContractTerm::Three);
        assert_eq!(instance.ips[0].network_type, NetworkType::Public);
        assert_eq!(
            instance.ips[0].ddos.as_ref().unwrap().protection_type,
            "ADVANCED"
        );
        assert_eq!(instance.iso.unwrap().name, "Grml");
        assert_eq!(instance.private_network.unwrap().id, "pn-1");
        assert!(instance.has_private_network);
        assert!(instance.auto_scaling_group.is_none());
    }

    #[test]
    fn test_convert_instance_rejects_invalid_id() {
        let mut sdk = sdk_instance();
        sdk.id = "tralala".to_string();
        let err = convert_instance(sdk, None).unwrap_err();
        assert_eq!(err.to_string(), "convert_instance: invalid UUID \"tralala\"");
    }

    #[test]
    fn test_convert_instance_reports_nested_converter() {
        let mut sdk = sdk_instance();
        sdk.contract.term = 2;
        let err = convert_instance(sdk, None).unwrap_err();
        assert!(err
            .to_string()
            .starts_with("convert_instance: convert_contract: invalid contract term \"2\""));
    }

    #[test]
    fn test_convert_load_balancer() {
        let load_balancer = convert_load_balancer(sdk_load_balancer()).unwrap();
        let configuration = load_balancer.configuration.unwrap();

        assert_eq!(configuration.balance, Balance::Source);
        assert_eq!(configuration.idle_timeout, 5);
        assert_eq!(
            configuration.health_check.unwrap().method,
            Some(HttpMethod::Head)
        );
        assert!(configuration.sticky_session.is_none());
    }

    #[test]
    fn test_convert_auto_scaling_group_requires_load_balancer() {
        let sdk: models::AutoScalingGroup = serde_json::from_value(json!({
            "id": "90b9f2cc-c655-40ea-b01a-58c00e175c96",
            "type": "CPU_BASED",
            "state": "ACTIVE",
            "region": "eu-west-3",
            "reference": "reference",
            "loadBalancer": {"id": "32082a1d-9d52-4d8b-a1b2-3ae0a0e58c9c"}
        }))
        .unwrap();

        let err = convert_auto_scaling_group(sdk.clone(), None).unwrap_err();
        assert!(matches!(err, RepositoryError::MissingLoadBalancer { .. }));

        let load_balancer = convert_load_balancer(sdk_load_balancer()).unwrap();
        let group = convert_auto_scaling_group(sdk, Some(load_balancer)).unwrap();
        assert_eq!(group.group_type, AutoScalingGroupType::CpuBased);
        assert_eq!(group.reference.as_str(), "reference");
        assert!(group.load_balancer.is_some());
    }

    #[test]
    fn test_convert_target_group() {
        let sdk: models::TargetGroup = serde_json::from_value(json!({
            "id": "5fd135a9-3ff6-4794-8b86-7d9cb4c1b7e2",
            "name": "web",
            "protocol": "HTTP",
            "port": 80,
            "region": "eu-west-3",
            "healthCheck": {"protocol": "HTTP", "method": "GET", "uri": "/", "port": 80}
        }))
        .unwrap();

        let target_group = convert_target_group(sdk).unwrap();
        let health_check = target_group.health_check.unwrap();
        assert_eq!(target_group.protocol, Protocol::Http);
        assert_eq!(health_check.method, Some(HttpMethod::Get));
    }

    #[test]
    fn test_convert_credential() {
        let sdk = models::Credential {
            r#type: "CONTROL_PANEL".to_string(),
            username: "admin".to_string(),
            password: "secret".to_string(),
        };
        let credential: Credential<CredentialType> = convert_credential(sdk).unwrap();
        assert_eq!(credential.credential_type, CredentialType::ControlPanel);

        let sdk = models::Credential {
            r#type: "PDU".to_string(),
            ..Default::default()
        };
        assert!(convert_credential::<CredentialType>(sdk).is_err());
    }

    #[test]
    fn test_to_launch_instance_opts() {
        let instance = convert_instance(sdk_instance(), None).unwrap();
        let opts = to_launch_instance_opts(&instance);

        assert_eq!(opts.r#type, "lsw.m3.large");
        assert_eq!(opts.image_id, "UBUNTU_20_04_64BIT");
        assert_eq!(opts.contract_type, "MONTHLY");
        assert_eq!(opts.contract_term, 3);
        assert_eq!(opts.billing_frequency, 1);
        assert_eq!(opts.root_disk_storage_type, "CENTRAL");
        assert_eq!(opts.root_disk_size, Some(50));
        assert_eq!(opts.reference.as_deref(), Some("my webserver"));
    }
}
