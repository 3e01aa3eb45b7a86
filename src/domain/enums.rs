use super::DomainError;

wire_enum! {
    /// Lifecycle state of an instance or load balancer.
    State("state") {
        Creating => "CREATING",
        Destroyed => "DESTROYED",
        Destroying => "DESTROYING",
        Failed => "FAILED",
        Running => "RUNNING",
        Starting => "STARTING",
        Stopped => "STOPPED",
        Stopping => "STOPPING",
        #[default]
        Unknown => "UNKNOWN",
    }
}

wire_enum! {
    ContractType("contract type") {
        #[default]
        Hourly => "HOURLY",
        Monthly => "MONTHLY",
    }
}

int_enum! {
    /// Contract term in months, 0 for hourly contracts.
    ContractTerm("contract term") {
        #[default]
        Zero => 0,
        One => 1,
        Three => 3,
        Six => 6,
        Twelve => 12,
    }
}

int_enum! {
    /// Billing frequency in months, 0 for hourly billing.
    BillingFrequency("billing frequency") {
        #[default]
        Zero => 0,
        One => 1,
        Three => 3,
        Six => 6,
        Twelve => 12,
    }
}

wire_enum! {
    ContractState("contract state") {
        #[default]
        Active => "ACTIVE",
        DeleteScheduled => "DELETE_SCHEDULED",
    }
}

wire_enum! {
    /// Root disk storage type.
    StorageType("storage type") {
        Local => "LOCAL",
        #[default]
        Central => "CENTRAL",
    }
}

wire_enum! {
    NetworkType("network type") {
        Internal => "INTERNAL",
        #[default]
        Public => "PUBLIC",
    }
}

wire_enum! {
    AutoScalingGroupType("auto scaling group type") {
        #[default]
        Manual => "MANUAL",
        Scheduled => "SCHEDULED",
        CpuBased => "CPU_BASED",
    }
}

wire_enum! {
    AutoScalingGroupState("auto scaling group state") {
        #[default]
        Active => "ACTIVE",
        Created => "CREATED",
        Creating => "CREATING",
        Destroyed => "DESTROYED",
        Destroying => "DESTROYING",
        Scaling => "SCALING",
        Scheduled => "SCHEDULED",
        Updating => "UPDATING",
    }
}

wire_enum! {
    /// Load balancing algorithm.
    Balance("balance") {
        #[default]
        RoundRobin => "roundrobin",
        LeastConnections => "leastconn",
        Source => "source",
    }
}

wire_enum! {
    HttpMethod("HTTP method") {
        #[default]
        Get => "GET",
        Head => "HEAD",
    }
}

wire_enum! {
    Protocol("protocol") {
        #[default]
        Http => "HTTP",
        Https => "HTTPS",
        Tcp => "TCP",
    }
}

wire_enum! {
    /// Credential types stored on a public cloud instance.
    CredentialType("credential type") {
        #[default]
        OperatingSystem => "OPERATING_SYSTEM",
        ControlPanel => "CONTROL_PANEL",
    }
}

wire_enum! {
    /// Credential types stored on a dedicated server.
    DedicatedServerCredentialType("credential type") {
        #[default]
        OperatingSystem => "OPERATING_SYSTEM",
        ControlPanel => "CONTROL_PANEL",
        RemoteManagement => "REMOTE_MANAGEMENT",
        RescueMode => "RESCUE_MODE",
        Switch => "SWITCH",
        Pdu => "PDU",
        Firewall => "FIREWALL",
        LoadBalancer => "LOAD_BALANCER",
    }
}

wire_enum! {
    NotificationFrequency("notification frequency") {
        #[default]
        Daily => "DAILY",
        Weekly => "WEEKLY",
        Monthly => "MONTHLY",
    }
}

wire_enum! {
    NotificationUnit("notification unit") {
        #[default]
        Mbps => "Mbps",
        Gbps => "Gbps",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_values() {
        assert_eq!("RUNNING".parse::<State>().unwrap(), State::Running);
        assert_eq!("MONTHLY".parse::<ContractType>().unwrap(), ContractType::Monthly);
        assert_eq!("leastconn".parse::<Balance>().unwrap(), Balance::LeastConnections);
        assert_eq!(
            "LOAD_BALANCER".parse::<DedicatedServerCredentialType>().unwrap(),
            DedicatedServerCredentialType::LoadBalancer
        );
        assert_eq!(ContractTerm::try_from(12).unwrap(), ContractTerm::Twelve);
        assert_eq!(BillingFrequency::try_from(3).unwrap().value(), 3);
    }

    #[test]
    fn test_parse_fails_closed() {
        let err = "YEARLY".parse::<ContractType>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid contract type \"YEARLY\", expected one of [HOURLY MONTHLY]"
        );

        assert!("running".parse::<State>().is_err());
        assert!(ContractTerm::try_from(2).is_err());
        assert!(BillingFrequency::try_from(-1).is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(State::default(), State::Unknown);
        assert_eq!(StorageType::default().as_str(), "CENTRAL");
        assert_eq!(ContractTerm::default().value(), 0);
    }

    #[test]
    fn test_values() {
        assert_eq!(ContractTerm::values(), &[0, 1, 3, 6, 12]);
        assert_eq!(NotificationUnit::values(), &["Mbps", "Gbps"]);
        assert_eq!(DedicatedServerCredentialType::values().len(), 8);
        assert_eq!(Protocol::Https.to_string(), "HTTPS");
    }
}
