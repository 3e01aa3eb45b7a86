//! Shared fixtures for the integration tests.
//!
//! Every test starts its own wiremock server and points a configured
//! provider at it.

#![allow(dead_code)]

use std::time::Duration;

use serde_json::{json, Value};
use terraform_provider_leaseweb::services::PollSettings;
use terraform_provider_leaseweb::testing::ProviderTester;
use terraform_provider_leaseweb::LeasewebProvider;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "tralala";
pub const INSTANCE_ID: &str = "ace712e9-a166-47f1-9065-4af0f7e7fce1";
pub const LOAD_BALANCER_ID: &str = "32748470-55e6-4e4e-9e1c-c37b4d27d1ad";
pub const TARGET_GROUP_ID: &str = "a2d3bd55-3d3b-4f0a-a6b9-5d08e8bb5f6e";
pub const SERVER_ID: &str = "12345";

pub const PUBLIC_CLOUD: &str = "/publicCloud/v1";
pub const DEDICATED_SERVER: &str = "/bareMetals/v2/servers";

/// Waits resolve immediately instead of every ten seconds.
pub fn fast_poll() -> PollSettings {
    PollSettings {
        interval: Duration::from_millis(10),
        attempts: 3,
    }
}

/// A provider configured against `server`.
pub async fn tester(server: &MockServer) -> ProviderTester<LeasewebProvider> {
    let tester = ProviderTester::new(LeasewebProvider::new("test").with_poll_settings(fast_poll()));
    tester
        .configure(json!({
            "host": server.address().to_string(),
            "scheme": "http",
            "token": TOKEN,
        }))
        .await
        .unwrap();
    tester
}

pub async fn mock_json(server: &MockServer, http_method: &str, url: String, status: u16, body: Value) {
    Mock::given(method(http_method))
        .and(path(url))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mock_empty(server: &MockServer, http_method: &str, url: String, status: u16) {
    Mock::given(method(http_method))
        .and(path(url))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

pub fn not_found() -> Value {
    json!({
        "correlationId": "945bef2e-1caf-4027-bd0a-8976848f3dee",
        "errorCode": "404",
        "errorMessage": "Resource not found"
    })
}

pub fn hourly_contract() -> Value {
    json!({
        "billingFrequency": 1,
        "term": 0,
        "type": "HOURLY",
        "endsAt": null,
        "renewalsAt": "2024-07-01T00:00:00Z",
        "createdAt": "2024-06-01T09:15:00Z",
        "state": "ACTIVE"
    })
}

pub fn resources() -> Value {
    json!({
        "cpu": {"value": 4, "unit": "vCPU"},
        "memory": {"value": 8, "unit": "GiB"},
        "publicNetworkSpeed": {"value": 1000, "unit": "Mbps"},
        "privateNetworkSpeed": {"value": 1000, "unit": "Mbps"}
    })
}

/// Instance detail as returned by `GET /instances/{id}`.
pub fn instance(id: &str, has_private_network: bool) -> Value {
    json!({
        "id": id,
        "type": "lsw.m3.large",
        "resources": resources(),
        "region": "eu-west-3",
        "reference": "my webserver",
        "image": {
            "id": "UBUNTU_20_04_64BIT",
            "name": "Ubuntu 20.04 LTS (x86_64)",
            "family": "ubuntu",
            "flavour": "ubuntu",
            "custom": false,
            "marketApps": [],
            "storageTypes": ["LOCAL", "CENTRAL"]
        },
        "state": "RUNNING",
        "productType": "INSTANCE",
        "hasPublicIpV4": true,
        "includesPrivateNetwork": false,
        "hasPrivateNetwork": has_private_network,
        "rootDiskSize": 50,
        "rootDiskStorageType": "CENTRAL",
        "startedAt": "2024-06-01T09:20:00Z",
        "contract": hourly_contract(),
        "ips": [{
            "ip": "10.32.60.12",
            "prefixLength": "28",
            "version": 4,
            "nullRouted": false,
            "mainIp": true,
            "networkType": "PUBLIC",
            "reverseLookup": "example.com",
            "ddos": {"detectionProfile": "ADVANCED_DEFAULT", "protectionType": "ADVANCED"}
        }],
        "iso": null,
        "marketAppId": null,
        "privateNetwork": null,
        "autoScalingGroup": null
    })
}

pub fn load_balancer(id: &str) -> Value {
    json!({
        "id": id,
        "type": "lsw.m3.large",
        "resources": resources(),
        "region": "eu-west-3",
        "reference": "frontend",
        "state": "RUNNING",
        "contract": hourly_contract(),
        "startedAt": "2024-06-01T09:20:00Z",
        "ips": [{
            "ip": "10.32.60.20",
            "prefixLength": "28",
            "version": 4,
            "networkType": "PUBLIC"
        }],
        "configuration": {
            "balance": "roundrobin",
            "xForwardedFor": true,
            "idleTimeOut": 30,
            "targetPort": 80,
            "stickySession": {"enabled": false, "maxLifeTime": 3600},
            "healthCheck": {"method": "GET", "uri": "/health", "host": null, "port": 80}
        },
        "privateNetwork": null
    })
}

pub fn target_group(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "protocol": "HTTP",
        "port": 80,
        "region": "eu-west-3",
        "healthCheck": {
            "protocol": "HTTP",
            "method": "GET",
            "uri": "/health",
            "host": "example.com",
            "port": 80
        }
    })
}

pub fn metadata(total_count: i64, limit: i64, offset: i64) -> Value {
    json!({"totalCount": total_count, "limit": limit, "offset": offset})
}

/// Terraform configuration of `leaseweb_public_cloud_instance`.
pub fn instance_config() -> Value {
    json!({
        "region": "eu-west-3",
        "type": "lsw.m3.large",
        "reference": "my webserver",
        "root_disk_storage_type": "CENTRAL",
        "image": {"id": "UBUNTU_20_04_64BIT"},
        "contract": {"billing_frequency": 1, "term": 0, "type": "HOURLY"}
    })
}
