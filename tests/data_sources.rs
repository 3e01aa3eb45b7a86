mod common;

use common::{
    instance, load_balancer, metadata, mock_json, tester, INSTANCE_ID, LOAD_BALANCER_ID,
    PUBLIC_CLOUD,
};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INSTANCES: &str = "leaseweb_public_cloud_instances";
const LOAD_BALANCERS: &str = "leaseweb_public_cloud_load_balancers";

const AUTO_SCALING_GROUP_ID: &str = "90b9f2cc-c655-40ea-b01a-58c00e175c96";

fn auto_scaling_group() -> Value {
    json!({
        "id": AUTO_SCALING_GROUP_ID,
        "type": "CPU_BASED",
        "state": "ACTIVE",
        "desiredAmount": null,
        "region": "eu-west-3",
        "reference": "web autoscaling",
        "createdAt": "2024-06-01T09:00:00Z",
        "updatedAt": "2024-06-01T09:00:00Z",
        "startsAt": null,
        "endsAt": null,
        "minimumAmount": 1,
        "maximumAmount": 4,
        "cpuThreshold": 80,
        "warmupTime": 300,
        "cooldownTime": 300,
        "loadBalancer": {"id": LOAD_BALANCER_ID}
    })
}

#[tokio::test]
async fn test_instances_data_source() {
    let mock_server = MockServer::start().await;

    let mut scaled = instance("4d1c4b0e-2f0a-4a57-a1d1-ad3c1fcfb5a6", false);
    scaled["autoScalingGroup"] = json!({"id": AUTO_SCALING_GROUP_ID});
    let mut second_scaled = instance("b8c2e0f1-0d7b-4fd6-8b8e-6a1b2e4c5d7f", false);
    second_scaled["autoScalingGroup"] = json!({"id": AUTO_SCALING_GROUP_ID});

    mock_json(
        &mock_server,
        "GET",
        format!("{PUBLIC_CLOUD}/instances"),
        200,
        json!({
            "instances": [
                instance(INSTANCE_ID, false),
                scaled,
                second_scaled,
                instance("f3a0bde4-90e5-4b0f-8c1d-7a6f25f4c1e2", true)
            ],
            "_metadata": metadata(4, 50, 0)
        }),
    )
    .await;

    // Shared groups are only fetched once.
    Mock::given(method("GET"))
        .and(path(format!(
            "{PUBLIC_CLOUD}/autoScalingGroups/{AUTO_SCALING_GROUP_ID}"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(auto_scaling_group()))
        .expect(1)
        .mount(&mock_server)
        .await;
    mock_json(
        &mock_server,
        "GET",
        format!("{PUBLIC_CLOUD}/loadBalancers/{LOAD_BALANCER_ID}"),
        200,
        load_balancer(LOAD_BALANCER_ID),
    )
    .await;

    let tester = tester(&mock_server).await;
    tester
        .validate_data_source_config(INSTANCES, json!({}))
        .await
        .unwrap();
    let state = tester.read_data_source(INSTANCES, json!({})).await.unwrap();

    let instances = state["instances"].as_array().unwrap();
    assert_eq!(instances.len(), 4);
    assert_eq!(instances[0]["id"], INSTANCE_ID);
    assert_eq!(instances[0]["type"], "lsw.m3.large");
    assert_eq!(instances[0]["has_public_ipv4"], true);
    assert_eq!(instances[0]["contract"]["renewals_at"], "2024-07-01T00:00:00Z");
    assert_eq!(instances[0]["ips"][0]["ddos"]["protection_type"], "ADVANCED");
    assert!(instances[0]["auto_scaling_group"].is_null());
    assert_eq!(instances[3]["has_private_network"], true);

    let group = &instances[1]["auto_scaling_group"];
    assert_eq!(group["id"], AUTO_SCALING_GROUP_ID);
    assert_eq!(group["type"], "CPU_BASED");
    assert_eq!(group["cpu_threshold"], 80);
    assert_eq!(group["load_balancer"]["id"], LOAD_BALANCER_ID);
    assert_eq!(
        group["load_balancer"]["load_balancer_configuration"]["balance"],
        "roundrobin"
    );
    assert_eq!(instances[2]["auto_scaling_group"], *group);
}

#[tokio::test]
async fn test_instances_data_source_api_error() {
    let mock_server = MockServer::start().await;
    mock_json(
        &mock_server,
        "GET",
        format!("{PUBLIC_CLOUD}/instances"),
        500,
        json!({"correlationId": "abc", "errorCode": "500", "errorMessage": "Internal error"}),
    )
    .await;

    let tester = tester(&mock_server).await;
    let err = tester
        .read_data_source(INSTANCES, json!({}))
        .await
        .unwrap_err();

    assert_eq!(err.into_diagnostics()[0].summary, "Unable to read instances");
}

#[tokio::test]
async fn test_load_balancers_data_source_sorted_by_id() {
    let mock_server = MockServer::start().await;
    let ids = [
        "e4b1d6a2-7c1f-4d52-9d0b-2f8a3c5e6b71",
        LOAD_BALANCER_ID,
        "a0c3f5d9-1b2e-4c7a-8e6f-9d4b3a2c1e05",
    ];

    mock_json(
        &mock_server,
        "GET",
        format!("{PUBLIC_CLOUD}/loadBalancers"),
        200,
        json!({
            "loadBalancers": ids.iter().map(|id| load_balancer(id)).collect::<Vec<_>>(),
            "_metadata": metadata(3, 50, 0)
        }),
    )
    .await;
    for id in ids {
        mock_json(
            &mock_server,
            "GET",
            format!("{PUBLIC_CLOUD}/loadBalancers/{id}"),
            200,
            load_balancer(id),
        )
        .await;
    }

    let tester = tester(&mock_server).await;
    let state = tester
        .read_data_source(LOAD_BALANCERS, json!({}))
        .await
        .unwrap();

    let got: Vec<_> = state["load_balancers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|lb| lb["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        got,
        vec![
            LOAD_BALANCER_ID.to_string(),
            "a0c3f5d9-1b2e-4c7a-8e6f-9d4b3a2c1e05".to_string(),
            "e4b1d6a2-7c1f-4d52-9d0b-2f8a3c5e6b71".to_string(),
        ]
    );
    assert_eq!(state["load_balancers"][0]["ips"], json!([{"ip": "10.32.60.20"}]));
}

#[tokio::test]
async fn test_load_balancers_data_source_fails_on_detail_error() {
    let mock_server = MockServer::start().await;

    mock_json(
        &mock_server,
        "GET",
        format!("{PUBLIC_CLOUD}/loadBalancers"),
        200,
        json!({
            "loadBalancers": [load_balancer(LOAD_BALANCER_ID)],
            "_metadata": metadata(1, 50, 0)
        }),
    )
    .await;
    mock_json(
        &mock_server,
        "GET",
        format!("{PUBLIC_CLOUD}/loadBalancers/{LOAD_BALANCER_ID}"),
        503,
        json!({"correlationId": "abc", "errorCode": "503", "errorMessage": "Unavailable"}),
    )
    .await;

    let tester = tester(&mock_server).await;
    let err = tester
        .read_data_source(LOAD_BALANCERS, json!({}))
        .await
        .unwrap_err();

    assert_eq!(
        err.into_diagnostics()[0].summary,
        "Unable to read load balancers"
    );
}
