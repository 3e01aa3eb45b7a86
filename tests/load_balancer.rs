mod common;

use common::{
    load_balancer, mock_empty, mock_json, target_group, tester, LOAD_BALANCER_ID, PUBLIC_CLOUD,
    TARGET_GROUP_ID,
};
use serde_json::{json, Value};
use terraform_provider_leaseweb::testing::{
    assert_error_contains, assert_plan_does_not_change_attribute, assert_plan_replaces,
    assert_plan_updates_in_place,
};
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LOAD_BALANCER: &str = "leaseweb_public_cloud_load_balancer";
const TARGET_GROUP: &str = "leaseweb_public_cloud_target_group";

fn load_balancer_config() -> Value {
    json!({
        "region": "eu-west-3",
        "type": "lsw.m3.large",
        "reference": "frontend",
        "contract": {"billing_frequency": 1, "term": 0, "type": "HOURLY"}
    })
}

fn target_group_config() -> Value {
    json!({
        "name": "web",
        "protocol": "HTTP",
        "port": 80,
        "region": "eu-west-3",
        "health_check": {
            "protocol": "HTTP",
            "method": "GET",
            "uri": "/health",
            "host": "example.com",
            "port": 80
        }
    })
}

#[tokio::test]
async fn test_load_balancer_lifecycle() {
    let mock_server = MockServer::start().await;
    let detail_path = format!("{PUBLIC_CLOUD}/loadBalancers/{LOAD_BALANCER_ID}");

    Mock::given(method("POST"))
        .and(path(format!("{PUBLIC_CLOUD}/loadBalancers")))
        .and(body_json(json!({
            "region": "eu-west-3",
            "type": "lsw.m3.large",
            "contractType": "HOURLY",
            "contractTerm": 0,
            "billingFrequency": 1,
            "reference": "frontend"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(load_balancer(LOAD_BALANCER_ID)))
        .expect(1)
        .mount(&mock_server)
        .await;
    mock_json(&mock_server, "GET", detail_path.clone(), 200, load_balancer(LOAD_BALANCER_ID)).await;

    let mut renamed = load_balancer(LOAD_BALANCER_ID);
    renamed["reference"] = json!("backend");
    Mock::given(method("PUT"))
        .and(path(detail_path.clone()))
        .and(body_partial_json(json!({"reference": "backend"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(renamed))
        .expect(1)
        .mount(&mock_server)
        .await;
    mock_empty(&mock_server, "DELETE", detail_path, 204).await;

    let tester = tester(&mock_server).await;

    let state = tester
        .lifecycle_create(LOAD_BALANCER, load_balancer_config())
        .await
        .unwrap();
    assert_eq!(state["id"], LOAD_BALANCER_ID);
    assert_eq!(state["contract"]["state"], "ACTIVE");

    let mut config = load_balancer_config();
    config["reference"] = json!("backend");

    let plan = tester
        .plan_update(LOAD_BALANCER, state.clone(), config.clone())
        .await
        .unwrap();
    assert_plan_updates_in_place(&plan);
    assert_plan_does_not_change_attribute(&plan, "region");

    let updated = tester
        .update(LOAD_BALANCER, state, plan.planned_state)
        .await
        .unwrap();
    assert_eq!(updated["reference"], "backend");

    tester.lifecycle_delete(LOAD_BALANCER, updated).await.unwrap();
}

#[tokio::test]
async fn test_load_balancer_rejects_monthly_without_term() {
    let mock_server = MockServer::start().await;
    let tester = tester(&mock_server).await;

    let mut config = load_balancer_config();
    config["contract"] = json!({"billing_frequency": 1, "term": 0, "type": "MONTHLY"});

    let err = tester
        .validate_resource_config(LOAD_BALANCER, config)
        .await
        .unwrap_err();
    assert_error_contains(&err.into_diagnostics(), "Invalid Contract Term");
}

#[tokio::test]
async fn test_load_balancer_import() {
    let mock_server = MockServer::start().await;
    mock_json(
        &mock_server,
        "GET",
        format!("{PUBLIC_CLOUD}/loadBalancers/{LOAD_BALANCER_ID}"),
        200,
        load_balancer(LOAD_BALANCER_ID),
    )
    .await;

    let tester = tester(&mock_server).await;
    let imported = tester
        .import_resource(LOAD_BALANCER, LOAD_BALANCER_ID)
        .await
        .unwrap();

    assert_eq!(imported[0].state["type"], "lsw.m3.large");
    assert_eq!(imported[0].state["reference"], "frontend");
}

#[tokio::test]
async fn test_target_group_lifecycle() {
    let mock_server = MockServer::start().await;
    let detail_path = format!("{PUBLIC_CLOUD}/targetGroups/{TARGET_GROUP_ID}");

    Mock::given(method("POST"))
        .and(path(format!("{PUBLIC_CLOUD}/targetGroups")))
        .and(body_json(json!({
            "name": "web",
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
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(target_group(TARGET_GROUP_ID, "web")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    // The first read sees the created group, later reads the renamed one.
    Mock::given(method("GET"))
        .and(path(detail_path.clone()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(target_group(TARGET_GROUP_ID, "web")),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mock_json(
        &mock_server,
        "GET",
        detail_path.clone(),
        200,
        target_group(TARGET_GROUP_ID, "api"),
    )
    .await;

    Mock::given(method("PUT"))
        .and(path(detail_path.clone()))
        .and(body_partial_json(json!({"name": "api", "port": 80})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(target_group(TARGET_GROUP_ID, "api")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    mock_empty(&mock_server, "DELETE", detail_path, 204).await;

    let tester = tester(&mock_server).await;

    let state = tester
        .lifecycle_create(TARGET_GROUP, target_group_config())
        .await
        .unwrap();
    assert_eq!(state["id"], TARGET_GROUP_ID);
    assert_eq!(state["health_check"]["uri"], "/health");

    let mut config = target_group_config();
    config["name"] = json!("api");
    let updated = tester
        .lifecycle_update(TARGET_GROUP, state, config)
        .await
        .unwrap();
    assert_eq!(updated["name"], "api");

    tester.lifecycle_delete(TARGET_GROUP, updated).await.unwrap();
}

#[tokio::test]
async fn test_target_group_replaced_when_health_check_removed() {
    let mock_server = MockServer::start().await;
    mock_json(
        &mock_server,
        "GET",
        format!("{PUBLIC_CLOUD}/targetGroups/{TARGET_GROUP_ID}"),
        200,
        target_group(TARGET_GROUP_ID, "web"),
    )
    .await;

    let tester = tester(&mock_server).await;
    let mut prior = target_group_config();
    prior["id"] = json!(TARGET_GROUP_ID);
    let prior = tester.read(TARGET_GROUP, prior).await.unwrap();

    let mut config = target_group_config();
    config.as_object_mut().unwrap().remove("health_check");

    let plan = tester
        .plan_update(TARGET_GROUP, prior, config)
        .await
        .unwrap();
    assert_plan_replaces(&plan);
}
