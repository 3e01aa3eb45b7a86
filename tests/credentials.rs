mod common;

use common::{
    mock_empty, mock_json, not_found, tester, DEDICATED_SERVER, INSTANCE_ID, PUBLIC_CLOUD,
    SERVER_ID,
};
use serde_json::{json, Value};
use terraform_provider_leaseweb::testing::{
    assert_attribute_error, assert_plan_no_changes, assert_plan_replaces,
    assert_plan_updates_in_place,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PUBLIC_CLOUD_CREDENTIAL: &str = "leaseweb_public_cloud_credential";
const DEDICATED_SERVER_CREDENTIAL: &str = "leaseweb_dedicated_server_credential";
const BANDWIDTH_SETTING: &str = "leaseweb_dedicated_server_notification_setting_bandwidth";

fn credential(password: &str) -> Value {
    json!({"type": "OPERATING_SYSTEM", "username": "root", "password": password})
}

fn bandwidth_setting(threshold: &str) -> Value {
    json!({
        "id": "12345",
        "frequency": "WEEKLY",
        "threshold": threshold,
        "unit": "Gbps",
        "lastCheckedAt": null,
        "thresholdExceededAt": null
    })
}

#[tokio::test]
async fn test_public_cloud_credential_lifecycle() {
    let mock_server = MockServer::start().await;
    let credentials = format!("{PUBLIC_CLOUD}/instances/{INSTANCE_ID}/credentials");
    let detail = format!("{credentials}/OPERATING_SYSTEM/root");

    Mock::given(method("POST"))
        .and(path(credentials))
        .and(body_json(credential("mys3cr3tp@ssw0rd")))
        .respond_with(ResponseTemplate::new(201).set_body_json(credential("mys3cr3tp@ssw0rd")))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(detail.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(credential("mys3cr3tp@ssw0rd")))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mock_json(&mock_server, "GET", detail.clone(), 200, credential("n3wp@ssw0rd")).await;

    Mock::given(method("PUT"))
        .and(path(detail.clone()))
        .and(body_json(json!({"password": "n3wp@ssw0rd"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(credential("n3wp@ssw0rd")))
        .expect(1)
        .mount(&mock_server)
        .await;
    mock_empty(&mock_server, "DELETE", detail, 204).await;

    let tester = tester(&mock_server).await;
    let config = json!({
        "instance_id": INSTANCE_ID,
        "type": "OPERATING_SYSTEM",
        "username": "root",
        "password": "mys3cr3tp@ssw0rd"
    });

    let state = tester
        .lifecycle_create(PUBLIC_CLOUD_CREDENTIAL, config.clone())
        .await
        .unwrap();
    assert_eq!(state["instance_id"], INSTANCE_ID);
    assert_eq!(state["password"], "mys3cr3tp@ssw0rd");

    let mut new_config = config.clone();
    new_config["password"] = json!("n3wp@ssw0rd");
    let plan = tester
        .plan_update(PUBLIC_CLOUD_CREDENTIAL, state.clone(), new_config.clone())
        .await
        .unwrap();
    assert_plan_updates_in_place(&plan);

    let updated = tester
        .lifecycle_update(PUBLIC_CLOUD_CREDENTIAL, state, new_config)
        .await
        .unwrap();
    assert_eq!(updated["password"], "n3wp@ssw0rd");

    tester
        .lifecycle_delete(PUBLIC_CLOUD_CREDENTIAL, updated)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_public_cloud_credential_username_change_replaces() {
    let mock_server = MockServer::start().await;
    let tester = tester(&mock_server).await;

    let prior = json!({
        "instance_id": INSTANCE_ID,
        "type": "OPERATING_SYSTEM",
        "username": "root",
        "password": "mys3cr3tp@ssw0rd"
    });
    let mut config = prior.clone();
    config["username"] = json!("admin");

    let plan = tester
        .plan_update(PUBLIC_CLOUD_CREDENTIAL, prior, config)
        .await
        .unwrap();
    assert_plan_replaces(&plan);
}

#[tokio::test]
async fn test_public_cloud_credential_unchanged_config_plans_nothing() {
    let mock_server = MockServer::start().await;
    let tester = tester(&mock_server).await;

    let prior = json!({
        "instance_id": INSTANCE_ID,
        "type": "OPERATING_SYSTEM",
        "username": "root",
        "password": "mys3cr3tp@ssw0rd"
    });

    let plan = tester
        .plan_update(PUBLIC_CLOUD_CREDENTIAL, prior.clone(), prior)
        .await
        .unwrap();
    assert_plan_no_changes(&plan);
    assert!(!plan.requires_replace);
}

#[tokio::test]
async fn test_public_cloud_credential_rejects_unknown_type() {
    let mock_server = MockServer::start().await;
    let tester = tester(&mock_server).await;

    let err = tester
        .validate_resource_config(
            PUBLIC_CLOUD_CREDENTIAL,
            json!({
                "instance_id": INSTANCE_ID,
                "type": "FIREWALL",
                "username": "root",
                "password": "secret"
            }),
        )
        .await
        .unwrap_err();

    assert_attribute_error(
        &err.into_diagnostics(),
        "type",
        "Invalid Attribute Value Match",
        r#"got: "FIREWALL""#,
    );
}

#[tokio::test]
async fn test_dedicated_server_credential_lifecycle() {
    let mock_server = MockServer::start().await;
    let credentials = format!("{DEDICATED_SERVER}/{SERVER_ID}/credentials");
    let detail = format!("{credentials}/OPERATING_SYSTEM/root");

    Mock::given(method("POST"))
        .and(path(credentials))
        .and(body_json(credential("s3cr3t")))
        .respond_with(ResponseTemplate::new(201).set_body_json(credential("s3cr3t")))
        .expect(1)
        .mount(&mock_server)
        .await;
    mock_json(&mock_server, "GET", detail.clone(), 200, credential("s3cr3t")).await;
    mock_empty(&mock_server, "DELETE", detail, 204).await;

    let tester = tester(&mock_server).await;
    let state = tester
        .lifecycle_create(
            DEDICATED_SERVER_CREDENTIAL,
            json!({
                "dedicated_server_id": SERVER_ID,
                "type": "OPERATING_SYSTEM",
                "username": "root",
                "password": "s3cr3t"
            }),
        )
        .await
        .unwrap();

    assert_eq!(state["dedicated_server_id"], SERVER_ID);
    assert_eq!(state["type"], "OPERATING_SYSTEM");

    tester
        .lifecycle_delete(DEDICATED_SERVER_CREDENTIAL, state)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_dedicated_server_credential_gone() {
    let mock_server = MockServer::start().await;
    mock_json(
        &mock_server,
        "GET",
        format!("{DEDICATED_SERVER}/{SERVER_ID}/credentials/OPERATING_SYSTEM/root"),
        404,
        not_found(),
    )
    .await;

    let tester = tester(&mock_server).await;
    let state = tester
        .read(
            DEDICATED_SERVER_CREDENTIAL,
            json!({
                "dedicated_server_id": SERVER_ID,
                "type": "OPERATING_SYSTEM",
                "username": "root",
                "password": "s3cr3t"
            }),
        )
        .await
        .unwrap();

    assert!(state.is_null());
}

#[tokio::test]
async fn test_bandwidth_notification_setting_lifecycle() {
    let mock_server = MockServer::start().await;
    let settings = format!("{DEDICATED_SERVER}/{SERVER_ID}/notificationSettings/bandwidth");
    let detail = format!("{settings}/12345");

    Mock::given(method("POST"))
        .and(path(settings))
        .and(body_json(json!({"frequency": "WEEKLY", "threshold": "1", "unit": "Gbps"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(bandwidth_setting("1")))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(detail.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(bandwidth_setting("1")))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mock_json(&mock_server, "GET", detail.clone(), 200, bandwidth_setting("2")).await;

    Mock::given(method("PUT"))
        .and(path(detail.clone()))
        .and(body_json(json!({"frequency": "WEEKLY", "threshold": "2", "unit": "Gbps"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(bandwidth_setting("2")))
        .expect(1)
        .mount(&mock_server)
        .await;
    mock_empty(&mock_server, "DELETE", detail, 204).await;

    let tester = tester(&mock_server).await;
    let config = json!({
        "dedicated_server_id": SERVER_ID,
        "frequency": "WEEKLY",
        "threshold": "1",
        "unit": "Gbps"
    });

    let state = tester
        .lifecycle_create(BANDWIDTH_SETTING, config.clone())
        .await
        .unwrap();
    assert_eq!(state["id"], "12345");
    assert_eq!(state["threshold"], "1");

    let mut new_config = config;
    new_config["threshold"] = json!("2");
    let updated = tester
        .lifecycle_update(BANDWIDTH_SETTING, state, new_config)
        .await
        .unwrap();
    assert_eq!(updated["id"], "12345");
    assert_eq!(updated["threshold"], "2");

    tester
        .lifecycle_delete(BANDWIDTH_SETTING, updated)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_bandwidth_notification_setting_rejects_zero_threshold() {
    let mock_server = MockServer::start().await;
    let tester = tester(&mock_server).await;

    let err = tester
        .validate_resource_config(
            BANDWIDTH_SETTING,
            json!({
                "dedicated_server_id": SERVER_ID,
                "frequency": "WEEKLY",
                "threshold": "0",
                "unit": "Gbps"
            }),
        )
        .await
        .unwrap_err();

    assert_attribute_error(
        &err.into_diagnostics(),
        "threshold",
        "Invalid Attribute Value",
        "must be a number greater than 0",
    );
}
