mod common;

use common::{instance, metadata, not_found, INSTANCE_ID, PUBLIC_CLOUD, TOKEN};
use serde_json::json;
use terraform_provider_leaseweb::sdk::models::TerminateOpts;
use terraform_provider_leaseweb::sdk::{ApiError, LeasewebClient};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_requests_carry_auth_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{PUBLIC_CLOUD}/instances/{INSTANCE_ID}")))
        .and(header("x-lsw-auth", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(instance(INSTANCE_ID, false)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LeasewebClient::with_base_url(TOKEN, mock_server.uri()).unwrap();
    let instance = client.public_cloud().get_instance(INSTANCE_ID).await.unwrap();

    assert_eq!(instance.id, INSTANCE_ID);
    assert_eq!(instance.r#type, "lsw.m3.large");
    assert_eq!(instance.contract.r#type, "HOURLY");
    assert_eq!(instance.ips[0].network_type, "PUBLIC");
}

#[tokio::test]
async fn test_list_follows_pagination_metadata() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{PUBLIC_CLOUD}/instances")))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "instances": [
                instance("ace712e9-a166-47f1-9065-4af0f7e7fce1", false),
                instance("1f3c4b1e-7d0a-4b4b-8f6c-2a1f0a5a7c11", false)
            ],
            "_metadata": metadata(3, 2, 0)
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("{PUBLIC_CLOUD}/instances")))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "instances": [instance("5d7f1a8e-3c2b-4e6a-9b1d-8c4e2f6a0b33", false)],
            "_metadata": metadata(3, 2, 2)
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LeasewebClient::with_base_url(TOKEN, mock_server.uri()).unwrap();
    let instances = client.public_cloud().get_instances().await.unwrap();

    let ids: Vec<_> = instances.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "ace712e9-a166-47f1-9065-4af0f7e7fce1",
            "1f3c4b1e-7d0a-4b4b-8f6c-2a1f0a5a7c11",
            "5d7f1a8e-3c2b-4e6a-9b1d-8c4e2f6a0b33",
        ]
    );
}

#[tokio::test]
async fn test_terminate_sends_reason() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("{PUBLIC_CLOUD}/instances/{INSTANCE_ID}")))
        .and(body_json(json!({"reasonCode": "CANCEL_OTHER", "reason": "Terraform"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LeasewebClient::with_base_url(TOKEN, mock_server.uri()).unwrap();
    client
        .public_cloud()
        .terminate_instance(INSTANCE_ID)
        .await
        .unwrap();

    assert_eq!(TerminateOpts::default().reason, "Terraform");
}

#[tokio::test]
async fn test_error_response_keeps_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{PUBLIC_CLOUD}/instances/{INSTANCE_ID}")))
        .respond_with(ResponseTemplate::new(404).set_body_json(not_found()))
        .mount(&mock_server)
        .await;

    let client = LeasewebClient::with_base_url(TOKEN, mock_server.uri()).unwrap();
    let err = client
        .public_cloud()
        .get_instance(INSTANCE_ID)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    match err {
        ApiError::Response { body: Some(body), .. } => {
            assert_eq!(body.error_message, "Resource not found");
            assert_eq!(body.correlation_id, "945bef2e-1caf-4027-bd0a-8976848f3dee");
        },
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_dedicated_server_credential_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bareMetals/v2/servers/12345/credentials/OPERATING_SYSTEM/root"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "OPERATING_SYSTEM",
            "username": "root",
            "password": "secret"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LeasewebClient::with_base_url(TOKEN, mock_server.uri()).unwrap();
    let credential = client
        .dedicated_server()
        .get_credential("12345", "OPERATING_SYSTEM", "root")
        .await
        .unwrap();

    assert_eq!(credential.username, "root");
    assert_eq!(credential.password, "secret");
}
