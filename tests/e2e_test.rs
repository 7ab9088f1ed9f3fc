//! End-to-end tests for the complete bridge flow.
//!
//! Runs a real server on an ephemeral port and drives it over the wire:
//! inbound notification in, formatted alert out to a mocked paging API,
//! downstream status passed back to the caller.

use std::time::Duration;

use alertgate_api::{create_router, AppState};
use alertgate_core::{Credential, WorkflowRegistry};
use alertgate_delivery::{AlertClient, ClientConfig};
use alertgate_testing::{
    fixtures::{self, DETECTION_WORKFLOW_ID},
    http::assertions,
    TestEnv,
};
use serde_json::json;

/// Binds the bridge on an ephemeral port and returns its base URL.
async fn spawn_bridge(env: &TestEnv) -> String {
    let client = AlertClient::new(ClientConfig {
        endpoint: env.alert_api.alerts_url(),
        ..ClientConfig::default()
    })
    .expect("build client");

    let state = AppState::new(
        WorkflowRegistry::new([DETECTION_WORKFLOW_ID, fixtures::INCIDENT_WORKFLOW_ID]),
        client,
        Credential::new("e2e-genie-key"),
    );
    let app = create_router(state, Duration::from_secs(30));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn detection_event_is_bridged_to_the_paging_api() {
    let env = TestEnv::new().await.expect("test env setup");
    env.alert_api.respond_to_credential("e2e-genie-key", 202, "Request will be processed").await;

    let base_url = spawn_bridge(&env).await;

    let response = reqwest::Client::new()
        .post(format!("{base_url}/events"))
        .json(&fixtures::detection_event())
        .send()
        .await
        .expect("send event");

    assert_eq!(response.status().as_u16(), 202);

    let body: serde_json::Value = response.json().await.expect("parse response");
    assert_eq!(body["statusCode"], 202);
    assert_eq!(body["body"], "Request will be processed");

    let requests = env.alert_api.received_requests().await;
    assert_eq!(requests.len(), 1);
    assertions::assert_json_body(
        &requests[0],
        &json!({
            "message": "New detection has occurred",
            "description": "Severity:  High\n"
        }),
    );
}

#[tokio::test]
async fn unknown_workflow_is_acknowledged_end_to_end() {
    let env = TestEnv::new().await.expect("test env setup");
    env.alert_api.respond_accepted().await;

    let base_url = spawn_bridge(&env).await;

    let response = reqwest::Client::new()
        .post(format!("{base_url}/events"))
        .json(&fixtures::unknown_workflow_event())
        .send()
        .await
        .expect("send event");

    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.expect("parse response");
    assert_eq!(body["body"], "ignored");

    env.alert_api.assert_request_count(0).await;
}

#[tokio::test]
async fn multi_field_incident_keeps_field_order() {
    let env = TestEnv::new().await.expect("test env setup");
    env.alert_api.respond_accepted().await;

    let base_url = spawn_bridge(&env).await;

    let payload = fixtures::event_payload(
        fixtures::INCIDENT_WORKFLOW_ID,
        "New Incident Declared",
        &[
            ("incidents.incident_id", "INC-42"),
            ("incidents.state", "open"),
            ("incidents.assigned_to", "jsmith"),
        ],
    );

    let response = reqwest::Client::new()
        .post(format!("{base_url}/events"))
        .json(&payload)
        .send()
        .await
        .expect("send event");

    assert_eq!(response.status().as_u16(), 202);

    let requests = env.alert_api.received_requests().await;
    assert_eq!(requests.len(), 1);
    assertions::assert_json_body(
        &requests[0],
        &json!({
            "message": "New incident has occurred",
            "description": "Incident id:  INC-42\nState:  open\nAssigned to:  jsmith\n"
        }),
    );
}
