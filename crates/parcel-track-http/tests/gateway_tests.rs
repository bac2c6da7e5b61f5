use std::time::Duration;

use parcel_track::{Action, Gateway, Outcome, Payload};
use parcel_track_http::{HttpGateway, HttpGatewayConfig};
use serde_json::json;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway_for(server: &MockServer) -> HttpGateway {
    HttpGateway::new(HttpGatewayConfig::new(server.uri())).unwrap()
}

#[tokio::test]
async fn update_title_posts_encoded_form() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/updatePackageTitle"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("newTitle=Mum+%26+Dad&packageID=4"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Mum & Dad"))
        .expect(1)
        .mount(&server)
        .await;

    let payload = Payload::new()
        .field("newTitle", "Mum & Dad")
        .field("packageID", "4");
    let outcome = gateway_for(&server)
        .submit(Action::UpdateTitle, &payload)
        .await;

    assert_eq!(outcome, Outcome::ok("Mum & Dad"));
}

#[tokio::test]
async fn delete_posts_package_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/deletePackage"))
        .and(body_string("packageID=11"))
        .respond_with(ResponseTemplate::new(200).set_body_string("1"))
        .expect(1)
        .mount(&server)
        .await;

    let payload = Payload::new().field("packageID", "11");
    let outcome = gateway_for(&server)
        .submit(Action::DeletePackage, &payload)
        .await;

    assert_eq!(outcome.status, 200);
    assert_eq!(outcome.body, "1");
}

#[tokio::test]
async fn tracking_data_body_is_passed_through() {
    let server = MockServer::start().await;
    let body = json!({
        "success": true,
        "data": ["meta", {"date": "2024-05-01", "time": "09:12", "data": "Arrived at depot"}]
    });

    Mock::given(method("POST"))
        .and(path("/packageData"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let payload = Payload::new().field("packageID", "2");
    let outcome = gateway_for(&server)
        .submit(Action::FetchTrackingData, &payload)
        .await;

    let parsed: serde_json::Value = serde_json::from_str(&outcome.body).unwrap();
    assert_eq!(parsed, body);
}

#[tokio::test]
async fn non_2xx_status_keeps_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/deletePackage"))
        .respond_with(ResponseTemplate::new(403).set_body_string("not logged in"))
        .mount(&server)
        .await;

    let outcome = gateway_for(&server)
        .submit(Action::DeletePackage, &Payload::new().field("packageID", "1"))
        .await;

    assert_eq!(outcome, Outcome::new(403, "not logged in"));
}

#[tokio::test]
async fn session_cookie_is_forwarded() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/deletePackage"))
        .and(header("cookie", "session=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_string("1"))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = HttpGatewayConfig::new(server.uri());
    config.session_cookie = Some("session=abc123".into());
    let gateway = HttpGateway::new(config).unwrap();

    let outcome = gateway
        .submit(Action::DeletePackage, &Payload::new().field("packageID", "1"))
        .await;
    assert_eq!(outcome.status, 200);
}

#[tokio::test]
async fn timeout_is_a_transport_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/packageData"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{}")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let mut config = HttpGatewayConfig::new(server.uri());
    config.timeout = Some(Duration::from_millis(100));
    let gateway = HttpGateway::new(config).unwrap();

    let outcome = gateway
        .submit(Action::FetchTrackingData, &Payload::new().field("packageID", "1"))
        .await;
    assert_eq!(outcome.status, 0);
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_failure() {
    // Nothing listens on port 9 (discard) in test environments.
    let gateway = HttpGateway::new(HttpGatewayConfig::new("http://127.0.0.1:9")).unwrap();

    let outcome = gateway
        .submit(Action::DeletePackage, &Payload::new().field("packageID", "1"))
        .await;
    assert_eq!(outcome.status, 0);
    assert!(!outcome.body.is_empty());
}

#[tokio::test]
async fn each_submit_is_exactly_one_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/deletePackage"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = gateway_for(&server)
        .submit(Action::DeletePackage, &Payload::new().field("packageID", "1"))
        .await;
    assert_eq!(outcome.status, 500);
}
