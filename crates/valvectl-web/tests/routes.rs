//! Integration tests for the valve control routes.
//!
//! These tests drive the real router in process and verify the bodies the
//! page script and setup form depend on.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use valvectl_core::{ConfigStore, WifiCredentials};
use valvectl_web::{create_router, ServerState};

fn test_router() -> Router {
    let credentials = WifiCredentials::new("HomeNet", "hunter22", "192.168.1.50").unwrap();
    create_router(ServerState::shared(ConfigStore::factory(credentials), None))
}

async fn get(router: Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn post_form(router: Router, uri: &str, form: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_control_page() {
    let (status, body) = get(test_router(), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("http://192.168.1.50/valves/script.js"));
    assert!(body.contains("http://192.168.1.50/valves/style.css"));
    assert!(body.contains("Garden Lights: OFF"));
    for index in 0..8 {
        assert!(body.contains(&format!("id='valve_{index}'")));
    }
}

#[tokio::test]
async fn test_action_toggles_and_reports_table() {
    let router = test_router();

    let (status, body) = get(router.clone(), "/action?valveno=0&valvestatus=on").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    let valves = json["valves"].as_array().unwrap();
    assert_eq!(valves.len(), 8);
    assert_eq!(valves[0]["no"], 0);
    assert_eq!(valves[0]["status"], "ON");
    assert_eq!(valves[0]["label"], "Garden Lights");
    assert_eq!(valves[1]["status"], "OFF");
    assert_eq!(valves[7]["status"], "OFFLINE");

    // The control page reflects the toggle
    let (_, page) = get(router.clone(), "/").await;
    assert!(page.contains("Garden Lights: ON"));
    assert!(page.contains("fill='#00D800'"));

    // And back off again
    let (status, body) = get(router, "/action?valveno=0&valvestatus=off").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["valves"][0]["status"], "OFF");
}

#[tokio::test]
async fn test_action_rejects_bad_requests() {
    let router = test_router();

    // Out-of-range index
    let (status, _) = get(router.clone(), "/action?valveno=8&valvestatus=on").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unassigned slot
    let (status, _) = get(router.clone(), "/action?valveno=7&valvestatus=on").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown status word
    let (status, _) = get(router.clone(), "/action?valveno=0&valvestatus=open").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // No mutation happened
    let (_, body) = get(router, "/api/valves").await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(json
        .as_array()
        .unwrap()
        .iter()
        .all(|v| v["status"] == false));
}

#[tokio::test]
async fn test_api_valves_shape() {
    let (status, body) = get(test_router(), "/api/valves").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    let valves = json.as_array().unwrap();
    assert_eq!(valves.len(), 8);
    assert_eq!(valves[0]["pin"], 12);
    assert_eq!(valves[0]["label"], "Garden Lights");
    // Unassigned slots omit the pin field
    assert!(valves[7].get("pin").is_none());
}

#[tokio::test]
async fn test_setup_flow_updates_rendered_host() {
    let router = test_router();

    let (status, body) = get(router.clone(), "/setup").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"action="configuration.save""#));

    let (status, body) = post_form(
        router.clone(),
        "/configuration.save",
        "_ssid=Shed&_password=pw&_host=10.0.0.9",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Configuration saved"));

    let (_, page) = get(router, "/").await;
    assert!(page.contains("http://10.0.0.9/valves/script.js"));
    assert!(!page.contains("192.168.1.50"));
}

#[tokio::test]
async fn test_setup_rejects_over_long_host() {
    let (status, _) = post_form(
        test_router(),
        "/configuration.save",
        "_ssid=Shed&_password=pw&_host=a-very-long-host-name.example.org",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
