mod common;

use boosta::{ClientBuilder, VideoType};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{client_for, API_KEY};

#[tokio::test]
async fn submit_sends_bearer_token_and_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/jobs"))
        .and(header("authorization", format!("Bearer {API_KEY}").as_str()))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "video_url": "https://cdn.example.com/ep1.mp4",
            "video_type": "conversation",
            "config_name": "shorts-9x16",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "job_id": "J7" })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client_for(&server)
        .submit_job(
            "https://cdn.example.com/ep1.mp4",
            VideoType::Conversation,
            Some("shorts-9x16"),
        )
        .await;

    assert_eq!(resp.status_code, 201);
    assert_eq!(resp.job_id().as_deref(), Some("J7"));
}

#[tokio::test]
async fn submit_omits_absent_config_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/jobs"))
        .and(body_json(json!({
            "video_url": "https://cdn.example.com/ep1.mp4",
            "video_type": "faceless",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "job_id": "J8" })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client_for(&server)
        .submit_job("https://cdn.example.com/ep1.mp4", VideoType::Faceless, None)
        .await;

    assert_eq!(resp.status_code, 200);
}

#[tokio::test]
async fn empty_body_decodes_to_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/usage"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let resp = client_for(&server).get_usage().await;

    assert_eq!(resp.status_code, 204);
    assert!(resp.payload.is_empty());
}

#[tokio::test]
async fn non_json_body_is_kept_as_raw_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs/J1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("not json"))
        .mount(&server)
        .await;

    let resp = client_for(&server).get_job("J1").await;

    assert_eq!(resp.status_code, 502);
    assert_eq!(Value::Object(resp.payload), json!({ "raw": "not json" }));
}

#[tokio::test]
async fn error_status_is_returned_with_decoded_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs/nope"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "job_not_found" })),
        )
        .mount(&server)
        .await;

    let resp = client_for(&server).get_job("nope").await;

    assert_eq!(resp.status_code, 404);
    assert_eq!(resp.get_str("error"), Some("job_not_found"));
    assert!(!resp.is_success());
}

#[tokio::test]
async fn list_jobs_wraps_array_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "job_id": "A" }, { "job_id": "B" }])),
        )
        .mount(&server)
        .await;

    let resp = client_for(&server).list_jobs().await;

    assert_eq!(
        Value::Object(resp.payload),
        json!({ "data": [{ "job_id": "A" }, { "job_id": "B" }] })
    );
}

#[tokio::test]
async fn unreachable_server_yields_status_zero() {
    // Bind then release a port so nothing is listening on it.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = ClientBuilder::new()
        .api_key(API_KEY)
        .base_url(format!("http://127.0.0.1:{port}"))
        .build()
        .unwrap();

    let resp = client.get_job("J1").await;

    assert_eq!(resp.status_code, 0);
    assert!(!resp.is_success());
    assert!(resp
        .get_str("error")
        .is_some_and(|e| e.starts_with("network_error: ")));
}

#[tokio::test]
async fn job_id_with_reserved_characters_stays_in_one_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs/a%2Fb%3Fc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "queued" })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client_for(&server).get_job("a/b?c").await;

    assert_eq!(resp.status_code, 200);
    assert_eq!(resp.job_status(), Some("queued"));
}
