//! Integration tests for the console HTTP client pipeline

use console_core::SessionStore;
use console_core::testing::test_context;
use console_http::{ClientError, ConsoleClient, Pipeline};
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

#[tokio::test]
async fn test_client_builder() {
    let (session, ..) = test_context(None);
    let client = ConsoleClient::builder()
        .origin("http://localhost:8080/")
        .session(session)
        .build()
        .unwrap();

    assert_eq!(client.base_url(), "http://localhost:8080/admin");
    assert_eq!(client.timeout(), Duration::from_secs(10));
}

#[tokio::test]
async fn test_client_builder_requires_origin_and_session() {
    let (session, ..) = test_context(None);

    let result = ConsoleClient::builder().session(session.clone()).build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));

    let result = ConsoleClient::builder().origin("http://x").build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));

    let result = ConsoleClient::builder()
        .origin("http://x")
        .base_path("admin")
        .session(session)
        .build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_bearer_header_attached_when_signed_in() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/providers"))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (session, ..) = test_context(Some("abc123"));
    let client = ConsoleClient::new(mock_server.uri(), session).unwrap();

    let providers = client.list_providers().await.unwrap();
    assert!(providers.is_empty());
}

#[tokio::test]
async fn test_no_authorization_header_without_credential() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let (session, ..) = test_context(None);
    let client = ConsoleClient::new(mock_server.uri(), session).unwrap();
    client.stats(None).await.unwrap();

    let requests: Vec<Request> = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_success_returns_payload_only() {
    let mock_server = MockServer::start().await;

    let body = json!({"answer": 42, "nested": {"ok": true}});
    Mock::given(method("POST"))
        .and(path("/admin/anything"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&mock_server)
        .await;

    let (session, _, navigator, notifier) = test_context(Some("abc123"));
    let client = ConsoleClient::new(mock_server.uri(), session).unwrap();

    let payload: Value = client.post("/anything", &json!({"q": 1})).await.unwrap();
    assert_eq!(payload, body);
    assert!(notifier.messages().is_empty());
    assert!(navigator.redirects().is_empty());
}

#[tokio::test]
async fn test_unauthorized_tears_down_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/endpoints"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "expired"})))
        .mount(&mock_server)
        .await;

    let (session, store, navigator, notifier) = test_context(Some("abc123"));
    let client = ConsoleClient::new(mock_server.uri(), session).unwrap();

    let result = client.list_endpoints().await;

    assert!(matches!(
        result,
        Err(ClientError::AuthenticationFailed(Some(ref m))) if m == "expired"
    ));
    assert_eq!(notifier.messages(), vec!["expired"]);
    assert!(store.load().is_none());
    assert_eq!(navigator.redirects(), vec!["/#/login"]);
}

#[tokio::test]
async fn test_unauthorized_without_message_uses_default() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/user/info"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&mock_server)
        .await;

    let (session, store, navigator, notifier) = test_context(Some("stale"));
    let client = ConsoleClient::new(mock_server.uri(), session).unwrap();

    assert!(client.user_info().await.unwrap_err().is_unauthorized());
    assert_eq!(notifier.messages(), vec!["Request failed"]);
    assert!(store.load().is_none());
    assert_eq!(navigator.redirects().len(), 1);
}

#[tokio::test]
async fn test_server_error_keeps_credential() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/providers"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let (session, store, navigator, notifier) = test_context(Some("abc123"));
    let client = ConsoleClient::new(mock_server.uri(), session).unwrap();

    let err = client.list_providers().await.unwrap_err();

    assert!(matches!(
        err,
        ClientError::ServerError {
            status: 500,
            message: None
        }
    ));
    assert_eq!(notifier.messages(), vec!["Request failed"]);
    assert_eq!(store.load().unwrap().as_str(), "abc123");
    assert!(navigator.redirects().is_empty());
}

#[tokio::test]
async fn test_backend_message_is_shown() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/admin/providers/9"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "Provider not found"})),
        )
        .mount(&mock_server)
        .await;

    let (session, _, navigator, notifier) = test_context(Some("abc123"));
    let client = ConsoleClient::new(mock_server.uri(), session).unwrap();

    let input = console_http::types::ProviderInput {
        name: "n".into(),
        api_address: "https://a".into(),
        api_key: "k".into(),
        model_name: "m".into(),
    };
    let err = client.update_provider(9, &input).await.unwrap_err();

    assert!(matches!(err, ClientError::NotFound(_)));
    assert_eq!(notifier.messages(), vec!["Provider not found"]);
    assert!(navigator.redirects().is_empty());
}

#[tokio::test]
async fn test_transport_failure_takes_failure_path() {
    // Nothing listens on this port once the listener is dropped
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let (session, store, navigator, notifier) = test_context(Some("abc123"));
    let client = ConsoleClient::new(uri, session).unwrap();

    let err = client.list_providers().await.unwrap_err();

    assert!(matches!(err, ClientError::Request(_)));
    assert_eq!(notifier.messages(), vec!["Request failed"]);
    assert!(store.load().is_some());
    assert!(navigator.redirects().is_empty());
}

#[tokio::test]
async fn test_timeout_is_a_transport_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/providers"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let (session, _, _, notifier) = test_context(Some("abc123"));
    let client = ConsoleClient::builder()
        .origin(mock_server.uri())
        .session(session)
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let err = client.list_providers().await.unwrap_err();
    assert!(err.is_timeout());
    assert_eq!(notifier.messages(), vec!["Request failed"]);
}

#[tokio::test]
async fn test_malformed_success_body_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/providers"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let (session, _, _, notifier) = test_context(Some("abc123"));
    let client = ConsoleClient::new(mock_server.uri(), session).unwrap();

    let err = client.list_providers().await.unwrap_err();
    assert!(matches!(err, ClientError::Serialization(_)));
    assert_eq!(notifier.messages(), vec!["Request failed"]);
}

#[tokio::test]
async fn test_custom_pipeline_without_teardown() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/providers"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "expired"})))
        .mount(&mock_server)
        .await;

    let (session, store, navigator, notifier) = test_context(Some("abc123"));
    let client = ConsoleClient::builder()
        .origin(mock_server.uri())
        .session(session)
        .pipeline(
            Pipeline::empty()
                .with_request_stage(console_http::client::pipeline::BearerAuth)
                .with_failure_stage(console_http::client::pipeline::NotifyUser),
        )
        .build()
        .unwrap();

    assert!(client.list_providers().await.is_err());
    assert_eq!(notifier.messages(), vec!["expired"]);
    assert!(store.load().is_some());
    assert!(navigator.redirects().is_empty());
}
