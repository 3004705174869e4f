use msgboard_client::{ClientBuildError, ClientSettings, MessageApi, ReqwestApi, RequestOptions};
use msgboard_core::{ApiFailure, Message};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestApi {
    ReqwestApi::new(ClientSettings {
        base_url: server.uri(),
        ..ClientSettings::default()
    })
    .expect("build client")
}

#[tokio::test]
async fn list_messages_parses_the_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"[{"id":1,"content":"hi","createdAt":"2024-01-01T00:00:00Z"}]"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let messages = api.list_messages().await.expect("list ok");
    assert_eq!(
        messages,
        vec![Message {
            id: 1,
            content: "hi".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
        }]
    );
}

#[tokio::test]
async fn requests_default_to_a_json_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/messages"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let messages = api.list_messages().await.expect("list ok");
    assert_eq!(messages, Vec::new());
}

#[tokio::test]
async fn caller_headers_win_over_the_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/hello"))
        .and(header("content-type", "text/plain"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let options = RequestOptions {
        headers: vec![("Content-Type".to_string(), "text/plain".to_string())],
        ..RequestOptions::default()
    };
    let value: serde_json::Value = api.request("/hello", options).await.expect("request ok");
    assert_eq!(value, serde_json::json!({}));
}

#[tokio::test]
async fn create_message_posts_the_content_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/messages"))
        .and(body_json(serde_json::json!({ "content": "hi" })))
        .respond_with(ResponseTemplate::new(201).set_body_raw(
            r#"{"id":2,"content":"hi","createdAt":"2024-01-02T00:00:00Z"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let message = api.create_message("hi").await.expect("create ok");
    assert_eq!(message.id, 2);
    assert_eq!(message.content, "hi");
}

#[tokio::test]
async fn delete_message_accepts_an_empty_no_content_reply() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/messages/7"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let api = api_for(&server);
    api.delete_message(7).await.expect("delete ok");
}

#[tokio::test]
async fn non_success_status_becomes_a_typed_http_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/messages"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let err = api.list_messages().await.unwrap_err();
    assert_eq!(err.kind, ApiFailure::HttpStatus(404));
    assert_eq!(err.message, "HTTP 404: Not Found");
}

#[tokio::test]
async fn validation_status_is_carried_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/messages"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let err = api.create_message("hi").await.unwrap_err();
    assert_eq!(err.kind, ApiFailure::HttpStatus(422));
}

#[tokio::test]
async fn unparseable_success_body_is_an_invalid_body_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>oops</html>", "text/html"))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let err = api.list_messages().await.unwrap_err();
    assert_eq!(err.kind, ApiFailure::InvalidBody);
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_failure_not_a_status() {
    // A non-pooled server shuts down on drop, unlike `MockServer::start()`,
    // whose pooled listener keeps answering on the port.
    let server = MockServer::builder().start().await;
    let uri = server.uri();
    // Free the port so the connection is refused.
    drop(server);

    let api = ReqwestApi::new(ClientSettings {
        base_url: uri,
        ..ClientSettings::default()
    })
    .expect("build client");

    let err = api.list_messages().await.unwrap_err();
    assert_eq!(err.kind, ApiFailure::Transport);
}

#[tokio::test]
async fn hello_parses_the_optional_greeting() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/hello"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"message":"Hello from msgboard","status":"healthy"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let hello = api.hello().await.expect("hello ok");
    assert_eq!(hello.message.as_deref(), Some("Hello from msgboard"));
}

#[tokio::test]
async fn an_unparseable_base_url_is_a_constructor_error() {
    let err = ReqwestApi::new(ClientSettings {
        base_url: "not a url".to_string(),
        ..ClientSettings::default()
    })
    .unwrap_err();
    assert!(matches!(err, ClientBuildError::InvalidBaseUrl { .. }));
}
