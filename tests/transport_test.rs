use std::net::TcpListener;
use std::time::Duration;

use serde_json::{Value, json};
use ss12000_client::{
    ApiClient, BlockingApiClient, ClientConfig, ClientError, HttpMethod, PreparedRequest,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn header<'a>(request: &'a wiremock::Request, name: &str) -> Option<&'a str> {
    request
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
}

#[tokio::test]
async fn get_sends_fixed_header_set() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/organisations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        ApiClient::from_config(&ClientConfig::new(server.uri()).with_access_token("token-1"))
            .expect("client builds");
    let value = client
        .get_json("/organisations", &[("limit", "5")])
        .await
        .expect("request succeeds");
    assert_eq!(value, json!({"data": []}));

    let received = server.received_requests().await.expect("recording enabled");
    let request = &received[0];
    assert_eq!(request.url.query(), Some("limit=5"));
    assert_eq!(header(request, "accept"), Some("application/json"));
    assert_eq!(header(request, "content-type"), Some("application/json"));
    assert_eq!(header(request, "authorization"), Some("Bearer token-1"));
}

#[tokio::test]
async fn no_token_means_no_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).expect("client builds");
    client
        .get_json("/persons", &[])
        .await
        .expect("request succeeds");

    let received = server.received_requests().await.expect("recording enabled");
    assert!(header(&received[0], "authorization").is_none());
}

#[tokio::test]
async fn base_url_prefix_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ss12000/v2/rooms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(format!("{}/ss12000/v2", server.uri())).expect("client builds");
    client.get_json("/rooms", &[]).await.expect("request succeeds");
}

#[tokio::test]
async fn api_error_keeps_parsed_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/organisations/x"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "not_found"})))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).expect("client builds");
    let error = client
        .get_json("/organisations/x", &[])
        .await
        .expect_err("404 is an error");

    assert_eq!(error.status().map(|status| status.as_u16()), Some(404));
    assert_eq!(error.body(), Some(&json!({"error": "not_found"})));
}

#[tokio::test]
async fn api_error_without_json_falls_back_to_status_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).expect("client builds");
    let error = client
        .get_json("/groups", &[])
        .await
        .expect_err("503 is an error");

    match error {
        ClientError::HttpStatus {
            status,
            status_text,
            body,
        } => {
            assert_eq!(status.as_u16(), 503);
            assert_eq!(status_text, "Service Unavailable");
            assert_eq!(body, json!({"message": "Service Unavailable"}));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn delete_no_content_is_success() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/subscriptions/s-1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).expect("client builds");
    let value = client
        .delete_json("/subscriptions/s-1")
        .await
        .expect("204 is success");
    assert_eq!(value, Value::Null);
}

#[tokio::test]
async fn delete_not_found_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).expect("client builds");
    let error = client
        .delete_json("/subscriptions/missing")
        .await
        .expect_err("404 is an error");
    assert_eq!(error.status().map(|status| status.as_u16()), Some(404));
    assert_eq!(error.body(), Some(&json!({"message": "Not Found"})));
}

#[tokio::test]
async fn post_with_empty_acknowledgment_is_null() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/log"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).expect("client builds");
    let body = json!({"messageType": "Info", "message": "sync done"});
    let value = client
        .post_json("/log", &[], &body)
        .await
        .expect("request succeeds");
    assert_eq!(value, Value::Null);

    let received = server.received_requests().await.expect("recording enabled");
    let sent: Value = serde_json::from_slice(&received[0].body).expect("json body");
    assert_eq!(sent, body);
}

#[tokio::test]
async fn transport_failure_has_no_status() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };

    let client = ApiClient::new(format!("http://127.0.0.1:{port}")).expect("client builds");
    let error = client
        .get_json("/organisations", &[])
        .await
        .expect_err("nothing is listening");
    assert!(error.is_transport());
    assert_eq!(error.status(), None);
}

#[tokio::test]
async fn per_call_timeout_is_a_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).expect("client builds");
    let request = PreparedRequest::new(HttpMethod::Get, "/activities");
    let error = client
        .send_with_timeout(&request, Duration::from_millis(50))
        .await
        .expect_err("times out");
    match error {
        ClientError::Request(err) => assert!(err.is_timeout()),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn blocking_client_follows_the_same_contract() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/organisations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"id": "o1"}]})))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"code": "bad"})))
        .mount(&server)
        .await;

    let uri = server.uri();
    let (listed, deleted, patched) = tokio::task::spawn_blocking(move || {
        let client = BlockingApiClient::new(uri).expect("client builds");
        (
            client.get_json("/organisations", &[("limit", "1")]),
            client.delete_json("/attendances/a-1"),
            client.patch_json("/subscriptions/s-1", &json!({"expires": "x"})),
        )
    })
    .await
    .expect("blocking task completes");

    assert_eq!(
        listed.expect("list succeeds"),
        json!({"data": [{"id": "o1"}]})
    );
    assert_eq!(deleted.expect("delete succeeds"), Value::Null);
    let error = patched.expect_err("400 is an error");
    assert_eq!(error.body(), Some(&json!({"code": "bad"})));
}
