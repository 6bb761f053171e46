//! End-to-end tests for the webhook receiver routes.

use reqwest::StatusCode;

mod common;

#[tokio::test]
async fn test_root_returns_greeting() {
    let receiver = common::spawn_receiver().await;
    let client = common::client();

    // Any body, or none at all.
    let res = client.post(receiver.url("/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "hello world");

    let res = client
        .post(receiver.url("/"))
        .body("some opaque body")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "hello world");

    receiver.shutdown.trigger();
}

#[tokio::test]
async fn test_event_acknowledges_json_payload() {
    let receiver = common::spawn_receiver().await;
    let client = common::client();

    let res = client
        .post(receiver.url("/event_handler"))
        .form(&[("payload", "{}")])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "Well, it worked!");

    receiver.shutdown.trigger();
}

#[tokio::test]
async fn test_event_response_never_echoes_payload() {
    let receiver = common::spawn_receiver().await;
    let client = common::client();

    for payload in [
        "{}",
        "null",
        "42",
        r#"{"action":"opened","number":1347}"#,
        r#"["a","b","c"]"#,
    ] {
        let res = client
            .post(receiver.url("/event_handler"))
            .form(&[("payload", payload)])
            .send()
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.text().await.unwrap(), "Well, it worked!");
    }

    receiver.shutdown.trigger();
}

#[tokio::test]
async fn test_event_invalid_json_is_500_and_server_survives() {
    let receiver = common::spawn_receiver().await;
    let client = common::client();

    let res = client
        .post(receiver.url("/event_handler"))
        .form(&[("payload", "{not valid json")])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = res.text().await.unwrap();
    assert!(!body.contains("not valid json"), "error detail leaked: {}", body);

    // The process keeps serving after the failure.
    let res = client
        .post(receiver.url("/event_handler"))
        .form(&[("payload", "{}")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    receiver.shutdown.trigger();
}

#[tokio::test]
async fn test_event_missing_payload_is_500() {
    let receiver = common::spawn_receiver().await;
    let client = common::client();

    let res = client
        .post(receiver.url("/event_handler"))
        .form(&[("something_else", "1")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let res = client
        .post(receiver.url("/event_handler"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    receiver.shutdown.trigger();
}

#[tokio::test]
async fn test_percent_encoded_payload_decodes_before_parse() {
    let receiver = common::spawn_receiver().await;
    let client = common::client();

    let res = client
        .post(receiver.url("/event_handler"))
        .header("content-type", "application/x-www-form-urlencoded")
        .body("payload=%7B%7D")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "Well, it worked!");

    receiver.shutdown.trigger();
}

#[tokio::test]
async fn test_repeated_payload_field_last_wins() {
    let receiver = common::spawn_receiver().await;
    let client = common::client();

    // Broken first, valid last: succeeds.
    let res = client
        .post(receiver.url("/event_handler"))
        .header("content-type", "application/x-www-form-urlencoded")
        .body("payload=%7Bbroken&payload=%7B%7D")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // Valid first, broken last: fails.
    let res = client
        .post(receiver.url("/event_handler"))
        .header("content-type", "application/x-www-form-urlencoded")
        .body("payload=%7B%7D&payload=%7Bbroken")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    receiver.shutdown.trigger();
}

#[tokio::test]
async fn test_routes_are_independent_across_interleavings() {
    let receiver = common::spawn_receiver().await;
    let client = common::client();

    for i in 0..10 {
        if i % 2 == 0 {
            let res = client.post(receiver.url("/")).send().await.unwrap();
            assert_eq!(res.text().await.unwrap(), "hello world");
        } else {
            let payload = if i % 3 == 0 { "{broken" } else { "{}" };
            let res = client
                .post(receiver.url("/event_handler"))
                .form(&[("payload", payload)])
                .send()
                .await
                .unwrap();
            let expected = if payload == "{}" {
                StatusCode::OK
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            assert_eq!(res.status(), expected, "iteration {}", i);
        }
    }

    receiver.shutdown.trigger();
}

#[tokio::test]
async fn test_unknown_routes_and_methods() {
    let receiver = common::spawn_receiver().await;
    let client = common::client();

    let res = client.post(receiver.url("/nowhere")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client.get(receiver.url("/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);

    let res = client.get(receiver.url("/event_handler")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);

    receiver.shutdown.trigger();
}

#[tokio::test]
async fn test_request_id_header() {
    let receiver = common::spawn_receiver().await;
    let client = common::client();

    let res = client.post(receiver.url("/")).send().await.unwrap();
    let generated = res.headers().get("x-request-id").expect("missing x-request-id");
    assert!(!generated.is_empty());

    let res = client
        .post(receiver.url("/"))
        .header("x-request-id", "test-correlation-42")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "test-correlation-42");

    receiver.shutdown.trigger();
}

#[tokio::test]
async fn test_graceful_shutdown_stops_serving() {
    let receiver = common::spawn_receiver().await;
    let client = common::client();

    let res = client.post(receiver.url("/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    receiver.shutdown.trigger();
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;

    let result = client.post(receiver.url("/")).send().await;
    assert!(result.is_err(), "server still accepting after shutdown");
}
