// tests/test_http_integration.rs


use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use talkimoji::api::create_router;
use talkimoji::api::http::{PageSource, CONVERT_MAX_BODY_BYTES};
use talkimoji::AppState;
use test_helpers::{create_test_app_state, Reply, ScriptedOracle};

fn post_convert(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/convert")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

#[tokio::test]
async fn test_page_is_served_at_root_and_index() {
    let app = create_router(create_test_app_state(ScriptedOracle::text("🍕")));

    for uri in ["/", "/index.html"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
        assert!(body_text(response).await.contains("TalkiMoji"));
    }
}

#[tokio::test]
async fn test_page_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.html");
    std::fs::write(&path, "<p>served from disk</p>").unwrap();

    let state = AppState::new(
        ScriptedOracle::text("🍕"),
        PageSource::File(path.clone()),
        "test-model",
    );
    let app = create_router(state);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_text(response).await, "<p>served from disk</p>");

    // Missing page file is a server error, not a panic
    std::fs::remove_file(&path).unwrap();
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["success"], false);
}

#[tokio::test]
async fn test_convert_success() {
    let oracle = ScriptedOracle::text("🍕🎵❤️");
    let app = create_router(create_test_app_state(oracle.clone()));

    let response = app
        .oneshot(post_convert(
            json!({ "text": "I love pizza and music", "mode": "to_emoji" }).to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "success": true, "result": "🍕🎵❤️", "type": "emoji" })
    );
    assert_eq!(oracle.calls(), 1);
}

#[tokio::test]
async fn test_convert_defaults_to_auto_mode() {
    let app = create_router(create_test_app_state(ScriptedOracle::text("pizza")));

    let response = app
        .clone()
        .oneshot(post_convert(json!({ "text": "🍕" }).to_string()))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["type"], "text");

    let response = app
        .oneshot(post_convert(json!({ "text": "pizza" }).to_string()))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["type"], "emoji");
}

#[tokio::test]
async fn test_validation_failures_are_200_and_skip_the_oracle() {
    let oracle = ScriptedOracle::text("🍕");
    let app = create_router(create_test_app_state(oracle.clone()));

    let cases = [
        (json!({ "text": "   " }), "No text provided"),
        (json!({}), "No text provided"),
        (json!({ "text": "hello", "mode": "reverse" }), "Invalid mode"),
    ];

    for (payload, expected) in cases {
        let response = app
            .clone()
            .oneshot(post_convert(payload.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "success": false, "error": expected })
        );
    }

    assert_eq!(oracle.calls(), 0);
}

#[tokio::test]
async fn test_upstream_failure_is_still_a_200() {
    let oracle = ScriptedOracle::new(Reply::Status(503, "unavailable".to_string()));
    let app = create_router(create_test_app_state(oracle));

    let response = app
        .oneshot(post_convert(json!({ "text": "hello" }).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("503"));
    assert!(body.get("result").is_none());
    assert!(body.get("type").is_none());
}

#[tokio::test]
async fn test_content_type_is_not_required() {
    let app = create_router(create_test_app_state(ScriptedOracle::text("🍕")));

    let request = Request::builder()
        .method("POST")
        .uri("/convert")
        .body(Body::from(r#"{"text":"pizza"}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], true);
}

#[tokio::test]
async fn test_unparseable_body_is_a_500() {
    let oracle = ScriptedOracle::text("🍕");
    let app = create_router(create_test_app_state(oracle.clone()));

    for payload in ["not json", r#"{"text": 42}"#, ""] {
        let response = app.clone().oneshot(post_convert(payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{payload:?}");

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().starts_with("Server error: "));
    }
    assert_eq!(oracle.calls(), 0);
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let app = create_router(create_test_app_state(ScriptedOracle::text("🍕")));

    let text = "a".repeat(CONVERT_MAX_BODY_BYTES + 1);
    let response = app
        .oneshot(post_convert(json!({ "text": text }).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body_json(response).await["success"], false);
}

#[tokio::test]
async fn test_unknown_paths_are_404() {
    let app = create_router(create_test_app_state(ScriptedOracle::text("🍕")));

    for (method, uri) in [("GET", "/secret.txt"), ("POST", "/translate"), ("GET", "/static/index.html")] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method} {uri}");
    }
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = create_router(create_test_app_state(ScriptedOracle::text("🍕")));

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/convert")
                .header(header::ORIGIN, "http://example.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
    assert!(methods.contains("POST"));
    assert!(methods.contains("GET"));
    assert!(methods.contains("OPTIONS"));
    let allowed = headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    assert!(allowed.contains("content-type"));
}

#[tokio::test]
async fn test_bare_options_is_200() {
    let app = create_router(create_test_app_state(ScriptedOracle::text("🍕")));

    for uri in ["/convert", "/", "/anything"] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }
}

#[tokio::test]
async fn test_cross_origin_post_carries_allow_origin() {
    let app = create_router(create_test_app_state(ScriptedOracle::text("🍕")));

    let mut request = post_convert(json!({ "text": "pizza" }).to_string());
    request
        .headers_mut()
        .insert(header::ORIGIN, "http://localhost:3000".parse().unwrap());
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn test_status_endpoint() {
    let app = create_router(create_test_app_state(ScriptedOracle::text("🍕")));

    let response = app
        .oneshot(Request::builder().uri("/api/status").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["oracle"], "scripted");
    assert_eq!(body["model"], "test-model");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_concurrent_conversions_are_independent() {
    let oracle = ScriptedOracle::text("🍕");
    let app = create_router(create_test_app_state(oracle.clone()));

    let mut handles = Vec::new();
    for i in 0..16 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let payload = if i % 2 == 0 {
                json!({ "text": format!("request {i}") })
            } else {
                json!({ "text": " " })
            };
            let response = app.oneshot(post_convert(payload.to_string())).await.unwrap();
            body_json(response).await["success"].as_bool().unwrap()
        }));
    }

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap() {
            successes += 1;
        }
    }
    assert_eq!(successes, 8);
    assert_eq!(oracle.calls(), 8);
}
