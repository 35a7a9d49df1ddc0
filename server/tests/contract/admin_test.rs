//! 管理API契約テスト

use axum::{
    body::Body,
    http::{Request, StatusCode},
};

use crate::support::sns::{
    create_application, create_endpoint, create_test_router, post_action, send,
};

#[tokio::test]
async fn health_returns_ok() {
    let (app, _) = create_test_router();

    let request = Request::builder()
        .uri("/_mock/health")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
}

#[tokio::test]
async fn reset_clears_state() {
    let (app, _) = create_test_router();
    create_application(&app, "my-application").await;

    let request = Request::builder()
        .method("POST")
        .uri("/_mock/reset")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = post_action(&app, "ListPlatformApplications", &[]).await;
    assert!(response.texts("PlatformApplicationArn").is_empty());
}

#[tokio::test]
async fn messages_lists_publish_log() {
    let (app, _) = create_test_router();
    let application_arn = create_application(&app, "my-application").await;
    let first = create_endpoint(&app, &application_arn, "token-1", "a", &[]).await;
    let second = create_endpoint(&app, &application_arn, "token-2", "b", &[]).await;
    for target in [&first, &second] {
        let response = post_action(&app, "Publish", &[("TargetArn", target.as_str()), ("Message", "hi")]).await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let request = Request::builder()
        .uri("/_mock/messages")
        .body(Body::empty())
        .unwrap();
    let all = send(&app, request).await.json();
    assert_eq!(all.as_array().unwrap().len(), 2);

    let query = serde_urlencoded::to_string([("target_arn", first.as_str())]).unwrap();
    let request = Request::builder()
        .uri(format!("/_mock/messages?{}", query))
        .body(Body::empty())
        .unwrap();
    let filtered = send(&app, request).await.json();
    let filtered = filtered.as_array().unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["target_arn"], first.as_str());
    assert_eq!(filtered[0]["delivered_body"], "hi");
}
