//! Query APIプロトコル契約テスト（GET・JSON・エラー形式）

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};

use crate::support::sns::{
    create_application, create_test_router, get_action, post_action, send, APP_ARN,
};

#[tokio::test]
async fn xml_response_envelope() {
    let (app, _) = create_test_router();

    let response = post_action(&app, "ListPlatformApplications", &[]).await;

    assert_eq!(response.content_type, "text/xml");
    assert!(response.body.starts_with("<?xml"));
    assert!(response.body.contains(
        r#"<ListPlatformApplicationsResponse xmlns="http://sns.amazonaws.com/doc/2010-03-31/">"#
    ));
    assert_eq!(response.texts("RequestId").len(), 1);
}

#[tokio::test]
async fn get_request_is_accepted() {
    let (app, _) = create_test_router();
    create_application(&app, "my-application").await;

    let response = get_action(
        &app,
        "GetPlatformApplicationAttributes",
        &[("PlatformApplicationArn", APP_ARN)],
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.entries().len(), 2);
}

#[tokio::test]
async fn json_content_type() {
    let (app, _) = create_test_router();
    create_application(&app, "my-application").await;

    let response = post_action(
        &app,
        "GetPlatformApplicationAttributes",
        &[("PlatformApplicationArn", APP_ARN), ("ContentType", "JSON")],
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.content_type, "application/json");
    let body = response.json();
    let attributes = &body["GetPlatformApplicationAttributesResponse"]
        ["GetPlatformApplicationAttributesResult"]["Attributes"];
    assert_eq!(attributes["PlatformCredential"], "platform_credential");
    assert_eq!(attributes["PlatformPrincipal"], "platform_principal");
}

#[tokio::test]
async fn json_error_body() {
    let (app, _) = create_test_router();

    let response = post_action(
        &app,
        "GetEndpointAttributes",
        &[("EndpointArn", "a-fake-arn"), ("ContentType", "JSON")],
    )
    .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    let body = response.json();
    assert_eq!(body["Error"]["Code"], "NotFound");
    assert_eq!(body["Error"]["Type"], "Sender");
    assert!(body["RequestId"].is_string());
}

#[tokio::test]
async fn unknown_action_is_rejected() {
    let (app, _) = create_test_router();

    let response = post_action(&app, "Subscribe", &[]).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.text("Code").as_deref(), Some("InvalidAction"));
    assert!(response.body.contains("<ErrorResponse"));
}

#[tokio::test]
async fn missing_action_is_rejected() {
    let (app, _) = create_test_router();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("Name=x"))
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.text("Code").as_deref(), Some("MissingParameter"));
}

#[tokio::test]
async fn post_without_content_type_is_decoded() {
    let (app, _) = create_test_router();
    create_application(&app, "my-application").await;

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .body(Body::from("Action=ListPlatformApplications"))
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.texts("PlatformApplicationArn"), vec![APP_ARN.to_string()]);
    assert_eq!(response.texts("RequestId").len(), 1);
}

#[tokio::test]
async fn post_without_content_type_reports_errors_as_envelope() {
    let (app, _) = create_test_router();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .body(Body::from("Action=GetEndpointAttributes"))
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.content_type, "text/xml");
    assert_eq!(response.text("Code").as_deref(), Some("MissingParameter"));
    assert_eq!(response.texts("RequestId").len(), 1);
}

#[tokio::test]
async fn query_string_and_body_are_merged() {
    let (app, _) = create_test_router();

    let request = Request::builder()
        .method("POST")
        .uri("/?Action=CreateTopic")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("Name=alerts"))
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.text("TopicArn").as_deref(),
        Some("arn:aws:sns:us-east-1:123456789012:alerts")
    );
}

#[tokio::test]
async fn malformed_attribute_entry_is_rejected() {
    let (app, _) = create_test_router();

    let response = post_action(
        &app,
        "CreatePlatformApplication",
        &[
            ("Name", "my-application"),
            ("Platform", "APNS"),
            ("Attributes.entry.1.key", "PlatformCredential"),
        ],
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.text("Code").as_deref(), Some("InvalidParameter"));
}

#[tokio::test]
async fn invalid_next_token_is_rejected() {
    let (app, _) = create_test_router();

    let response = post_action(&app, "ListPlatformApplications", &[("NextToken", "abc")]).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
