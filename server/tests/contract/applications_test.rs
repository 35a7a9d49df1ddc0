//! プラットフォームアプリケーションAPI契約テスト

use axum::http::StatusCode;

use crate::support::sns::{
    attribute_params, borrowed, create_application, create_test_router, post_action, APP_ARN,
};

#[tokio::test]
async fn create_platform_application_returns_arn() {
    let (app, _) = create_test_router();

    let arn = create_application(&app, "my-application").await;

    assert_eq!(arn, APP_ARN);
}

#[tokio::test]
async fn get_platform_application_attributes() {
    let (app, _) = create_test_router();
    let arn = create_application(&app, "my-application").await;

    let response = post_action(
        &app,
        "GetPlatformApplicationAttributes",
        &[("PlatformApplicationArn", arn.as_str())],
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.entries(),
        vec![
            (
                "PlatformCredential".to_string(),
                "platform_credential".to_string()
            ),
            (
                "PlatformPrincipal".to_string(),
                "platform_principal".to_string()
            ),
        ]
    );
}

#[tokio::test]
async fn get_missing_platform_application_attributes_fails() {
    let (app, _) = create_test_router();

    let response = post_action(
        &app,
        "GetPlatformApplicationAttributes",
        &[("PlatformApplicationArn", "a-fake-arn")],
    )
    .await;

    assert!(!response.status.is_success());
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.text("Code").as_deref(), Some("NotFound"));
}

#[tokio::test]
async fn set_platform_application_attributes_merges() {
    let (app, _) = create_test_router();
    let arn = create_application(&app, "my-application").await;

    let mut params = attribute_params("Attributes", &[("PlatformPrincipal", "other")]);
    params.push(("PlatformApplicationArn".to_string(), arn.clone()));
    let response = post_action(&app, "SetPlatformApplicationAttributes", &borrowed(&params)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("<SetPlatformApplicationAttributesResponse"));

    let response = post_action(
        &app,
        "GetPlatformApplicationAttributes",
        &[("PlatformApplicationArn", arn.as_str())],
    )
    .await;
    assert_eq!(
        response.entries(),
        vec![
            (
                "PlatformCredential".to_string(),
                "platform_credential".to_string()
            ),
            ("PlatformPrincipal".to_string(), "other".to_string()),
        ]
    );
}

#[tokio::test]
async fn list_platform_applications() {
    let (app, _) = create_test_router();
    create_application(&app, "application1").await;
    create_application(&app, "application2").await;

    let response = post_action(&app, "ListPlatformApplications", &[]).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.texts("PlatformApplicationArn"),
        vec![
            "arn:aws:sns:us-east-1:123456789012:app/APNS/application1".to_string(),
            "arn:aws:sns:us-east-1:123456789012:app/APNS/application2".to_string(),
        ]
    );
    assert!(response.text("NextToken").is_none());
}

#[tokio::test]
async fn delete_platform_applications() {
    let (app, _) = create_test_router();
    create_application(&app, "application1").await;
    create_application(&app, "application2").await;

    let response = post_action(&app, "ListPlatformApplications", &[]).await;
    let arns = response.texts("PlatformApplicationArn");
    assert_eq!(arns.len(), 2);

    for arn in &arns {
        let response = post_action(
            &app,
            "DeletePlatformApplication",
            &[("PlatformApplicationArn", arn.as_str())],
        )
        .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let response = post_action(&app, "ListPlatformApplications", &[]).await;
    assert!(response.texts("PlatformApplicationArn").is_empty());
}

#[tokio::test]
async fn duplicate_create_returns_same_arn() {
    let (app, _) = create_test_router();
    let first = create_application(&app, "my-application").await;
    let second = create_application(&app, "my-application").await;

    assert_eq!(first, second);
    let response = post_action(&app, "ListPlatformApplications", &[]).await;
    assert_eq!(response.texts("PlatformApplicationArn").len(), 1);
}

#[tokio::test]
async fn create_with_unknown_platform_is_rejected() {
    let (app, _) = create_test_router();

    let response = post_action(
        &app,
        "CreatePlatformApplication",
        &[("Name", "my-application"), ("Platform", "FCM-ish")],
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.text("Code").as_deref(), Some("InvalidParameter"));
}

#[tokio::test]
async fn delete_cascades_to_endpoints() {
    let (app, _) = create_test_router();
    let arn = create_application(&app, "my-application").await;
    let endpoint = crate::support::sns::create_endpoint(&app, &arn, "some_unique_id", "data", &[]).await;

    post_action(
        &app,
        "DeletePlatformApplication",
        &[("PlatformApplicationArn", arn.as_str())],
    )
    .await;

    let response = post_action(&app, "GetEndpointAttributes", &[("EndpointArn", endpoint.as_str())]).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
