//! プラットフォームエンドポイントAPI契約テスト

use axum::http::StatusCode;

use crate::support::sns::{
    attribute_params, borrowed, create_application, create_endpoint, create_test_router,
    post_action,
};

fn pair(key: &str, value: &str) -> (String, String) {
    (key.to_string(), value.to_string())
}

#[tokio::test]
async fn create_platform_endpoint() {
    let (app, _) = create_test_router();
    let application_arn = create_application(&app, "my-application").await;

    let endpoint_arn = create_endpoint(
        &app,
        &application_arn,
        "some_unique_id",
        "some user data",
        &[("Enabled", "false")],
    )
    .await;

    assert!(endpoint_arn
        .starts_with("arn:aws:sns:us-east-1:123456789012:endpoint/APNS/my-application/"));
}

#[tokio::test]
async fn list_endpoints_by_platform_application() {
    let (app, _) = create_test_router();
    let application_arn = create_application(&app, "my-application").await;
    let endpoint_arn = create_endpoint(
        &app,
        &application_arn,
        "some_unique_id",
        "some user data",
        &[("CustomUserData", "some data")],
    )
    .await;

    let response = post_action(
        &app,
        "ListEndpointsByPlatformApplication",
        &[("PlatformApplicationArn", application_arn.as_str())],
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.texts("EndpointArn"), vec![endpoint_arn]);
    assert_eq!(response.entries(), vec![pair("CustomUserData", "some data")]);
}

#[tokio::test]
async fn list_endpoints_only_returns_own_endpoints() {
    let (app, _) = create_test_router();
    let first = create_application(&app, "application1").await;
    let second = create_application(&app, "application2").await;
    create_endpoint(&app, &first, "token-1", "a", &[]).await;
    let own = create_endpoint(&app, &second, "token-2", "b", &[]).await;

    let response = post_action(
        &app,
        "ListEndpointsByPlatformApplication",
        &[("PlatformApplicationArn", second.as_str())],
    )
    .await;

    assert_eq!(response.texts("EndpointArn"), vec![own]);
}

#[tokio::test]
async fn get_endpoint_attributes() {
    let (app, _) = create_test_router();
    let application_arn = create_application(&app, "my-application").await;
    let endpoint_arn = create_endpoint(
        &app,
        &application_arn,
        "some_unique_id",
        "some user data",
        &[("Enabled", "False"), ("CustomUserData", "some data")],
    )
    .await;

    let response = post_action(&app, "GetEndpointAttributes", &[("EndpointArn", endpoint_arn.as_str())]).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.entries(),
        vec![pair("Enabled", "False"), pair("CustomUserData", "some data")]
    );
}

#[tokio::test]
async fn get_missing_endpoint_attributes_fails() {
    let (app, _) = create_test_router();

    let response = post_action(&app, "GetEndpointAttributes", &[("EndpointArn", "a-fake-arn")]).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.text("Type").as_deref(), Some("Sender"));
}

#[tokio::test]
async fn set_endpoint_attributes() {
    let (app, _) = create_test_router();
    let application_arn = create_application(&app, "my-application").await;
    let endpoint_arn = create_endpoint(
        &app,
        &application_arn,
        "some_unique_id",
        "some user data",
        &[("Enabled", "False"), ("CustomUserData", "some data")],
    )
    .await;

    let mut params = attribute_params("Attributes", &[("CustomUserData", "other data")]);
    params.push(("EndpointArn".to_string(), endpoint_arn.clone()));
    let response = post_action(&app, "SetEndpointAttributes", &borrowed(&params)).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = post_action(&app, "GetEndpointAttributes", &[("EndpointArn", endpoint_arn.as_str())]).await;
    assert_eq!(
        response.entries(),
        vec![pair("Enabled", "False"), pair("CustomUserData", "other data")]
    );
}

#[tokio::test]
async fn custom_user_data_parameter_is_stored() {
    let (app, _) = create_test_router();
    let application_arn = create_application(&app, "my-application").await;
    let endpoint_arn =
        create_endpoint(&app, &application_arn, "some_unique_id", "some user data", &[]).await;

    let response = post_action(&app, "GetEndpointAttributes", &[("EndpointArn", endpoint_arn.as_str())]).await;

    assert_eq!(response.entries(), vec![pair("CustomUserData", "some user data")]);
}

#[tokio::test]
async fn create_endpoint_under_unknown_application_fails() {
    let (app, _) = create_test_router();

    let response = post_action(
        &app,
        "CreatePlatformEndpoint",
        &[
            (
                "PlatformApplicationArn",
                "arn:aws:sns:us-east-1:123456789012:app/APNS/missing",
            ),
            ("Token", "some_unique_id"),
        ],
    )
    .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn application_arn_is_not_an_endpoint() {
    let (app, _) = create_test_router();
    let application_arn = create_application(&app, "my-application").await;

    let response = post_action(&app, "GetEndpointAttributes", &[("EndpointArn", application_arn.as_str())]).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.text("Code").as_deref(), Some("InvalidParameter"));
}

#[tokio::test]
async fn delete_endpoint_is_idempotent() {
    let (app, _) = create_test_router();
    let application_arn = create_application(&app, "my-application").await;
    let endpoint_arn = create_endpoint(&app, &application_arn, "some_unique_id", "d", &[]).await;

    for _ in 0..2 {
        let response = post_action(&app, "DeleteEndpoint", &[("EndpointArn", endpoint_arn.as_str())]).await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let response = post_action(
        &app,
        "ListEndpointsByPlatformApplication",
        &[("PlatformApplicationArn", application_arn.as_str())],
    )
    .await;
    assert!(response.texts("EndpointArn").is_empty());
}

#[tokio::test]
async fn enabled_flag_reads_back_capitalized() {
    let (app, _) = create_test_router();
    let application_arn = create_application(&app, "my-application").await;
    let endpoint_arn =
        create_endpoint(&app, &application_arn, "some_unique_id", "d", &[("Enabled", "false")])
            .await;

    let response = post_action(&app, "GetEndpointAttributes", &[("EndpointArn", endpoint_arn.as_str())]).await;
    assert_eq!(
        response.entries(),
        vec![pair("Enabled", "False"), pair("CustomUserData", "d")]
    );

    let mut params = attribute_params("Attributes", &[("Enabled", "true")]);
    params.push(("EndpointArn".to_string(), endpoint_arn.clone()));
    let response = post_action(&app, "SetEndpointAttributes", &borrowed(&params)).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = post_action(&app, "GetEndpointAttributes", &[("EndpointArn", endpoint_arn.as_str())]).await;
    assert_eq!(
        response.entries(),
        vec![pair("Enabled", "True"), pair("CustomUserData", "d")]
    );
}
