//! トピックAPI契約テスト

use axum::http::StatusCode;

use crate::support::sns::{create_test_router, post_action};

const TOPIC_ARN: &str = "arn:aws:sns:us-east-1:123456789012:alerts";

#[tokio::test]
async fn create_list_and_delete_topic() {
    let (app, _) = create_test_router();

    let response = post_action(&app, "CreateTopic", &[("Name", "alerts")]).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text("TopicArn").as_deref(), Some(TOPIC_ARN));

    let response = post_action(&app, "ListTopics", &[]).await;
    assert_eq!(response.texts("TopicArn"), vec![TOPIC_ARN.to_string()]);

    let response = post_action(&app, "DeleteTopic", &[("TopicArn", TOPIC_ARN)]).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = post_action(&app, "ListTopics", &[]).await;
    assert!(response.texts("TopicArn").is_empty());
}

#[tokio::test]
async fn get_topic_attributes() {
    let (app, _) = create_test_router();
    post_action(&app, "CreateTopic", &[("Name", "alerts")]).await;

    let response = post_action(&app, "GetTopicAttributes", &[("TopicArn", TOPIC_ARN)]).await;

    assert_eq!(response.status, StatusCode::OK);
    let entries = response.entries();
    assert!(entries.contains(&("TopicArn".to_string(), TOPIC_ARN.to_string())));
    assert!(entries.contains(&("Owner".to_string(), "123456789012".to_string())));
}

#[tokio::test]
async fn publish_to_topic_is_recorded() {
    let (app, state) = create_test_router();
    post_action(&app, "CreateTopic", &[("Name", "alerts")]).await;

    let response = post_action(
        &app,
        "Publish",
        &[("TopicArn", TOPIC_ARN), ("Message", "hello")],
    )
    .await;

    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(state.backend.published_messages_for(TOPIC_ARN).await.len(), 1);
}

#[tokio::test]
async fn invalid_topic_name_is_rejected() {
    let (app, _) = create_test_router();

    let response = post_action(&app, "CreateTopic", &[("Name", "bad name")]).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
