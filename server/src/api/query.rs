//! SNS Query API
//!
//! `Action` パラメータで操作を選択し、バックエンドへ振り分ける。

use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    response::Response,
};
use serde::Serialize;
use serde_json::Value;
use sns_mock_common::{
    error::{CommonError, SnsError, SnsResult},
    protocol::{CreatePlatformApplicationRequest, CreatePlatformEndpointRequest, PublishRequest},
    types::Platform,
};
use tracing::debug;
use uuid::Uuid;

use super::{
    error::AppError,
    params::QueryParams,
    render::{self, ResponseFormat},
};
use crate::{registry::SnsBackend, AppState};

/// GET /
pub async fn handle_get(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let pairs = match decode_pairs(query.as_deref().unwrap_or_default().as_bytes()) {
        Ok(pairs) => pairs,
        Err(err) => return AppError(err).render(ResponseFormat::Xml, Uuid::new_v4()),
    };
    handle(&state.backend, QueryParams::from_pairs(pairs)).await
}

/// POST /（本文は Content-Type に関わらずフォームとして解釈し、クエリ文字列の値を上書きする）
pub async fn handle_post(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Response {
    let pairs = decode_pairs(query.as_deref().unwrap_or_default().as_bytes()).and_then(
        |mut pairs| {
            pairs.extend(decode_pairs(&body)?);
            Ok(pairs)
        },
    );
    match pairs {
        Ok(pairs) => handle(&state.backend, QueryParams::from_pairs(pairs)).await,
        Err(err) => AppError(err).render(ResponseFormat::Xml, Uuid::new_v4()),
    }
}

/// `application/x-www-form-urlencoded` 形式のキー・値の組を復号
pub fn decode_pairs(input: &[u8]) -> SnsResult<Vec<(String, String)>> {
    serde_urlencoded::from_bytes(input).map_err(|err| {
        SnsError::InvalidParameter(format!("Invalid parameter: request encoding ({})", err))
    })
}

async fn handle(backend: &SnsBackend, params: QueryParams) -> Response {
    let request_id = Uuid::new_v4();
    let format = if params.wants_json() {
        ResponseFormat::Json
    } else {
        ResponseFormat::Xml
    };

    let action = match params.action() {
        Ok(action) => action.to_string(),
        Err(err) => return AppError(err).render(format, request_id),
    };
    debug!(%action, %request_id, "Query API request");

    match dispatch(backend, &action, &params).await {
        Ok(result) => render::success(format, &action, result.as_ref(), request_id),
        Err(err) => AppError(err).render(format, request_id),
    }
}

/// 操作を実行し、`<Action>Result` に入る値を返す（結果を持たない操作は `None`）
pub async fn dispatch(
    backend: &SnsBackend,
    action: &str,
    params: &QueryParams,
) -> SnsResult<Option<Value>> {
    match action {
        "CreatePlatformApplication" => {
            let platform: Platform = params.required("Platform")?.parse()?;
            let req = CreatePlatformApplicationRequest::new(params.required("Name")?, platform)
                .with_attributes(params.attributes("Attributes")?);
            to_result(backend.create_platform_application(req).await?)
        }
        "GetPlatformApplicationAttributes" => {
            let arn = params.required("PlatformApplicationArn")?;
            to_result(backend.get_platform_application_attributes(&arn).await?)
        }
        "SetPlatformApplicationAttributes" => {
            let arn = params.required("PlatformApplicationArn")?;
            let attributes = params.attributes("Attributes")?;
            backend
                .set_platform_application_attributes(&arn, &attributes)
                .await?;
            Ok(None)
        }
        "ListPlatformApplications" => {
            let next_token = params.get("NextToken");
            to_result(backend.list_platform_applications(next_token).await?)
        }
        "DeletePlatformApplication" => {
            let arn = params.required("PlatformApplicationArn")?;
            backend.delete_platform_application(&arn).await?;
            Ok(None)
        }
        "CreatePlatformEndpoint" => {
            let mut req = CreatePlatformEndpointRequest::new(
                params.required("PlatformApplicationArn")?,
                params.required("Token")?,
            )
            .with_attributes(params.attributes("Attributes")?);
            req.custom_user_data = params.optional("CustomUserData");
            to_result(backend.create_platform_endpoint(req).await?)
        }
        "ListEndpointsByPlatformApplication" => {
            let arn = params.required("PlatformApplicationArn")?;
            let next_token = params.get("NextToken");
            to_result(
                backend
                    .list_endpoints_by_platform_application(&arn, next_token)
                    .await?,
            )
        }
        "GetEndpointAttributes" => {
            let arn = params.required("EndpointArn")?;
            to_result(backend.get_endpoint_attributes(&arn).await?)
        }
        "SetEndpointAttributes" => {
            let arn = params.required("EndpointArn")?;
            let attributes = params.attributes("Attributes")?;
            backend.set_endpoint_attributes(&arn, &attributes).await?;
            Ok(None)
        }
        "DeleteEndpoint" => {
            let arn = params.required("EndpointArn")?;
            backend.delete_endpoint(&arn).await?;
            Ok(None)
        }
        "Publish" => {
            let req = PublishRequest {
                target_arn: params.optional("TargetArn"),
                topic_arn: params.optional("TopicArn"),
                message: params.required("Message")?,
                message_structure: params.optional("MessageStructure"),
                subject: params.optional("Subject"),
            };
            to_result(backend.publish(req).await?)
        }
        "CreateTopic" => {
            let name = params.required("Name")?;
            to_result(backend.create_topic(&name).await?)
        }
        "ListTopics" => to_result(backend.list_topics(params.get("NextToken")).await?),
        "GetTopicAttributes" => {
            let arn = params.required("TopicArn")?;
            to_result(backend.get_topic_attributes(&arn).await?)
        }
        "DeleteTopic" => {
            let arn = params.required("TopicArn")?;
            backend.delete_topic(&arn).await?;
            Ok(None)
        }
        other => Err(SnsError::InvalidAction(format!(
            "The action {} is not valid for this endpoint",
            other
        ))),
    }
}

fn to_result<T: Serialize>(value: T) -> SnsResult<Option<Value>> {
    let value = serde_json::to_value(value).map_err(CommonError::from)?;
    Ok(Some(value))
}
