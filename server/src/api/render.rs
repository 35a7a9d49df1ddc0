//! Query API レスポンス描画
//!
//! 結果（JSON値）を SNS 形式の XML または JSON に変換する。
//! XMLでは配列は `<member>`、`Attributes` は `<entry><key/><value/></entry>` で表す。

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};
use serde_json::{json, Map, Value};
use sns_mock_common::error::SnsError;
use uuid::Uuid;

/// SNS APIのXML名前空間
pub const XML_NAMESPACE: &str = "http://sns.amazonaws.com/doc/2010-03-31/";

const ATTRIBUTE_MAP_ELEMENTS: [&str; 1] = ["Attributes"];

/// レスポンス形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// `text/xml`（既定）
    #[default]
    Xml,
    /// `application/json`（`ContentType=JSON`）
    Json,
}

impl ResponseFormat {
    fn content_type(self) -> &'static str {
        match self {
            Self::Xml => "text/xml",
            Self::Json => "application/json",
        }
    }
}

/// 成功レスポンス
pub fn success(
    format: ResponseFormat,
    action: &str,
    result: Option<&Value>,
    request_id: Uuid,
) -> Response {
    let body = match format {
        ResponseFormat::Xml => success_xml(action, result, request_id),
        ResponseFormat::Json => Ok(success_json(action, result, request_id).to_string()),
    };

    match body {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, format.content_type())],
            body,
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, action, "Failed to render response");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}

/// エラーレスポンス
pub fn error(
    format: ResponseFormat,
    status: StatusCode,
    err: &SnsError,
    request_id: Uuid,
) -> Response {
    let body = match format {
        ResponseFormat::Xml => error_xml(err, request_id),
        ResponseFormat::Json => Ok(error_json(err, request_id).to_string()),
    };

    match body {
        Ok(body) => (status, [(header::CONTENT_TYPE, format.content_type())], body).into_response(),
        Err(render_err) => {
            tracing::error!(error = %render_err, "Failed to render error response");
            (status, err.external_message()).into_response()
        }
    }
}

/// 成功レスポンスのJSON表現
pub fn success_json(action: &str, result: Option<&Value>, request_id: Uuid) -> Value {
    let mut body = Map::new();
    if let Some(result) = result {
        body.insert(format!("{}Result", action), result.clone());
    }
    body.insert(
        "ResponseMetadata".to_string(),
        json!({ "RequestId": request_id.to_string() }),
    );

    let mut root = Map::new();
    root.insert(format!("{}Response", action), Value::Object(body));
    Value::Object(root)
}

/// エラーレスポンスのJSON表現
pub fn error_json(err: &SnsError, request_id: Uuid) -> Value {
    json!({
        "Error": {
            "Type": err.fault(),
            "Code": err.code(),
            "Message": err.external_message(),
        },
        "RequestId": request_id.to_string(),
    })
}

/// 成功レスポンスのXML表現
pub fn success_xml(
    action: &str,
    result: Option<&Value>,
    request_id: Uuid,
) -> quick_xml::Result<String> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let root = format!("{}Response", action);
    let mut start = BytesStart::new(root.as_str());
    start.push_attribute(("xmlns", XML_NAMESPACE));
    writer.write_event(Event::Start(start))?;

    if let Some(result) = result {
        write_value(&mut writer, &format!("{}Result", action), result)?;
    }
    write_start(&mut writer, "ResponseMetadata")?;
    write_text_element(&mut writer, "RequestId", &request_id.to_string())?;
    write_end(&mut writer, "ResponseMetadata")?;

    write_end(&mut writer, &root)?;
    into_string(writer)
}

/// エラーレスポンスのXML表現
pub fn error_xml(err: &SnsError, request_id: Uuid) -> quick_xml::Result<String> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut start = BytesStart::new("ErrorResponse");
    start.push_attribute(("xmlns", XML_NAMESPACE));
    writer.write_event(Event::Start(start))?;

    write_start(&mut writer, "Error")?;
    write_text_element(&mut writer, "Type", err.fault())?;
    write_text_element(&mut writer, "Code", err.code())?;
    write_text_element(&mut writer, "Message", &err.external_message())?;
    write_end(&mut writer, "Error")?;
    write_text_element(&mut writer, "RequestId", &request_id.to_string())?;

    write_end(&mut writer, "ErrorResponse")?;
    into_string(writer)
}

fn write_value(writer: &mut Writer<Vec<u8>>, name: &str, value: &Value) -> quick_xml::Result<()> {
    match value {
        Value::Null => Ok(()),
        Value::String(text) => write_text_element(writer, name, text),
        Value::Bool(_) | Value::Number(_) => write_text_element(writer, name, &value.to_string()),
        Value::Array(items) => {
            write_start(writer, name)?;
            for item in items {
                write_value(writer, "member", item)?;
            }
            write_end(writer, name)
        }
        Value::Object(map) if ATTRIBUTE_MAP_ELEMENTS.contains(&name) => {
            write_start(writer, name)?;
            for (key, entry_value) in map {
                write_start(writer, "entry")?;
                write_text_element(writer, "key", key)?;
                let text = match entry_value {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                };
                write_text_element(writer, "value", &text)?;
                write_end(writer, "entry")?;
            }
            write_end(writer, name)
        }
        Value::Object(map) => {
            write_start(writer, name)?;
            for (key, child) in map {
                write_value(writer, key, child)?;
            }
            write_end(writer, name)
        }
    }
}

fn write_start(writer: &mut Writer<Vec<u8>>, name: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))
}

fn write_end(writer: &mut Writer<Vec<u8>>, name: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::End(BytesEnd::new(name)))
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> quick_xml::Result<()> {
    write_start(writer, name)?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    write_end(writer, name)
}

fn into_string(writer: Writer<Vec<u8>>) -> quick_xml::Result<String> {
    // 入力はすべて &str 由来のため常にUTF-8
    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}
