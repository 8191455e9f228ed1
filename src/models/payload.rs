use serde_json::{Map, Value as JsonValue, json};

use crate::{
    errors::PushError,
    models::{
        message::{Content, Platform, Recipients},
        notification::{AfterOpen, Notification},
        request::GatewayRequest,
    },
};

pub const IOS_MESSAGE_ALERT: &str = "消息";

pub fn build_request(
    platform: Platform,
    envelope: &GatewayRequest,
    recipients: Recipients,
    content: &Content,
    custom: Option<&JsonValue>,
) -> Result<GatewayRequest, PushError> {
    let mut request = envelope.clone();

    request.device_tokens = match recipients {
        Recipients::All => None,
        Recipients::Tokens(tokens) => Some(tokens.join(",")),
    };
    request.payload = build_payload(platform, content, custom)?;

    Ok(request)
}

pub fn build_payload(
    platform: Platform,
    content: &Content,
    custom: Option<&JsonValue>,
) -> Result<JsonValue, PushError> {
    match platform {
        Platform::Android => android_payload(content, custom),
        Platform::Ios => ios_payload(content, custom),
    }
}

fn require_custom(custom: Option<&JsonValue>) -> Result<JsonValue, PushError> {
    custom
        .cloned()
        .ok_or_else(|| PushError::Configuration("custom payload is not set".to_string()))
}

fn android_payload(content: &Content, custom: Option<&JsonValue>) -> Result<JsonValue, PushError> {
    let mut payload = Map::new();
    payload.insert(
        "display_type".to_string(),
        json!(content.display_type().as_str()),
    );

    match content {
        Content::Message { extra } => {
            let custom = require_custom(custom)?;
            payload.insert("body".to_string(), json!({ "custom": custom }));
            if let Some(extra) = extra {
                payload.insert("extra".to_string(), extra.clone());
            }
        }
        Content::Notification(notification) => {
            let body = android_notification_body(notification, custom)?;
            payload.insert("body".to_string(), JsonValue::Object(body));
            if let Some(extra) = &notification.extra {
                payload.insert("extra".to_string(), JsonValue::Object(extra.clone()));
            }
        }
    }

    Ok(JsonValue::Object(payload))
}

fn flag(value: bool) -> JsonValue {
    json!(if value { "true" } else { "false" })
}

fn android_notification_body(
    notification: &Notification,
    custom: Option<&JsonValue>,
) -> Result<Map<String, JsonValue>, PushError> {
    let mut body = Map::new();
    body.insert("ticker".to_string(), json!(notification.ticker));
    body.insert("title".to_string(), json!(notification.title));
    body.insert("text".to_string(), json!(notification.text));

    let optional = [
        ("icon", &notification.icon),
        ("img", &notification.img),
        ("sound", &notification.sound),
        ("largeIcon", &notification.large_icon),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            body.insert(key.to_string(), json!(value));
        }
    }
    body.insert("builder_id".to_string(), json!(notification.builder_id));

    // The gateway expects these flags as strings.
    body.insert("play_vibrate".to_string(), flag(notification.play_vibrate));
    body.insert("play_lights".to_string(), flag(notification.play_lights));
    body.insert("play_sound".to_string(), flag(notification.play_sound));

    let after_open = notification.after_open();
    body.insert("after_open".to_string(), json!(after_open.as_str()));
    match after_open {
        AfterOpen::OpenApp => {}
        AfterOpen::OpenUrl(url) => {
            body.insert("url".to_string(), json!(url));
        }
        AfterOpen::OpenActivity(activity) => {
            body.insert("activity".to_string(), json!(activity));
        }
        AfterOpen::OpenCustom(_) => {
            body.insert("custom".to_string(), require_custom(custom)?);
        }
    }

    Ok(body)
}

fn ios_payload(content: &Content, custom: Option<&JsonValue>) -> Result<JsonValue, PushError> {
    let mut payload = Map::new();
    let mut aps = Map::new();

    match content {
        // Auxiliary message content is Android-only.
        Content::Message { .. } => {
            let custom = require_custom(custom)?;
            aps.insert("alert".to_string(), json!(IOS_MESSAGE_ALERT));
            payload.insert("body".to_string(), json!({ "custom": custom }));
        }
        Content::Notification(notification) => {
            aps.insert("alert".to_string(), json!(notification.title));
            if let Some(extra) = &notification.extra {
                for (key, value) in extra {
                    // `aps` is owned by the builder.
                    if key != "aps" {
                        payload.insert(key.clone(), value.clone());
                    }
                }
                if let Some(badge) = extra.get("badge") {
                    aps.insert("badge".to_string(), badge.clone());
                }
            }
        }
    }

    payload.insert("aps".to_string(), JsonValue::Object(aps));
    Ok(JsonValue::Object(payload))
}
