use anyhow::Result;
use serde_json::{Map, Value, json};
use umeng_push::{AfterOpen, CustomPayload, Notification, PushError};

fn full_notification() -> Notification {
    let mut extra = Map::new();
    extra.insert("display_type".to_string(), json!("notification"));
    extra.insert("badge".to_string(), json!(3));

    Notification::new("test_ticker", "test_title", "test_text")
        .with_icon("icon_name")
        .with_large_icon("large_icon_name")
        .with_img("https://example.com/img.png")
        .with_sound("chime")
        .with_builder_id(2)
        .with_play_vibrate(true)
        .with_play_lights(false)
        .with_play_sound(true)
        .with_extra(extra)
}

/// Test: New notifications default to opening the app
#[test]
fn test_new_notification_defaults_to_open_app() {
    let notification = Notification::new("ticker", "title", "text");

    assert_eq!(notification.after_open(), &AfterOpen::OpenApp);
    assert_eq!(notification.builder_id, 0);
    assert!(!notification.play_vibrate);
    assert!(notification.extra.is_none());
    assert!(notification.custom().is_none());
}

/// Test: Setting a tap-action replaces the previous one
#[test]
fn test_tap_action_setters_replace_each_other() {
    let mut notification = Notification::new("ticker", "title", "text");

    notification.set_open_url("https://example.com");
    assert_eq!(
        notification.after_open(),
        &AfterOpen::OpenUrl("https://example.com".to_string())
    );

    notification.set_open_activity("com.example.MainActivity");
    assert_eq!(
        notification.after_open(),
        &AfterOpen::OpenActivity("com.example.MainActivity".to_string())
    );

    notification.set_open_custom("follow").set_open_app();
    assert_eq!(notification.after_open(), &AfterOpen::OpenApp);
    assert!(notification.custom().is_none());
}

/// Test: Custom payloads are decoded when they are JSON and kept verbatim otherwise
#[test]
fn test_custom_payload_json_or_raw() {
    let mut notification = Notification::new("ticker", "title", "text");

    notification.set_open_custom(r#"{"page":"profile","id":7}"#);
    assert_eq!(
        notification.custom(),
        Some(&CustomPayload::Json(json!({"page": "profile", "id": 7})))
    );

    notification.set_open_custom("follow");
    assert_eq!(
        notification.custom(),
        Some(&CustomPayload::Raw("follow".to_string()))
    );
    assert_eq!(
        notification.custom().map(CustomPayload::to_value),
        Some(json!("follow"))
    );
}

/// Test: Every field and tap-action survives a snapshot round trip
#[test]
fn test_snapshot_round_trip_preserves_every_tap_action() -> Result<()> {
    let mut variants = Vec::new();

    variants.push(full_notification());

    let mut url = full_notification();
    url.set_open_url("https://example.com/a?b=c");
    variants.push(url);

    let mut activity = full_notification();
    activity.set_open_activity("com.example.Detail");
    variants.push(activity);

    let mut json_custom = full_notification();
    json_custom.set_open_custom(r#"{"action":"follow","ids":[1,2]}"#);
    variants.push(json_custom);

    let mut raw_custom = full_notification();
    raw_custom.set_open_custom("follow");
    variants.push(raw_custom);

    let mut quoted_custom = Notification::new("ticker", "title", "text");
    quoted_custom.set_open_custom(r#""already a json string""#);
    variants.push(quoted_custom);

    let mut null_custom = Notification::new("ticker", "title", "text");
    null_custom.set_open_custom("null");
    variants.push(null_custom);

    for original in variants {
        let restored = Notification::deserialize(&original.serialize()?)?;
        assert_eq!(restored, original);
    }

    Ok(())
}

/// Test: Snapshots encode the tap-action tag and its data
#[test]
fn test_snapshot_contains_tap_action_tag() -> Result<()> {
    let mut notification = Notification::new("ticker", "title", "text");
    notification.set_open_url("https://example.com");

    let snapshot: Value = serde_json::from_str(&notification.serialize()?)?;

    assert_eq!(snapshot["after_open"], json!("go_url"));
    assert_eq!(snapshot["url"], json!("https://example.com"));
    assert_eq!(snapshot["ticker"], json!("ticker"));

    Ok(())
}

/// Test: Legacy snapshots with prefixed tap-action tags are accepted
#[test]
fn test_restore_accepts_legacy_tag() -> Result<()> {
    let legacy = r#"{
        "ticker": "test_ticker",
        "title": "test_title",
        "text": "test_text",
        "builder_id": 0,
        "play_vibrate": false,
        "play_lights": false,
        "play_sound": false,
        "extra": {"display_type": "notification"},
        "after_open": "AfterOpenType.go_custom",
        "custom": "follow"
    }"#;

    let notification = Notification::deserialize(legacy)?;

    assert_eq!(
        notification.after_open(),
        &AfterOpen::OpenCustom(CustomPayload::Raw("follow".to_string()))
    );
    assert_eq!(
        notification.extra.as_ref().and_then(|e| e.get("display_type")),
        Some(&json!("notification"))
    );

    Ok(())
}

/// Test: A legacy snapshot with an explicit null custom payload restores it as JSON null
#[test]
fn test_restore_keeps_null_custom_payload() -> Result<()> {
    let legacy = r#"{
        "ticker": "test_ticker",
        "title": "test_title",
        "text": "test_text",
        "after_open": "AfterOpenType.go_custom",
        "custom": null
    }"#;

    let notification = Notification::deserialize(legacy)?;

    assert_eq!(
        notification.after_open(),
        &AfterOpen::OpenCustom(CustomPayload::Json(Value::Null))
    );

    let without_custom = r#"{"ticker":"t","title":"y","text":"x","after_open":"go_custom"}"#;
    assert!(matches!(
        Notification::deserialize(without_custom),
        Err(PushError::DataShape(_))
    ));

    Ok(())
}

/// Test: Missing required fields fail the restore
#[test]
fn test_restore_rejects_missing_required_fields() {
    let missing_title = r#"{"ticker":"t","text":"x","after_open":"go_app"}"#;
    let missing_tag = r#"{"ticker":"t","title":"y","text":"x"}"#;

    for snapshot in [missing_title, missing_tag] {
        let result = Notification::deserialize(snapshot);
        assert!(
            matches!(result, Err(PushError::DataShape(_))),
            "expected data-shape error, got {:?}",
            result
        );
    }
}

/// Test: Malformed snapshots fail with a data-shape error
#[test]
fn test_restore_rejects_malformed_json() {
    let result = Notification::deserialize("{ not json");

    assert!(matches!(result, Err(PushError::DataShape(_))));
}

/// Test: Unknown tap-action tags are rejected
#[test]
fn test_restore_rejects_unknown_tap_action() {
    let snapshot = r#"{"ticker":"t","title":"y","text":"x","after_open":"go_somewhere"}"#;

    let result = Notification::deserialize(snapshot);

    assert!(matches!(result, Err(PushError::UnsupportedVariant(_))));
}
