use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::errors::PushError;

#[derive(Debug, Clone, PartialEq)]
pub enum CustomPayload {
    Json(JsonValue),
    Raw(String),
}

impl CustomPayload {
    pub fn parse(text: &str) -> Self {
        match serde_json::from_str::<JsonValue>(text) {
            Ok(value) => CustomPayload::Json(value),
            Err(_) => CustomPayload::Raw(text.to_string()),
        }
    }

    pub fn to_value(&self) -> JsonValue {
        match self {
            CustomPayload::Json(value) => value.clone(),
            CustomPayload::Raw(text) => JsonValue::String(text.clone()),
        }
    }

    // Decoded strings and nulls are stored in their JSON text form so that
    // restoring them through `parse` yields `Json` again.
    fn to_snapshot_value(&self) -> JsonValue {
        match self {
            CustomPayload::Json(value @ (JsonValue::String(_) | JsonValue::Null)) => {
                JsonValue::String(value.to_string())
            }
            other => other.to_value(),
        }
    }

    fn from_snapshot_value(value: JsonValue) -> Self {
        match value {
            JsonValue::String(text) => CustomPayload::parse(&text),
            other => CustomPayload::Json(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum AfterOpen {
    #[default]
    OpenApp,
    OpenUrl(String),
    OpenActivity(String),
    OpenCustom(CustomPayload),
}

impl AfterOpen {
    pub fn as_str(&self) -> &'static str {
        match self {
            AfterOpen::OpenApp => "go_app",
            AfterOpen::OpenUrl(_) => "go_url",
            AfterOpen::OpenActivity(_) => "go_activity",
            AfterOpen::OpenCustom(_) => "go_custom",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub ticker: String,
    pub title: String,
    pub text: String,
    pub icon: Option<String>,
    pub large_icon: Option<String>,
    pub img: Option<String>,
    pub sound: Option<String>,
    pub builder_id: i64,
    pub play_vibrate: bool,
    pub play_lights: bool,
    pub play_sound: bool,
    pub extra: Option<Map<String, JsonValue>>,
    after_open: AfterOpen,
}

impl Notification {
    pub fn new(
        ticker: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            title: title.into(),
            text: text.into(),
            icon: None,
            large_icon: None,
            img: None,
            sound: None,
            builder_id: 0,
            play_vibrate: false,
            play_lights: false,
            play_sound: false,
            extra: None,
            after_open: AfterOpen::OpenApp,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_large_icon(mut self, large_icon: impl Into<String>) -> Self {
        self.large_icon = Some(large_icon.into());
        self
    }

    pub fn with_img(mut self, img: impl Into<String>) -> Self {
        self.img = Some(img.into());
        self
    }

    pub fn with_sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = Some(sound.into());
        self
    }

    pub fn with_builder_id(mut self, builder_id: i64) -> Self {
        self.builder_id = builder_id;
        self
    }

    pub fn with_play_vibrate(mut self, play: bool) -> Self {
        self.play_vibrate = play;
        self
    }

    pub fn with_play_lights(mut self, play: bool) -> Self {
        self.play_lights = play;
        self
    }

    pub fn with_play_sound(mut self, play: bool) -> Self {
        self.play_sound = play;
        self
    }

    pub fn with_extra(mut self, extra: Map<String, JsonValue>) -> Self {
        self.extra = Some(extra);
        self
    }

    pub fn after_open(&self) -> &AfterOpen {
        &self.after_open
    }

    pub fn custom(&self) -> Option<&CustomPayload> {
        match &self.after_open {
            AfterOpen::OpenCustom(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn set_open_app(&mut self) -> &mut Self {
        self.after_open = AfterOpen::OpenApp;
        self
    }

    pub fn set_open_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.after_open = AfterOpen::OpenUrl(url.into());
        self
    }

    pub fn set_open_activity(&mut self, activity: impl Into<String>) -> &mut Self {
        self.after_open = AfterOpen::OpenActivity(activity.into());
        self
    }

    pub fn set_open_custom(&mut self, payload: &str) -> &mut Self {
        self.after_open = AfterOpen::OpenCustom(CustomPayload::parse(payload));
        self
    }

    pub fn serialize(&self) -> Result<String, PushError> {
        let (url, activity, custom) = match &self.after_open {
            AfterOpen::OpenApp => (None, None, None),
            AfterOpen::OpenUrl(url) => (Some(url.clone()), None, None),
            AfterOpen::OpenActivity(activity) => (None, Some(activity.clone()), None),
            AfterOpen::OpenCustom(payload) => (None, None, Some(payload.to_snapshot_value())),
        };

        let snapshot = NotificationSnapshot {
            ticker: Some(self.ticker.clone()),
            title: Some(self.title.clone()),
            text: Some(self.text.clone()),
            icon: self.icon.clone(),
            large_icon: self.large_icon.clone(),
            img: self.img.clone(),
            sound: self.sound.clone(),
            builder_id: Some(self.builder_id),
            play_vibrate: Some(self.play_vibrate),
            play_lights: Some(self.play_lights),
            play_sound: Some(self.play_sound),
            extra: self.extra.clone(),
            after_open: Some(self.after_open.as_str().to_string()),
            url,
            activity,
            custom,
        };

        serde_json::to_string(&snapshot).map_err(|e| PushError::DataShape(e.to_string()))
    }

    pub fn deserialize(text: &str) -> Result<Self, PushError> {
        let snapshot: NotificationSnapshot = serde_json::from_str(text)
            .map_err(|e| PushError::DataShape(format!("notification snapshot: {}", e)))?;

        let mut notification = Notification::new(
            required(snapshot.ticker, "ticker")?,
            required(snapshot.title, "title")?,
            required(snapshot.text, "text")?,
        );
        notification.icon = snapshot.icon;
        notification.large_icon = snapshot.large_icon;
        notification.img = snapshot.img;
        notification.sound = snapshot.sound;
        notification.builder_id = snapshot.builder_id.unwrap_or(0);
        notification.play_vibrate = snapshot.play_vibrate.unwrap_or(false);
        notification.play_lights = snapshot.play_lights.unwrap_or(false);
        notification.play_sound = snapshot.play_sound.unwrap_or(false);
        notification.extra = snapshot.extra;

        let tag = required(snapshot.after_open, "after_open")?;
        // Older snapshots prefix the tag with the enum name.
        let tag = tag.strip_prefix("AfterOpenType.").unwrap_or(&tag);

        match tag {
            "go_app" => {
                notification.set_open_app();
            }
            "go_url" => {
                notification.set_open_url(required(snapshot.url, "url")?);
            }
            "go_activity" => {
                notification.set_open_activity(required(snapshot.activity, "activity")?);
            }
            "go_custom" => {
                let custom = required(snapshot.custom, "custom")?;
                notification.after_open =
                    AfterOpen::OpenCustom(CustomPayload::from_snapshot_value(custom));
            }
            other => {
                return Err(PushError::UnsupportedVariant(format!(
                    "after_open type '{}'",
                    other
                )));
            }
        }

        Ok(notification)
    }
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, PushError> {
    value.ok_or_else(|| PushError::DataShape(format!("missing required field '{}'", field)))
}

#[derive(Debug, Serialize, Deserialize)]
struct NotificationSnapshot {
    ticker: Option<String>,
    title: Option<String>,
    text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    large_icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    img: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    sound: Option<String>,

    #[serde(default)]
    builder_id: Option<i64>,

    #[serde(default)]
    play_vibrate: Option<bool>,

    #[serde(default)]
    play_lights: Option<bool>,

    #[serde(default)]
    play_sound: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    extra: Option<Map<String, JsonValue>>,

    after_open: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    activity: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present"
    )]
    custom: Option<JsonValue>,
}

// A present `null` is a payload, only an absent key is `None`.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<JsonValue>, D::Error>
where
    D: Deserializer<'de>,
{
    JsonValue::deserialize(deserializer).map(Some)
}
