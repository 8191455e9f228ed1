use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::{
    config::{Config, CredentialSource, Credentials},
    errors::PushError,
    models::{
        notification::{CustomPayload, Notification},
        payload::build_request,
        request::{GatewayRequest, PlatformRequests, WirePolicy},
        status::MessageState,
        validation::validate_device_token,
    },
    utils::current_timestamp_millis,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Android,
    Ios,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Android, Platform::Ios];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Platform {
    type Err = PushError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "android" | "0" => Ok(Platform::Android),
            "ios" | "1" => Ok(Platform::Ios),
            other => Err(PushError::UnsupportedVariant(format!(
                "platform '{}'",
                other
            ))),
        }
    }
}

impl TryFrom<u8> for Platform {
    type Error = PushError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Platform::Android),
            1 => Ok(Platform::Ios),
            other => Err(PushError::UnsupportedVariant(format!(
                "platform code {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub token: String,
    pub platform: Platform,
}

impl Device {
    pub fn new(token: impl Into<String>, platform: Platform) -> Self {
        Self {
            token: token.into(),
            platform,
        }
    }
}

impl<T: Into<String>> From<(T, Platform)> for Device {
    fn from((token, platform): (T, Platform)) -> Self {
        Device::new(token, platform)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CastType {
    Unicast,
    Listcast,
    Filecast,
    Broadcast,
    Groupcast,
    Customizedcast,
}

impl CastType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CastType::Unicast => "unicast",
            CastType::Listcast => "listcast",
            CastType::Filecast => "filecast",
            CastType::Broadcast => "broadcast",
            CastType::Groupcast => "groupcast",
            CastType::Customizedcast => "customizedcast",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BroadcastTargets {
    Both,
    Only(Platform),
}

impl BroadcastTargets {
    pub fn includes(&self, platform: Platform) -> bool {
        match self {
            BroadcastTargets::Both => true,
            BroadcastTargets::Only(only) => *only == platform,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Audience {
    Unicast(Device),
    Listcast(Vec<Device>),
    Broadcast(BroadcastTargets),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Recipients {
    All,
    Tokens(Vec<String>),
}

impl Audience {
    pub fn cast_type(&self) -> CastType {
        match self {
            Audience::Unicast(_) => CastType::Unicast,
            Audience::Listcast(_) => CastType::Listcast,
            Audience::Broadcast(_) => CastType::Broadcast,
        }
    }

    pub fn recipients(&self, platform: Platform) -> Option<Recipients> {
        let devices = match self {
            Audience::Unicast(device) => std::slice::from_ref(device),
            Audience::Listcast(devices) => devices.as_slice(),
            Audience::Broadcast(targets) => {
                return targets.includes(platform).then_some(Recipients::All);
            }
        };

        let tokens: Vec<String> = devices
            .iter()
            .filter(|device| device.platform == platform)
            .map(|device| device.token.clone())
            .collect();

        (!tokens.is_empty()).then_some(Recipients::Tokens(tokens))
    }

    fn validate(&self) -> Result<(), PushError> {
        match self {
            Audience::Unicast(device) => validate_device_token(&device.token),
            Audience::Listcast(devices) => devices
                .iter()
                .try_for_each(|device| validate_device_token(&device.token)),
            Audience::Broadcast(_) => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayType {
    Message,
    Notification,
}

impl DisplayType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayType::Message => "message",
            DisplayType::Notification => "notification",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Message { extra: Option<JsonValue> },
    Notification(Notification),
}

impl Content {
    pub fn display_type(&self) -> DisplayType {
        match self {
            Content::Message { .. } => DisplayType::Message,
            Content::Notification(_) => DisplayType::Notification,
        }
    }
}

const GATEWAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn serialize_gateway_time<S>(time: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match time {
        Some(time) => serializer.serialize_str(&time.format(GATEWAY_TIME_FORMAT).to_string()),
        None => serializer.serialize_none(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Policy {
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_gateway_time"
    )]
    pub start_time: Option<NaiveDateTime>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_gateway_time"
    )]
    pub expire_time: Option<NaiveDateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_send_num: Option<u64>,
}

impl Policy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start_time(mut self, start_time: NaiveDateTime) -> Self {
        self.start_time = Some(start_time);
        self
    }

    pub fn with_expire_time(mut self, expire_time: NaiveDateTime) -> Self {
        self.expire_time = Some(expire_time);
        self
    }

    pub fn with_max_send_num(mut self, max_send_num: u64) -> Self {
        self.max_send_num = Some(max_send_num);
        self
    }
}

#[derive(Debug, Clone)]
pub struct Message {
    out_biz_no: String,
    credentials: Credentials,
    description: Option<String>,
    thirdparty_id: Option<String>,
    production_mode: bool,
    audience: Option<Audience>,
    content: Option<Content>,
    custom: Option<JsonValue>,
    policy: Policy,
    prepared: Option<PlatformRequests>,
    pushed: bool,
}

impl Message {
    pub fn new(out_biz_no: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            out_biz_no: out_biz_no.into(),
            credentials,
            description: None,
            thirdparty_id: None,
            production_mode: false,
            audience: None,
            content: None,
            custom: None,
            policy: Policy::default(),
            prepared: None,
            pushed: false,
        }
    }

    pub fn from_source(
        out_biz_no: impl Into<String>,
        source: &dyn CredentialSource,
    ) -> Result<Self, PushError> {
        let credentials = Credentials::resolve(None, None, Some(source))?;
        Ok(Self::new(out_biz_no, credentials))
    }

    pub fn from_config(out_biz_no: impl Into<String>, config: &Config) -> Result<Self, PushError> {
        let mut message = Self::from_source(out_biz_no, config)?;
        message.production_mode = config.production_mode;
        Ok(message)
    }

    pub fn out_biz_no(&self) -> &str {
        &self.out_biz_no
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn thirdparty_id(&self) -> Option<&str> {
        self.thirdparty_id.as_deref()
    }

    pub fn audience(&self) -> Option<&Audience> {
        self.audience.as_ref()
    }

    pub fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    pub fn custom(&self) -> Option<&JsonValue> {
        self.custom.as_ref()
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn state(&self) -> MessageState {
        if self.pushed {
            return MessageState::Pushed;
        }
        if self.prepared.is_some() {
            return MessageState::Finalized;
        }
        match (self.audience.is_some(), self.content.is_some()) {
            (true, true) => MessageState::Ready,
            (true, false) => MessageState::AudienceSet,
            (false, true) => MessageState::ContentSet,
            (false, false) => MessageState::Unconfigured,
        }
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self.invalidate()
    }

    pub fn set_thirdparty_id(&mut self, thirdparty_id: impl Into<String>) -> &mut Self {
        self.thirdparty_id = Some(thirdparty_id.into());
        self.invalidate()
    }

    pub fn set_production_mode(&mut self, production_mode: bool) -> &mut Self {
        self.production_mode = production_mode;
        self.invalidate()
    }

    pub fn set_unicast(&mut self, device_token: impl Into<String>, platform: Platform) -> &mut Self {
        self.audience = Some(Audience::Unicast(Device::new(device_token, platform)));
        self.invalidate()
    }

    pub fn set_listcast<I, D>(&mut self, devices: I) -> &mut Self
    where
        I: IntoIterator<Item = D>,
        D: Into<Device>,
    {
        self.audience = Some(Audience::Listcast(
            devices.into_iter().map(Into::into).collect(),
        ));
        self.invalidate()
    }

    pub fn set_broadcast(&mut self) -> &mut Self {
        self.audience = Some(Audience::Broadcast(BroadcastTargets::Both));
        self.invalidate()
    }

    pub fn set_broadcast_for(&mut self, platform: Platform) -> &mut Self {
        self.audience = Some(Audience::Broadcast(BroadcastTargets::Only(platform)));
        self.invalidate()
    }

    pub fn set_message(&mut self, body: impl Into<JsonValue>) -> &mut Self {
        self.custom = Some(body.into());
        self.content = Some(Content::Message { extra: None });
        self.invalidate()
    }

    pub fn set_message_custom(
        &mut self,
        custom: impl Into<JsonValue>,
        extra: Option<JsonValue>,
    ) -> &mut Self {
        self.custom = Some(custom.into());
        self.content = Some(Content::Message { extra });
        self.invalidate()
    }

    pub fn set_notification(&mut self, notification: &Notification) -> &mut Self {
        self.custom = notification.custom().map(CustomPayload::to_value);
        self.content = Some(Content::Notification(notification.clone()));
        self.invalidate()
    }

    pub fn set_policy(&mut self, policy: Policy) -> &mut Self {
        self.policy = policy;
        self.invalidate()
    }

    pub fn finalize(&mut self) -> Result<&PlatformRequests, PushError> {
        let prepared = match self.prepared.take() {
            Some(prepared) => prepared,
            None => self.build_requests()?,
        };
        Ok(&*self.prepared.insert(prepared))
    }

    pub(crate) fn mark_pushed(&mut self) {
        self.pushed = true;
    }

    fn invalidate(&mut self) -> &mut Self {
        self.prepared = None;
        self.pushed = false;
        self
    }

    fn build_requests(&self) -> Result<PlatformRequests, PushError> {
        let audience = self.audience.as_ref().ok_or_else(|| {
            PushError::Configuration(
                "audience is not set, call set_unicast/set_listcast/set_broadcast first".to_string(),
            )
        })?;
        let content = self.content.as_ref().ok_or_else(|| {
            PushError::Configuration(
                "content is not set, call set_message/set_notification first".to_string(),
            )
        })?;

        audience.validate()?;

        let envelope = GatewayRequest {
            appkey: self.credentials.app_key().to_string(),
            timestamp: current_timestamp_millis(),
            cast_type: audience.cast_type(),
            device_tokens: None,
            policy: WirePolicy {
                out_biz_no: self.out_biz_no.clone(),
                policy: self.policy.clone(),
            },
            production_mode: self.production_mode,
            description: self.description.clone(),
            thirdparty_id: self.thirdparty_id.clone(),
            payload: JsonValue::Null,
        };

        let mut requests = PlatformRequests::default();
        for platform in Platform::ALL {
            let Some(recipients) = audience.recipients(platform) else {
                continue;
            };
            let request = build_request(
                platform,
                &envelope,
                recipients,
                content,
                self.custom.as_ref(),
            )?;
            requests.set(platform, request);
        }

        debug!(
            out_biz_no = %self.out_biz_no,
            cast_type = audience.cast_type().as_str(),
            display_type = content.display_type().as_str(),
            android = requests.android.is_some(),
            ios = requests.ios.is_some(),
            "Gateway requests built"
        );

        Ok(requests)
    }
}
