use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::{
    errors::PushError,
    models::message::{CastType, Platform, Policy},
    utils::{METHOD_POST, sign},
};

fn serialize_bool_as_string<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(if *value { "true" } else { "false" })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WirePolicy {
    pub out_biz_no: String,

    #[serde(flatten)]
    pub policy: Policy,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GatewayRequest {
    pub appkey: String,
    pub timestamp: i64,

    #[serde(rename = "type")]
    pub cast_type: CastType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_tokens: Option<String>,

    pub policy: WirePolicy,

    #[serde(serialize_with = "serialize_bool_as_string")]
    pub production_mode: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thirdparty_id: Option<String>,

    pub payload: JsonValue,
}

impl GatewayRequest {
    pub fn to_value(&self) -> Result<JsonValue, PushError> {
        serde_json::to_value(self).map_err(|e| PushError::DataShape(e.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlatformRequests {
    pub android: Option<GatewayRequest>,
    pub ios: Option<GatewayRequest>,
}

impl PlatformRequests {
    pub fn get(&self, platform: Platform) -> Option<&GatewayRequest> {
        match platform {
            Platform::Android => self.android.as_ref(),
            Platform::Ios => self.ios.as_ref(),
        }
    }

    pub(crate) fn set(&mut self, platform: Platform, request: GatewayRequest) {
        match platform {
            Platform::Android => self.android = Some(request),
            Platform::Ios => self.ios = Some(request),
        }
    }

    pub fn len(&self) -> usize {
        usize::from(self.android.is_some()) + usize::from(self.ios.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub method: &'static str,
    pub url: String,
    pub body: String,
    pub sign: String,
}

impl SignedRequest {
    pub fn new(
        url: &str,
        request: &GatewayRequest,
        app_master_secret: &str,
    ) -> Result<Self, PushError> {
        let body = serde_json::to_string(request)
            .map_err(|e| PushError::DataShape(format!("Failed to serialize request: {}", e)))?;

        debug!(url, body = %body, "Signing gateway request");

        let sign = sign(METHOD_POST, url, &body, app_master_secret);

        Ok(Self {
            method: METHOD_POST,
            url: url.to_string(),
            body,
            sign,
        })
    }

    pub fn target_url(&self) -> String {
        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{}sign={}", self.url, separator, self.sign)
    }
}
