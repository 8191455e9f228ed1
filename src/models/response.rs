use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::warn;

use crate::{errors::PushError, models::status::HttpStatusClass};

pub const RET_SUCCESS: &str = "SUCCESS";

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayReply {
    pub ret: String,
    pub data: ReplyData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReplyData {
    #[serde(default)]
    pub thirdparty_id: Option<String>,

    #[serde(default)]
    pub msg_id: Option<String>,

    #[serde(default)]
    pub task_id: Option<String>,

    #[serde(default)]
    pub error_code: Option<JsonValue>,

    #[serde(default)]
    pub error_msg: Option<String>,
}

impl GatewayReply {
    pub fn parse(body: &str) -> Result<Self, PushError> {
        serde_json::from_str(body)
            .map_err(|e| PushError::DataShape(format!("Failed to parse gateway reply: {}", e)))
    }

    pub fn is_success(&self) -> bool {
        self.ret == RET_SUCCESS
    }

    // `error_code` may arrive as a JSON string or number.
    fn numeric_error_code(&self) -> Option<u32> {
        match &self.data.error_code {
            Some(JsonValue::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            Some(JsonValue::String(s)) => s.trim().parse::<u32>().ok(),
            _ => None,
        }
    }

    pub fn error_code(&self) -> Result<u32, PushError> {
        self.numeric_error_code().ok_or_else(|| {
            PushError::DataShape(format!(
                "gateway reply has no numeric error_code: {:?}",
                self.data.error_code
            ))
        })
    }

    pub fn into_result(self) -> GatewayResult {
        if self.is_success() {
            return GatewayResult::Success {
                thirdparty_id: self.data.thirdparty_id,
                msg_id: self.data.msg_id,
                task_id: self.data.task_id,
            };
        }

        let error_code = self.numeric_error_code();
        if error_code.is_none() {
            warn!(
                ret = %self.ret,
                raw = ?self.data.error_code,
                "Failure reply without numeric error_code"
            );
        }

        GatewayResult::Failure {
            thirdparty_id: self.data.thirdparty_id,
            error_code,
            error_msg: self.data.error_msg,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayResult {
    Success {
        thirdparty_id: Option<String>,
        msg_id: Option<String>,
        task_id: Option<String>,
    },
    Failure {
        thirdparty_id: Option<String>,
        error_code: Option<u32>,
        error_msg: Option<String>,
    },
}

impl GatewayResult {
    pub fn is_success(&self) -> bool {
        matches!(self, GatewayResult::Success { .. })
    }

    pub fn thirdparty_id(&self) -> Option<&str> {
        match self {
            GatewayResult::Success { thirdparty_id, .. }
            | GatewayResult::Failure { thirdparty_id, .. } => thirdparty_id.as_deref(),
        }
    }

    pub fn msg_id(&self) -> Option<&str> {
        match self {
            GatewayResult::Success { msg_id, .. } => msg_id.as_deref(),
            GatewayResult::Failure { .. } => None,
        }
    }

    pub fn error_code(&self) -> Option<u32> {
        match self {
            GatewayResult::Success { .. } => None,
            GatewayResult::Failure { error_code, .. } => *error_code,
        }
    }
}

pub fn classify(status: u16, body: &str, request: &JsonValue) -> Result<GatewayResult, PushError> {
    match HttpStatusClass::from(status) {
        HttpStatusClass::Ok => Ok(GatewayReply::parse(body)?.into_result()),
        HttpStatusClass::ServerError => {
            let reply = GatewayReply::parse(body)?;
            let error_code = reply.error_code()?;

            warn!(error_code, ret = %reply.ret, "Gateway returned server error");

            Err(PushError::Gateway {
                error_code,
                error_msg: reply.data.error_msg,
                request: Box::new(request.clone()),
            })
        }
        HttpStatusClass::Other(code) => Err(PushError::TransportStatus(code)),
    }
}
