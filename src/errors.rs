use serde_json::Value as JsonValue;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PushError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unsupported variant: {0}")]
    UnsupportedVariant(String),

    #[error("Malformed data: {0}")]
    DataShape(String),

    #[error("Gateway rejected request with error code {error_code}")]
    Gateway {
        error_code: u32,
        error_msg: Option<String>,
        request: Box<JsonValue>,
    },

    #[error("Gateway responded with HTTP status {0}")]
    TransportStatus(u16),

    #[error("Transport failure: {0}")]
    Transport(String),
}

impl PushError {
    pub fn is_transport(&self) -> bool {
        matches!(self, PushError::Transport(_) | PushError::TransportStatus(_))
    }

    pub fn error_code(&self) -> Option<u32> {
        match self {
            PushError::Gateway { error_code, .. } => Some(*error_code),
            _ => None,
        }
    }
}

impl From<PushError> for String {
    fn from(err: PushError) -> Self {
        err.to_string()
    }
}
