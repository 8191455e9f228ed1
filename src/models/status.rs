use std::fmt::{Display, Formatter, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageState {
    Unconfigured,
    AudienceSet,
    ContentSet,
    Ready,
    Finalized,
    Pushed,
}

impl Display for MessageState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            MessageState::Unconfigured => write!(f, "unconfigured"),
            MessageState::AudienceSet => write!(f, "audience_set"),
            MessageState::ContentSet => write!(f, "content_set"),
            MessageState::Ready => write!(f, "ready"),
            MessageState::Finalized => write!(f, "finalized"),
            MessageState::Pushed => write!(f, "pushed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpStatusClass {
    Ok,
    ServerError,
    Other(u16),
}

impl From<u16> for HttpStatusClass {
    fn from(code: u16) -> Self {
        match code {
            200 => HttpStatusClass::Ok,
            500 => HttpStatusClass::ServerError,
            other => HttpStatusClass::Other(other),
        }
    }
}

impl Display for HttpStatusClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            HttpStatusClass::Ok => write!(f, "200"),
            HttpStatusClass::ServerError => write!(f, "500"),
            HttpStatusClass::Other(code) => write!(f, "{}", code),
        }
    }
}
