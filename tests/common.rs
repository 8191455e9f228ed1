use std::sync::Mutex;

use async_trait::async_trait;
use umeng_push::{
    Credentials, Message, PushError, RawResponse, SignedRequest, Transport,
};

pub fn test_message(out_biz_no: &str) -> Message {
    let credentials = Credentials::new("test_app_key", "test_master_secret")
        .expect("test credentials are non-empty");
    Message::new(out_biz_no, credentials)
}

/// Transport double that records every request and answers by platform.
pub struct ScriptedTransport {
    pub android: Result<RawResponse, String>,
    pub ios: Result<RawResponse, String>,
    pub sent: Mutex<Vec<SignedRequest>>,
}

impl ScriptedTransport {
    pub fn new(android: Result<RawResponse, String>, ios: Result<RawResponse, String>) -> Self {
        Self {
            android,
            ios,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<SignedRequest> {
        self.sent.lock().expect("lock").clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &SignedRequest) -> Result<RawResponse, PushError> {
        self.sent.lock().expect("lock").push(request.clone());

        // iOS documents are the only ones carrying an `aps` dictionary.
        let scripted = if request.body.contains("\"aps\"") {
            &self.ios
        } else {
            &self.android
        };

        scripted.clone().map_err(PushError::Transport)
    }
}

pub fn reply(status: u16, body: &str) -> Result<RawResponse, String> {
    Ok(RawResponse {
        status,
        body: body.to_string(),
    })
}
