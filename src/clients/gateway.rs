use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header::CONTENT_TYPE};
use tracing::{debug, error, info};

use crate::{
    config::Config,
    errors::PushError,
    models::{
        message::{Message, Platform},
        request::{GatewayRequest, SignedRequest},
        response::{GatewayResult, classify},
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &SignedRequest) -> Result<RawResponse, PushError>;
}

pub struct HttpTransport {
    http_client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, PushError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PushError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http_client })
    }

    pub fn from_config(config: &Config) -> Result<Self, PushError> {
        Self::new(Duration::from_secs(config.request_timeout_seconds))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &SignedRequest) -> Result<RawResponse, PushError> {
        let response = self
            .http_client
            .post(request.target_url())
            .header(CONTENT_TYPE, "application/json")
            .body(request.body.clone())
            .send()
            .await
            .map_err(|e| PushError::Transport(format!("Gateway request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| PushError::Transport(format!("Failed to read gateway reply: {}", e)))?;

        Ok(RawResponse { status, body })
    }
}

#[must_use]
#[derive(Debug)]
pub struct PushOutcome {
    pub android: Option<Result<GatewayResult, PushError>>,
    pub ios: Option<Result<GatewayResult, PushError>>,
}

impl PushOutcome {
    pub fn get(&self, platform: Platform) -> Option<&Result<GatewayResult, PushError>> {
        match platform {
            Platform::Android => self.android.as_ref(),
            Platform::Ios => self.ios.as_ref(),
        }
    }

    pub fn into_parts(
        self,
    ) -> (
        Option<Result<GatewayResult, PushError>>,
        Option<Result<GatewayResult, PushError>>,
    ) {
        (self.android, self.ios)
    }
}

pub struct GatewayClient<T = HttpTransport> {
    transport: T,
    url: String,
}

impl GatewayClient<HttpTransport> {
    pub fn from_config(config: &Config) -> Result<Self, PushError> {
        let transport = HttpTransport::from_config(config)?;

        info!(url = %config.gateway_url, "Gateway client initialized");

        Ok(Self::new(transport, config.gateway_url.clone()))
    }
}

impl<T: Transport> GatewayClient<T> {
    pub fn new(transport: T, url: impl Into<String>) -> Self {
        Self {
            transport,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn push(&self, message: &mut Message) -> Result<PushOutcome, PushError> {
        let requests = message.finalize()?.clone();
        let secret = message.credentials().app_master_secret().to_string();

        let android = match &requests.android {
            Some(request) => Some((request, self.sign(request, &secret)?)),
            None => None,
        };
        let ios = match &requests.ios {
            Some(request) => Some((request, self.sign(request, &secret)?)),
            None => None,
        };

        // A failed platform send is reported in its own slot only.
        let (android, ios) = tokio::join!(
            self.send_platform(Platform::Android, android),
            self.send_platform(Platform::Ios, ios),
        );

        message.mark_pushed();

        Ok(PushOutcome { android, ios })
    }

    pub fn sign(
        &self,
        request: &GatewayRequest,
        app_master_secret: &str,
    ) -> Result<SignedRequest, PushError> {
        SignedRequest::new(&self.url, request, app_master_secret)
    }

    pub async fn send(
        &self,
        request: &GatewayRequest,
        signed: &SignedRequest,
    ) -> Result<GatewayResult, PushError> {
        let response = self.transport.send(signed).await?;

        info!(
            status = response.status,
            body = %response.body,
            "Gateway replied"
        );

        classify(response.status, &response.body, &request.to_value()?)
    }

    async fn send_platform(
        &self,
        platform: Platform,
        prepared: Option<(&GatewayRequest, SignedRequest)>,
    ) -> Option<Result<GatewayResult, PushError>> {
        let (request, signed) = prepared?;

        debug!(platform = %platform, "Pushing platform request");

        let result = self.send(request, &signed).await;
        if let Err(e) = &result {
            error!(platform = %platform, error = %e, "Push failed");
        }

        Some(result)
    }
}
