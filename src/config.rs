use std::collections::HashMap;

use anyhow::{Error, Result, anyhow};
use dotenvy::dotenv;
use serde::Deserialize;

use crate::errors::PushError;

pub const APP_KEY_NAME: &str = "UMENG_APP_KEY";
pub const APP_MASTER_SECRET_NAME: &str = "UMENG_APP_MASTER_SECRET";
pub const DEFAULT_GATEWAY_URL: &str = "http://msg.umeng.com/api/send";

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    pub app_key: Option<String>,
    pub app_master_secret: Option<String>,

    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,

    #[serde(default)]
    pub production_mode: bool,

    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

fn default_gateway_url() -> String {
    DEFAULT_GATEWAY_URL.to_string()
}

fn default_request_timeout_seconds() -> u64 {
    10
}

impl Config {
    pub fn load() -> Result<Self, Error> {
        dotenv().ok();

        let config = envy::prefixed("UMENG_")
            .from_env::<Self>()
            .map_err(|e| anyhow!("Invalid or missing environmental variable: {}", e))?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_key: None,
            app_master_secret: None,
            gateway_url: default_gateway_url(),
            production_mode: false,
            request_timeout_seconds: default_request_timeout_seconds(),
        }
    }
}

pub trait CredentialSource {
    fn lookup(&self, key_name: &str) -> Option<String>;
}

impl CredentialSource for Config {
    fn lookup(&self, key_name: &str) -> Option<String> {
        match key_name {
            APP_KEY_NAME => self.app_key.clone(),
            APP_MASTER_SECRET_NAME => self.app_master_secret.clone(),
            _ => None,
        }
    }
}

impl CredentialSource for HashMap<String, String> {
    fn lookup(&self, key_name: &str) -> Option<String> {
        self.get(key_name).cloned()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    app_key: String,
    app_master_secret: String,
}

impl Credentials {
    pub fn new(
        app_key: impl Into<String>,
        app_master_secret: impl Into<String>,
    ) -> Result<Self, PushError> {
        let app_key: String = app_key.into();
        let app_master_secret: String = app_master_secret.into();

        Self::resolve(Some(app_key.as_str()), Some(app_master_secret.as_str()), None)
    }

    pub fn resolve(
        app_key: Option<&str>,
        app_master_secret: Option<&str>,
        source: Option<&dyn CredentialSource>,
    ) -> Result<Self, PushError> {
        let app_key = resolve_one(app_key, APP_KEY_NAME, source)?;
        let app_master_secret = resolve_one(app_master_secret, APP_MASTER_SECRET_NAME, source)?;

        Ok(Self {
            app_key,
            app_master_secret,
        })
    }

    pub fn app_key(&self) -> &str {
        &self.app_key
    }

    pub fn app_master_secret(&self) -> &str {
        &self.app_master_secret
    }
}

fn resolve_one(
    explicit: Option<&str>,
    key_name: &str,
    source: Option<&dyn CredentialSource>,
) -> Result<String, PushError> {
    explicit
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| source.and_then(|s| s.lookup(key_name)))
        .filter(|v| !v.is_empty())
        .ok_or_else(|| PushError::Configuration(format!("{} is not set", key_name)))
}
