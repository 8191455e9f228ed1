pub mod clients;
pub mod config;
pub mod errors;
pub mod models;
pub mod utils;

pub use clients::gateway::{GatewayClient, HttpTransport, PushOutcome, RawResponse, Transport};
pub use config::{Config, CredentialSource, Credentials};
pub use errors::PushError;
pub use models::{
    message::{Audience, BroadcastTargets, CastType, Content, Device, Message, Platform, Policy},
    notification::{AfterOpen, CustomPayload, Notification},
    request::{GatewayRequest, PlatformRequests, SignedRequest},
    response::GatewayResult,
    status::MessageState,
};
