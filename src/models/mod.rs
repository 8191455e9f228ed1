pub mod message;
pub mod notification;
pub mod payload;
pub mod request;
pub mod response;
pub mod status;
pub mod validation;
