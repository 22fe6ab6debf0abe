//! Typed Rust client for the SMS-Fly XML HTTP API.
//!
//! The crate is split into a domain layer of strong types, a transport layer that renders
//! request documents and decodes XML answers, and a small client layer that POSTs them with
//! basic authentication.
//!
//! ```rust,no_run
//! use smsfly::{Credentials, MessageText, RawPhoneNumber, SendOptions, SendSms, SmsFlyClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), smsfly::SmsFlyError> {
//!     let client = SmsFlyClient::new(Credentials::new("380501234567", "secret")?);
//!     let phone = RawPhoneNumber::new("+380 67 123 45 67")?;
//!     let msg = MessageText::new("hello")?;
//!     let request = SendSms::to_one(phone, msg, SendOptions::default())?;
//!     let response = client.send_sms(request).await?;
//!     println!("{:?}", response.status_message());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{SmsFlyClient, SmsFlyClientBuilder, SmsFlyError};
pub use domain::{
    Alfaname, AlfanameCommand, Attributes, BalanceResponse, CampaignDetailResponse, CampaignId,
    CampaignInfoResponse, Credentials, KnownStateCode, LifetimeHours, Login, MessageStatus,
    MessageText, Password, PhoneNumber, Rate, RawPhoneNumber, RecipientStatus, SendOptions,
    SendSms, SendSmsResponse, SendTime, StateCode, StateListResponse, ValidationError,
};
