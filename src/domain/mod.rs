//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{AlfanameCommand, MessageStatus, SendOptions, SendSms};
pub use response::{
    Attributes, BalanceResponse, CampaignDetailResponse, CampaignInfoResponse, RecipientStatus,
    SendSmsResponse, StateListResponse,
};
pub use validation::ValidationError;
pub use value::{
    Alfaname, CampaignId, Credentials, KnownStateCode, LifetimeHours, Login, MessageText,
    Password, PhoneNumber, Rate, RawPhoneNumber, SendTime, StateCode,
};
