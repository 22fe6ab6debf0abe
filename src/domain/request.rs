use crate::domain::validation::ValidationError;
use crate::domain::value::{
    Alfaname, CampaignId, LifetimeHours, MessageText, Rate, RawPhoneNumber, SendTime,
};

/// Campaign parameters attached to every `SENDSMS` request.
///
/// The defaults match what SMS-Fly documents: immediate start, server-computed end,
/// a 4 hour lifetime, one message per minute and the `InfoCentr` sender.
#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    pub start_time: SendTime,
    pub end_time: SendTime,
    pub lifetime: LifetimeHours,
    pub rate: Rate,
    /// Campaign description shown in the SMS-Fly web interface. May be empty.
    pub description: String,
    pub source: Alfaname,
}

#[derive(Debug, Clone)]
pub struct SendSms {
    recipients: Vec<RawPhoneNumber>,
    body: MessageText,
    options: SendOptions,
}

impl SendSms {
    pub fn new(
        recipients: Vec<RawPhoneNumber>,
        body: MessageText,
        options: SendOptions,
    ) -> Result<Self, ValidationError> {
        if recipients.is_empty() {
            return Err(ValidationError::Empty {
                field: RawPhoneNumber::FIELD,
            });
        }
        if !options.start_time.is_auto()
            && !options.end_time.is_auto()
            && options.end_time.as_str() < options.start_time.as_str()
        {
            return Err(ValidationError::EndBeforeStart {
                start: options.start_time.as_str().to_owned(),
                end: options.end_time.as_str().to_owned(),
            });
        }
        Ok(Self {
            recipients,
            body,
            options,
        })
    }

    pub fn to_one(
        recipient: RawPhoneNumber,
        body: MessageText,
        options: SendOptions,
    ) -> Result<Self, ValidationError> {
        Self::new(vec![recipient], body, options)
    }

    pub fn recipients(&self) -> &[RawPhoneNumber] {
        &self.recipients
    }

    pub fn body(&self) -> &MessageText {
        &self.body
    }

    pub fn options(&self) -> &SendOptions {
        &self.options
    }
}

/// Delivery status lookup for one recipient of a campaign.
#[derive(Debug, Clone)]
pub struct MessageStatus {
    campaign_id: CampaignId,
    recipient: RawPhoneNumber,
}

impl MessageStatus {
    pub fn new(campaign_id: CampaignId, recipient: RawPhoneNumber) -> Self {
        Self {
            campaign_id,
            recipient,
        }
    }

    pub fn campaign_id(&self) -> &CampaignId {
        &self.campaign_id
    }

    pub fn recipient(&self) -> &RawPhoneNumber {
        &self.recipient
    }
}

/// Sub-commands of the `MANAGEALFANAME` operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlfanameCommand {
    /// Submit a new sender name for registration.
    Add(Alfaname),
    /// Query the registration state of a sender name.
    Check(Alfaname),
    /// List all sender names of the account.
    List,
}

impl AlfanameCommand {
    /// Value of the `command/@id` attribute.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Add(_) => "ADDALFANAME",
            Self::Check(_) => "CHECKALFANAME",
            Self::List => "GETALFANAMESLIST",
        }
    }

    pub fn alfaname(&self) -> Option<&Alfaname> {
        match self {
            Self::Add(name) | Self::Check(name) => Some(name),
            Self::List => None,
        }
    }
}
