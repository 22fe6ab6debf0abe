use std::collections::BTreeMap;

use crate::domain::value::StateCode;

/// Attribute name → value of one XML element, as returned by SMS-Fly.
pub type Attributes = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendSmsResponse {
    pub state: StateCode,
    pub campaign_id: Option<String>,
    pub date: Option<String>,
    /// Free-form text of the `<state>` element.
    pub text: Option<String>,
    pub recipients: Vec<RecipientStatus>,
}

impl SendSmsResponse {
    /// Human-readable translation of the state code, falling back to the server text.
    pub fn status_message(&self) -> Option<&str> {
        self.state.description().or(self.text.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientStatus {
    pub recipient: String,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceResponse {
    /// Balance text as sent by the server (e.g. `"12.50"`), with surrounding whitespace trimmed.
    pub balance: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignInfoResponse {
    pub campaign: Attributes,
    /// Delivery status → number of messages in that status.
    pub states: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignDetailResponse {
    pub campaign: Attributes,
    pub messages: Vec<Attributes>,
}

/// Response made of top-level `<state>` elements (message status and alfaname commands).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StateListResponse {
    pub states: Vec<Attributes>,
}

impl StateListResponse {
    /// The only entry when the server answered with exactly one `<state>`.
    pub fn single(&self) -> Option<&Attributes> {
        match self.states.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}
