use super::xml::{TransportError, esc, parse_document, request_document};
use crate::domain::{CampaignId, MessageStatus, RawPhoneNumber, StateListResponse};

pub const GET_MESSAGE_STATUS_OPERATION: &str = "GETMESSAGESTATUS";

pub fn encode_message_status_xml(request: &MessageStatus) -> String {
    let payload = format!(
        "<message {}=\"{}\" {}=\"{}\" />",
        CampaignId::FIELD,
        esc(request.campaign_id().as_str()),
        RawPhoneNumber::FIELD,
        esc(request.recipient().raw()),
    );
    request_document(GET_MESSAGE_STATUS_OPERATION, &payload)
}

/// Collect the attributes of every top-level `<state>` element.
pub fn decode_state_list_xml_response(xml: &str) -> Result<StateListResponse, TransportError> {
    let root = parse_document(xml)?;
    Ok(StateListResponse {
        states: root
            .children_named("state")
            .map(|state| state.attributes.clone())
            .collect(),
    })
}
