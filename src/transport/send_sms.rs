use super::xml::{TransportError, esc, parse_document, request_document};
use crate::domain::{
    CampaignId, LifetimeHours, MessageText, Rate, RawPhoneNumber, RecipientStatus, SendSms,
    SendSmsResponse, StateCode,
};

pub const SEND_SMS_OPERATION: &str = "SENDSMS";

pub fn encode_send_sms_xml(request: &SendSms) -> String {
    let options = request.options();

    let mut payload = format!(
        "<message start_time=\"{}\" end_time=\"{}\" {}=\"{}\" {}=\"{}\" desc=\"{}\" source=\"{}\" version=\"{}\">",
        esc(options.start_time.as_str()),
        esc(options.end_time.as_str()),
        LifetimeHours::FIELD,
        options.lifetime.value(),
        Rate::FIELD,
        options.rate.value(),
        esc(&options.description),
        esc(options.source.as_str()),
        env!("CARGO_PKG_VERSION"),
    );
    payload.push_str(&format!(
        "<{field}>{}</{field}>",
        esc(request.body().as_str()),
        field = MessageText::FIELD,
    ));
    for recipient in request.recipients() {
        payload.push_str(&format!(
            "<{field}>{}</{field}>",
            esc(recipient.raw()),
            field = RawPhoneNumber::FIELD,
        ));
    }
    payload.push_str("</message>");

    request_document(SEND_SMS_OPERATION, &payload)
}

pub fn decode_send_sms_xml_response(xml: &str) -> Result<SendSmsResponse, TransportError> {
    let root = parse_document(xml)?;
    let state = root
        .child("state")
        .ok_or(TransportError::MissingElement { name: "state" })?;
    let code = state
        .attribute("code")
        .ok_or(TransportError::MissingElement { name: "state code" })?;

    let recipients = root
        .children_named("to")
        .filter_map(|to| {
            to.attribute(RawPhoneNumber::FIELD)
                .map(|recipient| RecipientStatus {
                    recipient: recipient.to_owned(),
                    status: to.attribute("status").map(str::to_owned),
                })
        })
        .collect();

    Ok(SendSmsResponse {
        state: StateCode::new(code),
        campaign_id: state.attribute(CampaignId::FIELD).map(str::to_owned),
        date: state.attribute("date").map(str::to_owned),
        text: state.text().map(str::to_owned),
        recipients,
    })
}
