//! Transport layer: XML request encoding and response decoding.

mod account;
mod alfaname;
mod campaign;
mod message_status;
mod send_sms;
mod xml;

pub use account::{GET_BALANCE_OPERATION, decode_balance_xml_response, encode_get_balance_xml};
pub use alfaname::{MANAGE_ALFANAME_OPERATION, encode_alfaname_xml};
pub use campaign::{
    GET_CAMPAIGN_DETAIL_OPERATION, GET_CAMPAIGN_INFO_OPERATION,
    decode_campaign_detail_xml_response, decode_campaign_info_xml_response,
    encode_campaign_detail_xml, encode_campaign_info_xml,
};
pub use message_status::{
    GET_MESSAGE_STATUS_OPERATION, decode_state_list_xml_response, encode_message_status_xml,
};
pub use send_sms::{SEND_SMS_OPERATION, decode_send_sms_xml_response, encode_send_sms_xml};
pub use xml::TransportError;
