use std::collections::BTreeMap;

use super::xml::{TransportError, esc, parse_document, request_document};
use crate::domain::{CampaignDetailResponse, CampaignId, CampaignInfoResponse};

pub const GET_CAMPAIGN_INFO_OPERATION: &str = "GETCAMPAIGNINFO";
pub const GET_CAMPAIGN_DETAIL_OPERATION: &str = "GETCAMPAIGNDETAIL";

fn campaign_payload(campaign_id: &CampaignId) -> String {
    format!(
        "<message {}=\"{}\" />",
        CampaignId::FIELD,
        esc(campaign_id.as_str())
    )
}

pub fn encode_campaign_info_xml(campaign_id: &CampaignId) -> String {
    request_document(GET_CAMPAIGN_INFO_OPERATION, &campaign_payload(campaign_id))
}

pub fn encode_campaign_detail_xml(campaign_id: &CampaignId) -> String {
    request_document(
        GET_CAMPAIGN_DETAIL_OPERATION,
        &campaign_payload(campaign_id),
    )
}

pub fn decode_campaign_info_xml_response(
    xml: &str,
) -> Result<CampaignInfoResponse, TransportError> {
    let root = parse_document(xml)?;
    let campaign = root
        .child("campaign")
        .ok_or_else(|| root.rejection_or_missing("campaign"))?;

    let states = campaign
        .children_named("state")
        .filter_map(|state| {
            let status = state.attribute("status")?;
            let messages = state.attribute("messages").unwrap_or_default();
            Some((status.to_owned(), messages.to_owned()))
        })
        .collect::<BTreeMap<_, _>>();

    Ok(CampaignInfoResponse {
        campaign: campaign.attributes.clone(),
        states,
    })
}

pub fn decode_campaign_detail_xml_response(
    xml: &str,
) -> Result<CampaignDetailResponse, TransportError> {
    let root = parse_document(xml)?;
    let campaign = root
        .child("campaign")
        .ok_or_else(|| root.rejection_or_missing("campaign"))?;

    Ok(CampaignDetailResponse {
        campaign: campaign.attributes.clone(),
        messages: campaign
            .children_named("message")
            .map(|message| message.attributes.clone())
            .collect(),
    })
}
