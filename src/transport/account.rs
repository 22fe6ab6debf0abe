use super::xml::{TransportError, parse_document, request_document};
use crate::domain::BalanceResponse;

pub const GET_BALANCE_OPERATION: &str = "GETBALANCE";

pub fn encode_get_balance_xml() -> String {
    request_document(GET_BALANCE_OPERATION, "")
}

pub fn decode_balance_xml_response(xml: &str) -> Result<BalanceResponse, TransportError> {
    let root = parse_document(xml)?;
    let balance = root
        .child("balance")
        .ok_or_else(|| root.rejection_or_missing("balance"))?;

    Ok(BalanceResponse {
        balance: balance.text.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_has_no_payload() {
        assert!(
            encode_get_balance_xml()
                .ends_with("<request><operation>GETBALANCE</operation></request>")
        );
    }

    #[test]
    fn decode_preserves_balance_text() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<message><balance>10.50</balance></message>"#;
        let parsed = decode_balance_xml_response(xml).unwrap();
        assert_eq!(parsed.balance, "10.50");
    }

    #[test]
    fn decode_trims_whitespace_around_balance() {
        let xml = "<message>\n  <balance>  10.50\n</balance>\n</message>";
        let parsed = decode_balance_xml_response(xml).unwrap();
        assert_eq!(parsed.balance, "10.50");
    }

    #[test]
    fn decode_reports_state_code_when_balance_missing() {
        let xml = r#"<message><state code="XMLERROR"/></message>"#;
        let err = decode_balance_xml_response(xml).unwrap_err();
        assert!(matches!(err, TransportError::Rejected { ref code, .. } if code == "XMLERROR"));
    }
}
