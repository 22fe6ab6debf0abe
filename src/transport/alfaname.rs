use super::xml::{esc, request_document};
use crate::domain::{Alfaname, AlfanameCommand};

pub const MANAGE_ALFANAME_OPERATION: &str = "MANAGEALFANAME";

pub fn encode_alfaname_xml(command: &AlfanameCommand) -> String {
    let payload = match command.alfaname() {
        Some(name) => format!(
            "<command id=\"{}\" {}=\"{}\" />",
            command.id(),
            Alfaname::FIELD,
            esc(name.as_str())
        ),
        None => format!("<command id=\"{}\" />", command.id()),
    };
    request_document(MANAGE_ALFANAME_OPERATION, &payload)
}
