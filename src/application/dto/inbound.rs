//! Inbound Frame DTO
//!
//! The JSON record a client sends for each chat line.

use serde::Deserialize;

/// Inbound chat frame.
///
/// Every field is optional. Older clients send the alternate display name as
/// `smt` and the display name as `client_name`; newer ones use camelCase.
/// Unknown fields are ignored.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct InboundFrame {
    #[serde(alias = "clientName")]
    pub client_name: Option<String>,

    #[serde(rename = "smt", alias = "displayNameAlt")]
    pub display_name_alt: Option<String>,

    pub text: Option<String>,

    pub room: Option<String>,

    pub timestamp: Option<String>,
}

impl InboundFrame {
    /// Decode a raw payload.
    pub fn from_slice(raw: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(raw)
    }
}
