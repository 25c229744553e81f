use serde::{Deserialize, Serialize};

/// An endpoint registered to receive POST requests for webhook events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Webhook {
    pub id: String,
    pub url: String,
}

/// The kinds of events a webhook can subscribe to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WebhookEventType {
    /// Fires when a new transaction touches an address, then again for each
    /// confirmation up to the requested count.
    #[serde(rename = "address-transaction")]
    AddressTransaction,
}

impl WebhookEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookEventType::AddressTransaction => "address-transaction",
        }
    }
}

/// A subscription that makes the associated webhook receive POST requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookEvent {
    pub id: String,
    pub webhook_id: String,
    pub event: String,
    pub block_chain: String,
    pub address: String,
    pub confirmations: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_uses_dashed_name() {
        let json = serde_json::to_string(&WebhookEventType::AddressTransaction).unwrap();
        assert_eq!(json, "\"address-transaction\"");
    }

    #[test]
    fn decodes_webhook_event() {
        let json = r#"{
            "id": "WE1",
            "webhook_id": "FFA21991F",
            "event": "address-transaction",
            "block_chain": "bitcoin",
            "address": "17x23dNjXJLzGMev6R63uyRhMWP1VHawKc",
            "confirmations": 1
        }"#;
        let event: WebhookEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.webhook_id, "FFA21991F");
        assert_eq!(event.event, WebhookEventType::AddressTransaction.as_str());
    }
}
