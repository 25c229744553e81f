use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationType {
    #[serde(rename = "new-transaction")]
    NewTransaction,
    #[serde(rename = "new-block")]
    NewBlock,
}

/// A notification subscription as returned by the notifications endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Notification {
    pub id: String,
    pub state: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub address: String,
    pub block_chain: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_notification_with_type_field() {
        let json = r#"{
            "id": "N1",
            "state": "enabled",
            "url": "https://localhost.com",
            "type": "new-transaction",
            "block_chain": "testnet3"
        }"#;
        let notification: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(notification.kind, "new-transaction");
        assert_eq!(notification.address, "");
        assert_eq!(
            serde_json::to_value(NotificationType::NewBlock).unwrap(),
            serde_json::json!("new-block")
        );
    }
}
