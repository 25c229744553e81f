use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Satoshi totals for an address.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
#[serde(default)]
pub struct Balance {
    pub balance: i64,
    pub received: i64,
    pub sent: i64,
}

/// Basic balance details of a Bitcoin address.
///
/// `total` includes unconfirmed transactions, `confirmed` does not.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
#[serde(default)]
pub struct Address {
    pub address: String,
    pub total: Balance,
    pub confirmed: Balance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_address_array() {
        let json = r#"[{
            "address": "msk1uz21sUAXdmgqUiWvkRBLNfL1SXatyj",
            "total": {"balance": 100, "received": 300, "sent": 200},
            "confirmed": {"balance": 90, "received": 290, "sent": 200}
        }]"#;
        let addresses: Vec<Address> = serde_json::from_str(json).unwrap();
        assert_eq!(addresses.len(), 1);
        let total = &addresses[0].total;
        assert_eq!(total.received - total.sent, total.balance);
        assert_eq!(addresses[0].confirmed.balance, 90);
    }
}
