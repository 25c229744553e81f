use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// A Bitcoin transaction input.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
#[serde(default)]
pub struct Input {
    pub transaction_hash: String,
    /// `None` for coinbase inputs.
    pub output_hash: Option<String>,
    pub output_index: u32,
    pub value: i64,
    pub addresses: Vec<String>,
    pub script_signature: String,
    pub sequence: u32,
    /// Only present on coinbase transactions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coinbase: Option<String>,
}

/// A Bitcoin transaction output.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
#[serde(default)]
pub struct Output {
    pub transaction_hash: String,
    pub output_index: u32,
    pub value: i64,
    pub addresses: Vec<String>,
    pub script: String,
    pub script_hex: String,
    pub script_type: String,
    pub required_signatures: i64,
    pub spent: bool,
    /// Only returned by the unspent outputs endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmations: Option<i64>,
}

/// A Bitcoin transaction with its inputs and outputs.
///
/// The block fields are `None` while the transaction is unconfirmed.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
#[serde(default)]
pub struct Transaction {
    pub hash: String,
    pub block_hash: Option<String>,
    pub block_height: Option<u64>,
    pub block_time: Option<String>,
    pub inputs: Vec<Input>,
    pub outputs: Vec<Output>,
    pub amount: i64,
    pub fees: i64,
    pub confirmations: i64,
}

impl Transaction {
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].coinbase.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COINBASE_TX: &str = r#"{
        "hash": "0f40015ddbb8a05e26bbacfb70b6074daa1990b813ba9bc70b7ac5b0b6ee2c45",
        "block_hash": "00000000000000009cc33fe219537756a68ee5433d593034b6dc200b34aa35fa",
        "block_height": 308920,
        "block_time": "2014-06-28T03:49:13Z",
        "inputs": [{
            "transaction_hash": "0f40015ddbb8a05e26bbacfb70b6074daa1990b813ba9bc70b7ac5b0b6ee2c45",
            "output_hash": null,
            "output_index": 0,
            "value": 2500000000,
            "addresses": [],
            "script_signature": "03b8b204",
            "sequence": 4294967295,
            "coinbase": "03b8b204"
        }],
        "outputs": [{
            "transaction_hash": "0f40015ddbb8a05e26bbacfb70b6074daa1990b813ba9bc70b7ac5b0b6ee2c45",
            "output_index": 0,
            "value": 2500000000,
            "addresses": ["1BQLNJtMDKmMZ4PyqVFfRuBNvoGhjigBKF"],
            "script": "OP_DUP OP_HASH160 7213 OP_EQUALVERIFY OP_CHECKSIG",
            "script_hex": "76a914",
            "script_type": "pubkeyhash",
            "required_signatures": 1,
            "spent": false
        }],
        "amount": 2500000000,
        "fees": 0,
        "confirmations": 12
    }"#;

    #[test]
    fn decodes_coinbase_transaction() {
        let tx: Transaction = serde_json::from_str(COINBASE_TX).unwrap();
        assert!(tx.is_coinbase());
        assert_eq!(tx.block_height, Some(308920));
        assert_eq!(tx.inputs[0].sequence, u32::MAX);
        assert_eq!(tx.inputs[0].output_hash, None);
        assert_eq!(tx.outputs[0].script_type, "pubkeyhash");
        assert_eq!(tx.outputs[0].confirmations, None);
    }

    #[test]
    fn borsh_encoding_preserves_decoded_transaction() {
        let tx: Transaction = serde_json::from_str(COINBASE_TX).unwrap();
        let bytes = borsh::to_vec(&tx).unwrap();
        let restored: Transaction = borsh::from_slice(&bytes).unwrap();
        assert_eq!(restored, tx);
        assert!(restored.is_coinbase());
    }

    #[test]
    fn decodes_unconfirmed_transaction() {
        let tx: Transaction =
            serde_json::from_str(r#"{"hash": "ab", "block_hash": null, "block_height": null}"#)
                .unwrap();
        assert_eq!(tx.block_hash, None);
        assert!(!tx.is_coinbase());
    }
}
