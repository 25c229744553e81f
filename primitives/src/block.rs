use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// A Bitcoin block header plus the hashes of its transactions.
#[derive(
    Debug, Clone, Default, PartialEq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
#[serde(default)]
pub struct Block {
    pub hash: String,
    pub previous_block_hash: String,
    pub height: u64,
    pub confirmations: u64,
    pub merkle_root: String,
    pub time: String,
    pub nonce: u32,
    pub difficulty: f64,
    pub transaction_hashes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_block() {
        let json = r#"{
            "hash": "00000000000000009cc33fe219537756a68ee5433d593034b6dc200b34aa35fa",
            "previous_block_hash": "0000000000000000e1f4e2ce4b4c4b4a11c8d6f6bd15a0d1e8d1c1a6b8f3e2d1",
            "height": 308920,
            "confirmations": 10,
            "merkle_root": "ad3e6a6d8a6b3c6e2f4b2d4e",
            "time": "2014-06-28T03:49:13Z",
            "nonce": 1470863431,
            "difficulty": 13462580114.52535,
            "transaction_hashes": ["a", "b"]
        }"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(block.height, 308920);
        assert_eq!(block.nonce, 1470863431);
        assert_eq!(block.transaction_hashes, vec!["a", "b"]);
    }

    #[test]
    fn borsh_encoding_keeps_transaction_hashes() {
        let block = Block {
            hash: "00ff".to_string(),
            height: 42,
            difficulty: 1.5,
            transaction_hashes: vec!["a".to_string(), "b".to_string()],
            ..Default::default()
        };
        let restored: Block = borsh::from_slice(&borsh::to_vec(&block).unwrap()).unwrap();
        assert_eq!(restored, block);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let block: Block = serde_json::from_str(r#"{"hash": "abc"}"#).unwrap();
        assert_eq!(block.hash, "abc");
        assert!(block.transaction_hashes.is_empty());
    }
}
