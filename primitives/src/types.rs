use borsh::{BorshDeserialize, BorshSerialize};
use std::fmt::Display;

/// The Bitcoin network a client talks to. The display form is the path
/// segment and `block_chain` value used by the API.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    BorshSerialize,
    BorshDeserialize,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum Network {
    #[serde(rename = "bitcoin")]
    Mainnet,
    #[serde(rename = "testnet3")]
    Testnet3,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "bitcoin",
            Network::Testnet3 => "testnet3",
        }
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for Network {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "bitcoin" | "mainnet" => Ok(Network::Mainnet),
            "testnet3" | "testnet" => Ok(Network::Testnet3),
            _ => Err(format!("Invalid network: {}", value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_api_and_short_names() {
        assert_eq!(
            Network::try_from("bitcoin".to_string()),
            Ok(Network::Mainnet)
        );
        assert_eq!(
            Network::try_from("testnet".to_string()),
            Ok(Network::Testnet3)
        );
        assert!(Network::try_from("regtest".to_string()).is_err());
    }

    #[test]
    fn serializes_as_block_chain_name() {
        let json = serde_json::to_string(&Network::Testnet3).unwrap();
        assert_eq!(json, "\"testnet3\"");
        assert_eq!(Network::Mainnet.to_string(), "bitcoin");
    }
}
