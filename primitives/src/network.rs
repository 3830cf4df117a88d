use {
  serde::{Deserialize, Serialize},
  std::{fmt::Display, str::FromStr},
  thiserror::Error,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown network '{0}'. Expected mainnet, testnet, previewnet or local")]
pub struct UnknownNetwork(pub String);

/// The ledger deployment a client talks to.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
  Mainnet,
  Testnet,
  Previewnet,
  Local,
}

impl Display for NetworkId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(match self {
      NetworkId::Mainnet => "mainnet",
      NetworkId::Testnet => "testnet",
      NetworkId::Previewnet => "previewnet",
      NetworkId::Local => "local",
    })
  }
}

impl FromStr for NetworkId {
  type Err = UnknownNetwork;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "mainnet" => Ok(NetworkId::Mainnet),
      "testnet" => Ok(NetworkId::Testnet),
      "previewnet" => Ok(NetworkId::Previewnet),
      "local" | "localnet" => Ok(NetworkId::Local),
      _ => Err(UnknownNetwork(s.to_owned())),
    }
  }
}
