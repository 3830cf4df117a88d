use {
  crate::{AccountId, Hbar, Key, SupplyType, TokenId, TopicId},
  serde::{Deserialize, Serialize},
  std::collections::BTreeMap,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
  pub account: AccountId,
  pub hbars: Hbar,
  pub tokens: BTreeMap<TokenId, u64>,
}

/// The relationship between an account and a token it is associated with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRelationship {
  pub token: TokenId,
  pub symbol: String,
  pub balance: u64,
  pub decimals: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
  pub account: AccountId,
  pub key: Key,
  pub balance: Hbar,
  pub token_relationships: BTreeMap<TokenId, TokenRelationship>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
  pub token: TokenId,
  pub name: String,
  pub symbol: String,
  pub decimals: u32,
  pub total_supply: u64,
  pub treasury: AccountId,
  pub admin_key: Option<Key>,
  pub supply_key: Option<Key>,
  pub supply_type: SupplyType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicInfo {
  pub topic: TopicId,
  pub memo: String,
  pub admin_key: Option<Key>,
  pub submit_key: Option<Key>,
  pub sequence_number: u64,
}

/// A message as ordered by consensus on a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicMessage {
  pub topic: TopicId,
  pub sequence_number: u64,
  pub contents: Vec<u8>,
  pub consensus_timestamp: u64,
}

impl TopicMessage {
  pub fn contents_lossy(&self) -> String {
    String::from_utf8_lossy(&self.contents).into_owned()
  }
}
