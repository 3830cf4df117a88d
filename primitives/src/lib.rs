mod b58;
mod hbar;
mod id;
mod key;
mod network;
mod query;
mod receipt;
mod transaction;

pub use {
  b58::{public_key_from_b58, ToBase58String},
  hbar::Hbar,
  id::{AccountId, EntityId, Error as IdError, TokenId, TopicId},
  key::{Error as KeyError, Key, KeyList, PrivateKey, PublicKey},
  multihash::Multihash,
  network::{NetworkId, UnknownNetwork},
  query::{
    AccountBalance,
    AccountInfo,
    TokenInfo,
    TokenRelationship,
    TopicInfo,
    TopicMessage,
  },
  receipt::{Receipt, Status, TransactionResponse},
  transaction::{
    Error as TransactionError,
    HbarTransfer,
    SupplyType,
    TokenTransfer,
    Transaction,
    TransactionBody,
    TransactionId,
  },
};
