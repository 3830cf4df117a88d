use {
  crate::{
    b58::{public_key_from_b58, ToBase58String},
    AccountId,
    Hbar,
    Key,
    PrivateKey,
    PublicKey,
    TokenId,
    TopicId,
  },
  multihash::{Multihash, MultihashDigest},
  once_cell::sync::OnceCell,
  serde::{Deserialize, Serialize},
  std::{
    collections::{BTreeMap, BTreeSet},
    fmt::{Debug, Display},
  },
  thiserror::Error,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("Signature attached under '{0}' does not name a valid public key")]
  UnknownSigner(String),

  #[error("Signature by {0} does not match the transaction contents")]
  InvalidSignature(PublicKey),
}

/// Uniquely identifies a transaction: the paying account and the
/// instant (nanoseconds since unix epoch) from which it is valid.
#[derive(
  Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TransactionId {
  pub payer: AccountId,
  pub valid_start: u64,
}

impl TransactionId {
  pub fn new(payer: AccountId, valid_start: u64) -> Self {
    Self { payer, valid_start }
  }
}

impl Display for TransactionId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{}@{}.{:09}",
      self.payer,
      self.valid_start / 1_000_000_000,
      self.valid_start % 1_000_000_000
    )
  }
}

impl Debug for TransactionId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "txid({self})")
  }
}

/// Whether a token may be minted without bound or only up to a maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupplyType {
  Infinite,
  Finite(u64),
}

impl Default for SupplyType {
  fn default() -> Self {
    SupplyType::Infinite
  }
}

/// One leg of a token transfer. Negative amounts debit the account,
/// positive amounts credit it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTransfer {
  pub token: TokenId,
  pub account: AccountId,
  pub amount: i64,
}

/// One leg of a native currency transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HbarTransfer {
  pub account: AccountId,
  pub amount: Hbar,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionBody {
  TokenCreate {
    name: String,
    symbol: String,
    decimals: u32,
    initial_supply: u64,
    treasury: AccountId,
    admin_key: Option<Key>,
    supply_key: Option<Key>,
    supply_type: SupplyType,
  },
  TokenMint {
    token: TokenId,
    amount: u64,
  },
  TokenBurn {
    token: TokenId,
    amount: u64,
  },
  TokenAssociate {
    account: AccountId,
    tokens: Vec<TokenId>,
  },
  CryptoTransfer {
    hbar_transfers: Vec<HbarTransfer>,
    token_transfers: Vec<TokenTransfer>,
  },
  TopicCreate {
    memo: String,
    admin_key: Option<Key>,
    submit_key: Option<Key>,
  },
  TopicMessageSubmit {
    topic: TopicId,
    message: Vec<u8>,
  },
}

impl TransactionBody {
  pub fn kind(&self) -> &'static str {
    match self {
      TransactionBody::TokenCreate { .. } => "TokenCreate",
      TransactionBody::TokenMint { .. } => "TokenMint",
      TransactionBody::TokenBurn { .. } => "TokenBurn",
      TransactionBody::TokenAssociate { .. } => "TokenAssociate",
      TransactionBody::CryptoTransfer { .. } => "CryptoTransfer",
      TransactionBody::TopicCreate { .. } => "TopicCreate",
      TransactionBody::TopicMessageSubmit { .. } => "TopicMessageSubmit",
    }
  }
}

/// A frozen, signed ledger transaction.
///
/// Everything except the signatures is immutable once constructed, so
/// the signing hash is computed once and cached. Signatures are stored
/// under the base58 representation of the signing public key.
#[derive(Clone, Serialize, Deserialize)]
pub struct Transaction {
  id: TransactionId,
  body: TransactionBody,
  memo: String,
  max_fee: Hbar,
  signatures: BTreeMap<String, Vec<u8>>,

  #[serde(skip)]
  hash_cache: OnceCell<Multihash>,
}

impl Transaction {
  pub fn new(
    id: TransactionId,
    body: TransactionBody,
    memo: String,
    max_fee: Hbar,
  ) -> Self {
    Self {
      id,
      body,
      memo,
      max_fee,
      signatures: BTreeMap::new(),
      hash_cache: OnceCell::new(),
    }
  }

  pub fn id(&self) -> &TransactionId {
    &self.id
  }

  pub fn body(&self) -> &TransactionBody {
    &self.body
  }

  pub fn memo(&self) -> &str {
    &self.memo
  }

  pub fn max_fee(&self) -> Hbar {
    self.max_fee
  }

  /// Hash of the contents of the transaction without signatures.
  ///
  /// This is the message every attached signature signs.
  pub fn signing_hash(&self) -> &Multihash {
    self.hash_cache.get_or_init(|| {
      let payload = rmp_serde::to_vec(&(
        &self.id,
        &self.body,
        &self.memo,
        &self.max_fee,
      ))
      .expect("transaction fields are always serializable");
      multihash::Code::Sha3_256.digest(&payload)
    })
  }

  /// Attaches a signature by `key`. Signing twice with the same key
  /// replaces the earlier signature.
  pub fn sign(&mut self, key: &PrivateKey) {
    let signature = key.sign(&self.signing_hash().to_bytes());
    self.signatures.insert(key.public_key().to_b58(), signature);
  }

  /// Verifies every attached signature and returns the set of keys
  /// that signed this transaction.
  ///
  /// A single malformed or mismatched signature invalidates the whole
  /// set, the ledger never partially trusts a transaction.
  pub fn verified_signers(&self) -> Result<BTreeSet<PublicKey>, Error> {
    let message = self.signing_hash().to_bytes();
    let mut signers = BTreeSet::new();
    for (encoded, signature) in &self.signatures {
      let key = public_key_from_b58(encoded)
        .ok_or_else(|| Error::UnknownSigner(encoded.clone()))?;
      if !key.verify(&message, signature) {
        return Err(Error::InvalidSignature(key));
      }
      signers.insert(key);
    }
    Ok(signers)
  }
}

impl Debug for Transaction {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Transaction")
      .field("id", &self.id)
      .field("body", &self.body)
      .field("memo", &self.memo)
      .field("signers", &self.signatures.keys().collect::<Vec<_>>())
      .field("hash", &self.signing_hash().to_b58())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn mint_body() -> TransactionBody {
    TransactionBody::TokenMint {
      token: TokenId::new(0, 0, 1001),
      amount: 10,
    }
  }

  #[test]
  fn transaction_id_display() {
    let id =
      TransactionId::new(AccountId::new(0, 0, 2), 1_700_000_000_000_000_042);
    assert_eq!(id.to_string(), "0.0.2@1700000000.000000042");
  }

  #[test]
  fn signatures_are_verified() -> anyhow::Result<()> {
    let payer = PrivateKey::generate();
    let supply = PrivateKey::generate();
    let id = TransactionId::new(AccountId::new(0, 0, 2), 1);

    let mut tx = Transaction::new(id, mint_body(), String::new(), Hbar::new(1));
    tx.sign(&payer);
    tx.sign(&supply);

    let signers = tx.verified_signers()?;
    assert_eq!(
      signers,
      BTreeSet::from([payer.public_key(), supply.public_key()])
    );
    Ok(())
  }

  #[test]
  fn signature_over_other_contents_is_rejected() {
    let payer = PrivateKey::generate();
    let id = TransactionId::new(AccountId::new(0, 0, 2), 1);

    let mut original =
      Transaction::new(id, mint_body(), String::new(), Hbar::new(1));
    original.sign(&payer);

    let mut forged = Transaction::new(
      id,
      TransactionBody::TokenMint {
        token: TokenId::new(0, 0, 1001),
        amount: 10_000,
      },
      String::new(),
      Hbar::new(1),
    );
    forged.signatures = original.signatures.clone();

    assert_eq!(
      forged.verified_signers(),
      Err(Error::InvalidSignature(payer.public_key()))
    );
  }

  #[test]
  fn serialization_preserves_signing_hash() -> anyhow::Result<()> {
    let payer = PrivateKey::generate();
    let id = TransactionId::new(AccountId::new(0, 0, 2), 7);
    let mut tx = Transaction::new(id, mint_body(), "memo".into(), Hbar::new(1));
    tx.sign(&payer);

    let decoded: Transaction =
      rmp_serde::from_slice(&rmp_serde::to_vec(&tx)?)?;
    assert_eq!(decoded.signing_hash(), tx.signing_hash());
    assert!(decoded.verified_signers().is_ok());
    Ok(())
  }
}
