use {
  std::collections::BTreeSet,
  tokenbench_primitives::{
    AccountId,
    Hbar,
    PrivateKey,
    PublicKey,
    Transaction,
    TransactionBody,
    TransactionId,
  },
};

/// Fee ceiling used when none is set explicitly.
const DEFAULT_MAX_FEE: i64 = 2;

/// Accumulates everything a transaction needs before it is frozen.
///
/// Signers are collected up front and applied in one step when the
/// transaction is frozen, so a multi-signature transaction is never
/// observable in a partially signed state.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
  body: TransactionBody,
  memo: String,
  max_fee: Hbar,
  signers: Vec<PrivateKey>,
}

impl TransactionBuilder {
  pub fn new(body: TransactionBody) -> Self {
    Self {
      body,
      memo: String::new(),
      max_fee: Hbar::new(DEFAULT_MAX_FEE),
      signers: Vec::new(),
    }
  }

  pub fn memo(mut self, memo: impl Into<String>) -> Self {
    self.memo = memo.into();
    self
  }

  pub fn max_fee(mut self, max_fee: Hbar) -> Self {
    self.max_fee = max_fee;
    self
  }

  /// Adds a required signer. Adding the same key twice has no effect.
  pub fn sign_with(mut self, key: &PrivateKey) -> Self {
    if !self.signers.contains(key) {
      self.signers.push(key.clone());
    }
    self
  }

  pub fn body(&self) -> &TransactionBody {
    &self.body
  }

  /// Public keys of every collected signer, in sorted order.
  pub fn signers(&self) -> BTreeSet<PublicKey> {
    self.signers.iter().map(PrivateKey::public_key).collect()
  }

  /// Produces the immutable transaction signed by every collected key.
  pub fn freeze(self, payer: AccountId, valid_start: u64) -> Transaction {
    let mut tx = Transaction::new(
      TransactionId::new(payer, valid_start),
      self.body,
      self.memo,
      self.max_fee,
    );
    for key in &self.signers {
      tx.sign(key);
    }
    tx
  }
}

#[cfg(test)]
mod tests {
  use {super::*, tokenbench_primitives::TokenId};

  #[test]
  fn freeze_signs_with_every_signer_once() -> anyhow::Result<()> {
    let admin = PrivateKey::generate();
    let treasury = PrivateKey::generate();

    let builder = TransactionBuilder::new(TransactionBody::TokenMint {
      token: TokenId::new(0, 0, 1001),
      amount: 1,
    })
    .memo("mint")
    .sign_with(&admin)
    .sign_with(&treasury)
    .sign_with(&admin);

    assert_eq!(builder.signers().len(), 2);

    let tx = builder.freeze(AccountId::new(0, 0, 2), 42);
    assert_eq!(tx.memo(), "mint");
    assert_eq!(tx.max_fee(), Hbar::new(DEFAULT_MAX_FEE));
    assert_eq!(tx.id().valid_start, 42);
    assert_eq!(
      tx.verified_signers()?,
      BTreeSet::from([admin.public_key(), treasury.public_key()])
    );
    Ok(())
  }
}
