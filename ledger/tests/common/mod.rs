use {
  std::sync::atomic::{AtomicU64, Ordering},
  tokenbench_ledger::{InMemoryLedger, Ledger},
  tokenbench_primitives::{
    AccountId,
    Hbar,
    Key,
    PrivateKey,
    Receipt,
    SupplyType,
    TokenId,
    Transaction,
    TransactionBody,
    TransactionId,
  },
};

// valid start 0 is never handed out, tests may use it for hand built
// transactions
static VALID_START: AtomicU64 = AtomicU64::new(1);

pub struct Wallet {
  pub id: AccountId,
  pub key: PrivateKey,
}

/// Creates a genesis account funded with `hbars`.
pub fn wallet(ledger: &InMemoryLedger, hbars: i64) -> Wallet {
  let key = PrivateKey::generate();
  let id = ledger.create_account(&key, Hbar::new(hbars));
  Wallet { id, key }
}

/// Builds a transaction paid by `payer` and signed by the payer and
/// every key in `signers`.
pub fn signed(
  payer: &Wallet,
  body: TransactionBody,
  signers: &[&PrivateKey],
) -> Transaction {
  let id = TransactionId::new(
    payer.id,
    VALID_START.fetch_add(1, Ordering::SeqCst),
  );
  let mut tx = Transaction::new(id, body, String::new(), Hbar::new(2));
  tx.sign(&payer.key);
  for key in signers {
    tx.sign(key);
  }
  tx
}

/// Submits a transaction and returns its receipt.
pub async fn submit(
  ledger: &InMemoryLedger,
  tx: Transaction,
) -> anyhow::Result<Receipt> {
  let response = ledger.submit(tx).await?;
  Ok(ledger.receipt(&response.transaction_id).await?)
}

/// Creates an HTT token with `treasury` as treasury and supply key and
/// `admin` as admin key.
pub async fn create_htt(
  ledger: &InMemoryLedger,
  treasury: &Wallet,
  admin: &Wallet,
  initial_supply: u64,
  supply_type: SupplyType,
) -> anyhow::Result<TokenId> {
  let receipt = submit(
    ledger,
    signed(
      treasury,
      TransactionBody::TokenCreate {
        name: "Test Token".into(),
        symbol: "HTT".into(),
        decimals: 2,
        initial_supply,
        treasury: treasury.id,
        admin_key: Some(Key::from(&admin.key)),
        supply_key: Some(Key::from(&treasury.key)),
        supply_type,
      },
      &[&admin.key],
    ),
  )
  .await?;
  receipt
    .token_id
    .ok_or_else(|| anyhow::anyhow!("token not created: {}", receipt.status))
}

pub async fn associate(
  ledger: &InMemoryLedger,
  wallet: &Wallet,
  token: TokenId,
) -> anyhow::Result<Receipt> {
  submit(
    ledger,
    signed(
      wallet,
      TransactionBody::TokenAssociate {
        account: wallet.id,
        tokens: vec![token],
      },
      &[],
    ),
  )
  .await
}
