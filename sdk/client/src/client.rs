use {
  crate::{ClientError, QueryError, TransactionBuilder},
  dashmap::DashMap,
  std::{
    collections::BTreeSet,
    future::Future,
    sync::{
      atomic::{AtomicU64, Ordering},
      Arc,
    },
    time::{Duration, SystemTime, UNIX_EPOCH},
  },
  tokenbench_ledger::{Error as LedgerError, Ledger},
  tokenbench_primitives::{
    AccountBalance,
    AccountId,
    AccountInfo,
    NetworkId,
    PrivateKey,
    PublicKey,
    Receipt,
    Status,
    TokenId,
    TokenInfo,
    TopicId,
    TopicInfo,
    TopicMessage,
    TransactionId,
  },
  tokio::sync::{Mutex, OwnedMutexGuard},
  tracing::debug,
};

/// How often a pending receipt is polled.
const RECEIPT_POLL_INTERVAL: Duration = Duration::from_millis(50);

struct Operator {
  account: AccountId,
  key: PrivateKey,
}

/// Handle to a ledger used to submit transactions and run queries.
///
/// Clones share the per-signer submission locks and the transaction id
/// clock, so two clones never have transactions from the same signer in
/// flight at once and never reuse a transaction id.
#[derive(Clone)]
pub struct Client {
  ledger: Arc<dyn Ledger>,
  operator: Option<Arc<Operator>>,
  timeout: Option<Duration>,
  locks: Arc<DashMap<PublicKey, Arc<Mutex<()>>>>,
  last_valid_start: Arc<AtomicU64>,
}

impl Client {
  pub fn new(ledger: Arc<dyn Ledger>) -> Self {
    Self {
      ledger,
      operator: None,
      timeout: None,
      locks: Arc::new(DashMap::new()),
      last_valid_start: Arc::new(AtomicU64::new(0)),
    }
  }

  /// Sets the account that pays for and co-signs every submission.
  pub fn with_operator(self, account: AccountId, key: PrivateKey) -> Self {
    Self {
      operator: Some(Arc::new(Operator { account, key })),
      ..self
    }
  }

  /// Bounds every submission (including the receipt wait) and every
  /// query by `timeout`.
  pub fn with_timeout(self, timeout: Duration) -> Self {
    Self {
      timeout: Some(timeout),
      ..self
    }
  }

  pub fn network(&self) -> NetworkId {
    self.ledger.network()
  }

  pub fn operator(&self) -> Option<AccountId> {
    self.operator.as_ref().map(|op| op.account)
  }

  pub fn timeout(&self) -> Option<Duration> {
    self.timeout
  }

  /// Signs the transaction as the operator, submits it and waits until
  /// its receipt is final.
  ///
  /// A failed receipt is not an error at this level, it is returned to
  /// the caller to interpret.
  pub async fn execute(
    &self,
    builder: TransactionBuilder,
  ) -> Result<Receipt, ClientError> {
    let operator = self.operator.as_ref().ok_or(ClientError::MissingOperator)?;
    let builder = builder.sign_with(&operator.key);
    let work = self.submit_and_wait(operator.account, builder);

    match self.timeout {
      Some(timeout) => tokio::time::timeout(timeout, work)
        .await
        .map_err(|_| ClientError::Timeout(timeout))?,
      None => work.await,
    }
  }

  async fn submit_and_wait(
    &self,
    payer: AccountId,
    builder: TransactionBuilder,
  ) -> Result<Receipt, ClientError> {
    let _guards = self.lock_signers(builder.signers()).await;

    let tx = builder.freeze(payer, self.next_valid_start());
    debug!("submitting {} ({})", tx.id(), tx.body().kind());

    let response = self.ledger.submit(tx).await?;
    self.wait_for_receipt(&response.transaction_id).await
  }

  async fn wait_for_receipt(
    &self,
    id: &TransactionId,
  ) -> Result<Receipt, ClientError> {
    loop {
      let receipt = self.ledger.receipt(id).await?;
      if receipt.status != Status::Unknown {
        return Ok(receipt);
      }
      tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
    }
  }

  /// Acquires the submission lock of every signer.
  ///
  /// Locks are always taken in key order so two submissions sharing
  /// signers cannot deadlock.
  async fn lock_signers(
    &self,
    signers: BTreeSet<PublicKey>,
  ) -> Vec<OwnedMutexGuard<()>> {
    let mut guards = Vec::with_capacity(signers.len());
    for key in signers {
      let lock = self.locks.entry(key).or_default().clone();
      guards.push(lock.lock_owned().await);
    }
    guards
  }

  /// Nanoseconds since unix epoch, strictly greater than any value
  /// handed out before by this client or its clones.
  fn next_valid_start(&self) -> u64 {
    let now = SystemTime::now()
      .duration_since(UNIX_EPOCH)
      .map(|d| d.as_nanos() as u64)
      .unwrap_or_default();

    let next = |last: u64| now.max(last + 1);
    match self.last_valid_start.fetch_update(
      Ordering::SeqCst,
      Ordering::SeqCst,
      |last| Some(next(last)),
    ) {
      Ok(last) | Err(last) => next(last),
    }
  }

  async fn query<T>(
    &self,
    query: impl Future<Output = Result<T, LedgerError>>,
  ) -> Result<T, QueryError> {
    match self.timeout {
      Some(timeout) => tokio::time::timeout(timeout, query)
        .await
        .map_err(|_| QueryError::Timeout(timeout))?
        .map_err(QueryError::from),
      None => query.await.map_err(QueryError::from),
    }
  }

  pub async fn account_balance(
    &self,
    account: &AccountId,
  ) -> Result<AccountBalance, QueryError> {
    self.query(self.ledger.account_balance(account)).await
  }

  pub async fn account_info(
    &self,
    account: &AccountId,
  ) -> Result<AccountInfo, QueryError> {
    self.query(self.ledger.account_info(account)).await
  }

  pub async fn token_info(
    &self,
    token: &TokenId,
  ) -> Result<TokenInfo, QueryError> {
    self.query(self.ledger.token_info(token)).await
  }

  pub async fn topic_info(
    &self,
    topic: &TopicId,
  ) -> Result<TopicInfo, QueryError> {
    self.query(self.ledger.topic_info(topic)).await
  }

  pub async fn topic_messages(
    &self,
    topic: &TopicId,
  ) -> Result<Vec<TopicMessage>, QueryError> {
    self.query(self.ledger.topic_messages(topic)).await
  }
}
