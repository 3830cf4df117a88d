use {
  crate::{
    execution::{self, Context},
    state::{AccountRecord, InMemoryState, State, StateDiff},
    Config,
    Error,
    Ledger,
  },
  async_trait::async_trait,
  parking_lot::Mutex,
  std::{
    collections::HashMap,
    time::{SystemTime, UNIX_EPOCH},
  },
  tokenbench_primitives::{
    AccountBalance,
    AccountId,
    AccountInfo,
    Hbar,
    Key,
    NetworkId,
    Receipt,
    Status,
    TokenId,
    TokenInfo,
    TokenRelationship,
    TopicId,
    TopicInfo,
    TopicMessage,
    Transaction,
    TransactionBody,
    TransactionId,
    TransactionResponse,
  },
  tracing::{debug, info, warn},
};

struct Inner {
  state: InMemoryState,
  receipts: HashMap<TransactionId, Receipt>,
  next_entity: u64,
  clock: u64,
}

/// A single-node ledger living in process memory.
///
/// Every accepted transaction reaches consensus immediately, so its
/// receipt is final as soon as `submit` returns. Intended for local
/// runs, CI and tests where a public network is not available.
pub struct InMemoryLedger {
  config: Config,
  inner: Mutex<Inner>,
}

impl Default for InMemoryLedger {
  fn default() -> Self {
    Self::new(Config::default())
  }
}

impl InMemoryLedger {
  pub fn new(config: Config) -> Self {
    let clock = SystemTime::now()
      .duration_since(UNIX_EPOCH)
      .map(|d| d.as_nanos() as u64)
      .unwrap_or_default();

    Self {
      inner: Mutex::new(Inner {
        state: InMemoryState::default(),
        receipts: HashMap::new(),
        next_entity: config.first_entity_num,
        clock,
      }),
      config,
    }
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  /// Creates a genesis account with the next free entity number.
  pub fn create_account(
    &self,
    key: impl Into<Key>,
    balance: Hbar,
  ) -> AccountId {
    let mut inner = self.inner.lock();
    let id = AccountId::new(0, 0, inner.next_entity);
    inner.next_entity += 1;
    Self::put_account(&mut inner, id, key.into(), balance);
    id
  }

  /// Creates a genesis account under a fixed id, for example one taken
  /// from an accounts configuration file. Replaces any existing account
  /// with the same id.
  pub fn insert_account(
    &self,
    id: AccountId,
    key: impl Into<Key>,
    balance: Hbar,
  ) {
    let mut inner = self.inner.lock();
    if id.num() >= inner.next_entity {
      inner.next_entity = id.num() + 1;
    }
    Self::put_account(&mut inner, id, key.into(), balance);
  }

  fn put_account(inner: &mut Inner, id: AccountId, key: Key, balance: Hbar) {
    let mut diff = StateDiff::default();
    diff.set_account(id, AccountRecord::new(key, balance));
    inner.state.apply(diff);
    debug!("genesis account {id} funded with {balance}");
  }

  fn handle(&self, tx: Transaction) -> Result<TransactionResponse, Error> {
    let mut guard = self.inner.lock();
    let inner = &mut *guard;
    let id = *tx.id();

    if inner.receipts.contains_key(&id) {
      warn!("transaction {id} rejected: duplicate");
      return Err(Error::Precheck(Status::DuplicateTransaction));
    }

    let signers = execution::precheck(&tx, &inner.state, &self.config)
      .map_err(|status| {
        warn!("transaction {id} failed precheck: {status}");
        Error::Precheck(status)
      })?;

    // the payer is charged once the transaction is accepted,
    // whatever the outcome of its body.
    let fee = execution::charge_fee(&tx, &inner.state, &self.config);
    inner.state.apply(fee);

    inner.clock += 1;
    let ctx = Context {
      entity_num: inner.next_entity,
      consensus_timestamp: inner.clock,
    };

    let receipt = match execution::execute(
      &tx,
      &signers,
      &inner.state,
      &self.config,
      ctx,
    ) {
      Ok(outcome) => {
        if matches!(
          tx.body(),
          TransactionBody::TokenCreate { .. }
            | TransactionBody::TopicCreate { .. }
        ) {
          inner.next_entity += 1;
        }
        inner.state.apply(outcome.diff);
        Receipt {
          token_id: outcome.token_id,
          topic_id: outcome.topic_id,
          total_supply: outcome.total_supply,
          topic_sequence_number: outcome.topic_sequence_number,
          ..Receipt::new(id, Status::Success)
        }
      }
      Err(status) => Receipt::new(id, status),
    };

    info!(
      "Transaction {id} ({}) result: {}",
      tx.body().kind(),
      receipt.status
    );

    inner.receipts.insert(id, receipt);
    Ok(TransactionResponse {
      transaction_id: id,
      hash: *tx.signing_hash(),
    })
  }

  fn account(&self, id: &AccountId) -> Result<AccountRecord, Error> {
    self
      .inner
      .lock()
      .state
      .account(id)
      .ok_or_else(|| Error::NotFound(format!("account {id}")))
  }
}

#[async_trait]
impl Ledger for InMemoryLedger {
  fn network(&self) -> NetworkId {
    self.config.network
  }

  async fn submit(
    &self,
    tx: Transaction,
  ) -> Result<TransactionResponse, Error> {
    self.handle(tx)
  }

  async fn receipt(&self, id: &TransactionId) -> Result<Receipt, Error> {
    self
      .inner
      .lock()
      .receipts
      .get(id)
      .cloned()
      .ok_or(Error::ReceiptNotFound(*id))
  }

  async fn account_balance(
    &self,
    account: &AccountId,
  ) -> Result<AccountBalance, Error> {
    let record = self.account(account)?;
    Ok(AccountBalance {
      account: *account,
      hbars: record.balance,
      tokens: record.tokens,
    })
  }

  async fn account_info(
    &self,
    account: &AccountId,
  ) -> Result<AccountInfo, Error> {
    let inner = self.inner.lock();
    let record = inner
      .state
      .account(account)
      .ok_or_else(|| Error::NotFound(format!("account {account}")))?;

    let token_relationships = record
      .tokens
      .iter()
      .filter_map(|(token, balance)| {
        inner.state.token(token).map(|info| {
          (*token, TokenRelationship {
            token: *token,
            symbol: info.symbol,
            balance: *balance,
            decimals: info.decimals,
          })
        })
      })
      .collect();

    Ok(AccountInfo {
      account: *account,
      key: record.key,
      balance: record.balance,
      token_relationships,
    })
  }

  async fn token_info(&self, token: &TokenId) -> Result<TokenInfo, Error> {
    self
      .inner
      .lock()
      .state
      .token(token)
      .ok_or_else(|| Error::NotFound(format!("token {token}")))
  }

  async fn topic_info(&self, topic: &TopicId) -> Result<TopicInfo, Error> {
    self
      .inner
      .lock()
      .state
      .topic(topic)
      .ok_or_else(|| Error::NotFound(format!("topic {topic}")))
  }

  async fn topic_messages(
    &self,
    topic: &TopicId,
  ) -> Result<Vec<TopicMessage>, Error> {
    let inner = self.inner.lock();
    if inner.state.topic(topic).is_none() {
      return Err(Error::NotFound(format!("topic {topic}")));
    }
    Ok(inner.state.messages(topic).to_vec())
  }
}
