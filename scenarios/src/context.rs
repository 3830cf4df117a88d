use {
  anyhow::Context as _,
  std::{collections::BTreeMap, sync::Arc, time::Duration},
  tokenbench_ledger::Ledger,
  tokenbench_primitives::{AccountId, Hbar, KeyList, TokenId, TopicId},
  tokenbench_sdk::{Account, AccountRegistry, Client},
};

/// A transfer built by one step and submitted by a later one.
#[derive(Debug, Clone)]
pub struct PendingTransfer {
  pub legs: Vec<(AccountId, i64)>,
  /// Roles of the accounts that authorize the debits.
  pub signers: Vec<usize>,
}

/// Everything a scenario accumulates while its steps run.
///
/// Each scenario gets its own context, nothing is shared between
/// scenarios except the ledger they run against.
pub struct ScenarioContext {
  accounts: AccountRegistry,
  client: Client,
  pub token: Option<TokenId>,
  pub topic: Option<TopicId>,
  pub threshold_key: Option<KeyList>,
  pub pending: Option<PendingTransfer>,
  pub last_sequence_number: Option<u64>,
  pub hbars_before: BTreeMap<AccountId, Hbar>,
}

impl ScenarioContext {
  /// The first configured account is the operator of the scenario
  /// client and pays for every transaction unless a step says otherwise.
  pub fn new(
    ledger: Arc<dyn Ledger>,
    accounts: AccountRegistry,
    timeout: Option<Duration>,
  ) -> anyhow::Result<Self> {
    let operator = accounts.resolve(0)?;
    let mut client =
      Client::new(ledger).with_operator(operator.id, operator.key.clone());
    if let Some(timeout) = timeout {
      client = client.with_timeout(timeout);
    }

    Ok(Self {
      accounts,
      client,
      token: None,
      topic: None,
      threshold_key: None,
      pending: None,
      last_sequence_number: None,
      hbars_before: BTreeMap::new(),
    })
  }

  pub fn accounts(&self) -> &AccountRegistry {
    &self.accounts
  }

  pub fn account(&self, role: usize) -> anyhow::Result<Account> {
    Ok(self.accounts.resolve(role)?.clone())
  }

  pub fn client(&self) -> &Client {
    &self.client
  }

  /// A client paying with the account playing `role`.
  pub fn client_for(&self, role: usize) -> anyhow::Result<Client> {
    let account = self.accounts.resolve(role)?;
    Ok(
      self
        .client
        .clone()
        .with_operator(account.id, account.key.clone()),
    )
  }

  pub fn token(&self) -> anyhow::Result<TokenId> {
    self.token.context("no token was created in this scenario")
  }

  pub fn topic(&self) -> anyhow::Result<TopicId> {
    self.topic.context("no topic was created in this scenario")
  }
}
