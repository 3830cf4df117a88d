use {
  std::sync::Arc,
  tokenbench_ledger::InMemoryLedger,
  tokenbench_primitives::{Hbar, PrivateKey},
  tokenbench_sdk::{AccountRegistry, Client},
};

pub struct Network {
  pub ledger: Arc<InMemoryLedger>,
  pub accounts: AccountRegistry,
}

impl Network {
  /// An in-memory ledger with `count` accounts holding 100 hbar each.
  pub fn with_accounts(count: usize) -> anyhow::Result<Self> {
    let ledger = Arc::new(InMemoryLedger::default());
    let accounts = AccountRegistry::from_keys((0..count).map(|_| {
      let key = PrivateKey::generate();
      (ledger.create_account(&key, Hbar::new(100)), key)
    }))?;
    Ok(Self { ledger, accounts })
  }

  /// A client paying with the account at `index`.
  pub fn client(&self, index: usize) -> anyhow::Result<Client> {
    let operator = self.accounts.resolve(index)?;
    Ok(
      Client::new(self.ledger.clone())
        .with_operator(operator.id, operator.key.clone()),
    )
  }
}
