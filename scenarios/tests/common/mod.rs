use {
  std::sync::Arc,
  tokenbench_ledger::InMemoryLedger,
  tokenbench_primitives::{AccountId, Hbar, PrivateKey},
  tokenbench_scenarios::ScenarioContext,
  tokenbench_sdk::AccountRegistry,
};

pub fn accounts(count: u64) -> anyhow::Result<AccountRegistry> {
  Ok(AccountRegistry::from_keys((0..count).map(|i| {
    (AccountId::new(0, 0, 1001 + i), PrivateKey::generate())
  }))?)
}

/// A context over a fresh ledger where every account holds 100 hbar.
pub fn context(accounts: &AccountRegistry) -> anyhow::Result<ScenarioContext> {
  let ledger = InMemoryLedger::default();
  for account in accounts.iter() {
    ledger.insert_account(account.id, account.public_key(), Hbar::new(100));
  }
  ScenarioContext::new(Arc::new(ledger), accounts.clone(), None)
}
