use {
  crate::settings::SystemSettings,
  anyhow::Context,
  clap::Parser,
  std::sync::Arc,
  tokenbench_ledger::{Config, InMemoryLedger},
  tokenbench_primitives::{AccountId, Hbar, PrivateKey},
  tokenbench_scenarios::{features, run, ScenarioContext},
  tokenbench_sdk::AccountRegistry,
  tracing::{error, info, subscriber::set_global_default},
  tracing_subscriber::{EnvFilter, FmtSubscriber},
};

mod settings;

fn load_accounts(settings: &SystemSettings) -> anyhow::Result<AccountRegistry> {
  match settings.accounts() {
    Some(path) => Ok(AccountRegistry::load(path)?),
    None => {
      info!("no accounts file given, generating {}", settings.generate());
      let registry =
        AccountRegistry::from_keys((0..settings.generate()).map(|i| {
          (AccountId::new(0, 0, 1001 + i as u64), PrivateKey::generate())
        }))?;
      Ok(registry)
    }
  }
}

/// A fresh ledger where every configured account exists with the
/// genesis balance.
fn genesis(
  settings: &SystemSettings,
  accounts: &AccountRegistry,
) -> anyhow::Result<InMemoryLedger> {
  let balance = Hbar::checked_new(settings.genesis_hbars())
    .context("genesis balance does not fit in tinybars")?;
  let ledger = InMemoryLedger::new(Config {
    network: settings.network(),
    ..Default::default()
  });
  for account in accounts.iter() {
    ledger.insert_account(account.id, account.public_key(), balance);
  }
  Ok(ledger)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // configure logging
  set_global_default(
    FmtSubscriber::builder()
      .with_env_filter(
        EnvFilter::try_from_default_env()
          .unwrap_or_else(|_| EnvFilter::new("info")),
      )
      .finish(),
  )?;

  // gather CLI parameters
  let settings = SystemSettings::parse();
  info!("startup settings: {settings:#?}");

  let features = features();
  if settings.list() {
    for feature in &features {
      for scenario in &feature.scenarios {
        println!("{}: {}", feature.name, scenario.name);
      }
    }
    return Ok(());
  }

  let accounts = load_accounts(&settings)?;
  for account in accounts.iter() {
    info!("{} account: {}", account.role, account.id);
  }

  // every scenario starts from the same genesis state
  let report = run(&features, settings.filter(), || {
    ScenarioContext::new(
      Arc::new(genesis(&settings, &accounts)?),
      accounts.clone(),
      settings.timeout(),
    )
  })
  .await?;

  for failed in report.failed() {
    if let Some((step, reason)) = &failed.failure {
      error!(
        "{} / {} failed at '{step}': {reason}",
        failed.feature, failed.scenario
      );
    }
  }
  info!(
    "{} scenarios passed, {} failed",
    report.passed(),
    report.results.len() - report.passed()
  );

  if !report.is_success() {
    anyhow::bail!("some scenarios failed");
  }
  Ok(())
}
