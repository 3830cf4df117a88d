use {
  clap::Parser,
  humantime::Duration,
  std::path::PathBuf,
  tokenbench_primitives::{Hbar, NetworkId},
};

/// Token and topic service scenarios
///
/// Runs the token and topic scenarios against a single-node in-memory
/// ledger seeded with the configured accounts.
#[derive(Debug, Parser)]
pub struct SystemSettings {
  /// JSON file listing the accounts, in role order
  #[clap(long, env = "TOKENBENCH_ACCOUNTS", value_name = "FILE")]
  accounts: Option<PathBuf>,

  /// Number of accounts to generate when no accounts file is given
  #[clap(long, default_value = "4", value_name = "COUNT")]
  generate: usize,

  /// Network identifier reported by the ledger
  #[clap(short, long, default_value = "testnet", value_name = "NAME")]
  network: NetworkId,

  /// Hbar balance every configured account starts with
  #[clap(
    long,
    default_value = "100",
    value_name = "HBARS",
    value_parser = clap::value_parser!(i64).range(0..=Hbar::MAX_HBARS)
  )]
  genesis_hbars: i64,

  /// Deadline for each submission and query
  #[clap(short, long, value_name = "DURATION")]
  timeout: Option<Duration>,

  /// List the scenarios and exit
  #[clap(long)]
  list: bool,

  /// Only run scenarios whose name contains this text
  #[clap(value_name = "FILTER")]
  filter: Option<String>,
}

impl SystemSettings {
  pub fn accounts(&self) -> Option<&PathBuf> {
    self.accounts.as_ref()
  }

  pub fn generate(&self) -> usize {
    self.generate
  }

  pub fn network(&self) -> NetworkId {
    self.network
  }

  pub fn genesis_hbars(&self) -> i64 {
    self.genesis_hbars
  }

  pub fn timeout(&self) -> Option<std::time::Duration> {
    self.timeout.map(Into::into)
  }

  pub fn list(&self) -> bool {
    self.list
  }

  pub fn filter(&self) -> Option<&str> {
    self.filter.as_deref()
  }
}

#[cfg(test)]
mod tests {
  use {super::SystemSettings, clap::Parser, tokenbench_primitives::Hbar};

  #[test]
  fn genesis_hbars_stay_within_the_tinybar_range() -> anyhow::Result<()> {
    let settings = SystemSettings::try_parse_from(["tokenbench"])?;
    assert_eq!(settings.genesis_hbars(), 100);

    let max = Hbar::MAX_HBARS.to_string();
    let settings = SystemSettings::try_parse_from([
      "tokenbench",
      "--genesis-hbars",
      max.as_str(),
    ])?;
    assert_eq!(settings.genesis_hbars(), Hbar::MAX_HBARS);

    for rejected in ["100000000000", "-1"] {
      assert!(SystemSettings::try_parse_from([
        "tokenbench",
        "--genesis-hbars",
        rejected
      ])
      .is_err());
    }
    Ok(())
  }
}
