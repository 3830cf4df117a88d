use tokenbench_primitives::{Hbar, NetworkId};

/// Ledger wide parameters of an [`crate::InMemoryLedger`].
#[derive(Debug, Clone)]
pub struct Config {
  /// The network this ledger presents itself as.
  pub network: NetworkId,

  /// Flat fee charged to the payer of every transaction that passes
  /// precheck, regardless of whether the body succeeds.
  pub transaction_fee: Hbar,

  /// Largest accepted topic message, in bytes.
  pub max_message_size: usize,

  /// Entity number assigned to the first token or topic created on
  /// this ledger. Genesis accounts may use any number.
  pub first_entity_num: u64,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      network: NetworkId::Testnet,
      transaction_fee: Hbar::from_tinybars(5_000_000), // 0.05 hbar
      max_message_size: 1024,
      first_entity_num: 1001,
    }
  }
}
