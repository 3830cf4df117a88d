mod config;
mod execution;
mod memory;
mod state;

pub use {config::Config, memory::InMemoryLedger};
use {
  async_trait::async_trait,
  thiserror::Error,
  tokenbench_primitives::{
    AccountBalance,
    AccountId,
    AccountInfo,
    NetworkId,
    Receipt,
    Status,
    TokenId,
    TokenInfo,
    TopicId,
    TopicInfo,
    TopicMessage,
    Transaction,
    TransactionId,
    TransactionResponse,
  },
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("Transaction rejected at precheck with status {0}")]
  Precheck(Status),

  #[error("No receipt found for transaction {0}")]
  ReceiptNotFound(TransactionId),

  #[error("{0} does not exist on the ledger")]
  NotFound(String),

  #[error("Transport error: {0}")]
  Transport(String),
}

/// The remote ledger as seen by clients.
///
/// Implementations own signing verification, consensus and state. A
/// submission either fails precheck, in which case it is never handled,
/// or is accepted and later yields a receipt. Receipts report
/// [`Status::Unknown`] until the transaction reaches consensus.
#[async_trait]
pub trait Ledger: Send + Sync {
  fn network(&self) -> NetworkId;

  async fn submit(&self, tx: Transaction)
    -> Result<TransactionResponse, Error>;

  async fn receipt(&self, id: &TransactionId) -> Result<Receipt, Error>;

  async fn account_balance(
    &self,
    account: &AccountId,
  ) -> Result<AccountBalance, Error>;

  async fn account_info(&self, account: &AccountId)
    -> Result<AccountInfo, Error>;

  async fn token_info(&self, token: &TokenId) -> Result<TokenInfo, Error>;

  async fn topic_info(&self, topic: &TopicId) -> Result<TopicInfo, Error>;

  /// All messages on a topic in consensus order.
  async fn topic_messages(
    &self,
    topic: &TopicId,
  ) -> Result<Vec<TopicMessage>, Error>;
}
