use {
  std::{io, path::PathBuf, time::Duration},
  thiserror::Error,
  tokenbench_ledger::Error as LedgerError,
  tokenbench_primitives::{
    AccountId,
    IdError,
    KeyError,
    Receipt,
    Status,
    TokenId,
    TokenTransfer,
    TopicId,
  },
};

/// Failures while loading the static accounts configuration.
///
/// These are raised once at startup and are not recoverable.
#[derive(Debug, Error)]
pub enum ConfigurationError {
  #[error("Failed reading accounts file {path:?}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Malformed accounts configuration: {0}")]
  Json(#[from] serde_json::Error),

  #[error("Account entry {index} has an invalid id '{value}': {source}")]
  InvalidId {
    index: usize,
    value: String,
    #[source]
    source: IdError,
  },

  #[error("Account entry {index} ({id}) has an invalid private key: {source}")]
  InvalidKey {
    index: usize,
    id: AccountId,
    #[source]
    source: KeyError,
  },

  #[error("Accounts configuration lists no accounts")]
  Empty,

  #[error("Account {0} is listed more than once")]
  DuplicateAccount(AccountId),

  #[error("No account configured at position {0}")]
  MissingAccount(usize),

  #[error("Unknown account role '{0}'")]
  UnknownRole(String),
}

/// Failures of the client itself while submitting a transaction,
/// as opposed to a ledger reported failure in a receipt.
#[derive(Debug, Error)]
pub enum ClientError {
  #[error("Client has no operator account to pay for transactions")]
  MissingOperator,

  #[error("Transaction rejected at precheck with status {0}")]
  Precheck(Status),

  #[error("Operation did not complete within {0:?}")]
  Timeout(Duration),

  #[error("Ledger error: {0}")]
  Ledger(LedgerError),
}

impl From<LedgerError> for ClientError {
  fn from(e: LedgerError) -> Self {
    match e {
      LedgerError::Precheck(status) => ClientError::Precheck(status),
      e => ClientError::Ledger(e),
    }
  }
}

/// Failures of read-only queries.
#[derive(Debug, Error)]
pub enum QueryError {
  #[error("{0} does not exist on the ledger")]
  NotFound(String),

  #[error("Query did not complete within {0:?}")]
  Timeout(Duration),

  #[error("Ledger error: {0}")]
  Ledger(LedgerError),
}

impl From<LedgerError> for QueryError {
  fn from(e: LedgerError) -> Self {
    match e {
      LedgerError::NotFound(what) => QueryError::NotFound(what),
      e => QueryError::Ledger(e),
    }
  }
}

/// Failures of the token and topic helpers.
///
/// Operation failures carry the status reported by the ledger along
/// with the parameters of the attempted operation.
#[derive(Debug, Error)]
pub enum Error {
  #[error("Creating token {name} ({symbol}) failed: {status}")]
  CreationFailed {
    name: String,
    symbol: String,
    status: Status,
  },

  #[error("Minting {amount} of {token} failed: {status}")]
  MintFailed {
    token: TokenId,
    amount: u64,
    status: Status,
  },

  #[error("Burning {amount} of {token} failed: {status}")]
  BurnFailed {
    token: TokenId,
    amount: u64,
    status: Status,
  },

  #[error("Transfer of {token} failed: {status}")]
  TransferFailed {
    token: TokenId,
    legs: Vec<TokenTransfer>,
    status: Status,
  },

  #[error("Associating {account} with {token} failed: {status}")]
  AssociationFailed {
    account: AccountId,
    token: TokenId,
    status: Status,
  },

  #[error("Creating topic '{memo}' failed: {status}")]
  TopicCreationFailed { memo: String, status: Status },

  #[error("Submitting a message to {topic} failed: {status}")]
  SubmissionFailed { topic: TopicId, status: Status },

  #[error(transparent)]
  Query(#[from] QueryError),

  #[error(transparent)]
  Client(ClientError),
}

impl Error {
  /// The ledger status behind an operation failure, if any.
  pub fn status(&self) -> Option<Status> {
    match self {
      Error::CreationFailed { status, .. }
      | Error::MintFailed { status, .. }
      | Error::BurnFailed { status, .. }
      | Error::TransferFailed { status, .. }
      | Error::AssociationFailed { status, .. }
      | Error::TopicCreationFailed { status, .. }
      | Error::SubmissionFailed { status, .. } => Some(*status),
      Error::Query(_) | Error::Client(_) => None,
    }
  }
}

/// Turns the outcome of a submission into a successful receipt or an
/// operation failure built by `failed`.
///
/// Precheck rejections are reported the same way as failed receipts,
/// other client failures are passed through.
pub(crate) fn settle(
  outcome: Result<Receipt, ClientError>,
  failed: impl FnOnce(Status) -> Error,
) -> Result<Receipt, Error> {
  match outcome {
    Ok(receipt) if receipt.status.is_success() => Ok(receipt),
    Ok(receipt) => Err(failed(receipt.status)),
    Err(ClientError::Precheck(status)) => Err(failed(status)),
    Err(e) => Err(Error::Client(e)),
  }
}

#[cfg(test)]
mod tests {
  use {super::*, tokenbench_primitives::TransactionId};

  fn mint_failed(status: Status) -> Error {
    Error::MintFailed {
      token: TokenId::new(0, 0, 1001),
      amount: 5,
      status,
    }
  }

  #[test]
  fn settle_maps_statuses() {
    let id = TransactionId::new(AccountId::new(0, 0, 2), 1);

    let ok = settle(Ok(Receipt::new(id, Status::Success)), mint_failed);
    assert!(ok.is_ok());

    let failed =
      settle(Ok(Receipt::new(id, Status::InvalidSignature)), mint_failed);
    assert_eq!(failed.unwrap_err().status(), Some(Status::InvalidSignature));

    let precheck = settle(
      Err(ClientError::Precheck(Status::InsufficientPayerBalance)),
      mint_failed,
    );
    assert_eq!(
      precheck.unwrap_err().status(),
      Some(Status::InsufficientPayerBalance)
    );

    let client = settle(Err(ClientError::MissingOperator), mint_failed);
    assert!(matches!(
      client,
      Err(Error::Client(ClientError::MissingOperator))
    ));
  }

  #[test]
  fn ledger_errors_are_classified() {
    assert!(matches!(
      ClientError::from(LedgerError::Precheck(Status::DuplicateTransaction)),
      ClientError::Precheck(Status::DuplicateTransaction)
    ));
    assert!(matches!(
      QueryError::from(LedgerError::NotFound("token 0.0.9".into())),
      QueryError::NotFound(_)
    ));
  }
}
