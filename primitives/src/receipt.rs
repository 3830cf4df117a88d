use {
  crate::{TokenId, TopicId, TransactionId},
  multihash::Multihash,
  serde::{Deserialize, Serialize},
  std::fmt::Display,
};

/// Outcome codes reported by the ledger, either at precheck or in the
/// receipt of a handled transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
  Success,
  /// The transaction has not reached consensus yet.
  Unknown,
  DuplicateTransaction,
  PayerAccountNotFound,
  InsufficientPayerBalance,
  InsufficientTxFee,
  InvalidSignature,
  InvalidAccountId,
  InvalidTokenId,
  InvalidTopicId,
  InvalidTreasuryAccountForToken,
  MissingTokenName,
  MissingTokenSymbol,
  TokenNameTooLong,
  TokenSymbolTooLong,
  InvalidTokenDecimals,
  InvalidTokenInitialSupply,
  InvalidTokenMaxSupply,
  InvalidTokenMintAmount,
  InvalidTokenBurnAmount,
  TokenHasNoSupplyKey,
  TokenMaxSupplyReached,
  TokenNotAssociatedToAccount,
  TokenAlreadyAssociatedToAccount,
  InsufficientTokenBalance,
  InsufficientAccountBalance,
  TransfersNotZeroSumForToken,
  InvalidAccountAmounts,
  EmptyTokenTransferBody,
  AccountRepeatedInAccountAmounts,
  InvalidKeyEncoding,
  InvalidTopicMessage,
  MemoTooLong,
  MessageSizeTooLarge,
}

impl Status {
  pub fn is_success(&self) -> bool {
    matches!(self, Status::Success)
  }
}

impl Display for Status {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    // Debug names are CamelCase, the ledger reports SCREAMING_SNAKE_CASE.
    let name = format!("{self:?}");
    let mut out = String::with_capacity(name.len() + 8);
    for (i, ch) in name.chars().enumerate() {
      if ch.is_ascii_uppercase() && i != 0 {
        out.push('_');
      }
      out.push(ch.to_ascii_uppercase());
    }
    f.write_str(&out)
  }
}

/// Returned by the ledger when a transaction is accepted for handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionResponse {
  pub transaction_id: TransactionId,
  pub hash: Multihash,
}

/// Final record of a handled transaction.
///
/// Only the identifiers relevant to the transaction kind are populated,
/// for example a token creation carries `token_id` and a message
/// submission carries `topic_sequence_number`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
  pub status: Status,
  pub transaction_id: TransactionId,
  pub token_id: Option<TokenId>,
  pub topic_id: Option<TopicId>,
  pub total_supply: Option<u64>,
  pub topic_sequence_number: Option<u64>,
}

impl Receipt {
  pub fn new(transaction_id: TransactionId, status: Status) -> Self {
    Self {
      status,
      transaction_id,
      token_id: None,
      topic_id: None,
      total_supply: None,
      topic_sequence_number: None,
    }
  }
}
