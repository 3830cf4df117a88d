use {
  crate::{
    state::{AccountRecord, State, StateDiff},
    Config,
  },
  std::collections::{BTreeMap, BTreeSet},
  tokenbench_primitives::{
    AccountId,
    Hbar,
    HbarTransfer,
    Key,
    PublicKey,
    Status,
    SupplyType,
    TokenId,
    TokenInfo,
    TokenTransfer,
    TopicId,
    TopicInfo,
    TopicMessage,
    Transaction,
    TransactionBody,
  },
};

const MAX_NAME_LEN: usize = 100;
const MAX_MEMO_LEN: usize = 100;
const MAX_DECIMALS: u32 = 18;

/// Per-transaction values assigned by the ledger when it handles a
/// transaction.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Context {
  /// Entity number given to a token or topic created by this transaction.
  pub entity_num: u64,
  pub consensus_timestamp: u64,
}

/// The result of a successfully handled transaction.
#[derive(Debug, Default)]
pub(crate) struct Outcome {
  pub diff: StateDiff,
  pub token_id: Option<TokenId>,
  pub topic_id: Option<TopicId>,
  pub total_supply: Option<u64>,
  pub topic_sequence_number: Option<u64>,
}

impl Outcome {
  fn with_diff(diff: StateDiff) -> Self {
    Self {
      diff,
      ..Default::default()
    }
  }
}

/// Checks that run before a transaction is accepted for handling.
///
/// A transaction that fails precheck is never handled, is not charged a
/// fee and produces no receipt. On success the set of verified signers
/// is returned for the handling stage.
pub(crate) fn precheck(
  tx: &Transaction,
  state: &impl State,
  config: &Config,
) -> Result<BTreeSet<PublicKey>, Status> {
  let payer = state
    .account(&tx.id().payer)
    .ok_or(Status::PayerAccountNotFound)?;

  let signers = tx
    .verified_signers()
    .map_err(|_| Status::InvalidSignature)?;

  if !payer.key.is_satisfied_by(&signers) {
    return Err(Status::InvalidSignature);
  }

  if tx.max_fee() < config.transaction_fee {
    return Err(Status::InsufficientTxFee);
  }

  if payer.balance < config.transaction_fee {
    return Err(Status::InsufficientPayerBalance);
  }

  Ok(signers)
}

/// Produces the fee debit for the payer of a transaction that passed
/// precheck. It is applied whether or not the body succeeds.
pub(crate) fn charge_fee(
  tx: &Transaction,
  state: &impl State,
  config: &Config,
) -> StateDiff {
  let mut diff = StateDiff::default();
  if let Some(mut payer) = state.account(&tx.id().payer) {
    payer.balance = payer.balance - config.transaction_fee;
    diff.set_account(tx.id().payer, payer);
  }
  diff
}

/// Executes the body of a transaction.
///
/// Returns the state diff to apply when every rule of the operation
/// holds, or the status describing the first rule that does not.
pub(crate) fn execute(
  tx: &Transaction,
  signers: &BTreeSet<PublicKey>,
  state: &impl State,
  config: &Config,
  ctx: Context,
) -> Result<Outcome, Status> {
  match tx.body() {
    TransactionBody::TokenCreate {
      name,
      symbol,
      decimals,
      initial_supply,
      treasury,
      admin_key,
      supply_key,
      supply_type,
    } => token_create(
      TokenInfo {
        token: TokenId::new(0, 0, ctx.entity_num),
        name: name.clone(),
        symbol: symbol.clone(),
        decimals: *decimals,
        total_supply: *initial_supply,
        treasury: *treasury,
        admin_key: admin_key.clone(),
        supply_key: supply_key.clone(),
        supply_type: *supply_type,
      },
      signers,
      state,
    ),
    TransactionBody::TokenMint { token, amount } => {
      token_mint(token, *amount, signers, state)
    }
    TransactionBody::TokenBurn { token, amount } => {
      token_burn(token, *amount, signers, state)
    }
    TransactionBody::TokenAssociate { account, tokens } => {
      token_associate(account, tokens, signers, state)
    }
    TransactionBody::CryptoTransfer {
      hbar_transfers,
      token_transfers,
    } => crypto_transfer(hbar_transfers, token_transfers, signers, state),
    TransactionBody::TopicCreate {
      memo,
      admin_key,
      submit_key,
    } => topic_create(
      TopicInfo {
        topic: TopicId::new(0, 0, ctx.entity_num),
        memo: memo.clone(),
        admin_key: admin_key.clone(),
        submit_key: submit_key.clone(),
        sequence_number: 0,
      },
      signers,
    ),
    TransactionBody::TopicMessageSubmit { topic, message } => {
      topic_message_submit(topic, message, signers, state, config, ctx)
    }
  }
}

fn require(key: &Key, signers: &BTreeSet<PublicKey>) -> Result<(), Status> {
  match key.is_satisfied_by(signers) {
    true => Ok(()),
    false => Err(Status::InvalidSignature),
  }
}

fn valid_key(key: &Option<Key>) -> Result<(), Status> {
  match key {
    Some(key) => key.validate().map_err(|_| Status::InvalidKeyEncoding),
    None => Ok(()),
  }
}

fn token_create(
  info: TokenInfo,
  signers: &BTreeSet<PublicKey>,
  state: &impl State,
) -> Result<Outcome, Status> {
  if info.name.is_empty() {
    return Err(Status::MissingTokenName);
  }
  if info.name.len() > MAX_NAME_LEN {
    return Err(Status::TokenNameTooLong);
  }
  if info.symbol.is_empty() {
    return Err(Status::MissingTokenSymbol);
  }
  if info.symbol.len() > MAX_NAME_LEN {
    return Err(Status::TokenSymbolTooLong);
  }
  if info.decimals > MAX_DECIMALS {
    return Err(Status::InvalidTokenDecimals);
  }
  if let SupplyType::Finite(max) = info.supply_type {
    if max == 0 {
      return Err(Status::InvalidTokenMaxSupply);
    }
    if info.total_supply > max {
      return Err(Status::InvalidTokenInitialSupply);
    }
  }

  valid_key(&info.admin_key)?;
  valid_key(&info.supply_key)?;

  let mut treasury = state
    .account(&info.treasury)
    .ok_or(Status::InvalidTreasuryAccountForToken)?;

  // both the treasury and the admin key must authorize the creation
  require(&treasury.key, signers)?;
  if let Some(admin_key) = &info.admin_key {
    require(admin_key, signers)?;
  }

  treasury.tokens.insert(info.token, info.total_supply);

  let mut diff = StateDiff::default();
  diff.set_account(info.treasury, treasury);

  let token = info.token;
  let total_supply = info.total_supply;
  diff.set_token(info);

  Ok(Outcome {
    token_id: Some(token),
    total_supply: Some(total_supply),
    ..Outcome::with_diff(diff)
  })
}

/// Resolves a token and checks that its supply key signed.
fn supply_authorized(
  token: &TokenId,
  signers: &BTreeSet<PublicKey>,
  state: &impl State,
) -> Result<(TokenInfo, AccountRecord), Status> {
  let info = state.token(token).ok_or(Status::InvalidTokenId)?;
  let supply_key = info.supply_key.as_ref().ok_or(Status::TokenHasNoSupplyKey)?;
  require(supply_key, signers)?;

  let treasury = state
    .account(&info.treasury)
    .ok_or(Status::InvalidTreasuryAccountForToken)?;
  Ok((info, treasury))
}

fn token_mint(
  token: &TokenId,
  amount: u64,
  signers: &BTreeSet<PublicKey>,
  state: &impl State,
) -> Result<Outcome, Status> {
  if amount == 0 {
    return Err(Status::InvalidTokenMintAmount);
  }

  let (mut info, mut treasury) = supply_authorized(token, signers, state)?;

  let new_supply = info
    .total_supply
    .checked_add(amount)
    .ok_or(Status::TokenMaxSupplyReached)?;

  if let SupplyType::Finite(max) = info.supply_type {
    if new_supply > max {
      return Err(Status::TokenMaxSupplyReached);
    }
  }

  *treasury.tokens.entry(*token).or_default() += amount;
  info.total_supply = new_supply;

  let mut diff = StateDiff::default();
  diff.set_account(info.treasury, treasury);
  diff.set_token(info);

  Ok(Outcome {
    total_supply: Some(new_supply),
    ..Outcome::with_diff(diff)
  })
}

fn token_burn(
  token: &TokenId,
  amount: u64,
  signers: &BTreeSet<PublicKey>,
  state: &impl State,
) -> Result<Outcome, Status> {
  if amount == 0 {
    return Err(Status::InvalidTokenBurnAmount);
  }

  let (mut info, mut treasury) = supply_authorized(token, signers, state)?;

  let balance = treasury.tokens.entry(*token).or_default();
  *balance = balance
    .checked_sub(amount)
    .ok_or(Status::InsufficientTokenBalance)?;
  info.total_supply -= amount;

  let new_supply = info.total_supply;
  let mut diff = StateDiff::default();
  diff.set_account(info.treasury, treasury);
  diff.set_token(info);

  Ok(Outcome {
    total_supply: Some(new_supply),
    ..Outcome::with_diff(diff)
  })
}

fn token_associate(
  account: &AccountId,
  tokens: &[TokenId],
  signers: &BTreeSet<PublicKey>,
  state: &impl State,
) -> Result<Outcome, Status> {
  let mut record = state.account(account).ok_or(Status::InvalidAccountId)?;
  require(&record.key, signers)?;

  for token in tokens {
    if state.token(token).is_none() {
      return Err(Status::InvalidTokenId);
    }
    if record.tokens.insert(*token, 0).is_some() {
      return Err(Status::TokenAlreadyAssociatedToAccount);
    }
  }

  let mut diff = StateDiff::default();
  diff.set_account(*account, record);
  Ok(Outcome::with_diff(diff))
}

fn crypto_transfer(
  hbar_transfers: &[HbarTransfer],
  token_transfers: &[TokenTransfer],
  signers: &BTreeSet<PublicKey>,
  state: &impl State,
) -> Result<Outcome, Status> {
  if hbar_transfers.is_empty() && token_transfers.is_empty() {
    return Err(Status::EmptyTokenTransferBody);
  }

  let mut diff = StateDiff::default();

  // native currency legs
  let mut seen = BTreeSet::new();
  let mut sum = Hbar::ZERO;
  for leg in hbar_transfers {
    if !seen.insert(leg.account) {
      return Err(Status::AccountRepeatedInAccountAmounts);
    }
    sum = sum
      .checked_add(leg.amount)
      .ok_or(Status::InvalidAccountAmounts)?;
  }
  if sum != Hbar::ZERO {
    return Err(Status::InvalidAccountAmounts);
  }

  for leg in hbar_transfers {
    let mut record = diff
      .account_or(state, &leg.account)
      .ok_or(Status::InvalidAccountId)?;
    if leg.amount < Hbar::ZERO {
      require(&record.key, signers)?;
    }
    record.balance = record
      .balance
      .checked_add(leg.amount)
      .filter(|balance| *balance >= Hbar::ZERO)
      .ok_or(Status::InsufficientAccountBalance)?;
    diff.set_account(leg.account, record);
  }

  // token legs, grouped per token so every token nets to zero
  let mut per_token: BTreeMap<TokenId, Vec<&TokenTransfer>> = BTreeMap::new();
  for leg in token_transfers {
    per_token.entry(leg.token).or_default().push(leg);
  }

  for (token, legs) in per_token {
    if state.token(&token).is_none() {
      return Err(Status::InvalidTokenId);
    }

    let mut seen = BTreeSet::new();
    let mut sum: i128 = 0;
    for leg in &legs {
      if leg.amount == 0 {
        return Err(Status::InvalidAccountAmounts);
      }
      if !seen.insert(leg.account) {
        return Err(Status::AccountRepeatedInAccountAmounts);
      }
      sum += leg.amount as i128;
    }
    if sum != 0 {
      return Err(Status::TransfersNotZeroSumForToken);
    }

    for leg in legs {
      let mut record = diff
        .account_or(state, &leg.account)
        .ok_or(Status::InvalidAccountId)?;
      if leg.amount < 0 {
        require(&record.key, signers)?;
      }

      let balance = record
        .tokens
        .get_mut(&token)
        .ok_or(Status::TokenNotAssociatedToAccount)?;

      *balance = match leg.amount < 0 {
        true => balance
          .checked_sub(leg.amount.unsigned_abs())
          .ok_or(Status::InsufficientTokenBalance)?,
        false => balance
          .checked_add(leg.amount as u64)
          .ok_or(Status::InvalidAccountAmounts)?,
      };
      diff.set_account(leg.account, record);
    }
  }

  Ok(Outcome::with_diff(diff))
}

fn topic_create(
  info: TopicInfo,
  signers: &BTreeSet<PublicKey>,
) -> Result<Outcome, Status> {
  if info.memo.len() > MAX_MEMO_LEN {
    return Err(Status::MemoTooLong);
  }

  valid_key(&info.admin_key)?;
  valid_key(&info.submit_key)?;

  if let Some(admin_key) = &info.admin_key {
    require(admin_key, signers)?;
  }

  let topic = info.topic;
  let mut diff = StateDiff::default();
  diff.set_topic(info);

  Ok(Outcome {
    topic_id: Some(topic),
    ..Outcome::with_diff(diff)
  })
}

fn topic_message_submit(
  topic: &TopicId,
  message: &[u8],
  signers: &BTreeSet<PublicKey>,
  state: &impl State,
  config: &Config,
  ctx: Context,
) -> Result<Outcome, Status> {
  let mut info = state.topic(topic).ok_or(Status::InvalidTopicId)?;

  if let Some(submit_key) = &info.submit_key {
    require(submit_key, signers)?;
  }

  if message.is_empty() {
    return Err(Status::InvalidTopicMessage);
  }
  if message.len() > config.max_message_size {
    return Err(Status::MessageSizeTooLarge);
  }

  info.sequence_number += 1;
  let sequence_number = info.sequence_number;

  let mut diff = StateDiff::default();
  diff.push_message(TopicMessage {
    topic: *topic,
    sequence_number,
    contents: message.to_vec(),
    consensus_timestamp: ctx.consensus_timestamp,
  });
  diff.set_topic(info);

  Ok(Outcome {
    topic_id: Some(*topic),
    topic_sequence_number: Some(sequence_number),
    ..Outcome::with_diff(diff)
  })
}
