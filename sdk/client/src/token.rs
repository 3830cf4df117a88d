//! Token service helpers.
//!
//! Each helper builds one transaction, submits it through the client and
//! waits for its receipt. Nothing is cached and nothing is retried, the
//! ledger is the only source of truth for supplies, balances and
//! associations.

use {
  crate::{error::settle, Account, Client, Error, TransactionBuilder},
  tokenbench_primitives::{
    AccountId,
    Receipt,
    Status,
    SupplyType,
    TokenId,
    TokenInfo,
    TokenTransfer,
    TransactionBody,
  },
  tracing::info,
};

/// Parameters of a new fungible token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTokenParams {
  pub name: String,
  pub symbol: String,
  pub decimals: u32,
  pub initial_supply: u64,
  pub supply_type: SupplyType,
}

impl Default for CreateTokenParams {
  fn default() -> Self {
    Self {
      name: "Test Token".into(),
      symbol: "HTT".into(),
      decimals: 0,
      initial_supply: 1000,
      supply_type: SupplyType::Infinite,
    }
  }
}

/// Creates a token whose initial supply is credited to `treasury`.
///
/// The creation is signed by both the admin and the treasury account,
/// the ledger rejects it unless both sign. The returned receipt always
/// carries the new token id.
pub async fn create_token(
  client: &Client,
  params: CreateTokenParams,
  treasury: &Account,
  admin_signer: &Account,
  supply_signer: &Account,
) -> Result<Receipt, Error> {
  let body = TransactionBody::TokenCreate {
    name: params.name.clone(),
    symbol: params.symbol.clone(),
    decimals: params.decimals,
    initial_supply: params.initial_supply,
    treasury: treasury.id,
    admin_key: Some(admin_signer.public_key().into()),
    supply_key: Some(supply_signer.public_key().into()),
    supply_type: params.supply_type,
  };

  let builder = TransactionBuilder::new(body)
    .sign_with(&admin_signer.key)
    .sign_with(&treasury.key);

  let failed = |status| Error::CreationFailed {
    name: params.name.clone(),
    symbol: params.symbol.clone(),
    status,
  };

  let receipt = settle(client.execute(builder).await, failed)?;
  match receipt.token_id {
    Some(token) => {
      info!(
        "created token {token} {} ({}) with treasury {}",
        params.name, params.symbol, treasury.id
      );
      Ok(receipt)
    }
    None => Err(failed(receipt.status)),
  }
}

/// Mints `amount` new units into the treasury of `token`.
///
/// The client operator co-signs every submission, so the supply key is
/// also satisfied when the operator holds it, whoever `supply_signer`
/// is. A mint by a signer without the supply key only fails through a
/// client whose operator does not hold that key either.
pub async fn mint_token(
  client: &Client,
  token: TokenId,
  amount: u64,
  supply_signer: &Account,
) -> Result<Status, Error> {
  let builder =
    TransactionBuilder::new(TransactionBody::TokenMint { token, amount })
      .sign_with(&supply_signer.key);

  let receipt = settle(client.execute(builder).await, |status| {
    Error::MintFailed {
      token,
      amount,
      status,
    }
  })?;
  info!("minted {amount} of {token}");
  Ok(receipt.status)
}

/// Burns `amount` units held by the treasury of `token`. The operator
/// co-signs here too, as for [`mint_token`].
pub async fn burn_token(
  client: &Client,
  token: TokenId,
  amount: u64,
  supply_signer: &Account,
) -> Result<Status, Error> {
  let builder =
    TransactionBuilder::new(TransactionBody::TokenBurn { token, amount })
      .sign_with(&supply_signer.key);

  let receipt = settle(client.execute(builder).await, |status| {
    Error::BurnFailed {
      token,
      amount,
      status,
    }
  })?;
  info!("burned {amount} of {token}");
  Ok(receipt.status)
}

/// Moves `amount` of `token` from `from` to `to` in one transaction
/// carrying both the debit and the credit.
pub async fn transfer_token(
  client: &Client,
  token: TokenId,
  from: &Account,
  to: AccountId,
  amount: u64,
  sender_signer: &Account,
) -> Result<Receipt, Error> {
  let Ok(amount) = i64::try_from(amount) else {
    return Err(Error::TransferFailed {
      token,
      legs: vec![],
      status: Status::InvalidAccountAmounts,
    });
  };

  transfer_token_multi(client, token, &[(from.id, -amount), (to, amount)], &[
    sender_signer,
  ])
  .await
}

/// Executes a transfer of `token` with any number of legs.
///
/// Negative amounts debit an account and positive amounts credit it.
/// Every debited account must be among `signers` (or be the client
/// operator) and the legs must net to zero.
pub async fn transfer_token_multi(
  client: &Client,
  token: TokenId,
  legs: &[(AccountId, i64)],
  signers: &[&Account],
) -> Result<Receipt, Error> {
  let legs: Vec<_> = legs
    .iter()
    .map(|(account, amount)| TokenTransfer {
      token,
      account: *account,
      amount: *amount,
    })
    .collect();

  let builder = signers.iter().fold(
    TransactionBuilder::new(TransactionBody::CryptoTransfer {
      hbar_transfers: vec![],
      token_transfers: legs.clone(),
    }),
    |builder, signer| builder.sign_with(&signer.key),
  );

  let receipt = settle(client.execute(builder).await, |status| {
    Error::TransferFailed {
      token,
      legs: legs.clone(),
      status,
    }
  })?;

  info!("transferred {token} across {} accounts", legs.len());
  Ok(receipt)
}

/// Associates `account` with `token` so it can hold a balance of it.
///
/// Associating an already associated pair fails with the ledger status
/// `TOKEN_ALREADY_ASSOCIATED_TO_ACCOUNT`, use [`is_token_associated`]
/// first when that is not the intent.
pub async fn associate_token(
  client: &Client,
  account: AccountId,
  token: TokenId,
  account_signer: &Account,
) -> Result<Status, Error> {
  let builder = TransactionBuilder::new(TransactionBody::TokenAssociate {
    account,
    tokens: vec![token],
  })
  .sign_with(&account_signer.key);

  let receipt = settle(client.execute(builder).await, |status| {
    Error::AssociationFailed {
      account,
      token,
      status,
    }
  })?;
  info!("associated {account} with {token}");
  Ok(receipt.status)
}

pub async fn is_token_associated(
  client: &Client,
  account: AccountId,
  token: TokenId,
) -> Result<bool, Error> {
  let info = client.account_info(&account).await?;
  Ok(info.token_relationships.contains_key(&token))
}

/// Balance of `token` held by `account`, zero when not associated.
pub async fn query_token_balance(
  client: &Client,
  account: AccountId,
  token: TokenId,
) -> Result<u64, Error> {
  let balance = client.account_balance(&account).await?;
  Ok(balance.tokens.get(&token).copied().unwrap_or_default())
}

pub async fn query_token_info(
  client: &Client,
  token: TokenId,
) -> Result<TokenInfo, Error> {
  Ok(client.token_info(&token).await?)
}
