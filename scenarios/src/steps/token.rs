use {
  crate::{context::PendingTransfer, ScenarioContext},
  anyhow::{bail, ensure, Context as _},
  std::cmp::Ordering,
  tokenbench_primitives::{SupplyType, TokenInfo},
  tokenbench_sdk::{
    token::{
      associate_token,
      burn_token,
      create_token,
      is_token_associated,
      mint_token,
      query_token_balance,
      query_token_info,
      transfer_token,
      transfer_token_multi,
      CreateTokenParams,
    },
    Error,
  },
  tracing::info,
};

const TREASURY: usize = 0;
const ADMIN: usize = 1;

/// Creates "Test Token" (HTT) with 2 decimals. The first account is
/// treasury and supply key holder, the second is admin.
async fn create_htt(
  ctx: &mut ScenarioContext,
  initial_supply: u64,
  supply_type: SupplyType,
) -> anyhow::Result<()> {
  let treasury = ctx.account(TREASURY)?;
  let admin = ctx.account(ADMIN)?;

  let params = CreateTokenParams {
    decimals: 2,
    initial_supply,
    supply_type,
    ..Default::default()
  };

  let receipt =
    create_token(ctx.client(), params, &treasury, &admin, &treasury).await?;
  let token = receipt.token_id.context("receipt carries no token id")?;
  info!("The new token ID is {token}");

  ctx.token = Some(token);
  Ok(())
}

/// Without a fixed supply the token starts with the default supply and
/// can be minted without bound.
pub async fn create(
  ctx: &mut ScenarioContext,
  fixed_supply: Option<u64>,
) -> anyhow::Result<()> {
  match fixed_supply {
    Some(supply) => create_htt(ctx, supply, SupplyType::Finite(supply)).await,
    None => {
      let supply = CreateTokenParams::default().initial_supply;
      create_htt(ctx, supply, SupplyType::Infinite).await
    }
  }
}

pub async fn with_supply(
  ctx: &mut ScenarioContext,
  supply: u64,
) -> anyhow::Result<()> {
  create_htt(ctx, supply, SupplyType::Infinite).await
}

async fn info(ctx: &ScenarioContext) -> anyhow::Result<TokenInfo> {
  Ok(query_token_info(ctx.client(), ctx.token()?).await?)
}

pub async fn has_name(ctx: &ScenarioContext, name: &str) -> anyhow::Result<()> {
  let info = info(ctx).await?;
  ensure!(info.name == name, "Token name is '{}', not '{name}'", info.name);
  Ok(())
}

pub async fn has_symbol(
  ctx: &ScenarioContext,
  symbol: &str,
) -> anyhow::Result<()> {
  let info = info(ctx).await?;
  ensure!(
    info.symbol == symbol,
    "Token symbol is '{}', not '{symbol}'",
    info.symbol
  );
  Ok(())
}

pub async fn has_decimals(
  ctx: &ScenarioContext,
  decimals: u32,
) -> anyhow::Result<()> {
  let info = info(ctx).await?;
  ensure!(
    info.decimals == decimals,
    "Token has {} decimals, not {decimals}",
    info.decimals
  );
  Ok(())
}

pub async fn owned_by_first(ctx: &ScenarioContext) -> anyhow::Result<()> {
  let info = info(ctx).await?;
  let owner = ctx.account(TREASURY)?;
  ensure!(
    info.treasury == owner.id,
    "Token treasury is {}, not the {} account {}",
    info.treasury,
    owner.role,
    owner.id
  );
  Ok(())
}

pub async fn total_supply(
  ctx: &ScenarioContext,
  supply: u64,
) -> anyhow::Result<()> {
  let info = info(ctx).await?;
  ensure!(
    info.total_supply == supply,
    "Token total supply is {}, not {supply}",
    info.total_supply
  );
  Ok(())
}

pub async fn mint_succeeds(
  ctx: &ScenarioContext,
  amount: u64,
) -> anyhow::Result<()> {
  let supply = ctx.account(TREASURY)?;
  let status = mint_token(ctx.client(), ctx.token()?, amount, &supply).await?;
  info!("The transaction consensus status {status}");
  Ok(())
}

pub async fn mint_fails(ctx: &ScenarioContext) -> anyhow::Result<()> {
  let supply = ctx.account(TREASURY)?;
  match mint_token(ctx.client(), ctx.token()?, 1, &supply).await {
    Err(Error::MintFailed { status, .. }) => {
      info!("Mint rejected as expected: {status}");
      Ok(())
    }
    Ok(status) => bail!("Mint was expected to fail but ended with {status}"),
    Err(e) => Err(e.into()),
  }
}

pub async fn should_hold(
  ctx: &ScenarioContext,
  role: usize,
  expected: u64,
) -> anyhow::Result<()> {
  let account = ctx.account(role)?;
  let balance =
    query_token_balance(ctx.client(), account.id, ctx.token()?).await?;
  ensure!(
    balance == expected,
    "{} account holds {balance} HTT, expected {expected}",
    account.role
  );
  Ok(())
}

/// Brings the HTT balance of the account playing `role` to exactly
/// `target`.
///
/// The treasury is adjusted by minting or burning. Any other account is
/// associated if needed, then topped up from freshly minted tokens or
/// drained into the treasury and the excess burned, so the balances of
/// other accounts are never disturbed.
pub async fn ensure_holds(
  ctx: &ScenarioContext,
  role: usize,
  target: u64,
) -> anyhow::Result<()> {
  let client = ctx.client();
  let token = ctx.token()?;
  let account = ctx.account(role)?;
  let info = query_token_info(client, token).await?;

  let supply_signer = ctx.account(TREASURY)?;
  let treasury = ctx
    .accounts()
    .iter()
    .find(|a| a.id == info.treasury)
    .cloned()
    .with_context(|| {
      format!("treasury {} is not a configured account", info.treasury)
    })?;

  if account.id != treasury.id
    && !is_token_associated(client, account.id, token).await?
  {
    associate_token(client, account.id, token, &account).await?;
  }

  let current = query_token_balance(client, account.id, token).await?;
  match (target.cmp(&current), account.id == treasury.id) {
    (Ordering::Equal, _) => {}
    (Ordering::Greater, true) => {
      mint_token(client, token, target - current, &supply_signer).await?;
    }
    (Ordering::Less, true) => {
      burn_token(client, token, current - target, &supply_signer).await?;
    }
    (Ordering::Greater, false) => {
      let missing = target - current;
      mint_token(client, token, missing, &supply_signer).await?;
      transfer_token(client, token, &treasury, account.id, missing, &treasury)
        .await?;
    }
    (Ordering::Less, false) => {
      let excess = current - target;
      transfer_token(client, token, &account, treasury.id, excess, &account)
        .await?;
      burn_token(client, token, excess, &supply_signer).await?;
    }
  }

  should_hold(ctx, role, target).await
}

pub fn create_transfer(
  ctx: &mut ScenarioContext,
  from: usize,
  to: usize,
  amount: u64,
) -> anyhow::Result<()> {
  let amount = i64::try_from(amount)?;
  let legs = vec![
    (ctx.account(from)?.id, -amount),
    (ctx.account(to)?.id, amount),
  ];
  ctx.pending = Some(PendingTransfer {
    legs,
    signers: vec![from],
  });
  Ok(())
}

/// Moves `out` tokens out of each of the first and second accounts and
/// splits them between the third and fourth.
pub fn create_multi_transfer(
  ctx: &mut ScenarioContext,
  out: u64,
  into_third: u64,
  into_fourth: u64,
) -> anyhow::Result<()> {
  let total_out = out.checked_mul(2).context("transfer amount overflows")?;
  let total_in = into_third
    .checked_add(into_fourth)
    .context("transfer amount overflows")?;
  ensure!(
    total_out == total_in,
    "{total_out} tokens out and {total_in} in do not balance"
  );

  let out = i64::try_from(out)?;
  let legs = vec![
    (ctx.account(0)?.id, -out),
    (ctx.account(1)?.id, -out),
    (ctx.account(2)?.id, i64::try_from(into_third)?),
    (ctx.account(3)?.id, i64::try_from(into_fourth)?),
  ];
  ctx.pending = Some(PendingTransfer {
    legs,
    signers: vec![0, 1],
  });
  Ok(())
}

/// Submits the pending transfer, paid for by the account playing `role`.
pub async fn submit(
  ctx: &mut ScenarioContext,
  role: usize,
) -> anyhow::Result<()> {
  let pending = ctx
    .pending
    .take()
    .context("no transaction was created in this scenario")?;

  super::account::snapshot(ctx).await?;

  let signers = pending
    .signers
    .iter()
    .map(|role| ctx.account(*role))
    .collect::<anyhow::Result<Vec<_>>>()?;
  let signers: Vec<_> = signers.iter().collect();

  let receipt = transfer_token_multi(
    &ctx.client_for(role)?,
    ctx.token()?,
    &pending.legs,
    &signers,
  )
  .await?;
  info!("Transfer {} status {}", receipt.transaction_id, receipt.status);
  Ok(())
}
