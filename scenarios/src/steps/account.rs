use {
  crate::ScenarioContext,
  anyhow::ensure,
  futures::future::try_join_all,
  tokenbench_primitives::Hbar,
  tracing::info,
};

async fn hbars(ctx: &ScenarioContext, role: usize) -> anyhow::Result<Hbar> {
  let account = ctx.account(role)?;
  let balance = ctx.client().account_balance(&account.id).await?.hbars;
  info!("{} account {} holds {balance}", account.role, account.id);
  Ok(balance)
}

pub async fn exists(ctx: &ScenarioContext, role: usize) -> anyhow::Result<()> {
  hbars(ctx, role).await.map(|_| ())
}

pub async fn has_more_than(
  ctx: &ScenarioContext,
  role: usize,
  expected: i64,
) -> anyhow::Result<()> {
  let balance = hbars(ctx, role).await?;
  ensure!(
    balance > Hbar::new(expected),
    "{} account holds {balance}, expected more than {expected} hbar",
    ctx.account(role)?.role
  );
  Ok(())
}

pub async fn has_at_least(
  ctx: &ScenarioContext,
  role: usize,
  expected: i64,
) -> anyhow::Result<()> {
  let balance = hbars(ctx, role).await?;
  ensure!(
    balance >= Hbar::new(expected),
    "{} account holds {balance}, expected at least {expected} hbar",
    ctx.account(role)?.role
  );
  Ok(())
}

/// Records the hbar balance of every configured account.
pub async fn snapshot(ctx: &mut ScenarioContext) -> anyhow::Result<()> {
  let client = ctx.client();
  let balances = try_join_all(
    ctx
      .accounts()
      .iter()
      .map(|account| client.account_balance(&account.id)),
  )
  .await?;

  ctx.hbars_before = balances
    .into_iter()
    .map(|balance| (balance.account, balance.hbars))
    .collect();
  Ok(())
}

/// The account playing `role` is the only one whose hbar balance went
/// down since the last snapshot.
pub async fn paid_fee(
  ctx: &ScenarioContext,
  role: usize,
) -> anyhow::Result<()> {
  ensure!(
    !ctx.hbars_before.is_empty(),
    "no transaction was submitted in this scenario"
  );

  let payer = ctx.account(role)?;
  for (account, before) in &ctx.hbars_before {
    let after = ctx.client().account_balance(account).await?.hbars;
    if *account == payer.id {
      ensure!(
        after < *before,
        "{} account {account} was not charged: {before} before, {after} \
         after",
        payer.role
      );
      info!("{} account paid {} in fees", payer.role, *before - after);
    } else {
      ensure!(
        after >= *before,
        "account {account} was charged: {before} before, {after} after"
      );
    }
  }
  Ok(())
}
