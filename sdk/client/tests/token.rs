use {
  common::Network,
  tokenbench_primitives::{Status, SupplyType, TransactionBody},
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
    TransactionBuilder,
  },
};

mod common;

fn htt(decimals: u32) -> CreateTokenParams {
  CreateTokenParams {
    decimals,
    ..Default::default()
  }
}

#[tokio::test]
async fn created_token_reports_its_parameters() -> anyhow::Result<()> {
  let network = Network::with_accounts(2)?;
  let client = network.client(0)?;
  let first = network.accounts.resolve(0)?;
  let second = network.accounts.resolve(1)?;

  let receipt = create_token(&client, htt(2), first, second, first).await?;
  let token = receipt.token_id.expect("token id");

  let info = query_token_info(&client, token).await?;
  assert_eq!(info.name, "Test Token");
  assert_eq!(info.symbol, "HTT");
  assert_eq!(info.decimals, 2);
  assert_eq!(info.total_supply, 1000);
  assert_eq!(info.treasury, first.id);
  assert_eq!(query_token_balance(&client, first.id, token).await?, 1000);
  Ok(())
}

#[tokio::test]
async fn creation_fails_without_admin_signature() -> anyhow::Result<()> {
  let network = Network::with_accounts(3)?;
  let client = network.client(0)?;
  let first = network.accounts.resolve(0)?;
  let second = network.accounts.resolve(1)?;
  let third = network.accounts.resolve(2)?;

  // admin key belongs to third, who never signs
  let builder = TransactionBuilder::new(TransactionBody::TokenCreate {
    name: "Test Token".into(),
    symbol: "HTT".into(),
    decimals: 0,
    initial_supply: 10,
    treasury: first.id,
    admin_key: Some(third.public_key().into()),
    supply_key: Some(first.public_key().into()),
    supply_type: SupplyType::Infinite,
  })
  .sign_with(&second.key);

  let receipt = client.execute(builder).await?;
  assert_eq!(receipt.status, Status::InvalidSignature);
  assert_eq!(receipt.token_id, None);
  Ok(())
}

#[tokio::test]
async fn minting_grows_supply_by_exact_amount() -> anyhow::Result<()> {
  let network = Network::with_accounts(2)?;
  let client = network.client(0)?;
  let first = network.accounts.resolve(0)?;
  let second = network.accounts.resolve(1)?;

  let token = create_token(&client, htt(2), first, second, first)
    .await?
    .token_id
    .expect("token id");

  assert_eq!(mint_token(&client, token, 250, first).await?, Status::Success);
  assert_eq!(query_token_info(&client, token).await?.total_supply, 1250);

  // second does not hold the supply key, and pays for the attempt itself
  let err = mint_token(&network.client(1)?, token, 1, second)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::MintFailed { amount: 1, .. }));
  assert_eq!(err.status(), Some(Status::InvalidSignature));
  assert_eq!(query_token_info(&client, token).await?.total_supply, 1250);

  assert_eq!(burn_token(&client, token, 50, first).await?, Status::Success);
  assert_eq!(query_token_info(&client, token).await?.total_supply, 1200);
  Ok(())
}

#[tokio::test]
async fn operator_signature_counts_towards_supply_key() -> anyhow::Result<()> {
  let network = Network::with_accounts(2)?;
  let first = network.accounts.resolve(0)?;
  let second = network.accounts.resolve(1)?;

  let token = create_token(&network.client(0)?, htt(0), first, second, first)
    .await?
    .token_id
    .expect("token id");

  // first is both the operator and the supply key holder
  assert_eq!(
    mint_token(&network.client(0)?, token, 1, second).await?,
    Status::Success
  );

  let err = mint_token(&network.client(1)?, token, 1, second)
    .await
    .unwrap_err();
  assert_eq!(err.status(), Some(Status::InvalidSignature));
  assert_eq!(
    query_token_info(&network.client(0)?, token).await?.total_supply,
    1001
  );
  Ok(())
}

#[tokio::test]
async fn fixed_supply_token_refuses_mint() -> anyhow::Result<()> {
  let network = Network::with_accounts(2)?;
  let client = network.client(0)?;
  let first = network.accounts.resolve(0)?;
  let second = network.accounts.resolve(1)?;

  let params = CreateTokenParams {
    supply_type: SupplyType::Finite(1000),
    ..Default::default()
  };
  let token = create_token(&client, params, first, second, first)
    .await?
    .token_id
    .expect("token id");

  assert_eq!(query_token_info(&client, token).await?.total_supply, 1000);

  let err = mint_token(&client, token, 1, first).await.unwrap_err();
  assert_eq!(err.status(), Some(Status::TokenMaxSupplyReached));
  Ok(())
}

#[tokio::test]
async fn association_is_observable_and_not_idempotent() -> anyhow::Result<()> {
  let network = Network::with_accounts(2)?;
  let client = network.client(0)?;
  let first = network.accounts.resolve(0)?;
  let second = network.accounts.resolve(1)?;

  let token = create_token(&client, htt(0), first, second, first)
    .await?
    .token_id
    .expect("token id");

  assert!(!is_token_associated(&client, second.id, token).await?);
  assert_eq!(query_token_balance(&client, second.id, token).await?, 0);

  associate_token(&client, second.id, token, second).await?;
  assert!(is_token_associated(&client, second.id, token).await?);

  let err = associate_token(&client, second.id, token, second)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::AssociationFailed { .. }));
  assert_eq!(err.status(), Some(Status::TokenAlreadyAssociatedToAccount));
  Ok(())
}

#[tokio::test]
async fn transfer_moves_equal_and_opposite_amounts() -> anyhow::Result<()> {
  let network = Network::with_accounts(2)?;
  let client = network.client(0)?;
  let first = network.accounts.resolve(0)?;
  let second = network.accounts.resolve(1)?;

  let token = create_token(&client, htt(0), first, second, first)
    .await?
    .token_id
    .expect("token id");

  // not associated yet
  let err = transfer_token(&client, token, first, second.id, 10, first)
    .await
    .unwrap_err();
  assert_eq!(err.status(), Some(Status::TokenNotAssociatedToAccount));

  associate_token(&client, second.id, token, second).await?;

  for amount in [1, 10, 250] {
    let from = query_token_balance(&client, first.id, token).await?;
    let to = query_token_balance(&client, second.id, token).await?;

    transfer_token(&client, token, first, second.id, amount, first).await?;

    assert_eq!(
      query_token_balance(&client, first.id, token).await?,
      from - amount
    );
    assert_eq!(
      query_token_balance(&client, second.id, token).await?,
      to + amount
    );
  }

  let err = transfer_token(&client, token, second, first.id, 10_000, second)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::TransferFailed { .. }));
  assert_eq!(err.status(), Some(Status::InsufficientTokenBalance));
  Ok(())
}

#[tokio::test]
async fn multi_party_transfer_is_atomic() -> anyhow::Result<()> {
  let network = Network::with_accounts(4)?;
  let client = network.client(0)?;
  let accounts: Vec<_> = network.accounts.iter().collect();
  let [first, second, third, fourth] = accounts[..] else {
    unreachable!()
  };

  let token = create_token(&client, htt(0), first, second, first)
    .await?
    .token_id
    .expect("token id");

  for account in [second, third, fourth] {
    associate_token(&client, account.id, token, account).await?;
    transfer_token(&client, token, first, account.id, 100, first).await?;
  }
  burn_token(&client, token, 600, first).await?;

  transfer_token_multi(
    &client,
    token,
    &[(first.id, -10), (second.id, -10), (third.id, 15), (fourth.id, 5)],
    &[second],
  )
  .await?;

  let mut balances = vec![];
  for account in [first, second, third, fourth] {
    balances.push(query_token_balance(&client, account.id, token).await?);
  }
  assert_eq!(balances, [90, 90, 115, 105]);

  // second lacks 200, nothing moves
  let err = transfer_token_multi(
    &client,
    token,
    &[(first.id, -10), (second.id, -200), (third.id, 210)],
    &[second],
  )
  .await
  .unwrap_err();
  assert_eq!(err.status(), Some(Status::InsufficientTokenBalance));
  assert_eq!(query_token_balance(&client, first.id, token).await?, 90);
  assert_eq!(query_token_balance(&client, third.id, token).await?, 115);
  Ok(())
}
