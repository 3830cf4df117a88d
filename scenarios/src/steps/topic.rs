use {
  super::TopicKey,
  crate::ScenarioContext,
  anyhow::{bail, ensure, Context as _},
  tokenbench_primitives::{Key, KeyList},
  tokenbench_sdk::{
    topic::{
      await_message,
      create_topic,
      query_topic_info,
      submit_message,
    },
    Error,
  },
  tracing::info,
};

/// Builds a `threshold` of `total` key list from the keys of the first
/// `total` accounts.
pub fn threshold_key(
  ctx: &mut ScenarioContext,
  threshold: u32,
  total: usize,
) -> anyhow::Result<()> {
  let keys = (0..total)
    .map(|role| ctx.account(role).map(|a| Key::from(a.public_key())))
    .collect::<anyhow::Result<Vec<_>>>()?;

  let list = KeyList::with_threshold(keys, threshold)?;
  info!(
    "The {threshold}/{total} threshold key structure {}",
    Key::from(list.clone())
  );
  ctx.threshold_key = Some(list);
  Ok(())
}

pub async fn create(
  ctx: &mut ScenarioContext,
  memo: &str,
  submit_key: &TopicKey,
) -> anyhow::Result<()> {
  let submit_key: Key = match submit_key {
    TopicKey::Account(role) => ctx.account(*role)?.public_key().into(),
    TopicKey::Threshold => ctx
      .threshold_key
      .clone()
      .context("no threshold key was built in this scenario")?
      .into(),
  };

  let receipt =
    create_topic(ctx.client(), memo, Some(submit_key.clone())).await?;
  let topic = receipt.topic_id.context("receipt carries no topic id")?;

  let info = query_topic_info(ctx.client(), topic).await?;
  ensure!(info.memo == memo, "Topic memo is '{}', not '{memo}'", info.memo);
  ensure!(
    info.submit_key.as_ref() == Some(&submit_key),
    "Topic {topic} is not bound to the requested submit key"
  );

  info!("Created topic {topic}");
  ctx.topic = Some(topic);
  Ok(())
}

/// Publishes a message paid for and signed by the account playing
/// `role`.
pub async fn publish(
  ctx: &mut ScenarioContext,
  role: usize,
  message: &str,
) -> anyhow::Result<()> {
  let receipt =
    submit_message(&ctx.client_for(role)?, ctx.topic()?, message, &[]).await?;
  info!("Transaction Status: {}", receipt.status);
  ctx.last_sequence_number = receipt.topic_sequence_number;
  Ok(())
}

pub async fn publish_rejected(
  ctx: &ScenarioContext,
  role: usize,
  message: &str,
) -> anyhow::Result<()> {
  match submit_message(&ctx.client_for(role)?, ctx.topic()?, message, &[])
    .await
  {
    Err(Error::SubmissionFailed { status, .. }) => {
      info!("Submission rejected as expected: {status}");
      Ok(())
    }
    Ok(receipt) => bail!(
      "Submission by the {} account was accepted as message #{}",
      ctx.account(role)?.role,
      receipt.topic_sequence_number.unwrap_or_default()
    ),
    Err(e) => Err(e.into()),
  }
}

/// Waits for the last published message and checks its contents.
pub async fn received(
  ctx: &ScenarioContext,
  expected: &str,
) -> anyhow::Result<()> {
  let topic = ctx.topic()?;
  let sequence_number = ctx
    .last_sequence_number
    .context("no message was published in this scenario")?;

  let message = await_message(ctx.client(), topic, sequence_number).await?;
  let contents = message.contents_lossy();
  ensure!(
    contents == expected,
    "Message #{sequence_number} on {topic} is '{contents}', not '{expected}'"
  );

  info!("Received message #{sequence_number} on {topic}: {contents}");
  Ok(())
}
