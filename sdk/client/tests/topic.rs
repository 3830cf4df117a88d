use {
  common::Network,
  tokenbench_primitives::{Key, KeyList, Status},
  tokenbench_sdk::{
    topic::{
      await_message,
      create_topic,
      query_topic_info,
      submit_message,
      topic_messages,
    },
    Error,
  },
};

mod common;

#[tokio::test]
async fn single_key_topic_accepts_only_its_key() -> anyhow::Result<()> {
  let network = Network::with_accounts(2)?;
  let first = network.accounts.resolve(0)?;
  let first_client = network.client(0)?;
  let second_client = network.client(1)?;

  let topic = create_topic(
    &first_client,
    "topic memo",
    Some(first.public_key().into()),
  )
  .await?
  .topic_id
  .expect("topic id");

  let info = query_topic_info(&first_client, topic).await?;
  assert_eq!(info.memo, "topic memo");
  assert_eq!(info.submit_key, Some(first.public_key().into()));

  let receipt = submit_message(&first_client, topic, "hello", &[]).await?;
  assert_eq!(receipt.topic_sequence_number, Some(1));

  let message = await_message(&first_client, topic, 1).await?;
  assert_eq!(message.contents_lossy(), "hello");

  let err = submit_message(&second_client, topic, "intruder", &[])
    .await
    .unwrap_err();
  assert!(matches!(err, Error::SubmissionFailed { .. }));
  assert_eq!(err.status(), Some(Status::InvalidSignature));
  assert_eq!(topic_messages(&first_client, topic).await?.len(), 1);
  Ok(())
}

#[tokio::test]
async fn threshold_topic_accepts_either_member() -> anyhow::Result<()> {
  let network = Network::with_accounts(3)?;
  let first = network.accounts.resolve(0)?;
  let second = network.accounts.resolve(1)?;

  let submit_key: Key = KeyList::with_threshold(
    [first.public_key().into(), second.public_key().into()],
    1,
  )?
  .into();

  let topic = create_topic(&network.client(0)?, "", Some(submit_key))
    .await?
    .topic_id
    .expect("topic id");

  // each member pays and signs alone
  for index in 0..2 {
    submit_message(&network.client(index)?, topic, "member", &[]).await?;
  }

  // the third account is outside the key list
  let err = submit_message(&network.client(2)?, topic, "outsider", &[])
    .await
    .unwrap_err();
  assert_eq!(err.status(), Some(Status::InvalidSignature));

  // an outsider paying, with a member co-signing, is accepted
  let receipt =
    submit_message(&network.client(2)?, topic, "co-signed", &[second]).await?;
  assert_eq!(receipt.topic_sequence_number, Some(3));

  let sequence: Vec<_> = topic_messages(&network.client(0)?, topic)
    .await?
    .into_iter()
    .map(|m| m.sequence_number)
    .collect();
  assert_eq!(sequence, [1, 2, 3]);
  Ok(())
}

#[tokio::test]
async fn oversized_message_is_rejected() -> anyhow::Result<()> {
  let network = Network::with_accounts(1)?;
  let client = network.client(0)?;
  let max = network.ledger.config().max_message_size;

  let topic = create_topic(&client, "", None)
    .await?
    .topic_id
    .expect("topic id");

  let err = submit_message(&client, topic, vec![7u8; max + 1], &[])
    .await
    .unwrap_err();
  assert_eq!(err.status(), Some(Status::MessageSizeTooLarge));
  Ok(())
}
