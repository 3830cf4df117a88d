use {
  common::{signed, submit, wallet},
  tokenbench_ledger::{Error, InMemoryLedger, Ledger},
  tokenbench_primitives::{
    Key,
    KeyList,
    Status,
    TopicId,
    TransactionBody,
  },
};

mod common;

fn message(topic: TopicId, text: &str) -> TransactionBody {
  TransactionBody::TopicMessageSubmit {
    topic,
    message: text.as_bytes().to_vec(),
  }
}

#[tokio::test]
async fn submit_key_gates_messages() -> anyhow::Result<()> {
  let ledger = InMemoryLedger::default();
  let first = wallet(&ledger, 100);
  let second = wallet(&ledger, 100);

  let receipt = submit(
    &ledger,
    signed(
      &first,
      TransactionBody::TopicCreate {
        memo: "test topic".into(),
        admin_key: None,
        submit_key: Some(Key::from(&first.key)),
      },
      &[],
    ),
  )
  .await?;
  assert_eq!(receipt.status, Status::Success);
  let topic = receipt.topic_id.expect("topic id in receipt");

  let info = ledger.topic_info(&topic).await?;
  assert_eq!(info.memo, "test topic");
  assert_eq!(info.sequence_number, 0);

  let receipt = submit(&ledger, signed(&first, message(topic, "hello"), &[]))
    .await?;
  assert_eq!(receipt.status, Status::Success);
  assert_eq!(receipt.topic_sequence_number, Some(1));

  let receipt = submit(&ledger, signed(&second, message(topic, "spoof"), &[]))
    .await?;
  assert_eq!(receipt.status, Status::InvalidSignature);

  let receipt = submit(&ledger, signed(&first, message(topic, "again"), &[]))
    .await?;
  assert_eq!(receipt.topic_sequence_number, Some(2));

  let messages = ledger.topic_messages(&topic).await?;
  assert_eq!(messages.len(), 2);
  assert_eq!(messages[0].contents_lossy(), "hello");
  assert_eq!(messages[1].contents_lossy(), "again");
  assert!(messages[0].consensus_timestamp < messages[1].consensus_timestamp);
  Ok(())
}

#[tokio::test]
async fn threshold_submit_key() -> anyhow::Result<()> {
  let ledger = InMemoryLedger::default();
  let first = wallet(&ledger, 100);
  let second = wallet(&ledger, 100);
  let outsider = wallet(&ledger, 100);

  let submit_key = KeyList::with_threshold(
    vec![Key::from(&first.key), Key::from(&second.key)],
    1,
  )?;

  let receipt = submit(
    &ledger,
    signed(
      &first,
      TransactionBody::TopicCreate {
        memo: "1-of-2".into(),
        admin_key: None,
        submit_key: Some(submit_key.into()),
      },
      &[],
    ),
  )
  .await?;
  let topic = receipt.topic_id.expect("topic id in receipt");

  // either member alone satisfies the threshold
  for w in [&first, &second] {
    let receipt =
      submit(&ledger, signed(w, message(topic, "member"), &[])).await?;
    assert_eq!(receipt.status, Status::Success);
  }

  let receipt =
    submit(&ledger, signed(&outsider, message(topic, "outsider"), &[])).await?;
  assert_eq!(receipt.status, Status::InvalidSignature);
  assert_eq!(ledger.topic_messages(&topic).await?.len(), 2);
  Ok(())
}

#[tokio::test]
async fn empty_and_oversized_messages_are_rejected() -> anyhow::Result<()> {
  let ledger = InMemoryLedger::default();
  let first = wallet(&ledger, 100);
  let max = ledger.config().max_message_size;

  let receipt = submit(
    &ledger,
    signed(
      &first,
      TransactionBody::TopicCreate {
        memo: String::new(),
        admin_key: None,
        submit_key: None,
      },
      &[],
    ),
  )
  .await?;
  let topic = receipt.topic_id.expect("topic id in receipt");

  let receipt =
    submit(&ledger, signed(&first, message(topic, ""), &[])).await?;
  assert_eq!(receipt.status, Status::InvalidTopicMessage);

  let receipt = submit(
    &ledger,
    signed(&first, message(topic, &"x".repeat(max + 1)), &[]),
  )
  .await?;
  assert_eq!(receipt.status, Status::MessageSizeTooLarge);

  assert!(ledger.topic_messages(&topic).await?.is_empty());
  assert!(matches!(
    ledger.topic_messages(&TopicId::new(0, 0, 99)).await,
    Err(Error::NotFound(_))
  ));
  Ok(())
}
