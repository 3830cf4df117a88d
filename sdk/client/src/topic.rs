//! Consensus topic helpers.

use {
  crate::{
    error::settle,
    Account,
    Client,
    Error,
    QueryError,
    TransactionBuilder,
  },
  std::time::Duration,
  tokenbench_primitives::{
    Key,
    Receipt,
    TopicId,
    TopicInfo,
    TopicMessage,
    TransactionBody,
  },
  tracing::info,
};

/// How often the topic is polled while waiting for a message.
const MESSAGE_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Upper bound on waiting for a message when the client has no timeout.
const DEFAULT_MESSAGE_WAIT: Duration = Duration::from_secs(30);

/// Creates a topic. When `submit_key` is set only submissions satisfying
/// it are accepted, it may be a single key or a threshold key list.
pub async fn create_topic(
  client: &Client,
  memo: &str,
  submit_key: Option<Key>,
) -> Result<Receipt, Error> {
  let builder = TransactionBuilder::new(TransactionBody::TopicCreate {
    memo: memo.to_owned(),
    admin_key: None,
    submit_key,
  });

  let failed = |status| Error::TopicCreationFailed {
    memo: memo.to_owned(),
    status,
  };

  let receipt = settle(client.execute(builder).await, failed)?;
  match receipt.topic_id {
    Some(topic) => {
      info!("created topic {topic} with memo '{memo}'");
      Ok(receipt)
    }
    None => Err(failed(receipt.status)),
  }
}

/// Submits a message signed by `signers` in addition to the operator.
pub async fn submit_message(
  client: &Client,
  topic: TopicId,
  message: impl AsRef<[u8]>,
  signers: &[&Account],
) -> Result<Receipt, Error> {
  let builder = signers.iter().fold(
    TransactionBuilder::new(TransactionBody::TopicMessageSubmit {
      topic,
      message: message.as_ref().to_vec(),
    }),
    |builder, signer| builder.sign_with(&signer.key),
  );

  let receipt = settle(client.execute(builder).await, |status| {
    Error::SubmissionFailed { topic, status }
  })?;

  if let Some(sequence_number) = receipt.topic_sequence_number {
    info!("message #{sequence_number} submitted to {topic}");
  }
  Ok(receipt)
}

pub async fn query_topic_info(
  client: &Client,
  topic: TopicId,
) -> Result<TopicInfo, Error> {
  Ok(client.topic_info(&topic).await?)
}

/// Every message on `topic` in consensus order.
pub async fn topic_messages(
  client: &Client,
  topic: TopicId,
) -> Result<Vec<TopicMessage>, Error> {
  Ok(client.topic_messages(&topic).await?)
}

/// Waits until the message with `sequence_number` is visible on `topic`.
///
/// Bounded by the client timeout, or a default when it has none.
pub async fn await_message(
  client: &Client,
  topic: TopicId,
  sequence_number: u64,
) -> Result<TopicMessage, Error> {
  let limit = client.timeout().unwrap_or(DEFAULT_MESSAGE_WAIT);
  let wait = async {
    loop {
      let messages = client.topic_messages(&topic).await?;
      if let Some(message) = messages
        .into_iter()
        .find(|m| m.sequence_number == sequence_number)
      {
        return Ok::<_, QueryError>(message);
      }
      tokio::time::sleep(MESSAGE_POLL_INTERVAL).await;
    }
  };

  tokio::time::timeout(limit, wait)
    .await
    .map_err(|_| QueryError::Timeout(limit))?
    .map_err(Error::Query)
}
