use {
  std::collections::{BTreeMap, HashMap},
  tokenbench_primitives::{
    AccountId,
    Hbar,
    Key,
    TokenId,
    TokenInfo,
    TopicId,
    TopicInfo,
    TopicMessage,
  },
};

/// Ledger-side record of an account.
///
/// A token appears in `tokens` once the account is associated with it,
/// even while the balance is zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
  pub key: Key,
  pub balance: Hbar,
  pub tokens: BTreeMap<TokenId, u64>,
}

impl AccountRecord {
  pub fn new(key: Key, balance: Hbar) -> Self {
    Self {
      key,
      balance,
      tokens: BTreeMap::new(),
    }
  }
}

/// Represents a change in ledger state produced by one transaction.
///
/// A handled transaction either yields a diff that is applied in full,
/// or a failure status and no diff at all, so no partially applied
/// transaction is ever observable.
#[derive(Debug, Clone, Default)]
pub struct StateDiff {
  accounts: BTreeMap<AccountId, AccountRecord>,
  tokens: BTreeMap<TokenId, TokenInfo>,
  topics: BTreeMap<TopicId, TopicInfo>,
  messages: Vec<TopicMessage>,
}

impl StateDiff {
  pub fn set_account(&mut self, id: AccountId, record: AccountRecord) {
    self.accounts.insert(id, record);
  }

  pub fn set_token(&mut self, info: TokenInfo) {
    self.tokens.insert(info.token, info);
  }

  pub fn set_topic(&mut self, info: TopicInfo) {
    self.topics.insert(info.topic, info);
  }

  pub fn push_message(&mut self, message: TopicMessage) {
    self.messages.push(message);
  }

  /// Merges a state diff with a newer diff.
  ///
  /// Applying the resulting diff is equivalent to applying the two
  /// merged diffs consecutively on any state store.
  pub fn merge(self, newer: StateDiff) -> StateDiff {
    let mut merged = self;
    merged.accounts.extend(newer.accounts);
    merged.tokens.extend(newer.tokens);
    merged.topics.extend(newer.topics);
    merged.messages.extend(newer.messages);
    merged
  }

  /// Reads an account through this diff, falling back to `base`.
  pub fn account_or(
    &self,
    base: &impl State,
    id: &AccountId,
  ) -> Option<AccountRecord> {
    self.account(id).or_else(|| base.account(id))
  }
}

impl State for StateDiff {
  fn account(&self, id: &AccountId) -> Option<AccountRecord> {
    self.accounts.get(id).cloned()
  }

  fn token(&self, id: &TokenId) -> Option<TokenInfo> {
    self.tokens.get(id).cloned()
  }

  fn topic(&self, id: &TopicId) -> Option<TopicInfo> {
    self.topics.get(id).cloned()
  }

  fn apply(&mut self, diff: StateDiff) {
    *self = std::mem::take(self).merge(diff);
  }
}

pub trait State {
  fn account(&self, id: &AccountId) -> Option<AccountRecord>;
  fn token(&self, id: &TokenId) -> Option<TokenInfo>;
  fn topic(&self, id: &TopicId) -> Option<TopicInfo>;
  fn apply(&mut self, diff: StateDiff);
}

#[derive(Debug, Default)]
pub struct InMemoryState {
  accounts: HashMap<AccountId, AccountRecord>,
  tokens: HashMap<TokenId, TokenInfo>,
  topics: HashMap<TopicId, TopicInfo>,
  messages: HashMap<TopicId, Vec<TopicMessage>>,
}

impl InMemoryState {
  pub fn messages(&self, topic: &TopicId) -> &[TopicMessage] {
    self
      .messages
      .get(topic)
      .map(Vec::as_slice)
      .unwrap_or_default()
  }
}

impl State for InMemoryState {
  fn account(&self, id: &AccountId) -> Option<AccountRecord> {
    self.accounts.get(id).cloned()
  }

  fn token(&self, id: &TokenId) -> Option<TokenInfo> {
    self.tokens.get(id).cloned()
  }

  fn topic(&self, id: &TopicId) -> Option<TopicInfo> {
    self.topics.get(id).cloned()
  }

  fn apply(&mut self, diff: StateDiff) {
    self.accounts.extend(diff.accounts);
    self.tokens.extend(diff.tokens);
    self.topics.extend(diff.topics);
    for message in diff.messages {
      self.messages.entry(message.topic).or_default().push(message);
    }
  }
}
