use {
  serde::{Deserialize, Serialize},
  std::{
    fmt::{Debug, Display},
    str::FromStr,
  },
  thiserror::Error,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("Entity id '{0}' is not in the shard.realm.num format")]
  InvalidFormat(String),

  #[error("Entity id '{0}' has a non-numeric component")]
  InvalidNumber(String),
}

/// The `shard.realm.num` triple that identifies every entity on the
/// ledger. Accounts, tokens and topics share the same numbering space
/// and only differ by what lives under the number.
#[derive(
  Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EntityId {
  pub shard: u64,
  pub realm: u64,
  pub num: u64,
}

impl EntityId {
  pub const fn new(shard: u64, realm: u64, num: u64) -> Self {
    Self { shard, realm, num }
  }
}

impl Display for EntityId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}.{}.{}", self.shard, self.realm, self.num)
  }
}

impl Debug for EntityId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    Display::fmt(self, f)
  }
}

impl FromStr for EntityId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let mut parts = s.trim().split('.');
    let (Some(shard), Some(realm), Some(num), None) =
      (parts.next(), parts.next(), parts.next(), parts.next())
    else {
      return Err(Error::InvalidFormat(s.to_owned()));
    };

    let parse = |part: &str| {
      part
        .parse::<u64>()
        .map_err(|_| Error::InvalidNumber(s.to_owned()))
    };

    Ok(Self {
      shard: parse(shard)?,
      realm: parse(realm)?,
      num: parse(num)?,
    })
  }
}

macro_rules! entity_id {
  ($(#[$meta:meta])* $name:ident, $label:literal) => {
    $(#[$meta])*
    #[derive(
      Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    )]
    #[serde(into = "String", try_from = "String")]
    pub struct $name(EntityId);

    impl $name {
      pub const fn new(shard: u64, realm: u64, num: u64) -> Self {
        Self(EntityId::new(shard, realm, num))
      }

      pub fn entity(&self) -> EntityId {
        self.0
      }

      pub fn num(&self) -> u64 {
        self.0.num
      }
    }

    impl From<EntityId> for $name {
      fn from(id: EntityId) -> Self {
        Self(id)
      }
    }

    impl Display for $name {
      fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
      }
    }

    impl Debug for $name {
      fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, concat!($label, "({})"), self.0)
      }
    }

    impl FromStr for $name {
      type Err = Error;

      fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityId::from_str(s).map(Self)
      }
    }

    impl TryFrom<String> for $name {
      type Error = Error;

      fn try_from(value: String) -> Result<Self, Self::Error> {
        FromStr::from_str(&value)
      }
    }

    impl From<$name> for String {
      fn from(id: $name) -> Self {
        id.to_string()
      }
    }
  };
}

entity_id!(
  /// Identifies an account that holds native currency and token balances.
  AccountId,
  "account"
);

entity_id!(
  /// Assigned by the ledger when a token creation reaches consensus.
  TokenId,
  "token"
);

entity_id!(
  /// Assigned by the ledger when a topic creation reaches consensus.
  TopicId,
  "topic"
);
