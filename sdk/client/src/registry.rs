use {
  crate::ConfigurationError,
  serde::Deserialize,
  std::{collections::HashSet, path::Path},
  tokenbench_primitives::{AccountId, PrivateKey, PublicKey},
  tracing::info,
};

const ROLES: [&str; 10] = [
  "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth",
  "ninth", "tenth",
];

/// One entry of the accounts configuration file, as written on disk.
///
/// ```json
/// [{ "id": "0.0.1001", "privateKey": "302e020100300506032b6570..." }]
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountEntry {
  pub id: String,
  pub private_key: String,
}

/// A preconfigured ledger account and the key that controls it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
  pub id: AccountId,
  pub key: PrivateKey,
  pub role: String,
}

impl Account {
  pub fn public_key(&self) -> PublicKey {
    self.key.public_key()
  }
}

/// Logical name of the account at `index`: "first", "second", ...
pub fn role_name(index: usize) -> String {
  ROLES
    .get(index)
    .map(|role| role.to_string())
    .unwrap_or_else(|| format!("account{}", index + 1))
}

/// The fixed set of accounts scenarios run with.
///
/// Loaded once at startup and never mutated. Any malformed entry fails
/// the whole load, so a registry that exists is always fully valid.
#[derive(Debug, Clone)]
pub struct AccountRegistry {
  accounts: Vec<Account>,
}

impl AccountRegistry {
  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
    let path = path.as_ref();
    let contents =
      std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
        path: path.to_owned(),
        source,
      })?;
    let registry = Self::from_json(&contents)?;
    info!("loaded {} accounts from {path:?}", registry.len());
    Ok(registry)
  }

  pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
    Self::from_entries(serde_json::from_str::<Vec<AccountEntry>>(json)?)
  }

  pub fn from_entries(
    entries: impl IntoIterator<Item = AccountEntry>,
  ) -> Result<Self, ConfigurationError> {
    let mut seen = HashSet::new();
    let mut accounts = vec![];

    for (index, entry) in entries.into_iter().enumerate() {
      let id: AccountId = entry.id.parse().map_err(|source| {
        ConfigurationError::InvalidId {
          index,
          value: entry.id.clone(),
          source,
        }
      })?;

      let key: PrivateKey = entry.private_key.parse().map_err(|source| {
        ConfigurationError::InvalidKey { index, id, source }
      })?;

      if !seen.insert(id) {
        return Err(ConfigurationError::DuplicateAccount(id));
      }

      accounts.push(Account {
        id,
        key,
        role: role_name(index),
      });
    }

    if accounts.is_empty() {
      return Err(ConfigurationError::Empty);
    }

    Ok(Self { accounts })
  }

  /// Builds a registry from accounts that already exist, assigning
  /// roles by position.
  pub fn from_keys(
    accounts: impl IntoIterator<Item = (AccountId, PrivateKey)>,
  ) -> Result<Self, ConfigurationError> {
    let mut seen = HashSet::new();
    let accounts: Vec<_> = accounts
      .into_iter()
      .enumerate()
      .map(|(index, (id, key))| match seen.insert(id) {
        true => Ok(Account {
          id,
          key,
          role: role_name(index),
        }),
        false => Err(ConfigurationError::DuplicateAccount(id)),
      })
      .collect::<Result<_, _>>()?;

    if accounts.is_empty() {
      return Err(ConfigurationError::Empty);
    }
    Ok(Self { accounts })
  }

  pub fn resolve(&self, index: usize) -> Result<&Account, ConfigurationError> {
    self
      .accounts
      .get(index)
      .ok_or(ConfigurationError::MissingAccount(index))
  }

  pub fn resolve_role(&self, role: &str) -> Result<&Account, ConfigurationError> {
    let role = role.trim().to_ascii_lowercase();
    self
      .accounts
      .iter()
      .find(|account| account.role == role)
      .ok_or(ConfigurationError::UnknownRole(role))
  }

  pub fn len(&self) -> usize {
    self.accounts.len()
  }

  pub fn is_empty(&self) -> bool {
    self.accounts.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Account> {
    self.accounts.iter()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn entry(id: &str, key: &PrivateKey) -> AccountEntry {
    AccountEntry {
      id: id.into(),
      private_key: key.to_der_string(),
    }
  }

  #[test]
  fn loads_accounts_by_position() -> anyhow::Result<()> {
    let first = PrivateKey::generate();
    let second = PrivateKey::generate();
    let json = format!(
      r#"[
        {{ "id": "0.0.1001", "privateKey": "{}" }},
        {{ "id": "0.0.1002", "privateKey": "{}" }}
      ]"#,
      first.to_der_string(),
      hex_seed(&second),
    );

    let registry = AccountRegistry::from_json(&json)?;
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.resolve(0)?.id, AccountId::new(0, 0, 1001));
    assert_eq!(registry.resolve(0)?.key, first);
    assert_eq!(registry.resolve_role("Second")?.key, second);
    assert_eq!(registry.resolve(1)?.role, "second");
    assert!(matches!(
      registry.resolve(2),
      Err(ConfigurationError::MissingAccount(2))
    ));
    Ok(())
  }

  fn hex_seed(key: &PrivateKey) -> String {
    // raw seed without the DER envelope
    key.to_der_string()["302e020100300506032b657004220420".len()..].to_owned()
  }

  #[test]
  fn malformed_entries_fail_the_load() {
    let key = PrivateKey::generate();

    assert!(matches!(
      AccountRegistry::from_entries([entry("0.0", &key)]),
      Err(ConfigurationError::InvalidId { index: 0, .. })
    ));

    assert!(matches!(
      AccountRegistry::from_entries([
        entry("0.0.1001", &key),
        AccountEntry {
          id: "0.0.1002".into(),
          private_key: "not-a-key".into(),
        }
      ]),
      Err(ConfigurationError::InvalidKey { index: 1, .. })
    ));

    assert!(matches!(
      AccountRegistry::from_entries([
        entry("0.0.1001", &key),
        entry("0.0.1001", &key)
      ]),
      Err(ConfigurationError::DuplicateAccount(_))
    ));

    assert!(matches!(
      AccountRegistry::from_entries(Vec::<AccountEntry>::new()),
      Err(ConfigurationError::Empty)
    ));

    assert!(matches!(
      AccountRegistry::from_json("{ not json"),
      Err(ConfigurationError::Json(_))
    ));
  }

  #[test]
  fn roles_follow_position() {
    assert_eq!(role_name(0), "first");
    assert_eq!(role_name(3), "fourth");
    assert_eq!(role_name(12), "account13");
  }
}
