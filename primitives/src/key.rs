use {
  ed25519_dalek::{Keypair, SecretKey, Signature, Signer, Verifier},
  serde::{Deserialize, Serialize},
  std::{
    collections::BTreeSet,
    fmt::{Debug, Display},
    str::FromStr,
  },
  thiserror::Error,
};

/// PKCS#8 prefix of a DER-encoded ED25519 private key.
const DER_PRIVATE_PREFIX: &str = "302e020100300506032b657004220420";

/// SubjectPublicKeyInfo prefix of a DER-encoded ED25519 public key.
const DER_PUBLIC_PREFIX: &str = "302a300506032b6570032100";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
  #[error("Key string is not valid hex: {0}")]
  InvalidHex(#[from] hex::FromHexError),

  #[error("Expected a 32 byte raw or DER encoded ED25519 key, got {0} bytes")]
  InvalidLength(usize),

  #[error("Invalid ED25519 key material: {0}")]
  InvalidKey(String),

  #[error("Threshold {threshold} is out of range for a key list of {size}")]
  InvalidThreshold { threshold: u32, size: usize },

  #[error("Key list must contain at least one key")]
  EmptyKeyList,
}

/// An ED25519 public key.
#[derive(
  Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PublicKey([u8; 32]);

impl PublicKey {
  pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
    let key = ed25519_dalek::PublicKey::from_bytes(bytes)
      .map_err(|e| Error::InvalidKey(e.to_string()))?;
    Ok(Self(key.to_bytes()))
  }

  pub fn as_bytes(&self) -> &[u8; 32] {
    &self.0
  }

  /// Checks an ED25519 signature over `message`. Malformed signature
  /// bytes are reported as an invalid signature.
  pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
    let Ok(key) = ed25519_dalek::PublicKey::from_bytes(&self.0) else {
      return false;
    };
    let Ok(signature) = Signature::try_from(signature) else {
      return false;
    };
    key.verify(message, &signature).is_ok()
  }

  pub fn to_der_string(&self) -> String {
    format!("{DER_PUBLIC_PREFIX}{}", hex::encode(self.0))
  }
}

impl Display for PublicKey {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.to_der_string())
  }
}

impl Debug for PublicKey {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "pubkey({})", hex::encode(self.0))
  }
}

impl FromStr for PublicKey {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim().trim_start_matches("0x");
    let s = s.strip_prefix(DER_PUBLIC_PREFIX).unwrap_or(s);
    Self::from_bytes(&hex::decode(s)?)
  }
}

/// An ED25519 private key.
///
/// Accepts the two string encodings used by ledger tooling: a bare
/// 32 byte hex seed, or the same seed wrapped in a PKCS#8 DER envelope.
#[derive(Clone)]
pub struct PrivateKey {
  seed: [u8; 32],
  public: PublicKey,
}

impl PrivateKey {
  pub fn generate() -> Self {
    let secret = SecretKey::generate(&mut rand::rngs::OsRng);
    Self::from_secret(&secret)
  }

  pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
    if bytes.len() != 32 {
      return Err(Error::InvalidLength(bytes.len()));
    }
    let secret = SecretKey::from_bytes(bytes)
      .map_err(|e| Error::InvalidKey(e.to_string()))?;
    Ok(Self::from_secret(&secret))
  }

  fn from_secret(secret: &SecretKey) -> Self {
    let public = ed25519_dalek::PublicKey::from(secret);
    Self {
      seed: secret.to_bytes(),
      public: PublicKey(public.to_bytes()),
    }
  }

  pub fn public_key(&self) -> PublicKey {
    self.public
  }

  pub fn sign(&self, message: &[u8]) -> Vec<u8> {
    let secret = SecretKey::from_bytes(&self.seed)
      .expect("seed validated at construction");
    let public = ed25519_dalek::PublicKey::from(&secret);
    Keypair { secret, public }.sign(message).to_bytes().to_vec()
  }

  pub fn to_der_string(&self) -> String {
    format!("{DER_PRIVATE_PREFIX}{}", hex::encode(self.seed))
  }
}

impl FromStr for PrivateKey {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim().trim_start_matches("0x");
    let s = s.strip_prefix(DER_PRIVATE_PREFIX).unwrap_or(s);
    Self::from_bytes(&hex::decode(s)?)
  }
}

impl Debug for PrivateKey {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "privkey(public: {})", hex::encode(self.public.0))
  }
}

impl PartialEq for PrivateKey {
  fn eq(&self, other: &Self) -> bool {
    self.public == other.public
  }
}

impl Eq for PrivateKey {}

/// A signing policy attached to accounts, tokens and topics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
  Ed25519(PublicKey),
  List(KeyList),
}

/// A list of keys with an optional threshold.
///
/// Without a threshold every key in the list must sign. With a threshold
/// of `n`, any `n` of the listed keys are enough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyList {
  pub keys: Vec<Key>,
  pub threshold: Option<u32>,
}

impl KeyList {
  pub fn new(keys: impl IntoIterator<Item = Key>) -> Result<Self, Error> {
    let keys: Vec<_> = keys.into_iter().collect();
    if keys.is_empty() {
      return Err(Error::EmptyKeyList);
    }
    Ok(Self {
      keys,
      threshold: None,
    })
  }

  pub fn with_threshold(
    keys: impl IntoIterator<Item = Key>,
    threshold: u32,
  ) -> Result<Self, Error> {
    let list = Self {
      threshold: Some(threshold),
      ..Self::new(keys)?
    };
    list.validate()?;
    Ok(list)
  }

  fn required(&self) -> usize {
    self
      .threshold
      .map(|t| t as usize)
      .unwrap_or(self.keys.len())
  }

  fn validate(&self) -> Result<(), Error> {
    if self.keys.is_empty() {
      return Err(Error::EmptyKeyList);
    }
    if let Some(threshold) = self.threshold {
      if threshold == 0 || threshold as usize > self.keys.len() {
        return Err(Error::InvalidThreshold {
          threshold,
          size: self.keys.len(),
        });
      }
    }
    self.keys.iter().try_for_each(Key::validate)
  }
}

impl Key {
  /// True when the given set of signers satisfies this policy.
  pub fn is_satisfied_by(&self, signers: &BTreeSet<PublicKey>) -> bool {
    match self {
      Key::Ed25519(key) => signers.contains(key),
      Key::List(list) => {
        list
          .keys
          .iter()
          .filter(|key| key.is_satisfied_by(signers))
          .count()
          >= list.required()
      }
    }
  }

  /// Recursively checks that every nested list is non-empty and that
  /// every threshold lies within `1..=len`.
  pub fn validate(&self) -> Result<(), Error> {
    match self {
      Key::Ed25519(_) => Ok(()),
      Key::List(list) => list.validate(),
    }
  }
}

impl From<PublicKey> for Key {
  fn from(key: PublicKey) -> Self {
    Key::Ed25519(key)
  }
}

impl From<&PrivateKey> for Key {
  fn from(key: &PrivateKey) -> Self {
    Key::Ed25519(key.public_key())
  }
}

impl From<KeyList> for Key {
  fn from(list: KeyList) -> Self {
    Key::List(list)
  }
}

impl Display for Key {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Key::Ed25519(key) => write!(f, "{key}"),
      Key::List(list) => {
        match list.threshold {
          Some(t) => write!(f, "{t}-of-{}[", list.keys.len())?,
          None => write!(f, "all-of-{}[", list.keys.len())?,
        }
        for (i, key) in list.keys.iter().enumerate() {
          if i != 0 {
            write!(f, ", ")?;
          }
          write!(f, "{key}")?;
        }
        write!(f, "]")
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const SEED: &str =
    "db484b828e64b2d8f12ce3c0a0e93a0b8cce7af1bb8f39c97732394482538e10";

  #[test]
  fn private_key_encodings() -> anyhow::Result<()> {
    let raw: PrivateKey = SEED.parse()?;
    let der: PrivateKey = format!("{DER_PRIVATE_PREFIX}{SEED}").parse()?;
    let prefixed: PrivateKey = format!("0x{SEED}").parse()?;

    assert_eq!(raw, der);
    assert_eq!(raw, prefixed);
    assert_eq!(der.to_der_string(), format!("{DER_PRIVATE_PREFIX}{SEED}"));
    assert!(!format!("{raw:?}").contains(SEED));

    assert_eq!(
      "abcd".parse::<PrivateKey>(),
      Err(Error::InvalidLength(2))
    );
    assert_eq!(
      "zz".parse::<PrivateKey>(),
      Err(Error::InvalidHex(hex::FromHexError::InvalidHexCharacter {
        c: 'z',
        index: 0
      }))
    );
    Ok(())
  }

  #[test]
  fn public_key_roundtrips_through_der() -> anyhow::Result<()> {
    let key = PrivateKey::generate().public_key();
    assert_eq!(key.to_der_string().parse::<PublicKey>()?, key);
    Ok(())
  }

  #[test]
  fn signatures_verify_only_for_signer() {
    let alice = PrivateKey::generate();
    let bob = PrivateKey::generate();

    let signature = alice.sign(b"hello");
    assert!(alice.public_key().verify(b"hello", &signature));
    assert!(!alice.public_key().verify(b"other", &signature));
    assert!(!bob.public_key().verify(b"hello", &signature));
    assert!(!alice.public_key().verify(b"hello", &[1, 2, 3]));
  }

  #[test]
  fn threshold_key_satisfaction() -> anyhow::Result<()> {
    let first = PrivateKey::generate();
    let second = PrivateKey::generate();
    let outsider = PrivateKey::generate();

    let one_of_two: Key =
      KeyList::with_threshold([Key::from(&first), Key::from(&second)], 1)?
        .into();
    let all_of_two: Key =
      KeyList::new([Key::from(&first), Key::from(&second)])?.into();

    let only_first = BTreeSet::from([first.public_key()]);
    let only_second = BTreeSet::from([second.public_key()]);
    let both = BTreeSet::from([first.public_key(), second.public_key()]);
    let outside = BTreeSet::from([outsider.public_key()]);

    assert!(one_of_two.is_satisfied_by(&only_first));
    assert!(one_of_two.is_satisfied_by(&only_second));
    assert!(!one_of_two.is_satisfied_by(&outside));

    assert!(!all_of_two.is_satisfied_by(&only_first));
    assert!(all_of_two.is_satisfied_by(&both));
    Ok(())
  }

  #[test]
  fn invalid_thresholds_are_rejected() {
    let key = Key::from(&PrivateKey::generate());
    assert_eq!(
      KeyList::with_threshold([key.clone()], 2),
      Err(Error::InvalidThreshold {
        threshold: 2,
        size: 1
      })
    );
    assert_eq!(
      KeyList::with_threshold([key], 0),
      Err(Error::InvalidThreshold {
        threshold: 0,
        size: 1
      })
    );
    assert_eq!(KeyList::new(Vec::new()), Err(Error::EmptyKeyList));
  }
}
