use crate::PublicKey;

pub trait ToBase58String {
  fn to_b58(&self) -> String;
}

impl<const S: usize> ToBase58String for multihash::MultihashGeneric<S> {
  fn to_b58(&self) -> String {
    bs58::encode(self.to_bytes()).into_string()
  }
}

impl ToBase58String for PublicKey {
  fn to_b58(&self) -> String {
    bs58::encode(self.as_bytes()).into_string()
  }
}

/// Parses the base58 form of a public key produced by [`ToBase58String`].
pub fn public_key_from_b58(value: &str) -> Option<PublicKey> {
  let bytes = bs58::decode(value).into_vec().ok()?;
  PublicKey::from_bytes(&bytes).ok()
}

#[cfg(test)]
mod tests {
  use {super::*, crate::PrivateKey};

  #[test]
  fn public_key_b58_roundtrip() {
    let key = PrivateKey::generate().public_key();
    assert_eq!(public_key_from_b58(&key.to_b58()), Some(key));
    assert_eq!(public_key_from_b58("not base58!"), None);
    assert_eq!(public_key_from_b58("2g"), None);
  }
}
