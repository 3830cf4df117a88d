use {
  serde::{Deserialize, Serialize},
  std::{
    fmt::Display,
    ops::{Add, Neg, Sub},
  },
};

/// Amount of the ledger's native currency, stored in tinybars.
#[derive(
  Debug,
  Default,
  Copy,
  Clone,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
)]
pub struct Hbar(i64);

impl Hbar {
  pub const TINYBARS_PER_HBAR: i64 = 100_000_000;
  pub const ZERO: Hbar = Hbar(0);

  /// Largest whole hbar amount representable in tinybars.
  pub const MAX_HBARS: i64 = i64::MAX / Self::TINYBARS_PER_HBAR;

  /// Converts whole hbars, saturating at the bounds of the tinybar
  /// range. Use [`Hbar::checked_new`] for amounts that are not known
  /// to fit.
  pub const fn new(hbars: i64) -> Self {
    Self(hbars.saturating_mul(Self::TINYBARS_PER_HBAR))
  }

  pub const fn checked_new(hbars: i64) -> Option<Self> {
    match hbars.checked_mul(Self::TINYBARS_PER_HBAR) {
      Some(tinybars) => Some(Self(tinybars)),
      None => None,
    }
  }

  pub const fn from_tinybars(tinybars: i64) -> Self {
    Self(tinybars)
  }

  pub const fn to_tinybars(self) -> i64 {
    self.0
  }

  pub fn checked_add(self, other: Hbar) -> Option<Hbar> {
    self.0.checked_add(other.0).map(Hbar)
  }

  pub fn checked_sub(self, other: Hbar) -> Option<Hbar> {
    self.0.checked_sub(other.0).map(Hbar)
  }
}

// operators saturate, the ledger uses the checked variants wherever an
// overflow has to be reported.
impl Add for Hbar {
  type Output = Hbar;

  fn add(self, rhs: Self) -> Self::Output {
    Hbar(self.0.saturating_add(rhs.0))
  }
}

impl Sub for Hbar {
  type Output = Hbar;

  fn sub(self, rhs: Self) -> Self::Output {
    Hbar(self.0.saturating_sub(rhs.0))
  }
}

impl Neg for Hbar {
  type Output = Hbar;

  fn neg(self) -> Self::Output {
    Hbar(self.0.saturating_neg())
  }
}

impl Display for Hbar {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let sign = if self.0 < 0 { "-" } else { "" };
    let abs = self.0.unsigned_abs();
    let whole = abs / Self::TINYBARS_PER_HBAR as u64;
    let frac = abs % Self::TINYBARS_PER_HBAR as u64;
    if frac == 0 {
      write!(f, "{sign}{whole} ℏ")
    } else {
      write!(f, "{sign}{whole}.{frac:08} ℏ")
    }
  }
}
