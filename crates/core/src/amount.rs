//! Fixed-point monetary amounts.
//!
//! Journal amounts are entered and stored with four decimal places, so an
//! [`Amount`] is an integer count of ten-thousandths. Integer arithmetic keeps
//! per-side totals and their difference exact; there is no floating point
//! anywhere in the balance path.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Neg, Sub};
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DomainError;
use crate::value_object::ValueObject;

/// Number of decimal places carried by an [`Amount`].
pub const SCALE: u32 = 4;

const UNIT: i128 = 10_000;

/// A monetary amount with four decimal places, stored as a scaled integer.
///
/// Parsed values are always non-negative (entry fields are unsigned), but the
/// type itself is signed: differences and derived balances can go below zero.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(i128);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Amount from whole currency units.
    pub fn from_major(units: i64) -> Self {
        Self(i128::from(units) * UNIT)
    }

    /// Amount from ten-thousandths (the raw scaled representation).
    pub const fn from_scaled(scaled: i128) -> Self {
        Self(scaled)
    }

    pub const fn as_scaled(self) -> i128 {
        self.0
    }

    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl ValueObject for Amount {}

impl FromStr for Amount {
    type Err = DomainError;

    /// Parses an unsigned decimal with at most [`SCALE`] fractional digits.
    ///
    /// Signs, exponents, grouping separators and empty strings are rejected;
    /// callers that want "blank means zero" handle that before parsing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::invalid_amount("empty amount"));
        }
        if s.starts_with('+') || s.starts_with('-') {
            return Err(DomainError::invalid_amount(format!(
                "amount must be unsigned: {s:?}"
            )));
        }

        let (int_part, frac_part) = match s.split_once('.') {
            Some((i, f)) => (i, f),
            None => (s, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(DomainError::invalid_amount(format!("not a number: {s:?}")));
        }
        if frac_part.len() > SCALE as usize {
            return Err(DomainError::invalid_amount(format!(
                "more than {SCALE} decimal places: {s:?}"
            )));
        }

        let mut scaled: i128 = 0;
        for c in int_part.chars() {
            let digit = c
                .to_digit(10)
                .ok_or_else(|| DomainError::invalid_amount(format!("not a number: {s:?}")))?;
            scaled = scaled
                .checked_mul(10)
                .and_then(|v| v.checked_add(i128::from(digit)))
                .ok_or_else(|| DomainError::invalid_amount(format!("amount out of range: {s:?}")))?;
        }
        scaled = scaled
            .checked_mul(UNIT)
            .ok_or_else(|| DomainError::invalid_amount(format!("amount out of range: {s:?}")))?;

        let mut frac: i128 = 0;
        for c in frac_part.chars() {
            let digit = c
                .to_digit(10)
                .ok_or_else(|| DomainError::invalid_amount(format!("not a number: {s:?}")))?;
            frac = frac * 10 + i128::from(digit);
        }
        for _ in frac_part.len()..SCALE as usize {
            frac *= 10;
        }

        Ok(Self(scaled + frac))
    }
}

impl fmt::Display for Amount {
    /// Always four fractional digits, matching the stored string format
    /// (e.g. `"2500.0000"`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:04}", abs / UNIT as u128, abs % UNIT as u128)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 += rhs.0;
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount(self.0 - rhs.0)
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        Amount(-self.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}
