//! Money type for representing currency amounts
//!
//! Internally stores amounts in satang (i64) to avoid floating-point
//! precision issues. The Display form is the plain two-decimal baht string
//! ("500.00") that every export surface emits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// A monetary amount stored as satang (hundredths of a baht)
///
/// Serializes as a bare integer, so an amount survives the JSON snapshot,
/// the SQL script, and the SQLite column without rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from satang
    pub const fn from_satang(satang: i64) -> Self {
        Self(satang)
    }

    /// Create a Money amount from whole baht
    pub const fn from_baht(baht: i64) -> Self {
        Self(baht * 100)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in satang
    pub const fn satang(&self) -> i64 {
        self.0
    }

    /// Get the whole baht portion (truncated toward zero)
    pub const fn baht(&self) -> i64 {
        self.0 / 100
    }

    /// Get the satang portion (0-99)
    pub const fn satang_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.baht().abs(), self.satang_part())
        } else {
            write!(f, "{}.{:02}", self.baht(), self.satang_part())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_satang() {
        let m = Money::from_satang(50000);
        assert_eq!(m.satang(), 50000);
        assert_eq!(m.baht(), 500);
        assert_eq!(m.satang_part(), 0);
    }

    #[test]
    fn test_from_baht() {
        assert_eq!(Money::from_baht(500).satang(), 50000);
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(format!("{}", Money::from_satang(50000)), "500.00");
        assert_eq!(format!("{}", Money::from_satang(20000)), "200.00");
        assert_eq!(format!("{}", Money::from_satang(1050)), "10.50");
        assert_eq!(format!("{}", Money::from_satang(5)), "0.05");
        assert_eq!(format!("{}", Money::zero()), "0.00");
        assert_eq!(format!("{}", Money::from_satang(-1050)), "-10.50");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_satang(1000);
        let b = Money::from_satang(500);
        assert_eq!((a + b).satang(), 1500);

        let mut c = a;
        c += b;
        assert_eq!(c.satang(), 1500);
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_satang(100),
            Money::from_satang(200),
            Money::from_satang(300),
        ];
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.satang(), 600);
    }

    #[test]
    fn test_is_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_satang(100).is_positive());
        assert!(Money::from_satang(-100).is_negative());
    }

    #[test]
    fn test_serialization_transparent() {
        let m = Money::from_satang(50000);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "50000");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
