//! Token balance type.
//!
//! On-chain amounts are unsigned integers in the chain's smallest unit and can
//! exceed 64 (and, for tallies summed across conviction, even 128) bits. They are
//! held as arbitrary-precision integers and never routed through floating point.

use crate::error::TypesError;

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use rust_decimal::Decimal;
use serde::de::{self, value::MapAccessDeserializer, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Add;

/// A balance in raw (planck-like) units.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Balance(BigUint);

impl Balance {
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    pub fn new(raw: BigUint) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> &BigUint {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn saturating_sub(&self, other: &Self) -> Self {
        if self.0 > other.0 {
            Self(&self.0 - &other.0)
        } else {
            Self::zero()
        }
    }

    /// Parse base-16 digits (without a `0x` prefix).
    ///
    /// An empty digit string is zero. Odd-length input is left-padded.
    pub fn from_hex(digits: &str) -> Result<Self, TypesError> {
        if digits.is_empty() {
            return Ok(Self::zero());
        }
        let padded;
        let even = if digits.len() % 2 == 1 {
            padded = format!("0{digits}");
            padded.as_str()
        } else {
            digits
        };
        let bytes = hex::decode(even).map_err(|_| TypesError::InvalidHex(digits.to_string()))?;
        Ok(Self(BigUint::from_bytes_be(&bytes)))
    }

    /// Parse base-10 digits.
    pub fn from_decimal(digits: &str) -> Result<Self, TypesError> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TypesError::InvalidDecimal(digits.to_string()));
        }
        BigUint::parse_bytes(digits.as_bytes(), 10)
            .map(Self)
            .ok_or_else(|| TypesError::InvalidDecimal(digits.to_string()))
    }

    /// The value as a `u128`, if it fits.
    pub fn to_u128(&self) -> Option<u128> {
        self.0.to_u128()
    }

    /// Decimal value in whole tokens, scaled down by `decimals`.
    ///
    /// Exact while the amount fits a 96-bit decimal mantissa; beyond that the
    /// lowest fractional digits are truncated. `None` only when the whole-token
    /// part alone does not fit.
    pub fn to_token_decimal(&self, decimals: u8) -> Option<Decimal> {
        let ten = BigUint::from(10u32);
        let mut raw = self.0.clone();
        let mut scale = u32::from(decimals);
        loop {
            if let Some(d) = raw
                .to_i128()
                .and_then(|v| Decimal::try_from_i128_with_scale(v, scale).ok())
            {
                return Some(d);
            }
            if scale == 0 {
                return None;
            }
            raw /= &ten;
            scale -= 1;
        }
    }
}

impl From<u64> for Balance {
    fn from(v: u64) -> Self {
        Self(BigUint::from(v))
    }
}

impl From<u128> for Balance {
    fn from(v: u128) -> Self {
        Self(BigUint::from(v))
    }
}

impl From<BigUint> for Balance {
    fn from(v: BigUint) -> Self {
        Self(v)
    }
}

impl Add for Balance {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl<'a> Add<&'a Balance> for Balance {
    type Output = Self;
    fn add(self, rhs: &'a Balance) -> Self {
        Self(self.0 + &rhs.0)
    }
}

impl std::iter::Sum for Balance {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, b| acc + b)
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Balances go over the wire as decimal strings so JSON consumers never see a
// number wider than 2^53.
impl Serialize for Balance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Balance {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Balance::from_decimal(&s).map_err(serde::de::Error::custom)
    }
}

/// An amount as it arrives on the wire, before normalization.
///
/// Chain and indexer payloads mix `0x`-prefixed hex strings, decimal strings and
/// plain JSON numbers for the same field.
///
/// JSON integers wider than `u64` keep their digits as [`RawAmount::Text`]
/// (this relies on serde_json's `arbitrary_precision`); only genuine
/// fractional or exponent numbers become [`RawAmount::Float`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawAmount {
    Int(u64),
    Text(String),
    Float(f64),
}

impl RawAmount {
    fn from_number(number: &serde_json::Number) -> Self {
        if let Some(v) = number.as_u64() {
            return Self::Int(v);
        }
        let digits = number.to_string();
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            return Self::Text(digits);
        }
        Self::Float(number.as_f64().unwrap_or(f64::NAN))
    }
}

impl<'de> Deserialize<'de> for RawAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RawAmountVisitor)
    }
}

struct RawAmountVisitor;

impl<'de> Visitor<'de> for RawAmountVisitor {
    type Value = RawAmount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an amount as a number or a string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RawAmount, E> {
        Ok(RawAmount::Int(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RawAmount, E> {
        Ok(match u64::try_from(v) {
            Ok(v) => RawAmount::Int(v),
            Err(_) => RawAmount::Float(v as f64),
        })
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<RawAmount, E> {
        Ok(RawAmount::Text(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<RawAmount, E> {
        Ok(RawAmount::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RawAmount, E> {
        Ok(RawAmount::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<RawAmount, E> {
        Ok(RawAmount::Text(v))
    }

    // Numbers serde_json cannot hold natively arrive as a single-entry map
    // carrying the literal digits.
    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<RawAmount, A::Error> {
        let number = serde_json::Number::deserialize(MapAccessDeserializer::new(map))?;
        Ok(RawAmount::from_number(&number))
    }
}

impl From<u64> for RawAmount {
    fn from(v: u64) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for RawAmount {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_hex() {
        assert_eq!(Balance::from_hex("10").unwrap(), Balance::from(16u64));
        assert_eq!(Balance::from_hex("abc").unwrap(), Balance::from(0xabcu64));
        assert_eq!(Balance::from_hex("").unwrap(), Balance::zero());
        assert!(Balance::from_hex("zz").is_err());
    }

    #[test]
    fn test_from_hex_wider_than_u128() {
        let digits = "1".to_string() + &"0".repeat(40);
        let b = Balance::from_hex(&digits).unwrap();
        assert_eq!(b.to_u128(), None);
        assert_eq!(b.raw().bits(), 161);
    }

    #[test]
    fn test_from_decimal() {
        assert_eq!(Balance::from_decimal("64").unwrap(), Balance::from(64u64));
        assert!(Balance::from_decimal("").is_err());
        assert!(Balance::from_decimal("-1").is_err());
        assert!(Balance::from_decimal("1.5").is_err());
    }

    #[test]
    fn test_saturating_sub() {
        let a = Balance::from(10u64);
        let b = Balance::from(25u64);
        assert_eq!(b.saturating_sub(&a), Balance::from(15u64));
        assert_eq!(a.saturating_sub(&b), Balance::zero());
    }

    #[test]
    fn test_to_token_decimal() {
        let b = Balance::from(500_000_000_000u64);
        assert_eq!(b.to_token_decimal(10), Some(dec!(50)));
        assert_eq!(b.to_token_decimal(12), Some(dec!(0.5)));
        let huge = Balance::from_hex(&"f".repeat(40)).unwrap();
        assert_eq!(huge.to_token_decimal(10), None);
    }

    #[test]
    fn test_serde_as_string() {
        let b = Balance::from(u128::MAX);
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(json, format!("\"{}\"", u128::MAX));
        let back: Balance = serde_json::from_str(&json).unwrap();
        assert_eq!(back, b);
    }

    #[test]
    fn test_raw_amount_forms() {
        let v: Vec<RawAmount> = serde_json::from_str(r#"[16, "0x10", "64", 1e30, -3, 2.5]"#).unwrap();
        assert_eq!(v[0], RawAmount::Int(16));
        assert_eq!(v[1], RawAmount::Text("0x10".into()));
        assert_eq!(v[2], RawAmount::Text("64".into()));
        assert!(matches!(v[3], RawAmount::Float(_)));
        assert_eq!(v[4], RawAmount::Float(-3.0));
        assert_eq!(v[5], RawAmount::Float(2.5));
    }

    #[test]
    fn test_raw_amount_keeps_wide_integers() {
        let v: Vec<RawAmount> = serde_json::from_str(
            "[100000000000000000000, 340282366920938463463374607431768211456000]",
        )
        .unwrap();
        assert_eq!(v[0], RawAmount::Text("100000000000000000000".into()));
        assert_eq!(
            v[1],
            RawAmount::Text("340282366920938463463374607431768211456000".into())
        );
    }

    #[test]
    fn test_to_token_decimal_truncates_fraction_when_wide() {
        // 10^30 raw units at 10 decimals: 10^20 tokens, 31 significant digits.
        let b = Balance::from(10u128.pow(30));
        assert_eq!(b.to_token_decimal(10), Some(dec!(100000000000000000000)));
        let b = Balance::from(10u128.pow(30) + 1);
        assert_eq!(b.to_token_decimal(10), Some(dec!(100000000000000000000)));
    }

    #[test]
    fn test_sum() {
        let total: Balance = [1u64, 2, 3].into_iter().map(Balance::from).sum();
        assert_eq!(total, Balance::from(6u64));
    }
}
