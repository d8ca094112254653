// 1.0: all the primitives live here. nothing in the engine works without these types.
// account IDs, token amounts, ratios, prices, timestamps. each is a newtype so the
// compiler catches unit mixups.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

// token quantities carry 18 fractional digits, like the 18-decimal fixed point
// the external token contract uses.
pub const AMOUNT_SCALE: u32 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "account-{}", self.0)
    }
}

// 1.1: arithmetic failures. every balance operation is checked; a result that
// would leave the representable range or go negative aborts the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("arithmetic overflow")]
    Overflow,

    #[error("arithmetic underflow (result would be negative)")]
    Underflow,
}

// 1.2: non-negative fixed-point token amount. balances, debt, rewards, fees all
// use this. multiplication and division truncate toward zero so no operation can
// ever round value into existence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    #[must_use]
    pub fn new(value: Decimal) -> Option<Self> {
        if value >= Decimal::ZERO {
            Some(Self(value.trunc_with_scale(AMOUNT_SCALE)))
        } else {
            None
        }
    }

    pub fn new_unchecked(value: Decimal) -> Self {
        debug_assert!(value >= Decimal::ZERO);
        Self(value.trunc_with_scale(AMOUNT_SCALE))
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn add(&self, other: Amount) -> Result<Amount, AmountError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(AmountError::Overflow)
    }

    pub fn sub(&self, other: Amount) -> Result<Amount, AmountError> {
        if other.0 > self.0 {
            return Err(AmountError::Underflow);
        }
        Ok(Self(self.0 - other.0))
    }

    pub fn saturating_sub(&self, other: Amount) -> Amount {
        if other.0 >= self.0 {
            Self::zero()
        } else {
            Self(self.0 - other.0)
        }
    }

    // truncates, never rounds up
    pub fn mul_ratio(&self, ratio: Ratio) -> Result<Amount, AmountError> {
        self.0
            .checked_mul(ratio.value())
            .map(|v| Self(v.trunc_with_scale(AMOUNT_SCALE)))
            .ok_or(AmountError::Overflow)
    }

    pub fn mul_price(&self, price: Price) -> Result<Amount, AmountError> {
        self.0
            .checked_mul(price.value())
            .map(|v| Self(v.trunc_with_scale(AMOUNT_SCALE)))
            .ok_or(AmountError::Overflow)
    }

    pub fn div_price(&self, price: Price) -> Result<Amount, AmountError> {
        self.0
            .checked_div(price.value())
            .map(|v| Self(v.trunc_with_scale(AMOUNT_SCALE)))
            .ok_or(AmountError::Overflow)
    }

    pub fn min(&self, other: Amount) -> Amount {
        if self.0 <= other.0 {
            *self
        } else {
            other
        }
    }

    // 1.3: dashboard-style rendering: grouped thousands, two fractional digits,
    // truncated rather than rounded.
    pub fn to_display_string(&self) -> String {
        let truncated = self.0.trunc_with_scale(2);
        let text = format!("{:.2}", truncated);
        let (int_part, frac_part) = match text.split_once('.') {
            Some((i, f)) => (i, f),
            None => (text.as_str(), "00"),
        };

        let mut grouped = String::new();
        let digits: Vec<char> = int_part.chars().collect();
        for (idx, ch) in digits.iter().enumerate() {
            if idx > 0 && (digits.len() - idx) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(*ch);
        }

        format!("{}.{}", grouped, frac_part)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

// 1.4: fraction in [0, 1]. LTV, liquidation threshold, penalty and fee spreads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Ratio(Decimal);

impl Ratio {
    #[must_use]
    pub fn new(value: Decimal) -> Option<Self> {
        if value >= Decimal::ZERO && value <= Decimal::ONE {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn new_unchecked(value: Decimal) -> Self {
        debug_assert!(value >= Decimal::ZERO && value <= Decimal::ONE);
        Self(value)
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0 * dec!(100))?;
        write!(f, "%")
    }
}

// 1.5: exchange rate: debt units per unit of collateral token. must be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Price(Decimal);

impl Price {
    #[must_use]
    pub fn new(value: Decimal) -> Option<Self> {
        if value > Decimal::ZERO {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn new_unchecked(value: Decimal) -> Self {
        debug_assert!(value > Decimal::ZERO);
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// 1.6: millisecond timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp_millis())
    }

    pub fn from_millis(ms: i64) -> Self {
        Self(ms)
    }

    pub fn as_millis(&self) -> i64 {
        self.0
    }

    pub fn elapsed_hours(&self, other: &Timestamp) -> Decimal {
        let diff_ms = (other.0 - self.0).abs();
        Decimal::new(diff_ms, 0) / dec!(3_600_000)
    }
}
