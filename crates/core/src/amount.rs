use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// A strictly positive transaction amount.
///
/// Statement exports carry charges and refunds with varying signs, so the
/// mapper stores magnitudes only. Zero is not representable: a row that
/// resolves to zero never becomes a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Decimal);

impl Amount {
    /// Returns `None` unless `value > 0`.
    pub fn new(value: Decimal) -> Option<Self> {
        if value > Decimal::ZERO {
            Some(Amount(value.normalize()))
        } else {
            None
        }
    }

    pub fn from_units(units: u64) -> Option<Self> {
        Self::new(Decimal::from(units))
    }

    pub fn value(self) -> Decimal {
        self.0
    }
}

/// Plain decimal rendering: `1000`, `1234.5`. No grouping, no currency sign.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Add<Amount> for Decimal {
    type Output = Decimal;
    fn add(self, rhs: Amount) -> Decimal {
        self + rhs.0
    }
}

impl Sum<Amount> for Decimal {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Decimal {
        iter.fold(Decimal::ZERO, |acc, a| acc + a)
    }
}
