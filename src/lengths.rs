//! Lengths

use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Mul, Sub},
    str::FromStr,
};

use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A linear measurement in inches (or any other consistent unit).
///
/// Backed by a [`Decimal`] so that fractional measurements such as `13.75` or
/// `0.125` add and subtract exactly. Arithmetic results may be zero or negative
/// (an offcut that does not exist); callers that store lengths check
/// [`Length::is_positive`] first.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Length(Decimal);

impl Length {
    /// A length of zero.
    pub const ZERO: Length = Length(Decimal::ZERO);

    /// Creates a new length from a decimal value.
    pub fn new(value: Decimal) -> Self {
        Length(value.normalize())
    }

    /// Returns the underlying decimal value.
    pub fn value(self) -> Decimal {
        self.0
    }

    /// Whether this length is strictly greater than zero.
    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Whole units contained in this length, rounded down.
    ///
    /// Returns `None` for negative lengths.
    pub fn whole_units(self) -> Option<usize> {
        self.0.floor().to_usize()
    }

    /// Round to the given number of decimal places, half away from zero.
    #[must_use]
    pub fn round_dp(self, dp: u32) -> Self {
        Length::new(
            self.0
                .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

impl From<Decimal> for Length {
    fn from(value: Decimal) -> Self {
        Length::new(value)
    }
}

impl From<i64> for Length {
    fn from(value: i64) -> Self {
        Length(Decimal::from(value))
    }
}

impl FromStr for Length {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Length::new)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(precision) => write!(f, "{:.*}", precision, self.0),
            None => write!(f, "{}", self.0.normalize()),
        }
    }
}

impl Add for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Length {
        Length::new(self.0 + rhs.0)
    }
}

impl AddAssign for Length {
    fn add_assign(&mut self, rhs: Length) {
        *self = *self + rhs;
    }
}

impl Sub for Length {
    type Output = Length;

    fn sub(self, rhs: Length) -> Length {
        Length::new(self.0 - rhs.0)
    }
}

impl Mul<u32> for Length {
    type Output = Length;

    fn mul(self, count: u32) -> Length {
        Length::new(self.0 * Decimal::from(count))
    }
}

impl Sum for Length {
    fn sum<I: Iterator<Item = Length>>(iter: I) -> Self {
        iter.fold(Length::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Length> for Length {
    fn sum<I: Iterator<Item = &'a Length>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
