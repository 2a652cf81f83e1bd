use crate::error::{PaymentError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

const SCALE: u32 = 2;
const MULTIPLIER_SCALE: u32 = 4;

/// A monetary value with exactly 2 decimal places.
///
/// Wraps `rust_decimal::Decimal` so that every price and spend amount in the
/// optimizer is rounded the same way (half-up) and renders as `x.yy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);
    /// Smallest chargeable amount.
    pub const CENT: Self = Self(dec!(0.01));

    /// Builds a value that must already be expressible with 2 decimals.
    ///
    /// The written scale counts, so `1.000` is rejected even though it is numerically `1`.
    pub fn from_decimal(value: Decimal) -> Result<Self> {
        if value.scale() > SCALE {
            return Err(PaymentError::validation(format!(
                "Monetary value cannot have more than {SCALE} decimal places: {value}"
            )));
        }
        Ok(Self::canonical(value))
    }

    /// Rounds half-up (away from zero) to 2 decimals.
    pub fn round_half_up(value: Decimal) -> Self {
        Self::canonical(value.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero))
    }

    fn canonical(mut value: Decimal) -> Self {
        value.rescale(SCALE);
        Self(value)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// `self × rate`, rounded half-up to 2 decimals.
    pub fn fraction(self, rate: Decimal) -> Self {
        Self::round_half_up(self.0 * rate)
    }

    /// Price after applying a percentage discount.
    pub fn discounted(self, rate: DiscountRate) -> Self {
        Self::round_half_up(self.0 * rate.multiplier())
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// A discount percentage in the closed range `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DiscountRate(Decimal);

impl DiscountRate {
    pub const NONE: Self = Self(Decimal::ZERO);

    pub fn new(percent: Decimal) -> Result<Self> {
        if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
            return Err(PaymentError::validation(format!(
                "Discount percentage must be between 0 and 100: {percent}"
            )));
        }
        Ok(Self(percent))
    }

    pub fn percent(&self) -> Decimal {
        self.0
    }

    /// `1 - percent/100`, where the fraction is taken half-up at 4 decimals first.
    pub fn multiplier(&self) -> Decimal {
        let fraction = (self.0 / Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(MULTIPLIER_SCALE, RoundingStrategy::MidpointAwayFromZero);
        Decimal::ONE - fraction
    }
}

impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}
