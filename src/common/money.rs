use bigdecimal::BigDecimal;
use std::fmt;
use std::iter::Sum;
use std::ops::{Sub, SubAssign};

/// Minor units per major unit, used only for human-readable rendering.
const MINOR_UNITS: i64 = 100;

/// Amount of money in the smallest currency unit (dirams, cents, kopecks).
///
/// There are no fractional values: `Money(150)` is one hundred and fifty minor
/// units. Dump files carry the plain integer; `to_string_2dp` is for people.
///
/// # Examples
/// ```
/// use wallet::common::money::Money;
///
/// let amount = Money::new(1_000_00);
/// assert_eq!(amount.as_i64(), 100000);
/// assert_eq!(amount.to_string(), "100000");
/// assert_eq!(amount.to_string_2dp(), "1000.00");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Money(0)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Narrows a wide total into `Money`, clamping to the `i64` range.
    pub fn saturating_from_wide(total: i128) -> Money {
        match i64::try_from(total) {
            Ok(v) => Money(v),
            Err(_) if total < 0 => Money(i64::MIN),
            Err(_) => Money(i64::MAX),
        }
    }

    /// The amount widened for overflow-free accumulation.
    pub fn as_wide(&self) -> i128 {
        i128::from(self.0)
    }

    /// Renders the amount in major units with two decimals.
    pub fn to_string_2dp(&self) -> String {
        let bd = BigDecimal::from(self.0) / BigDecimal::from(MINOR_UNITS);
        format!("{:.2}", bd)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        *self = *self - rhs;
    }
}

/// Totals are accumulated in `i128` and clamp at the `i64` bounds, so
/// summing never wraps or panics.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        Money::saturating_from_wide(iter.map(|m| m.as_wide()).sum())
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}
