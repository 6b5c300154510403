//! American odds and the probability math built on them.
//!
//! Everything here is pure: prices in, probabilities or prices out. The
//! pipeline calls these for every quote, and they are exported as a
//! standalone library for callers who only need the arithmetic.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Signed American odds, e.g. `-150` (favorite) or `+130` (underdog).
///
/// The inner value is private so every instance has a magnitude of at
/// least 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct AmericanOdds(i32);

impl AmericanOdds {
    /// Validate and wrap a raw American price.
    pub fn try_new(price: i64) -> Result<Self, DomainError> {
        let magnitude = price.unsigned_abs();
        if magnitude < 100 || magnitude > i32::MAX as u64 {
            return Err(DomainError::InvalidPrice { price });
        }
        // Range checked above.
        Ok(Self(price as i32))
    }

    /// The raw signed price.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// True for the favorite (minus) side.
    #[must_use]
    pub const fn is_favorite(self) -> bool {
        self.0 < 0
    }

    /// Vig-included probability of this side winning.
    #[must_use]
    pub fn implied_probability(self) -> f64 {
        implied_probability(self)
    }

    /// Profit per unit staked if the bet wins.
    #[must_use]
    pub fn payout_multiple(self) -> f64 {
        payout_multiple(self)
    }

    /// European decimal odds (stake included).
    #[must_use]
    pub fn decimal(self) -> f64 {
        decimal_odds(self)
    }
}

impl fmt::Display for AmericanOdds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 > 0 {
            write!(f, "+{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl TryFrom<i64> for AmericanOdds {
    type Error = DomainError;

    fn try_from(price: i64) -> Result<Self, Self::Error> {
        Self::try_new(price)
    }
}

impl From<AmericanOdds> for i64 {
    fn from(odds: AmericanOdds) -> Self {
        Self::from(odds.0)
    }
}

impl FromStr for AmericanOdds {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let price: i64 = digits
            .parse()
            .map_err(|_| format!("'{s}' is not an American price"))?;
        Self::try_new(price).map_err(|e| e.to_string())
    }
}

/// Vig-included probability for a single side.
///
/// `|p| / (|p| + 100)` for favorites, `100 / (100 + p)` otherwise.
#[must_use]
pub fn implied_probability(price: AmericanOdds) -> f64 {
    let p = f64::from(price.value());
    if p < 0.0 {
        p.abs() / (p.abs() + 100.0)
    } else {
        100.0 / (100.0 + p)
    }
}

/// Remove the vig from two counterpart sides of one line.
///
/// The returned pair always sums to one. Callers are responsible for
/// passing genuine counterparts; the pairing layer enforces that.
#[must_use]
pub fn no_vig_probabilities(a: AmericanOdds, b: AmericanOdds) -> (f64, f64) {
    let pa = implied_probability(a);
    let pb = implied_probability(b);
    let total = pa + pb;
    (pa / total, pb / total)
}

/// Profit per 1 unit staked if the bet wins.
#[must_use]
pub fn payout_multiple(price: AmericanOdds) -> f64 {
    let p = f64::from(price.value());
    if p < 0.0 {
        100.0 / p.abs()
    } else {
        p / 100.0
    }
}

/// Decimal odds: total return per unit staked, stake included.
#[must_use]
pub fn decimal_odds(price: AmericanOdds) -> f64 {
    1.0 + payout_multiple(price)
}

/// Lowest American price at which a bet with true win probability `fair`
/// has non-negative expected value.
///
/// Fails with [`DomainError::UndefinedBreakEven`] when `fair` is outside
/// `(0, 1)`: at zero no price breaks even, at one every price does.
pub fn break_even_price(fair: f64) -> Result<AmericanOdds, DomainError> {
    let undefined = || DomainError::UndefinedBreakEven { probability: fair };

    if !(fair > 0.0 && fair < 1.0) {
        return Err(undefined());
    }

    let ratio = (1.0 - fair) / fair;
    let raw = if ratio < 1.0 {
        (-100.0 / ratio).ceil()
    } else {
        (100.0 * ratio).ceil()
    };

    if !raw.is_finite() || raw.abs() > f64::from(i32::MAX) {
        return Err(undefined());
    }

    AmericanOdds::try_new(raw as i64).map_err(|_| undefined())
}

/// Expected profit per unit staked at `price` given true probability `fair`.
///
/// Positive means the price beats fair value.
#[must_use]
pub fn expected_value(price: AmericanOdds, fair: f64) -> f64 {
    payout_multiple(price) * fair - (1.0 - fair)
}

/// True when backing both sides guarantees a profit.
#[must_use]
pub fn is_arbitrage(a: AmericanOdds, b: AmericanOdds) -> bool {
    implied_probability(a) + implied_probability(b) < 1.0
}

/// Split one unit of bankroll across two sides so both outcomes pay the same.
///
/// Returns `(weight_a, weight_b)` summing to one.
#[must_use]
pub fn arbitrage_stake_split(a: AmericanOdds, b: AmericanOdds) -> (f64, f64) {
    let da = decimal_odds(a);
    let db = decimal_odds(b);
    let wa = 1.0 / (da / db + 1.0);
    (wa, 1.0 - wa)
}

/// Net profit of a two-sided stake for each possible result.
///
/// Returns `(profit_if_a_wins, profit_if_b_wins)`.
#[must_use]
pub fn arbitrage_profit(a: AmericanOdds, wa: f64, b: AmericanOdds, wb: f64) -> (f64, f64) {
    (
        payout_multiple(a) * wa - wb,
        payout_multiple(b) * wb - wa,
    )
}
