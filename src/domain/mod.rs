//! Bookmaker-agnostic domain types and odds math.

pub mod error;
mod event;
mod ids;
pub mod odds;
mod outcome;
mod quote;

pub use error::DomainError;
pub use event::{EventContext, Side};
pub use ids::{BookmakerId, EventId, LineId};
pub use odds::{
    arbitrage_profit, arbitrage_stake_split, break_even_price, decimal_odds, expected_value,
    implied_probability, is_arbitrage, no_vig_probabilities, payout_multiple, AmericanOdds,
};
pub use outcome::{format_point, resolve_counterpart, Answer, Direction, MarketFamily, Outcome};
pub use quote::{FairQuote, Quote};
