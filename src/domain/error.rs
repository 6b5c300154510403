//! Domain validation errors for odds and probability types.
//!
//! These errors are returned when a value violates the rules of American
//! odds or when a derived quantity has no finite answer.
//!
//! # Examples
//!
//! ```
//! use sharpline::domain::{AmericanOdds, DomainError};
//!
//! // American odds never sit strictly between -100 and +100.
//! let result = AmericanOdds::try_new(50);
//! assert!(matches!(result, Err(DomainError::InvalidPrice { price: 50 })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// American odds must be nonzero with a magnitude of at least 100.
    #[error("invalid American price {price}: magnitude must be at least 100")]
    InvalidPrice {
        /// The rejected price.
        price: i64,
    },

    /// No finite break-even price exists for this fair probability.
    #[error("break-even price is undefined for fair probability {probability}")]
    UndefinedBreakEven {
        /// The fair probability that was supplied.
        probability: f64,
    },

    /// No counterpart rule matches this outcome label.
    #[error("no counterpart rule matches outcome '{label}'")]
    UnresolvableCounterpart {
        /// The label that could not be resolved.
        label: String,
    },
}
